use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use dyn_clone::DynClone;
use log::{debug, trace, warn};

use crate::animations::animation::{ApplyValue, DEFAULT_DURATION};
use crate::animations::keyframe::{interpolate, sort, validate};
use crate::animations::{AnimatableAttributeHelper, Easing, Keyframe};
use crate::errors::Error;

/// An attribute animated by an [`AnimationGroupLegacy`], whatever its value type.
pub trait LegacySequence: Debug + DynClone + Send + Sync {
    /// Computes the value matching the group `progress` and applies it.
    fn apply_progress(&self, progress: f32, easing: Easing);
}
dyn_clone::clone_trait_object!(LegacySequence);

/// The keyframes of one attribute, with the callback applying its values and the helper
/// interpolating them. Unlike [`AnimationSequence`](crate::animations::AnimationSequence), a legacy
/// sequence has no duration: it plays over the duration of the group it belongs to.
#[derive(Clone)]
pub struct AnimationSequenceLegacy<T> {
    /// The keyframes, sorted by percentage.
    pub keyframes: Vec<Keyframe<T>>,
    /// Applies each computed value to the animated target.
    pub apply_value: ApplyValue<T>,
    /// The interpolation strategy for the type of value.
    pub helper: Arc<dyn AnimatableAttributeHelper<T>>,
}

impl<T> AnimationSequenceLegacy<T> {
    /// Creates a new sequence: keyframes are sorted by percentage, nothing is validated.
    pub fn new<F, H>(mut keyframes: Vec<Keyframe<T>>, apply_value: F, helper: H) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
        H: AnimatableAttributeHelper<T> + 'static,
    {
        if keyframes.is_empty() {
            warn!("Legacy sequence created without keyframes: it will never apply any value");
        }
        sort(&mut keyframes);
        Self {
            keyframes,
            apply_value: Arc::new(apply_value),
            helper: Arc::new(helper),
        }
    }

    /// Same as [`AnimationSequenceLegacy::new()`], but fails if the keyframes are empty, out of
    /// [0, 1] or unordered.
    pub fn try_new<F, H>(keyframes: Vec<Keyframe<T>>, apply_value: F, helper: H) -> Result<Self, Error>
    where
        F: Fn(T) + Send + Sync + 'static,
        H: AnimatableAttributeHelper<T> + 'static,
    {
        validate(&keyframes)?;
        Ok(Self::new(keyframes, apply_value, helper))
    }
}

impl<T: Clone + Send + Sync + 'static> LegacySequence for AnimationSequenceLegacy<T> {
    fn apply_progress(&self, progress: f32, easing: Easing) {
        if let Some(value) =
            interpolate(&self.keyframes, progress, easing, self.helper.as_ref())
        {
            (self.apply_value)(value);
        }
    }
}

impl<T> Debug for AnimationSequenceLegacy<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSequenceLegacy")
            .field("keyframes", &self.keyframes.len())
            .field("helper", &self.helper)
            .finish()
    }
}

/// The former way to animate several attributes at once, kept for existing users.
///
/// All the sequences of the group share one duration and one clock: they move in lockstep, with
/// no start offset and no per-sequence duration. The group is either playing or not:
/// [`AnimationGroupLegacy::cancel_animation()`] freezes the values and the next start plays from
/// the beginning again. Prefer [`CompositeAnimation`](crate::animations::CompositeAnimation) for
/// new code.
#[derive(Clone, Debug)]
pub struct AnimationGroupLegacy {
    sequences: Vec<Box<dyn LegacySequence>>,
    /// The duration in seconds, shared by all sequences.
    duration: f32,
    easing: Easing,

    // ########################################
    // # Volatile utility data.
    elapsed: f32,
    playing: bool,
}

impl Default for AnimationGroupLegacy {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl AnimationGroupLegacy {
    pub fn new(sequences: Vec<Box<dyn LegacySequence>>) -> Self {
        Self {
            sequences,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            elapsed: 0.0,
            playing: false,
        }
    }

    /// Adds a sequence to the group.
    pub fn with_sequence<T: Clone + Send + Sync + 'static>(
        mut self,
        sequence: AnimationSequenceLegacy<T>,
    ) -> Self {
        self.sequences.push(Box::new(sequence));
        self
    }

    /// Sets the duration (in seconds) shared by all sequences.
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the easing function applied to every sequence.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Creates the group already playing (from the beginning) when set.
    pub fn with_playing(mut self, playing: bool) -> Self {
        self.playing = playing;
        self
    }

    /// Starts the group from the beginning. Does nothing if already playing.
    pub fn start_animation(&mut self) {
        if !self.playing {
            debug!("Legacy animation group started");
            self.elapsed = 0.0;
            self.playing = true;
        }
    }

    /// Stops the group: every sequence keeps its last applied value.
    pub fn cancel_animation(&mut self) {
        if self.playing {
            debug!("Legacy animation group cancelled at {}s", self.elapsed);
            self.playing = false;
        }
    }

    /// Advances the group by `delta_time` seconds and applies every sequence value.
    pub fn animate(&mut self, delta_time: f32) {
        if !self.playing || delta_time.is_nan() {
            return;
        }
        self.elapsed = (self.elapsed + delta_time).clamp(0.0, self.effective_duration());
        let progress = self.get_progress();
        trace!(
            "Legacy animation group frame [elapsed={}s, progress={}]",
            self.elapsed,
            progress
        );
        for sequence in &self.sequences {
            sequence.apply_progress(progress, self.easing);
        }
    }

    /// Sets the duration (in seconds): takes effect on the next tick.
    pub fn set_duration(&mut self, duration: f32) {
        debug!("Legacy animation group duration set to {}s", duration);
        self.duration = duration;
    }

    pub fn get_duration(&self) -> f32 {
        self.duration
    }

    pub fn get_easing(&self) -> Easing {
        self.easing
    }

    pub fn get_elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns the shared progress: from 0.0 to 1.0, always 1.0 for a zero (or negative) duration.
    pub fn get_progress(&self) -> f32 {
        let duration = self.effective_duration();
        match duration > 0.0 {
            true => self.elapsed / duration,
            false => 1.0,
        }
    }

    pub fn get_sequences(&self) -> &Vec<Box<dyn LegacySequence>> {
        &self.sequences
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.effective_duration()
    }

    fn effective_duration(&self) -> f32 {
        self.duration.max(0.0)
    }
}

impl Display for AnimationGroupLegacy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AnimationGroupLegacy [duration={}s, sequences={}, playing={}]",
            self.duration,
            self.sequences.len(),
            self.playing
        )
    }
}
