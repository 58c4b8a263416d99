use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::animations::keyframe::{interpolate, sort, validate};
use crate::animations::{AnimatableAttributeHelper, Animator, Easing, Keyframe, PlaybackState};
use crate::errors::Error;

/// The callback applying an animated value onto its (externally owned) target.
pub type ApplyValue<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Duration (in seconds) of an animation unless specified otherwise.
pub const DEFAULT_DURATION: f32 = 1.0;

/// Represents the animation of a single attribute: a list of [`Keyframe`]s played over a duration.
///
/// - The animation is driven by its host: each call to [`Animator::animate()`] advances it by the
///   given elapsed time, computes the attribute value and hands it to the `apply_value` callback.
/// - It can be started, paused, stopped, reversed and sought (see [`Animator`]).
/// - The values in between keyframes are computed by its [`AnimatableAttributeHelper`] following its
///   [`Easing`] function (default: [`Easing::Linear`]).
///
/// The animation never owns nor reads back its target: it only writes to it through the callback.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use parking_lot::RwLock;
/// use keyframe_animator::animations::{Animation, Animator, Keyframe, PointAnimationHelper};
/// use keyframe_animator::utils::Point;
///
/// let position = Arc::new(RwLock::new(Point::default()));
/// let target = position.clone();
///
/// let mut animation = Animation::new(
///     vec![
///         Keyframe::new(0.0, Point::new(0.0, 0.0)),
///         Keyframe::new(0.5, Point::new(3.0, 3.0)),
///         Keyframe::new(1.0, Point::new(10.0, 10.0)),
///     ],
///     move |value: Point| *target.write() = value,
///     PointAnimationHelper,
/// )
/// .with_duration(2.0);
///
/// animation.start_animation();
/// animation.animate(1.0);
/// assert_eq!(*position.read(), Point::new(3.0, 3.0));
/// ```
#[derive(Clone)]
pub struct Animation<T> {
    /// The keyframes, sorted by percentage.
    keyframes: Vec<Keyframe<T>>,
    /// The duration in seconds.
    duration: f32,
    /// The easing function applied in between keyframes.
    easing: Easing,
    /// Plays from the end to the beginning when set.
    reverse: bool,
    /// The attribute interpolation strategy.
    helper: Arc<dyn AnimatableAttributeHelper<T>>,
    /// Applies the computed value onto the animated target.
    apply_value: ApplyValue<T>,

    // ########################################
    // # Volatile utility data.
    /// The position of the clock in seconds, within [0, duration].
    elapsed: f32,
    state: PlaybackState,
}

impl<T: Clone + Send + Sync + 'static> Animation<T> {
    /// Creates a new animation for the given keyframes.
    ///
    /// Keyframes are sorted by percentage. No validation is done: an empty list makes an animation
    /// that never applies anything, a single keyframe is applied as a constant, and percentages
    /// not covering [0, 1] are extrapolated (see [`AnimatableAttributeHelper`]).
    /// Use [`Animation::try_new()`] to reject such keyframes instead.
    ///
    /// # Arguments
    /// * `keyframes` - The keyframes of the animated attribute.
    /// * `apply_value` - The callback applying each computed value to the animated target.
    /// * `helper` - The interpolation strategy for the type of value.
    pub fn new<F, H>(keyframes: Vec<Keyframe<T>>, apply_value: F, helper: H) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
        H: AnimatableAttributeHelper<T> + 'static,
    {
        Self::from_parts(keyframes, Arc::new(apply_value), Arc::new(helper))
    }

    /// Same as [`Animation::new()`], but fails if the keyframes are empty, out of [0, 1] or unordered.
    pub fn try_new<F, H>(keyframes: Vec<Keyframe<T>>, apply_value: F, helper: H) -> Result<Self, Error>
    where
        F: Fn(T) + Send + Sync + 'static,
        H: AnimatableAttributeHelper<T> + 'static,
    {
        validate(&keyframes)?;
        Ok(Self::new(keyframes, apply_value, helper))
    }

    fn from_parts(
        mut keyframes: Vec<Keyframe<T>>,
        apply_value: ApplyValue<T>,
        helper: Arc<dyn AnimatableAttributeHelper<T>>,
    ) -> Self {
        if keyframes.is_empty() {
            warn!("Animation created without keyframes: it will never apply any value");
        }
        sort(&mut keyframes);
        Self {
            keyframes,
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
            reverse: false,
            helper,
            apply_value,
            elapsed: 0.0,
            state: PlaybackState::Idle,
        }
    }

    /// Sets the duration (in seconds).
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the easing function.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the easing function: takes effect on the next applied value.
    pub fn set_easing(&mut self, easing: Easing) -> &mut Self {
        self.easing = easing;
        self
    }

    /// Sets the playing direction: from the last keyframe to the first one when `reverse` is set.
    ///
    /// The clock is left untouched: only the way it moves on the next ticks changes.
    pub fn toggle_reverse(&mut self, reverse: bool) -> &mut Self {
        debug!("Animation reverse set to {}", reverse);
        self.reverse = reverse;
        self
    }

    /// Returns the keyframes, sorted by percentage.
    pub fn get_keyframes(&self) -> &Vec<Keyframe<T>> {
        &self.keyframes
    }

    /// Returns the easing function.
    pub fn get_easing(&self) -> Easing {
        self.easing
    }

    /// Indicates if the animation plays backward.
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Returns the position of the clock (in seconds from the beginning of the keyframes).
    pub fn get_elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns the progress of the animation, from 0.0 (first keyframe) to 1.0 (last keyframe).
    ///
    /// A zero (or negative) duration animation is always at its end: 1.0, or 0.0 when reversed.
    pub fn get_progress(&self) -> f32 {
        let duration = self.effective_duration();
        match duration > 0.0 {
            true => self.elapsed / duration,
            false if self.reverse => 0.0,
            false => 1.0,
        }
    }

    /// Returns the value matching the current progress, without applying it.
    pub fn get_value(&self) -> Option<T> {
        interpolate(
            &self.keyframes,
            self.get_progress(),
            self.easing,
            self.helper.as_ref(),
        )
    }

    /// Duration sanitized for computations: negative and NaN durations count as 0.
    fn effective_duration(&self) -> f32 {
        self.duration.max(0.0)
    }

    /// Where the clock restarts from: the end when reversed.
    fn origin(&self) -> f32 {
        match self.reverse {
            true => self.effective_duration(),
            false => 0.0,
        }
    }

    /// Computes and applies the value matching the current clock.
    fn apply_frame(&self) {
        if let Some(value) = self.get_value() {
            trace!(
                "Animation frame [elapsed={}s, progress={}]",
                self.elapsed,
                self.get_progress()
            );
            (self.apply_value)(value);
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Animator for Animation<T> {
    fn start_animation(&mut self) {
        match self.state {
            PlaybackState::Playing => return,
            PlaybackState::Paused => debug!("Animation resumed at {}s", self.elapsed),
            PlaybackState::Idle => {
                self.elapsed = self.origin();
                debug!("Animation started at {}s", self.elapsed);
            }
        }
        self.state = PlaybackState::Playing;
    }

    fn pause_animation(&mut self) {
        if self.state == PlaybackState::Playing {
            debug!("Animation paused at {}s", self.elapsed);
            self.state = PlaybackState::Paused;
        }
    }

    fn stop_animation(&mut self) {
        if self.state != PlaybackState::Idle {
            debug!("Animation stopped at {}s", self.elapsed);
            self.state = PlaybackState::Idle;
        }
    }

    fn animate(&mut self, delta_time: f32) {
        if self.state != PlaybackState::Playing || delta_time.is_nan() {
            return;
        }
        let delta_time = match self.reverse {
            true => -delta_time,
            false => delta_time,
        };
        self.elapsed = (self.elapsed + delta_time).clamp(0.0, self.effective_duration());
        self.apply_frame();
    }

    fn seek(&mut self, position: f32) {
        if position.is_nan() {
            return;
        }
        let duration = self.effective_duration();
        let position = position.clamp(0.0, duration);
        self.elapsed = match self.reverse {
            true => duration - position,
            false => position,
        };
        if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Paused;
        }
        debug!("Animation sought to {}s", self.elapsed);
        self.apply_frame();
    }

    fn get_duration(&self) -> f32 {
        self.duration
    }

    fn set_duration(&mut self, duration: f32) {
        debug!("Animation duration set to {}s", duration);
        self.duration = duration;
    }

    fn get_state(&self) -> PlaybackState {
        self.state
    }

    fn is_finished(&self) -> bool {
        match self.reverse {
            true => self.elapsed <= 0.0,
            false => self.elapsed >= self.effective_duration(),
        }
    }
}

impl<T> Debug for Animation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("keyframes", &self.keyframes.len())
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("reverse", &self.reverse)
            .field("helper", &self.helper)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .finish()
    }
}

impl<T> Display for Animation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Animation [duration={}s, keyframes={}, easing={}, reverse={}, state={}]",
            self.duration,
            self.keyframes.len(),
            self.easing,
            self.reverse,
            self.state
        )
    }
}

/// Describes an animation of one attribute with its own duration, to be turned into an
/// [`Animation`].
#[derive(Clone)]
pub struct AnimationSequence<T> {
    /// The duration in seconds.
    pub duration: f32,
    /// The keyframes of the animated attribute.
    pub keyframes: Vec<Keyframe<T>>,
    /// Applies each computed value to the animated target.
    pub apply_value: ApplyValue<T>,
    /// The interpolation strategy for the type of value.
    pub helper: Arc<dyn AnimatableAttributeHelper<T>>,
}

impl<T> AnimationSequence<T> {
    pub fn new<F, H>(duration: f32, keyframes: Vec<Keyframe<T>>, apply_value: F, helper: H) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
        H: AnimatableAttributeHelper<T> + 'static,
    {
        Self {
            duration,
            keyframes,
            apply_value: Arc::new(apply_value),
            helper: Arc::new(helper),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> From<AnimationSequence<T>> for Animation<T> {
    fn from(sequence: AnimationSequence<T>) -> Self {
        Animation::from_parts(sequence.keyframes, sequence.apply_value, sequence.helper)
            .with_duration(sequence.duration)
    }
}

#[cfg(test)]
mod tests {
    use crate::animations::{NumberAnimationHelper, PointAnimationHelper, StepAnimationHelper};
    use crate::mocks::target::MockTarget;
    use crate::utils::Point;

    use super::*;

    const EPSILON: f32 = 0.005;

    fn position_keyframes() -> Vec<Keyframe<Point>> {
        vec![
            Keyframe::new(0.0, Point::new(0.0, 0.0)),
            Keyframe::new(0.4, Point::new(1.7, 1.7)),
            Keyframe::new(0.5, Point::new(3.0, 3.0)),
            Keyframe::new(1.0, Point::new(10.0, 10.0)),
        ]
    }

    fn create_animation() -> (Animation<Point>, MockTarget<Point>) {
        let target = MockTarget::new(Point::default());
        let animation = Animation::new(position_keyframes(), target.setter(), PointAnimationHelper);
        (animation, target)
    }

    #[test]
    fn test_new_animation() {
        let (animation, target) = create_animation();
        assert_eq!(animation.get_keyframes().len(), 4);
        assert_eq!(animation.get_duration(), DEFAULT_DURATION);
        assert_eq!(animation.get_easing(), Easing::Linear);
        assert_eq!(animation.get_state(), PlaybackState::Idle);
        assert_eq!(animation.get_elapsed(), 0.0);
        assert!(!animation.is_reverse());
        assert!(!animation.is_playing());
        assert_eq!(target.calls(), 0);
        assert_eq!(
            animation.to_string(),
            "Animation [duration=1s, keyframes=4, easing=linear, reverse=false, state=idle]"
        );
    }

    #[test]
    fn test_keyframes_are_sorted() {
        let animation = Animation::new(
            vec![
                Keyframe::new(1.0, 10.0f32),
                Keyframe::new(0.0, 0.0),
                Keyframe::new(0.5, 3.0),
            ],
            |_| {},
            NumberAnimationHelper,
        );
        let percentages: Vec<f32> = animation
            .get_keyframes()
            .iter()
            .map(|keyframe| keyframe.percentage)
            .collect();
        assert_eq!(percentages, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_try_new() {
        let target = MockTarget::new(Point::default());
        assert!(Animation::try_new(position_keyframes(), target.setter(), PointAnimationHelper).is_ok());
        let result = Animation::try_new(vec![], target.setter(), PointAnimationHelper);
        assert_eq!(result.err(), Some(Error::EmptyKeyframes));
    }

    #[test]
    fn test_animate_without_start() {
        let (mut animation, target) = create_animation();
        for _ in 0..=10 {
            animation.animate(0.1);
        }
        assert_eq!(target.get(), Point::new(0.0, 0.0));
        assert_eq!(target.calls(), 0);
        assert_eq!(animation.get_elapsed(), 0.0);
    }

    #[test]
    fn test_play_animation() {
        let (mut animation, target) = create_animation();
        animation.set_duration(2.0);
        animation.start_animation();
        assert!(animation.is_playing());
        for _ in 0..=20 {
            animation.animate(0.1);
        }
        assert_eq!(target.get(), Point::new(10.0, 10.0));
        assert!(animation.is_finished());
        assert!(animation.is_playing());
    }

    #[test]
    fn test_animation_follows_keyframes() {
        let (mut animation, target) = create_animation();
        animation.start_animation();
        for tick in 1..=10 {
            animation.animate(0.1);
            match tick {
                4 => assert!(target.get().is_close_to(&Point::new(1.7, 1.7), EPSILON)),
                5 => assert!(target.get().is_close_to(&Point::new(3.0, 3.0), EPSILON)),
                _ => {}
            }
        }
        assert!(target.get().is_close_to(&Point::new(10.0, 10.0), EPSILON));
        assert_eq!(target.calls(), 10);
    }

    #[test]
    fn test_stop_animation() {
        let (mut animation, target) = create_animation();
        animation.start_animation();
        let mut expected = Point::default();
        for tick in 0..=10 {
            if tick == 4 {
                animation.stop_animation();
                expected = target.get();
            }
            animation.animate(0.1);
        }
        assert!(expected.is_close_to(&Point::new(1.7, 1.7), EPSILON));
        assert_eq!(target.get(), expected);
        assert_eq!(animation.get_state(), PlaybackState::Idle);

        // Restarting plays from the beginning.
        animation.start_animation();
        animation.animate(0.1);
        assert!(target.get().is_close_to(&Point::new(0.425, 0.425), EPSILON));
    }

    #[test]
    fn test_pause_and_resume() {
        let (mut animation, target) = create_animation();
        animation.start_animation();
        animation.animate(0.2);
        animation.pause_animation();
        assert_eq!(animation.get_state(), PlaybackState::Paused);
        let frozen = target.get();
        animation.animate(0.3);
        assert_eq!(target.get(), frozen);

        // Resuming continues from where the animation was paused.
        animation.start_animation();
        animation.animate(0.2);
        assert!((animation.get_elapsed() - 0.4).abs() < 1e-6);
        assert!(target.get().is_close_to(&Point::new(1.7, 1.7), EPSILON));
    }

    #[test]
    fn test_reverse_animation() {
        let (mut animation, target) = create_animation();
        animation.toggle_reverse(true);
        animation.start_animation();
        assert_eq!(animation.get_elapsed(), 1.0);
        for _ in 0..60 {
            animation.animate(0.01);
        }
        assert!((animation.get_elapsed() - 0.4).abs() < 1e-4);
        assert!(target.get().is_close_to(&Point::new(1.7, 1.7), EPSILON));
        for _ in 0..60 {
            animation.animate(0.01);
        }
        assert_eq!(target.get(), Point::new(0.0, 0.0));
        assert!(animation.is_finished());
    }

    #[test]
    fn test_toggle_reverse_midflight() {
        let (mut animation, target) = create_animation();
        animation.start_animation();
        animation.animate(0.5);
        animation.toggle_reverse(true);
        assert_eq!(animation.get_elapsed(), 0.5);
        animation.animate(0.1);
        assert!(target.get().is_close_to(&Point::new(1.7, 1.7), EPSILON));
    }

    #[test]
    fn test_change_duration_midflight() {
        let (mut animation, target) = create_animation();
        animation.start_animation();
        animation.animate(0.25);
        animation.set_duration(0.5);
        animation.animate(0.0);
        assert!(target.get().is_close_to(&Point::new(3.0, 3.0), EPSILON));
        // Shrinking below the clock lands on the end.
        animation.set_duration(0.1);
        animation.animate(0.0);
        assert_eq!(target.get(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_zero_duration() {
        let (mut animation, target) = create_animation();
        animation.set_duration(0.0);
        animation.start_animation();
        animation.animate(0.1);
        assert_eq!(target.get(), Point::new(10.0, 10.0));

        let (mut animation, target) = create_animation();
        animation.set_duration(-3.0);
        animation.toggle_reverse(true);
        animation.start_animation();
        animation.animate(0.1);
        assert_eq!(target.get(), Point::new(0.0, 0.0));

        let (mut animation, target) = create_animation();
        animation.set_duration(f32::NAN);
        animation.start_animation();
        animation.animate(0.1);
        assert_eq!(target.get(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_degenerate_deltas() {
        let (mut animation, target) = create_animation();
        animation.start_animation();
        animation.animate(f32::NAN);
        assert_eq!(target.calls(), 0);
        animation.animate(f32::INFINITY);
        assert_eq!(target.get(), Point::new(10.0, 10.0));
        animation.animate(-0.5);
        assert!(target.get().is_close_to(&Point::new(3.0, 3.0), EPSILON));
    }

    #[test]
    fn test_empty_keyframes() {
        let target = MockTarget::new(5.0f32);
        let mut animation = Animation::new(vec![], target.setter(), NumberAnimationHelper);
        animation.start_animation();
        animation.animate(0.5);
        animation.animate(0.5);
        assert_eq!(target.get(), 5.0);
        assert_eq!(target.calls(), 0);
        assert_eq!(animation.get_value(), None);
    }

    #[test]
    fn test_single_keyframe() {
        let target = MockTarget::new(0.0f32);
        let mut animation = Animation::new(
            vec![Keyframe::new(0.3, 7.0f32)],
            target.setter(),
            NumberAnimationHelper,
        );
        animation.start_animation();
        for _ in 0..5 {
            animation.animate(0.25);
            assert_eq!(target.get(), 7.0);
        }
    }

    #[test]
    fn test_extrapolation() {
        // Keyframes not covering [0, 1]: the trend of the closest pair is continued.
        let target = MockTarget::new(0.0f32);
        let mut animation = Animation::new(
            vec![Keyframe::new(0.25, 1.0f32), Keyframe::new(0.75, 2.0)],
            target.setter(),
            NumberAnimationHelper,
        );
        animation.start_animation();
        animation.animate(0.0);
        assert!((target.get() - 0.5).abs() < 1e-5);
        animation.animate(1.0);
        assert!((target.get() - 2.5).abs() < 1e-5);

        // Overshooting easings go beyond the keyframes without failing.
        let (mut animation, target) = create_animation();
        animation.set_easing(Easing::BackOut);
        animation.start_animation();
        for _ in 0..100 {
            animation.animate(0.01);
            assert!(target.get().x.is_finite());
        }
        animation.seek(0.75);
        assert!(target.get().x > 6.5);
    }

    #[test]
    fn test_easing() {
        let target = MockTarget::new(0.0f32);
        let mut animation = Animation::new(
            vec![Keyframe::new(0.0, 0.0f32), Keyframe::new(1.0, 10.0)],
            target.setter(),
            NumberAnimationHelper,
        )
        .with_easing(Easing::QuadIn);
        animation.start_animation();
        animation.animate(0.5);
        assert!((target.get() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_seek() {
        let (mut animation, target) = create_animation();
        animation.seek(0.5);
        assert_eq!(animation.get_state(), PlaybackState::Paused);
        assert!(target.get().is_close_to(&Point::new(3.0, 3.0), EPSILON));

        // Resumes from the sought position.
        animation.start_animation();
        animation.animate(0.5);
        assert_eq!(target.get(), Point::new(10.0, 10.0));

        // Reversed: the position counts from the end.
        animation.toggle_reverse(true);
        animation.seek(0.6);
        assert!((animation.get_elapsed() - 0.4).abs() < 1e-6);
        assert!(target.get().is_close_to(&Point::new(1.7, 1.7), EPSILON));

        animation.seek(25.0);
        assert_eq!(animation.get_elapsed(), 0.0);
        assert!(animation.is_finished());
    }

    #[test]
    fn test_discrete_values() {
        let target = MockTarget::new(String::from("none"));
        let mut animation = Animation::new(
            vec![
                Keyframe::new(0.0, String::from("idle")),
                Keyframe::new(0.5, String::from("walk")),
                Keyframe::new(1.0, String::from("run")),
            ],
            target.setter(),
            StepAnimationHelper,
        );
        animation.start_animation();
        animation.animate(0.25);
        assert_eq!(target.get(), "idle");
        animation.animate(0.5);
        assert_eq!(target.get(), "walk");
        animation.animate(0.5);
        assert_eq!(target.get(), "run");
    }

    #[test]
    fn test_animation_from_sequence() {
        let target = MockTarget::new(0.0f32);
        let sequence = AnimationSequence::new(
            4.0,
            vec![Keyframe::new(0.0, 0.0f32), Keyframe::new(1.0, 8.0)],
            target.setter(),
            NumberAnimationHelper,
        );
        let mut animation = Animation::from(sequence.clone());
        assert_eq!(animation.get_duration(), 4.0);
        animation.start_animation();
        animation.animate(1.0);
        assert!((target.get() - 2.0).abs() < 1e-5);

        // The sequence shares its callback with every animation built from it.
        let mut other = Animation::from(sequence);
        other.seek(4.0);
        assert_eq!(target.get(), 8.0);
        assert_eq!(target.calls(), 2);
    }
}
