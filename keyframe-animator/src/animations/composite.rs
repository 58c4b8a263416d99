use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use log::debug;

use crate::animations::animation::DEFAULT_DURATION;
use crate::animations::{Animator, PlaybackState};

/// An [`Animator`] registered in a [`CompositeAnimation`], with the time (in seconds of the
/// composite clock) it starts at.
#[derive(Clone, Debug)]
pub struct CompositeEntry {
    pub animator: Box<dyn Animator>,
    pub start_time: f32,
}

impl CompositeEntry {
    pub fn new<A: Animator + 'static>(animator: A, start_time: f32) -> Self {
        Self {
            animator: Box::new(animator),
            start_time,
        }
    }
}

/// Represents a group of named [`Animator`]s played as one: starting, pausing, stopping or ticking
/// the composite does the same to all of them.
///
/// - Each animator waits for the composite clock to reach its own `start_time` before receiving any
///   time, and then plays on its own (with its own duration, easing...).
/// - The composite duration sets its time scale: the time an animator receives is the time elapsed
///   on the composite clock divided by the composite duration. With the default duration of 1s
///   animators receive time untouched; with a duration of 10s, an animator of 1s spans the whole
///   10s of the composite. Past its duration, the composite clock stops and so do its animators.
/// - Animators are updated in registration order, one after the other.
/// - A composite is itself an [`Animator`]: composites can be nested.
///
/// # Example
/// ```
/// use keyframe_animator::animations::{Animation, Animator, CompositeAnimation, Keyframe, NumberAnimationHelper};
///
/// let fade = Animation::new(
///     vec![Keyframe::new(0.0, 0.0f32), Keyframe::new(1.0, 1.0)],
///     |opacity| println!("opacity: {}", opacity),
///     NumberAnimationHelper,
/// );
/// let grow = Animation::new(
///     vec![Keyframe::new(0.0, 10.0f32), Keyframe::new(1.0, 20.0)],
///     |size| println!("size: {}", size),
///     NumberAnimationHelper,
/// );
///
/// let mut composite = CompositeAnimation::default()
///     .with_animation("fade", fade)
///     .with_animation_at("grow", grow, 0.5)
///     .with_duration(2.0);
///
/// composite.start_animation();
/// while !composite.is_finished() {
///     composite.animate(0.1);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct CompositeAnimation {
    /// The registered animators, by unique name, in registration order.
    animations: IndexMap<String, CompositeEntry>,
    /// The duration in seconds.
    duration: f32,

    // ########################################
    // # Volatile utility data.
    elapsed: f32,
    state: PlaybackState,
}

impl Default for CompositeAnimation {
    fn default() -> Self {
        Self::new(IndexMap::new())
    }
}

impl CompositeAnimation {
    /// Creates a composite from already registered animators.
    pub fn new(animations: IndexMap<String, CompositeEntry>) -> Self {
        Self {
            animations,
            duration: DEFAULT_DURATION,
            elapsed: 0.0,
            state: PlaybackState::Idle,
        }
    }

    /// Registers an animator starting with the composite.
    ///
    /// An animator already registered under the same name is replaced (see [`CompositeAnimation::add_animation_at()`]).
    pub fn add_animation<S: Into<String>, A: Animator + 'static>(
        &mut self,
        name: S,
        animator: A,
    ) -> &mut Self {
        self.add_animation_at(name, animator, 0.0)
    }

    /// Registers an animator starting when the composite clock reaches `start_time` (in seconds).
    ///
    /// - An animator already registered under the same name is replaced, and the new one keeps its
    ///   place in the update order.
    /// - When the composite is playing, the animator is started right away so that it plays as soon
    ///   as its start time is reached.
    pub fn add_animation_at<S: Into<String>, A: Animator + 'static>(
        &mut self,
        name: S,
        animator: A,
        start_time: f32,
    ) -> &mut Self {
        let name = name.into();
        let mut entry = CompositeEntry::new(animator, start_time);
        if self.state == PlaybackState::Playing {
            entry.animator.start_animation();
        }
        debug!("Composite animation: register '{}' at {}s", name, start_time);
        if self.animations.insert(name.clone(), entry).is_some() {
            debug!("Composite animation: '{}' replaced", name);
        }
        self
    }

    /// Same as [`CompositeAnimation::add_animation()`] in builder style.
    pub fn with_animation<S: Into<String>, A: Animator + 'static>(
        mut self,
        name: S,
        animator: A,
    ) -> Self {
        self.add_animation(name, animator);
        self
    }

    /// Same as [`CompositeAnimation::add_animation_at()`] in builder style.
    pub fn with_animation_at<S: Into<String>, A: Animator + 'static>(
        mut self,
        name: S,
        animator: A,
        start_time: f32,
    ) -> Self {
        self.add_animation_at(name, animator, start_time);
        self
    }

    /// Sets the duration (in seconds).
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Unregisters an animator and returns it. Unknown names are ignored (`None`).
    ///
    /// The animator is left in whatever state it was: its last applied values stay.
    pub fn remove_animation(&mut self, name: &str) -> Option<Box<dyn Animator>> {
        let entry = self.animations.shift_remove(name)?;
        debug!("Composite animation: '{}' removed", name);
        Some(entry.animator)
    }

    /// Returns the animator registered under the given name.
    pub fn get_animation(&self, name: &str) -> Option<&dyn Animator> {
        self.animations
            .get(name)
            .map(|entry| entry.animator.as_ref())
    }

    /// Returns the animator registered under the given name, mutably.
    pub fn get_animation_mut(&mut self, name: &str) -> Option<&mut dyn Animator> {
        match self.animations.get_mut(name) {
            Some(entry) => Some(entry.animator.as_mut()),
            None => None,
        }
    }

    /// Returns the start time (in seconds) of the animator registered under the given name.
    pub fn get_start_time(&self, name: &str) -> Option<f32> {
        self.animations.get(name).map(|entry| entry.start_time)
    }

    /// Returns the names of the registered animators, in update order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Returns the position of the composite clock (in seconds).
    pub fn get_elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Duration sanitized for computations: negative and NaN durations count as 0.
    fn effective_duration(&self) -> f32 {
        self.duration.max(0.0)
    }

    /// Converts a position on the composite clock into the time played by an animator starting at
    /// `start_time`.
    fn local_time(&self, position: f32, start_time: f32) -> f32 {
        let duration = self.effective_duration();
        match duration > 0.0 {
            true => (position - start_time).max(0.0) / duration,
            // A degenerate composite is over as soon as it moves.
            false if position > 0.0 => f32::INFINITY,
            false => 0.0,
        }
    }
}

impl Animator for CompositeAnimation {
    fn start_animation(&mut self) {
        match self.state {
            PlaybackState::Playing => return,
            PlaybackState::Paused => debug!("Composite animation resumed at {}s", self.elapsed),
            PlaybackState::Idle => {
                self.elapsed = 0.0;
                debug!("Composite animation started");
            }
        }
        for entry in self.animations.values_mut() {
            entry.animator.start_animation();
        }
        self.state = PlaybackState::Playing;
    }

    fn pause_animation(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        for entry in self.animations.values_mut() {
            entry.animator.pause_animation();
        }
        debug!("Composite animation paused at {}s", self.elapsed);
        self.state = PlaybackState::Paused;
    }

    fn stop_animation(&mut self) {
        if self.state == PlaybackState::Idle {
            return;
        }
        for entry in self.animations.values_mut() {
            entry.animator.stop_animation();
        }
        debug!("Composite animation stopped at {}s", self.elapsed);
        self.state = PlaybackState::Idle;
    }

    fn animate(&mut self, delta_time: f32) {
        if self.state != PlaybackState::Playing || delta_time.is_nan() {
            return;
        }
        let duration = self.effective_duration();
        // The duration may have shrunk below the clock since the last tick.
        let overrun = self.elapsed > duration;
        let started = self.elapsed;
        let previous = self.elapsed.min(duration);
        let current = (previous + delta_time).clamp(0.0, duration);
        self.elapsed = current;

        if overrun && delta_time > 0.0 {
            debug!("Composite animation cut short by its duration at {}s", duration);
            for entry in self.animations.values_mut() {
                if entry.start_time < started {
                    entry.animator.animate(f32::INFINITY);
                }
            }
            return;
        }

        // With a degenerate duration the clock never moves: the tick itself is the progress.
        let (previous, current) = match duration > 0.0 {
            true => (previous, current),
            false => (0.0, delta_time),
        };

        for index in 0..self.animations.len() {
            let start_time = self.animations[index].start_time;
            let local_delta =
                self.local_time(current, start_time) - self.local_time(previous, start_time);
            if local_delta != 0.0 {
                self.animations[index].animator.animate(local_delta);
            }
        }
    }

    fn seek(&mut self, position: f32) {
        if position.is_nan() {
            return;
        }
        self.elapsed = position.clamp(0.0, self.effective_duration());
        let position = match self.effective_duration() > 0.0 {
            true => self.elapsed,
            false => position,
        };
        let playing = self.state == PlaybackState::Playing;
        for index in 0..self.animations.len() {
            let start_time = self.animations[index].start_time;
            let local_position = self.local_time(position, start_time);
            let animator = &mut self.animations[index].animator;
            // Not reached yet: rewound to its beginning without applying anything.
            if position <= start_time {
                animator.stop_animation();
                if playing {
                    animator.start_animation();
                }
            } else {
                animator.seek(local_position);
            }
        }
        if self.state == PlaybackState::Idle {
            self.state = PlaybackState::Paused;
        }
        debug!("Composite animation sought to {}s", self.elapsed);
    }

    fn get_duration(&self) -> f32 {
        self.duration
    }

    fn set_duration(&mut self, duration: f32) {
        debug!("Composite animation duration set to {}s", duration);
        self.duration = duration;
    }

    fn get_state(&self) -> PlaybackState {
        self.state
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.effective_duration()
    }
}

impl Display for CompositeAnimation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "CompositeAnimation [duration={}s, animations={}, state={}]",
            self.duration,
            self.animations.len(),
            self.state
        )?;
        for (name, entry) in &self.animations {
            writeln!(
                f,
                "  '{}' at {}s [duration={}s, state={}]",
                name,
                entry.start_time,
                entry.animator.get_duration(),
                entry.animator.get_state()
            )?;
        }
        Ok(())
    }
}
