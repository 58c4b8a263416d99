use std::fmt::{Debug, Display, Formatter};
use std::sync::Arc;

use dyn_clone::DynClone;
use parking_lot::RwLock;

/// Playback state of an [`Animator`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started yet, or stopped: the next start plays from the beginning.
    #[default]
    Idle,
    /// Advancing on every `animate()` call.
    Playing,
    /// Frozen: the next start resumes where it was paused.
    Paused,
}

impl Display for PlaybackState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        };
        write!(f, "{}", state)
    }
}

/// The capability shared by every playable unit: a single [`Animation`](crate::animations::Animation)
/// as well as a [`CompositeAnimation`](crate::animations::CompositeAnimation) made of other animators.
///
/// Time never flows by itself: the host calls [`Animator::animate()`] once per tick with the time
/// elapsed since the previous tick. Nothing happens unless the animator is playing.
pub trait Animator: Debug + DynClone + Send + Sync {
    /// Starts the animator, or resumes it when paused. Does nothing if already playing.
    fn start_animation(&mut self);
    /// Freezes the animator: the last applied values are kept and the next start resumes from here.
    fn pause_animation(&mut self);
    /// Freezes the animator: the last applied values are kept and the next start restarts from the beginning.
    fn stop_animation(&mut self);
    /// Advances the animator by `delta_time` seconds and applies the resulting values.
    fn animate(&mut self, delta_time: f32);
    /// Moves the playhead to `position` seconds of playback from the beginning and applies the
    /// resulting values. An idle animator becomes paused at that position.
    fn seek(&mut self, position: f32);
    /// Returns the duration (in seconds).
    fn get_duration(&self) -> f32;
    /// Sets the duration (in seconds). Takes effect on the next tick, even while playing.
    fn set_duration(&mut self, duration: f32);
    /// Returns the current playback state.
    fn get_state(&self) -> PlaybackState;
    /// Indicates if the playhead reached the end of the animation.
    fn is_finished(&self) -> bool;
    /// Indicates if the animator is currently playing.
    fn is_playing(&self) -> bool {
        self.get_state() == PlaybackState::Playing
    }
}
dyn_clone::clone_trait_object!(Animator);

/// A shared animator is an animator: this allows to keep a handle on an animator registered in a
/// [`CompositeAnimation`](crate::animations::CompositeAnimation) to inspect or drive it directly.
/// Clones share the same underlying animator.
impl<A: Animator> Animator for Arc<RwLock<A>> {
    fn start_animation(&mut self) {
        self.write().start_animation();
    }

    fn pause_animation(&mut self) {
        self.write().pause_animation();
    }

    fn stop_animation(&mut self) {
        self.write().stop_animation();
    }

    fn animate(&mut self, delta_time: f32) {
        self.write().animate(delta_time);
    }

    fn seek(&mut self, position: f32) {
        self.write().seek(position);
    }

    fn get_duration(&self) -> f32 {
        self.read().get_duration()
    }

    fn set_duration(&mut self, duration: f32) {
        self.write().set_duration(duration);
    }

    fn get_state(&self) -> PlaybackState {
        self.read().get_state()
    }

    fn is_finished(&self) -> bool {
        self.read().is_finished()
    }
}
