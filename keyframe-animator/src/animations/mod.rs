//! Defines animations: values of any type interpolated between keyframes as the host drives time.
//!
//! - [`Animation`] animates one value through its keyframes.
//! - [`CompositeAnimation`] plays several named [`Animator`]s (animations or composites) together,
//!   each with its own start time, over a common duration.
//! - [`AnimationGroupLegacy`] is the former way to animate several values in lockstep.

mod animation;
mod animator;
mod composite;
mod easing;
mod helper;
pub(crate) mod keyframe;
mod legacy;

pub use animation::{Animation, AnimationSequence, ApplyValue, DEFAULT_DURATION};
pub use animator::{Animator, PlaybackState};
pub use composite::{CompositeAnimation, CompositeEntry};
pub use easing::Easing;
pub use helper::{
    AnimatableAttributeHelper, NumberAnimationHelper, PointAnimationHelper, StepAnimationHelper,
};
pub use keyframe::{validate, Keyframe};
pub use legacy::{AnimationGroupLegacy, AnimationSequenceLegacy, LegacySequence};
