use snafu::Snafu;

pub use crate::errors::Error::*;

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Keyframe error: the keyframe list is empty.
    EmptyKeyframes,
    /// Keyframe error: keyframe #{index} percentage ({percentage}) is not within [0, 1].
    InvalidPercentage { index: usize, percentage: f32 },
    /// Keyframe error: keyframe #{index} percentage is lower than the previous one.
    UnorderedKeyframes { index: usize },
    /// Easing error: unknown easing function '{name}'.
    UnknownEasing { name: String },
}
