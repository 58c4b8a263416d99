use std::fmt::{Display, Formatter};

use crate::animations::{AnimatableAttributeHelper, Easing};
use crate::errors::{EmptyKeyframesSnafu, Error, InvalidPercentageSnafu, UnorderedKeyframesSnafu};
use crate::utils::Scalable;

/// Represents a keyframe in an animation: one known value of an attribute at a given point of the
/// animation progress.
///
/// The `percentage` is the animation progress (from 0.0, beginning, to 1.0, end) at which the
/// attribute is expected to hold `value`. In between keyframes, the value is interpolated by the
/// [`AnimatableAttributeHelper`] of the attribute, following the animation [`Easing`].
///
/// # Example
/// ```
/// use keyframe_animator::animations::Keyframe;
/// use keyframe_animator::utils::Point;
///
/// let keyframes = vec![
///     Keyframe::new(0.0, Point::new(0.0, 0.0)),
///     Keyframe::new(0.5, Point::new(3.0, 3.0)),
///     Keyframe::new(1.0, Point::new(10.0, 10.0)),
/// ];
/// assert!(keyframe_animator::animations::validate(&keyframes).is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe<T> {
    /// The animation progress (expected within [0, 1]) this keyframe stands for.
    pub percentage: f32,
    /// The attribute value at that progress.
    pub value: T,
}

impl<T> Keyframe<T> {
    pub fn new(percentage: f32, value: T) -> Self {
        Self { percentage, value }
    }
}

impl<T> From<(f32, T)> for Keyframe<T> {
    fn from((percentage, value): (f32, T)) -> Self {
        Self::new(percentage, value)
    }
}

impl<T: Display> Display for Keyframe<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Keyframe {}%: {}", self.percentage * 100.0, self.value)
    }
}

/// Checks that a keyframe list is usable as is: not empty, every percentage within [0, 1] and in
/// non-decreasing order.
///
/// Animations do not require this to hold (they sort their keyframes and extrapolate outside of
/// them); this is meant for callers who want malformed keyframes reported rather than tolerated.
pub fn validate<T>(keyframes: &[Keyframe<T>]) -> Result<(), Error> {
    if keyframes.is_empty() {
        return EmptyKeyframesSnafu.fail();
    }
    let mut previous = 0.0;
    for (index, keyframe) in keyframes.iter().enumerate() {
        let percentage = keyframe.percentage;
        if !(0.0..=1.0).contains(&percentage) {
            return InvalidPercentageSnafu { index, percentage }.fail();
        }
        if percentage < previous {
            return UnorderedKeyframesSnafu { index }.fail();
        }
        previous = percentage;
    }
    Ok(())
}

/// Sorts keyframes by percentage. Keyframes sharing a percentage keep their relative order.
pub(crate) fn sort<T>(keyframes: &mut [Keyframe<T>]) {
    keyframes.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
}

/// The pair of keyframes framing a progress and the local fraction between them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Bracket {
    pub start: usize,
    pub end: usize,
    pub fraction: f32,
}

/// Finds the two keyframes surrounding the given progress.
///
/// Below the first keyframe the first pair is used, above the last one the last pair is used: the
/// fraction then falls outside [0, 1] and the value will be extrapolated from that pair.
/// A single keyframe is its own bracket. Keyframes must be sorted.
pub(crate) fn bracket<T>(keyframes: &[Keyframe<T>], progress: f32) -> Option<Bracket> {
    let last = match keyframes.len() {
        0 => return None,
        1 => {
            return Some(Bracket {
                start: 0,
                end: 0,
                fraction: 0.0,
            })
        }
        len => len - 1,
    };

    let start = if progress <= keyframes[0].percentage {
        0
    } else if progress >= keyframes[last].percentage {
        last - 1
    } else {
        keyframes
            .iter()
            .rposition(|keyframe| keyframe.percentage <= progress)
            .unwrap_or(0)
            .min(last - 1)
    };
    let end = start + 1;
    let fraction = progress.scale(
        keyframes[start].percentage,
        keyframes[end].percentage,
        0.0,
        1.0,
    );

    Some(Bracket {
        start,
        end,
        fraction,
    })
}

/// Computes the attribute value at the given progress: locate the keyframe pair, ease the local
/// fraction, and let the helper interpolate (or extrapolate) between the pair values.
///
/// Returns `None` when there is no keyframe at all.
pub(crate) fn interpolate<T: Clone>(
    keyframes: &[Keyframe<T>],
    progress: f32,
    easing: Easing,
    helper: &dyn AnimatableAttributeHelper<T>,
) -> Option<T> {
    let bracket = bracket(keyframes, progress)?;
    let start = &keyframes[bracket.start].value;
    if bracket.start == bracket.end {
        return Some(start.clone());
    }
    let end = &keyframes[bracket.end].value;
    Some(helper.lerp(start, end, easing.call(bracket.fraction)))
}
