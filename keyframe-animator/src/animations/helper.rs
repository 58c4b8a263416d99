use std::fmt::Debug;

use crate::utils::Point;

/// Interpolation strategy for one type of animated value.
///
/// An animation only knows keyframes and progress: how to compute a value in between two keyframe
/// values is delegated to the helper of that value type. A helper carries no mutable state, so a
/// single helper can be shared by any number of animations.
///
/// `fraction` is the eased progress between `start` (fraction 0.0) and `end` (fraction 1.0). It is
/// NOT clamped: below 0.0 or above 1.0 (progress outside the keyframes, or overshooting easings)
/// the helper must extrapolate the `start -> end` trend instead of clamping or failing.
///
/// # Example
/// ```
/// use keyframe_animator::animations::AnimatableAttributeHelper;
///
/// /// Animates an RGB color.
/// #[derive(Debug)]
/// struct ColorHelper;
///
/// impl AnimatableAttributeHelper<[u8; 3]> for ColorHelper {
///     fn lerp(&self, start: &[u8; 3], end: &[u8; 3], fraction: f32) -> [u8; 3] {
///         let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * fraction).round() as u8;
///         [channel(start[0], end[0]), channel(start[1], end[1]), channel(start[2], end[2])]
///     }
/// }
///
/// assert_eq!(ColorHelper.lerp(&[0, 0, 0], &[200, 100, 50], 0.5), [100, 50, 25]);
/// ```
pub trait AnimatableAttributeHelper<T>: Debug + Send + Sync {
    /// Computes the value at `fraction` of the way from `start` to `end`.
    fn lerp(&self, start: &T, end: &T, fraction: f32) -> T;
}

#[inline]
fn lerp_f32(start: f32, end: f32, fraction: f32) -> f32 {
    start * (1.0 - fraction) + end * fraction
}

/// Helper for plain numbers.
#[derive(Copy, Clone, Debug, Default)]
pub struct NumberAnimationHelper;

impl AnimatableAttributeHelper<f32> for NumberAnimationHelper {
    fn lerp(&self, start: &f32, end: &f32, fraction: f32) -> f32 {
        lerp_f32(*start, *end, fraction)
    }
}

impl AnimatableAttributeHelper<f64> for NumberAnimationHelper {
    fn lerp(&self, start: &f64, end: &f64, fraction: f32) -> f64 {
        let fraction = fraction as f64;
        start * (1.0 - fraction) + end * fraction
    }
}

/// Helper for [`Point`]s: each coordinate is interpolated on its own.
#[derive(Copy, Clone, Debug, Default)]
pub struct PointAnimationHelper;

impl AnimatableAttributeHelper<Point> for PointAnimationHelper {
    fn lerp(&self, start: &Point, end: &Point, fraction: f32) -> Point {
        Point::new(
            lerp_f32(start.x, end.x, fraction),
            lerp_f32(start.y, end.y, fraction),
        )
    }
}

/// Helper for discrete values (booleans, texts, enums...) that cannot be blended.
///
/// The `start` value is held until the fraction reaches 1.0, where it switches to `end`.
/// Extrapolation holds the closest value.
#[derive(Copy, Clone, Debug, Default)]
pub struct StepAnimationHelper;

impl<T: Clone> AnimatableAttributeHelper<T> for StepAnimationHelper {
    fn lerp(&self, start: &T, end: &T, fraction: f32) -> T {
        match fraction >= 1.0 {
            true => end.clone(),
            false => start.clone(),
        }
    }
}
