use std::fmt::{Display, Formatter};
use std::str::FromStr;

use simple_easing::*;

use crate::errors::{Error, UnknownEasingSnafu};

/// Represents the set of easing functions an animation can pick from.
///
/// An easing function is a temporal function that takes a progress between 0 and 1 (beginning / end)
/// and associates to it an eased progress according to an ease curve. Easing functions are pure:
/// the same [`Easing`] can be shared by as many animations as needed.
///
/// Some curves (`Back*`, `Elastic*`) overshoot the [0, 1] range on purpose: the interpolated value
/// then goes slightly beyond its keyframes, which the
/// [`AnimatableAttributeHelper`](crate::animations::AnimatableAttributeHelper) handles as extrapolation.
///
/// See <https://easings.net> for a representation of easing methods.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Applies no transformation (default).
    #[default]
    Linear,
    /// <https://easings.net/#easeInQuad>
    QuadIn,
    /// <https://easings.net/#easeOutQuad>
    QuadOut,
    /// <https://easings.net/#easeInOutQuad>
    QuadInOut,
    /// <https://easings.net/#easeInCubic>
    CubicIn,
    /// <https://easings.net/#easeOutCubic>
    CubicOut,
    /// <https://easings.net/#easeInOutCubic>
    CubicInOut,
    /// <https://easings.net/#easeInSine>
    SineIn,
    /// <https://easings.net/#easeOutSine>
    SineOut,
    /// <https://easings.net/#easeInOutSine>
    SineInOut,
    /// <https://easings.net/#easeInBack>
    BackIn,
    /// <https://easings.net/#easeOutBack>
    BackOut,
    /// <https://easings.net/#easeInOutBack>
    BackInOut,
    /// <https://easings.net/#easeOutElastic>
    ElasticOut,
    /// <https://easings.net/#easeOutBounce>
    BounceOut,
}

impl Easing {
    /// Every available easing function.
    pub const ALL: [Easing; 15] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::ElasticOut,
        Easing::BounceOut,
    ];

    /// Calls the easing function.
    ///
    /// `Linear` is the identity, also outside [0, 1], so that a linear animation extrapolates
    /// its keyframe trend untouched.
    pub fn call(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuadIn => quad_in(t),
            Easing::QuadOut => quad_out(t),
            Easing::QuadInOut => quad_in_out(t),
            Easing::CubicIn => cubic_in(t),
            Easing::CubicOut => cubic_out(t),
            Easing::CubicInOut => cubic_in_out(t),
            Easing::SineIn => sine_in(t),
            Easing::SineOut => sine_out(t),
            Easing::SineInOut => sine_in_out(t),
            Easing::BackIn => back_in(t),
            Easing::BackOut => back_out(t),
            Easing::BackInOut => back_in_out(t),
            Easing::ElasticOut => elastic_out(t),
            Easing::BounceOut => bounce_out(t),
        }
    }

    /// Returns the configuration name of the easing function (see [`FromStr`]).
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::QuadIn => "quad_in",
            Easing::QuadOut => "quad_out",
            Easing::QuadInOut => "quad_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::SineIn => "sine_in",
            Easing::SineOut => "sine_out",
            Easing::SineInOut => "sine_in_out",
            Easing::BackIn => "back_in",
            Easing::BackOut => "back_out",
            Easing::BackInOut => "back_in_out",
            Easing::ElasticOut => "elastic_out",
            Easing::BounceOut => "bounce_out",
        }
    }
}

/// Parses an easing function from its configuration name: `"linear"`, `"cubic_in_out"`, etc.
impl FromStr for Easing {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lookup = name.trim().to_lowercase();
        Easing::ALL
            .into_iter()
            .find(|easing| easing.name() == lookup)
            .ok_or_else(|| UnknownEasingSnafu { name }.build())
    }
}

impl Display for Easing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
