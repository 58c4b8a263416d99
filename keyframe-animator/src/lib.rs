#![doc(html_root_url = "https://docs.rs/keyframe-animator/0.1.0")]

//! <h1 align="center">KEYFRAME-ANIMATOR - Keyframe based value animation</h1>
//! <div style="text-align:center;font-style:italic;">Animate any value through keyframes, easings and composites: you bring the clock.</div>
//! <br/>
//!
//! # Features
//!
//! **Keyframe-Animator** interpolates values of any type between keyframes while the host application
//! drives time: there is no runtime and no timer, each frame the host calls `animate()` with the time
//! elapsed since the previous frame, and the computed values are handed back through callbacks.
//!
//! - Animate numbers, [`Point`](utils::Point)s, or any type of yours through an
//!   [`AnimatableAttributeHelper`](animations::AnimatableAttributeHelper)
//! - Shape movements with [`Easing`](animations::Easing) functions
//! - Play, pause, stop, seek and reverse an [`Animation`](animations::Animation)
//! - Play many animations as one with a [`CompositeAnimation`](animations::CompositeAnimation), each
//!   with its own start time, and nest composites
//!
//! # Getting Started
//!
//! - Add the following to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! keyframe-animator = "0.1.0"
//! ```
//!
//! - Create an animation and drive it from your own loop:
//! ```rust
//! use std::sync::Arc;
//!
//! use parking_lot::RwLock;
//! use keyframe_animator::animations::{Animation, Animator, Easing, Keyframe, PointAnimationHelper};
//! use keyframe_animator::utils::Point;
//!
//! // Somewhere to store the animated value.
//! let position = Arc::new(RwLock::new(Point::default()));
//! let target = position.clone();
//!
//! // Slide from (0, 0) to (10, 10) in 2 seconds.
//! let mut slide = Animation::new(
//!     vec![
//!         Keyframe::new(0.0, Point::new(0.0, 0.0)),
//!         Keyframe::new(1.0, Point::new(10.0, 10.0)),
//!     ],
//!     move |value: Point| *target.write() = value,
//!     PointAnimationHelper,
//! )
//! .with_duration(2.0)
//! .with_easing(Easing::Linear);
//!
//! slide.start_animation();
//! slide.animate(1.0);
//! assert_eq!(*position.read(), Point::new(5.0, 5.0));
//! ```
//!
//! # Feature flags
//!
//! - **serde** -- Enables serialize/deserialize capabilities for keyframes, easings and points.
//! - **mocks** -- Provides a mocked animation target (useful for tests mostly).

#[cfg(test)]
extern crate self as keyframe_animator;

pub mod animations;
pub mod errors;
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
pub mod utils;
