//! Rainfall Animation Primitives
//!
//! Property animations that a spawned element carries for its whole lifetime.
//!
//! # Features
//!
//! - **Easing**: linear, Material "fast out, slow in", and arbitrary cubic-bezier curves
//! - **Tweens**: a single property ramp with a start offset and duration
//! - **Sequences**: tweens chained back to back on one property
//! - **Animation Sets**: translate, alpha and rotation channels played together
//!   under one shared easing curve and sampled into a [`Transformation`]

pub mod animation;
pub mod easing;
pub mod values;

pub use animation::{AnimationSet, Property, Sequence, Transformation, Tween};
pub use easing::Easing;
pub use values::Interpolate;
