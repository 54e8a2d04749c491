//! Animation composer
//!
//! Turns a configuration snapshot and the container's measured size into the
//! animation for one element. Composition is pure apart from the random source,
//! which the caller passes in.
//!
//! Every enabled effect starts at the same reference time:
//! - translate (always): off-screen on the entry edge to past the exit edge,
//!   over 1.25x the base duration; this alone fixes the element's lifetime
//! - alpha: its own duration and delay
//! - wind: four chained segments, each tilting a further 2-4 degrees
//! - wiggle: four chained segments swinging between +a and -a, a in 2-5 degrees
//!
//! Pseudo-3D is not animated: it shrinks the element once, at spawn time.

use crate::config::{AlphaConfig, Config, Direction, DrawableId};
use rainfall_animation::{AnimationSet, Property, Sequence, Tween};
use rainfall_core::Size;
use rand::Rng;
use std::ops::RangeInclusive;

/// Travel distance and duration multiplier
pub const TRAVEL_FACTOR: f32 = 1.25;
/// Segments in a wind or wiggle rotation
pub const ROTATION_SEGMENTS: usize = 4;
/// Extra tilt added by each wind segment (degrees)
pub const WIND_STEP_DEGREES: RangeInclusive<u32> = 2..=4;
/// Swing amplitude of a wiggle (degrees)
pub const WIGGLE_DEGREES: RangeInclusive<u32> = 2..=5;
/// Size divisors picked for pseudo-3D depth
pub const DEPTH_DIVISORS: RangeInclusive<u32> = 1..=5;

/// Everything needed to add one element to the container
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedElement {
    pub drawable: DrawableId,
    /// Size after the pseudo-3D divisor
    pub size: Size,
    pub scale_divisor: u32,
    /// Fixed horizontal offset from the container's left edge
    pub left_margin: u32,
    pub animation: AnimationSet,
}

/// Compose one element, or `None` when nothing can be spawned
///
/// Nothing is spawned while the container has not been measured, when no
/// drawable is configured, or when the drawable has a zero dimension.
pub fn compose<R>(config: &Config, container: Size, rng: &mut R) -> Option<ComposedElement>
where
    R: Rng + ?Sized,
{
    let drawable = config.drawable.drawable?;
    if !config.drawable.is_spawnable() || container.is_empty() {
        return None;
    }

    let scale_divisor = if config.simulate_3d {
        rng.gen_range(DEPTH_DIVISORS)
    } else {
        1
    };
    let size = Size::new(config.drawable.width, config.drawable.height).scaled_down(scale_divisor);
    let left_margin = rng.gen_range(0..=container.width.saturating_sub(size.width));

    let mut animation = AnimationSet::new(config.easing())
        .tween(Property::TranslateY, translate(config, container.height));
    if config.alpha.enabled {
        animation = animation.tween(Property::Alpha, alpha(&config.alpha));
    }
    if config.simulate_wind {
        animation = animation.sequence(Property::Rotation, wind(config.duration_ms, rng));
    }
    if config.simulate_wiggle {
        animation = animation.sequence(Property::Rotation, wiggle(config.duration_ms, rng));
    }
    let animation = animation.lifetime(travel_duration_ms(config.duration_ms));

    Some(ComposedElement {
        drawable,
        size,
        scale_divisor,
        left_margin,
        animation,
    })
}

/// Lifetime of an element for a base duration
pub fn travel_duration_ms(base_duration_ms: u64) -> u64 {
    (base_duration_ms as f64 * TRAVEL_FACTOR as f64) as u64
}

/// Vertical travel for the configured direction
pub fn translate(config: &Config, container_height: u32) -> Tween {
    let drawable_height = config.drawable.height as f32;
    let top = -drawable_height;
    let bottom = container_height as f32 + drawable_height;

    let (from, to) = match config.direction {
        Direction::TopToBottom => (top, bottom * TRAVEL_FACTOR),
        Direction::BottomToTop => (bottom, top * TRAVEL_FACTOR),
    };

    Tween::new(from, to, travel_duration_ms(config.duration_ms))
}

pub fn alpha(alpha: &AlphaConfig) -> Tween {
    Tween::new(alpha.from, alpha.to, alpha.duration_ms).start_offset(alpha.delay_ms)
}

/// Monotonically increasing tilt
pub fn wind<R>(base_duration_ms: u64, rng: &mut R) -> Sequence
where
    R: Rng + ?Sized,
{
    let mut angle = 0.0;
    let targets: Vec<f32> = (0..ROTATION_SEGMENTS)
        .map(|_| {
            angle += rng.gen_range(WIND_STEP_DEGREES) as f32;
            angle
        })
        .collect();

    Sequence::chained(segment_duration_ms(base_duration_ms), targets)
}

/// Oscillating rotation: even segments pick a fresh angle, odd ones mirror it
pub fn wiggle<R>(base_duration_ms: u64, rng: &mut R) -> Sequence
where
    R: Rng + ?Sized,
{
    let mut angle = 0.0;
    let targets: Vec<f32> = (0..ROTATION_SEGMENTS)
        .map(|index| {
            angle = if index % 2 == 0 {
                rng.gen_range(WIGGLE_DEGREES) as f32
            } else {
                -angle
            };
            angle
        })
        .collect();

    Sequence::chained(segment_duration_ms(base_duration_ms), targets)
}

fn segment_duration_ms(base_duration_ms: u64) -> u64 {
    base_duration_ms / ROTATION_SEGMENTS as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AlphaConfig, DrawableConfig};
    use rainfall_animation::Easing;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn config() -> Config {
        Config::default().drawable(DrawableConfig::new(DrawableId(1)).size(40, 30))
    }

    fn only_tween(set: &AnimationSet, property: Property) -> Tween {
        let tweens: Vec<&Tween> = set.tweens(property).collect();
        assert_eq!(tweens.len(), 1);
        *tweens[0]
    }

    #[test]
    fn test_top_to_bottom_translate() {
        let tween = translate(&config(), 800);
        assert_eq!(tween.from, -40.0);
        assert_eq!(tween.to, (800.0 + 40.0) * 1.25);
        assert_eq!(tween.duration_ms, 6250);
        assert_eq!(tween.start_offset_ms, 0);
    }

    #[test]
    fn test_bottom_to_top_translate() {
        let tween = translate(&config().direction(Direction::BottomToTop), 800);
        assert_eq!(tween.from, 840.0);
        assert_eq!(tween.to, -40.0 * 1.25);
        assert_eq!(tween.duration_ms, 6250);
    }

    #[test]
    fn test_plain_composition() {
        let element = compose(&config(), Size::new(400, 800), &mut rng()).unwrap();

        assert_eq!(element.drawable, DrawableId(1));
        assert_eq!(element.scale_divisor, 1);
        assert_eq!(element.size, Size::new(30, 40));
        assert!(element.left_margin <= 400 - 30);
        assert_eq!(element.animation.child_count(), 1);
        assert_eq!(element.animation.duration_ms(), 6250);
        assert_eq!(element.animation.easing(), Easing::Linear);
    }

    #[test]
    fn test_no_op_without_drawable() {
        let config = Config::default();
        assert!(compose(&config, Size::new(400, 800), &mut rng()).is_none());
    }

    #[test]
    fn test_no_op_before_layout() {
        assert!(compose(&config(), Size::ZERO, &mut rng()).is_none());
        assert!(compose(&config(), Size::new(400, 0), &mut rng()).is_none());
    }

    #[test]
    fn test_no_op_with_zero_sized_drawable() {
        let config = config().drawable(DrawableConfig::new(DrawableId(1)).size(0, 30));
        assert!(compose(&config, Size::new(400, 800), &mut rng()).is_none());
    }

    #[test]
    fn test_alpha_effect() {
        let config = config().alpha(AlphaConfig::fade(0.9, 0.2).duration_ms(1000).delay_ms(300));
        let element = compose(&config, Size::new(400, 800), &mut rng()).unwrap();

        let tween = only_tween(&element.animation, Property::Alpha);
        assert_eq!(tween.from, 0.9);
        assert_eq!(tween.to, 0.2);
        assert_eq!(tween.duration_ms, 1000);
        assert_eq!(tween.start_offset_ms, 300);
    }

    #[test]
    fn test_alpha_does_not_extend_lifetime() {
        let config = config().alpha(AlphaConfig::fade(1.0, 0.0).duration_ms(20_000));
        let element = compose(&config, Size::new(400, 800), &mut rng()).unwrap();
        assert_eq!(element.animation.duration_ms(), 6250);
    }

    #[test]
    fn test_wind_segments() {
        let mut rng = rng();
        for _ in 0..50 {
            let sequence = wind(5000, &mut rng);
            let offsets: Vec<u64> = sequence
                .segments()
                .iter()
                .map(|s| s.start_offset_ms)
                .collect();
            assert_eq!(offsets, vec![0, 1250, 2500, 3750]);
            assert!(sequence.segments().iter().all(|s| s.duration_ms == 1250));

            let mut previous = 0.0;
            for target in sequence.targets() {
                let step = target - previous;
                assert!((2.0..=4.0).contains(&step), "step {step}");
                previous = target;
            }
        }
    }

    #[test]
    fn test_wiggle_alternates_sign() {
        let mut rng = rng();
        for _ in 0..50 {
            let sequence = wiggle(5000, &mut rng);
            let targets: Vec<f32> = sequence.targets().collect();
            assert_eq!(targets.len(), 4);
            for (index, target) in targets.iter().enumerate() {
                if index % 2 == 0 {
                    assert!((2.0..=5.0).contains(target));
                } else {
                    assert_eq!(*target, -targets[index - 1]);
                }
            }
            let offsets: Vec<u64> = sequence
                .segments()
                .iter()
                .map(|s| s.start_offset_ms)
                .collect();
            assert_eq!(offsets, vec![0, 1250, 2500, 3750]);
        }
    }

    #[test]
    fn test_wind_and_wiggle_stack() {
        let config = config().simulate_wind(true).simulate_wiggle(true);
        let element = compose(&config, Size::new(400, 800), &mut rng()).unwrap();

        assert_eq!(element.animation.sequences(Property::Rotation).count(), 2);
        assert_eq!(element.animation.child_count(), 3);
    }

    #[test]
    fn test_depth_divides_both_dimensions() {
        let config = config()
            .simulate_3d(true)
            .drawable(DrawableConfig::new(DrawableId(1)).size(60, 60));
        let mut rng = rng();
        let mut seen = std::collections::BTreeSet::new();

        for _ in 0..200 {
            let element = compose(&config, Size::new(400, 800), &mut rng).unwrap();
            assert!(DEPTH_DIVISORS.contains(&element.scale_divisor));
            assert_eq!(element.size, Size::new(60, 60).scaled_down(element.scale_divisor));
            seen.insert(element.scale_divisor);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_depth_never_produces_empty_elements() {
        let config = config()
            .simulate_3d(true)
            .drawable(DrawableConfig::new(DrawableId(1)).size(2, 2));
        let mut rng = rng();

        for _ in 0..50 {
            let element = compose(&config, Size::new(400, 800), &mut rng).unwrap();
            assert!(!element.size.is_empty());
            assert!(element.size.width >= 1 && element.size.height >= 1);
        }
    }

    #[test]
    fn test_left_margin_stays_inside_container() {
        let mut rng = rng();
        for _ in 0..200 {
            let element = compose(&config(), Size::new(100, 800), &mut rng).unwrap();
            assert!(element.left_margin <= 100 - element.size.width);
        }
    }

    #[test]
    fn test_element_wider_than_container_pins_left() {
        let element = compose(&config(), Size::new(10, 800), &mut rng()).unwrap();
        assert_eq!(element.left_margin, 0);
    }

    #[test]
    fn test_interpolator_is_shared() {
        let config = config().interpolator(Easing::EaseOutSlowIn);
        let element = compose(&config, Size::new(400, 800), &mut rng()).unwrap();
        assert_eq!(element.animation.easing(), Easing::EaseOutSlowIn);
    }
}
