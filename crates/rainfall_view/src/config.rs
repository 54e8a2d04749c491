//! View configuration
//!
//! A [`Config`] describes one animation session: where elements travel, how
//! long they take, how often they spawn, which optional effects they carry and
//! what they look like. A running view captures its configuration as an
//! immutable snapshot; changing it means starting again with a new one.
//!
//! ```rust
//! use rainfall_view::{Config, Direction, DrawableConfig, DrawableId};
//!
//! let config = Config::default()
//!     .direction(Direction::BottomToTop)
//!     .simulate_wind(true)
//!     .drawable(DrawableConfig::new(DrawableId(7)).size(24, 24));
//!
//! // Re-skin without touching timing or effects
//! let reskinned = config.with_drawable(DrawableConfig::new(DrawableId(8)));
//! assert_eq!(reskinned.direction, Direction::BottomToTop);
//! assert!(reskinned.simulate_wind);
//! ```

use rainfall_animation::Easing;

/// Base travel duration (ms)
pub const DEFAULT_DURATION_MS: u64 = 5000;
/// Interval between spawns (ms)
pub const DEFAULT_SPAWN_DELAY_MS: u64 = 500;
/// Drawable height and width (layout units)
pub const DEFAULT_DRAWABLE_SIZE: u32 = 50;
pub const DEFAULT_ALPHA_FROM: f32 = 1.0;
pub const DEFAULT_ALPHA_TO: f32 = 0.0;
pub const DEFAULT_ALPHA_DELAY_MS: u64 = 0;
/// Re-arm interval used when the spawn delay is zero
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Travel direction of spawned elements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    TopToBottom,
    BottomToTop,
}

impl Direction {
    /// Declarative code for [`Direction::TopToBottom`]
    pub const TOP_TO_BOTTOM_CODE: i64 = 0;
    /// Declarative code for [`Direction::BottomToTop`]
    pub const BOTTOM_TO_TOP_CODE: i64 = 1;

    /// Map a declarative direction code to a direction
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::TOP_TO_BOTTOM_CODE => Some(Direction::TopToBottom),
            Self::BOTTOM_TO_TOP_CODE => Some(Direction::BottomToTop),
            _ => None,
        }
    }
}

/// Handle to an image resource owned by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(pub u32);

impl DrawableId {
    /// The built-in raindrop image
    pub const FALLBACK: DrawableId = DrawableId(0);
}

/// Appearance of spawned elements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawableConfig {
    /// Image to show; `None` disables spawning
    pub drawable: Option<DrawableId>,
    pub height: u32,
    pub width: u32,
}

impl DrawableConfig {
    pub fn new(drawable: DrawableId) -> Self {
        Self {
            drawable: Some(drawable),
            ..Self::default()
        }
    }

    /// Set height and width
    pub fn size(mut self, height: u32, width: u32) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Whether elements can be spawned with this appearance
    pub fn is_spawnable(&self) -> bool {
        self.drawable.is_some() && self.height > 0 && self.width > 0
    }
}

impl Default for DrawableConfig {
    fn default() -> Self {
        Self {
            drawable: None,
            height: DEFAULT_DRAWABLE_SIZE,
            width: DEFAULT_DRAWABLE_SIZE,
        }
    }
}

/// Opacity ramp applied alongside the fall
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlphaConfig {
    pub enabled: bool,
    pub from: f32,
    pub to: f32,
    pub duration_ms: u64,
    pub delay_ms: u64,
}

impl AlphaConfig {
    /// An enabled ramp from `from` to `to` with default timing
    pub fn fade(from: f32, to: f32) -> Self {
        Self {
            enabled: true,
            from,
            to,
            ..Self::default()
        }
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

impl Default for AlphaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            from: DEFAULT_ALPHA_FROM,
            to: DEFAULT_ALPHA_TO,
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: DEFAULT_ALPHA_DELAY_MS,
        }
    }
}

/// Configuration for one animation session
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub direction: Direction,
    /// Base travel duration (ms); elements live for 1.25x this
    pub duration_ms: u64,
    /// Interval between spawns (ms)
    pub spawn_delay_ms: u64,
    /// Randomly shrink each element to fake depth
    pub simulate_3d: bool,
    /// Monotonic tilt while falling
    pub simulate_wind: bool,
    /// Back-and-forth rotation while falling
    pub simulate_wiggle: bool,
    /// Easing for the whole composed animation; `None` means linear
    pub interpolator: Option<Easing>,
    pub drawable: DrawableConfig,
    pub alpha: AlphaConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            duration_ms: DEFAULT_DURATION_MS,
            spawn_delay_ms: DEFAULT_SPAWN_DELAY_MS,
            simulate_3d: false,
            simulate_wind: false,
            simulate_wiggle: false,
            interpolator: None,
            drawable: DrawableConfig::default(),
            alpha: AlphaConfig::default(),
        }
    }
}

impl Config {
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn spawn_delay_ms(mut self, spawn_delay_ms: u64) -> Self {
        self.spawn_delay_ms = spawn_delay_ms;
        self
    }

    pub fn simulate_3d(mut self, enabled: bool) -> Self {
        self.simulate_3d = enabled;
        self
    }

    pub fn simulate_wind(mut self, enabled: bool) -> Self {
        self.simulate_wind = enabled;
        self
    }

    pub fn simulate_wiggle(mut self, enabled: bool) -> Self {
        self.simulate_wiggle = enabled;
        self
    }

    pub fn interpolator(mut self, easing: Easing) -> Self {
        self.interpolator = Some(easing);
        self
    }

    pub fn drawable(mut self, drawable: DrawableConfig) -> Self {
        self.drawable = drawable;
        self
    }

    pub fn alpha(mut self, alpha: AlphaConfig) -> Self {
        self.alpha = alpha;
        self
    }

    /// Copy of this configuration with only the appearance replaced
    pub fn with_drawable(&self, drawable: DrawableConfig) -> Self {
        Self {
            drawable,
            ..self.clone()
        }
    }

    /// Easing applied to composed animations
    pub fn easing(&self) -> Easing {
        self.interpolator.unwrap_or_default()
    }

    pub fn has_drawable(&self) -> bool {
        self.drawable.drawable.is_some()
    }

    /// Delay between a spawn cycle and its successor
    ///
    /// A zero spawn delay re-arms on the next frame instead of immediately.
    /// The first cycle after a start is not affected.
    pub fn spawn_interval_ms(&self) -> u64 {
        if self.spawn_delay_ms == 0 {
            FRAME_INTERVAL_MS
        } else {
            self.spawn_delay_ms
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.direction, Direction::TopToBottom);
        assert_eq!(config.duration_ms, 5000);
        assert_eq!(config.spawn_delay_ms, 500);
        assert!(!config.simulate_3d);
        assert!(!config.simulate_wind);
        assert!(!config.simulate_wiggle);
        assert_eq!(config.interpolator, None);
        assert_eq!(config.easing(), Easing::Linear);
        assert_eq!(config.drawable.drawable, None);
        assert_eq!(config.drawable.height, 50);
        assert_eq!(config.drawable.width, 50);

        let alpha = config.alpha;
        assert!(!alpha.enabled);
        assert_eq!(alpha.from, 1.0);
        assert_eq!(alpha.to, 0.0);
        assert_eq!(alpha.duration_ms, 5000);
        assert_eq!(alpha.delay_ms, 0);
    }

    #[test]
    fn test_with_drawable_leaves_other_fields() {
        let config = Config::default()
            .direction(Direction::BottomToTop)
            .duration_ms(3000)
            .spawn_delay_ms(120)
            .simulate_3d(true)
            .simulate_wiggle(true)
            .interpolator(Easing::EaseOutSlowIn)
            .alpha(AlphaConfig::fade(0.8, 0.2).delay_ms(100));

        let drawable = DrawableConfig::new(DrawableId(42)).size(10, 12);
        let reskinned = config.with_drawable(drawable);

        assert_eq!(reskinned.drawable, drawable);
        assert_eq!(
            Config {
                drawable: config.drawable,
                ..reskinned.clone()
            },
            config
        );
    }

    #[test]
    fn test_spawnable_drawable() {
        assert!(!DrawableConfig::default().is_spawnable());
        assert!(DrawableConfig::new(DrawableId(1)).is_spawnable());
        assert!(!DrawableConfig::new(DrawableId(1)).size(0, 10).is_spawnable());
        assert!(!DrawableConfig::new(DrawableId(1)).size(10, 0).is_spawnable());
    }

    #[test]
    fn test_direction_codes() {
        assert_eq!(Direction::from_code(0), Some(Direction::TopToBottom));
        assert_eq!(Direction::from_code(1), Some(Direction::BottomToTop));
        assert_eq!(Direction::from_code(2), None);
    }

    #[test]
    fn test_zero_spawn_delay_uses_frame_interval() {
        assert_eq!(Config::default().spawn_interval_ms(), 500);
        assert_eq!(
            Config::default().spawn_delay_ms(0).spawn_interval_ms(),
            FRAME_INTERVAL_MS
        );
    }
}
