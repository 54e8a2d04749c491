//! Declarative attribute surface
//!
//! Markup hands a view a flat set of named attributes. Each attribute maps to
//! one [`Config`] field; absent attributes take the documented defaults.
//! Attribute sets are usually read from a TOML table:
//!
//! ```rust
//! use rainfall_view::{AttributeSet, Config, Direction};
//!
//! let attrs = AttributeSet::from_toml_str(r#"
//!     direction = 1
//!     duration = 3000
//!     simulateWind = true
//!     drawableId = 12
//! "#).unwrap();
//!
//! let config = Config::from_attributes(&attrs).unwrap();
//! assert_eq!(config.direction, Direction::BottomToTop);
//! assert_eq!(config.duration_ms, 3000);
//! assert!(config.simulate_wind);
//! ```

use crate::config::{
    AlphaConfig, Config, Direction, DrawableConfig, DrawableId, DEFAULT_ALPHA_DELAY_MS,
    DEFAULT_ALPHA_FROM, DEFAULT_ALPHA_TO, DEFAULT_DRAWABLE_SIZE, DEFAULT_DURATION_MS,
    DEFAULT_SPAWN_DELAY_MS,
};
use crate::error::{ConfigError, Result};
use rainfall_animation::Easing;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Attribute names understood by [`Config::from_attributes`]
pub mod names {
    pub const DIRECTION: &str = "direction";
    pub const DURATION: &str = "duration";
    pub const SPAWN_DELAY: &str = "spawnDelay";
    pub const SIMULATE_3D: &str = "simulate3D";
    pub const SIMULATE_WIND: &str = "simulateWind";
    pub const SIMULATE_WIGGLE: &str = "simulateWiggle";
    pub const INTERPOLATOR: &str = "interpolator";
    pub const DRAWABLE_ID: &str = "drawableId";
    pub const DRAWABLE_HEIGHT: &str = "drawableHeight";
    pub const DRAWABLE_WIDTH: &str = "drawableWidth";
    pub const ALPHA_ANIMATION: &str = "alphaAnimation";
    pub const ALPHA_FROM: &str = "alphaFromAnimation";
    pub const ALPHA_TO: &str = "alphaToAnimation";
    pub const ALPHA_DURATION: &str = "alphaDurationAnimation";
    pub const ALPHA_DELAY: &str = "alphaDelayAnimation";

    pub const ALL: [&str; 15] = [
        DIRECTION,
        DURATION,
        SPAWN_DELAY,
        SIMULATE_3D,
        SIMULATE_WIND,
        SIMULATE_WIGGLE,
        INTERPOLATOR,
        DRAWABLE_ID,
        DRAWABLE_HEIGHT,
        DRAWABLE_WIDTH,
        ALPHA_ANIMATION,
        ALPHA_FROM,
        ALPHA_TO,
        ALPHA_DURATION,
        ALPHA_DELAY,
    ];
}

/// A single attribute value
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Float(value as f64)
    }
}

/// Named attribute values from the markup layer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    values: FxHashMap<String, AttrValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat TOML table of attributes
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let values: FxHashMap<String, AttrValue> =
            toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self { values })
    }

    /// Set an attribute (builder pattern)
    pub fn set(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<AttrValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<AttrValue> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn bool(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            None => Ok(default),
            Some(AttrValue::Bool(value)) => Ok(value),
            Some(_) => Err(type_mismatch(name, "a boolean")),
        }
    }

    fn integer(&self, name: &str) -> Result<Option<i64>> {
        match self.get(name) {
            None => Ok(None),
            Some(AttrValue::Int(value)) => Ok(Some(value)),
            Some(_) => Err(type_mismatch(name, "an integer")),
        }
    }

    fn float(&self, name: &str, default: f32) -> Result<f32> {
        match self.get(name) {
            None => Ok(default),
            Some(AttrValue::Float(value)) => Ok(value as f32),
            Some(AttrValue::Int(value)) => Ok(value as f32),
            Some(AttrValue::Bool(_)) => Err(type_mismatch(name, "a number")),
        }
    }

    /// Non-negative millisecond value; fractional values are truncated
    fn millis(&self, name: &str, default: u64) -> Result<u64> {
        match self.get(name) {
            None => Ok(default),
            Some(AttrValue::Int(value)) => u64::try_from(value)
                .map_err(|_| out_of_range(name, "must not be negative")),
            Some(AttrValue::Float(value)) if value.is_finite() && value >= 0.0 => {
                Ok(value as u64)
            }
            Some(AttrValue::Float(_)) => Err(out_of_range(name, "must not be negative")),
            Some(AttrValue::Bool(_)) => Err(type_mismatch(name, "a number")),
        }
    }

    fn dimension(&self, name: &str, default: u32) -> Result<u32> {
        match self.integer(name)? {
            None => Ok(default),
            Some(value) => {
                u32::try_from(value).map_err(|_| out_of_range(name, "must not be negative"))
            }
        }
    }
}

fn type_mismatch(name: &str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch {
        name: name.to_string(),
        expected,
    }
}

fn out_of_range(name: &str, reason: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        name: name.to_string(),
        reason,
    }
}

impl Config {
    /// Build a configuration from declarative attributes
    ///
    /// Fails fast on enum codes that name nothing and on values of the wrong
    /// kind. A missing `drawableId` selects [`DrawableId::FALLBACK`].
    pub fn from_attributes(attrs: &AttributeSet) -> Result<Config> {
        for name in attrs.values.keys() {
            if !names::ALL.contains(&name.as_str()) {
                tracing::warn!("Ignoring unknown rain view attribute `{}`", name);
            }
        }

        let direction = match attrs.integer(names::DIRECTION)? {
            None => Direction::default(),
            Some(code) => {
                Direction::from_code(code).ok_or(ConfigError::UndefinedDirection(code))?
            }
        };

        let interpolator = match attrs.integer(names::INTERPOLATOR)? {
            None => Easing::Linear,
            Some(code) => {
                Easing::from_code(code).ok_or(ConfigError::UndefinedInterpolator(code))?
            }
        };

        let duration_ms = attrs.millis(names::DURATION, DEFAULT_DURATION_MS)?;
        if duration_ms == 0 {
            return Err(out_of_range(names::DURATION, "must be positive"));
        }

        let drawable_id = match attrs.integer(names::DRAWABLE_ID)? {
            None => DrawableId::FALLBACK,
            Some(raw) => DrawableId(
                u32::try_from(raw)
                    .map_err(|_| out_of_range(names::DRAWABLE_ID, "not a resource handle"))?,
            ),
        };

        let config = Config {
            direction,
            duration_ms,
            spawn_delay_ms: attrs.millis(names::SPAWN_DELAY, DEFAULT_SPAWN_DELAY_MS)?,
            simulate_3d: attrs.bool(names::SIMULATE_3D, false)?,
            simulate_wind: attrs.bool(names::SIMULATE_WIND, false)?,
            simulate_wiggle: attrs.bool(names::SIMULATE_WIGGLE, false)?,
            interpolator: Some(interpolator),
            drawable: DrawableConfig {
                drawable: Some(drawable_id),
                height: attrs.dimension(names::DRAWABLE_HEIGHT, DEFAULT_DRAWABLE_SIZE)?,
                width: attrs.dimension(names::DRAWABLE_WIDTH, DEFAULT_DRAWABLE_SIZE)?,
            },
            alpha: AlphaConfig {
                enabled: attrs.bool(names::ALPHA_ANIMATION, false)?,
                from: attrs.float(names::ALPHA_FROM, DEFAULT_ALPHA_FROM)?,
                to: attrs.float(names::ALPHA_TO, DEFAULT_ALPHA_TO)?,
                duration_ms: attrs.millis(names::ALPHA_DURATION, DEFAULT_DURATION_MS)?,
                delay_ms: attrs.millis(names::ALPHA_DELAY, DEFAULT_ALPHA_DELAY_MS)?,
            },
        };

        tracing::debug!("RainView: configuration from {} attributes", attrs.len());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_attributes_use_defaults() {
        let config = Config::from_attributes(&AttributeSet::new()).unwrap();

        assert_eq!(config.direction, Direction::TopToBottom);
        assert_eq!(config.duration_ms, 5000);
        assert_eq!(config.spawn_delay_ms, 500);
        assert_eq!(config.interpolator, Some(Easing::Linear));
        assert_eq!(config.drawable.drawable, Some(DrawableId::FALLBACK));
        assert_eq!(config.drawable.height, 50);
        assert_eq!(config.drawable.width, 50);
        assert_eq!(config.alpha, AlphaConfig::default());
    }

    #[test]
    fn test_every_attribute_maps_to_a_field() {
        let attrs = AttributeSet::new()
            .set(names::DIRECTION, 1)
            .set(names::DURATION, 4000)
            .set(names::SPAWN_DELAY, 250)
            .set(names::SIMULATE_3D, true)
            .set(names::SIMULATE_WIND, true)
            .set(names::SIMULATE_WIGGLE, true)
            .set(names::INTERPOLATOR, 1)
            .set(names::DRAWABLE_ID, 99)
            .set(names::DRAWABLE_HEIGHT, 30)
            .set(names::DRAWABLE_WIDTH, 20)
            .set(names::ALPHA_ANIMATION, true)
            .set(names::ALPHA_FROM, 0.9)
            .set(names::ALPHA_TO, 0.1)
            .set(names::ALPHA_DURATION, 2000)
            .set(names::ALPHA_DELAY, 300.0);

        let config = Config::from_attributes(&attrs).unwrap();

        assert_eq!(config.direction, Direction::BottomToTop);
        assert_eq!(config.duration_ms, 4000);
        assert_eq!(config.spawn_delay_ms, 250);
        assert!(config.simulate_3d && config.simulate_wind && config.simulate_wiggle);
        assert_eq!(config.interpolator, Some(Easing::EaseOutSlowIn));
        assert_eq!(
            config.drawable,
            DrawableConfig::new(DrawableId(99)).size(30, 20)
        );
        assert!(config.alpha.enabled);
        assert!((config.alpha.from - 0.9).abs() < 1e-6);
        assert!((config.alpha.to - 0.1).abs() < 1e-6);
        assert_eq!(config.alpha.duration_ms, 2000);
        assert_eq!(config.alpha.delay_ms, 300);
    }

    #[test]
    fn test_undefined_interpolator_fails() {
        let attrs = AttributeSet::new().set(names::INTERPOLATOR, 2);
        assert_eq!(
            Config::from_attributes(&attrs),
            Err(ConfigError::UndefinedInterpolator(2))
        );
    }

    #[test]
    fn test_undefined_direction_fails() {
        let attrs = AttributeSet::new().set(names::DIRECTION, 5);
        assert_eq!(
            Config::from_attributes(&attrs),
            Err(ConfigError::UndefinedDirection(5))
        );
    }

    #[test]
    fn test_wrong_value_kind_fails() {
        let attrs = AttributeSet::new().set(names::SIMULATE_WIND, 1);
        assert!(matches!(
            Config::from_attributes(&attrs),
            Err(ConfigError::TypeMismatch { .. })
        ));

        let attrs = AttributeSet::new().set(names::INTERPOLATOR, 1.0);
        assert!(matches!(
            Config::from_attributes(&attrs),
            Err(ConfigError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_out_of_range_values_fail() {
        for attrs in [
            AttributeSet::new().set(names::DURATION, 0),
            AttributeSet::new().set(names::SPAWN_DELAY, -1),
            AttributeSet::new().set(names::DRAWABLE_HEIGHT, -10),
            AttributeSet::new().set(names::ALPHA_DELAY, -5.0),
        ] {
            assert!(matches!(
                Config::from_attributes(&attrs),
                Err(ConfigError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_attribute_is_ignored() {
        let attrs = AttributeSet::new().set("rainbow", true);
        assert!(Config::from_attributes(&attrs).is_ok());
    }

    #[test]
    fn test_from_toml() {
        let attrs = AttributeSet::from_toml_str(
            r#"
            interpolator = 1
            spawnDelay = 100
            alphaAnimation = true
            alphaFromAnimation = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(attrs.len(), 4);
        assert_eq!(attrs.get(names::SPAWN_DELAY), Some(AttrValue::Int(100)));

        let config = Config::from_attributes(&attrs).unwrap();
        assert_eq!(config.spawn_delay_ms, 100);
        assert!(config.alpha.enabled);
        assert!((config.alpha.from - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_toml_fails() {
        assert!(matches!(
            AttributeSet::from_toml_str("direction = "),
            Err(ConfigError::Parse(_))
        ));
        // Strings are not attribute values
        assert!(matches!(
            AttributeSet::from_toml_str("direction = \"down\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
