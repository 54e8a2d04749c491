//! Rainfall View
//!
//! A decorative container that periodically spawns small image elements and
//! animates them across the screen, simulating rain or falling objects.
//!
//! # Features
//!
//! - **Configuration**: direction, timing, spawn cadence, appearance, easing
//!   and an optional alpha ramp, with documented defaults
//! - **Declarative Attributes**: build a configuration from a flat attribute set
//!   (TOML), failing fast on undefined enum codes
//! - **Animation Composer**: translate plus optional alpha, wind, wiggle and
//!   pseudo-3D depth, all driven by one easing curve
//! - **Spawner**: a self-perpetuating spawn cycle on the UI-thread looper
//! - **Lifecycle**: idempotent start/stop with full cleanup of timers and
//!   live elements, plus automatic binding to host visibility
//!
//! # Example
//!
//! ```rust
//! use rainfall_core::{Lifecycle, LifecycleEvent, Looper, Size};
//! use rainfall_view::{AttributeSet, RainView};
//!
//! let looper = Looper::new();
//! let attrs = AttributeSet::new()
//!     .set("drawableId", 3)
//!     .set("spawnDelay", 250)
//!     .set("simulateWiggle", true);
//!
//! let view = RainView::from_attributes(&looper, &attrs).unwrap();
//! view.set_measured_size(Size::new(360, 640));
//!
//! let lifecycle = Lifecycle::new();
//! let _binding = view.bind_lifecycle(&lifecycle);
//!
//! lifecycle.dispatch(LifecycleEvent::Resumed);
//! looper.advance_by(1000);
//! assert_eq!(view.live_elements(), 4);
//!
//! lifecycle.dispatch(LifecycleEvent::Suspended);
//! assert_eq!(view.live_elements(), 0);
//! ```

pub mod attrs;
pub mod binding;
mod completion;
pub mod composer;
pub mod config;
pub mod container;
pub mod error;
mod spawner;
pub mod view;


pub use attrs::{AttrValue, AttributeSet};
pub use binding::LifecycleBinding;
pub use composer::{compose, ComposedElement};
pub use config::{AlphaConfig, Config, Direction, DrawableConfig, DrawableId};
pub use container::{ElementId, Visibility};
pub use error::{ConfigError, Result};
pub use view::{ElementSnapshot, RainView, SpawnState, StartBehavior, WeakRainView};
