//! Rainfall Core Runtime
//!
//! Foundational primitives shared by the Rainfall crates:
//!
//! - **Looper**: a single-threaded, serialized task queue driven by a virtual
//!   millisecond clock, standing in for a host toolkit's UI thread
//! - **Lifecycle**: host screen lifecycle events (resumed, suspended) with
//!   observer registration
//! - **Geometry**: measured layout sizes
//!
//! # Example
//!
//! ```rust
//! use rainfall_core::Looper;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let looper = Looper::new();
//! let fired = Rc::new(Cell::new(false));
//!
//! let flag = fired.clone();
//! looper.post_delayed(500, move || flag.set(true));
//!
//! looper.advance_by(499);
//! assert!(!fired.get());
//! looper.advance_by(1);
//! assert!(fired.get());
//! ```

pub mod geometry;
pub mod lifecycle;
pub mod looper;

pub use geometry::Size;
pub use lifecycle::{Lifecycle, LifecycleEvent, ObserverId};
pub use looper::{Looper, LooperHandle, TaskId};
