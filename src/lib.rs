//! Frame-driven multi-touch gesture classification.
//!
//! A host feeds raw contact samples (identity, phase, position, delta,
//! delta time) into the engine once per frame; the engine classifies
//! every contact as tap, long-press, drag or swipe, and derives the
//! two-contact aggregates (pinch distance/ratio with per-frame deltas,
//! two-finger swipe direction) on top. What a gesture *does* to the
//! world stays with the caller; the engine only decides which gesture
//! is occurring.
//!
//! ```
//! use gesture_engine::{GestureConfig, GestureEngine, Point, TouchPhase, TouchSample};
//!
//! let mut engine = GestureEngine::new(GestureConfig::default());
//! let samples = [TouchSample {
//!     id: 0,
//!     phase: TouchPhase::Began,
//!     position: Point::new(120.0, 80.0),
//!     delta: Point::new(0.0, 0.0),
//!     delta_time: 0.0,
//! }];
//! engine.update(&samples, 1.0 / 60.0);
//! assert_eq!(engine.touches().len(), 1);
//! assert_eq!(engine.touch(0).unwrap().tap_count(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod pinch;
pub mod registry;
pub mod touch;
pub mod types;
pub mod units;

pub use config::GestureConfig;
pub use engine::GestureEngine;
pub use pinch::{Pinch, PinchPhase, INACTIVE_PINCH_ORIGIN};
pub use registry::{TouchRegistry, MAX_TRACKED_TOUCHES};
pub use touch::TouchState;
pub use types::{Point, SwipeDirection, TouchAction, TouchPhase, TouchSample};
pub use units::{UnitConverter, UnitKind, FALLBACK_DPI};
