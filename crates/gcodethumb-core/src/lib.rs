//! # gcodethumb Core
//!
//! Core types shared by the thumbnail workspace.
//! Provides model-space points and bounding boxes, measurement units,
//! and the error taxonomy used by the G-code geometry extractor.

pub mod error;
pub mod types;
pub mod units;

pub use error::{Error, GcodeError, Result};
pub use types::{BoundingBox, Bounds, Point};
pub use units::Units;
