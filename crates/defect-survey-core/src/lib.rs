//! Core types for the defect survey engine.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on the survey graph or the storage codec; it only provides the
//! leaf types they share: world-space poses, screen-space points and
//! rectangles, and length/unit display.

mod length;
mod logger;
mod pose;
mod screen;

pub use length::{Length, LengthPreference, GENERAL_PRECISION, LINE_PRECISION};
pub use pose::Pose;
pub use screen::{ScreenPoint, ScreenRect};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
