//! Screen-space geometry.
//!
//! Points and rectangles in screen pixels, as delivered by the detection
//! collaborator. Corner ordering follows the detection convention:
//! top-left, top-right, bottom-right, bottom-left.

use serde::{Deserialize, Serialize};

/// A point in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint of the segment `a`–`b`.
    pub fn midpoint(a: ScreenPoint, b: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
}

/// An axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Corners ordered top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [ScreenPoint; 4] {
        [
            ScreenPoint::new(self.x, self.y),
            ScreenPoint::new(self.x + self.width, self.y),
            ScreenPoint::new(self.x + self.width, self.y + self.height),
            ScreenPoint::new(self.x, self.y + self.height),
        ]
    }
}
