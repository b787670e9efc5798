//! Length display in the operator's preferred unit.
//!
//! All engine geometry is metric; conversion happens only at display time.
//! Line lengths are shown at [`LINE_PRECISION`] decimal places, everything
//! else at [`GENERAL_PRECISION`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Decimal places used when displaying measured line lengths.
pub const LINE_PRECISION: u32 = 3;

/// Decimal places used for general distance display.
pub const GENERAL_PRECISION: u32 = 2;

const METERS_PER_FOOT: f64 = 0.3048;

/// The operator's display unit preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthPreference {
    MetricMeter,
    CustomaryFoot,
}

impl LengthPreference {
    /// Convert a metric distance into a displayable [`Length`].
    pub fn from_metric(self, meters: f64) -> Length {
        let value = match self {
            LengthPreference::MetricMeter => meters,
            LengthPreference::CustomaryFoot => meters / METERS_PER_FOOT,
        };
        Length { value, unit: self }
    }

    fn suffix(self) -> &'static str {
        match self {
            LengthPreference::MetricMeter => "m",
            LengthPreference::CustomaryFoot => "ft",
        }
    }
}

/// A distance expressed in a display unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthPreference,
}

impl Length {
    /// Round the value to a fixed number of decimal places.
    pub fn rounded_to(self, places: u32) -> Length {
        let scale = 10f64.powi(places as i32);
        Length {
            value: (self.value * scale).round() / scale,
            unit: self.unit,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.suffix())
    }
}
