//! Unit conversion utilities
//!
//! Tool paths arrive in the upstream model's base units: millimetres for
//! lengths and millimetres per second for velocities. The controller is
//! programmed either in millimetres and mm/min or in inches and in/min.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Seconds per minute
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl MeasurementSystem {
    /// Speed unit the controller is programmed in for this system
    pub fn feed_rate_units(self) -> FeedRateUnits {
        match self {
            Self::Metric => FeedRateUnits::MmPerMin,
            Self::Imperial => FeedRateUnits::InPerMin,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Feed rate units selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedRateUnits {
    /// Millimeters per minute
    MmPerMin,
    /// Millimeters per second
    MmPerSec,
    /// Inches per minute
    InPerMin,
}

impl fmt::Display for FeedRateUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MmPerMin => write!(f, "mm/min"),
            Self::MmPerSec => write!(f, "mm/sec"),
            Self::InPerMin => write!(f, "in/min"),
        }
    }
}

/// Convert a length in millimetres into the given system
pub fn length_from_mm(value_mm: f64, system: MeasurementSystem) -> f64 {
    match system {
        MeasurementSystem::Metric => value_mm,
        MeasurementSystem::Imperial => value_mm / MM_PER_INCH,
    }
}

/// Convert a velocity in mm/s into the given feed rate units
pub fn velocity_from_mm_per_sec(value: f64, units: FeedRateUnits) -> f64 {
    match units {
        FeedRateUnits::MmPerSec => value,
        FeedRateUnits::MmPerMin => value * SECONDS_PER_MINUTE,
        FeedRateUnits::InPerMin => value * SECONDS_PER_MINUTE / MM_PER_INCH,
    }
}

/// Convert a velocity in the given feed rate units into mm/s
pub fn velocity_to_mm_per_sec(value: f64, units: FeedRateUnits) -> f64 {
    match units {
        FeedRateUnits::MmPerSec => value,
        FeedRateUnits::MmPerMin => value / SECONDS_PER_MINUTE,
        FeedRateUnits::InPerMin => value * MM_PER_INCH / SECONDS_PER_MINUTE,
    }
}
