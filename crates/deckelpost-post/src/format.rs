//! Numeric encoding for the controller
//!
//! Lengths are written as signed fixed-point integers with two implied
//! decimals (`+1000` is 10.00 units). Feeds are unsigned integers truncated
//! toward zero. Spindle speeds are signed integers, the sign encoding the
//! rotation direction.
//!
//! Rounding is half away from zero (`f64::round`): `-0.005 mm` encodes as
//! `-1`, `0.125 mm` as `+13`.

use deckelpost_core::units::{length_from_mm, velocity_from_mm_per_sec};
use deckelpost_core::{FeedRateUnits, MeasurementSystem, TranslateError};

/// Fixed-point scale for lengths
pub const LENGTH_SCALE: f64 = 100.0;

/// Feeds are truncated after snapping to this many units; absorbs the
/// representation error of unit round trips such as in/min -> mm/s -> in/min.
const FEED_SNAP: f64 = 1e-6;

/// Formats physical quantities for one unit family
#[derive(Debug, Clone, Copy)]
pub struct NumericFormatter {
    units: MeasurementSystem,
    feed_units: FeedRateUnits,
}

impl NumericFormatter {
    /// Create a formatter for the given measurement system
    pub fn new(units: MeasurementSystem) -> Self {
        Self {
            units,
            feed_units: units.feed_rate_units(),
        }
    }

    /// Speed unit feeds are written in
    pub fn feed_units(&self) -> FeedRateUnits {
        self.feed_units
    }

    /// Encode a length given in millimetres for parameter `letter`
    ///
    /// Fails with `InvalidLength` for NaN or infinite values.
    pub fn format_length(&self, letter: char, value_mm: f64) -> Result<String, TranslateError> {
        if !value_mm.is_finite() {
            return Err(TranslateError::InvalidLength {
                letter,
                value: value_mm,
            });
        }

        let scaled = length_from_mm(value_mm, self.units) * LENGTH_SCALE;
        Ok(format!("{:+}", scaled.round() as i64))
    }

    /// Encode a feed given in mm/s
    ///
    /// Returns `Ok(None)` when the truncated feed is zero. Fails with
    /// `InvalidFeed` for negative, NaN or infinite values.
    pub fn format_feed(&self, value: f64) -> Result<Option<String>, TranslateError> {
        if !value.is_finite() || value < 0.0 {
            return Err(TranslateError::InvalidFeed { value });
        }

        let speed = velocity_from_mm_per_sec(value, self.feed_units);
        let speed = ((speed / FEED_SNAP).round() * FEED_SNAP).trunc() as i64;

        Ok((speed > 0).then(|| speed.to_string()))
    }

    /// Encode a signed spindle speed
    pub fn format_spindle_speed(&self, value: f64) -> String {
        format!("{:+}", encode_spindle_speed(value))
    }
}

/// Round a spindle speed to its integer encoding
pub fn encode_spindle_speed(value: f64) -> i64 {
    value.round() as i64
}
