//! Bounds checks, clamping, rounding and tolerance equality for speed values.
//!
//! Everything here is pure; the only input besides the value is the
//! `SpeedBounds` the caller derived from the current record.

use crate::format::fmt_speed;

/// Absolute tolerance for speed equality. Speeds are small bounded values, so
/// a relative tolerance buys nothing.
pub const FLOAT_TOLERANCE: f32 = 0.001;
/// Speeds are kept at two decimal places.
pub const SPEED_DECIMAL_PLACES: u32 = 2;
/// `10^SPEED_DECIMAL_PLACES`, kept literal so boundary behavior is exact.
pub const SPEED_ROUNDING_FACTOR: f32 = 100.0;

/// Inclusive speed range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBounds {
    pub min: f32,
    pub max: f32,
}

impl SpeedBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self, value: f32) -> bool {
        is_valid(value, *self)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        clamp(value, *self)
    }

    pub fn validation_error(&self, value: f32) -> String {
        validation_error(value, *self)
    }
}

/// `true` iff `min <= value <= max`. NaN is never valid.
#[inline]
pub fn is_valid(value: f32, bounds: SpeedBounds) -> bool {
    value >= bounds.min && value <= bounds.max
}

/// Project `value` into the bounds.
///
/// Unlike `f32::clamp` this never panics on inverted bounds, and NaN passes
/// through untouched so `is_valid` rejects it downstream.
#[inline]
pub fn clamp(value: f32, bounds: SpeedBounds) -> f32 {
    if value > bounds.max {
        bounds.max
    } else if value < bounds.min {
        bounds.min
    } else {
        value
    }
}

/// Round to two decimals to stop drift from repeated delta adjustments.
#[inline]
pub fn round_speed(value: f32) -> f32 {
    (value * SPEED_ROUNDING_FACTOR).round() / SPEED_ROUNDING_FACTOR
}

#[inline]
pub fn speeds_equal(a: f32, b: f32) -> bool {
    (a - b).abs() < FLOAT_TOLERANCE
}

/// User-facing reason why `value` was rejected.
pub fn validation_error(value: f32, bounds: SpeedBounds) -> String {
    if value < bounds.min {
        return format!(
            "Speed multiplier must be at least {}!",
            fmt_speed(bounds.min)
        );
    }
    if value > bounds.max {
        return format!(
            "Speed multiplier must not exceed {}!",
            fmt_speed(bounds.max)
        );
    }
    // In-range values never get here; NaN does.
    format!(
        "Speed multiplier must be between {} and {}!",
        fmt_speed(bounds.min),
        fmt_speed(bounds.max)
    )
}
