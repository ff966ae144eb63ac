#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Persisted speed record and its load-time repair rules.
//!
//! - `SpeedState` is (de)serialized from a flat TOML table with the keys
//!   `MinSpeed`, `MaxSpeed`, `CurrentSpeed` and `ToggleTargetSpeed`.
//! - `SpeedState::repair` heals out-of-range values in place and reports each
//!   correction so the caller can log it and persist the record once.
use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{load_state_file, save_state_file, write_atomic};

/// Smallest speed a freshly created record accepts.
pub const DEFAULT_MIN_SPEED: f32 = 0.01;
/// Largest speed a freshly created record accepts.
pub const DEFAULT_MAX_SPEED: f32 = 10.0;
/// Hard ceiling for `MaxSpeed`; anything above is treated as corrupt.
pub const ABSOLUTE_MAX_SPEED: f32 = 100.0;
/// Normal (undilated) simulation speed.
pub const NORMAL_SPEED: f32 = 1.0;
/// Toggle target used when no custom speed has been chosen yet.
pub const DEFAULT_TOGGLE_SPEED: f32 = 0.5;

/// The persisted time dilation record.
///
/// Example:
/// MinSpeed = 0.01
/// MaxSpeed = 10.0
/// CurrentSpeed = 1.0
/// ToggleTargetSpeed = 0.5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedState {
    #[serde(rename = "MinSpeed")]
    pub min_speed: f32,
    #[serde(rename = "MaxSpeed")]
    pub max_speed: f32,
    /// The speed currently applied to the simulation
    #[serde(rename = "CurrentSpeed")]
    pub current_speed: f32,
    /// The speed `toggle` switches to when running at normal speed
    #[serde(rename = "ToggleTargetSpeed")]
    pub toggle_target_speed: f32,
}

impl Default for SpeedState {
    fn default() -> Self {
        Self {
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            current_speed: NORMAL_SPEED,
            toggle_target_speed: DEFAULT_TOGGLE_SPEED,
        }
    }
}

/// A single field reset performed by `SpeedState::repair`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    MinSpeed { was: f32, now: f32 },
    MaxSpeed { was: f32, now: f32 },
    CurrentSpeed { was: f32, now: f32 },
    ToggleTargetSpeed { was: f32, now: f32 },
}

impl Correction {
    /// Persisted key of the corrected field.
    pub fn key(&self) -> &'static str {
        match self {
            Correction::MinSpeed { .. } => "MinSpeed",
            Correction::MaxSpeed { .. } => "MaxSpeed",
            Correction::CurrentSpeed { .. } => "CurrentSpeed",
            Correction::ToggleTargetSpeed { .. } => "ToggleTargetSpeed",
        }
    }

    /// (rejected, replacement)
    pub fn values(&self) -> (f32, f32) {
        match *self {
            Correction::MinSpeed { was, now }
            | Correction::MaxSpeed { was, now }
            | Correction::CurrentSpeed { was, now }
            | Correction::ToggleTargetSpeed { was, now } => (was, now),
        }
    }
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (was, now) = self.values();
        write!(f, "invalid {} ({was:?}), resetting to {now:?}", self.key())
    }
}

impl SpeedState {
    /// Heal the record in place.
    ///
    /// Checks run in order (min, max, current, toggle target) and each later
    /// check sees the already-corrected earlier fields. Non-finite values are
    /// always treated as out of range. Speeds reset to normal / default toggle
    /// speed, pulled into the bounds when a custom range excludes them.
    /// Returns every correction applied; an empty list means the record was
    /// already valid.
    pub fn repair(&mut self) -> Vec<Correction> {
        let mut out = Vec::new();

        if !self.min_speed.is_finite()
            || self.min_speed <= 0.0
            || self.min_speed > self.max_speed
        {
            out.push(Correction::MinSpeed {
                was: self.min_speed,
                now: DEFAULT_MIN_SPEED,
            });
            self.min_speed = DEFAULT_MIN_SPEED;
        }

        if !self.max_speed.is_finite()
            || self.max_speed <= self.min_speed
            || self.max_speed > ABSOLUTE_MAX_SPEED
        {
            out.push(Correction::MaxSpeed {
                was: self.max_speed,
                now: DEFAULT_MAX_SPEED,
            });
            self.max_speed = DEFAULT_MAX_SPEED;
        }

        // A max reset can undercut a large min that passed its own check.
        if self.min_speed >= self.max_speed {
            out.push(Correction::MinSpeed {
                was: self.min_speed,
                now: DEFAULT_MIN_SPEED,
            });
            self.min_speed = DEFAULT_MIN_SPEED;
        }

        if !self.in_bounds(self.current_speed) {
            let now = self.fit(NORMAL_SPEED);
            out.push(Correction::CurrentSpeed {
                was: self.current_speed,
                now,
            });
            self.current_speed = now;
        }

        if !self.in_bounds(self.toggle_target_speed) {
            let now = self.fit(DEFAULT_TOGGLE_SPEED);
            out.push(Correction::ToggleTargetSpeed {
                was: self.toggle_target_speed,
                now,
            });
            self.toggle_target_speed = now;
        }

        out
    }

    fn in_bounds(&self, v: f32) -> bool {
        v >= self.min_speed && v <= self.max_speed
    }

    /// Reset values only leave the default range when the record narrowed it.
    fn fit(&self, v: f32) -> f32 {
        v.max(self.min_speed).min(self.max_speed)
    }
}

pub fn load_toml(s: &str) -> Result<SpeedState, toml::de::Error> {
    toml::from_str::<SpeedState>(s)
}

pub fn to_toml(state: &SpeedState) -> Result<String, toml::ser::Error> {
    toml::to_string(state)
}
