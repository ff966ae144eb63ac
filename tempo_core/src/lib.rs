#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Time dilation control (host-agnostic).
//!
//! All side effects go through the `tempo_traits` collaborators: the record is
//! saved through `SpeedStore`, the multiplier reaches the simulation through
//! `TimeDilation`, and users hear about changes through `Notifier`.
//!
//! ## Architecture
//!
//! - **Validation**: bounds, clamping, rounding, tolerance equality (`validator`)
//! - **State machine**: set / adjust / toggle / reset (`controller`)
//! - **Commands**: text parsing and routing into the controller (`command`)
//! - **Text**: broadcast and reply formatting (`format`)
//!
//! Speeds are `f32` multipliers kept at two decimals; two speeds closer than
//! `FLOAT_TOLERANCE` are the same speed.

pub mod command;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod format;
pub mod mocks;
pub mod validator;

pub use command::{DEFAULT_ADJUSTMENT_DELTA, Reply, SpeedRequest, execute, execute_line};
pub use controller::SpeedController;
pub use error::SpeedError;
pub use tempo_config::{DEFAULT_TOGGLE_SPEED, NORMAL_SPEED, SpeedState};
pub use validator::{
    FLOAT_TOLERANCE, SPEED_ROUNDING_FACTOR, SpeedBounds, clamp, is_valid, round_speed,
    speeds_equal, validation_error,
};

/// Crate version reported at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
