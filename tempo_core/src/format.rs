//! Text for broadcasts and command replies.

use crate::validator::SPEED_ROUNDING_FACTOR;

pub const APPLY_FAILED_NOTICE: &str = "Failed to apply game speed! Check server logs.";
pub const PERSIST_FAILED_NOTICE: &str = "Failed to save configuration! Settings may not persist.";

/// Render a speed with at least one fractional digit: `10.0`, `0.5`, `0.01`.
/// Below `1e-4` Rust switches to exponent form (`1e-5`).
#[inline]
pub fn fmt_speed(speed: f32) -> String {
    format!("{speed:?}")
}

/// `0.5` -> `"50%"`
pub fn format_speed_as_percentage(speed: f32) -> String {
    let percent = (speed * SPEED_ROUNDING_FACTOR).round() as i64;
    format!("{percent}%")
}

/// `"<prefix> 0.5x (50%)"`
pub fn format_speed_message(speed: f32, prefix: &str) -> String {
    format!(
        "{prefix} {}x ({})",
        fmt_speed(speed),
        format_speed_as_percentage(speed)
    )
}

/// Broadcast text for a completed change, e.g. `action = "set to"`.
pub fn speed_change_notice(speed: f32, action: &str) -> String {
    format_speed_message(speed, &format!("Game Speed {action}"))
}

pub fn current_speed_reply(speed: f32) -> String {
    format_speed_message(speed, "Current game speed:")
}

pub fn capped_reply(bound: f32) -> String {
    format!("Speed capped at {}x", fmt_speed(bound))
}
