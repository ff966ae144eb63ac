//! Human-readable error descriptions and structured JSON error formatting.

use tempo_core::SpeedError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    let msg = err.to_string();

    if let Some(se) = err.downcast_ref::<SpeedError>() {
        return match se {
            SpeedError::InvalidSpeed(_) => format!(
                "What happened: {msg}\nHow to fix: Pick a multiplier between MinSpeed and MaxSpeed of the speed record (see `tempo show`)."
            ),
            SpeedError::Apply { .. } => format!(
                "What happened: {msg}.\nLikely causes: The simulation runtime refused the new time dilation.\nHow to fix: Check the runtime logs. The new speed is already saved and will be applied again on the next start."
            ),
            SpeedError::AdjustFailed { .. } => format!(
                "What happened: {msg}.\nLikely causes: The simulation runtime refused the adjusted speed.\nHow to fix: Check the runtime logs, then retry or use `tempo reset`."
            ),
            SpeedError::Persist(_) => format!(
                "What happened: {msg}.\nLikely causes: The speed record path is not writable.\nHow to fix: Check permissions on the --config path. Settings may not persist until fixed."
            ),
            SpeedError::Load(_) => format!(
                "What happened: {msg}.\nLikely causes: The speed record is not valid TOML or cannot be read.\nHow to fix: Fix or delete the file at --config; defaults are used when it is missing."
            ),
            SpeedError::Usage(_) => msg,
        };
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

pub fn error_kind_name(e: &SpeedError) -> &'static str {
    match e {
        SpeedError::InvalidSpeed(_) => "InvalidSpeed",
        SpeedError::Apply { .. } => "ApplyError",
        SpeedError::Persist(_) => "PersistError",
        SpeedError::AdjustFailed { .. } => "AdjustFailed",
        SpeedError::Load(_) => "LoadError",
        SpeedError::Usage(_) => "Usage",
    }
}

/// Stable exit codes per error kind; anything untyped returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> u8 {
    match err.downcast_ref::<SpeedError>() {
        Some(SpeedError::Usage(_)) => 2,
        Some(SpeedError::InvalidSpeed(_)) => 3,
        Some(SpeedError::Apply { .. }) => 4,
        Some(SpeedError::AdjustFailed { .. }) => 5,
        _ => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let msg = humanize(err);
    let Some(se) = err.downcast_ref::<SpeedError>() else {
        return json!({ "reason": "Error", "message": msg }).to_string();
    };

    let details = match se {
        SpeedError::Apply { speed, .. } => Some(json!({ "speed": speed })),
        SpeedError::AdjustFailed { from, to, reason } => {
            Some(json!({ "from": from, "to": to, "cause": reason }))
        }
        _ => None,
    };

    let reason = error_kind_name(se);
    match details {
        Some(d) => json!({ "reason": reason, "details": d, "message": msg }),
        None => json!({ "reason": reason, "message": msg }),
    }
    .to_string()
}
