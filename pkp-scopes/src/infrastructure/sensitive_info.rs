//! Helpers for keeping secrets such as access tokens and relay API keys out of
//! logs and terminal output.

/// Label printed in place of sensitive values.
pub const REDACTED_INFO_LABEL: &str = "***REDACTED***";

/// Format an optional secret for `Debug` output without revealing it.
pub fn redact_option<T>(secret: &Option<T>) -> &'static str {
    match secret {
        Some(_) => REDACTED_INFO_LABEL,
        None => "None",
    }
}
