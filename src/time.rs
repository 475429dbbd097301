//! Compact duration strings such as `"2d 3h 15m"` <-> whole minutes.
//!
//! Tokens are whitespace separated; each one is an integer followed by a unit
//! letter (`d` = 1440, `h` = 60, `m` = 1 minute). Formatting emits only the
//! non-zero components in descending order, so `"90m"` parses to `90` but
//! formats back as `"1h 30m"`.

use thiserror::Error;

pub const MINUTES_PER_DAY: u64 = 1440;
pub const MINUTES_PER_HOUR: u64 = 60;

/// Why a duration string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("unrecognized duration unit {unit:?} in token {token:?} (expected d, h or m)")]
    UnknownUnit { token: String, unit: char },
    #[error("non-numeric magnitude in duration token {token:?}")]
    InvalidMagnitude { token: String },
}

fn unit_minutes(unit: char) -> Option<u64> {
    match unit {
        'd' => Some(MINUTES_PER_DAY),
        'h' => Some(MINUTES_PER_HOUR),
        'm' => Some(1),
        _ => None,
    }
}

/// Parse a duration string into minutes. Blank input is zero minutes.
pub fn parse_duration(text: &str) -> Result<u64, DurationError> {
    let mut total: u64 = 0;
    for token in text.split_whitespace() {
        // split_whitespace never yields empty tokens
        let Some(unit) = token.chars().last() else {
            continue;
        };
        let factor = unit_minutes(unit).ok_or_else(|| DurationError::UnknownUnit {
            token: token.to_string(),
            unit,
        })?;
        let digits = &token[..token.len() - unit.len_utf8()];
        let magnitude = digits
            .parse::<u64>()
            .map_err(|_| DurationError::InvalidMagnitude {
                token: token.to_string(),
            })?;
        total = magnitude
            .checked_mul(factor)
            .and_then(|m| total.checked_add(m))
            .ok_or_else(|| DurationError::InvalidMagnitude {
                token: token.to_string(),
            })?;
    }
    Ok(total)
}

/// Format minutes as `"<d>d <h>h <m>m"`, dropping zero components.
/// Zero yields an empty string.
pub fn format_duration(minutes: u64) -> String {
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes / MINUTES_PER_HOUR) % 24;
    let mins = minutes % MINUTES_PER_HOUR;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if mins > 0 {
        parts.push(format!("{mins}m"));
    }
    parts.join(" ")
}
