// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! BIND-style duration parsing and formatting.
//!
//! Zone files express timeouts either as plain seconds (`3600`) or as a
//! single `<digits><unit>` pair (`1D`, `2H`, `15M`). Units are
//! `S|M|H|D|W`, case-insensitive. The formatter picks the largest unit
//! that divides the value exactly, so the round trip preserves the value
//! but not necessarily the original spelling (`90S` parses to `90` and
//! renders back as `90`).

use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_WEEK};
use crate::errors::{Result, ZoneFileError};

/// Parse a BIND duration token into seconds.
///
/// A purely numeric token is returned unchanged. Anything else must be
/// exactly one run of digits followed by one of the unit letters
/// `S`, `M`, `H`, `D` or `W` (case-insensitive).
///
/// # Examples
///
/// ```
/// use zonedit::duration::parse_to_seconds;
///
/// assert_eq!(parse_to_seconds("3600").unwrap(), 3600);
/// assert_eq!(parse_to_seconds("1D").unwrap(), 86400);
/// assert_eq!(parse_to_seconds("2h").unwrap(), 7200);
/// assert!(parse_to_seconds("1D2H").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ZoneFileError::TimeParseFailed`] naming the token if the
/// shape or unit letter is not recognized, or if the value overflows.
pub fn parse_to_seconds(token: &str) -> Result<u32> {
    let fail = || ZoneFileError::TimeParseFailed {
        token: token.to_string(),
    };

    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        // Already plain seconds.
        return token.parse::<u32>().map_err(|_| fail());
    }

    // Must be exactly <digits><single unit letter>.
    let digits_end = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .ok_or_else(fail)?;
    let (value_str, unit) = token.split_at(digits_end);
    if value_str.is_empty() || unit.len() != 1 {
        return Err(fail());
    }

    let value: u32 = value_str.parse().map_err(|_| fail())?;
    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "S" => 1,
        "M" => SECONDS_PER_MINUTE,
        "H" => SECONDS_PER_HOUR,
        "D" => SECONDS_PER_DAY,
        "W" => SECONDS_PER_WEEK,
        _ => return Err(fail()),
    };

    value.checked_mul(multiplier).ok_or_else(fail)
}

/// Format seconds as a BIND duration token.
///
/// Tries each unit from largest to smallest (`W`, `D`, `H`, `M`) and uses
/// the first one that divides the value exactly; anything that divides by
/// none of them is rendered as plain seconds with no suffix. The priority
/// order is fixed for compatibility with existing zone files, even where a
/// smaller unit would give a shorter rendering.
///
/// # Examples
///
/// ```
/// use zonedit::duration::parse_from_seconds;
///
/// assert_eq!(parse_from_seconds(604800).unwrap(), "1W");
/// assert_eq!(parse_from_seconds(86400).unwrap(), "1D");
/// assert_eq!(parse_from_seconds(90).unwrap(), "90");
/// ```
///
/// # Errors
///
/// Returns [`ZoneFileError::TimeFormatFailed`] if `seconds` is negative.
pub fn parse_from_seconds(seconds: i64) -> Result<String> {
    if seconds < 0 {
        return Err(ZoneFileError::TimeFormatFailed { seconds });
    }

    let units = [
        (i64::from(SECONDS_PER_WEEK), "W"),
        (i64::from(SECONDS_PER_DAY), "D"),
        (i64::from(SECONDS_PER_HOUR), "H"),
        (i64::from(SECONDS_PER_MINUTE), "M"),
    ];
    for (multiplier, suffix) in units {
        if seconds % multiplier == 0 {
            return Ok(format!("{}{suffix}", seconds / multiplier));
        }
    }
    Ok(seconds.to_string())
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod duration_tests;
