// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone serial generation using the conventional `YYYYMMDDnn` scheme.

use chrono::Local;

use crate::constants::SERIAL_DATE_FORMAT;

/// Compute the next zone serial from the current one.
///
/// Serials follow the widely used `YYYYMMDDnn` convention, where `nn`
/// counts edits within one day. The rules, in order:
///
/// 1. Serial's date prefix is today: increment.
/// 2. Serial is numerically past today's `YYYYMMDD00` base (already "in
///    the future"): increment.
/// 3. Otherwise: reset to today's `YYYYMMDD00`.
///
/// The scheme allows 100 edits per day; the 101st wraps into the next
/// nominal day's base, which still sorts correctly and is accepted
/// behavior for this format.
///
/// # Examples
///
/// ```
/// use zonedit::serial::raise_serial;
///
/// let stale = raise_serial(2004_01_15_07);
/// assert!(stale > 2004_01_15_07);
/// ```
#[must_use]
pub fn raise_serial(serial: u64) -> u64 {
    let today = Local::now().format(SERIAL_DATE_FORMAT).to_string();
    let today_base: u64 = format!("{today}00").parse().unwrap_or(0);

    let prefix_is_today = serial
        .to_string()
        .get(..8)
        .is_some_and(|prefix| prefix == today);

    if prefix_is_today || serial > today_base {
        serial + 1
    } else {
        today_base
    }
}

#[cfg(test)]
#[path = "serial_tests.rs"]
mod serial_tests;
