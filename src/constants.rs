// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the zonedit crate.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Zone Defaults
// ============================================================================

/// Default TTL in seconds applied when a zone declares no `$TTL`.
///
/// RFC 1537 advises one day as a sensible default.
pub const DEFAULT_ZONE_TTL_SECS: u32 = 86_400;

/// Default record class. Everything this crate handles lives in `IN`.
pub const DEFAULT_RECORD_CLASS: &str = "IN";

// ============================================================================
// Duration Unit Multipliers
// ============================================================================

/// Seconds per minute (`M` suffix).
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Seconds per hour (`H` suffix).
pub const SECONDS_PER_HOUR: u32 = 3_600;

/// Seconds per day (`D` suffix).
pub const SECONDS_PER_DAY: u32 = 86_400;

/// Seconds per week (`W` suffix).
pub const SECONDS_PER_WEEK: u32 = 604_800;

// ============================================================================
// Serial Generation
// ============================================================================

/// `chrono` format string for the date prefix of a `YYYYMMDDnn` zone serial.
pub const SERIAL_DATE_FORMAT: &str = "%Y%m%d";

// ============================================================================
// Crate Metadata
// ============================================================================

/// Crate version, exposed for callers that stamp generated files.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
