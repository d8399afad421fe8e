// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zone file parsing, editing and rendering.
//!
//! Every failure in this crate maps to one [`ZoneFileError`] variant carrying
//! the offending value (token, key, path) so callers can report exactly what
//! broke. All errors are fatal to the operation that raised them: a failed
//! load leaves the zone in an unusable partial state and callers must
//! `free()` and load again.

use thiserror::Error;

/// Errors raised while loading, editing or rendering a zone file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneFileError {
    /// Reading the zone file (or other byte source) failed.
    #[error("unable to read zone file '{path}': {reason}")]
    FileReadFailed {
        /// The resource that could not be read
        path: String,
        /// Underlying I/O error text
        reason: String,
    },

    /// Writing the rendered zone back to the byte sink failed.
    #[error("unable to write zone file '{path}': {reason}")]
    FileWriteFailed {
        /// The resource that could not be written
        path: String,
        /// Underlying I/O error text
        reason: String,
    },

    /// The SOA line did not split into a name part plus the seven
    /// authority fields (origin, person, serial, refresh, retry, expire,
    /// minimum).
    #[error("unable to parse SOA")]
    SoaParseFailed,

    /// A resource record line contained a token that could not be
    /// classified as TTL, class, type or data.
    #[error("unable to parse RR, '{token}' not recognized")]
    RrParseFailed {
        /// The token or type name that stopped the parse
        token: String,
    },

    /// A BIND duration token (`1D`, `2H`, plain seconds) failed to parse.
    #[error("unable to parse time '{token}'")]
    TimeParseFailed {
        /// The unparseable duration token
        token: String,
    },

    /// A seconds value could not be rendered as a BIND duration.
    #[error("unable to format {seconds} seconds as a duration")]
    TimeFormatFailed {
        /// The offending seconds value
        seconds: i64,
    },

    /// Rendering was requested before a zone (with SOA) was loaded.
    #[error("unable to render zone, no zone loaded")]
    RenderNotLoaded,

    /// A domain name failed validation.
    #[error("unable to set domain name '{domain}'")]
    InvalidDomain {
        /// The rejected domain string
        domain: String,
    },

    /// An SOA update carried an unknown key or an invalid value.
    #[error("unable to set SOA value, '{key}' not valid")]
    SoaUpdateFailed {
        /// The SOA key that was rejected
        key: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ZoneFileError>;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
