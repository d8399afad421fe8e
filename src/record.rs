// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory zone data model.
//!
//! Zone files decompose into one SOA (Start of Authority) record plus an
//! ordered list of resource records. Both are modeled here as plain structs
//! with typed fields rather than string-keyed bags, so invalid field names
//! are caught at compile time. The record `type` column is the closed
//! [`RecordType`] enum; anything outside it is rejected at parse time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RECORD_CLASS;
use crate::errors::ZoneFileError;

/// The set of resource record types this crate understands.
///
/// Tokens are matched exactly as they appear in zone files (uppercase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Start of Authority
    Soa,
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Authoritative nameserver
    Ns,
    /// Mail exchange (preference + exchange host)
    Mx,
    /// Canonical name alias
    Cname,
    /// Reverse pointer
    Ptr,
    /// Free-form text
    Txt,
    /// Service locator
    Srv,
}

impl RecordType {
    /// Zone file token for this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soa => "SOA",
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Ns => "NS",
            Self::Mx => "MX",
            Self::Cname => "CNAME",
            Self::Ptr => "PTR",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ZoneFileError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "SOA" => Ok(Self::Soa),
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "NS" => Ok(Self::Ns),
            "MX" => Ok(Self::Mx),
            "CNAME" => Ok(Self::Cname),
            "PTR" => Ok(Self::Ptr),
            "TXT" => Ok(Self::Txt),
            "SRV" => Ok(Self::Srv),
            _ => Err(ZoneFileError::RrParseFailed {
                token: token.to_string(),
            }),
        }
    }
}

/// The Start of Authority record of a zone.
///
/// `name`, `origin` and `person` are always fully qualified (trailing dot);
/// [`crate::zone::Zone::set_soa`] enforces that for parsed and programmatic
/// updates alike. All timing fields are seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoaRecord {
    /// Zone name, fully qualified
    pub name: String,
    /// TTL of the SOA record itself, in seconds
    pub ttl: u32,
    /// Record class, normally `IN`
    pub class: String,
    /// Primary nameserver, fully qualified
    pub origin: String,
    /// Responsible person, mailbox with `@` rewritten to `.`, fully qualified
    pub person: String,
    /// Zone serial, conventionally `YYYYMMDDnn`
    pub serial: u64,
    /// Secondary refresh interval, seconds
    pub refresh: u32,
    /// Failed-refresh retry interval, seconds
    pub retry: u32,
    /// Zone expiry at secondaries, seconds
    pub expire: u32,
    /// Negative-caching TTL (RFC 2308), seconds
    pub minimum: u32,
}

/// Per-type extra fields of a resource record.
///
/// Only MX records carry an option today (the preference value). Keeping
/// this a struct instead of a string map means unknown option keys cannot
/// exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOptions {
    /// MX preference (lower wins); `None` for non-MX records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mx_preference: Option<u32>,
}

/// One resource record line of a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Record name, fully qualified
    pub name: String,
    /// TTL in seconds; `None` inherits the zone default until resolved
    pub ttl: Option<u32>,
    /// Record class, normally `IN`
    pub class: String,
    /// Record type
    #[serde(rename = "type")]
    pub rtype: RecordType,
    /// Record data; shape depends on `rtype`
    pub data: String,
    /// Type-specific extras
    #[serde(default)]
    pub options: RecordOptions,
}

/// Partial update of SOA fields, merged via [`crate::zone::Zone::set_soa`].
///
/// Unset fields keep their prior value. This is the typed replacement for
/// the key/value mapping the classic API exposed; string-keyed access is
/// still available through [`crate::zone::Zone::set_soa_field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoaUpdate {
    /// Zone name, fully qualified
    pub name: Option<String>,
    /// SOA TTL, seconds
    pub ttl: Option<u32>,
    /// Record class
    pub class: Option<String>,
    /// Primary nameserver, fully qualified
    pub origin: Option<String>,
    /// Responsible person mailbox
    pub person: Option<String>,
    /// Zone serial
    pub serial: Option<u64>,
    /// Refresh interval, seconds
    pub refresh: Option<u32>,
    /// Retry interval, seconds
    pub retry: Option<u32>,
    /// Expiry, seconds
    pub expire: Option<u32>,
    /// Negative-caching TTL, seconds
    pub minimum: Option<u32>,
}

/// Match predicate for bulk record edits.
///
/// Every field is optional; `None` matches all records. String comparisons
/// are case-insensitive. The name filter matches either the stored
/// fully-qualified name or the filter with `.<domain>.` appended, so
/// callers can pass `"www"` against a zone for `example.com`.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Record name to match, relative or fully qualified
    pub name: Option<String>,
    /// Record type to match
    pub rtype: Option<RecordType>,
    /// Record data to match
    pub data: Option<String>,
}

impl RecordFilter {
    /// Filter matching every record.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to records with this name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Restrict to records of this type.
    #[must_use]
    pub fn rtype(mut self, rtype: RecordType) -> Self {
        self.rtype = Some(rtype);
        self
    }

    /// Restrict to records with this data.
    #[must_use]
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Whether `record` passes this filter under `domain`.
    #[must_use]
    pub fn matches(&self, record: &ResourceRecord, domain: &str) -> bool {
        let name_ok = match &self.name {
            None => true,
            Some(name) => {
                record.name.eq_ignore_ascii_case(name)
                    || record
                        .name
                        .eq_ignore_ascii_case(&format!("{name}.{domain}."))
            }
        };
        let type_ok = self.rtype.is_none_or(|rtype| rtype == record.rtype);
        let data_ok = self
            .data
            .as_ref()
            .is_none_or(|data| record.data.eq_ignore_ascii_case(data));
        name_ok && type_ok && data_ok
    }
}

/// Whether `domain` is made only of letters, digits, `-`, `_` and `.`.
///
/// This is the shape check applied by
/// [`crate::zone::Zone::set_domain_name`]; the empty string passes, which
/// callers rely on when constructing a zone from scratch.
#[must_use]
pub fn is_valid_domain(domain: &str) -> bool {
    domain
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.')
}

/// Whether `name` is a valid fully-qualified SOA field value: the domain
/// character set with a mandatory trailing dot.
#[must_use]
pub fn is_valid_fqdn_field(name: &str) -> bool {
    name.ends_with('.') && is_valid_domain(name)
}

/// Strict dotted-quad IPv4 syntax check.
///
/// Accepts four dot-separated decimal octets in `0..=255`, up to three
/// digits each; leading zeros are allowed (`01.2.3.4` passes). This is a
/// convenience predicate for callers that want to sanity-check A record
/// data; the parser itself never enforces it.
///
/// # Examples
///
/// ```
/// use zonedit::record::is_ip;
///
/// assert!(is_ip("10.0.0.1"));
/// assert!(is_ip("255.255.255.255"));
/// assert!(!is_ip("256.0.0.1"));
/// assert!(!is_ip("10.0.0"));
/// assert!(!is_ip("example.com"));
/// ```
#[must_use]
pub fn is_ip(value: &str) -> bool {
    let mut octets = 0;
    for part in value.split('.') {
        octets += 1;
        if octets > 4 {
            return false;
        }
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match part.parse::<u16>() {
            Ok(octet) if octet <= 255 => {}
            _ => return false,
        }
    }
    octets == 4
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
