// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Zonedit - RFC1033 style DNS zone file editor
//!
//! Zonedit reads, edits and re-renders BIND zone files: the SOA record,
//! resource records (A, AAAA, NS, MX, CNAME, PTR, TXT, SRV) and BIND
//! `$GENERATE` extension lines.
//!
//! ## Overview
//!
//! This library provides:
//!
//! - A zone file parser with `$ORIGIN`/`$TTL` tracking, comment stripping
//!   and `(...)` continuation folding (RFC 1033, 1537, 2308)
//! - An in-memory [`zone::Zone`] model preserving record order
//! - Bulk edit operations matched by [`record::RecordFilter`]
//! - A deterministic renderer that bumps the `YYYYMMDDnn` zone serial
//!   when content changed
//! - BIND duration codecs (`1D`, `2H`, plain seconds)
//! - A pluggable byte source/sink ([`store::ZoneStore`]) with advisory
//!   file locking in [`store::FileStore`]
//!
//! ## Modules
//!
//! - [`zone`] - The zone model, mutation API and renderer
//! - [`parser`] - Zone text preprocessing and line parsing
//! - [`record`] - Record types, SOA model, filters
//! - [`duration`] - BIND duration parsing and formatting
//! - [`serial`] - `YYYYMMDDnn` serial generation
//! - [`store`] - Byte source/sink with lock modes
//! - [`errors`] - The [`ZoneFileError`] catalogue
//!
//! ## Example
//!
//! ```rust
//! use zonedit::{RecordFilter, RecordType, Zone};
//!
//! let text = "\
//! $ORIGIN example.com.
//! @ 3600 IN SOA ns1 hostmaster.example.com. 1 7200 3600 604800 3600
//! www 300 IN A 10.0.0.1
//! ";
//!
//! let mut zone = Zone::new();
//! zone.load_str("example.com", text).unwrap();
//! assert_eq!(zone.records().len(), 1);
//!
//! // Bulk-edit every A record, then render the updated zone text.
//! zone.set_ttl(600, &RecordFilter::any().rtype(RecordType::A));
//! let rendered = zone.render("\n").unwrap();
//! assert!(rendered.contains("10M"));
//! ```
//!
//! Parsing is strict: the first malformed line aborts the load. The one
//! exception is a second SOA line, which ends the zone the way `dig`
//! output marks it, and is treated as a terminator.
//!
//! A `Zone` is single-owner: no internal locking, callers serialize
//! access.

pub mod constants;
pub mod duration;
pub mod errors;
pub mod parser;
pub mod record;
pub mod serial;
pub mod store;
pub mod zone;

pub use constants::VERSION;
pub use duration::{parse_from_seconds, parse_to_seconds};
pub use errors::{Result, ZoneFileError};
pub use record::{
    is_ip, RecordFilter, RecordOptions, RecordType, ResourceRecord, SoaRecord, SoaUpdate,
};
pub use serial::raise_serial;
pub use store::{FileStore, LockMode, ZoneStore};
pub use zone::Zone;
