// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone file text parsing.
//!
//! Parsing runs in three stages:
//!
//! 1. **Preprocess**: strip `;` comments, fold parenthesized groups onto
//!    one logical line, collapse whitespace runs.
//! 2. **Scan**: walk the logical lines in order, tracking the running
//!    `$ORIGIN`, default `$TTL` and the last record name (blank names
//!    inherit it). Directives update the state; everything else is handed
//!    to the SOA or RR line parser.
//! 3. **Populate**: parsed records land on the [`Zone`](crate::zone::Zone)
//!    in source order; the SOA is merged through `Zone::set_soa` so parsed
//!    and programmatic SOA values share one validation path.
//!
//! A second SOA line ends the scan: zone dump tools append one to mark the
//! end of a zone, so it is a terminator, not an error. Every other parse
//! failure aborts the load; there is no partial-recovery mode.
//!
//! Nested parenthesized groups are not supported. A `(` inside a group is
//! outside the grammar and the fold behaves as if the inner group were the
//! only one; inputs that need nesting are rejected downstream by the line
//! parsers.

use tracing::{debug, trace};

use crate::constants::DEFAULT_ZONE_TTL_SECS;
use crate::duration::parse_to_seconds;
use crate::errors::{Result, ZoneFileError};
use crate::record::{RecordOptions, RecordType, ResourceRecord, SoaUpdate};
use crate::zone::Zone;

/// Running scanner state, per RFC 1035 zone file semantics.
#[derive(Debug, Clone)]
pub(crate) struct ScanState {
    /// Current origin appended to relative names
    pub origin: String,
    /// Last fully-qualified origin seen
    pub origin_fqdn: String,
    /// Default TTL in seconds, from `$TTL` (RFC 2308) or the RFC 1537 default
    pub ttl: u32,
    /// Last resolved record name, inherited by blank-name lines
    pub current: String,
}

impl ScanState {
    fn new(domain: &str) -> Self {
        let fqdn = format!("{domain}.");
        Self {
            origin: fqdn.clone(),
            origin_fqdn: fqdn.clone(),
            ttl: DEFAULT_ZONE_TTL_SECS,
            current: fqdn,
        }
    }
}

/// Parse preprocessed zone text into `zone`.
///
/// `zone` must already carry the domain name; records, `$GENERATE` lines
/// and the SOA are appended as they are encountered.
pub(crate) fn parse_zone(zone: &mut Zone, text: &str) -> Result<()> {
    let domain = zone.domain().unwrap_or("").to_string();
    let mut state = ScanState::new(&domain);

    for line in preprocess(text) {
        trace!(line = %line, "scanning logical line");

        if let Some(ttl) = ttl_directive(&line) {
            debug!(ttl, "default TTL updated by $TTL directive");
            state.ttl = ttl;
        } else if let Some(name) = line.strip_prefix("$ORIGIN ") {
            let name = name.trim();
            if name.ends_with('.') {
                state.origin = name.to_string();
                state.origin_fqdn = name.to_string();
                debug!(origin = %state.origin_fqdn, "origin set to FQDN");
            } else {
                // Relative origins nest onto the current origin.
                state.origin = format!("{name}.{}", state.origin);
                debug!(origin = %state.origin, fqdn_base = %state.origin_fqdn, "origin extended");
            }
        } else if line.starts_with("$GENERATE ") {
            // Stored verbatim for round-tripping; never expanded.
            zone.push_generate(line);
        } else if contains_soa(&line) {
            if zone.soa().is_some() {
                // A second SOA marks the end of a zone (dig, zone dumps).
                debug!("second SOA line found, ending zone scan");
                break;
            }
            let update = parse_soa_line(&line, &state)?;
            zone.set_soa(update)?;
        } else {
            let record = parse_rr_line(&line, &state)?;
            state.current = record.name.clone();
            zone.push_record(record);
        }
    }
    Ok(())
}

/// Reduce raw zone text to logical lines.
///
/// Comments run from an unescaped `;` to end of line. Parenthesized groups
/// are folded onto one line by dropping the embedded newlines, then both
/// parentheses are removed. Each logical line has whitespace runs collapsed
/// to single spaces and trailing whitespace trimmed; a leading space is
/// kept, because a line starting with whitespace inherits the previous
/// record name. Blank lines are dropped.
#[must_use]
pub fn preprocess(text: &str) -> Vec<String> {
    let stripped: Vec<String> = text.lines().map(strip_comment).collect();
    let folded = fold_parens(&stripped.join("\n"));

    folded
        .split('\n')
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Cut a line at the first `;` that is not preceded by a backslash.
fn strip_comment(line: &str) -> String {
    let mut prev = '\0';
    for (idx, c) in line.char_indices() {
        if c == ';' && prev != '\\' {
            return line[..idx].to_string();
        }
        prev = c;
    }
    line.to_string()
}

/// Remove newlines inside `(...)` groups, then drop all parentheses.
///
/// Only flat groups are folded; a nested `(` starts a new group of its own,
/// matching the original grammar's limitation.
fn fold_parens(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_group = false;
    for c in text.chars() {
        match c {
            '(' => in_group = true,
            ')' => in_group = false,
            '\n' if in_group => {}
            _ => out.push(c),
        }
    }
    out
}

/// Collapse whitespace runs to single spaces and trim the end of the line.
fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_ws = false;
    for c in line.chars() {
        if c.is_whitespace() {
            in_ws = true;
        } else {
            if in_ws {
                // A leading space survives: it marks a blank name field.
                out.push(' ');
            }
            in_ws = false;
            out.push(c);
        }
    }
    out
}

/// Extract the TTL from a `$TTL` directive, if this line is one.
fn ttl_directive(line: &str) -> Option<u32> {
    // Byte-wise prefix check; names are not limited to ASCII, so slicing
    // the str could land inside a multibyte character.
    if !line.as_bytes().get(..4)?.eq_ignore_ascii_case(b"$TTL") {
        return None;
    }
    let digits: String = line[4..]
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Whether this line holds the zone's SOA record.
fn contains_soa(line: &str) -> bool {
    line.to_ascii_lowercase().contains(" soa ")
}

/// Resolve a record name against the scanner state.
///
/// Blank names inherit the previous record's name, `@` is the current
/// origin, and names without a trailing dot get the origin appended.
/// Fully-qualified names pass through untouched.
fn resolve_name(name: &str, state: &ScanState) -> String {
    let resolved = if name.is_empty() {
        state.current.clone()
    } else if name == "@" {
        state.origin.clone()
    } else {
        name.to_string()
    };
    if resolved.ends_with('.') {
        resolved
    } else {
        format!("{resolved}.{}", state.origin)
    }
}

/// Parse the SOA line into a partial SOA update.
///
/// The line splits at the literal ` SOA ` token into a left part (name,
/// optional TTL, optional class) and exactly seven authority fields:
/// `origin person serial refresh retry expire minimum`. Any other field
/// count is [`ZoneFileError::SoaParseFailed`]. The left part is lowercased
/// before interpretation; `origin` and `person` are resolved against the
/// current origin so relative nameserver names come out fully qualified.
pub(crate) fn parse_soa_line(line: &str, state: &ScanState) -> Result<SoaUpdate> {
    let lower = line.to_ascii_lowercase();
    let split_at = lower.find(" soa ").ok_or(ZoneFileError::SoaParseFailed)?;
    let left = lower[..split_at].to_string();
    let right: Vec<&str> = line[split_at + 5..].split_whitespace().collect();
    if right.len() != 7 {
        return Err(ZoneFileError::SoaParseFailed);
    }

    let mut update = SoaUpdate {
        name: None,
        ttl: Some(state.ttl),
        class: Some("IN".to_string()),
        ..SoaUpdate::default()
    };

    let pre: Vec<&str> = left.split(' ').collect();
    update.name = Some(resolve_name(pre.first().copied().unwrap_or(""), state));
    if let Some(second) = pre.get(1) {
        if second.eq_ignore_ascii_case("IN") {
            // Class given, TTL left to the zone default.
        } else {
            update.ttl = Some(parse_to_seconds(second)?);
        }
        if let Some(class) = pre.get(2) {
            update.class = Some(class.to_ascii_uppercase());
        }
    }

    update.origin = Some(resolve_name(right[0], state));
    update.person = Some(resolve_name(&right[1].replace('@', "."), state));
    update.serial = Some(
        right[2]
            .parse::<u64>()
            .map_err(|_| ZoneFileError::SoaParseFailed)?,
    );
    update.refresh = Some(parse_to_seconds(right[3])?);
    update.retry = Some(parse_to_seconds(right[4])?);
    update.expire = Some(parse_to_seconds(right[5])?);
    update.minimum = Some(parse_to_seconds(right[6])?);
    Ok(update)
}

/// Parse one resource record line.
///
/// The first token is the name; the rest are classified in a single
/// forward pass: a leading digit before any TTL is the TTL, `IN` before
/// any class is the class, a supported type token locks in the type (and
/// resolves TTL/class defaults), and everything after the type is data in
/// the type's shape. Single-token types stop immediately; MX consumes
/// preference then exchange; TXT keeps collecting to the end of the line.
pub(crate) fn parse_rr_line(line: &str, state: &ScanState) -> Result<ResourceRecord> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let name = resolve_name(tokens[0], state);

    let mut ttl: Option<u32> = None;
    let mut class: Option<String> = None;
    let mut rtype: Option<RecordType> = None;
    let mut data: Option<String> = None;
    let mut options = RecordOptions::default();

    let mut idx = 1;
    while idx < tokens.len() {
        let item = tokens[idx];
        let type_token = if rtype.is_none() {
            item.parse::<RecordType>().ok()
        } else {
            None
        };
        if ttl.is_none() && item.starts_with(|c: char| c.is_ascii_digit()) {
            // Only a TTL can start with a digit.
            ttl = Some(parse_to_seconds(item)?);
        } else if class.is_none() && item.eq_ignore_ascii_case("IN") {
            class = Some("IN".to_string());
        } else if let Some(found) = type_token {
            // Type found; unset TTL/class fall back to the defaults now.
            ttl = ttl.or(Some(state.ttl));
            class = class.or_else(|| Some("IN".to_string()));
            rtype = Some(found);
        } else if let Some(found) = rtype {
            match found {
                RecordType::A
                | RecordType::Aaaa
                | RecordType::Ns
                | RecordType::Cname
                | RecordType::Ptr
                | RecordType::Srv => {
                    data = Some(item.to_string());
                    break;
                }
                RecordType::Mx => {
                    // Preference first, exchange host next.
                    let pref = item.parse::<u32>().map_err(|_| {
                        ZoneFileError::RrParseFailed {
                            token: item.to_string(),
                        }
                    })?;
                    let exchange =
                        tokens
                            .get(idx + 1)
                            .ok_or_else(|| ZoneFileError::RrParseFailed {
                                token: item.to_string(),
                            })?;
                    options.mx_preference = Some(pref);
                    data = Some((*exchange).to_string());
                    break;
                }
                RecordType::Txt => {
                    // TXT data is everything to the end of the line.
                    match data {
                        Some(ref mut text) => {
                            text.push(' ');
                            text.push_str(item);
                        }
                        None => data = Some(item.to_string()),
                    }
                }
                RecordType::Soa => {
                    return Err(ZoneFileError::RrParseFailed {
                        token: found.to_string(),
                    });
                }
            }
        } else {
            return Err(ZoneFileError::RrParseFailed {
                token: item.to_string(),
            });
        }
        idx += 1;
    }

    let rtype = rtype.ok_or_else(|| ZoneFileError::RrParseFailed {
        token: line.trim().to_string(),
    })?;
    let data = data.ok_or_else(|| ZoneFileError::RrParseFailed {
        token: rtype.to_string(),
    })?;

    Ok(ResourceRecord {
        name,
        ttl,
        class: class.unwrap_or_else(|| "IN".to_string()),
        rtype,
        data,
        options,
    })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
