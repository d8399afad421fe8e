// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The in-memory zone and its editing API.
//!
//! A [`Zone`] is built by [`Zone::load`] from a byte source, edited with
//! the bulk setters (which match records by [`RecordFilter`]) and written
//! back with [`Zone::save`] or [`Zone::render`]. Record order is preserved
//! end to end: source order is storage order is output order.
//!
//! Any setter that changes authoritative content flips the `modified`
//! flag; rendering a modified zone bumps the SOA serial once (see
//! [`crate::serial::raise_serial`]) and clears the flag.
//!
//! A `Zone` is a single-owner value with no internal locking. Callers that
//! share one across threads must serialize access themselves.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{DEFAULT_RECORD_CLASS, DEFAULT_ZONE_TTL_SECS};
use crate::duration::parse_from_seconds;
use crate::errors::{Result, ZoneFileError};
use crate::parser;
use crate::record::{
    is_valid_domain, is_valid_fqdn_field, RecordFilter, RecordOptions, RecordType, ResourceRecord,
    SoaRecord, SoaUpdate,
};
use crate::serial::raise_serial;
use crate::store::{LockMode, ZoneStore};

/// An editable DNS zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Zone {
    /// Zone domain, stored without trailing dot
    domain: Option<String>,
    /// Resource id the zone was loaded from; `save` defaults to it
    resource: Option<String>,
    /// The authority record; mandatory before rendering
    soa: Option<SoaRecord>,
    /// Resource records in source order
    records: Vec<ResourceRecord>,
    /// `$GENERATE` directives, verbatim
    generates: Vec<String>,
    /// Whether authoritative content changed since load/render
    modified: bool,
}

impl Zone {
    /// Create an empty zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Loading and Saving
    // ========================================================================

    /// Reset the zone, then read and parse `resource` from `store`.
    ///
    /// `domain` becomes the zone's domain and initial origin. `lock` is
    /// passed through to the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns the store's [`ZoneFileError::FileReadFailed`] or the first
    /// parse error. A failed load leaves the zone partially populated;
    /// callers must [`Zone::free`] or reload before using it.
    pub fn load<S: ZoneStore + ?Sized>(
        &mut self,
        domain: &str,
        store: &S,
        resource: &str,
        lock: LockMode,
    ) -> Result<()> {
        self.free();
        let text = store.read_all(resource, lock)?;
        self.set_domain_name(domain, true)?;
        self.resource = Some(resource.to_string());
        parser::parse_zone(self, &text)?;
        self.modified = false;
        info!(
            domain = %domain,
            resource = %resource,
            records = self.records.len(),
            generates = self.generates.len(),
            "zone loaded"
        );
        Ok(())
    }

    /// Parse zone text directly, without a byte source.
    ///
    /// Same semantics as [`Zone::load`] minus the read; useful for tests
    /// and callers that already hold the text.
    ///
    /// # Errors
    ///
    /// Returns the first parse error; see [`Zone::load`].
    pub fn load_str(&mut self, domain: &str, text: &str) -> Result<()> {
        self.free();
        self.set_domain_name(domain, true)?;
        parser::parse_zone(self, text)?;
        self.modified = false;
        Ok(())
    }

    /// Reset the zone to its empty state so another file can be loaded.
    pub fn free(&mut self) {
        *self = Self::default();
    }

    /// Render the zone and write it to `store`.
    ///
    /// With `resource` unset, writes back to the resource given at load
    /// time. Renders first (bumping the serial if the zone was modified),
    /// then hands the text to the store with `lock`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::RenderNotLoaded`] without an SOA,
    /// [`ZoneFileError::FileWriteFailed`] if no target resource is known or
    /// the store write fails.
    pub fn save<S: ZoneStore + ?Sized>(
        &mut self,
        store: &S,
        resource: Option<&str>,
        separator: &str,
        lock: LockMode,
    ) -> Result<()> {
        let target = match resource.or(self.resource.as_deref()) {
            Some(target) => target.to_string(),
            None => {
                return Err(ZoneFileError::FileWriteFailed {
                    path: String::new(),
                    reason: "no resource was loaded and none was given".to_string(),
                })
            }
        };
        let text = self.render(separator)?;
        store.write_all(&target, &text, lock)?;
        info!(resource = %target, "zone saved");
        Ok(())
    }

    /// Render the zone back to zone file text.
    ///
    /// Lines are joined with `separator` (callers normally pass `"\n"`).
    /// If the zone was modified, the SOA serial is raised first and the
    /// modified flag cleared; record TTLs are formatted as BIND durations
    /// in the output only, the stored values stay in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::RenderNotLoaded`] if no SOA is present.
    pub fn render(&mut self, separator: &str) -> Result<String> {
        Ok(self.generate_lines()?.join(separator))
    }

    fn generate_lines(&mut self) -> Result<Vec<String>> {
        if self.soa.is_none() {
            return Err(ZoneFileError::RenderNotLoaded);
        }
        if self.modified {
            // One serial bump per round of edits.
            if let Some(soa) = self.soa.as_mut() {
                let old = soa.serial;
                soa.serial = raise_serial(soa.serial);
                debug!(old, new = soa.serial, "zone serial raised");
            }
            self.modified = false;
        }
        let soa = self.soa.as_ref().ok_or(ZoneFileError::RenderNotLoaded)?;
        let domain = self.domain.clone().unwrap_or_default();
        let tabs = "\t\t\t\t";

        let mut lines = Vec::with_capacity(self.records.len() + self.generates.len() + 10);
        lines.push(format!("$ORIGIN {domain}."));
        lines.push(format!(
            "@\t{}\t{}\tSOA\t{}\t{}\t(",
            soa.ttl, soa.class, soa.origin, soa.person
        ));
        lines.push(format!("{tabs}{}\t; serial", soa.serial));
        lines.push(format!(
            "{tabs}{}\t\t; refresh",
            parse_from_seconds(i64::from(soa.refresh))?
        ));
        lines.push(format!(
            "{tabs}{}\t\t; retry",
            parse_from_seconds(i64::from(soa.retry))?
        ));
        lines.push(format!(
            "{tabs}{}\t\t; expire",
            parse_from_seconds(i64::from(soa.expire))?
        ));
        lines.push(format!(
            "{tabs}{})\t\t; minimum",
            parse_from_seconds(i64::from(soa.minimum))?
        ));
        lines.push(String::new());

        if !self.generates.is_empty() {
            lines.extend(self.generates.iter().cloned());
            lines.push(String::new());
        }

        for record in &self.records {
            let ttl = record.ttl.unwrap_or(soa.ttl);
            let ttl_text = parse_from_seconds(i64::from(ttl))?;
            let line = match record.rtype {
                RecordType::Mx => format!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    record.name,
                    ttl_text,
                    record.class,
                    record.rtype,
                    record.options.mx_preference.unwrap_or_default(),
                    record.data
                ),
                _ => format!(
                    "{}\t{}\t{}\t{}\t{}",
                    record.name, ttl_text, record.class, record.rtype, record.data
                ),
            };
            lines.push(line);
        }
        lines.push(String::new());
        Ok(lines)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// The zone's domain, without trailing dot.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The resource id the zone was loaded from.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// The SOA record, if one was loaded or set.
    #[must_use]
    pub fn soa(&self) -> Option<&SoaRecord> {
        self.soa.as_ref()
    }

    /// All resource records, in source order.
    #[must_use]
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// All `$GENERATE` directives, verbatim, in source order.
    #[must_use]
    pub fn generates(&self) -> &[String] {
        &self.generates
    }

    /// Whether authoritative content changed since the last load/render.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    // ========================================================================
    // Mutation API
    // ========================================================================

    /// Set the zone's domain name.
    ///
    /// The name may only contain letters, digits, `-`, `_` and `.`; a
    /// trailing dot is stripped. With `migrate` set and an SOA loaded,
    /// every SOA field and record name/data ending in `<old domain>.` is
    /// rewritten to end in the new domain, keeping its prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::InvalidDomain`] naming the rejected string.
    pub fn set_domain_name(&mut self, domain: &str, migrate: bool) -> Result<()> {
        if !is_valid_domain(domain) {
            return Err(ZoneFileError::InvalidDomain {
                domain: domain.to_string(),
            });
        }
        let old = self.domain.take();
        let domain = domain.trim_end_matches('.').to_string();
        debug!(old = old.as_deref().unwrap_or(""), new = %domain, migrate, "domain name set");
        self.domain = Some(domain.clone());

        if self.soa.is_some() {
            self.modified = true;
            if migrate {
                if let Some(old) = old.filter(|old| !old.is_empty()) {
                    if let Some(soa) = self.soa.as_mut() {
                        soa.name = migrate_suffix(&soa.name, &old, &domain);
                        soa.origin = migrate_suffix(&soa.origin, &old, &domain);
                        soa.person = migrate_suffix(&soa.person, &old, &domain);
                    }
                    for record in &mut self.records {
                        record.name = migrate_suffix(&record.name, &old, &domain);
                        record.data = migrate_suffix(&record.data, &old, &domain);
                    }
                }
            }
        }
        Ok(())
    }

    /// Merge a partial update into the SOA.
    ///
    /// Unset fields keep their prior value. `name` and `origin` must be
    /// fully qualified; `person` gets `@` rewritten to `.`, surrounding
    /// dots trimmed and the trailing dot re-appended before the same
    /// check. The first update on an empty zone must carry `name`,
    /// `origin` and `person`; the numeric fields then default to zero and
    /// the TTL to the RFC 1537 day.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::SoaUpdateFailed`] naming the first field
    /// that fails validation or is missing on first set.
    pub fn set_soa(&mut self, update: SoaUpdate) -> Result<()> {
        let name = validate_soa_name(update.name, "name")?;
        let origin = validate_soa_name(update.origin, "origin")?;
        let person = validate_soa_name(update.person.map(normalize_person), "person")?;

        match self.soa.as_mut() {
            Some(soa) => {
                if let Some(name) = name {
                    soa.name = name;
                }
                if let Some(ttl) = update.ttl {
                    soa.ttl = ttl;
                }
                if let Some(class) = update.class {
                    soa.class = class;
                }
                if let Some(origin) = origin {
                    soa.origin = origin;
                }
                if let Some(person) = person {
                    soa.person = person;
                }
                if let Some(serial) = update.serial {
                    soa.serial = serial;
                }
                if let Some(refresh) = update.refresh {
                    soa.refresh = refresh;
                }
                if let Some(retry) = update.retry {
                    soa.retry = retry;
                }
                if let Some(expire) = update.expire {
                    soa.expire = expire;
                }
                if let Some(minimum) = update.minimum {
                    soa.minimum = minimum;
                }
            }
            None => {
                let missing = |key: &str| ZoneFileError::SoaUpdateFailed {
                    key: key.to_string(),
                };
                self.soa = Some(SoaRecord {
                    name: name.ok_or_else(|| missing("name"))?,
                    ttl: update.ttl.unwrap_or(DEFAULT_ZONE_TTL_SECS),
                    class: update
                        .class
                        .unwrap_or_else(|| DEFAULT_RECORD_CLASS.to_string()),
                    origin: origin.ok_or_else(|| missing("origin"))?,
                    person: person.ok_or_else(|| missing("person"))?,
                    serial: update.serial.unwrap_or(0),
                    refresh: update.refresh.unwrap_or(0),
                    retry: update.retry.unwrap_or(0),
                    expire: update.expire.unwrap_or(0),
                    minimum: update.minimum.unwrap_or(0),
                });
            }
        }
        self.modified = true;
        Ok(())
    }

    /// Set one SOA field by key name.
    ///
    /// String-keyed convenience over [`Zone::set_soa`] for callers like the
    /// CLI. Accepted keys: `name`, `ttl`, `class`, `origin`, `person`,
    /// `serial`, `refresh`, `retry`, `expire`, `minimum`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::SoaUpdateFailed`] for unknown keys,
    /// non-numeric values on numeric fields, or validation failures.
    pub fn set_soa_field(&mut self, key: &str, value: &str) -> Result<()> {
        let bad_value = || ZoneFileError::SoaUpdateFailed {
            key: key.to_string(),
        };
        let mut update = SoaUpdate::default();
        match key.to_ascii_lowercase().as_str() {
            "name" => update.name = Some(value.to_string()),
            "class" => update.class = Some(value.to_string()),
            "origin" => update.origin = Some(value.to_string()),
            "person" => update.person = Some(value.to_string()),
            "ttl" => update.ttl = Some(value.parse().map_err(|_| bad_value())?),
            "serial" => update.serial = Some(value.parse().map_err(|_| bad_value())?),
            "refresh" => update.refresh = Some(value.parse().map_err(|_| bad_value())?),
            "retry" => update.retry = Some(value.parse().map_err(|_| bad_value())?),
            "expire" => update.expire = Some(value.parse().map_err(|_| bad_value())?),
            "minimum" => update.minimum = Some(value.parse().map_err(|_| bad_value())?),
            _ => return Err(bad_value()),
        }
        self.set_soa(update)
    }

    /// Set the TTL of every record matching `filter`.
    ///
    /// Returns the number of records changed; the zone is marked modified
    /// when that is non-zero.
    pub fn set_ttl(&mut self, new_ttl: u32, filter: &RecordFilter) -> usize {
        let domain = self.domain.clone().unwrap_or_default();
        let mut changed = 0;
        for record in &mut self.records {
            if filter.matches(record, &domain) {
                record.ttl = Some(new_ttl);
                changed += 1;
            }
        }
        self.mark_modified(changed, "set_ttl");
        changed
    }

    /// Rename every record matching `filter`.
    ///
    /// The new name is fully qualified against the zone domain first: a
    /// trailing dot passes through, a name ending in the domain gets a dot
    /// appended, anything else gets `.<domain>.` appended. Returns the
    /// number of records changed.
    pub fn set_name(&mut self, new_name: &str, filter: &RecordFilter) -> usize {
        let qualified = self.qualify(new_name);
        let domain = self.domain.clone().unwrap_or_default();
        let mut changed = 0;
        for record in &mut self.records {
            if filter.matches(record, &domain) {
                record.name = qualified.clone();
                changed += 1;
            }
        }
        self.mark_modified(changed, "set_name");
        changed
    }

    /// Replace the data of every record matching `filter`.
    ///
    /// Returns the number of records changed.
    pub fn set_value(&mut self, new_data: &str, filter: &RecordFilter) -> usize {
        let domain = self.domain.clone().unwrap_or_default();
        let mut changed = 0;
        for record in &mut self.records {
            if filter.matches(record, &domain) {
                record.data = new_data.to_string();
                changed += 1;
            }
        }
        self.mark_modified(changed, "set_value");
        changed
    }

    /// Set the preference of matching MX records.
    ///
    /// `server` filters on the exchange host (record data), `name` on the
    /// record name; both are fully qualified against the zone domain
    /// before matching and `None` or empty strings match everything.
    /// Returns the number of records changed.
    pub fn set_mx_pref(&mut self, pref: u32, server: Option<&str>, name: Option<&str>) -> usize {
        let server = server
            .filter(|s| !s.is_empty())
            .map(|s| self.qualify(s));
        let name = name.filter(|n| !n.is_empty()).map(|n| self.qualify(n));

        let mut changed = 0;
        for record in &mut self.records {
            if record.rtype == RecordType::Mx
                && server.as_ref().is_none_or(|s| *s == record.data)
                && name.as_ref().is_none_or(|n| *n == record.name)
            {
                record.options.mx_preference = Some(pref);
                changed += 1;
            }
        }
        self.mark_modified(changed, "set_mx_pref");
        changed
    }

    /// Append a record, filling gaps from the SOA.
    ///
    /// A missing `name` or `ttl` falls back to the SOA's; `class` defaults
    /// to `IN`. The name is fully qualified against the zone domain.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::RrParseFailed`] if `rtype` or `data` end up
    /// empty, or if `name` is absent with no SOA to inherit from.
    pub fn add_record(
        &mut self,
        name: Option<&str>,
        ttl: Option<u32>,
        class: Option<&str>,
        rtype: Option<RecordType>,
        data: Option<&str>,
    ) -> Result<()> {
        let missing = |what: &str| ZoneFileError::RrParseFailed {
            token: what.to_string(),
        };
        let rtype = rtype.ok_or_else(|| missing("type"))?;
        let data = match data.filter(|d| !d.is_empty()) {
            Some(data) => data.to_string(),
            None => return Err(missing("data")),
        };
        let name = match name {
            Some(name) => self.qualify(name),
            None => self
                .soa
                .as_ref()
                .map(|soa| soa.name.clone())
                .ok_or_else(|| missing("name"))?,
        };
        let ttl = ttl.or_else(|| self.soa.as_ref().map(|soa| soa.ttl));

        self.records.push(ResourceRecord {
            name,
            ttl,
            class: class
                .unwrap_or(DEFAULT_RECORD_CLASS)
                .to_string(),
            rtype,
            data,
            options: RecordOptions::default(),
        });
        self.modified = true;
        debug!(rtype = %rtype, "record added");
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Fully qualify a name against the zone domain.
    fn qualify(&self, value: &str) -> String {
        let domain = self.domain.as_deref().unwrap_or("");
        if value.ends_with('.') {
            value.to_string()
        } else if !domain.is_empty()
            && value.to_ascii_lowercase().ends_with(&domain.to_ascii_lowercase())
        {
            format!("{value}.")
        } else {
            format!("{value}.{domain}.")
        }
    }

    fn mark_modified(&mut self, changed: usize, op: &str) {
        if changed > 0 {
            self.modified = true;
            debug!(op, changed, "records updated");
        }
    }

    /// Append a parsed record (parser use).
    pub(crate) fn push_record(&mut self, record: ResourceRecord) {
        self.records.push(record);
    }

    /// Append a verbatim `$GENERATE` line (parser use).
    pub(crate) fn push_generate(&mut self, line: String) {
        self.generates.push(line);
    }
}

/// Rewrite `value` so a `<prefix><old>.` suffix ends in `new` instead.
fn migrate_suffix(value: &str, old: &str, new: &str) -> String {
    match value.strip_suffix(&format!("{old}.")) {
        Some(prefix) => format!("{prefix}{new}."),
        None => value.to_string(),
    }
}

/// Normalize an SOA person mailbox: `@` becomes `.`, surrounding dots are
/// trimmed, the trailing dot is re-appended.
fn normalize_person(person: String) -> String {
    let replaced = person.replace('@', ".");
    format!("{}.", replaced.trim_matches('.'))
}

/// Check an SOA name-like field for the fully-qualified shape.
fn validate_soa_name(value: Option<String>, key: &str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(value) if is_valid_fqdn_field(&value) => Ok(Some(value)),
        Some(_) => Err(ZoneFileError::SoaUpdateFailed {
            key: key.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod zone_tests;
