// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command line driver for the zonedit library.
//!
//! Loads a zone file, optionally applies one edit, and either prints the
//! re-rendered zone to stdout or writes it back in place.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use zonedit::{FileStore, LockMode, RecordFilter, RecordType, Zone};

#[derive(Parser)]
#[command(name = "zonedit", version, about = "RFC1033 style DNS zone file editor")]
struct Cli {
    /// Domain name of the zone
    #[arg(short, long)]
    domain: String,

    /// Path to the zone file
    #[arg(short, long)]
    file: String,

    /// Advisory file lock to take while reading/writing
    #[arg(long, value_enum, default_value_t = LockArg::None)]
    lock: LockArg,

    /// Print the result to stdout instead of writing the file back
    #[arg(long)]
    stdout: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LockArg {
    None,
    Shared,
    Exclusive,
    SharedNb,
    ExclusiveNb,
}

impl From<LockArg> for LockMode {
    fn from(arg: LockArg) -> Self {
        match arg {
            LockArg::None => Self::None,
            LockArg::Shared => Self::Shared,
            LockArg::Exclusive => Self::Exclusive,
            LockArg::SharedNb => Self::SharedNonBlocking,
            LockArg::ExclusiveNb => Self::ExclusiveNonBlocking,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Parse the zone and print it re-rendered
    Print,
    /// Dump the parsed records as JSON
    Records,
    /// Set the TTL on records matching the filters
    SetTtl {
        /// New TTL in seconds
        ttl: u32,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Rename records matching the filters
    SetName {
        /// New record name; qualified against the zone domain
        new_name: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Replace the data of records matching the filters
    SetValue {
        /// New record data
        new_data: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Set the preference of matching MX records
    SetMxPref {
        /// New preference value
        pref: u32,
        /// Only MX records pointing at this exchange host
        #[arg(long)]
        server: Option<String>,
        /// Only MX records with this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Update one SOA field by key (name, ttl, class, origin, person,
    /// serial, refresh, retry, expire, minimum)
    SetSoa {
        /// SOA field name
        key: String,
        /// New value
        value: String,
    },
    /// Rename the zone's domain, rewriting references to the old one
    SetDomain {
        /// The new domain name
        new_domain: String,
        /// Leave existing SOA fields and records untouched
        #[arg(long)]
        no_migrate: bool,
    },
    /// Append a record
    AddRecord {
        /// Record type (A, AAAA, NS, MX, CNAME, PTR, TXT, SRV)
        rtype: String,
        /// Record data
        data: String,
        /// Record name; defaults to the zone apex
        #[arg(long)]
        name: Option<String>,
        /// TTL in seconds; defaults to the SOA TTL
        #[arg(long)]
        ttl: Option<u32>,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Only records with this name
    #[arg(long)]
    name: Option<String>,
    /// Only records of this type (A, MX, ...)
    #[arg(long = "type")]
    rtype: Option<String>,
    /// Only records with this data
    #[arg(long)]
    data: Option<String>,
}

impl FilterArgs {
    fn build(&self) -> Result<RecordFilter> {
        let mut filter = RecordFilter::any();
        if let Some(name) = &self.name {
            filter = filter.name(name.clone());
        }
        if let Some(rtype) = &self.rtype {
            let rtype: RecordType = rtype
                .parse()
                .with_context(|| format!("unknown record type '{rtype}'"))?;
            filter = filter.rtype(rtype);
        }
        if let Some(data) = &self.data {
            filter = filter.data(data.clone());
        }
        Ok(filter)
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let store = FileStore;
    let lock: LockMode = cli.lock.into();

    let mut zone = Zone::new();
    zone.load(&cli.domain, &store, &cli.file, lock)
        .with_context(|| format!("failed to load zone from {}", cli.file))?;
    debug!(records = zone.records().len(), "zone parsed");

    match &cli.command {
        Command::Print => {
            print!("{}", zone.render("\n")?);
            return Ok(());
        }
        Command::Records => {
            println!("{}", serde_json::to_string_pretty(zone.records())?);
            return Ok(());
        }
        Command::SetTtl { ttl, filter } => {
            let changed = zone.set_ttl(*ttl, &filter.build()?);
            info!(changed, "TTL updated");
        }
        Command::SetName { new_name, filter } => {
            let changed = zone.set_name(new_name, &filter.build()?);
            info!(changed, "records renamed");
        }
        Command::SetValue { new_data, filter } => {
            let changed = zone.set_value(new_data, &filter.build()?);
            info!(changed, "record data replaced");
        }
        Command::SetMxPref { pref, server, name } => {
            let changed = zone.set_mx_pref(*pref, server.as_deref(), name.as_deref());
            info!(changed, "MX preferences updated");
        }
        Command::SetSoa { key, value } => {
            zone.set_soa_field(key, value)?;
            info!(key = %key, "SOA updated");
        }
        Command::SetDomain {
            new_domain,
            no_migrate,
        } => {
            zone.set_domain_name(new_domain, !no_migrate)?;
            info!(domain = %new_domain, migrate = !no_migrate, "domain renamed");
        }
        Command::AddRecord {
            rtype,
            data,
            name,
            ttl,
        } => {
            let rtype: RecordType = rtype
                .parse()
                .with_context(|| format!("unknown record type '{rtype}'"))?;
            zone.add_record(name.as_deref(), *ttl, None, Some(rtype), Some(data))?;
            info!(%rtype, "record added");
        }
    }

    if cli.stdout {
        print!("{}", zone.render("\n")?);
    } else {
        zone.save(&store, None, "\n", lock)?;
    }
    Ok(())
}

/// Initialize logging with the standard format.
///
/// Respects `RUST_LOG` for the filter (defaults to `info`) and
/// `RUST_LOG_FORMAT=json` for machine-readable output.
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}
