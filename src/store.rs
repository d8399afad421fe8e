// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Byte source/sink abstraction for zone text.
//!
//! The zone core never touches I/O directly; it reads and writes through
//! [`ZoneStore`], passing an advisory [`LockMode`] along for the store to
//! interpret (or ignore). [`FileStore`] is the standard filesystem
//! implementation using the OS advisory file locks; the lock is held for
//! the duration of the read or write and released when the file handle
//! drops.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::{Read, Write};

use tracing::debug;

use crate::errors::{Result, ZoneFileError};

/// Advisory lock requested for a store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockMode {
    /// No locking
    #[default]
    None,
    /// Shared (reader) lock, blocking
    Shared,
    /// Exclusive (writer) lock, blocking
    Exclusive,
    /// Shared lock, failing instead of blocking
    SharedNonBlocking,
    /// Exclusive lock, failing instead of blocking
    ExclusiveNonBlocking,
}

/// A named resource the zone text can be read from and written to.
///
/// Implementations decide what a resource id means (a path, an object
/// key) and how to honor the lock mode. Errors must be reported as
/// [`ZoneFileError::FileReadFailed`] / [`ZoneFileError::FileWriteFailed`]
/// carrying the resource id.
pub trait ZoneStore {
    /// Read the entire resource as text.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::FileReadFailed`] if the resource cannot be
    /// opened, locked or read.
    fn read_all(&self, resource: &str, lock: LockMode) -> Result<String>;

    /// Replace the entire resource with `contents`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneFileError::FileWriteFailed`] if the resource cannot be
    /// opened, locked or written.
    fn write_all(&self, resource: &str, contents: &str, lock: LockMode) -> Result<()>;
}

/// Filesystem-backed [`ZoneStore`]; resource ids are paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    fn acquire(file: &File, lock: LockMode) -> std::result::Result<(), String> {
        let nonblocking = |outcome: std::result::Result<(), TryLockError>| match outcome {
            Ok(()) => Ok(()),
            Err(TryLockError::WouldBlock) => Err("lock is held elsewhere".to_string()),
            Err(TryLockError::Error(err)) => Err(err.to_string()),
        };
        match lock {
            LockMode::None => Ok(()),
            LockMode::Shared => file.lock_shared().map_err(|e| e.to_string()),
            LockMode::Exclusive => file.lock().map_err(|e| e.to_string()),
            LockMode::SharedNonBlocking => nonblocking(file.try_lock_shared()),
            LockMode::ExclusiveNonBlocking => nonblocking(file.try_lock()),
        }
    }
}

impl ZoneStore for FileStore {
    fn read_all(&self, resource: &str, lock: LockMode) -> Result<String> {
        let read_failed = |reason: String| ZoneFileError::FileReadFailed {
            path: resource.to_string(),
            reason,
        };
        let mut file = File::open(resource).map_err(|e| read_failed(e.to_string()))?;
        Self::acquire(&file, lock).map_err(read_failed)?;
        debug!(path = %resource, ?lock, "reading zone file");
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|e| read_failed(e.to_string()))?;
        Ok(text)
    }

    fn write_all(&self, resource: &str, contents: &str, lock: LockMode) -> Result<()> {
        let write_failed = |reason: String| ZoneFileError::FileWriteFailed {
            path: resource.to_string(),
            reason,
        };
        // Truncate only after the lock is held.
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(resource)
            .map_err(|e| write_failed(e.to_string()))?;
        Self::acquire(&file, lock).map_err(write_failed)?;
        debug!(path = %resource, ?lock, bytes = contents.len(), "writing zone file");
        file.set_len(0).map_err(|e| write_failed(e.to_string()))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| write_failed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
