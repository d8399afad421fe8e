// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the filesystem zone store

#[cfg(test)]
mod tests {
    use super::super::{FileStore, LockMode, ZoneStore};
    use crate::errors::ZoneFileError;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example.com.zone");
        let path = path.to_str().unwrap();

        let store = FileStore;
        store
            .write_all(path, "$ORIGIN example.com.\n", LockMode::None)
            .unwrap();
        let text = store.read_all(path, LockMode::None).unwrap();
        assert_eq!(text, "$ORIGIN example.com.\n");
    }

    #[test]
    fn test_write_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zone.db");
        let path = path.to_str().unwrap();

        let store = FileStore;
        store
            .write_all(path, "a much longer first version\n", LockMode::None)
            .unwrap();
        store.write_all(path, "short\n", LockMode::None).unwrap();
        assert_eq!(store.read_all(path, LockMode::None).unwrap(), "short\n");
    }

    #[test]
    fn test_locked_read_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.zone");
        let path = path.to_str().unwrap();

        let store = FileStore;
        store
            .write_all(path, "data\n", LockMode::Exclusive)
            .unwrap();
        // Locks are released when the store's handle drops, so a shared
        // read afterwards must succeed.
        assert_eq!(store.read_all(path, LockMode::Shared).unwrap(), "data\n");
        assert_eq!(
            store
                .read_all(path, LockMode::SharedNonBlocking)
                .unwrap(),
            "data\n"
        );
    }

    #[test]
    fn test_missing_file_is_read_failed() {
        let store = FileStore;
        let err = store
            .read_all("/nonexistent/zone.db", LockMode::None)
            .unwrap_err();
        match err {
            ZoneFileError::FileReadFailed { path, .. } => {
                assert_eq!(path, "/nonexistent/zone.db");
            }
            other => panic!("expected FileReadFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_unwritable_path_is_write_failed() {
        let store = FileStore;
        let err = store
            .write_all("/nonexistent/dir/zone.db", "x", LockMode::None)
            .unwrap_err();
        assert!(matches!(err, ZoneFileError::FileWriteFailed { .. }));
    }
}
