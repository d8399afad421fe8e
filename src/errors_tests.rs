// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for zone file error display formatting

#[cfg(test)]
mod tests {
    use super::super::ZoneFileError;

    #[test]
    fn test_rr_parse_failed_names_token() {
        let err = ZoneFileError::RrParseFailed {
            token: "BOGUS".to_string(),
        };
        assert!(
            err.to_string().contains("BOGUS"),
            "RR parse error should name the offending token"
        );
    }

    #[test]
    fn test_time_parse_failed_names_token() {
        let err = ZoneFileError::TimeParseFailed {
            token: "1X".to_string(),
        };
        assert_eq!(err.to_string(), "unable to parse time '1X'");
    }

    #[test]
    fn test_soa_update_failed_names_key() {
        let err = ZoneFileError::SoaUpdateFailed {
            key: "bogus".to_string(),
        };
        assert!(
            err.to_string().contains("bogus"),
            "SOA update error should name the rejected key"
        );
    }

    #[test]
    fn test_file_read_failed_names_path() {
        let err = ZoneFileError::FileReadFailed {
            path: "/etc/bind/example.com.zone".to_string(),
            reason: "permission denied".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("/etc/bind/example.com.zone"));
        assert!(text.contains("permission denied"));
    }
}
