// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for BIND duration parsing and formatting

#[cfg(test)]
mod tests {
    use super::super::{parse_from_seconds, parse_to_seconds};

    // ========================================================================
    // Parsing to Seconds
    // ========================================================================

    #[test]
    fn test_parse_plain_seconds() {
        assert_eq!(parse_to_seconds("0").unwrap(), 0);
        assert_eq!(parse_to_seconds("3600").unwrap(), 3600);
        assert_eq!(parse_to_seconds("86400").unwrap(), 86400);
    }

    #[test]
    fn test_parse_each_unit() {
        assert_eq!(parse_to_seconds("45S").unwrap(), 45, "S is seconds");
        assert_eq!(parse_to_seconds("15M").unwrap(), 900, "M is minutes");
        assert_eq!(parse_to_seconds("2H").unwrap(), 7200, "H is hours");
        assert_eq!(parse_to_seconds("1D").unwrap(), 86400, "D is days");
        assert_eq!(parse_to_seconds("1W").unwrap(), 604_800, "W is weeks");
    }

    #[test]
    fn test_parse_units_case_insensitive() {
        assert_eq!(
            parse_to_seconds("2h").unwrap(),
            parse_to_seconds("2H").unwrap()
        );
        assert_eq!(
            parse_to_seconds("3d").unwrap(),
            parse_to_seconds("3D").unwrap()
        );
    }

    // ========================================================================
    // Invalid Tokens
    // ========================================================================

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = parse_to_seconds("10X").unwrap_err();
        assert!(
            err.to_string().contains("10X"),
            "error should carry the offending token"
        );
    }

    #[test]
    fn test_parse_rejects_compound_tokens() {
        // Only a single <digits><unit> pair is allowed.
        assert!(parse_to_seconds("1D2H").is_err());
        assert!(parse_to_seconds("1D5").is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_to_seconds("").is_err());
        assert!(parse_to_seconds("D").is_err());
        assert!(parse_to_seconds("D1").is_err());
        assert!(parse_to_seconds("-5").is_err());
        assert!(parse_to_seconds("1.5H").is_err());
        assert!(parse_to_seconds(" 1D").is_err());
    }

    // ========================================================================
    // Formatting from Seconds
    // ========================================================================

    #[test]
    fn test_format_prefers_largest_exact_unit() {
        assert_eq!(parse_from_seconds(604_800).unwrap(), "1W");
        assert_eq!(parse_from_seconds(1_209_600).unwrap(), "2W");
        assert_eq!(parse_from_seconds(86400).unwrap(), "1D");
        assert_eq!(parse_from_seconds(172_800).unwrap(), "2D");
        assert_eq!(parse_from_seconds(7200).unwrap(), "2H");
        assert_eq!(parse_from_seconds(900).unwrap(), "15M");
    }

    #[test]
    fn test_format_falls_through_to_plain_seconds() {
        assert_eq!(parse_from_seconds(90).unwrap(), "90");
        assert_eq!(parse_from_seconds(3601).unwrap(), "3601");
        assert_eq!(parse_from_seconds(61).unwrap(), "61");
    }

    #[test]
    fn test_format_zero_uses_week_unit() {
        // Zero divides evenly by every unit, so the W priority wins.
        assert_eq!(parse_from_seconds(0).unwrap(), "0W");
    }

    #[test]
    fn test_format_rejects_negative() {
        assert!(parse_from_seconds(-1).is_err());
    }

    // ========================================================================
    // Round Trips
    // ========================================================================

    #[test]
    fn test_value_round_trip() {
        // Formatting then re-parsing always preserves the value, even when
        // the original token spelling is lost ("90S" -> 90 -> "90").
        for seconds in [0u32, 1, 59, 60, 90, 3600, 3601, 86400, 604_800, 605_000] {
            let text = parse_from_seconds(i64::from(seconds)).unwrap();
            assert_eq!(
                parse_to_seconds(&text).unwrap(),
                seconds,
                "round trip changed value for {seconds} ({text})"
            );
        }
    }

    #[test]
    fn test_token_spelling_not_preserved() {
        let seconds = parse_to_seconds("90S").unwrap();
        assert_eq!(parse_from_seconds(i64::from(seconds)).unwrap(), "90");
    }
}
