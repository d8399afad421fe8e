// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for YYYYMMDDnn serial generation

#[cfg(test)]
mod tests {
    use super::super::raise_serial;
    use chrono::Local;

    fn today_base() -> u64 {
        format!("{}00", Local::now().format("%Y%m%d"))
            .parse()
            .unwrap()
    }

    #[test]
    fn test_stale_serial_resets_to_today() {
        // A serial from 2004 gets replaced with today's fresh base.
        assert_eq!(raise_serial(2004011507), today_base());
        assert_eq!(raise_serial(1), today_base());
        assert_eq!(raise_serial(0), today_base());
    }

    #[test]
    fn test_todays_serial_increments() {
        let base = today_base();
        assert_eq!(raise_serial(base), base + 1);
        assert_eq!(raise_serial(base + 41), base + 42);
    }

    #[test]
    fn test_future_serial_increments() {
        // A serial past today's base keeps counting instead of going
        // backwards, so secondaries never see a regression.
        let future = today_base() + 100_000; // next nominal day
        assert_eq!(raise_serial(future), future + 1);
    }

    #[test]
    fn test_hundredth_edit_wraps_into_next_day() {
        let base = today_base();
        let mut serial = base + 99;
        serial = raise_serial(serial);
        assert_eq!(serial, base + 100, "wraps into the next day's base");
        // Further edits keep incrementing from there.
        assert_eq!(raise_serial(serial), base + 101);
    }

    #[test]
    fn test_serial_is_monotonic() {
        let mut serial = 2004011507;
        for _ in 0..10 {
            let next = raise_serial(serial);
            assert!(next > serial, "raise_serial must grow: {serial} -> {next}");
            serial = next;
        }
    }
}
