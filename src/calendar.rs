//! Fixed-timezone calendar-day helpers.
//!
//! Streaks, the daily review quota and the activity heatmap all reason about
//! "today" in a single fixed reference timezone. Every calendar-day
//! conversion in the app goes through this module so the three features can
//! never disagree about where a day boundary falls.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Default reference offset in minutes east of UTC (+5:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Build a `FixedOffset` from minutes east of UTC, falling back to UTC for
/// out-of-range values.
pub fn offset_from_minutes(minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
}

/// Calendar date of an epoch-ms timestamp in the reference timezone.
pub fn date_at(ts_ms: i64, offset: FixedOffset) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(ts_ms)
        .unwrap_or_default()
        .with_timezone(&offset)
        .date_naive()
}

/// "YYYY-MM-DD" day string of a timestamp in the reference timezone.
pub fn day_string(ts_ms: i64, offset: FixedOffset) -> String {
    date_at(ts_ms, offset).format("%Y-%m-%d").to_string()
}

/// Day string of the calendar day before `now_ms` in the reference timezone.
pub fn yesterday_string(now_ms: i64, offset: FixedOffset) -> String {
    (date_at(now_ms, offset) - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

/// Whether two timestamps fall on the same reference-timezone calendar day.
pub fn same_day(a_ms: i64, b_ms: i64, offset: FixedOffset) -> bool {
    date_at(a_ms, offset) == date_at(b_ms, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15 00:00:00 UTC
    const JAN_15_UTC: i64 = 1_705_276_800_000;

    #[test]
    fn day_string_uses_reference_offset() {
        let ist = offset_from_minutes(330);
        // Midnight UTC is already 05:30 the same day in IST.
        assert_eq!(day_string(JAN_15_UTC, ist), "2024-01-15");
        // 20:00 UTC is 01:30 the *next* day in IST.
        let evening = JAN_15_UTC + 20 * 3_600_000;
        assert_eq!(day_string(evening, ist), "2024-01-16");
    }

    #[test]
    fn negative_offsets_shift_backwards() {
        let nyc = offset_from_minutes(-300);
        // 02:00 UTC is still the previous day at UTC-5.
        let early = JAN_15_UTC + 2 * 3_600_000;
        assert_eq!(day_string(early, nyc), "2024-01-14");
    }

    #[test]
    fn yesterday_is_one_calendar_day_back() {
        let ist = offset_from_minutes(330);
        assert_eq!(yesterday_string(JAN_15_UTC, ist), "2024-01-14");
    }

    #[test]
    fn same_day_respects_boundaries() {
        let utc = offset_from_minutes(0);
        assert!(same_day(JAN_15_UTC, JAN_15_UTC + MS_PER_DAY - 1, utc));
        assert!(!same_day(JAN_15_UTC, JAN_15_UTC + MS_PER_DAY, utc));
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let bogus = offset_from_minutes(100_000);
        assert_eq!(day_string(JAN_15_UTC, bogus), "2024-01-15");
    }
}
