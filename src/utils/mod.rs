//! Utility functions and helpers.

pub mod http;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};

/// Date format used by the result listing (`DD/MM/YYYY`).
pub const RESULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a calendar date the way the result listing prints it.
pub fn format_result_date(date: NaiveDate) -> String {
    date.format(RESULT_DATE_FORMAT).to_string()
}

/// Today's date on the host's local calendar.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Build a fixed UTC offset from minutes, e.g. 330 for IST.
pub fn fixed_offset(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes * 60)
}

/// Express `now` in the given fixed offset.
pub fn in_offset<Tz: TimeZone>(now: &DateTime<Tz>, offset: &FixedOffset) -> DateTime<FixedOffset> {
    now.with_timezone(offset)
}

/// Current instant in the given fixed offset.
pub fn now_in(offset: &FixedOffset) -> DateTime<FixedOffset> {
    in_offset(&Utc::now(), offset)
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn test_format_result_date_pads_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_result_date(date), "07/03/2026");
    }

    #[test]
    fn test_fixed_offset_ist() {
        let ist = fixed_offset(330).unwrap();
        assert_eq!(ist.local_minus_utc(), 19800);
        assert!(fixed_offset(24 * 60).is_none());
    }

    #[test]
    fn test_in_offset_shifts_hour() {
        let ist = fixed_offset(330).unwrap();
        let utc = Utc.with_ymd_and_hms(2026, 10, 16, 1, 30, 0).unwrap();
        let local = in_offset(&utc, &ist);
        assert_eq!(local.hour(), 7);
        assert_eq!(local.minute(), 0);
    }
}
