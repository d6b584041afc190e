use chrono::NaiveDateTime;

/// Wire format for `Time Out` / `Time In` cells. Local time, no offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Lenient parse: whitespace is trimmed, anything unparseable is `None`.
/// Rows with malformed timestamps are skipped by the callers, never fatal.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn round_trips_the_sheet_format() {
        let t = ts(2025, 8, 10, 9, 41, 7);
        assert_eq!(format_timestamp(t), "2025-08-10 09:41:07");
        assert_eq!(parse_timestamp("2025-08-10 09:41:07"), Some(t));
    }

    #[test]
    fn parse_tolerates_padding_and_rejects_garbage() {
        assert!(parse_timestamp("  2025-08-10 09:41:07 ").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("8/10/2025 9:41").is_none());
        assert!(parse_timestamp("not a time").is_none());
    }
}
