use crate::pass::pass_record::StoredPass;
use chrono::{Duration, NaiveDateTime};
use domain_shared::store::RowIndex;
use tracing::instrument;

/// Rows the reclaimer should force-close: open passes whose sign-out time is
/// more than `max_minutes` old. Rows with a blank or malformed `Time Out`
/// are left alone; they cannot be aged and must not kill the sweep.
///
/// Closing every returned row makes a second scan over the same data return
/// nothing, so the sweep is idempotent.
#[instrument(level = "debug", skip(records))]
pub fn stale_open_rows(
    records: &[StoredPass],
    now: NaiveDateTime,
    max_minutes: i64,
) -> Vec<RowIndex> {
    let cutoff = Duration::minutes(max_minutes);
    records
        .iter()
        .filter(|p| p.record.is_open())
        .filter_map(|p| p.record.time_out_at().map(|t| (p.row, t)))
        .filter(|(_, t)| now - *t > cutoff)
        .map(|(row, _)| row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::pass_record::PassRecord;
    use crate::pass::timestamp::format_timestamp;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn pass(row: usize, time_out: &str, time_in: &str) -> StoredPass {
        StoredPass {
            row: RowIndex(row),
            record: PassRecord {
                first_name: "Alice".into(),
                last_name: "Smith".into(),
                period: String::new(),
                teacher: String::new(),
                reason: String::new(),
                time_out: time_out.into(),
                time_in: time_in.into(),
            },
        }
    }

    #[test]
    fn closes_only_over_age_open_rows() {
        let records = vec![
            pass(2, "2025-08-10 09:00:00", ""),                    // 60 min old, stale
            pass(3, "2025-08-10 09:45:00", ""),                    // 15 min old, fine
            pass(4, "2025-08-10 08:00:00", "2025-08-10 08:10:00"), // already closed
        ];
        assert_eq!(stale_open_rows(&records, now(), 30), vec![RowIndex(2)]);
    }

    #[test]
    fn exactly_at_the_cutoff_is_not_stale() {
        let records = vec![pass(2, "2025-08-10 09:30:00", "")];
        assert!(stale_open_rows(&records, now(), 30).is_empty());
    }

    #[test]
    fn malformed_time_out_is_skipped_not_fatal() {
        let records = vec![pass(2, "yesterday-ish", ""), pass(3, "", "")];
        assert!(stale_open_rows(&records, now(), 30).is_empty());
    }

    #[test]
    fn sweep_is_idempotent_once_rows_are_closed() {
        let mut records = vec![
            pass(2, "2025-08-10 08:00:00", ""),
            pass(3, "2025-08-10 08:30:00", ""),
        ];
        let first = stale_open_rows(&records, now(), 30);
        assert_eq!(first.len(), 2);

        for p in &mut records {
            if first.contains(&p.row) {
                p.record.time_in = format_timestamp(now());
            }
        }
        assert!(stale_open_rows(&records, now(), 30).is_empty());
    }
}
