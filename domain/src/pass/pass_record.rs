use crate::pass::timestamp::{format_timestamp, parse_timestamp};
use chrono::NaiveDateTime;
use domain_shared::store::RowIndex;
use domain_shared::student::StudentName;
use tracing::instrument;

/// One row of the pass sheet. Cell values are kept exactly as the store
/// returns them; timestamps are parsed lazily so a malformed cell never
/// aborts a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRecord {
    pub first_name: String,
    pub last_name: String,
    pub period: String,
    pub teacher: String,
    pub reason: String,
    pub time_out: String,
    pub time_in: String,
}

/// A record as read back from the store, carrying the adapter's row handle
/// so a later `set_time_in` can address the same row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPass {
    pub row: RowIndex,
    pub record: PassRecord,
}

#[instrument(level = "trace", skip(period, teacher, reason))]
pub fn create_open_pass(
    student: &StudentName,
    period: String,
    teacher: String,
    reason: String,
    now: NaiveDateTime,
) -> PassRecord {
    PassRecord {
        first_name: student.first.trim().to_string(),
        last_name: student.last.trim().to_string(),
        period,
        teacher,
        reason,
        time_out: format_timestamp(now),
        time_in: String::new(),
    }
}

impl PassRecord {
    /// Open means the student is still out: no time-in recorded yet.
    pub fn is_open(&self) -> bool {
        self.time_in.trim().is_empty()
    }

    pub fn matches(&self, student: &StudentName) -> bool {
        student.matches(&self.first_name, &self.last_name)
    }

    /// Parsed sign-out time, `None` when the cell is blank or malformed.
    pub fn time_out_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.time_out)
    }

    pub fn student(&self) -> StudentName {
        StudentName::new(self.first_name.trim(), self.last_name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn open_is_blank_time_in() {
        let now = NaiveDate::from_ymd_opt(2025, 8, 10)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let student = StudentName::new("Alice", "Smith");
        let mut record = create_open_pass(
            &student,
            "Period 2".into(),
            "J. Clark".into(),
            "Restroom".into(),
            now,
        );
        assert!(record.is_open());
        assert_eq!(record.time_out_at(), Some(now));

        record.time_in = "2025-08-10 10:05:00".into();
        assert!(!record.is_open());
    }

    #[test]
    fn matching_trims_and_ignores_case() {
        let record = PassRecord {
            first_name: " Alice ".into(),
            last_name: "SMITH".into(),
            period: String::new(),
            teacher: String::new(),
            reason: String::new(),
            time_out: String::new(),
            time_in: String::new(),
        };
        assert!(record.matches(&StudentName::new("alice", " smith")));
        assert!(!record.matches(&StudentName::new("alicia", "smith")));
    }
}
