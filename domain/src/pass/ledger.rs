use crate::pass::pass_record::StoredPass;
use crate::policy::PassPolicy;
use crate::quarter::Quarter;
use chrono::{Duration, NaiveDateTime};
use domain_shared::store::RowIndex;
use domain_shared::student::StudentName;
use thiserror::Error;
use tracing::instrument;

/// Why a sign-out was refused. Each variant is a distinct user-visible
/// outcome; the first failing check in `evaluate_sign_out` wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignOutRejection {
    #[error("No quarter is currently in session")]
    NoActiveQuarter,
    #[error("The maximum number of students are already out")]
    HallCapacity,
    #[error("All {allowed} passes for this quarter have been used")]
    QuarterLimitReached { used: usize, allowed: usize },
    #[error("A pass is already open for this student")]
    AlreadyOut,
    #[error("A sign-out for this student was just recorded")]
    DuplicateSubmit,
}

/// Number of open passes across the whole store.
pub fn currently_out_count(records: &[StoredPass]) -> usize {
    records.iter().filter(|p| p.record.is_open()).count()
}

/// Passes the student has used in `quarter`: records matching the name whose
/// parsed `Time Out` falls in `[start, end)`. Rows with unparseable
/// timestamps never count.
pub fn passes_used_in_quarter(
    records: &[StoredPass],
    student: &StudentName,
    quarter: &Quarter,
) -> usize {
    records
        .iter()
        .filter(|p| p.record.matches(student))
        .filter_map(|p| p.record.time_out_at())
        .filter(|t| quarter.contains_datetime(*t))
        .count()
}

pub fn has_open_pass(records: &[StoredPass], student: &StudentName) -> bool {
    records
        .iter()
        .any(|p| p.record.is_open() && p.record.matches(student))
}

/// Double-submit guard: any sign-out for the student, open or closed, within
/// the trailing `window`.
pub fn recent_duplicate_sign_out(
    records: &[StoredPass],
    student: &StudentName,
    now: NaiveDateTime,
    window: Duration,
) -> bool {
    records
        .iter()
        .filter(|p| p.record.matches(student))
        .filter_map(|p| p.record.time_out_at())
        .any(|t| t <= now && now - t < window)
}

/// The newest open row for the student, by insertion order. Insertion order
/// is the only ordering the store guarantees, so the scan runs from the end;
/// when a bug or race has left duplicate open rows, the newest one is the
/// pass being closed and older strays are the reclaimer's problem.
#[instrument(level = "trace", skip(records))]
pub fn latest_open_row(records: &[StoredPass], student: &StudentName) -> Option<RowIndex> {
    records
        .iter()
        .rev()
        .find(|p| p.record.is_open() && p.record.matches(student))
        .map(|p| p.row)
}

/// Gate for a new sign-out. Checks run in a fixed order and the first
/// failure is the outcome:
///   1. a quarter must be in session (unless the policy allows otherwise),
///   2. the hall must be under capacity,
///   3. the student must be under the quarterly quota,
///   4. the student must not already be out,
///   5. the request must not be a double submit.
///
/// The caller re-reads the store before calling this and writes after; there
/// is no transactional guard in between, so two concurrent requests can both
/// pass checks 2 and 3.
#[instrument(level = "debug", skip(records, policy))]
pub fn evaluate_sign_out(
    records: &[StoredPass],
    student: &StudentName,
    now: NaiveDateTime,
    active_quarter: Option<&Quarter>,
    policy: &PassPolicy,
) -> Result<(), SignOutRejection> {
    if active_quarter.is_none() && !policy.allow_outside_quarter {
        return Err(SignOutRejection::NoActiveQuarter);
    }

    if currently_out_count(records) >= policy.hall_limit {
        return Err(SignOutRejection::HallCapacity);
    }

    if let Some(quarter) = active_quarter {
        let used = passes_used_in_quarter(records, student, quarter);
        if used >= policy.max_quarter_passes {
            return Err(SignOutRejection::QuarterLimitReached {
                used,
                allowed: policy.max_quarter_passes,
            });
        }
    }

    if has_open_pass(records, student) {
        return Err(SignOutRejection::AlreadyOut);
    }

    let window = Duration::seconds(policy.duplicate_window_seconds);
    if recent_duplicate_sign_out(records, student, now, window) {
        return Err(SignOutRejection::DuplicateSubmit);
    }

    Ok(())
}
