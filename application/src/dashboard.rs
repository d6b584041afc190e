use crate::reclaim::reclaim_stale_passes;
use application_ports::dashboard::{
    CurrentlyOutView, DashboardError, DashboardPort, OpenPassView, QuarterUsage, StudentListView,
    StudentPassCount,
};
use async_trait::async_trait;
use chrono::Local;
use domain::pass::ledger::passes_used_in_quarter;
use domain::pass::pass_record::StoredPass;
use domain::policy::PassPolicy;
use domain::ports::pass_store::PassStorePort;
use domain::quarter::QuarterCalendar;
use domain_shared::student::StudentName;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Read-side service: staff views and the home-page quota lookup. The
/// stale-pass sweep runs before each of these reads, never on a schedule.
pub struct DashboardService {
    pass_store: Arc<dyn PassStorePort + Send + Sync>,
    calendar: QuarterCalendar,
    policy: PassPolicy,
}

impl DashboardService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        pass_store: Arc<dyn PassStorePort + Send + Sync>,
        calendar: QuarterCalendar,
        policy: PassPolicy,
    ) -> Self {
        Self {
            pass_store,
            calendar,
            policy,
        }
    }

    async fn load_and_reclaim(&self) -> Result<Vec<StoredPass>, DashboardError> {
        let mut records = self.pass_store.list_records().await.map_err(|err| {
            warn!(error = %err, "Failed to read pass store");
            DashboardError::TemporaryUnavailable
        })?;
        let now = Local::now().naive_local();
        reclaim_stale_passes(
            self.pass_store.as_ref(),
            &mut records,
            now,
            self.policy.stale_after_minutes,
        )
        .await;
        Ok(records)
    }
}

/// All-time sign-out totals per student, ordered by display name.
fn pass_counts(records: &[StoredPass]) -> Vec<StudentPassCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for p in records {
        let name = p.record.student().display();
        if name.trim().is_empty() {
            continue;
        }
        *counts.entry(name).or_insert(0) += 1;
    }
    let mut counts: Vec<StudentPassCount> = counts
        .into_iter()
        .map(|(name, total)| StudentPassCount { name, total })
        .collect();
    counts.sort_by(|a, b| a.name.cmp(&b.name));
    counts
}

#[async_trait]
impl DashboardPort for DashboardService {
    #[instrument(level = "info", skip(self))]
    async fn currently_out(&self) -> Result<CurrentlyOutView, DashboardError> {
        let records = self.load_and_reclaim().await?;

        let open = records
            .iter()
            .filter(|p| p.record.is_open())
            .map(|p| OpenPassView {
                first_name: p.record.first_name.clone(),
                last_name: p.record.last_name.clone(),
                period: p.record.period.clone(),
                teacher: p.record.teacher.clone(),
                reason: p.record.reason.clone(),
                time_out: p.record.time_out.clone(),
            })
            .collect();

        Ok(CurrentlyOutView {
            open,
            counts: pass_counts(&records),
        })
    }

    #[instrument(level = "info", skip(self))]
    async fn student_list(&self) -> Result<StudentListView, DashboardError> {
        let records = self.pass_store.list_records().await.map_err(|err| {
            warn!(error = %err, "Failed to read pass store");
            DashboardError::TemporaryUnavailable
        })?;
        let today = Local::now().date_naive();

        Ok(StudentListView {
            counts: pass_counts(&records),
            active_quarter: self
                .calendar
                .active_quarter(today)
                .map(|q| q.name.clone()),
        })
    }

    #[instrument(level = "info", skip(self))]
    async fn quarter_usage(&self, student: StudentName) -> Result<QuarterUsage, DashboardError> {
        let records = self.load_and_reclaim().await?;
        let today = Local::now().date_naive();
        let quarter = self.calendar.active_quarter(today);

        Ok(QuarterUsage {
            used: quarter
                .map(|q| passes_used_in_quarter(&records, &student, q))
                .unwrap_or(0),
            allowed: self.policy.max_quarter_passes,
            active_quarter: quarter.map(|q| q.name.clone()),
            student,
        })
    }

    #[instrument(level = "info", skip(self))]
    async fn reclaim_stale(&self) -> Result<usize, DashboardError> {
        let mut records = self.pass_store.list_records().await.map_err(|err| {
            warn!(error = %err, "Failed to read pass store");
            DashboardError::TemporaryUnavailable
        })?;
        let now = Local::now().naive_local();
        Ok(reclaim_stale_passes(
            self.pass_store.as_ref(),
            &mut records,
            now,
            self.policy.stale_after_minutes,
        )
        .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::pass::pass_record::PassRecord;
    use domain::pass::timestamp::format_timestamp;
    use domain::ports::pass_store::MockPassStorePort;
    use domain_shared::store::RowIndex;

    fn pass_at(row: usize, first: &str, minutes_ago: i64, time_in: &str) -> StoredPass {
        let time_out = Local::now().naive_local() - Duration::minutes(minutes_ago);
        StoredPass {
            row: RowIndex(row),
            record: PassRecord {
                first_name: first.into(),
                last_name: "Reyes".into(),
                period: "Period 5".into(),
                teacher: "N. Hart".into(),
                reason: "Locker".into(),
                time_out: format_timestamp(time_out),
                time_in: time_in.into(),
            },
        }
    }

    #[tokio::test]
    async fn dashboard_closes_stale_rows_before_listing() {
        let mut store = MockPassStorePort::new();
        store.expect_list_records().returning(|| {
            Ok(vec![
                pass_at(2, "Dana", 90, ""), // stale
                pass_at(3, "Eli", 5, ""),   // still legitimately out
            ])
        });
        store
            .expect_set_time_in()
            .withf(|row, _| *row == RowIndex(2))
            .once()
            .returning(|_, _| Ok(()));

        let service = DashboardService::new(
            Arc::new(store),
            QuarterCalendar::for_school_year_containing(Local::now().date_naive()),
            PassPolicy::default(),
        );
        let view = service.currently_out().await.unwrap();
        assert_eq!(view.open.len(), 1);
        assert_eq!(view.open[0].first_name, "Eli");
        // both students still appear in the all-time counts
        assert_eq!(view.counts.len(), 2);
    }

    #[tokio::test]
    async fn reclaim_reports_zero_when_nothing_is_stale() {
        let mut store = MockPassStorePort::new();
        store
            .expect_list_records()
            .returning(|| Ok(vec![pass_at(2, "Dana", 5, "")]));
        store.expect_set_time_in().never();

        let service = DashboardService::new(
            Arc::new(store),
            QuarterCalendar::for_school_year_containing(Local::now().date_naive()),
            PassPolicy::default(),
        );
        assert_eq!(service.reclaim_stale().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_close_leaves_the_row_for_the_next_sweep() {
        let mut store = MockPassStorePort::new();
        store
            .expect_list_records()
            .returning(|| Ok(vec![pass_at(2, "Dana", 90, "")]));
        store
            .expect_set_time_in()
            .returning(|_, _| Err(domain::ports::pass_store::PassStoreError::Unavailable));

        let service = DashboardService::new(
            Arc::new(store),
            QuarterCalendar::for_school_year_containing(Local::now().date_naive()),
            PassPolicy::default(),
        );
        // the sweep itself must not fail the request
        assert_eq!(service.reclaim_stale().await.unwrap(), 0);
    }
}
