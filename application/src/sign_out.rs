use application_ports::sign_out::{SignOutAccepted, SignOutError, SignOutPort, SignOutRequest};
use async_trait::async_trait;
use chrono::Local;
use domain::pass::ledger::{evaluate_sign_out, passes_used_in_quarter, SignOutRejection};
use domain::pass::pass_record::create_open_pass;
use domain::policy::PassPolicy;
use domain::ports::pass_store::PassStorePort;
use domain::ports::roster::RosterPort;
use domain::quarter::QuarterCalendar;
use domain::roster::verify_pin;
use domain_shared::student::StudentName;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Sign-out use case: validate the form, gate on the roster PIN when
/// enabled, evaluate the ledger policy against a fresh read of the store,
/// and append the open row.
///
/// The capacity and quota checks are check-then-act over the remote store
/// with nothing serializing concurrent requests; two sign-outs racing each
/// other can both be admitted. Inherited from the source system.
pub struct SignOutService {
    pass_store: Arc<dyn PassStorePort + Send + Sync>,
    roster: Option<Arc<dyn RosterPort + Send + Sync>>,
    calendar: QuarterCalendar,
    policy: PassPolicy,
}

impl SignOutService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(
        pass_store: Arc<dyn PassStorePort + Send + Sync>,
        roster: Option<Arc<dyn RosterPort + Send + Sync>>,
        calendar: QuarterCalendar,
        policy: PassPolicy,
    ) -> Self {
        Self {
            pass_store,
            roster,
            calendar,
            policy,
        }
    }

    async fn check_pin(&self, student: &StudentName, pin: Option<&str>) -> Result<(), SignOutError> {
        if !self.policy.pin_required {
            return Ok(());
        }
        let pin = match pin.map(str::trim) {
            Some(pin) if !pin.is_empty() => pin,
            _ => return Err(SignOutError::MissingField("PIN")),
        };
        let roster_port = self.roster.as_ref().ok_or_else(|| {
            warn!("PIN validation enabled but no roster source is configured");
            SignOutError::TemporaryUnavailable
        })?;
        let roster = roster_port.list_students().await.map_err(|err| {
            warn!(error = %err, "Failed to load roster");
            SignOutError::TemporaryUnavailable
        })?;
        if verify_pin(&roster, student, pin) {
            Ok(())
        } else {
            warn!(student = %student.display(), "PIN check failed");
            Err(SignOutError::InvalidPin)
        }
    }
}

#[async_trait]
impl SignOutPort for SignOutService {
    #[instrument(level = "info", skip(self, request))]
    async fn sign_out(&self, request: SignOutRequest) -> Result<SignOutAccepted, SignOutError> {
        let first = request.first_name.trim();
        let last = request.last_name.trim();
        let period = request.period.trim();
        let teacher = request.teacher.trim();
        let reason = request.reason.trim();

        if first.is_empty() {
            return Err(SignOutError::MissingField("first name"));
        }
        if last.is_empty() {
            return Err(SignOutError::MissingField("last name"));
        }
        if period.is_empty() {
            return Err(SignOutError::MissingField("period"));
        }
        if teacher.is_empty() {
            return Err(SignOutError::MissingField("teacher"));
        }
        if reason.is_empty() {
            return Err(SignOutError::MissingField("reason"));
        }

        let other_reason = request.other_reason.as_deref().map(str::trim).unwrap_or("");
        let final_reason = if reason == "Other" && !other_reason.is_empty() {
            other_reason
        } else {
            reason
        };

        let student = StudentName::new(first, last);
        self.check_pin(&student, request.pin.as_deref()).await?;

        let records = self.pass_store.list_records().await.map_err(|err| {
            warn!(error = %err, "Failed to read pass store");
            SignOutError::TemporaryUnavailable
        })?;

        let now = Local::now().naive_local();
        let active_quarter = self.calendar.active_quarter(now.date());

        evaluate_sign_out(&records, &student, now, active_quarter, &self.policy).map_err(
            |rejection| {
                info!(
                    student = %student.display(),
                    rejection = %rejection,
                    "Sign-out refused",
                );
                match rejection {
                    SignOutRejection::NoActiveQuarter => SignOutError::NoActiveQuarter,
                    SignOutRejection::HallCapacity => SignOutError::HallCapacity,
                    SignOutRejection::QuarterLimitReached { used, allowed } => {
                        SignOutError::QuarterLimitReached { used, allowed }
                    }
                    SignOutRejection::AlreadyOut => SignOutError::AlreadyOut,
                    SignOutRejection::DuplicateSubmit => SignOutError::DuplicateSubmit,
                }
            },
        )?;

        let used_before = active_quarter
            .map(|q| passes_used_in_quarter(&records, &student, q))
            .unwrap_or(0);

        let record = create_open_pass(
            &student,
            period.to_string(),
            teacher.to_string(),
            final_reason.to_string(),
            now,
        );
        self.pass_store.append_record(&record).await.map_err(|err| {
            warn!(error = %err, "Failed to append pass record");
            SignOutError::TemporaryUnavailable
        })?;

        info!(
            student = %student.display(),
            reason = final_reason,
            used_this_quarter = used_before + 1,
            "Student signed out",
        );

        Ok(SignOutAccepted {
            student,
            used_this_quarter: used_before + 1,
            allowed_per_quarter: self.policy.max_quarter_passes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application_ports::sign_out::SignOutError;
    use domain::pass::pass_record::{PassRecord, StoredPass};
    use domain::pass::timestamp::format_timestamp;
    use domain::ports::pass_store::MockPassStorePort;
    use domain::ports::roster::MockRosterPort;
    use domain::roster::{Roster, RosterEntry};
    use domain_shared::store::RowIndex;

    fn request(first: &str, last: &str) -> SignOutRequest {
        SignOutRequest {
            first_name: first.into(),
            last_name: last.into(),
            period: "Period 2".into(),
            teacher: "J. Clark".into(),
            reason: "Restroom".into(),
            other_reason: None,
            pin: None,
        }
    }

    fn open_pass(row: usize, first: &str, last: &str) -> StoredPass {
        StoredPass {
            row: RowIndex(row),
            record: PassRecord {
                first_name: first.into(),
                last_name: last.into(),
                period: "Period 2".into(),
                teacher: "J. Clark".into(),
                reason: "Restroom".into(),
                time_out: format_timestamp(Local::now().naive_local()),
                time_in: String::new(),
            },
        }
    }

    fn service(store: MockPassStorePort, policy: PassPolicy) -> SignOutService {
        let today = Local::now().date_naive();
        SignOutService::new(
            Arc::new(store),
            None,
            QuarterCalendar::for_school_year_containing(today),
            policy,
        )
    }

    #[tokio::test]
    async fn appends_a_row_on_accept() {
        let mut store = MockPassStorePort::new();
        store.expect_list_records().returning(|| Ok(vec![]));
        store
            .expect_append_record()
            .withf(|record| {
                record.first_name == "Carol" && record.reason == "Restroom" && record.is_open()
            })
            .once()
            .returning(|_| Ok(()));

        let accepted = service(store, PassPolicy::default())
            .sign_out(request("Carol", "Diaz"))
            .await
            .unwrap();
        assert_eq!(accepted.used_this_quarter, 1);
        assert_eq!(accepted.allowed_per_quarter, 18);
    }

    #[tokio::test]
    async fn full_hall_rejects_without_writing() {
        let mut store = MockPassStorePort::new();
        store.expect_list_records().returning(|| {
            Ok(vec![
                open_pass(2, "Alice", "Smith"),
                open_pass(3, "Bob", "Jones"),
            ])
        });
        store.expect_append_record().never();

        let policy = PassPolicy {
            hall_limit: 2,
            ..PassPolicy::default()
        };
        let err = service(store, policy)
            .sign_out(request("Carol", "Diaz"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignOutError::HallCapacity));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_store_access() {
        let mut store = MockPassStorePort::new();
        store.expect_list_records().never();

        let mut req = request("Carol", "Diaz");
        req.teacher = "   ".into();
        let err = service(store, PassPolicy::default())
            .sign_out(req)
            .await
            .unwrap_err();
        assert!(matches!(err, SignOutError::MissingField("teacher")));
    }

    #[tokio::test]
    async fn other_reason_text_replaces_the_placeholder() {
        let mut store = MockPassStorePort::new();
        store.expect_list_records().returning(|| Ok(vec![]));
        store
            .expect_append_record()
            .withf(|record| record.reason == "Band practice")
            .once()
            .returning(|_| Ok(()));

        let mut req = request("Carol", "Diaz");
        req.reason = "Other".into();
        req.other_reason = Some(" Band practice ".into());
        service(store, PassPolicy::default())
            .sign_out(req)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn pin_gate_blocks_mismatch_and_missing_pin() {
        let roster_rows = || {
            let mut roster = Roster::new();
            roster.insert(
                StudentName::new("Carol", "Diaz").key(),
                RosterEntry {
                    pin: "4217".into(),
                    active: true,
                },
            );
            roster
        };

        let mut store = MockPassStorePort::new();
        store.expect_list_records().never();
        let mut roster = MockRosterPort::new();
        roster.expect_list_students().returning(move || Ok(roster_rows()));

        let policy = PassPolicy {
            pin_required: true,
            ..PassPolicy::default()
        };
        let today = Local::now().date_naive();
        let service = SignOutService::new(
            Arc::new(store),
            Some(Arc::new(roster)),
            QuarterCalendar::for_school_year_containing(today),
            policy,
        );

        let mut req = request("Carol", "Diaz");
        req.pin = Some("9999".into());
        assert!(matches!(
            service.sign_out(req).await.unwrap_err(),
            SignOutError::InvalidPin,
        ));

        let mut req = request("Carol", "Diaz");
        req.pin = None;
        assert!(matches!(
            service.sign_out(req).await.unwrap_err(),
            SignOutError::MissingField("PIN"),
        ));
    }
}
