use application_ports::sign_in::{SignInConfirmed, SignInError, SignInPort};
use async_trait::async_trait;
use chrono::Local;
use domain::pass::ledger::latest_open_row;
use domain::pass::timestamp::format_timestamp;
use domain::ports::pass_store::PassStorePort;
use domain_shared::student::StudentName;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Sign-in use case: close the newest open pass for the named student.
pub struct SignInService {
    pass_store: Arc<dyn PassStorePort + Send + Sync>,
}

impl SignInService {
    #[instrument(level = "trace", skip_all)]
    pub fn new(pass_store: Arc<dyn PassStorePort + Send + Sync>) -> Self {
        Self { pass_store }
    }
}

#[async_trait]
impl SignInPort for SignInService {
    #[instrument(level = "info", skip(self))]
    async fn sign_in(&self, full_name: String) -> Result<SignInConfirmed, SignInError> {
        let student = StudentName::parse_full(&full_name).ok_or(SignInError::InvalidName)?;

        let records = self.pass_store.list_records().await.map_err(|err| {
            warn!(error = %err, "Failed to read pass store");
            SignInError::TemporaryUnavailable
        })?;

        let row = match latest_open_row(&records, &student) {
            Some(row) => row,
            None => {
                info!(student = %student.display(), "Sign-in with no open pass");
                return Err(SignInError::NoOpenPass);
            }
        };

        let time_in = format_timestamp(Local::now().naive_local());
        self.pass_store
            .set_time_in(row, &time_in)
            .await
            .map_err(|err| {
                warn!(error = %err, "Failed to write time-in");
                SignInError::TemporaryUnavailable
            })?;

        info!(student = %student.display(), time_in = %time_in, "Student signed in");

        Ok(SignInConfirmed { student, time_in })
    }
}
