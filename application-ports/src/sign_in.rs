use async_trait::async_trait;
use domain_shared::student::StudentName;
use thiserror::Error;

#[async_trait]
pub trait SignInPort {
    /// Closes the newest open pass for the student named "First Last".
    async fn sign_in(&self, full_name: String) -> Result<SignInConfirmed, SignInError>;
}

#[derive(Debug, Clone)]
pub struct SignInConfirmed {
    pub student: StudentName,
    pub time_in: String,
}

#[derive(Debug, Error)]
pub enum SignInError {
    #[error("Please enter your full name as 'First Last'")]
    InvalidName,
    #[error("No active pass found. Did you sign out first?")]
    NoOpenPass,
    #[error("Service is temporarily unavailable. Please try again.")]
    TemporaryUnavailable,
}
