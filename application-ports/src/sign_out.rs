use async_trait::async_trait;
use domain_shared::student::StudentName;
use thiserror::Error;

#[async_trait]
pub trait SignOutPort {
    async fn sign_out(&self, request: SignOutRequest) -> Result<SignOutAccepted, SignOutError>;
}

/// Raw form submission. Fields arrive untrimmed; validation happens in the
/// service before any store access.
#[derive(Debug, Clone)]
pub struct SignOutRequest {
    pub first_name: String,
    pub last_name: String,
    pub period: String,
    pub teacher: String,
    pub reason: String,
    /// Free-text override used when `reason` is "Other".
    pub other_reason: Option<String>,
    pub pin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignOutAccepted {
    pub student: StudentName,
    /// Passes used in the active quarter, counting this one.
    pub used_this_quarter: usize,
    pub allowed_per_quarter: usize,
}

#[derive(Debug, Error)]
pub enum SignOutError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("Name and PIN do not match our records")]
    InvalidPin,
    #[error("No quarter is currently in session")]
    NoActiveQuarter,
    #[error("The maximum number of students are already out. Please wait.")]
    HallCapacity,
    #[error("You have used all {allowed} passes for this quarter.")]
    QuarterLimitReached { used: usize, allowed: usize },
    #[error("You already have an open pass. Sign back in first.")]
    AlreadyOut,
    #[error("That sign-out was already recorded a moment ago.")]
    DuplicateSubmit,
    #[error("Service is temporarily unavailable. Please try again.")]
    TemporaryUnavailable,
}
