use crate::roster::Roster;
use async_trait::async_trait;
use thiserror::Error;

/// Secondary dataset mapping student identity to a verification PIN.
/// Re-read on every lookup; nothing is cached.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait RosterPort {
    async fn list_students(&self) -> Result<Roster, RosterError>;
}

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Roster source is unavailable")]
    Unavailable,
}
