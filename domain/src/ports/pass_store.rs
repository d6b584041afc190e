use crate::pass::pass_record::{PassRecord, StoredPass};
use async_trait::async_trait;
use domain_shared::store::RowIndex;
use thiserror::Error;

/// Boundary to the external spreadsheet holding the pass rows. The store is
/// the only durable state in the system and offers no transactions; callers
/// re-read the full row set before every decision.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait PassStorePort {
    /// All rows in insertion order. Fully blank rows are dropped; rows
    /// shorter than the header read as empty cells.
    async fn list_records(&self) -> Result<Vec<StoredPass>, PassStoreError>;

    /// Appends one new row after the existing ones.
    async fn append_record(&self, record: &PassRecord) -> Result<(), PassStoreError>;

    /// Writes the `Time In` cell of one existing row. The row handle must
    /// come from a `list_records` call on this same store.
    async fn set_time_in(&self, row: RowIndex, time_in: &str) -> Result<(), PassStoreError>;
}

#[derive(Debug, Error)]
pub enum PassStoreError {
    #[error("Pass store is unavailable")]
    Unavailable,
}
