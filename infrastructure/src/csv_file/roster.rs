use crate::roster_rows::roster_from_rows;
use async_trait::async_trait;
use csv::ReaderBuilder;
use domain::ports::roster::{RosterError, RosterPort};
use domain::roster::Roster;
use std::path::PathBuf;
use tracing::warn;

/// Roster loaded from a CSV file. Read wholesale on every lookup, same as
/// the sheet-tab variant; nothing is cached between requests.
pub struct CsvRoster {
    path: PathBuf,
}

impl CsvRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RosterPort for CsvRoster {
    async fn list_students(&self) -> Result<Roster, RosterError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| {
                warn!(path = %self.path.display(), "Failed to open roster CSV: {:?}", err);
                RosterError::Unavailable
            })?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|err| {
                warn!(path = %self.path.display(), "Failed to read roster CSV row: {:?}", err);
                RosterError::Unavailable
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(roster_from_rows(&rows))
    }
}
