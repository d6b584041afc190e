pub mod columns;

use crate::roster_rows::roster_from_rows;
use crate::sheets::columns::{column_letter, ColumnMap};
use async_trait::async_trait;
use domain::pass::pass_record::{PassRecord, StoredPass};
use domain::ports::pass_store::{PassStoreError, PassStorePort};
use domain::ports::roster::{RosterError, RosterPort};
use domain::roster::Roster;
use domain_shared::store::RowIndex;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{instrument, warn};
use url::Url;

#[derive(Clone, Debug)]
pub struct SheetsClientConfig {
    /// `https://sheets.googleapis.com` unless pointed at a test server.
    pub endpoint: Url,
    pub spreadsheet_id: String,
    /// Ready OAuth bearer token for the spreadsheet scope. Minting and
    /// refreshing it is the deployment's problem, not the adapter's.
    pub token: String,
}

/// Thin client for the spreadsheet `values` API: read a tab, append a row,
/// write one cell. Shared by the pass store and the roster adapter.
pub struct SheetsClient {
    config: SheetsClientConfig,
    http_client: HttpClient,
}

#[derive(Debug, Error)]
pub enum SheetsApiError {
    #[error("Spreadsheet API request failed")]
    RequestFailed,
    #[error("Spreadsheet API response was not understood")]
    BadResponse,
}

#[derive(Deserialize, Debug)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SheetsClient {
    pub fn new(config: SheetsClientConfig) -> Self {
        Self {
            config,
            http_client: HttpClient::new(),
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> String {
        format!(
            "{}v4/spreadsheets/{}/values/{}{}",
            self.config.endpoint, self.config.spreadsheet_id, range, suffix,
        )
    }

    /// All rows of a tab, in sheet order. A tab with no data reads as empty.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_rows(&self, tab: &str) -> Result<Vec<Vec<String>>, SheetsApiError> {
        let body = self
            .http_client
            .get(self.values_url(tab, ""))
            .bearer_auth(&self.config.token)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| {
                warn!("Failed to read sheet values: {:?}", err);
                SheetsApiError::RequestFailed
            })?
            .text()
            .await
            .map_err(|err| {
                warn!("Failed to read sheet response body: {:?}", err);
                SheetsApiError::RequestFailed
            })?;

        let range: ValueRange = serde_json::from_str(&body).map_err(|err| {
            warn!("Failed to parse sheet values: {:?}", err);
            SheetsApiError::BadResponse
        })?;

        Ok(range
            .values
            .iter()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect())
    }

    #[instrument(level = "debug", skip(self, row))]
    pub async fn append_row(&self, tab: &str, row: Vec<String>) -> Result<(), SheetsApiError> {
        self.http_client
            .post(self.values_url(tab, ":append?valueInputOption=RAW"))
            .bearer_auth(&self.config.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| {
                warn!("Failed to append sheet row: {:?}", err);
                SheetsApiError::RequestFailed
            })?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self, value))]
    pub async fn update_cell(
        &self,
        tab: &str,
        cell: &str,
        value: &str,
    ) -> Result<(), SheetsApiError> {
        let range = format!("{tab}!{cell}");
        self.http_client
            .put(self.values_url(&range, "?valueInputOption=RAW"))
            .bearer_auth(&self.config.token)
            .json(&json!({ "values": [[value]] }))
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| {
                warn!("Failed to update sheet cell: {:?}", err);
                SheetsApiError::RequestFailed
            })?;
        Ok(())
    }
}

/// Pass store over one tab of the tracking spreadsheet. Row handles are
/// absolute sheet row numbers (header is row 1, data starts at row 2), so
/// they stay valid even though blank rows are dropped from the listing.
pub struct SheetsPassStore {
    client: SheetsClient,
    tab: String,
}

impl SheetsPassStore {
    pub fn new(client: SheetsClient, tab: impl Into<String>) -> Self {
        Self {
            client,
            tab: tab.into(),
        }
    }
}

#[async_trait]
impl PassStorePort for SheetsPassStore {
    async fn list_records(&self) -> Result<Vec<StoredPass>, PassStoreError> {
        let rows = self
            .client
            .get_rows(&self.tab)
            .await
            .map_err(|_| PassStoreError::Unavailable)?;

        let Some((header, data)) = rows.split_first() else {
            return Ok(Vec::new());
        };
        let map = ColumnMap::resolve(header);

        Ok(data
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(i, row)| StoredPass {
                row: RowIndex(i + 2),
                record: map.record_from_row(row),
            })
            .collect())
    }

    async fn append_record(&self, record: &PassRecord) -> Result<(), PassStoreError> {
        // Header fetch per write: the sheet may have been re-ordered since
        // the last request, and nothing is cached between requests.
        let rows = self
            .client
            .get_rows(&self.tab)
            .await
            .map_err(|_| PassStoreError::Unavailable)?;
        let header: Vec<String> = rows.into_iter().next().unwrap_or_default();
        let map = ColumnMap::resolve(&header);

        self.client
            .append_row(&self.tab, map.row_from_record(record))
            .await
            .map_err(|_| PassStoreError::Unavailable)
    }

    async fn set_time_in(&self, row: RowIndex, time_in: &str) -> Result<(), PassStoreError> {
        let rows = self
            .client
            .get_rows(&self.tab)
            .await
            .map_err(|_| PassStoreError::Unavailable)?;
        let header: Vec<String> = rows.into_iter().next().unwrap_or_default();
        let map = ColumnMap::resolve(&header);

        let cell = format!("{}{}", column_letter(map.time_in()), row.0);
        self.client
            .update_cell(&self.tab, &cell, time_in)
            .await
            .map_err(|_| PassStoreError::Unavailable)
    }
}

/// Roster read from a second tab of the same spreadsheet.
pub struct SheetsRoster {
    client: SheetsClient,
    tab: String,
}

impl SheetsRoster {
    pub fn new(client: SheetsClient, tab: impl Into<String>) -> Self {
        Self {
            client,
            tab: tab.into(),
        }
    }
}

#[async_trait]
impl RosterPort for SheetsRoster {
    async fn list_students(&self) -> Result<Roster, RosterError> {
        let rows = self
            .client
            .get_rows(&self.tab)
            .await
            .map_err(|_| RosterError::Unavailable)?;
        Ok(roster_from_rows(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_read_as_their_digits() {
        assert_eq!(cell_to_string(&json!("0042")), "0042");
        assert_eq!(cell_to_string(&json!(42)), "42");
        assert_eq!(cell_to_string(&Value::Null), "");
    }
}
