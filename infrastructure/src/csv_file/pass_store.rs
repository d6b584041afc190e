use crate::sheets::columns::{ColumnMap, CANONICAL_HEADER};
use async_trait::async_trait;
use csv::{ReaderBuilder, WriterBuilder};
use domain::pass::pass_record::{PassRecord, StoredPass};
use domain::ports::pass_store::{PassStoreError, PassStorePort};
use domain_shared::store::RowIndex;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::warn;

/// Local-file fallback for the pass store: the same sheet layout in a CSV
/// next to the app. Single-writer; sign-in rewrites the whole file, which is
/// the same trick the spreadsheet-less deployments always used.
pub struct CsvPassStore {
    path: PathBuf,
}

impl CsvPassStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_rows(&self) -> Result<Vec<Vec<String>>, PassStoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| {
                warn!(path = %self.path.display(), "Failed to open pass CSV: {:?}", err);
                PassStoreError::Unavailable
            })?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|err| {
                warn!(path = %self.path.display(), "Failed to read pass CSV row: {:?}", err);
                PassStoreError::Unavailable
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[Vec<String>]) -> Result<(), PassStoreError> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|err| {
                warn!(path = %self.path.display(), "Failed to open pass CSV for writing: {:?}", err);
                PassStoreError::Unavailable
            })?;
        for row in rows {
            writer.write_record(row).map_err(|err| {
                warn!(path = %self.path.display(), "Failed to write pass CSV row: {:?}", err);
                PassStoreError::Unavailable
            })?;
        }
        writer.flush().map_err(|err| {
            warn!(path = %self.path.display(), "Failed to flush pass CSV: {:?}", err);
            PassStoreError::Unavailable
        })
    }
}

fn canonical_header_row() -> Vec<String> {
    CANONICAL_HEADER.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl PassStorePort for CsvPassStore {
    async fn list_records(&self) -> Result<Vec<StoredPass>, PassStoreError> {
        let rows = self.read_rows()?;
        let Some((header, data)) = rows.split_first() else {
            return Ok(Vec::new());
        };
        let map = ColumnMap::resolve(header);

        // Row handles are file positions below the header, blanks included,
        // so set_time_in can address the row without re-deriving anything.
        Ok(data
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(i, row)| StoredPass {
                row: RowIndex(i),
                record: map.record_from_row(row),
            })
            .collect())
    }

    async fn append_record(&self, record: &PassRecord) -> Result<(), PassStoreError> {
        if !self.path.exists() {
            self.write_rows(&[canonical_header_row()])?;
        }
        let header = self.read_rows()?.into_iter().next().unwrap_or_default();
        let map = ColumnMap::resolve(&header);

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|err| {
                warn!(path = %self.path.display(), "Failed to open pass CSV for append: {:?}", err);
                PassStoreError::Unavailable
            })?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        writer.write_record(map.row_from_record(record)).map_err(|err| {
            warn!(path = %self.path.display(), "Failed to append pass CSV row: {:?}", err);
            PassStoreError::Unavailable
        })?;
        writer.flush().map_err(|err| {
            warn!(path = %self.path.display(), "Failed to flush pass CSV: {:?}", err);
            PassStoreError::Unavailable
        })
    }

    async fn set_time_in(&self, row: RowIndex, time_in: &str) -> Result<(), PassStoreError> {
        let mut rows = self.read_rows()?;
        let Some((header, _)) = rows.split_first() else {
            warn!(path = %self.path.display(), "Pass CSV vanished between read and write");
            return Err(PassStoreError::Unavailable);
        };
        let time_in_col = ColumnMap::resolve(header).time_in();

        let file_row = row.0 + 1;
        let Some(cells) = rows.get_mut(file_row) else {
            warn!(
                path = %self.path.display(),
                row = row.0,
                "Pass CSV row disappeared before time-in update",
            );
            return Err(PassStoreError::Unavailable);
        };
        if cells.len() <= time_in_col {
            cells.resize(time_in_col + 1, String::new());
        }
        cells[time_in_col] = time_in.to_string();

        self.write_rows(&rows)
    }
}
