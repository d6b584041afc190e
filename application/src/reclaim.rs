use chrono::NaiveDateTime;
use domain::pass::pass_record::StoredPass;
use domain::pass::reclaim::stale_open_rows;
use domain::pass::timestamp::format_timestamp;
use domain::ports::pass_store::PassStorePort;
use tracing::{info, instrument, warn};

/// Force-closes every stale open row through the store and mirrors the
/// closes into the in-memory copy, so callers keep working with rows that
/// reflect what was just written. A failed close is logged and skipped; the
/// row stays open and the next sweep retries it.
#[instrument(level = "debug", skip(store, records))]
pub async fn reclaim_stale_passes(
    store: &(dyn PassStorePort + Send + Sync),
    records: &mut [StoredPass],
    now: NaiveDateTime,
    max_minutes: i64,
) -> usize {
    let stale = stale_open_rows(records, now, max_minutes);
    if stale.is_empty() {
        return 0;
    }

    let time_in = format_timestamp(now);
    let mut closed = 0;
    for row in stale {
        match store.set_time_in(row, &time_in).await {
            Ok(()) => {
                if let Some(p) = records.iter_mut().find(|p| p.row == row) {
                    p.record.time_in = time_in.clone();
                }
                closed += 1;
            }
            Err(err) => {
                warn!(row = row.0, error = %err, "Failed to auto-close stale pass");
            }
        }
    }

    if closed > 0 {
        info!(closed, "Auto-closed stale passes");
    }
    closed
}
