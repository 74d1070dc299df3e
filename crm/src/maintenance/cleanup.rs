use std::path::Path;

use anyhow::Context;
use chrono::{Duration, NaiveDateTime};
use metrics::counter;
use tracing::info;

use crate::maintenance::append_log_line;
use crate::storage::CrmStorage;

/// Customers with no order inside this trailing window are inactive.
pub const INACTIVITY_WINDOW_DAYS: i64 = 365;

pub fn inactivity_cutoff(now: NaiveDateTime) -> NaiveDateTime {
    now - Duration::days(INACTIVITY_WINDOW_DAYS)
}

pub fn cleanup_log_line(now: NaiveDateTime, deleted: u64) -> String {
    format!(
        "{} - Deleted {} inactive customers",
        now.format("%Y-%m-%d %H:%M:%S"),
        deleted
    )
}

/// Delete every inactive customer and record the outcome in the cleanup log.
///
/// A storage failure aborts the run before anything is written, so the log
/// only ever gains a line for completed deletions.
pub async fn run_cleanup(
    storage: &dyn CrmStorage,
    log_path: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<u64> {
    let deleted = storage
        .find_and_delete_inactive_customers(now)
        .await
        .context("failed to delete inactive customers")?;

    append_log_line(log_path, &cleanup_log_line(now, deleted))
        .with_context(|| format!("failed to append to {}", log_path.display()))?;

    counter!("crm_cleanup_deleted_customers_total").increment(deleted);
    info!(deleted, "inactive customer cleanup finished");
    Ok(deleted)
}
