// ── Fetch → map → write ──

use std::path::Path;

use chrono::{DateTime, TimeZone};

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::mapper;
use crate::workbook::{self, BackupSummary};

/// Back up one network's uplink preferences into `dir`.
///
/// Every rule is mapped before the workbook is created, so a fetch or
/// mapping failure leaves no file behind.
pub async fn export_network<Tz>(
    dashboard: &Dashboard,
    network_id: &str,
    dir: &Path,
    at: &DateTime<Tz>,
) -> Result<BackupSummary, CoreError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let config = dashboard.fetch_uplink_config(network_id).await?;
    let rows = mapper::map_all(&config)?;
    workbook::write_backup(&rows, dir, at)
}
