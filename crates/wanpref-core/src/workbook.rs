//! Three-sheet `.xlsx` backup writer.
//!
//! Sheet names and header rows are fixed: a restore tool reads them back
//! by position, so their order must not change.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::mapper::{BackupRows, Cell};

pub const WAN_SHEET: &str = "wanUplinkPreferences";
pub const VPN_SHEET: &str = "vpnUplinkPreferences";
pub const CLASS_SHEET: &str = "customPerformanceClasses";

pub const WAN_HEADERS: [&str; 6] = [
    "Protocol",
    "Source",
    "Src port",
    "Destination",
    "Dst port",
    "Preferred uplink",
];

pub const VPN_HEADERS: [&str; 11] = [
    "Type",
    "Protocol or App ID",
    "Source or App Name",
    "Src port",
    "Destination",
    "Dst port",
    "Preferred uplink",
    "Failover criterion",
    "Performance class type",
    "Performance class name",
    "Performance class ID",
];

pub const CLASS_HEADERS: [&str; 5] = [
    "ID",
    "Name",
    "Max Latency",
    "Max Jitter",
    "Max Loss Percentage",
];

const FILE_PREFIX: &str = "downloaded_rules_workbook_";

/// What was written, for reporting back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupSummary {
    pub path: PathBuf,
    pub wan_rows: usize,
    pub vpn_rows: usize,
    pub class_rows: usize,
}

/// `downloaded_rules_workbook_<YYYY-MM-DDTHHMMSS>.xlsx`
///
/// Second granularity: two runs in the same second produce the same name.
pub fn backup_file_name<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format("%Y-%m-%dT%H:%M:%S").to_string().replace(':', "");
    format!("{FILE_PREFIX}{stamp}.xlsx")
}

fn write_sheet<const N: usize>(
    workbook: &mut Workbook,
    name: &str,
    headers: &[&str; N],
    rows: &[[Cell; N]],
    bold: &Format,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, header) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *header, bold)?;
    }

    for (row_num, row) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(row) {
            match cell {
                Cell::Text(text) => sheet.write_string(row_num, col, text.as_str())?,
                Cell::Number(n) => sheet.write_number(row_num, col, *n)?,
            };
        }
    }

    sheet.autofit();
    debug!(sheet = name, rows = rows.len(), "sheet written");
    Ok(())
}

/// Assemble the in-memory workbook. Nothing touches disk until
/// [`Workbook::save`].
pub fn build_workbook(rows: &BackupRows) -> Result<Workbook, CoreError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    write_sheet(&mut workbook, WAN_SHEET, &WAN_HEADERS, &rows.wan, &bold)?;
    write_sheet(&mut workbook, VPN_SHEET, &VPN_HEADERS, &rows.vpn, &bold)?;
    write_sheet(&mut workbook, CLASS_SHEET, &CLASS_HEADERS, &rows.classes, &bold)?;

    Ok(workbook)
}

/// Build and save the backup into `dir`, named after `at`.
pub fn write_backup<Tz>(
    rows: &BackupRows,
    dir: &Path,
    at: &DateTime<Tz>,
) -> Result<BackupSummary, CoreError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut workbook = build_workbook(rows)?;
    let path = dir.join(backup_file_name(at));
    workbook.save(&path)?;

    let summary = BackupSummary {
        path,
        wan_rows: rows.wan.len(),
        vpn_rows: rows.vpn.len(),
        class_rows: rows.classes.len(),
    };
    info!(
        path = %summary.path.display(),
        wan = summary.wan_rows,
        vpn = summary.vpn_rows,
        classes = summary.class_rows,
        "backup saved"
    );
    Ok(summary)
}
