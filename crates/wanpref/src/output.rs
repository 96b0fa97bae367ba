//! Output formatting for the export summary: table, JSON, plain.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use wanpref_core::BackupSummary;
use wanpref_core::workbook::{CLASS_SHEET, VPN_SHEET, WAN_SHEET};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Summary rendering ────────────────────────────────────────────────

#[derive(Tabled)]
struct SheetRow {
    #[tabled(rename = "Sheet")]
    sheet: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
}

fn sheet_rows(summary: &BackupSummary) -> [SheetRow; 3] {
    [
        SheetRow {
            sheet: WAN_SHEET,
            rows: summary.wan_rows,
        },
        SheetRow {
            sheet: VPN_SHEET,
            rows: summary.vpn_rows,
        },
        SheetRow {
            sheet: CLASS_SHEET,
            rows: summary.class_rows,
        },
    ]
}

/// Render the summary of a finished backup in the chosen format.
pub fn render_summary(
    format: OutputFormat,
    summary: &BackupSummary,
    color: bool,
) -> Result<String, CliError> {
    let path = summary.path.display().to_string();
    Ok(match format {
        OutputFormat::Table => {
            let table = Table::new(sheet_rows(summary))
                .with(Style::rounded())
                .to_string();
            let headline = if color {
                format!("{} {}", "✓ Backup written to".green(), path.bold())
            } else {
                format!("✓ Backup written to {path}")
            };
            format!("{headline}\n{table}")
        }
        OutputFormat::Json => serde_json::to_string_pretty(summary)?,
        OutputFormat::Plain => path,
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
