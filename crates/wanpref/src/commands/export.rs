//! Export handler: pick organization and network, then write the backup.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use wanpref_core::selector::{self, Choice, Prompter, Selection};
use wanpref_core::{CoreError, Dashboard, export_network};

use crate::cli::{ExportArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;
use crate::prompt::ConsolePrompter;

/// Use the preset ID/name when given, otherwise ask.
fn pick(
    options: &[Choice],
    kind: &str,
    preset: Option<&str>,
    prompter: &mut impl Prompter,
) -> Result<Selection, CoreError> {
    match preset {
        Some(needle) => selector::find(options, kind, needle),
        None => selector::select(options, kind, prompter),
    }
}

fn ensure_dir(dir: &Path) -> Result<(), CliError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: "output_dir".into(),
            reason: format!("{} is not a directory", dir.display()),
        })
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    args: ExportArgs,
    profile_dir: Option<PathBuf>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let dir = args
        .output_dir
        .or(profile_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    ensure_dir(&dir)?;

    let mut prompter = ConsolePrompter::from_stdin();

    // ── Organization ────────────────────────────────────────────────
    let orgs = dashboard.organizations().await?;
    let org_choices: Vec<Choice> = orgs.iter().map(Choice::from).collect();
    let org = pick(&org_choices, "organization", args.org.as_deref(), &mut prompter)?;
    debug!(org_id = %org.id, "organization chosen");

    // ── Network ─────────────────────────────────────────────────────
    let networks = dashboard.appliance_networks(&org.id).await?;
    let network_choices: Vec<Choice> = networks.iter().map(Choice::from).collect();
    let network = pick(
        &network_choices,
        "network",
        args.network.as_deref(),
        &mut prompter,
    )?;
    debug!(network_id = %network.id, "network chosen");

    // ── Backup ──────────────────────────────────────────────────────
    let summary = export_network(dashboard, &network.id, &dir, &Local::now()).await?;

    let rendered = output::render_summary(
        global.output,
        &summary,
        output::should_color(global.color),
    )?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
