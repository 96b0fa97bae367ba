//! Clap derive structures for the `wanpref` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wanpref -- back up a network's uplink preferences to Excel
#[derive(Debug, Parser)]
#[command(
    name = "wanpref",
    version,
    about = "Back up Dashboard WAN/VPN uplink preferences to an Excel workbook",
    long_about = "Exports one network's WAN and VPN uplink selection rules and its\n\
        custom performance classes to a three-sheet .xlsx workbook.\n\n\
        With no subcommand, runs `export` and asks which organization and\n\
        network to back up.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "WANPREF_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Dashboard API key
    #[arg(
        long,
        env = "MERAKI_DASHBOARD_API_KEY",
        global = true,
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Dashboard API root (overrides profile)
    #[arg(long, env = "WANPREF_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "WANPREF_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Summary output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Workbook path only (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export uplink preferences of one network (default)
    #[command(alias = "x")]
    Export(ExportArgs),

    /// Manage configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Export ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Args)]
pub struct ExportArgs {
    /// Organization ID or name (skips the organization prompt)
    #[arg(long)]
    pub org: Option<String>,

    /// Network ID or name (skips the network prompt)
    #[arg(long)]
    pub network: Option<String>,

    /// Directory to write the workbook into (default: profile, then cwd)
    #[arg(long, short = 'd')]
    pub output_dir: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Print the configuration file path
    Path,

    /// Show the current configuration (secrets redacted)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
