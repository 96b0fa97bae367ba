mod cli;
mod commands;
mod config;
mod error;
mod output;
mod prompt;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wanpref_core::Dashboard;

use crate::cli::{Cli, Command, ExportArgs};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries prompts and the summary; logs stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let command = cli
        .command
        .unwrap_or_else(|| Command::Export(ExportArgs::default()));

    match command {
        // Config commands don't need a Dashboard connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "wanpref", &mut std::io::stdout());
            Ok(())
        }

        Command::Export(args) => {
            let cfg = config::load_config()?;
            let resolved = config::resolve(&cfg, &cli.global)?;
            tracing::debug!(
                profile = %resolved.profile_name,
                base_url = %resolved.dashboard.base_url,
                "starting export"
            );
            let dashboard = Dashboard::new(&resolved.dashboard)?;
            commands::export::handle(&dashboard, args, resolved.output_dir, &cli.global).await
        }
    }
}
