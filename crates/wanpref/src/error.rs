//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wanpref_config::ConfigError;
use wanpref_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const NO_OPTIONS: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the Dashboard at {url}")]
    #[diagnostic(
        code(wanpref::connection_failed),
        help(
            "Check network access to the Dashboard API.\n\
             URL: {url}\n\
             Override the API root with --base-url if you use a regional endpoint."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(wanpref::timeout),
        help("Increase the timeout with --timeout or in your profile.")
    )]
    Timeout,

    #[error("Rate limited by the Dashboard")]
    #[diagnostic(
        code(wanpref::rate_limited),
        help("Wait {retry_after_secs}s and run again.")
    )]
    RateLimited { retry_after_secs: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(wanpref::auth_failed),
        help(
            "Verify the API key has access to the organization.\n\
             Update it with: wanpref config init"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(wanpref::no_credentials),
        help(
            "Configure a key with: wanpref config init\n\
             Or set the MERAKI_DASHBOARD_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(wanpref::not_found),
        help("Run `wanpref export` without --org/--network to pick from a list.")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("No valid {kind} options to choose from")]
    #[diagnostic(
        code(wanpref::no_options),
        help("The API key sees no {kind} that can be backed up. Nothing was written.")
    )]
    NoValidOptions { kind: String },

    #[error("{kind} selection cancelled")]
    #[diagnostic(code(wanpref::cancelled))]
    Cancelled { kind: String },

    // ── Export ───────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(wanpref::invalid_rule),
        help("The rule cannot be represented in the backup. Nothing was written.")
    )]
    InvalidRule { message: String },

    #[error("Failed to write workbook: {message}")]
    #[diagnostic(code(wanpref::workbook))]
    Workbook { message: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    #[diagnostic(code(wanpref::api_error))]
    ApiError { status: Option<u16>, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wanpref::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wanpref::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wanpref config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(wanpref::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(wanpref::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NoValidOptions { .. } => exit_code::NO_OPTIONS,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::RateLimited { retry_after_secs } => {
                CliError::RateLimited { retry_after_secs }
            }

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },

            err @ CoreError::InvalidRule { .. } => CliError::InvalidRule {
                message: err.to_string(),
            },

            CoreError::NoValidOptions { kind } => CliError::NoValidOptions { kind },

            CoreError::SelectionCancelled { kind } => CliError::Cancelled { kind },

            CoreError::Prompt(e) => CliError::Io(e),

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::Workbook(e) => CliError::Workbook {
                message: e.to_string(),
            },

            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::UnknownProfile { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
