// ── Core error types ──
//
// User-facing errors from wanpref-core. Consumers never see raw HTTP or
// JSON failures: the `From<wanpref_api::Error>` impl translates them into
// domain-appropriate variants.

use thiserror::Error;

use crate::model::RuleKind;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the Dashboard at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Dashboard request timed out")]
    Timeout,

    #[error("Rate limited by the Dashboard -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} '{identifier}' not found")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("{kind} uplink preference #{position} cannot be exported: {source}")]
    InvalidRule {
        kind: RuleKind,
        /// 1-based position in the fetched rule list.
        position: usize,
        source: RuleError,
    },

    // ── Selection errors ─────────────────────────────────────────────
    #[error("No valid {kind} options to choose from")]
    NoValidOptions { kind: String },

    #[error("{kind} selection cancelled")]
    SelectionCancelled { kind: String },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] std::io::Error),

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Why a single rule could not be flattened into a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule has no traffic filters")]
    NoTrafficFilters,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("unknown performance class type `{0}`")]
    UnknownPerformanceClassType(String),

    #[error("custom performance class `{0}` is not defined on this network")]
    UnresolvedPerformanceClass(String),

    #[error("custom performance class `{0}` is defined more than once")]
    AmbiguousPerformanceClass(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wanpref_api::Error> for CoreError {
    fn from(err: wanpref_api::Error) -> Self {
        match err {
            wanpref_api::Error::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            wanpref_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            wanpref_api::Error::Api {
                status: 403,
                message,
            } => CoreError::AuthenticationFailed {
                message: format!("Access denied: {message}"),
            },
            wanpref_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            wanpref_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            wanpref_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            wanpref_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            wanpref_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            wanpref_api::Error::RateLimited { retry_after_secs } => {
                CoreError::RateLimited { retry_after_secs }
            }
            wanpref_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response: {message}"),
                status: None,
            },
        }
    }
}
