//! Export pipeline between `wanpref-api` and the `wanpref` CLI.
//!
//! This crate owns the domain model and every step of a backup run:
//!
//! - **[`Dashboard`]**: Facade over the API client that lists organizations,
//!   lists appliance networks, and fetches a network's [`UplinkConfig`]
//!   (uplink selection rules plus custom performance classes).
//!
//! - **[`selector`]**: Numbered-list selection with bounds checking and
//!   re-prompting. Answers come from a [`Prompter`], so the logic runs
//!   without a console in tests.
//!
//! - **[`mapper`]**: Pure functions flattening WAN rules, VPN rules, and
//!   performance classes into fixed-width rows of typed [`Cell`]s.
//!
//! - **[`workbook`]**: Writes the three-sheet `.xlsx` backup and reports
//!   per-sheet row counts.
//!
//! Stages pass explicit values to each other; nothing is stored globally.

pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod mapper;
pub mod model;
pub mod selector;
pub mod workbook;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{CoreError, RuleError};
pub use export::export_network;
pub use mapper::{BackupRows, Cell};
pub use selector::{Choice, Prompter, Selection};
pub use workbook::BackupSummary;

pub use wanpref_api::DEFAULT_BASE_URL;

pub use model::{
    CustomPerformanceClass, Endpoint, Network, NetworkFilter, Organization, PerformanceClassRef,
    RuleKind, TrafficFilter, UplinkConfig, VpnTrafficRule, WanTrafficRule,
};
