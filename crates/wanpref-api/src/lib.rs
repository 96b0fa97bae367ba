// wanpref-api: Async Rust client for the cloud Dashboard API (v1)

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{DEFAULT_BASE_URL, DashboardClient};
pub use error::Error;
pub use transport::TransportConfig;
