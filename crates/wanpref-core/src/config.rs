// ── Runtime connection configuration ──
//
// Describes *how* to reach the Dashboard. Carries the API key and
// connection tuning, but never touches disk. The CLI resolves profiles
// and flags into a `DashboardConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for talking to the Dashboard API.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// API root, e.g. `https://api.meraki.com/api/v1`.
    pub base_url: Url,
    /// Dashboard API key, sent as a bearer token.
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
}
