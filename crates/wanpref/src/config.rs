//! CLI configuration: thin wrapper around `wanpref_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--api-key, --base-url, --timeout).

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use wanpref_core::DashboardConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use wanpref_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
    store_api_key,
};

/// Everything an export run needs from configuration.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub dashboard: DashboardConfig,
    pub output_dir: Option<PathBuf>,
}

/// Translate the active profile + global flags into a `DashboardConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve(cfg: &Config, global: &GlobalOpts) -> Result<Resolved, CliError> {
    let (profile_name, mut profile) = cfg.active_profile(global.profile.as_deref())?;

    // 1. Base URL (flag > env > profile > public endpoint)
    if let Some(ref url) = global.base_url {
        profile.base_url = Some(url.clone());
    }
    let base_url = wanpref_config::resolve_base_url(&profile)?;

    // 2. API key (flag > env > profile chain)
    let api_key = match global.api_key {
        Some(ref key) if !key.is_empty() => SecretString::from(key.clone()),
        _ => wanpref_config::resolve_api_key(&profile, &profile_name)?,
    };

    // 3. Timeout (flag > profile > defaults)
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );

    Ok(Resolved {
        profile_name,
        dashboard: DashboardConfig {
            base_url,
            api_key,
            timeout,
        },
        output_dir: profile.output_dir,
    })
}
