// ── Dashboard facade ──
//
// Thin wrapper over `DashboardClient` that speaks domain types. Every
// call is awaited on its own; the two traffic-shaping reads of a fetch
// run one after the other.

use tracing::{debug, info};

use wanpref_api::{DashboardClient, TransportConfig};

use crate::config::DashboardConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Network, Organization, UplinkConfig};

pub struct Dashboard {
    client: DashboardClient,
}

impl Dashboard {
    /// Build an authenticated client from `config`. No request is sent yet.
    pub fn new(config: &DashboardConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client =
            DashboardClient::from_api_key(config.base_url.as_str(), &config.api_key, &transport)?;
        Ok(Self { client })
    }

    pub fn with_client(client: DashboardClient) -> Self {
        Self { client }
    }

    /// Organizations visible to the API key, in API order.
    pub async fn organizations(&self) -> Result<Vec<Organization>, CoreError> {
        let orgs = self.client.list_organizations().await?;
        debug!(count = orgs.len(), "organizations listed");
        Ok(orgs.into_iter().map(Organization::from).collect())
    }

    /// Networks of `organization_id` that contain an appliance.
    pub async fn appliance_networks(
        &self,
        organization_id: &str,
    ) -> Result<Vec<Network>, CoreError> {
        let all = self.client.list_networks(organization_id).await?;
        let total = all.len();
        let networks: Vec<Network> = all
            .into_iter()
            .map(Network::from)
            .filter(Network::is_appliance)
            .collect();
        debug!(
            organization_id,
            total,
            appliance = networks.len(),
            "networks listed"
        );
        Ok(networks)
    }

    /// Fetch uplink selection rules and custom performance classes.
    ///
    /// Either read failing aborts the fetch.
    pub async fn fetch_uplink_config(&self, network_id: &str) -> Result<UplinkConfig, CoreError> {
        let selection = self.client.get_uplink_selection(network_id).await?;
        let classes = self
            .client
            .list_custom_performance_classes(network_id)
            .await?;

        info!(
            network_id,
            default_uplink = selection.default_uplink.as_deref().unwrap_or("-"),
            load_balancing = ?selection.load_balancing_enabled,
            wan_rules = selection.wan_traffic_uplink_preferences.len(),
            vpn_rules = selection.vpn_traffic_uplink_preferences.len(),
            performance_classes = classes.len(),
            "uplink configuration fetched"
        );

        convert::uplink_config(&selection, classes)
    }
}
