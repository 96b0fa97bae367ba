//! Response types for the Dashboard API (v1).
//!
//! All types match the JSON responses of the endpoints this crate calls.
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//! Shapes that vary by rule type (traffic filter values) are modeled with
//! optional fields; `wanpref-core` decides which ones a given rule needs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Organizations ────────────────────────────────────────────────────

/// Organization, from `GET /organizations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

// ── Networks ─────────────────────────────────────────────────────────

/// Network, from `GET /organizations/{organizationId}/networks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub id: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub name: String,
    /// Product families present in the network, e.g. `appliance`, `switch`, `wireless`.
    #[serde(default)]
    pub product_types: Vec<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

// ── Uplink selection ─────────────────────────────────────────────────

/// Uplink selection settings, from
/// `GET /networks/{networkId}/appliance/trafficShaping/uplinkSelection`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UplinkSelectionResponse {
    #[serde(default)]
    pub active_active_auto_vpn_enabled: Option<bool>,
    #[serde(default)]
    pub default_uplink: Option<String>,
    #[serde(default)]
    pub load_balancing_enabled: Option<bool>,
    /// Kept opaque; not exported.
    #[serde(default)]
    pub failover_and_failback: Option<Value>,
    #[serde(default)]
    pub wan_traffic_uplink_preferences: Vec<WanUplinkPreferenceResponse>,
    #[serde(default)]
    pub vpn_traffic_uplink_preferences: Vec<VpnUplinkPreferenceResponse>,
}

/// One internet-traffic uplink preference rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WanUplinkPreferenceResponse {
    #[serde(default)]
    pub traffic_filters: Vec<TrafficFilterResponse>,
    pub preferred_uplink: String,
}

/// One VPN-traffic uplink preference rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnUplinkPreferenceResponse {
    #[serde(default)]
    pub traffic_filters: Vec<TrafficFilterResponse>,
    pub preferred_uplink: String,
    /// `poorPerformance` or `uplinkDown`.
    #[serde(default)]
    pub fail_over_criterion: Option<String>,
    #[serde(default)]
    pub performance_class: Option<PerformanceClassResponse>,
}

/// A traffic filter: `type` selects which `value` fields are populated.
///
/// `application` / `applicationCategory` carry `id` + `name`;
/// `custom` carries `protocol`, `source`, `destination`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficFilterResponse {
    #[serde(rename = "type")]
    pub filter_type: String,
    #[serde(default)]
    pub value: TrafficFilterValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficFilterValue {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub source: Option<EndpointResponse>,
    #[serde(default)]
    pub destination: Option<EndpointResponse>,
}

/// Source or destination of a custom traffic filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointResponse {
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub cidr: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub vlan: Option<Value>,
    #[serde(default)]
    pub host: Option<Value>,
    #[serde(default)]
    pub fqdn: Option<String>,
}

/// Performance class attached to a VPN rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceClassResponse {
    /// `builtin` or `custom`.
    #[serde(rename = "type")]
    pub class_type: String,
    #[serde(default)]
    pub builtin_performance_class_name: Option<String>,
    #[serde(default)]
    pub custom_performance_class_id: Option<String>,
}

// ── Custom performance classes ───────────────────────────────────────

/// Custom performance class, from
/// `GET /networks/{networkId}/appliance/trafficShaping/customPerformanceClasses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPerformanceClassResponse {
    pub custom_performance_class_id: String,
    pub name: String,
    /// Milliseconds.
    pub max_latency: u32,
    /// Milliseconds.
    pub max_jitter: u32,
    /// 0-100.
    pub max_loss_percentage: u32,
}

// ── Errors ───────────────────────────────────────────────────────────

/// Error body shape: `{"errors": ["..."]}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn vpn_rule_with_custom_filter_parses() {
        let rule: VpnUplinkPreferenceResponse = serde_json::from_value(json!({
            "trafficFilters": [{
                "type": "custom",
                "value": {
                    "protocol": "tcp",
                    "source": { "port": "1-1024", "cidr": "192.168.1.0/24", "vlan": 10 },
                    "destination": { "port": "443", "cidr": "any" }
                }
            }],
            "preferredUplink": "bestForVoIP",
            "failOverCriterion": "poorPerformance",
            "performanceClass": {
                "type": "custom",
                "customPerformanceClassId": "123456"
            }
        }))
        .unwrap();

        let filter = &rule.traffic_filters[0];
        assert_eq!(filter.filter_type, "custom");
        assert_eq!(filter.value.protocol.as_deref(), Some("tcp"));
        let source = filter.value.source.as_ref().unwrap();
        assert_eq!(source.port.as_deref(), Some("1-1024"));
        assert_eq!(source.vlan, Some(json!(10)));
        let class = rule.performance_class.unwrap();
        assert_eq!(class.class_type, "custom");
        assert_eq!(class.custom_performance_class_id.as_deref(), Some("123456"));
        assert!(class.builtin_performance_class_name.is_none());
    }

    #[test]
    fn uplink_selection_without_rules_defaults_to_empty() {
        let selection: UplinkSelectionResponse = serde_json::from_value(json!({
            "activeActiveAutoVpnEnabled": true,
            "defaultUplink": "wan1",
            "loadBalancingEnabled": true
        }))
        .unwrap();

        assert!(selection.wan_traffic_uplink_preferences.is_empty());
        assert!(selection.vpn_traffic_uplink_preferences.is_empty());
        assert_eq!(selection.default_uplink.as_deref(), Some("wan1"));
    }
}
