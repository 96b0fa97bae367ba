// ── Uplink selection domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which rule list a rule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RuleKind {
    #[strum(serialize = "WAN")]
    Wan,
    #[strum(serialize = "VPN")]
    Vpn,
}

/// One side of a custom traffic filter.
///
/// Both fields are optional on the wire; which ones must be present
/// depends on the filter's protocol and is checked when mapping rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub cidr: Option<String>,
    pub port: Option<String>,
}

/// Protocol/address filter (`custom` filter type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFilter {
    /// `any`, `tcp`, `udp`, `icmp`, `icmp6`, ...
    pub protocol: String,
    pub source: Endpoint,
    pub destination: Endpoint,
}

/// Internet-traffic uplink preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WanTrafficRule {
    pub preferred_uplink: String,
    pub filter: NetworkFilter,
}

/// What a VPN rule matches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrafficFilter {
    /// `application` or `applicationCategory`.
    Application { id: String, name: String },
    Network(NetworkFilter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PerformanceClassKind {
    Builtin,
    Custom,
}

/// Performance class attached to a VPN rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceClassRef {
    /// Built-in class, e.g. `VoIP`.
    Builtin { name: String },
    /// Reference to a [`CustomPerformanceClass`] by id.
    Custom { id: String },
}

impl PerformanceClassRef {
    pub fn kind(&self) -> PerformanceClassKind {
        match self {
            Self::Builtin { .. } => PerformanceClassKind::Builtin,
            Self::Custom { .. } => PerformanceClassKind::Custom,
        }
    }
}

/// VPN-traffic uplink preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnTrafficRule {
    /// Wire filter type: `application`, `applicationCategory`, `custom`.
    pub filter_type: String,
    pub filter: TrafficFilter,
    pub preferred_uplink: String,
    pub fail_over_criterion: Option<String>,
    pub performance_class: Option<PerformanceClassRef>,
}

/// User-defined latency/jitter/loss thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPerformanceClass {
    pub id: String,
    pub name: String,
    /// Milliseconds.
    pub max_latency: u32,
    /// Milliseconds.
    pub max_jitter: u32,
    /// 0-100.
    pub max_loss_percentage: u32,
}

/// Everything exported for one network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UplinkConfig {
    pub wan_rules: Vec<WanTrafficRule>,
    pub vpn_rules: Vec<VpnTrafficRule>,
    pub performance_classes: Vec<CustomPerformanceClass>,
}
