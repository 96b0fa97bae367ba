// ── Domain model ──
//
// Canonical types for one export run. Everything is fetched fresh,
// held for the duration of the export, then dropped.

mod network;
mod uplink;

pub use network::{APPLIANCE, Network, Organization};
pub use uplink::{
    CustomPerformanceClass, Endpoint, NetworkFilter, PerformanceClassKind, PerformanceClassRef,
    RuleKind, TrafficFilter, UplinkConfig, VpnTrafficRule, WanTrafficRule,
};
