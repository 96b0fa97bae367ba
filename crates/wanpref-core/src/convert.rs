// ── API-to-domain type conversions ──
//
// Bridges raw `wanpref_api` response types into canonical domain types.
// Rule conversions are fallible: they pick the filter variant from the
// wire `type` and reject shapes that carry no usable filter. Fields whose
// necessity depends on the protocol (ports, cidrs) are left optional here
// and enforced by the row mapper.

use tracing::warn;

use wanpref_api::types::{
    CustomPerformanceClassResponse, EndpointResponse, NetworkResponse, OrganizationResponse,
    PerformanceClassResponse, TrafficFilterResponse, UplinkSelectionResponse,
    VpnUplinkPreferenceResponse, WanUplinkPreferenceResponse,
};

use crate::error::{CoreError, RuleError};
use crate::model::{
    CustomPerformanceClass, Endpoint, Network, NetworkFilter, Organization, PerformanceClassKind,
    PerformanceClassRef, RuleKind, TrafficFilter, UplinkConfig, VpnTrafficRule, WanTrafficRule,
};

// ── Organizations & networks ─────────────────────────────────────────

impl From<OrganizationResponse> for Organization {
    fn from(o: OrganizationResponse) -> Self {
        Self {
            id: o.id,
            name: o.name,
        }
    }
}

impl From<NetworkResponse> for Network {
    fn from(n: NetworkResponse) -> Self {
        Self {
            id: n.id,
            name: n.name,
            product_types: n.product_types,
        }
    }
}

// ── Traffic filters ──────────────────────────────────────────────────

impl From<&EndpointResponse> for Endpoint {
    fn from(e: &EndpointResponse) -> Self {
        Self {
            cidr: e.cidr.clone(),
            port: e.port.clone(),
        }
    }
}

/// The rule's filter: first entry of `trafficFilters`.
///
/// Rules carry a single filter in practice; any extras are logged and
/// left out of the backup.
fn primary_filter(
    kind: RuleKind,
    filters: &[TrafficFilterResponse],
) -> Result<&TrafficFilterResponse, RuleError> {
    let (first, rest) = filters.split_first().ok_or(RuleError::NoTrafficFilters)?;
    if !rest.is_empty() {
        warn!(
            %kind,
            dropped = rest.len(),
            filter_type = %first.filter_type,
            "rule has more than one traffic filter; exporting the first"
        );
    }
    Ok(first)
}

fn network_filter(filter: &TrafficFilterResponse) -> Result<NetworkFilter, RuleError> {
    let value = &filter.value;
    let protocol = value
        .protocol
        .clone()
        .ok_or(RuleError::MissingField("trafficFilters.value.protocol"))?;
    Ok(NetworkFilter {
        protocol,
        source: value.source.as_ref().map(Endpoint::from).unwrap_or_default(),
        destination: value
            .destination
            .as_ref()
            .map(Endpoint::from)
            .unwrap_or_default(),
    })
}

/// Application filters are the ones whose type mentions "application"
/// (`application`, `applicationCategory`).
pub fn is_application_filter(filter_type: &str) -> bool {
    filter_type.contains("application")
}

impl TryFrom<&TrafficFilterResponse> for TrafficFilter {
    type Error = RuleError;

    fn try_from(filter: &TrafficFilterResponse) -> Result<Self, Self::Error> {
        if is_application_filter(&filter.filter_type) {
            let id = filter
                .value
                .id
                .clone()
                .ok_or(RuleError::MissingField("trafficFilters.value.id"))?;
            let name = filter
                .value
                .name
                .clone()
                .ok_or(RuleError::MissingField("trafficFilters.value.name"))?;
            Ok(Self::Application { id, name })
        } else {
            network_filter(filter).map(Self::Network)
        }
    }
}

// ── Performance classes ──────────────────────────────────────────────

impl TryFrom<&PerformanceClassResponse> for PerformanceClassRef {
    type Error = RuleError;

    fn try_from(pc: &PerformanceClassResponse) -> Result<Self, Self::Error> {
        let kind: PerformanceClassKind = pc
            .class_type
            .parse()
            .map_err(|_| RuleError::UnknownPerformanceClassType(pc.class_type.clone()))?;
        match kind {
            PerformanceClassKind::Builtin => Ok(Self::Builtin {
                name: pc.builtin_performance_class_name.clone().ok_or(
                    RuleError::MissingField("performanceClass.builtinPerformanceClassName"),
                )?,
            }),
            PerformanceClassKind::Custom => Ok(Self::Custom {
                id: pc.custom_performance_class_id.clone().ok_or(
                    RuleError::MissingField("performanceClass.customPerformanceClassId"),
                )?,
            }),
        }
    }
}

impl From<CustomPerformanceClassResponse> for CustomPerformanceClass {
    fn from(pc: CustomPerformanceClassResponse) -> Self {
        Self {
            id: pc.custom_performance_class_id,
            name: pc.name,
            max_latency: pc.max_latency,
            max_jitter: pc.max_jitter,
            max_loss_percentage: pc.max_loss_percentage,
        }
    }
}

// ── Rules ────────────────────────────────────────────────────────────

impl TryFrom<&WanUplinkPreferenceResponse> for WanTrafficRule {
    type Error = RuleError;

    fn try_from(rule: &WanUplinkPreferenceResponse) -> Result<Self, Self::Error> {
        let filter = primary_filter(RuleKind::Wan, &rule.traffic_filters)?;
        Ok(Self {
            preferred_uplink: rule.preferred_uplink.clone(),
            filter: network_filter(filter)?,
        })
    }
}

impl TryFrom<&VpnUplinkPreferenceResponse> for VpnTrafficRule {
    type Error = RuleError;

    fn try_from(rule: &VpnUplinkPreferenceResponse) -> Result<Self, Self::Error> {
        let filter = primary_filter(RuleKind::Vpn, &rule.traffic_filters)?;
        Ok(Self {
            filter_type: filter.filter_type.clone(),
            filter: TrafficFilter::try_from(filter)?,
            preferred_uplink: rule.preferred_uplink.clone(),
            fail_over_criterion: rule.fail_over_criterion.clone(),
            performance_class: rule
                .performance_class
                .as_ref()
                .map(PerformanceClassRef::try_from)
                .transpose()?,
        })
    }
}

fn convert_rules<'a, W, T>(
    kind: RuleKind,
    rules: &'a [W],
) -> Result<Vec<T>, CoreError>
where
    T: TryFrom<&'a W, Error = RuleError>,
{
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            T::try_from(rule).map_err(|source| CoreError::InvalidRule {
                kind,
                position: i + 1,
                source,
            })
        })
        .collect()
}

/// Combine the two fetched resources into one [`UplinkConfig`].
pub fn uplink_config(
    selection: &UplinkSelectionResponse,
    classes: Vec<CustomPerformanceClassResponse>,
) -> Result<UplinkConfig, CoreError> {
    Ok(UplinkConfig {
        wan_rules: convert_rules(RuleKind::Wan, &selection.wan_traffic_uplink_preferences)?,
        vpn_rules: convert_rules(RuleKind::Vpn, &selection.vpn_traffic_uplink_preferences)?,
        performance_classes: classes.into_iter().map(Into::into).collect(),
    })
}
