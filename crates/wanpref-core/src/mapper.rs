// ── Row mapping ──
//
// Flattens rules and performance classes into fixed-width rows. Every
// function here is pure; column order is the workbook's header order.

use serde::Serialize;

use crate::error::{CoreError, RuleError};
use crate::model::{
    CustomPerformanceClass, NetworkFilter, PerformanceClassRef, RuleKind, TrafficFilter,
    UplinkConfig, VpnTrafficRule, WanTrafficRule,
};

/// Written where a column does not apply to the rule's shape.
pub const NOT_APPLICABLE: &str = "N/A";

/// Protocol (and port) wildcard.
pub const ANY: &str = "any";

/// VPN rules on this protocol carry no port numbers.
pub const ICMP: &str = "icmp";

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(u32),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u32> for Cell {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

pub type WanRow = [Cell; 6];
pub type VpnRow = [Cell; 11];
pub type ClassRow = [Cell; 5];

/// All rows of one backup, in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackupRows {
    pub wan: Vec<WanRow>,
    pub vpn: Vec<VpnRow>,
    pub classes: Vec<ClassRow>,
}

fn required(value: Option<&String>, field: &'static str) -> Result<Cell, RuleError> {
    value
        .map(|v| Cell::from(v.as_str()))
        .ok_or(RuleError::MissingField(field))
}

/// Source and destination port cells for a WAN filter.
///
/// `any` maps to literal `any` ports; every other protocol copies the
/// ports and requires both to be present.
fn port_cells(filter: &NetworkFilter) -> Result<(Cell, Cell), RuleError> {
    if filter.protocol == ANY {
        return Ok((ANY.into(), ANY.into()));
    }
    Ok((
        required(filter.source.port.as_ref(), "source.port")?,
        required(filter.destination.port.as_ref(), "destination.port")?,
    ))
}

/// Like [`port_cells`], except `icmp` ports are `N/A`.
fn vpn_port_cells(filter: &NetworkFilter) -> Result<(Cell, Cell), RuleError> {
    if filter.protocol == ICMP {
        return Ok((NOT_APPLICABLE.into(), NOT_APPLICABLE.into()));
    }
    port_cells(filter)
}

/// `[Protocol, Source, Src port, Destination, Dst port, Preferred uplink]`
pub fn map_wan_rule(rule: &WanTrafficRule) -> Result<WanRow, RuleError> {
    let filter = &rule.filter;
    let (src_port, dst_port) = port_cells(filter)?;
    Ok([
        filter.protocol.as_str().into(),
        required(filter.source.cidr.as_ref(), "source.cidr")?,
        src_port,
        required(filter.destination.cidr.as_ref(), "destination.cidr")?,
        dst_port,
        rule.preferred_uplink.as_str().into(),
    ])
}

/// `[Type, Protocol or App ID, Source or App Name, Src port, Destination,
/// Dst port, Preferred uplink, Failover criterion, Performance class type,
/// Performance class name, Performance class ID]`
///
/// Custom performance classes are resolved by id against `classes`; an id
/// must match exactly one class.
pub fn map_vpn_rule(
    rule: &VpnTrafficRule,
    classes: &[CustomPerformanceClass],
) -> Result<VpnRow, RuleError> {
    let [protocol_or_app_id, source_or_app_name, src_port, destination, dst_port]: [Cell; 5] =
        match &rule.filter {
            TrafficFilter::Application { id, name } => [
                id.as_str().into(),
                name.as_str().into(),
                NOT_APPLICABLE.into(),
                NOT_APPLICABLE.into(),
                NOT_APPLICABLE.into(),
            ],
            TrafficFilter::Network(filter) => {
                let (src_port, dst_port) = vpn_port_cells(filter)?;
                [
                    filter.protocol.as_str().into(),
                    required(filter.source.cidr.as_ref(), "source.cidr")?,
                    src_port,
                    required(filter.destination.cidr.as_ref(), "destination.cidr")?,
                    dst_port,
                ]
            }
        };

    let failover: Cell = rule
        .fail_over_criterion
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(NOT_APPLICABLE)
        .into();

    let [class_type, class_name, class_id] = performance_class_cells(
        rule.performance_class.as_ref(),
        classes,
    )?;

    Ok([
        rule.filter_type.as_str().into(),
        protocol_or_app_id,
        source_or_app_name,
        src_port,
        destination,
        dst_port,
        rule.preferred_uplink.as_str().into(),
        failover,
        class_type,
        class_name,
        class_id,
    ])
}

/// `[type, name, id]` for a rule's performance class.
fn performance_class_cells(
    class: Option<&PerformanceClassRef>,
    classes: &[CustomPerformanceClass],
) -> Result<[Cell; 3], RuleError> {
    let Some(class) = class else {
        return Ok([
            NOT_APPLICABLE.into(),
            NOT_APPLICABLE.into(),
            NOT_APPLICABLE.into(),
        ]);
    };
    let kind = Cell::from(class.kind().to_string());
    match class {
        PerformanceClassRef::Builtin { name } => {
            Ok([kind, name.as_str().into(), NOT_APPLICABLE.into()])
        }
        PerformanceClassRef::Custom { id } => {
            let mut matches = classes.iter().filter(|pc| &pc.id == id);
            let resolved = matches
                .next()
                .ok_or_else(|| RuleError::UnresolvedPerformanceClass(id.clone()))?;
            if matches.next().is_some() {
                return Err(RuleError::AmbiguousPerformanceClass(id.clone()));
            }
            Ok([kind, resolved.name.as_str().into(), id.as_str().into()])
        }
    }
}

/// `[ID, Name, Max Latency, Max Jitter, Max Loss Percentage]`
pub fn map_performance_class(pc: &CustomPerformanceClass) -> ClassRow {
    [
        pc.id.as_str().into(),
        pc.name.as_str().into(),
        pc.max_latency.into(),
        pc.max_jitter.into(),
        pc.max_loss_percentage.into(),
    ]
}

fn with_position<T>(
    kind: RuleKind,
    index: usize,
    result: Result<T, RuleError>,
) -> Result<T, CoreError> {
    result.map_err(|source| CoreError::InvalidRule {
        kind,
        position: index + 1,
        source,
    })
}

/// Map a whole [`UplinkConfig`]; the first unmappable rule aborts.
pub fn map_all(config: &UplinkConfig) -> Result<BackupRows, CoreError> {
    let wan = config
        .wan_rules
        .iter()
        .enumerate()
        .map(|(i, rule)| with_position(RuleKind::Wan, i, map_wan_rule(rule)))
        .collect::<Result<Vec<_>, _>>()?;

    let vpn = config
        .vpn_rules
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            with_position(
                RuleKind::Vpn,
                i,
                map_vpn_rule(rule, &config.performance_classes),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let classes = config
        .performance_classes
        .iter()
        .map(map_performance_class)
        .collect();

    Ok(BackupRows { wan, vpn, classes })
}
