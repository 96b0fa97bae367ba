#![allow(clippy::unwrap_used)]
// End-to-end tests: select → fetch → map → write, against wiremock.

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wanpref_api::DashboardClient;
use wanpref_core::mapper::{self, NOT_APPLICABLE};
use wanpref_core::selector::{self, Choice, Prompter};
use wanpref_core::{Cell, CoreError, Dashboard, RuleError, export_network};

// ── Helpers ─────────────────────────────────────────────────────────

struct Scripted(VecDeque<&'static str>);

impl Prompter for Scripted {
    fn show(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn ask(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        Ok(self.0.pop_front().map(str::to_owned))
    }
}

fn text(s: &str) -> Cell {
    Cell::Text(s.into())
}

fn cell(value: &str) -> Data {
    Data::String(value.into())
}

/// Every row of `sheet`, header included.
fn read_sheet(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook
        .worksheet_range(sheet)
        .unwrap()
        .rows()
        .map(<[Data]>::to_vec)
        .collect()
}

async fn setup() -> (MockServer, Dashboard) {
    let server = MockServer::start().await;
    let client =
        DashboardClient::from_reqwest(&format!("{}/api/v1", server.uri()), reqwest::Client::new())
            .unwrap();
    (server, Dashboard::with_client(client))
}

async fn mount_org_and_networks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "A" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/1/networks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_0", "name": "Switches", "productTypes": ["switch"] },
            { "id": "N_1", "name": "N1", "productTypes": ["appliance"] }
        ])))
        .mount(server)
        .await;
}

async fn mount_uplink_config(server: &MockServer, selection: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_1/appliance/trafficShaping/uplinkSelection",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(selection))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_1/appliance/trafficShaping/customPerformanceClasses",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "customPerformanceClassId": "123",
            "name": "Voice",
            "maxLatency": 100,
            "maxJitter": 20,
            "maxLossPercentage": 5
        }])))
        .mount(server)
        .await;
}

fn sample_selection() -> serde_json::Value {
    json!({
        "defaultUplink": "wan1",
        "wanTrafficUplinkPreferences": [{
            "trafficFilters": [{
                "type": "custom",
                "value": {
                    "protocol": "any",
                    "source": { "cidr": "10.0.0.0/8" },
                    "destination": { "cidr": "0.0.0.0/0" }
                }
            }],
            "preferredUplink": "wan1"
        }],
        "vpnTrafficUplinkPreferences": [
            {
                "trafficFilters": [{
                    "type": "applicationCategory",
                    "value": { "id": "meraki:layer7/category/1", "name": "Video & music" }
                }],
                "preferredUplink": "wan2"
            },
            {
                "trafficFilters": [{
                    "type": "custom",
                    "value": {
                        "protocol": "tcp",
                        "source": { "cidr": "192.168.1.0/24", "port": "any" },
                        "destination": { "cidr": "10.0.0.0/8", "port": "5060-5061" }
                    }
                }],
                "preferredUplink": "bestForVoIP",
                "failOverCriterion": "poorPerformance",
                "performanceClass": { "type": "custom", "customPerformanceClassId": "123" }
            }
        ]
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_selection_offers_only_appliance_networks() {
    let (server, dashboard) = setup().await;
    mount_org_and_networks(&server).await;

    let orgs = dashboard.organizations().await.unwrap();
    let org_choices: Vec<Choice> = orgs.iter().map(Choice::from).collect();
    let org = selector::select(&org_choices, "organization", &mut Scripted(["0"].into()))
        .unwrap();
    assert_eq!(org.name, "A");

    let networks = dashboard.appliance_networks(&org.id).await.unwrap();
    assert_eq!(networks.len(), 1);

    let network_choices: Vec<Choice> = networks.iter().map(Choice::from).collect();
    let network = selector::select(
        &network_choices,
        "network",
        &mut Scripted(["1", "0"].into()),
    )
    .unwrap();
    assert_eq!(network.id, "N_1");
}

#[tokio::test]
async fn test_fetched_rules_map_to_expected_rows() {
    let (server, dashboard) = setup().await;
    mount_uplink_config(&server, sample_selection()).await;

    let config = dashboard.fetch_uplink_config("N_1").await.unwrap();
    let rows = mapper::map_all(&config).unwrap();

    assert_eq!(
        rows.wan,
        vec![[
            text("any"),
            text("10.0.0.0/8"),
            text("any"),
            text("0.0.0.0/0"),
            text("any"),
            text("wan1"),
        ]]
    );
    assert_eq!(
        rows.vpn[0],
        [
            text("applicationCategory"),
            text("meraki:layer7/category/1"),
            text("Video & music"),
            text(NOT_APPLICABLE),
            text(NOT_APPLICABLE),
            text(NOT_APPLICABLE),
            text("wan2"),
            text(NOT_APPLICABLE),
            text(NOT_APPLICABLE),
            text(NOT_APPLICABLE),
            text(NOT_APPLICABLE),
        ]
    );
    assert_eq!(
        rows.vpn[1],
        [
            text("custom"),
            text("tcp"),
            text("192.168.1.0/24"),
            text("any"),
            text("10.0.0.0/8"),
            text("5060-5061"),
            text("bestForVoIP"),
            text("poorPerformance"),
            text("custom"),
            text("Voice"),
            text("123"),
        ]
    );
    assert_eq!(
        rows.classes,
        vec![[
            text("123"),
            text("Voice"),
            Cell::Number(100),
            Cell::Number(20),
            Cell::Number(5),
        ]]
    );
}

#[tokio::test]
async fn test_export_writes_workbook() {
    let (server, dashboard) = setup().await;
    mount_uplink_config(&server, sample_selection()).await;
    let dir = tempfile::tempdir().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();

    let summary = export_network(&dashboard, "N_1", dir.path(), &at)
        .await
        .unwrap();

    assert_eq!(
        summary.path.file_name().unwrap(),
        "downloaded_rules_workbook_2024-06-15T103000.xlsx"
    );
    assert_eq!(
        (summary.wan_rows, summary.vpn_rows, summary.class_rows),
        (1, 2, 1)
    );

    let workbook: Xlsx<_> = open_workbook(&summary.path).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "wanUplinkPreferences",
            "vpnUplinkPreferences",
            "customPerformanceClasses",
        ]
    );

    let wan = read_sheet(&summary.path, "wanUplinkPreferences");
    assert_eq!(
        wan,
        vec![
            vec![
                cell("Protocol"),
                cell("Source"),
                cell("Src port"),
                cell("Destination"),
                cell("Dst port"),
                cell("Preferred uplink"),
            ],
            vec![
                cell("any"),
                cell("10.0.0.0/8"),
                cell("any"),
                cell("0.0.0.0/0"),
                cell("any"),
                cell("wan1"),
            ],
        ]
    );

    let vpn = read_sheet(&summary.path, "vpnUplinkPreferences");
    assert_eq!(vpn.len(), 3);
    assert_eq!(
        vpn[0],
        vec![
            cell("Type"),
            cell("Protocol or App ID"),
            cell("Source or App Name"),
            cell("Src port"),
            cell("Destination"),
            cell("Dst port"),
            cell("Preferred uplink"),
            cell("Failover criterion"),
            cell("Performance class type"),
            cell("Performance class name"),
            cell("Performance class ID"),
        ]
    );
    // fetch order is kept
    assert_eq!(vpn[1][0], cell("applicationCategory"));
    assert_eq!(
        vpn[2],
        vec![
            cell("custom"),
            cell("tcp"),
            cell("192.168.1.0/24"),
            cell("any"),
            cell("10.0.0.0/8"),
            cell("5060-5061"),
            cell("bestForVoIP"),
            cell("poorPerformance"),
            cell("custom"),
            cell("Voice"),
            cell("123"),
        ]
    );

    let classes = read_sheet(&summary.path, "customPerformanceClasses");
    assert_eq!(
        classes,
        vec![
            vec![
                cell("ID"),
                cell("Name"),
                cell("Max Latency"),
                cell("Max Jitter"),
                cell("Max Loss Percentage"),
            ],
            vec![
                cell("123"),
                cell("Voice"),
                Data::Float(100.0),
                Data::Float(20.0),
                Data::Float(5.0),
            ],
        ]
    );
}

#[tokio::test]
async fn test_fetch_failure_writes_nothing() {
    let (server, dashboard) = setup().await;
    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_1/appliance/trafficShaping/uplinkSelection",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_selection()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_1/appliance/trafficShaping/customPerformanceClasses",
        ))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": ["Internal server error"]
        })))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();

    let err = export_network(&dashboard, "N_1", dir.path(), &at)
        .await
        .unwrap_err();

    assert!(
        matches!(err, CoreError::Api { status: Some(500), .. }),
        "unexpected error: {err:?}"
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unresolved_performance_class_aborts_export() {
    let (server, dashboard) = setup().await;
    let mut selection = sample_selection();
    selection["vpnTrafficUplinkPreferences"][1]["performanceClass"]["customPerformanceClassId"] =
        json!("999");
    mount_uplink_config(&server, selection).await;
    let dir = tempfile::tempdir().unwrap();
    let at = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();

    let err = export_network(&dashboard, "N_1", dir.path(), &at)
        .await
        .unwrap_err();

    match err {
        CoreError::InvalidRule {
            position, source, ..
        } => {
            assert_eq!(position, 2);
            assert_eq!(source, RuleError::UnresolvedPerformanceClass("999".into()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
