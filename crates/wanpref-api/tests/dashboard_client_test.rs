#![allow(clippy::unwrap_used)]
// Integration tests for `DashboardClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wanpref_api::{DashboardClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DashboardClient) {
    let server = MockServer::start().await;
    let key: SecretString = "test-key".to_string().into();
    let client = DashboardClient::from_api_key(
        &format!("{}/api/v1", server.uri()),
        &key,
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

// ── Organizations ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_organizations_sends_bearer_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .and(header("Authorization", "Bearer test-key"))
        .and(query_param("perPage", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "549236", "name": "Acme", "url": "https://example.com/o/abc" },
            { "id": "549237", "name": "Globex" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let orgs = client.list_organizations().await.unwrap();

    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0].id, "549236");
    assert_eq!(orgs[0].name, "Acme");
    assert_eq!(orgs[1].url, None);
}

#[tokio::test]
async fn test_list_networks_follows_link_header() {
    let (server, client) = setup().await;
    let next = format!(
        "{}/api/v1/organizations/549236/networks?perPage=1000&startingAfter=N_1",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks"))
        .and(query_param("startingAfter", "N_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "N_2", "name": "Branch", "productTypes": ["switch"] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations/549236/networks"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!("<{next}>; rel=next").as_str())
                .set_body_json(json!([
                    { "id": "N_1", "name": "HQ", "productTypes": ["appliance", "wireless"] }
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let networks = client.list_networks("549236").await.unwrap();

    let ids: Vec<_> = networks.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["N_1", "N_2"]);
    assert_eq!(networks[0].product_types, vec!["appliance", "wireless"]);
}

// ── Traffic shaping ─────────────────────────────────────────────────

#[tokio::test]
async fn test_get_uplink_selection() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_1/appliance/trafficShaping/uplinkSelection",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "activeActiveAutoVpnEnabled": true,
            "defaultUplink": "wan1",
            "loadBalancingEnabled": true,
            "failoverAndFailback": { "immediate": { "enabled": true } },
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
            "vpnTrafficUplinkPreferences": [{
                "trafficFilters": [{
                    "type": "applicationCategory",
                    "value": { "id": "meraki:layer7/category/1", "name": "Video & music" }
                }],
                "preferredUplink": "wan2"
            }]
        })))
        .mount(&server)
        .await;

    let selection = client.get_uplink_selection("N_1").await.unwrap();

    assert_eq!(selection.wan_traffic_uplink_preferences.len(), 1);
    assert_eq!(selection.vpn_traffic_uplink_preferences.len(), 1);
    let vpn = &selection.vpn_traffic_uplink_preferences[0];
    assert_eq!(vpn.traffic_filters[0].filter_type, "applicationCategory");
    assert_eq!(
        vpn.traffic_filters[0].value.name.as_deref(),
        Some("Video & music")
    );
    assert!(vpn.performance_class.is_none());
}

#[tokio::test]
async fn test_list_custom_performance_classes() {
    let (server, client) = setup().await;

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
        .mount(&server)
        .await;

    let classes = client.list_custom_performance_classes("N_1").await.unwrap();

    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].custom_performance_class_id, "123");
    assert_eq!(classes[0].max_latency, 100);
    assert_eq!(classes[0].max_loss_percentage, 5);
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_maps_to_invalid_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": ["Invalid API key"]
        })))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;
    assert!(
        matches!(result, Err(Error::InvalidApiKey)),
        "expected InvalidApiKey, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_reports_retry_after() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/organizations"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let result = client.list_organizations().await;
    assert!(
        matches!(
            result,
            Err(Error::RateLimited {
                retry_after_secs: 7
            })
        ),
        "expected RateLimited, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_body_messages_are_joined() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_9/appliance/trafficShaping/uplinkSelection",
        ))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": ["Network not found", "Check the id"]
        })))
        .mount(&server)
        .await;

    let err = client.get_uplink_selection("N_9").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Network not found; Check the id");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(
            "/api/v1/networks/N_1/appliance/trafficShaping/customPerformanceClasses",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.list_custom_performance_classes("N_1").await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "not json"),
        "expected Deserialization error, got: {result:?}"
    );
}
