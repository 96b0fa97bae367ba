// Async HTTP client for the cloud Dashboard API (v1).
//
// Base path: /api/v1/
// Auth: `Authorization: Bearer <key>` header
// Pagination: RFC 5988 `Link` header with `rel=next`

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, LINK, RETRY_AFTER};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

/// Public Dashboard endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.meraki.com/api/v1";

/// Page size requested from paginated list endpoints.
const PER_PAGE: u32 = 1000;

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Dashboard API.
///
/// Uses bearer API-key authentication. Every call is a plain read; list
/// endpoints follow `Link: <...>; rel=next` until the last page.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization: Bearer <key>` as a default header on every
    /// request. The header value is marked sensitive so it never shows up
    /// in debug output.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with a slash so relative joins append
    /// to `/api/v1/` instead of replacing its last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    /// GET a list endpoint and collect every page.
    async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let mut url = self.url(path)?;
        url.query_pairs_mut()
            .append_pair("perPage", &PER_PAGE.to_string());

        let mut all = Vec::new();
        let mut next = Some(url);
        while let Some(url) = next.take() {
            debug!("GET {url}");
            let resp = self.http.get(url).send().await?;
            next = next_link(resp.headers());
            let page: Vec<T> = Self::handle_response(resp).await?;
            trace!(received = page.len(), more = next.is_some(), "page fetched");
            all.extend(page);
        }

        Ok(all)
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(1);
            return Error::RateLimited { retry_after_secs };
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<types::ErrorResponse>(&raw) {
            Ok(err) if !err.errors.is_empty() => err.errors.join("; "),
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Organizations ────────────────────────────────────────────────

    /// `GET /organizations`
    pub async fn list_organizations(&self) -> Result<Vec<types::OrganizationResponse>, Error> {
        self.get_all("organizations").await
    }

    // ── Networks ─────────────────────────────────────────────────────

    /// `GET /organizations/{organizationId}/networks`
    pub async fn list_networks(
        &self,
        organization_id: &str,
    ) -> Result<Vec<types::NetworkResponse>, Error> {
        self.get_all(&format!("organizations/{organization_id}/networks"))
            .await
    }

    // ── Appliance traffic shaping ────────────────────────────────────

    /// `GET /networks/{networkId}/appliance/trafficShaping/uplinkSelection`
    pub async fn get_uplink_selection(
        &self,
        network_id: &str,
    ) -> Result<types::UplinkSelectionResponse, Error> {
        self.get(&format!(
            "networks/{network_id}/appliance/trafficShaping/uplinkSelection"
        ))
        .await
    }

    /// `GET /networks/{networkId}/appliance/trafficShaping/customPerformanceClasses`
    pub async fn list_custom_performance_classes(
        &self,
        network_id: &str,
    ) -> Result<Vec<types::CustomPerformanceClassResponse>, Error> {
        self.get(&format!(
            "networks/{network_id}/appliance/trafficShaping/customPerformanceClasses"
        ))
        .await
    }
}

/// Extract the `rel=next` target from a `Link` header, if any.
///
/// Accepts both `rel=next` and `rel="next"`.
fn next_link(headers: &HeaderMap) -> Option<Url> {
    let raw = headers.get(LINK)?.to_str().ok()?;
    raw.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        let is_next = params.split(';').any(|param| {
            param
                .trim()
                .strip_prefix("rel=")
                .is_some_and(|rel| rel.trim_matches('"') == "next")
        });
        if !is_next {
            return None;
        }
        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target).ok()
    })
}
