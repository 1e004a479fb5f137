//! Transport core for the REST adapters.
//!
//! This type owns transport details only: joining paths onto the configured
//! base URL, attaching the bearer token, the fixed request timeout, HTTP
//! error mapping, and decoding of the `{success, message, data, pagination}`
//! envelope every backend response follows.

use std::time::Duration;

use pagination::{Page, PageInfo};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::ports::{GatewayError, GatewayResult};

const DEFAULT_USER_AGENT: &str = "barbershop-admin-dashboard/0.1";

/// Pagination block of the response envelope, camelCase on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page the response covers.
    pub page: u32,
    /// Total pages at the requested limit.
    pub total_pages: u32,
    /// Total items across all pages.
    pub total: u64,
}

/// Response envelope every backend endpoint follows.
///
/// Callers must not trust `data` without checking `success`; the
/// `into_*` helpers enforce that.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Application-level success flag.
    pub success: bool,
    /// Human-readable message, present on failures and some successes.
    #[serde(default)]
    pub message: Option<String>,
    /// Payload, absent on failures and empty successes.
    #[serde(default)]
    pub data: Option<T>,
    /// Pagination metadata on collection endpoints.
    #[serde(default)]
    pub pagination: Option<PageMeta>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload of a successful envelope.
    pub fn into_data(self) -> GatewayResult<T> {
        if !self.success {
            return Err(GatewayError::rejected(
                self.message
                    .unwrap_or_else(|| "An unexpected error occurred".to_owned()),
            ));
        }
        self.data
            .ok_or_else(|| GatewayError::decode("envelope reported success without data"))
    }

    /// Accept a successful envelope whose payload does not matter.
    pub fn into_unit(self) -> GatewayResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(GatewayError::rejected(
                self.message
                    .unwrap_or_else(|| "An unexpected error occurred".to_owned()),
            ))
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Unwrap a collection envelope into a [`Page`], tolerating responses
    /// that omit pagination metadata (single-page collections).
    pub fn into_page(self, requested_page: u32, limit: u32) -> GatewayResult<Page<T>> {
        if !self.success {
            return Err(GatewayError::rejected(
                self.message
                    .unwrap_or_else(|| "An unexpected error occurred".to_owned()),
            ));
        }
        let items = self.data.unwrap_or_default();
        let info = match self.pagination {
            Some(meta) => PageInfo {
                page: meta.page,
                total_pages: meta.total_pages,
                total: meta.total,
            },
            None => PageInfo::compute(requested_page, limit.max(1), items.len() as u64),
        };
        Ok(Page { items, info })
    }
}

/// HTTP client for the backend, shared by every resource adapter.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base_url: Url,
}

impl RestClient {
    /// Build a client with the fixed request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reqwest client cannot be
    /// constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> GatewayResult<Url> {
        // The base URL carries a path prefix (`/api/v1`); join relative to it.
        let relative = path.trim_start_matches('/');
        let mut base = self.base_url.as_str().to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base)
            .and_then(|base_url| base_url.join(relative))
            .map_err(|error| GatewayError::decode(format!("invalid endpoint {path}: {error}")))
    }

    /// Issue a request and decode the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> GatewayResult<Envelope<T>> {
        let url = self.endpoint(path)?;
        let mut request = self.client.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        serde_json::from_slice(bytes.as_ref()).map_err(|error| {
            GatewayError::decode(format!("invalid envelope from {path}: {error}"))
        })
    }

    /// `GET` a resource.
    pub async fn get<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<Envelope<T>> {
        self.send(Method::GET, path, token, query, None).await
    }

    /// `POST` a JSON body.
    pub async fn post<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<Envelope<T>> {
        self.send(Method::POST, path, token, &[], body).await
    }

    /// `PUT` a JSON body.
    pub async fn put<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<Envelope<T>> {
        self.send(Method::PUT, path, token, &[], body).await
    }

    /// `PATCH`, usually bodyless toggles.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<Envelope<T>> {
        self.send(Method::PATCH, path, token, &[], body).await
    }

    /// `DELETE` a resource.
    pub async fn delete<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
    ) -> GatewayResult<Envelope<T>> {
        self.send(Method::DELETE, path, token, &[], None).await
    }
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::timeout(error.to_string())
    } else {
        GatewayError::transport(error.to_string())
    }
}

/// Extract the operator-facing message from an error body, in priority
/// order: `message`, then `error`, then a status fallback.
fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(serde_json::Value::as_str) {
                if !text.trim().is_empty() {
                    return text.to_owned();
                }
            }
        }
    }
    format!(
        "request failed with status {}",
        status.canonical_reason().unwrap_or("unknown")
    )
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::FORBIDDEN => GatewayError::Forbidden,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        _ if status.is_client_error() => {
            GatewayError::rejected(extract_error_message(status, body))
        }
        _ => {
            warn!(
                status = status.as_u16(),
                body = %body_preview(body),
                "backend returned a server error"
            );
            GatewayError::Upstream {
                status: status.as_u16(),
            }
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unauthorized(StatusCode::UNAUTHORIZED, GatewayError::Unauthorized)]
    #[case::forbidden(StatusCode::FORBIDDEN, GatewayError::Forbidden)]
    #[case::not_found(StatusCode::NOT_FOUND, GatewayError::NotFound)]
    #[case::server_error(StatusCode::BAD_GATEWAY, GatewayError::Upstream { status: 502 })]
    fn maps_http_statuses_to_expected_errors(
        #[case] status: StatusCode,
        #[case] expected: GatewayError,
    ) {
        assert_eq!(map_status_error(status, b"{}"), expected);
    }

    #[test]
    fn client_errors_carry_the_server_message() {
        let body = br#"{"success":false,"message":"Jadwal sudah terisi"}"#;
        let error = map_status_error(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(error, GatewayError::rejected("Jadwal sudah terisi"));
    }

    #[rstest]
    #[case::message_wins(br#"{"message":"pesan","error":"err"}"#.as_slice(), "pesan")]
    #[case::error_second(br#"{"error":"err"}"#.as_slice(), "err")]
    #[case::blank_message_skipped(br#"{"message":"  ","error":"err"}"#.as_slice(), "err")]
    #[case::fallback(b"not json".as_slice(), "request failed with status Bad Request")]
    fn error_message_extraction_follows_the_priority_order(
        #[case] body: &[u8],
        #[case] expected: &str,
    ) {
        assert_eq!(extract_error_message(StatusCode::BAD_REQUEST, body), expected);
    }

    #[test]
    fn unsuccessful_envelopes_are_rejected_with_their_message() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{"success":false,"message":"Sesi kadaluarsa"}"#,
        )
        .expect("valid envelope");
        let error = envelope.into_page(1, 10).expect_err("must reject");
        assert_eq!(error, GatewayError::rejected("Sesi kadaluarsa"));
    }

    #[test]
    fn collection_envelopes_prefer_server_pagination() {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(
            r#"{"success":true,"data":[1,2,3],"pagination":{"page":2,"totalPages":3,"total":25}}"#,
        )
        .expect("valid envelope");
        let page = envelope.into_page(2, 10).expect("page");
        assert_eq!(page.info.page, 2);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.info.total, 25);
    }

    #[test]
    fn collection_envelopes_without_pagination_compute_their_own() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2,3]}"#).expect("valid envelope");
        let page = envelope.into_page(1, 10).expect("page");
        assert_eq!(page.info.total_pages, 1);
        assert_eq!(page.info.total, 3);
    }

    #[test]
    fn success_without_data_is_a_decode_failure() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success":true}"#).expect("valid envelope");
        assert!(matches!(
            envelope.into_data(),
            Err(GatewayError::Decode { .. })
        ));
    }

    #[test]
    fn body_previews_are_truncated() {
        let long = "x".repeat(500);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[test]
    fn endpoints_join_onto_the_base_path() {
        let client = RestClient::new(
            Url::parse("http://localhost:3000/api/v1").expect("valid url"),
            Duration::from_secs(30),
        )
        .expect("client builds");
        let url = client.endpoint("/bookings/b1/confirm").expect("joins");
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/bookings/b1/confirm");
    }
}
