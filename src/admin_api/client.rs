//! Kong admin REST client.
//!
//! # Responsibilities
//! - Build endpoint URLs under the configured admin base URL
//! - Decode `{"data": [...]}` list responses into upstreams and targets
//! - Post weight updates for a target
//! - Map transport errors and error statuses to `FetchError`

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::admin_api::api::AdminApi;
use crate::admin_api::types::{FetchError, FetchResult, Target, Upstream};
use crate::config::AdminConfig;

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct UpstreamRecord {
    id: String,
    #[serde(default)]
    name: String,
}

/// Target as returned by the admin API.
///
/// Older admin versions send the weight as a string and reference the
/// upstream by `upstream_id`; newer ones use a number and a nested
/// `upstream` object. Both shapes are accepted.
#[derive(Debug, Deserialize)]
struct TargetRecord {
    #[serde(default)]
    id: String,
    target: String,
    weight: WeightField,
    #[serde(default)]
    upstream_id: Option<String>,
    #[serde(default)]
    upstream: Option<UpstreamRef>,
}

#[derive(Debug, Deserialize)]
struct UpstreamRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WeightField {
    Number(i64),
    Text(String),
}

#[derive(Debug, Serialize)]
struct WeightUpdate<'a> {
    target: &'a str,
    weight: i64,
}

impl TargetRecord {
    fn into_target(self, queried_upstream: &str) -> FetchResult<Target> {
        let weight = match self.weight {
            WeightField::Number(w) => w,
            WeightField::Text(raw) => {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| FetchError::InvalidWeight {
                        target: self.target.clone(),
                        value: raw.clone(),
                    })?
            }
        };

        let upstream_id = self
            .upstream_id
            .or(self.upstream.map(|u| u.id))
            .unwrap_or_else(|| queried_upstream.to_string());

        Ok(Target {
            id: self.id,
            url: self.target,
            weight,
            upstream_id,
        })
    }
}

/// Admin API client for a Kong-compatible load balancer.
#[derive(Debug, Clone)]
pub struct KongClient {
    http: reqwest::Client,
    base_url: Url,
}

impl KongClient {
    /// Create a client for the admin API at `config.url`.
    pub fn new(config: &AdminConfig) -> FetchResult<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("kong-healthcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::debug!(admin_url = %base_url, "Admin API client initialized");

        Ok(Self { http, base_url })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        let response = self.http.get(url).send().await?;
        let body = Self::checked_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn checked_body(response: reqwest::Response) -> FetchResult<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl AdminApi for KongClient {
    async fn list_upstreams(&self) -> FetchResult<Vec<Upstream>> {
        let url = self.endpoint(&["upstreams"])?;
        let response: ListResponse<UpstreamRecord> = self.get_json(url).await?;

        Ok(response
            .data
            .into_iter()
            .map(|u| Upstream { id: u.id, name: u.name })
            .collect())
    }

    async fn list_targets(&self, upstream_id: &str) -> FetchResult<Vec<Target>> {
        let url = self.endpoint(&["upstreams", upstream_id, "targets"])?;
        let response: ListResponse<TargetRecord> = self.get_json(url).await?;

        response
            .data
            .into_iter()
            .map(|record| record.into_target(upstream_id))
            .collect()
    }

    async fn set_target_weight(
        &self,
        upstream_id: &str,
        target_url: &str,
        weight: i64,
    ) -> FetchResult<()> {
        let url = self.endpoint(&["upstreams", upstream_id, "targets"])?;
        let update = WeightUpdate {
            target: target_url,
            weight,
        };

        let response = self.http.post(url).json(&update).send().await?;
        Self::checked_body(response).await?;

        tracing::debug!(upstream_id = %upstream_id, target_url = %target_url, weight, "Target weight updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> KongClient {
        KongClient::new(&AdminConfig {
            url: url.to_string(),
            timeout_ms: 1000,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let c = client("http://127.0.0.1:8001");
        let url = c.endpoint(&["upstreams", "u-1", "targets"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8001/upstreams/u-1/targets");

        let c = client("http://gateway.local/kong-admin/");
        let url = c.endpoint(&["upstreams"]).unwrap();
        assert_eq!(url.as_str(), "http://gateway.local/kong-admin/upstreams");
    }

    #[test]
    fn test_endpoint_escapes_upstream_id() {
        let c = client("http://127.0.0.1:8001");
        let url = c.endpoint(&["upstreams", "a/b", "targets"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8001/upstreams/a%2Fb/targets");
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let err = KongClient::new(&AdminConfig {
            url: "not a url".into(),
            timeout_ms: 1000,
        })
        .unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn test_target_record_accepts_string_weight() {
        let record: TargetRecord = serde_json::from_str(
            r#"{"id": "t1", "target": "1.2.3.4:8080", "weight": "1", "upstream_id": "u9"}"#,
        )
        .unwrap();
        let target = record.into_target("queried").unwrap();
        assert_eq!(target.weight, 1);
        assert_eq!(target.upstream_id, "u9");
        assert_eq!(target.url, "1.2.3.4:8080");
    }

    #[test]
    fn test_target_record_accepts_nested_upstream() {
        let record: TargetRecord = serde_json::from_str(
            r#"{"id": "t1", "target": "1.2.3.4:8080", "weight": 0, "upstream": {"id": "u7"}}"#,
        )
        .unwrap();
        let target = record.into_target("queried").unwrap();
        assert_eq!(target.weight, 0);
        assert_eq!(target.upstream_id, "u7");
    }

    #[test]
    fn test_target_record_falls_back_to_queried_upstream() {
        let record: TargetRecord =
            serde_json::from_str(r#"{"target": "1.2.3.4:8080", "weight": 100}"#).unwrap();
        let target = record.into_target("queried").unwrap();
        assert_eq!(target.upstream_id, "queried");
        assert_eq!(target.id, "");
    }

    #[test]
    fn test_target_record_rejects_non_numeric_weight() {
        let record: TargetRecord =
            serde_json::from_str(r#"{"target": "1.2.3.4:8080", "weight": "heavy"}"#).unwrap();
        let err = record.into_target("queried").unwrap_err();
        assert!(matches!(err, FetchError::InvalidWeight { .. }));
    }

    #[test]
    fn test_weight_update_body() {
        let body = serde_json::to_value(WeightUpdate {
            target: "1.2.3.4:8080",
            weight: 100,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"target": "1.2.3.4:8080", "weight": 100}));
    }
}
