//! REST client for the load-testing backend.
//!
//! Every dashboard component reaches the backend through [`DashboardApi`];
//! [`DashboardClient`] is the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Job, TestId},
    protocol::{
        routes, ClearAllResponse, ContainerCleanupResponse, StartTestRequest, StartTestResponse,
        StopTestResponse,
    },
};
use tracing::{debug, warn};

pub mod error;

pub use error::ApiError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Current configuration document, key order preserved.
    async fn fetch_config(&self) -> ApiResult<serde_json::Value>;
    /// Sends `raw` as the request body without touching it.
    async fn save_config(&self, raw: &str) -> ApiResult<String>;
    async fn active_tests(&self) -> ApiResult<Vec<Job>>;
    async fn completed_tests(&self) -> ApiResult<Vec<TestId>>;
    async fn start_test(&self, request: &StartTestRequest) -> ApiResult<StartTestResponse>;
    async fn stop_test(&self, test_id: &TestId) -> ApiResult<StopTestResponse>;
    async fn clear_all_tests(&self) -> ApiResult<ClearAllResponse>;
    async fn cleanup_containers(&self) -> ApiResult<ContainerCleanupResponse>;
    /// Absolute URL for a backend path, used for report and archive links.
    fn resolve(&self, path: &str) -> String;
}

pub struct DashboardClient {
    http: Client,
    server_url: String,
}

impl DashboardClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), server_url)
    }

    /// Client for production use: `server_url` must be an absolute http(s)
    /// URL, and every request is bounded by `timeout`.
    pub fn with_timeout(server_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let server_url = server_url.into();
        let valid = reqwest::Url::parse(normalize_server_url(&server_url).as_str())
            .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
            .unwrap_or(false);
        if !valid {
            return Err(ApiError::InvalidServerUrl(server_url));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, server_url))
    }

    fn with_http(http: Client, server_url: impl Into<String>) -> Self {
        Self {
            http,
            server_url: normalize_server_url(&server_url.into()),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await.map_err(|err| {
            warn!(endpoint, "backend unreachable: {err}");
            ApiError::Transport(err)
        })?;
        let status = response.status();
        let body = response.text().await?;
        debug!(endpoint, status = status.as_u16(), "backend responded");

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(path, self.http.get(self.resolve(path))).await?;
        decode(path, &body)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(path, self.http.post(self.resolve(path))).await?;
        decode(path, &body)
    }

    /// Like [`Self::post_json`], but a success body that does not decode
    /// yields `T::default()`; only the status code is authoritative.
    async fn post_lenient<T: DeserializeOwned + Default>(&self, path: &str) -> ApiResult<T> {
        let body = self.send(path, self.http.post(self.resolve(path))).await?;
        Ok(decode(path, &body).unwrap_or_default())
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn fetch_config(&self) -> ApiResult<serde_json::Value> {
        self.get_json(routes::CONFIG).await
    }

    async fn save_config(&self, raw: &str) -> ApiResult<String> {
        let request = self
            .http
            .post(self.resolve(routes::CONFIG))
            .header(CONTENT_TYPE, "application/json")
            .body(raw.to_string());
        self.send(routes::CONFIG, request).await
    }

    async fn active_tests(&self) -> ApiResult<Vec<Job>> {
        self.get_json(routes::ACTIVE_TESTS).await
    }

    async fn completed_tests(&self) -> ApiResult<Vec<TestId>> {
        self.get_json(routes::COMPLETED_TESTS).await
    }

    async fn start_test(&self, request: &StartTestRequest) -> ApiResult<StartTestResponse> {
        let builder = self
            .http
            .post(self.resolve(routes::START_TEST))
            .json(request);
        let body = self.send(routes::START_TEST, builder).await?;
        decode(routes::START_TEST, &body)
    }

    async fn stop_test(&self, test_id: &TestId) -> ApiResult<StopTestResponse> {
        self.post_lenient(&routes::stop_test(test_id)).await
    }

    async fn clear_all_tests(&self) -> ApiResult<ClearAllResponse> {
        self.post_lenient(routes::CLEAR_ALL_TESTS).await
    }

    async fn cleanup_containers(&self) -> ApiResult<ContainerCleanupResponse> {
        self.post_json(routes::DOCKER_CLEAR_ALL).await
    }

    fn resolve(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: err.to_string(),
    })
}

pub fn normalize_server_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
