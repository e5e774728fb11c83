//! HTTP transport for the CryptoScan backend.

use crate::error::{ApiError, ApiResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP client for the backend REST surface.
///
/// Cheap to clone behind an `Arc`; all bindings in this crate are
/// methods on it (see `bindings`).
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        self.send_json(self.client.get(self.url(endpoint)), endpoint)
            .await
    }

    /// GET a JSON resource with query parameters.
    pub(crate) async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        self.send_json(self.client.get(self.url(endpoint)).query(query), endpoint)
            .await
    }

    /// POST with no body, discarding the response payload.
    pub(crate) async fn post_empty(&self, endpoint: &str) -> ApiResult<()> {
        let response = self
            .send(self.client.post(self.url(endpoint)), endpoint)
            .await?;
        Self::check_status(response, endpoint).await?;
        Ok(())
    }

    /// POST a JSON body, discarding the response payload.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<()> {
        let response = self
            .send(self.client.post(self.url(endpoint)).json(body), endpoint)
            .await?;
        Self::check_status(response, endpoint).await?;
        Ok(())
    }

    /// PUT a JSON body, discarding the response payload.
    pub(crate) async fn put_json<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<()> {
        let response = self
            .send(self.client.put(self.url(endpoint)).json(body), endpoint)
            .await?;
        Self::check_status(response, endpoint).await?;
        Ok(())
    }

    /// DELETE a resource, discarding the response payload.
    pub(crate) async fn delete(&self, endpoint: &str) -> ApiResult<()> {
        let response = self
            .send(self.client.delete(self.url(endpoint)), endpoint)
            .await?;
        Self::check_status(response, endpoint).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> ApiResult<Response> {
        debug!(endpoint, "API request");
        request
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{}: {e}", describe(endpoint, &e))))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, endpoint).await?;
        let response = Self::check_status(response, endpoint).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("{endpoint}: {e}")))
    }

    /// Turn any non-2xx status into an explicit failure carrying the
    /// status code and response body.
    async fn check_status(response: Response, endpoint: &str) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            body: format!("{endpoint}: {body}"),
        })
    }
}

fn describe(endpoint: &str, err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("{endpoint} timed out")
    } else if err.is_connect() {
        format!("{endpoint} unreachable")
    } else {
        endpoint.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_endpoint() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.url("/api/system/status"),
            "http://localhost:8000/api/system/status"
        );
    }
}
