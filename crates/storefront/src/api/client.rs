//! HTTP plumbing for the upstream shop API.
//!
//! One `reqwest::Client` shared behind an `Arc`; helpers perform exactly one
//! attempt per call and translate every failure into [`ApiError`] before it
//! leaves this module.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::ApiError;

/// Client for the upstream shop REST API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct ShopApiClient {
    inner: Arc<ShopApiClientInner>,
}

struct ShopApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ShopApiClient {
    /// Create a new client for the given upstream base URL.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(ShopApiClientInner {
                client,
                base_url: base_url.clone(),
            }),
        }
    }

    /// The configured upstream base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve a path (e.g., `products/5`) against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        // Url::join treats a base without a trailing slash as a file, so
        // normalize before joining.
        let mut base = self.inner.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(path)
            .map_err(|e| ApiError::Unknown(format!("invalid endpoint path {path}: {e}")))
    }

    /// GET `path` and decode the JSON body.
    pub(super) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub(super) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    /// PUT `body` as JSON to `path` and decode the JSON response.
    pub(super) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::decode(response).await
    }

    /// DELETE `path`, discarding any response body.
    pub(super) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let response = self
            .inner
            .client
            .delete(url)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::http(status.as_u16()))
        }
    }

    /// Map a response to the error taxonomy, then decode its JSON body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::http(status.as_u16()));
        }

        // Read as text first so a decode failure can be logged with context.
        let body = response.text().await.map_err(ApiError::Network)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode upstream response"
            );
            ApiError::Unknown(format!("undecodable upstream response: {e}"))
        })
    }
}
