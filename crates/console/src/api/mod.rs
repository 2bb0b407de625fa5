//! Operations API client.
//!
//! Thin `reqwest` wrapper over the backend's REST endpoints:
//!
//! ```text
//! GET  /health                  - Liveness probe
//! POST /auth/login              - Form login, returns a bearer token
//! POST /auth/register           - Staff signup
//! POST /auth/join-keys/validate - Join-key lookup
//! GET  /inventory/items         - Scoped data endpoints (bearer + query scope)
//! GET  /staff/employees
//! GET  /payroll/runs
//! GET  /expenses
//! ```
//!
//! Every call returns `Result<_, FetchError>`; deciding what a failure means
//! (demo fallback, inline form error) is left to the caller.

mod auth;
mod data;
pub mod types;

pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::ApiConfig;

/// Errors that can occur when calling the operations API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: connect, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rows decoded, but their amounts cannot be summarized.
    #[error("response amounts out of range: {0}")]
    OutOfRange(#[from] tavola_core::AmountOverflow),
}

impl FetchError {
    /// HTTP status, when the API answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The API's own explanation, for errors worth showing on a form.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

/// Client for the operations API.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                timeout: config.timeout,
            }),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path (no leading slash) against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn client(&self) -> &reqwest::Client {
        &self.inner.client
    }

    fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Call `GET /health` with its own (short) timeout.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on transport failure, a non-200 status or an
    /// unexpected body.
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    pub async fn health(&self, timeout: Duration) -> Result<HealthStatus, FetchError> {
        let response = self
            .client()
            .get(self.endpoint("health")?)
            .timeout(timeout)
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(FetchError::Status {
                status: response.status(),
                detail: String::new(),
            });
        }

        read_json(response).await
    }
}

/// Turn a response into `T`, mapping non-success statuses to
/// [`FetchError::Status`] with the API's `detail` message when it sent one.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "operations API returned non-success status"
        );
        return Err(FetchError::Status {
            status,
            detail: error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "failed to parse operations API response"
        );
        FetchError::Parse(e)
    })
}

/// Like [`read_json`] for endpoints whose success body is ignored.
async fn read_empty(response: reqwest::Response) -> Result<(), FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await?;
    Err(FetchError::Status {
        status,
        detail: error_detail(&body),
    })
}

/// Pull a human-readable message out of an error body.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}
