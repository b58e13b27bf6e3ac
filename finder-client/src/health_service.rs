//! Liveness check for the doctor matching service.
//!
//! The service answers its root route (`GET {endpoint}/`) with a short
//! banner when it is up. [`HealthService::check`] is resilient and never
//! fails (errors are mapped to `ok = false`); [`HealthService::try_check`]
//! returns a strict `Result`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::finder_config::FinderConfig;
use crate::error_handler::{
    FinderError, HealthError, HttpError, make_snippet, validate_http_endpoint,
};

/// A serializable health snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    #[inline]
    fn ok(endpoint: &str, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ok: true,
            latency_ms,
            message: message.into(),
        }
    }

    #[inline]
    fn fail(endpoint: &str, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            ok: false,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    endpoint: String,
}

impl HealthService {
    /// Creates a health service for the configured endpoint.
    ///
    /// # Errors
    /// - [`FinderError::Config`] if the endpoint lacks an http(s) scheme
    /// - [`FinderError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: &FinderConfig) -> Result<Self, FinderError> {
        validate_http_endpoint("DOC_FINDER_URL", &cfg.endpoint)?;
        let timeout: Duration = cfg.timeout();
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            endpoint = %cfg.base_url(),
            timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self {
            client,
            endpoint: cfg.base_url().to_string(),
        })
    }

    /// Checks the service. Never returns an error.
    pub async fn check(&self) -> HealthStatus {
        let endpoint = self.endpoint.as_str();
        let start = Instant::now();
        match self.try_check().await {
            Ok(status) => {
                info!(
                    endpoint = %status.endpoint,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health check completed"
                );
                status
            }
            Err(err) => {
                let status = HealthStatus::fail(endpoint, start.elapsed().as_millis(), err.to_string());
                warn!(
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health check failed"
                );
                status
            }
        }
    }

    /// Strict check. Returns an error on hard failures.
    ///
    /// Request:
    /// - `GET {endpoint}/`
    /// - Ensure 2xx
    pub async fn try_check(&self) -> Result<HealthStatus, FinderError> {
        let url = format!("{}/", self.endpoint);

        let start = Instant::now();
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %url,
                %status,
                %snippet,
                latency_ms = latency,
                "health GET / returned non-success status"
            );

            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })
            .into());
        }

        let banner = make_snippet(&resp.text().await.unwrap_or_default());
        let message = if banner.is_empty() {
            "matching service is reachable".to_string()
        } else {
            format!("matching service is reachable: {banner}")
        };
        Ok(HealthStatus::ok(&self.endpoint, latency, message))
    }
}
