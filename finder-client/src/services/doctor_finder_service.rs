//! Thin HTTP client for the doctor matching service.
//!
//! - `POST {endpoint}/find-doctors`: symptoms, city and coordinates in,
//!   specialization + ranked doctors out.
//!
//! Error bodies (`{ "error": "..." }`) on non-2xx responses become
//! [`FinderError::Service`] so the message can be shown verbatim. Anything
//! else that goes wrong (connect failure, timeout, malformed JSON) is a local
//! fault and keeps its technical detail for logs only.
//!
//! # Examples
//!
//! ```no_run
//! use finder_client::config::finder_config::FinderConfig;
//! use finder_client::models::SearchQuery;
//! use finder_client::services::doctor_finder_service::DoctorFinderService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = DoctorFinderService::new(FinderConfig {
//!     endpoint: "http://localhost:5000".into(),
//!     timeout_secs: Some(15),
//! })?;
//!
//! let resp = svc
//!     .find_doctors(&SearchQuery {
//!         symptoms_text: "fever, cough".into(),
//!         city: "pune".into(),
//!         lat: 18.52,
//!         lng: 73.85,
//!     })
//!     .await?;
//! println!("{} doctors ({})", resp.doctors.len(), resp.specialization);
//! # Ok(()) }
//! ```

use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::config::finder_config::FinderConfig;
use crate::error_handler::{FinderError, HttpError, Result, make_snippet, validate_http_endpoint};
use crate::models::{ErrorBody, SearchQuery, SearchResponse};
use crate::services::DoctorFinder;

/// Stable user agent so the service can identify this client.
const USER_AGENT: &str = concat!("doc-locator/", env!("CARGO_PKG_VERSION"));

/// Thin client for the matching service.
///
/// Reuses one HTTP client with the configured timeout.
#[derive(Debug, Clone)]
pub struct DoctorFinderService {
    client: reqwest::Client,
    timeout: Duration,
    url_find: String,
}

impl DoctorFinderService {
    /// Creates a new [`DoctorFinderService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not an http(s) URL
    /// - [`FinderError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: FinderConfig) -> Result<Self> {
        validate_http_endpoint("DOC_FINDER_URL", &cfg.endpoint)?;

        let timeout = cfg.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let url_find = format!("{}/find-doctors", cfg.base_url());
        debug!(%url_find, timeout_secs = timeout.as_secs(), "DoctorFinderService initialized");

        Ok(Self {
            client,
            timeout,
            url_find,
        })
    }

    /// Performs one search via `/find-doctors`.
    ///
    /// # Errors
    /// - [`FinderError::Service`] for non-2xx responses with an `error` message
    /// - [`FinderError::HttpStatus`] for non-2xx responses without one
    /// - [`FinderError::Timeout`] when the request exceeds the configured timeout
    /// - [`FinderError::HttpTransport`] for other client errors
    /// - [`FinderError::Decode`] if a 2xx body cannot be parsed
    #[instrument(skip_all, fields(city = %query.city))]
    pub async fn find_doctors(&self, query: &SearchQuery) -> Result<SearchResponse> {
        debug!("POST {}", self.url_find);
        let resp = self
            .client
            .post(&self.url_find)
            .json(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) if !body.error.trim().is_empty() => {
                    debug!(%status, message = %body.error, "service rejected search");
                    FinderError::Service {
                        status,
                        message: body.error,
                    }
                }
                _ => {
                    let snippet = make_snippet(&text);
                    warn!(%status, %snippet, "non-success status without error body");
                    FinderError::from(HttpError {
                        status,
                        url: self.url_find.clone(),
                        snippet,
                    })
                }
            });
        }

        let out: SearchResponse = serde_json::from_str(&text).map_err(|e| {
            FinderError::Decode(format!(
                "serde error: {e}; expected `{{ specialization, doctors[] }}`"
            ))
        })?;

        debug!(
            specialization = %out.specialization,
            doctors = out.doctors.len(),
            "search response decoded"
        );
        Ok(out)
    }

    /// Maps a reqwest failure, surfacing timeouts as [`FinderError::Timeout`].
    fn transport_error(&self, e: reqwest::Error) -> FinderError {
        if e.is_timeout() {
            FinderError::Timeout(self.timeout)
        } else {
            FinderError::HttpTransport(e)
        }
    }
}

impl DoctorFinder for DoctorFinderService {
    async fn find_doctors(&self, query: &SearchQuery) -> Result<SearchResponse> {
        DoctorFinderService::find_doctors(self, query).await
    }
}
