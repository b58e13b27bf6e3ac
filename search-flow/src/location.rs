//! Geolocation gate.
//!
//! A search may only be submitted once the caller's position is known.
//! [`acquire_location`] asks a [`LocationProvider`] exactly once per attempt,
//! bounded by a timeout, and never yields coordinates it did not validate.

use std::future::Future;
use std::time::Duration;

use finder_client::error_handler::{
    ConfigError, env_opt, env_opt_f64, env_opt_u64, validate_http_endpoint, validate_range_f64,
};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::errors::LocationError;

pub const DEFAULT_LOCATION_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json";

const USER_AGENT: &str = concat!("doc-locator/", env!("CARGO_PKG_VERSION"));

/// A validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// # Errors
    /// [`LocationError::InvalidCoordinates`] when either value is out of range or not finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, LocationError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(Self { lat, lng })
        } else {
            Err(LocationError::InvalidCoordinates { lat, lng })
        }
    }
}

/// Source of the caller's current position.
pub trait LocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<Coordinates, LocationError>>;
}

/// Requests the position once, giving up after `limit`.
///
/// # Errors
/// The provider's own error, [`LocationError::Timeout`] when it does not
/// answer in time, or [`LocationError::InvalidCoordinates`] for a bogus fix.
#[instrument(skip_all, fields(limit_ms = limit.as_millis() as u64))]
pub async fn acquire_location<L: LocationProvider>(
    provider: &L,
    limit: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(limit, provider.current_position()).await {
        Ok(Ok(pos)) => Coordinates::new(pos.lat, pos.lng),
        Ok(Err(e)) => {
            debug!(error = %e, "location provider failed");
            Err(e)
        }
        Err(_) => Err(LocationError::Timeout(limit)),
    }
}

/// How the CLI obtains a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMode {
    /// Coordinates from `GEO_LAT` / `GEO_LNG`.
    Fixed,
    /// Approximate position from an IP lookup service.
    Ip,
    /// Location access refused.
    Off,
}

impl LocationMode {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "ip" => Ok(Self::Ip),
            "off" | "deny" | "none" => Ok(Self::Off),
            _ => Err(ConfigError::InvalidFormat {
                var: "GEO_MODE",
                reason: "expected one of: fixed, ip, off",
            }),
        }
    }
}

/// Geolocation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationConfig {
    pub mode: LocationMode,
    pub fixed: Option<Coordinates>,
    pub ip_url: String,
    pub timeout_secs: u64,
}

impl LocationConfig {
    /// Reads `GEO_MODE`, `GEO_LAT`, `GEO_LNG`, `GEO_IP_URL` and `GEO_TIMEOUT_SECS`.
    ///
    /// Without `GEO_MODE` the mode is `fixed` when `GEO_LAT` is set and `off`
    /// otherwise. IP lookup contacts a third-party service and needs an explicit
    /// `GEO_MODE=ip`.
    ///
    /// # Errors
    /// Any malformed or inconsistent variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            env_opt("GEO_MODE").as_deref(),
            env_opt_f64("GEO_LAT")?,
            env_opt_f64("GEO_LNG")?,
            env_opt("GEO_IP_URL"),
            env_opt_u64("GEO_TIMEOUT_SECS")?,
        )
    }

    fn resolve(
        mode: Option<&str>,
        lat: Option<f64>,
        lng: Option<f64>,
        ip_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let mode = match mode {
            Some(raw) => LocationMode::parse(raw)?,
            None if lat.is_some() => LocationMode::Fixed,
            None => LocationMode::Off,
        };

        let fixed = match (lat, lng) {
            (Some(lat), Some(lng)) => {
                validate_range_f64("GEO_LAT", lat, -90.0, 90.0, "latitude must be within [-90, 90]")?;
                validate_range_f64("GEO_LNG", lng, -180.0, 180.0, "longitude must be within [-180, 180]")?;
                Some(Coordinates { lat, lng })
            }
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingVar("GEO_LNG")),
            (None, Some(_)) => return Err(ConfigError::MissingVar("GEO_LAT")),
        };
        if mode == LocationMode::Fixed && fixed.is_none() {
            return Err(ConfigError::MissingVar("GEO_LAT"));
        }

        let ip_url = ip_url.unwrap_or_else(|| DEFAULT_IP_LOOKUP_URL.to_string());
        if mode == LocationMode::Ip {
            validate_http_endpoint("GEO_IP_URL", &ip_url)?;
        }

        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_LOCATION_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::OutOfRange {
                field: "GEO_TIMEOUT_SECS",
                detail: "must be at least 1 second",
            });
        }

        Ok(Self {
            mode,
            fixed,
            ip_url,
            timeout_secs,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Builds the provider selected by [`Self::mode`].
    ///
    /// # Errors
    /// Fails only if the HTTP client for IP lookup cannot be constructed.
    pub fn build_source(&self) -> Result<LocationSource, reqwest::Error> {
        Ok(match (self.mode, self.fixed) {
            (LocationMode::Fixed, Some(pos)) => LocationSource::Fixed(pos),
            (LocationMode::Fixed, None) | (LocationMode::Off, _) => LocationSource::Disabled,
            (LocationMode::Ip, _) => {
                LocationSource::IpLookup(IpLocator::new(&self.ip_url, self.timeout())?)
            }
        })
    }
}

/// Concrete providers the application can be configured with.
#[derive(Debug, Clone)]
pub enum LocationSource {
    Fixed(Coordinates),
    IpLookup(IpLocator),
    Disabled,
}

impl LocationProvider for LocationSource {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        match self {
            LocationSource::Fixed(pos) => Ok(*pos),
            LocationSource::IpLookup(locator) => locator.lookup().await,
            LocationSource::Disabled => Err(LocationError::Denied),
        }
    }
}

/// Approximate position from an ip-api style JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpLocator {
    client: reqwest::Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "lng", alias = "longitude")]
    lon: Option<f64>,
}

impl IpLocator {
    /// # Errors
    /// Returns the builder error if the HTTP client cannot be created.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            url: url.trim().to_string(),
        })
    }

    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn lookup(&self) -> Result<Coordinates, LocationError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, "ip lookup rejected");
            return Err(LocationError::Unavailable(format!("lookup returned {status}")));
        }

        let body: IpLookupBody = resp
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if body.status.as_deref().is_some_and(|s| s.eq_ignore_ascii_case("fail")) {
            let reason = body.message.unwrap_or_else(|| "lookup failed".to_string());
            return Err(LocationError::Unavailable(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng),
            _ => Err(LocationError::Unavailable(
                "lookup response has no coordinates".to_string(),
            )),
        }
    }
}
