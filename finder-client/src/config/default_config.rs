//! Default matching-service config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `DOC_FINDER_URL`          = base URL of the matching service
//! - `DOC_FINDER_PORT`         = fallback, resolves to `http://localhost:{port}`
//! - `DOC_FINDER_TIMEOUT_SECS` = optional request timeout (u64)
//!
//! When neither URL nor port is set, the service is assumed at
//! `http://localhost:5000` (the development server's default port).

use crate::{
    config::finder_config::FinderConfig,
    error_handler::{ConfigError, env_opt, env_opt_u64, validate_http_endpoint},
};

/// Port used when neither `DOC_FINDER_URL` nor `DOC_FINDER_PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

/// Resolves the matching-service endpoint from environment.
///
/// Precedence:
/// 1. `DOC_FINDER_URL` if present and non-empty
/// 2. `DOC_FINDER_PORT` → `http://localhost:{port}`
/// 3. `http://localhost:5000`
///
/// # Errors
///
/// - [`ConfigError::InvalidFormat`] if `DOC_FINDER_URL` lacks an http(s) scheme
/// - [`ConfigError::InvalidNumber`] if `DOC_FINDER_PORT` is invalid
fn finder_endpoint() -> Result<String, ConfigError> {
    if let Some(url) = env_opt("DOC_FINDER_URL") {
        validate_http_endpoint("DOC_FINDER_URL", &url)?;
        return Ok(url.trim().to_string());
    }
    if let Some(port) = env_opt("DOC_FINDER_PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "DOC_FINDER_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(format!("http://localhost:{DEFAULT_PORT}"))
}

/// Constructs the matching-service config.
///
/// # Env
/// - `DOC_FINDER_URL` or `DOC_FINDER_PORT` (optional)
/// - `DOC_FINDER_TIMEOUT_SECS` (optional)
///
/// # Defaults
/// - `endpoint = http://localhost:5000`
/// - `timeout_secs = Some(15)`
pub fn config_from_env() -> Result<FinderConfig, ConfigError> {
    let endpoint = finder_endpoint()?;
    let timeout_secs =
        env_opt_u64("DOC_FINDER_TIMEOUT_SECS")?.or(Some(FinderConfig::DEFAULT_TIMEOUT_SECS));

    Ok(FinderConfig {
        endpoint,
        timeout_secs,
    })
}
