//! Unified error handling for `finder-client`.
//!
//! This module exposes a single top-level error type [`FinderError`] for the whole
//! library, and groups domain-specific errors in nested enums (e.g., [`ConfigError`],
//! [`HealthError`]). Small helpers for reading/validating environment variables are
//! provided for every crate in the workspace.
//!
//! All messages include the suffix `[Doc Finder]` to simplify attribution in logs.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, FinderError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `finder-client` crate.
///
/// [`FinderError::Service`] is the only variant whose message comes from the
/// matching service and may be shown to a user as-is. Every other variant is a
/// local transport, decoding or setup fault.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FinderError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Liveness-check errors.
    #[error(transparent)]
    Health(#[from] HealthError),

    /// Non-2xx response carrying a structured `{ "error": "..." }` body.
    #[error("[Doc Finder] service rejected the search ({status}): {message}")]
    Service {
        /// HTTP status returned by the service.
        status: StatusCode,
        /// Message supplied by the service.
        message: String,
    },

    /// Non-2xx response without a usable error body.
    #[error(transparent)]
    HttpStatus(#[from] HttpError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[Doc Finder] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Response payload could not be decoded as expected.
    #[error("[Doc Finder] failed to decode response: {0}")]
    Decode(String),

    /// Operation exceeded the configured timeout.
    #[error("[Doc Finder] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl FinderError {
    /// The service-supplied message, if this error carries one.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            FinderError::Service { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Non-successful HTTP status with a trimmed body snippet.
#[derive(Debug, Error)]
#[error("[Doc Finder] HTTP {status} from {url}: {snippet}")]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Doc Finder] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like ports, timeouts, coordinates).
    #[error("[Doc Finder] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `DOC_FINDER_PORT`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL, unknown mode).
    #[error("[Doc Finder] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `DOC_FINDER_URL`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[Doc Finder] {field} is out of range: {detail}")]
    OutOfRange {
        /// Field name (e.g., `GEO_LAT`).
        field: &'static str,
        /// Description of the expected range.
        detail: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Health errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for the matching-service liveness check.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// Upstream returned a non-successful HTTP status.
    #[error(transparent)]
    HttpStatus(HttpError),
}

/* ------------------------------------------------------------------------- */
/* Env helpers                                                               */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable (`None` if unset/empty).
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> std::result::Result<Option<u64>, ConfigError> {
    match env_opt(name) {
        Some(v) => v
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            }),
        None => Ok(None),
    }
}

/// Parses an optional `f64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a finite number.
pub fn env_opt_f64(name: &'static str) -> std::result::Result<Option<f64>, ConfigError> {
    match env_opt(name) {
        Some(v) => match v.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber {
                var: name,
                reason: "expected a finite decimal number",
            }),
        },
        None => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the string does not start with
/// a valid HTTP scheme.
pub fn validate_http_endpoint(
    var: &'static str,
    value: &str,
) -> std::result::Result<(), ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        })
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]` or not finite.
pub fn validate_range_f64(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    detail: &'static str,
) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail })
    }
}

/// Trims a response body to a short single-line snippet for logs and errors.
pub fn make_snippet(body: &str) -> String {
    body.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(240)
        .collect()
}
