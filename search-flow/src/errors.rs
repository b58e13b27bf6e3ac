//! Failure taxonomy of a search attempt.
//!
//! Every failure ends up as `SearchState::Error(message)`; nothing here
//! propagates to the caller. Only [`SearchFailure::Service`] carries text
//! from the outside world, everything else maps to a fixed message.

use std::time::Duration;

use finder_client::FinderError;
use thiserror::Error;

/// Shown when symptoms or city are blank.
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter both symptoms and city.";
/// Shown when the caller's position cannot be obtained.
pub const LOCATION_REQUIRED_MESSAGE: &str = "Location access is required to find nearby doctors.";
/// Shown for transport and decoding faults.
pub const GENERIC_ERROR_MESSAGE: &str = "Server error. Please try again.";
/// Shown under the specialization badge when the result list is empty.
pub const NO_DOCTORS_MESSAGE: &str = "No doctors found in this city.";

/// Geolocation failures. All are terminal for the attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("[Search Flow] location access denied")]
    Denied,

    #[error("[Search Flow] location unavailable: {0}")]
    Unavailable(String),

    #[error("[Search Flow] location lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("[Search Flow] invalid coordinates lat={lat}, lng={lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

/// Why a search attempt ended in the error state.
#[derive(Debug, Error)]
pub enum SearchFailure {
    /// Missing symptoms and/or city. Detected before any I/O.
    #[error("[Search Flow] missing {missing}")]
    Validation { missing: &'static str },

    #[error(transparent)]
    Location(#[from] LocationError),

    /// Structured rejection from the matching service.
    #[error("[Search Flow] service rejected search: {message}")]
    Service { message: String },

    /// Network failure, timeout or malformed response.
    #[error("[Search Flow] transport failure: {0}")]
    Transport(String),
}

impl SearchFailure {
    /// Text for the user-visible error block. Never contains local fault detail.
    pub fn user_message(&self) -> String {
        match self {
            SearchFailure::Validation { .. } => MISSING_FIELDS_MESSAGE.to_string(),
            SearchFailure::Location(_) => LOCATION_REQUIRED_MESSAGE.to_string(),
            SearchFailure::Service { message } => message.clone(),
            SearchFailure::Transport(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<FinderError> for SearchFailure {
    fn from(e: FinderError) -> Self {
        match e {
            FinderError::Service { message, .. } => SearchFailure::Service { message },
            other => SearchFailure::Transport(other.to_string()),
        }
    }
}
