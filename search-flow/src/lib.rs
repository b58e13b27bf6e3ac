//! Doctor search lifecycle.
//!
//! - [`location`]: the geolocation gate and configurable position sources.
//! - [`controller`]: the attempt-scoped state machine.
//! - [`render`]: terminal state to result items.
//! - [`surface`]: the presentation seam the controller drives.

pub mod controller;
pub mod errors;
pub mod location;
pub mod render;
pub mod state;
pub mod surface;

pub use controller::{Completion, DEFAULT_REQUEST_TIMEOUT, PendingStage, SearchController};
pub use errors::{
    GENERIC_ERROR_MESSAGE, LOCATION_REQUIRED_MESSAGE, LocationError, MISSING_FIELDS_MESSAGE,
    NO_DOCTORS_MESSAGE, SearchFailure,
};
pub use location::{
    Coordinates, IpLocator, LocationConfig, LocationMode, LocationProvider, LocationSource,
    acquire_location,
};
pub use render::{DoctorCard, ResultItem, render};
pub use state::{AttemptId, SearchState};
pub use surface::Surface;
