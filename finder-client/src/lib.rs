//! Client side of the doctor matching service contract.
//!
//! - [`models`]: request/response wire types for `POST /find-doctors`.
//! - [`services::DoctorFinder`]: the seam the search controller depends on,
//!   implemented over HTTP by [`DoctorFinderService`].
//! - [`health_service`]: a resilient liveness check (`GET /`).
//! - [`config`]: env-driven endpoint/timeout configuration.
//! - [`error_handler`]: unified errors plus env/validation helpers shared by
//!   the workspace.
//! - [`telemetry`]: a `tracing-subscriber` layer scoped to workspace crates.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::finder_config::FinderConfig;
pub use error_handler::{ConfigError, FinderError};
pub use health_service::{HealthService, HealthStatus};
pub use models::{DoctorResult, SearchQuery, SearchResponse};
pub use services::DoctorFinder;
pub use services::doctor_finder_service::DoctorFinderService;
