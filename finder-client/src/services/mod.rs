pub mod doctor_finder_service;

use std::future::Future;

use crate::error_handler::Result;
use crate::models::{SearchQuery, SearchResponse};

/// Anything that can answer a doctor search.
///
/// The HTTP client implements it; the search controller is generic over it,
/// so tests can substitute a scripted finder.
pub trait DoctorFinder {
    /// Submits `query` and returns the ranked result.
    ///
    /// # Errors
    /// [`FinderError::Service`](crate::error_handler::FinderError::Service) for a
    /// structured rejection, any other variant for transport or decoding faults.
    fn find_doctors(&self, query: &SearchQuery) -> impl Future<Output = Result<SearchResponse>>;
}
