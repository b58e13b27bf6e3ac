//! Request lifecycle controller.
//!
//! `Idle -> Validating -> AwaitingLocation -> Searching -> {Success | EmptyResult | Error}`
//!
//! Each submission gets a fresh [`AttemptId`]. Asynchronous completions are
//! reported back with the id they were started for, and anything that does
//! not match the current attempt is dropped. A new submission while a search
//! is in flight therefore supersedes the old one.
//!
//! Three ways to drive it:
//! - step by step ([`SearchController::submit`], [`SearchController::location_resolved`],
//!   [`SearchController::response_received`]) when the caller owns the I/O;
//! - from an event loop with [`SearchController::begin`] and
//!   [`SearchController::advance`], which hand out each asynchronous stage as a
//!   [`PendingStage`] the loop polls next to its other inputs;
//! - end to end with [`SearchController::run`].

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use finder_client::{DoctorFinder, FinderError, SearchQuery, SearchResponse};
use tracing::{debug, info, instrument, warn};

use crate::errors::{LocationError, SearchFailure};
use crate::location::{Coordinates, DEFAULT_LOCATION_TIMEOUT_SECS, LocationProvider, acquire_location};
use crate::render::{ResultItem, render};
use crate::state::{AttemptId, SearchState};
use crate::surface::Surface;

/// Upper bound for one call to the matching service, on top of the HTTP client's own timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one asynchronous stage, tagged with the attempt that started it.
#[derive(Debug)]
pub enum Completion {
    Location(AttemptId, Result<Coordinates, LocationError>),
    Response(AttemptId, Result<SearchResponse, FinderError>),
}

/// The outstanding stage of an attempt.
///
/// Owns everything it needs, so the caller can keep handling input while it
/// runs. Dropping it abandons the stage. A stage that still completes after
/// a newer attempt started is ignored by [`SearchController::advance`].
pub struct PendingStage {
    attempt: AttemptId,
    fut: Pin<Box<dyn Future<Output = Completion>>>,
}

impl PendingStage {
    pub fn attempt(&self) -> AttemptId {
        self.attempt
    }
}

impl Future for PendingStage {
    type Output = Completion;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Completion> {
        self.fut.as_mut().poll(cx)
    }
}

impl fmt::Debug for PendingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingStage")
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

async fn bounded_find<F: DoctorFinder>(
    finder: &F,
    query: &SearchQuery,
    limit: Duration,
) -> Result<SearchResponse, FinderError> {
    match tokio::time::timeout(limit, finder.find_doctors(query)).await {
        Ok(result) => result,
        Err(_) => Err(FinderError::Timeout(limit)),
    }
}

#[derive(Debug, Clone)]
struct PendingInput {
    symptoms: String,
    city: String,
}

/// Owns the [`SearchState`] of one search form and drives its [`Surface`].
pub struct SearchController<S: Surface> {
    surface: S,
    state: SearchState,
    attempt: AttemptId,
    pending: Option<PendingInput>,
    last_response: Option<SearchResponse>,
    busy: bool,
    location_timeout: Duration,
    request_timeout: Duration,
}

impl<S: Surface> SearchController<S> {
    /// A controller in `Idle` with the default location and request timeouts.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: SearchState::Idle,
            attempt: AttemptId::default(),
            pending: None,
            last_response: None,
            busy: false,
            location_timeout: Duration::from_secs(DEFAULT_LOCATION_TIMEOUT_SECS),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// How long a location request may take before the attempt fails.
    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }

    /// Upper bound for the whole service call in [`Self::run`].
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Id of the latest attempt; completions tagged otherwise are stale.
    pub fn current_attempt(&self) -> AttemptId {
        self.attempt
    }

    /// Whether the busy indicator is shown.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the submit control accepts input. Always the inverse of [`Self::is_busy`].
    pub fn is_submit_enabled(&self) -> bool {
        !self.busy
    }

    /// Items currently shown in the results region.
    pub fn items(&self) -> Vec<ResultItem> {
        render(&self.state, self.last_response.as_ref())
    }

    /// The driven surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for presentation-only changes such as the palette.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the controller and hands back its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Starts a new attempt.
    ///
    /// Clears the results region, then validates the input. Returns the new
    /// attempt id when the caller should go on to request the location, or
    /// `None` when validation failed and the attempt already ended in `Error`.
    #[instrument(skip_all, fields(attempt = tracing::field::Empty))]
    pub fn submit(&mut self, symptoms: &str, city: &str) -> Option<AttemptId> {
        if self.state.is_in_flight() {
            info!(superseded = %self.attempt, "new submission supersedes in-flight search");
        }
        self.attempt = self.attempt.next();
        tracing::Span::current().record("attempt", self.attempt.value());

        self.pending = None;
        self.last_response = None;
        self.transition(SearchState::Validating);
        self.surface.show(&[]);

        let symptoms = symptoms.trim();
        let city = city.trim().to_lowercase();
        let missing = match (symptoms.is_empty(), city.is_empty()) {
            (true, true) => Some("symptoms and city"),
            (true, false) => Some("symptoms"),
            (false, true) => Some("city"),
            (false, false) => None,
        };
        if let Some(missing) = missing {
            self.fail(SearchFailure::Validation { missing });
            return None;
        }

        self.pending = Some(PendingInput {
            symptoms: symptoms.to_string(),
            city,
        });
        self.enter_busy();
        self.transition(SearchState::AwaitingLocation);
        Some(self.attempt)
    }

    /// Feeds the outcome of the location request for `attempt`.
    ///
    /// Returns the query to submit when the position was obtained. Stale or
    /// out-of-order completions are ignored and return `None`.
    pub fn location_resolved(
        &mut self,
        attempt: AttemptId,
        result: Result<Coordinates, LocationError>,
    ) -> Option<SearchQuery> {
        if !self.accepts(attempt, &SearchState::AwaitingLocation) {
            return None;
        }

        match result {
            Ok(pos) => {
                let Some(input) = self.pending.take() else {
                    warn!(%attempt, "no pending input for location result");
                    return None;
                };
                self.transition(SearchState::Searching);
                Some(SearchQuery {
                    symptoms_text: input.symptoms,
                    city: input.city,
                    lat: pos.lat,
                    lng: pos.lng,
                })
            }
            Err(e) => {
                self.fail(SearchFailure::Location(e));
                None
            }
        }
    }

    /// Feeds the service outcome for `attempt`. Returns `false` if it was stale.
    pub fn response_received(
        &mut self,
        attempt: AttemptId,
        result: Result<SearchResponse, FinderError>,
    ) -> bool {
        if !self.accepts(attempt, &SearchState::Searching) {
            return false;
        }

        match result {
            Ok(resp) if resp.doctors.is_empty() => {
                info!(specialization = %resp.specialization, "no doctors found");
                self.finish(SearchState::EmptyResult, Some(resp));
            }
            Ok(resp) => {
                info!(
                    specialization = %resp.specialization,
                    doctors = resp.doctors.len(),
                    "search succeeded"
                );
                self.finish(SearchState::Success, Some(resp));
            }
            Err(e) => self.fail(e.into()),
        }
        true
    }

    /// Back to `Idle`: clears results and invalidates any outstanding attempt.
    pub fn reset(&mut self) {
        self.attempt = self.attempt.next();
        self.pending = None;
        self.last_response = None;
        self.transition(SearchState::Idle);
        self.leave_busy();
        self.surface.show(&[]);
    }

    /// Runs one attempt to completion.
    #[instrument(skip_all, fields(city = %city.trim()))]
    pub async fn run<L, F>(
        &mut self,
        symptoms: &str,
        city: &str,
        locator: &L,
        finder: &F,
    ) -> &SearchState
    where
        L: LocationProvider,
        F: DoctorFinder,
    {
        let Some(attempt) = self.submit(symptoms, city) else {
            return &self.state;
        };

        let position = acquire_location(locator, self.location_timeout).await;
        let Some(query) = self.location_resolved(attempt, position) else {
            return &self.state;
        };

        let result = bounded_find(finder, &query, self.request_timeout).await;
        self.response_received(attempt, result);
        &self.state
    }

    /// Starts a new attempt and returns its location stage.
    ///
    /// `None` when validation failed. Any stage of an earlier attempt is
    /// superseded from here on.
    pub fn begin<L>(&mut self, symptoms: &str, city: &str, locator: &L) -> Option<PendingStage>
    where
        L: LocationProvider + Clone + 'static,
    {
        let attempt = self.submit(symptoms, city)?;
        let locator = locator.clone();
        let limit = self.location_timeout;
        Some(PendingStage {
            attempt,
            fut: Box::pin(async move {
                Completion::Location(attempt, acquire_location(&locator, limit).await)
            }),
        })
    }

    /// Feeds a finished stage and returns the next one, if the attempt goes on.
    pub fn advance<F>(&mut self, done: Completion, finder: &F) -> Option<PendingStage>
    where
        F: DoctorFinder + Clone + 'static,
    {
        match done {
            Completion::Location(attempt, result) => {
                let query = self.location_resolved(attempt, result)?;
                let finder = finder.clone();
                let limit = self.request_timeout;
                Some(PendingStage {
                    attempt,
                    fut: Box::pin(async move {
                        Completion::Response(attempt, bounded_find(&finder, &query, limit).await)
                    }),
                })
            }
            Completion::Response(attempt, result) => {
                self.response_received(attempt, result);
                None
            }
        }
    }

    fn accepts(&self, attempt: AttemptId, expected: &SearchState) -> bool {
        if attempt != self.attempt {
            debug!(%attempt, current = %self.attempt, "dropping stale completion");
            return false;
        }
        if &self.state != expected {
            debug!(%attempt, state = self.state.label(), "completion arrived in unexpected state");
            return false;
        }
        true
    }

    fn fail(&mut self, failure: SearchFailure) {
        warn!(attempt = %self.attempt, error = %failure, "search failed");
        self.finish(SearchState::Error(failure.user_message()), None);
    }

    fn finish(&mut self, terminal: SearchState, response: Option<SearchResponse>) {
        self.pending = None;
        self.last_response = response;
        self.transition(terminal);
        self.leave_busy();
        let items = self.items();
        self.surface.show(&items);
    }

    fn transition(&mut self, next: SearchState) {
        debug!(
            attempt = %self.attempt,
            from = self.state.label(),
            to = next.label(),
            "state transition"
        );
        self.state = next;
        self.surface.state_changed(&self.state);
    }

    fn enter_busy(&mut self) {
        if !self.busy {
            self.busy = true;
            self.surface.set_submit_enabled(false);
            self.surface.set_busy(true);
        }
    }

    fn leave_busy(&mut self) {
        if self.busy {
            self.busy = false;
            self.surface.set_busy(false);
            self.surface.set_submit_enabled(true);
        }
    }
}
