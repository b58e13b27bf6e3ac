use std::fmt;

/// Monotonically increasing tag of a search attempt.
///
/// Asynchronous results carry the tag of the attempt that started them and
/// are dropped when it no longer matches the controller's current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl AttemptId {
    pub(crate) fn next(self) -> Self {
        AttemptId(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the search form. Owned by the controller only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchState {
    #[default]
    Idle,
    Validating,
    AwaitingLocation,
    Searching,
    Success,
    EmptyResult,
    /// User-facing message.
    Error(String),
}

impl SearchState {
    /// `Success`, `EmptyResult` or `Error`: the form is interactive again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchState::Success | SearchState::EmptyResult | SearchState::Error(_)
        )
    }

    /// An asynchronous stage is outstanding.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SearchState::AwaitingLocation | SearchState::Searching)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Short lowercase name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            SearchState::Idle => "idle",
            SearchState::Validating => "validating",
            SearchState::AwaitingLocation => "awaiting_location",
            SearchState::Searching => "searching",
            SearchState::Success => "success",
            SearchState::EmptyResult => "empty_result",
            SearchState::Error(_) => "error",
        }
    }
}
