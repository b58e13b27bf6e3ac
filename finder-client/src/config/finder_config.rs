/// Configuration for talking to the doctor matching service.
///
/// # Fields
///
/// - `endpoint`: Base URL of the service (e.g. `http://localhost:5000`).
///   Routes such as `/find-doctors` are appended to it.
/// - `timeout_secs`: Optional request timeout in seconds. Expiry is reported
///   as [`FinderError::Timeout`](crate::error_handler::FinderError::Timeout).
///
/// # Examples
///
/// ```
/// use finder_client::config::finder_config::FinderConfig;
///
/// let cfg = FinderConfig {
///     endpoint: "http://localhost:5000".to_string(),
///     timeout_secs: Some(15),
/// };
/// assert_eq!(cfg.timeout().as_secs(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    /// Base URL of the matching service.
    pub endpoint: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl FinderConfig {
    /// Timeout applied when none is configured.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Effective request timeout.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS))
    }

    /// Endpoint without surrounding whitespace or trailing slashes.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}
