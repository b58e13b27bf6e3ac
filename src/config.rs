use std::path::PathBuf;

use finder_client::ConfigError;
use finder_client::FinderConfig;
use finder_client::config::default_config::config_from_env;
use finder_client::error_handler::{env_opt, env_opt_u64};
use search_flow::LocationConfig;

pub const DEFAULT_SUGGEST_LIMIT: usize = 8;

/// Everything the binary reads from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub finder: FinderConfig,
    pub location: LocationConfig,
    /// `SYMPTOM_VOCAB_PATH`; the built-in list when unset.
    pub vocab_path: Option<PathBuf>,
    /// `SUGGEST_LIMIT`; `0` shows every match.
    pub suggest_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let suggest_limit = match env_opt_u64("SUGGEST_LIMIT")? {
            Some(n) => usize::try_from(n).map_err(|_| ConfigError::OutOfRange {
                field: "SUGGEST_LIMIT",
                detail: "too large",
            })?,
            None => DEFAULT_SUGGEST_LIMIT,
        };

        Ok(Self {
            finder: config_from_env()?,
            location: LocationConfig::from_env()?,
            vocab_path: env_opt("SYMPTOM_VOCAB_PATH").map(PathBuf::from),
            suggest_limit,
        })
    }
}
