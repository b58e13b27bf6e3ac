pub mod default_config;
pub mod finder_config;
