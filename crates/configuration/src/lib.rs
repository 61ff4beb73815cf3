//! # Configuration
//!
//! Strongly-typed application settings and the logging bootstrap.
//!
//! Settings are layered: serde defaults, then an optional `config.toml` in the
//! working directory (or an explicit file), then `HOTEL__SECTION__KEY`
//! environment variables.

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    Config, DataSettings, ElasticitySettings, LoggingSettings, OutputFormat, ReportSettings,
};

const ENV_PREFIX: &str = "HOTEL";

/// Loads the application configuration from an optional `config.toml` file.
///
/// A missing file is not an error; the defaults are used instead.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name("config.toml").required(false))
}

/// Loads the application configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    build(config::File::from(path).required(true))
}

fn build<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
