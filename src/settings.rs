//! Runtime settings, read with the `config` crate.
//!
//! Settings come from an optional file (any format `config` understands,
//! picked by extension) overlaid with `FHIRDATE_*` environment variables,
//! e.g. `FHIRDATE_LEGACY_EPOCH_SECONDS=true`.

// config lets you read a separate config file
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Accept JSON integers as Unix epoch seconds.
    #[serde(default)]
    pub legacy_epoch_seconds: bool,
    /// `tracing-subscriber` filter directives used by [`crate::logging::init_logging`].
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    String::from("warn")
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            legacy_epoch_seconds: false,
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(Environment::with_prefix("FHIRDATE"))
            .build()?;
        Ok(config.try_deserialize::<Settings>()?)
    }
}
