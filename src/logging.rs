//! Diagnostics bootstrap.
//!
//! The library only emits `tracing` events: parse failures at `warn`,
//! fallback parsing at `debug` and rule matches at `trace`. Hosts that have no
//! subscriber of their own can install a formatting one here.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{FhirDateError, Result};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Installs a global fmt subscriber filtered by `filter` (e.g. `"warn"` or
/// `"fhirdate=debug"`). The first successful call wins and later calls are
/// no-ops, but the filter is always validated.
pub fn init_logging(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| FhirDateError::Config(format!("invalid log filter `{}`: {}", filter, e)))?;
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| FhirDateError::Config(format!("cannot install subscriber: {}", e)))?;
    let _ = INSTALLED.set(());
    Ok(())
}
