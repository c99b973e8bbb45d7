//! CLI command implementations

pub mod peek;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};

use haulback_core::{RunConfig, SessionChannel};

/// Get the haulback directory from environment or default
pub fn get_haulback_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HAULBACK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".haulback")
    }
}

/// Load the run config from an explicit path, the default location, or
/// built-in defaults when no file exists.
pub fn load_config(path: Option<PathBuf>) -> Result<RunConfig> {
    match path {
        Some(path) => RunConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            let default = get_haulback_dir().join("config.json");
            if default.exists() {
                RunConfig::load(&default)
                    .with_context(|| format!("Failed to load config from {}", default.display()))
            } else {
                Ok(RunConfig::default())
            }
        }
    }
}

/// Load the session channel. Unlike the config there is no usable
/// default: without a captured session the storefront will not
/// recognize the caller.
pub fn load_session(path: Option<PathBuf>) -> Result<SessionChannel> {
    let path = path.unwrap_or_else(|| get_haulback_dir().join("session.json"));
    SessionChannel::load(&path).with_context(|| {
        format!(
            "Failed to load session channel from {} (capture it from a logged-in browser session)",
            path.display()
        )
    })
}
