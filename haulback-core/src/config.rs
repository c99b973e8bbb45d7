//! Configuration management
//!
//! A run is described by two JSON files. `config.json` holds the walk
//! options:
//! ```json
//! {
//!   "start": { "year": 2025, "month": 3 },
//!   "pageSize": 20,
//!   "emptyMonthThreshold": 12,
//!   "yearFloor": 2000,
//!   "politenessDelaySecs": 1,
//!   "fetchTimeoutSecs": 30,
//!   "jsonPath": "order_history.json",
//!   "csvPath": "order_history.csv"
//! }
//! ```
//! `session.json` holds the authenticated channel captured from a
//! logged-in browser session:
//! ```json
//! {
//!   "baseUrl": "https://shop.example.com/ajax/index/ordersList/",
//!   "headers": { "x-requested-with": "XMLHttpRequest" },
//!   "cookies": { "frontend": "...", "PHPSESSID": "..." },
//!   "params": { "lt_o": "7473528" }
//! }
//! ```
//! The core only reads the channel; refreshing or rotating it is the
//! capturing side's problem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::Period;

/// Options controlling one history walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    /// First (most recent) month to query.
    pub start: Period,
    /// Line items requested per call.
    pub page_size: u32,
    /// Consecutive empty months before a normal stop.
    pub empty_month_threshold: u32,
    /// Absolute safety stop; the walk never queries a year below this.
    pub year_floor: i32,
    /// Fixed pause between consecutive fetch calls, in seconds.
    pub politeness_delay_secs: u64,
    /// Per-request timeout, in seconds.
    pub fetch_timeout_secs: u64,
    /// Structured-document sink.
    pub json_path: PathBuf,
    /// Tabular sink.
    pub csv_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        let today = Utc::now().date_naive();
        Self {
            start: Period {
                year: today.year(),
                month: today.month(),
            },
            page_size: 20,
            empty_month_threshold: 12,
            year_floor: 2000,
            politeness_delay_secs: 1,
            fetch_timeout_secs: 30,
            json_path: PathBuf::from("order_history.json"),
            csv_path: PathBuf::from("order_history.csv"),
        }
    }
}

impl RunConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject option combinations the walk cannot run with.
    pub fn validate(&self) -> Result<()> {
        Period::new(self.start.year, self.start.month)?;
        if self.page_size == 0 {
            return Err(Error::Validation("pageSize must be at least 1".to_string()));
        }
        if self.empty_month_threshold == 0 {
            return Err(Error::Validation(
                "emptyMonthThreshold must be at least 1".to_string(),
            ));
        }
        if self.start.year < self.year_floor {
            return Err(Error::Validation(format!(
                "Start year {} is below the year floor {}",
                self.start.year, self.year_floor
            )));
        }
        Ok(())
    }
}

/// Externally supplied authenticated channel: everything needed to be
/// recognized as a logged-in session, treated as opaque configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionChannel {
    /// Order-history endpoint.
    pub base_url: String,
    /// Request headers to replay on every call.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Session cookies, sent as a single Cookie header.
    #[serde(default)]
    pub cookies: HashMap<String, String>,
    /// Extra query parameters the endpoint expects (session tokens etc.).
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl SessionChannel {
    /// Load a session channel file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let channel: Self = serde_json::from_str(&content)?;
        if channel.base_url.trim().is_empty() {
            return Err(Error::Config(
                "Session channel is missing baseUrl".to_string(),
            ));
        }
        Ok(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: RunConfig =
            serde_json::from_str(r#"{"start": {"year": 2025, "month": 3}}"#).unwrap();
        assert_eq!(config.start, Period { year: 2025, month: 3 });
        assert_eq!(config.page_size, 20);
        assert_eq!(config.empty_month_threshold, 12);
        assert_eq!(config.year_floor, 2000);
        assert_eq!(config.json_path, PathBuf::from("order_history.json"));
    }

    #[test]
    fn test_validate_rejects_bad_month() {
        let config = RunConfig {
            start: Period { year: 2025, month: 13 },
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_start_below_floor() {
        let config = RunConfig {
            start: Period { year: 1999, month: 6 },
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_session_channel() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"baseUrl": "https://shop.example.com/ajax/index/ordersList/",
                "cookies": {{"frontend": "abc"}},
                "params": {{"lt_o": "7473528"}}}}"#
        )
        .unwrap();

        let channel = SessionChannel::load(file.path()).unwrap();
        assert_eq!(
            channel.base_url,
            "https://shop.example.com/ajax/index/ordersList/"
        );
        assert_eq!(channel.cookies.get("frontend").unwrap(), "abc");
        assert_eq!(channel.params.get("lt_o").unwrap(), "7473528");
    }

    #[test]
    fn test_session_channel_requires_base_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"baseUrl": ""}}"#).unwrap();
        assert!(SessionChannel::load(file.path()).is_err());
    }
}
