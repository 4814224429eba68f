use nba_api::client::{DEFAULT_TIMEOUT, NbaApi};
use std::path::PathBuf;
use std::time::Duration;

pub const SNAPSHOT_VAR: &str = "NBATUI_SCOREBOARD_JSON";
pub const BASE_URL_VAR: &str = "NBATUI_SCOREBOARD_URL";
pub const TIMEOUT_VAR: &str = "NBATUI_TIMEOUT_SECS";
pub const LOG_VAR: &str = "NBATUI_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub snapshot_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// Used when `RUST_LOG` isn't set.
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values are ignored, as is a timeout that isn't a positive number of seconds.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            snapshot_path: non_blank(SNAPSHOT_VAR).map(PathBuf::from),
            base_url: non_blank(BASE_URL_VAR).map(|v| v.trim().to_owned()),
            timeout: non_blank(TIMEOUT_VAR)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|&secs| secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            log_filter: non_blank(LOG_VAR).unwrap_or(defaults.log_filter),
        }
    }

    pub fn api_client(&self) -> NbaApi {
        let mut api = NbaApi::new().with_timeout(self.timeout);
        if let Some(url) = &self.base_url {
            api = api.with_base_url(url.as_str());
        }
        if let Some(path) = &self.snapshot_path {
            api = api.with_snapshot(path.as_path());
        }
        api
    }
}
