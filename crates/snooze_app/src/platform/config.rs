use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use snooze_engine::ApiSettings;

use super::logging::LogDestination;

pub const ENV_BASE_URL: &str = "SNOOZE_BASE_URL";
pub const ENV_STATE_DIR: &str = "SNOOZE_STATE_DIR";
pub const ENV_LOG: &str = "SNOOZE_LOG";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    /// Where the saved session file lives.
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api = match lookup(ENV_BASE_URL) {
            Some(base_url) => ApiSettings::with_base_url(&base_url)
                .with_context(|| format!("{ENV_BASE_URL}={base_url:?} is not a usable url"))?,
            None => ApiSettings::hosted()?,
        };

        let state_dir = match lookup(ENV_STATE_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };

        let log_destination = match lookup(ENV_LOG) {
            Some(value) => value
                .parse::<LogDestination>()
                .map_err(|err| anyhow!("{ENV_LOG}: {err}"))?,
            None => LogDestination::default(),
        };

        Ok(Self {
            api,
            state_dir,
            log_destination,
        })
    }
}
