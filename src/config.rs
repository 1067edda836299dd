use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use chrono_tz::Tz;
use tracing::{info, warn};

/// Runtime configuration, loaded once at startup from the environment.
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    /// Timezone the voting day is computed in
    pub timezone: Tz,
    /// Default leaderboard size when the request does not specify one
    pub leaderboard_limit: i64,
}

impl Config {
    pub fn load() -> Self {
        Self {
            db_path: try_load("MARINE_DB_PATH", "marine_voting.db"),
            port: try_load("MARINE_PORT", "3000"),
            timezone: try_load("MARINE_TIMEZONE", "Asia/Bangkok"),
            leaderboard_limit: try_load("MARINE_LEADERBOARD_LIMIT", "10"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| ())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
