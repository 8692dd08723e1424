//! Runtime configuration read from the environment.

use std::time::Duration;

use crate::error::{Result, StatsError};

pub const API_BASE_ENV_VAR: &str = "MLB_STATS_API_BASE";
pub const LEADERBOARD_BASE_ENV_VAR: &str = "MLB_LEADERBOARD_BASE";
pub const TIMEOUT_ENV_VAR: &str = "MLB_HTTP_TIMEOUT_SECS";
pub const REFETCH_ENV_VAR: &str = "MLB_REFETCH_SECS";

/// Standings, schedule and teams.
pub const DEFAULT_API_BASE: &str = "https://statsapi.mlb.com/api/v1";

/// Team and player leaderboards.
pub const DEFAULT_LEADERBOARD_BASE: &str = "https://bdfed.stitch.mlbinfra.com/bdfed/stats";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Live schedule refresh cadence.
pub const DEFAULT_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

/// Default number of cached results per endpoint.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub leaderboard_base: String,
    pub timeout: Duration,
    pub refetch_interval: Duration,
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            leaderboard_base: DEFAULT_LEADERBOARD_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            refetch_interval: DEFAULT_REFETCH_INTERVAL,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    /// Build from the process environment, falling back to the public defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = non_empty(lookup(API_BASE_ENV_VAR)) {
            config.api_base = trim_base(&base);
        }
        if let Some(base) = non_empty(lookup(LEADERBOARD_BASE_ENV_VAR)) {
            config.leaderboard_base = trim_base(&base);
        }
        if let Some(secs) = non_empty(lookup(TIMEOUT_ENV_VAR)) {
            config.timeout = parse_secs(TIMEOUT_ENV_VAR, &secs)?;
        }
        if let Some(secs) = non_empty(lookup(REFETCH_ENV_VAR)) {
            config.refetch_interval = parse_secs(REFETCH_ENV_VAR, &secs)?;
        }

        Ok(config)
    }

    /// Point both services at one base URL (mock servers in tests).
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.api_base = trim_base(base);
        self.leaderboard_base = trim_base(base);
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(StatsError::InvalidConfig {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
