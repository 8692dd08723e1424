//! Error types for the MLB stats client

use std::sync::Arc;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No team selected; roster stats need a team ID")]
    MissingTeamId,

    #[error("Limit must be greater than zero (got {limit})")]
    InvalidLimit { limit: u32 },

    #[error("Invalid season: {0}")]
    InvalidSeason(String),

    #[error("Invalid league: {0} (expected al, nl or a numeric league ID)")]
    InvalidLeague(String),

    #[error("Invalid configuration value for {name}: {value}")]
    InvalidConfig { name: String, value: String },

    #[error("Invalid ID: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("{0}")]
    Shared(Arc<StatsError>),
}

impl StatsError {
    /// True for failures caused by the remote service or the network,
    /// as opposed to bad input on our side.
    pub fn is_fetch_error(&self) -> bool {
        match self {
            StatsError::Http(_) | StatsError::Status { .. } | StatsError::Json(_) => true,
            StatsError::Shared(inner) => inner.is_fetch_error(),
            _ => false,
        }
    }
}

impl From<Arc<StatsError>> for StatsError {
    fn from(err: Arc<StatsError>) -> Self {
        match Arc::try_unwrap(err) {
            Ok(inner) => inner,
            Err(shared) => StatsError::Shared(shared),
        }
    }
}
