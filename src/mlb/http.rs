//! HTTP access to the MLB stats API and the leaderboard service.
//!
//! This is the only place that talks to the network, and the only place that
//! logs request traffic: one event when a request starts, one with the
//! response status, and a warning on any failure.

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    core::params::{Endpoint, LeaderboardQuery, ScheduleQuery, StandingsQuery},
    error::{Result, StatsError},
    mlb::types::{
        PlayerStatsResponse, ScheduleResponse, StandingsResponse, TeamStatsResponse,
        TeamsResponse,
    },
};


const USER_AGENT: &str = concat!("mlb-stats/", env!("CARGO_PKG_VERSION"));

/// Longest error body we keep in a [`StatsError::Status`] message.
const MAX_ERROR_BODY: usize = 200;

const NO_PARAMS: [(&str, &str); 0] = [];

/// Typed client for both services. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MlbClient {
    client: Client,
    api_base: String,
    leaderboard_base: String,
}

impl MlbClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            leaderboard_base: config.leaderboard_base.clone(),
        })
    }

    fn base_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Standings | Endpoint::Schedule | Endpoint::Teams => &self.api_base,
            Endpoint::TeamLeaderboard | Endpoint::PlayerLeaderboard => &self.leaderboard_base,
        }
    }

    pub fn url_for(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_for(endpoint), endpoint.path())
    }

    pub async fn get_standings(&self, query: &StandingsQuery) -> Result<StandingsResponse> {
        self.get_json(Endpoint::Standings, query).await
    }

    pub async fn get_schedule(&self, query: &ScheduleQuery) -> Result<ScheduleResponse> {
        self.get_json(Endpoint::Schedule, query).await
    }

    pub async fn get_teams(&self) -> Result<TeamsResponse> {
        self.get_json(Endpoint::Teams, &NO_PARAMS).await
    }

    pub async fn get_team_stats(&self, query: &LeaderboardQuery) -> Result<TeamStatsResponse> {
        self.get_json(Endpoint::TeamLeaderboard, query).await
    }

    pub async fn get_player_stats(&self, query: &LeaderboardQuery) -> Result<PlayerStatsResponse> {
        self.get_json(Endpoint::PlayerLeaderboard, query).await
    }

    /// One GET, no retries. Errors are classified, logged and returned as-is.
    #[instrument(level = "debug", skip(self, query), fields(endpoint = %endpoint))]
    async fn get_json<Q, T>(&self, endpoint: Endpoint, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .get(self.url_for(endpoint))
            .query(query)
            .build()?;
        let url = request.url().to_string();
        debug!(%url, "request start");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "request failed");
                return Err(StatsError::Http(e));
            }
        };

        let status = response.status();
        debug!(%url, status = status.as_u16(), "response received");

        if !status.is_success() {
            let err = status_error(&url, response).await;
            warn!(%url, status = status.as_u16(), error = %err, "request returned error status");
            return Err(err);
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(%url, error = %e, "failed to read response body");
            StatsError::Http(e)
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(%url, error = %e, bytes = body.len(), "failed to decode response");
            StatsError::Json(e)
        })
    }
}

async fn status_error(url: &str, response: Response) -> StatsError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();

    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body.chars().take(MAX_ERROR_BODY).collect()
    };

    StatsError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    }
}
