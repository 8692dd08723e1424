//! MLB Stats CLI Library
//!
//! A client library for the public MLB stats services: division standings,
//! team and player leaderboards, and the daily schedule.
//!
//! ## Features
//!
//! - **Typed Queries**: Parameter builders for every endpoint, with sort order
//!   derived from the stat (lower-is-better stats sort ascending)
//! - **Query Cache**: In-memory LRU with request de-duplication
//! - **Live Refresh**: Cancellable scheduled re-fetch for the schedule view
//! - **Derived Stats**: Category leaders and name filtering over fetched rows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mlb_stats::{
//!     config::Config,
//!     core::params::build_league_leaders_params,
//!     mlb::{compute::category_leaders, MlbClient},
//!     Season, StatGroup,
//! };
//!
//! # async fn example() -> mlb_stats::Result<()> {
//! let client = MlbClient::new(&Config::from_env()?)?;
//! let query = build_league_leaders_params(StatGroup::Pitching, Season::new(2024), 20)?;
//! let leaders = client.get_player_stats(&query).await?;
//!
//! for leader in category_leaders(&leaders.stats, StatGroup::Pitching) {
//!     println!("{}: {} ({})", leader.label, leader.row.player_name, leader.value());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Service URLs and timings can be overridden:
//! ```bash
//! export MLB_STATS_API_BASE=http://localhost:8080/api/v1
//! export MLB_REFETCH_SECS=15
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod mlb;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, Season, StatGroup, StatSeason, TeamId};
pub use error::{Result, StatsError};
pub use mlb::types::{PlayerStat, StandingsResponse, TeamStat};
