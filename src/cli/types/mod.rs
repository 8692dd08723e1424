//! Type-safe wrappers and enums for MLB stats selections.

pub mod groups;
pub mod ids;
pub mod time;

pub use groups::{GameType, PlayerPool, SortOrder, SortStat, StatGroup, TeamStatType, ViewMode};
pub use ids::{LeagueId, PlayerId, TeamId};
pub use time::{ScheduleDay, Season, StatSeason, StatsScope};
