//! Season and date selections.

use crate::error::{Result, StatsError};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Season {
    fn default() -> Self {
        Self(2025)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| StatsError::InvalidSeason(s.to_string()))
    }
}

/// Whether a leaderboard aggregates one season or a whole career.
///
/// Serialized as the `stats` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsScope {
    Season,
    Career,
}

/// Season selection for player leaderboards: a single year or `career`.
///
/// Serializes as the bare year (`2024`) or the string `"career"`, which is
/// what the leaderboard service expects in its `season` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatSeason {
    Year(Season),
    Career,
}

impl StatSeason {
    pub fn scope(&self) -> StatsScope {
        match self {
            StatSeason::Year(_) => StatsScope::Season,
            StatSeason::Career => StatsScope::Career,
        }
    }
}

impl Default for StatSeason {
    fn default() -> Self {
        StatSeason::Year(Season::default())
    }
}

impl From<Season> for StatSeason {
    fn from(season: Season) -> Self {
        StatSeason::Year(season)
    }
}

impl Serialize for StatSeason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            StatSeason::Year(season) => serializer.serialize_u16(season.as_u16()),
            StatSeason::Career => serializer.serialize_str("career"),
        }
    }
}

impl fmt::Display for StatSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatSeason::Year(season) => write!(f, "{season}"),
            StatSeason::Career => write!(f, "career"),
        }
    }
}

impl FromStr for StatSeason {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("career") {
            Ok(StatSeason::Career)
        } else {
            Ok(StatSeason::Year(s.parse()?))
        }
    }
}

/// Day picker for the schedule view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ScheduleDay {
    Yesterday,
    #[default]
    Today,
    Tomorrow,
}

impl ScheduleDay {
    /// Resolve to a calendar date relative to `today`.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        let shifted = match self {
            ScheduleDay::Yesterday => today.checked_sub_days(Days::new(1)),
            ScheduleDay::Today => Some(today),
            ScheduleDay::Tomorrow => today.checked_add_days(Days::new(1)),
        };
        shifted.unwrap_or(today)
    }
}

impl fmt::Display for ScheduleDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScheduleDay::Yesterday => "Yesterday",
            ScheduleDay::Today => "Today",
            ScheduleDay::Tomorrow => "Tomorrow",
        };
        write!(f, "{}", s)
    }
}
