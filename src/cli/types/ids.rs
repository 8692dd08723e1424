//! ID types for MLB teams, players and leagues.

use crate::error::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for MLB team IDs.
///
/// # Examples
///
/// ```rust
/// use mlb_stats::TeamId;
///
/// let yankees = TeamId::new(147);
/// assert_eq!(yankees.as_u32(), 147);
/// assert_eq!(yankees.to_string(), "147");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for MLB player IDs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// League identifier used by the standings endpoint.
///
/// Accepts `al` / `nl` (any case) or the raw numeric ID on the command line.
///
/// ```rust
/// use mlb_stats::LeagueId;
///
/// let al: LeagueId = "AL".parse().unwrap();
/// assert_eq!(al, LeagueId::AMERICAN);
/// assert_eq!(al.as_u32(), 103);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueId(pub u32);

impl LeagueId {
    pub const AMERICAN: LeagueId = LeagueId(103);
    pub const NATIONAL: LeagueId = LeagueId(104);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Human-readable league name for headers.
    pub fn name(&self) -> String {
        match *self {
            LeagueId::AMERICAN => "American League".to_string(),
            LeagueId::NATIONAL => "National League".to_string(),
            other => format!("League {}", other.0),
        }
    }
}

impl Default for LeagueId {
    fn default() -> Self {
        LeagueId::AMERICAN
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LeagueId {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "al" | "american" => Ok(LeagueId::AMERICAN),
            "nl" | "national" => Ok(LeagueId::NATIONAL),
            other => other
                .parse()
                .map(LeagueId)
                .map_err(|_| StatsError::InvalidLeague(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_from_str() {
        assert_eq!("147".parse::<TeamId>().unwrap(), TeamId::new(147));
        assert_eq!(" 121 ".parse::<TeamId>().unwrap(), TeamId::new(121));
        assert!("yankees".parse::<TeamId>().is_err());
    }

    #[test]
    fn test_league_id_aliases() {
        assert_eq!("al".parse::<LeagueId>().unwrap(), LeagueId::AMERICAN);
        assert_eq!("NL".parse::<LeagueId>().unwrap(), LeagueId::NATIONAL);
        assert_eq!("national".parse::<LeagueId>().unwrap(), LeagueId::NATIONAL);
        assert_eq!("104".parse::<LeagueId>().unwrap(), LeagueId::NATIONAL);
    }

    #[test]
    fn test_league_id_invalid() {
        let err = "xl".parse::<LeagueId>().unwrap_err();
        assert!(matches!(err, StatsError::InvalidLeague(ref s) if s == "xl"));
    }

    #[test]
    fn test_league_default_and_name() {
        assert_eq!(LeagueId::default(), LeagueId::AMERICAN);
        assert_eq!(LeagueId::AMERICAN.name(), "American League");
        assert_eq!(LeagueId::NATIONAL.name(), "National League");
        assert_eq!(LeagueId::new(999).name(), "League 999");
    }
}
