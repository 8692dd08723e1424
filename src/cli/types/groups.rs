//! Stat categories, sort fields and the other closed selections a view can make.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player stat group. Each group is a separate leaderboard with its own fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StatGroup {
    #[default]
    Hitting,
    Pitching,
    Fielding,
}

impl StatGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
            StatGroup::Fielding => "fielding",
        }
    }
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Team leaderboards only exist for hitting and pitching.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatType {
    #[default]
    Hitting,
    Pitching,
}

impl From<TeamStatType> for StatGroup {
    fn from(stat_type: TeamStatType) -> Self {
        match stat_type {
            TeamStatType::Hitting => StatGroup::Hitting,
            TeamStatType::Pitching => StatGroup::Pitching,
        }
    }
}

impl fmt::Display for TeamStatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", StatGroup::from(*self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Leaderboard fields the client sorts on, named as the service names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortStat {
    HomeRuns,
    Avg,
    Rbi,
    Runs,
    Era,
    Whip,
    EarnedRunAverage,
    Wins,
    Saves,
    StrikeOuts,
    Fielding,
    Assists,
    PutOuts,
}

impl SortStat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortStat::HomeRuns => "homeRuns",
            SortStat::Avg => "avg",
            SortStat::Rbi => "rbi",
            SortStat::Runs => "runs",
            SortStat::Era => "era",
            SortStat::Whip => "whip",
            SortStat::EarnedRunAverage => "earnedRunAverage",
            SortStat::Wins => "wins",
            SortStat::Saves => "saves",
            SortStat::StrikeOuts => "strikeOuts",
            SortStat::Fielding => "fielding",
            SortStat::Assists => "assists",
            SortStat::PutOuts => "putOuts",
        }
    }

    /// Fields where a smaller number is the better result.
    ///
    /// New rate stats of that kind (FIP, BB/9, ...) must be added here
    /// explicitly; nothing is inferred from the field name.
    pub fn lower_is_better(&self) -> bool {
        matches!(
            self,
            SortStat::Era | SortStat::Whip | SortStat::EarnedRunAverage
        )
    }

    /// Leaderboard direction that puts the best value first.
    pub fn order(&self) -> SortOrder {
        if self.lower_is_better() {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }
}

impl fmt::Display for SortStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Game type filter (`R` regular season, `P` postseason, `S` spring training).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum GameType {
    #[default]
    #[serde(rename = "R")]
    Regular,
    #[serde(rename = "P")]
    Postseason,
    #[serde(rename = "S")]
    Spring,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameType::Regular => "R",
            GameType::Postseason => "P",
            GameType::Spring => "S",
        };
        write!(f, "{}", s)
    }
}

/// Which players a leaderboard includes: everyone, or only those meeting
/// the playing-time qualification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPool {
    All,
    #[default]
    Qualified,
}

impl fmt::Display for PlayerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerPool::All => write!(f, "all"),
            PlayerPool::Qualified => write!(f, "qualified"),
        }
    }
}

/// The three player-stats views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum ViewMode {
    /// League leaders (qualified players only)
    #[default]
    Leaders,
    /// Browse the full leaderboard and filter by name
    Search,
    /// Every player on one team's roster
    Team,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_stat_order_policy() {
        let ascending = [SortStat::Era, SortStat::Whip, SortStat::EarnedRunAverage];
        for stat in ascending {
            assert_eq!(stat.order(), SortOrder::Asc, "{stat} should sort ascending");
        }

        let descending = [
            SortStat::HomeRuns,
            SortStat::Avg,
            SortStat::Rbi,
            SortStat::Fielding,
            SortStat::Wins,
            SortStat::Saves,
            SortStat::Runs,
            SortStat::StrikeOuts,
            SortStat::Assists,
            SortStat::PutOuts,
        ];
        for stat in descending {
            assert_eq!(stat.order(), SortOrder::Desc, "{stat} should sort descending");
        }
    }

    #[test]
    fn test_sort_stat_serializes_as_service_name() {
        for stat in [
            SortStat::HomeRuns,
            SortStat::EarnedRunAverage,
            SortStat::StrikeOuts,
            SortStat::PutOuts,
        ] {
            let json = serde_json::to_value(stat).unwrap();
            assert_eq!(json, serde_json::json!(stat.as_str()));
        }
    }

    #[test]
    fn test_game_type_codes() {
        assert_eq!(serde_json::to_value(GameType::Regular).unwrap(), "R");
        assert_eq!(serde_json::to_value(GameType::Postseason).unwrap(), "P");
        assert_eq!(GameType::Spring.to_string(), "S");
    }

    #[test]
    fn test_team_stat_type_into_group() {
        assert_eq!(StatGroup::from(TeamStatType::Hitting), StatGroup::Hitting);
        assert_eq!(StatGroup::from(TeamStatType::Pitching), StatGroup::Pitching);
    }

    #[test]
    fn test_player_pool_default_is_qualified() {
        assert_eq!(PlayerPool::default(), PlayerPool::Qualified);
        assert_eq!(serde_json::to_value(PlayerPool::All).unwrap(), "all");
    }
}
