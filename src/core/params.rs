//! Query parameter builders for the MLB stats endpoints.
//!
//! Every view reduces its selections (stat group, season, team, player pool)
//! to one of the typed query structs below. The structs serialize straight
//! into the request query string, and flatten into [`QueryParams`] for cache
//! keys and assertions.
//!
//! The sort direction of a leaderboard is never chosen here: it always comes
//! from [`SortStat::order`], so an ERA board can't end up listing the worst
//! pitchers first.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::cli::types::{
    GameType, LeagueId, PlayerPool, Season, SortOrder, SortStat, StatGroup, StatSeason,
    StatsScope, TeamId, TeamStatType,
};
use crate::error::{Result, StatsError};

#[cfg(test)]
mod tests;

/// `sportId` for Major League Baseball.
pub const MLB_SPORT_ID: u8 = 1;

/// The leaderboard service wants an explicit environment tag.
pub const LEADERBOARD_ENV: &str = "prod";

/// Every team in the league fits on one page.
pub const LEAGUE_TEAM_COUNT: u32 = 30;

/// Large enough for a full 40-man roster plus call-ups.
pub const ROSTER_LIMIT: u32 = 50;

/// Page size for the player search view; name filtering happens client-side.
pub const SEARCH_PAGE_SIZE: u32 = 100;

/// How many players the leaders view asks for.
pub const LEADERS_LIMIT: u32 = 20;

pub const REGULAR_SEASON_STANDINGS: &str = "regularSeason";

/// Logical endpoints. The name doubles as the first half of a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    Standings,
    Schedule,
    Teams,
    TeamLeaderboard,
    PlayerLeaderboard,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Standings => "standings",
            Endpoint::Schedule => "schedule",
            Endpoint::Teams => "teams",
            Endpoint::TeamLeaderboard => "teamLeaderboard",
            Endpoint::PlayerLeaderboard => "playerLeaderboard",
        }
    }

    /// Path relative to the owning service's base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Standings => "/standings",
            Endpoint::Schedule => "/schedule",
            Endpoint::Teams => "/teams",
            Endpoint::TeamLeaderboard => "/team",
            Endpoint::PlayerLeaderboard => "/player",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A primitive query-string value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

/// Flat, name-ordered mapping of query parameters.
///
/// Unset optional filters are absent rather than defaulted. Ordering by name
/// makes two mappings with the same contents equal and hash the same no
/// matter how they were assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name)? {
            ParamValue::Str(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.0.get(name)? {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "&")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Any `Serialize` query struct → [`QueryParams`].
pub trait ToQueryParams {
    fn to_query_params(&self) -> Result<QueryParams>;
}

impl<T> ToQueryParams for T
where
    T: Serialize,
{
    fn to_query_params(&self) -> Result<QueryParams> {
        let mut params = QueryParams::new();
        let Value::Object(fields) = serde_json::to_value(self)? else {
            return Ok(params);
        };

        for (name, value) in fields {
            match value {
                Value::Null => {}
                Value::String(s) => params.insert(name, ParamValue::Str(s)),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => params.insert(name, ParamValue::Int(i)),
                    None => params.insert(name, ParamValue::Str(n.to_string())),
                },
                Value::Bool(b) => params.insert(name, ParamValue::Str(b.to_string())),
                other => params.insert(name, ParamValue::Str(other.to_string())),
            }
        }
        Ok(params)
    }
}

/// Query for the team and player leaderboard endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub env: &'static str,
    pub sport_id: u8,
    pub game_type: GameType,
    pub group: StatGroup,
    pub order: SortOrder,
    pub sort_stat: SortStat,
    pub stats: StatsScope,
    pub season: StatSeason,
    pub limit: u32,
    pub offset: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_pool: Option<PlayerPool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
}

impl LeaderboardQuery {
    /// Regular-season query sorted best-first on `sort_stat`.
    pub fn new(group: StatGroup, season: StatSeason, sort_stat: SortStat, limit: u32) -> Self {
        Self {
            env: LEADERBOARD_ENV,
            sport_id: MLB_SPORT_ID,
            game_type: GameType::Regular,
            group,
            order: sort_stat.order(),
            sort_stat,
            stats: season.scope(),
            season,
            limit,
            offset: 0,
            split: None,
            player_pool: None,
            team_id: None,
        }
    }

    pub fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    /// Restrict to a split such as home or away games. Blank splits are ignored.
    pub fn with_split(mut self, split: Option<String>) -> Self {
        self.split = split.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_player_pool(mut self, pool: PlayerPool) -> Self {
        self.player_pool = Some(pool);
        self
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// Query for `GET /standings`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsQuery {
    pub league_id: LeagueId,
    pub season: Season,
    pub standings_types: &'static str,
}

/// Query for `GET /schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub sport_id: u8,
    /// `YYYY-MM-DD`
    pub date: String,
}

fn leaders_sort_stat(group: StatGroup) -> SortStat {
    match group {
        StatGroup::Hitting => SortStat::HomeRuns,
        StatGroup::Pitching => SortStat::Era,
        StatGroup::Fielding => SortStat::Fielding,
    }
}

fn search_sort_stat(group: StatGroup) -> SortStat {
    match group {
        StatGroup::Hitting => SortStat::Avg,
        StatGroup::Pitching => SortStat::Era,
        StatGroup::Fielding => SortStat::Fielding,
    }
}

fn roster_sort_stat(group: StatGroup) -> SortStat {
    match group {
        StatGroup::Hitting => SortStat::Avg,
        StatGroup::Pitching | StatGroup::Fielding => SortStat::Era,
    }
}

fn team_sort_stat(stat_type: TeamStatType) -> SortStat {
    match stat_type {
        TeamStatType::Hitting => SortStat::HomeRuns,
        TeamStatType::Pitching => SortStat::EarnedRunAverage,
    }
}

/// League leaders: qualified players only, regular season, best first.
pub fn build_league_leaders_params(
    group: StatGroup,
    season: impl Into<StatSeason>,
    limit: u32,
) -> Result<LeaderboardQuery> {
    if limit == 0 {
        return Err(StatsError::InvalidLimit { limit });
    }

    Ok(
        LeaderboardQuery::new(group, season.into(), leaders_sort_stat(group), limit)
            .with_player_pool(PlayerPool::Qualified),
    )
}

/// One team's roster, including players short of the qualification threshold.
///
/// Fails with [`StatsError::MissingTeamId`] when no team is selected; callers
/// treat that as "don't fetch yet" rather than as a failure.
pub fn build_team_roster_params(
    team_id: Option<TeamId>,
    group: StatGroup,
    season: impl Into<StatSeason>,
) -> Result<LeaderboardQuery> {
    let team_id = team_id.ok_or(StatsError::MissingTeamId)?;

    Ok(
        LeaderboardQuery::new(group, season.into(), roster_sort_stat(group), ROSTER_LIMIT)
            .with_player_pool(PlayerPool::All)
            .with_team(team_id),
    )
}

/// First page of the full player leaderboard, for client-side name search.
pub fn build_player_search_params(
    group: StatGroup,
    season: impl Into<StatSeason>,
    player_pool: PlayerPool,
) -> LeaderboardQuery {
    LeaderboardQuery::new(
        group,
        season.into(),
        search_sort_stat(group),
        SEARCH_PAGE_SIZE,
    )
    .with_player_pool(player_pool)
}

/// Every team's season totals for one stat type.
pub fn build_team_stat_params(stat_type: TeamStatType, season: Season) -> LeaderboardQuery {
    LeaderboardQuery::new(
        stat_type.into(),
        StatSeason::Year(season),
        team_sort_stat(stat_type),
        LEAGUE_TEAM_COUNT,
    )
}

pub fn build_standings_params(league_id: LeagueId, season: Season) -> StandingsQuery {
    StandingsQuery {
        league_id,
        season,
        standings_types: REGULAR_SEASON_STANDINGS,
    }
}

pub fn build_schedule_params(date: NaiveDate) -> ScheduleQuery {
    ScheduleQuery {
        sport_id: MLB_SPORT_ID,
        date: date.format("%Y-%m-%d").to_string(),
    }
}
