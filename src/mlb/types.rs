//! Response payloads for the MLB stats API and leaderboard service.
//!
//! Field names follow the services' camelCase JSON. Rate stats (`avg`, `era`,
//! `whip`, ...) arrive as strings such as `".251"` and are kept that way; the
//! compute module does any numeric coercion.

use serde::{Deserialize, Deserializer, Serialize};

use crate::cli::types::{PlayerId, TeamId};


/// Accept a rate stat sent either as a string (`".251"`) or a bare number.
fn de_opt_rate<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeamRef {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdLink {
    pub id: u32,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub team: TeamRef,
    pub wins: u32,
    pub losses: u32,
    /// Decimal in [0, 1] as a string, e.g. `".583"`.
    pub winning_percentage: String,
    /// `"-"` for the division leader.
    pub games_back: String,
    #[serde(default)]
    pub division_rank: Option<String>,
    #[serde(default)]
    pub league_rank: Option<String>,
    #[serde(default)]
    pub wild_card_rank: Option<String>,
    #[serde(default)]
    pub run_differential: i32,
    #[serde(default)]
    pub runs_scored: Option<u32>,
    #[serde(default)]
    pub runs_allowed: Option<u32>,
    #[serde(default)]
    pub clinch_indicator: Option<String>,
    #[serde(default)]
    pub elimination_number: Option<String>,
}

impl TeamRecord {
    pub fn win_pct(&self) -> Option<f64> {
        self.winning_percentage.trim().parse().ok()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    #[serde(default)]
    pub standings_type: Option<String>,
    #[serde(default)]
    pub league: Option<IdLink>,
    pub division: IdLink,
    #[serde(default)]
    pub team_records: Vec<TeamRecord>,
}

impl Division {
    pub fn name(&self) -> &'static str {
        division_name(self.division.id)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub records: Vec<Division>,
}

/// Display name for the six MLB division IDs.
pub fn division_name(division_id: u32) -> &'static str {
    match division_id {
        200 => "AL West",
        201 => "AL East",
        202 => "AL Central",
        203 => "NL West",
        204 => "NL East",
        205 => "NL Central",
        _ => "Unknown Division",
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sport {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub sport: Option<Sport>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl TeamsResponse {
    /// `/teams` also lists minor-league clubs; keep MLB (`sport.id == 1`), sorted by name.
    pub fn mlb_teams(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self
            .teams
            .iter()
            .filter(|t| t.sport.as_ref().is_some_and(|s| s.id == 1))
            .collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub abstract_game_state: String,
    #[serde(default)]
    pub detailed_state: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameSide {
    pub team: TeamRef,
    #[serde(default)]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameTeams {
    pub away: GameSide,
    pub home: GameSide,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_pk: u64,
    #[serde(default)]
    pub game_date: Option<String>,
    pub status: GameStatus,
    pub teams: GameTeams,
}

impl Game {
    pub fn is_live(&self) -> bool {
        self.status.abstract_game_state == "Live"
    }

    pub fn is_final(&self) -> bool {
        self.status.abstract_game_state == "Final"
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleDate {
    pub date: String,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub total_games: u32,
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

impl ScheduleResponse {
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.dates.iter().flat_map(|d| d.games.iter())
    }
}

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

/// One team's totals for a season, game type and stat group.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStat {
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub team_abbrev: String,
    #[serde(default)]
    pub team_short_name: Option<String>,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub league_abbrev: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub division_name: Option<String>,

    // hitting
    #[serde(default)]
    pub games_played: Option<u32>,
    #[serde(default)]
    pub at_bats: Option<u32>,
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub hits: Option<u32>,
    #[serde(default)]
    pub doubles: Option<u32>,
    #[serde(default)]
    pub triples: Option<u32>,
    #[serde(default)]
    pub home_runs: Option<u32>,
    #[serde(default)]
    pub rbi: Option<u32>,
    #[serde(default)]
    pub stolen_bases: Option<u32>,
    #[serde(default)]
    pub base_on_balls: Option<u32>,
    #[serde(default)]
    pub strike_outs: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub avg: Option<String>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub obp: Option<String>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub slg: Option<String>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub ops: Option<String>,

    // pitching
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub saves: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub era: Option<String>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub whip: Option<String>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub earned_runs: Option<u32>,
    #[serde(default)]
    pub hits_allowed: Option<u32>,
    #[serde(default)]
    pub walks_allowed: Option<u32>,
    #[serde(default)]
    pub home_runs_allowed: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsResponse {
    #[serde(default)]
    pub stats: Vec<TeamStat>,
    #[serde(default)]
    pub total_size: u32,
}

/// One player's line for a season (or career) and stat group.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default)]
    pub player_full_name: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub team_abbrev: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub position_abbrev: Option<String>,
    #[serde(default)]
    pub primary_position_abbrev: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub games_played: Option<u32>,

    // hitting
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub avg: Option<String>,
    #[serde(default)]
    pub home_runs: Option<u32>,
    #[serde(default)]
    pub rbi: Option<u32>,
    #[serde(default)]
    pub hits: Option<u32>,
    #[serde(default)]
    pub at_bats: Option<u32>,
    #[serde(default)]
    pub runs: Option<u32>,
    #[serde(default)]
    pub stolen_bases: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub ops: Option<String>,

    // pitching
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub era: Option<String>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
    #[serde(default)]
    pub saves: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub innings_pitched: Option<String>,
    #[serde(default)]
    pub strike_outs: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub whip: Option<String>,

    // fielding
    #[serde(default, deserialize_with = "de_opt_rate")]
    pub fielding: Option<String>,
    #[serde(default)]
    pub errors: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub put_outs: Option<u32>,
    #[serde(default)]
    pub chances: Option<u32>,
    #[serde(default)]
    pub double_plays: Option<u32>,
}

impl PlayerStat {
    pub fn position(&self) -> &str {
        self.position_abbrev
            .as_deref()
            .or(self.primary_position_abbrev.as_deref())
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsResponse {
    #[serde(default)]
    pub stats: Vec<PlayerStat>,
    #[serde(default)]
    pub total_size: u32,
    #[serde(default)]
    pub player_pool: Option<String>,
}
