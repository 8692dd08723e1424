//! Player statistics: league leaders, full search and team rosters.
//!
//! All three views read the player leaderboard endpoint; they differ only in
//! the query they build. The roster view is gated on a team selection and
//! prints a prompt instead of fetching when none is given.
//!
//! Name filtering happens client-side on whatever page the service returned.

use crate::{
    cli::types::{GameType, PlayerPool, StatGroup, StatSeason, TeamId, ViewMode},
    core::{
        cache::QueryKey,
        params::{
            build_league_leaders_params, build_player_search_params, build_team_roster_params,
            Endpoint, LeaderboardQuery, LEADERS_LIMIT,
        },
        query::ViewStatus,
    },
    error::StatsError,
    mlb::{
        compute::{category_leaders, filter_by_name},
        types::PlayerStat,
    },
    Result,
};

use super::common::{cell, load, opt_count, opt_rate, print_json, print_status, CommandContext};

/// Options for the player stats command.
#[derive(Debug, Clone, Default)]
pub struct PlayerStatsParams {
    pub group: StatGroup,
    pub view: ViewMode,
    pub team_id: Option<TeamId>,
    pub search: Option<String>,
    pub pool: PlayerPool,
    pub season: StatSeason,
    pub limit: Option<u32>,
    pub game_type: GameType,
    pub as_json: bool,
}

impl PlayerStatsParams {
    fn search_term(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

/// Query for the selected view, or `None` when the roster view has no team.
///
/// Leaders and rosters are always regular season; `game_type` only reaches
/// the search view.
pub fn build_view_query(params: &PlayerStatsParams) -> Result<Option<LeaderboardQuery>> {
    let query = match params.view {
        ViewMode::Leaders => build_league_leaders_params(
            params.group,
            params.season,
            params.limit.unwrap_or(LEADERS_LIMIT),
        )?,
        ViewMode::Search => build_player_search_params(params.group, params.season, params.pool)
            .with_game_type(params.game_type),
        ViewMode::Team => {
            match build_team_roster_params(params.team_id, params.group, params.season) {
                Ok(query) => query,
                Err(StatsError::MissingTeamId) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    };
    Ok(Some(query))
}

/// Handle the player stats command
pub async fn handle_player_stats(
    ctx: &CommandContext,
    params: PlayerStatsParams,
) -> Result<ViewStatus> {
    let Some(query) = build_view_query(&params)? else {
        println!("Select a team with --team-id to see its roster (`mlb-stats get teams` lists IDs).");
        return Ok(ViewStatus::Idle);
    };
    let key = QueryKey::new(Endpoint::PlayerLeaderboard, &query)?;

    if !params.as_json {
        println!("{} {} stats, {}", view_title(params.view), params.group, params.season);
        print_status(&ViewStatus::Loading, "player stats");
    }

    let state = load(&ctx.caches.player_stats, Some(key), || {
        ctx.client.get_player_stats(&query)
    })
    .await;

    let term = params.search_term();
    let status = state.view_status(|s| filter_by_name(&s.stats, term).is_empty());

    let Some(response) = state.value() else {
        print_status(&status, "player stats");
        return Ok(status);
    };
    let rows: Vec<PlayerStat> = filter_by_name(&response.stats, term)
        .into_iter()
        .cloned()
        .collect();

    if params.as_json {
        print_json(&rows)?;
        return Ok(status);
    }

    if status == ViewStatus::Empty && !term.trim().is_empty() {
        println!("No players match \"{}\".", term.trim());
        return Ok(status);
    }

    if print_status(&status, "player stats") {
        // tarpaulin::skip - console output
        if params.view == ViewMode::Leaders {
            for leader in category_leaders(&rows, params.group) {
                println!(
                    "★ {}: {} ({})",
                    leader.label,
                    leader.row.player_name,
                    leader.value()
                );
            }
            println!();
        }
        print_players(&rows, params.group);
        println!("{} of {} players", rows.len(), response.total_size);
    }

    Ok(status)
}

fn view_title(view: ViewMode) -> &'static str {
    match view {
        ViewMode::Leaders => "League leaders:",
        ViewMode::Search => "Player search:",
        ViewMode::Team => "Team roster:",
    }
}

fn print_players(players: &[PlayerStat], group: StatGroup) {
    match group {
        StatGroup::Hitting => {
            println!(
                "{} {} {:>3} {:>5} {:>4} {:>4} {:>4} {:>4} {:>5}",
                cell("Player", 22),
                cell("Team", 5),
                "POS",
                "AVG",
                "HR",
                "RBI",
                "R",
                "H",
                "OPS"
            );
            for p in players {
                println!(
                    "{} {} {:>3} {:>5} {:>4} {:>4} {:>4} {:>4} {:>5}",
                    cell(&p.player_name, 22),
                    cell(p.team_abbrev.as_deref().unwrap_or("-"), 5),
                    p.position(),
                    opt_rate(&p.avg),
                    opt_count(p.home_runs),
                    opt_count(p.rbi),
                    opt_count(p.runs),
                    opt_count(p.hits),
                    opt_rate(&p.ops),
                );
            }
        }
        StatGroup::Pitching => {
            println!(
                "{} {} {:>3} {:>3} {:>5} {:>5} {:>4} {:>3} {:>6}",
                cell("Player", 22),
                cell("Team", 5),
                "W",
                "L",
                "ERA",
                "WHIP",
                "SO",
                "SV",
                "IP"
            );
            for p in players {
                println!(
                    "{} {} {:>3} {:>3} {:>5} {:>5} {:>4} {:>3} {:>6}",
                    cell(&p.player_name, 22),
                    cell(p.team_abbrev.as_deref().unwrap_or("-"), 5),
                    opt_count(p.wins),
                    opt_count(p.losses),
                    opt_rate(&p.era),
                    opt_rate(&p.whip),
                    opt_count(p.strike_outs),
                    opt_count(p.saves),
                    opt_rate(&p.innings_pitched),
                );
            }
        }
        StatGroup::Fielding => {
            println!(
                "{} {} {:>3} {:>5} {:>4} {:>4} {:>3}",
                cell("Player", 22),
                cell("Team", 5),
                "POS",
                "FLD%",
                "A",
                "PO",
                "E"
            );
            for p in players {
                println!(
                    "{} {} {:>3} {:>5} {:>4} {:>4} {:>3}",
                    cell(&p.player_name, 22),
                    cell(p.team_abbrev.as_deref().unwrap_or("-"), 5),
                    p.position(),
                    opt_rate(&p.fielding),
                    opt_count(p.assists),
                    opt_count(p.put_outs),
                    opt_count(p.errors),
                );
            }
        }
    }
}
