//! Standings command implementation

use crate::{
    cli::types::{LeagueId, Season},
    core::{
        cache::QueryKey,
        params::{build_standings_params, Endpoint},
        query::ViewStatus,
    },
    mlb::{compute::format_win_pct, types::StandingsResponse},
    Result,
};

use super::common::{cell, load, print_json, print_status, CommandContext};

/// Handle the standings command
pub async fn handle_standings(
    ctx: &CommandContext,
    league: LeagueId,
    season: Season,
    as_json: bool,
) -> Result<ViewStatus> {
    let query = build_standings_params(league, season);
    let key = QueryKey::new(Endpoint::Standings, &query)?;

    if !as_json {
        println!("{} standings, {}", league.name(), season);
        print_status(&ViewStatus::Loading, "standings");
    }

    let state = load(&ctx.caches.standings, Some(key), || {
        ctx.client.get_standings(&query)
    })
    .await;
    let status = state.view_status(|s| s.records.is_empty());

    if as_json {
        if let Some(standings) = state.value() {
            print_json(standings)?;
            return Ok(status);
        }
    }

    if print_status(&status, "standings") {
        if let Some(standings) = state.value() {
            print_standings(standings); // tarpaulin::skip
        }
    }

    Ok(status)
}

fn print_standings(standings: &StandingsResponse) {
    for division in &standings.records {
        println!();
        println!("{}", division.name());
        println!(
            "{} {:>4} {:>4} {:>7} {:>5} {:>5}",
            cell("Team", 24),
            "W",
            "L",
            "PCT",
            "GB",
            "RD"
        );

        for record in &division.team_records {
            println!(
                "{} {:>4} {:>4} {:>7} {:>5} {:>+5}",
                cell(&record.team.name, 24),
                record.wins,
                record.losses,
                format_win_pct(&record.winning_percentage),
                record.games_back,
                record.run_differential,
            );
        }
    }
}
