//! Team leaderboard command implementation

use crate::{
    cli::types::{GameType, Season, TeamStatType},
    core::{
        cache::QueryKey,
        params::{build_team_stat_params, Endpoint},
        query::ViewStatus,
    },
    mlb::{
        compute::{team_leaders, Leader},
        types::TeamStat,
    },
    Result,
};

use super::common::{cell, load, opt_count, opt_rate, print_json, print_status, CommandContext};

/// Handle the team stats command
pub async fn handle_team_stats(
    ctx: &CommandContext,
    stat_type: TeamStatType,
    season: Season,
    split: Option<String>,
    game_type: GameType,
    as_json: bool,
) -> Result<ViewStatus> {
    let query = build_team_stat_params(stat_type, season)
        .with_split(split)
        .with_game_type(game_type);
    let key = QueryKey::new(Endpoint::TeamLeaderboard, &query)?;

    if !as_json {
        println!("Team {} stats, {}", stat_type, season);
        print_status(&ViewStatus::Loading, "team stats");
    }

    let state = load(&ctx.caches.team_stats, Some(key), || {
        ctx.client.get_team_stats(&query)
    })
    .await;
    let status = state.view_status(|s| s.stats.is_empty());

    if as_json {
        if let Some(response) = state.value() {
            print_json(response)?;
            return Ok(status);
        }
    }

    if print_status(&status, "team stats") {
        if let Some(response) = state.value() {
            // tarpaulin::skip - console output
            print_leaders(&team_leaders(&response.stats, stat_type));
            match stat_type {
                TeamStatType::Hitting => print_hitting(&response.stats),
                TeamStatType::Pitching => print_pitching(&response.stats),
            }
        }
    }

    Ok(status)
}

fn print_leaders(leaders: &[Leader<'_, TeamStat>]) {
    for leader in leaders {
        println!(
            "★ {}: {} ({})",
            leader.label,
            leader.row.team_name,
            leader.value()
        );
    }
    println!();
}

fn print_hitting(teams: &[TeamStat]) {
    println!(
        "{:>3} {} {:>4} {:>5} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
        "#",
        cell("Team", 24),
        "G",
        "AVG",
        "HR",
        "R",
        "RBI",
        "OBP",
        "SLG",
        "OPS"
    );
    for (i, team) in teams.iter().enumerate() {
        println!(
            "{:>3} {} {:>4} {:>5} {:>4} {:>4} {:>4} {:>5} {:>5} {:>5}",
            team.rank.unwrap_or(i as u32 + 1),
            cell(&team.team_name, 24),
            opt_count(team.games_played),
            opt_rate(&team.avg),
            opt_count(team.home_runs),
            opt_count(team.runs),
            opt_count(team.rbi),
            opt_rate(&team.obp),
            opt_rate(&team.slg),
            opt_rate(&team.ops),
        );
    }
}

fn print_pitching(teams: &[TeamStat]) {
    println!(
        "{:>3} {} {:>4} {:>4} {:>5} {:>5} {:>5} {:>4} {:>6}",
        "#",
        cell("Team", 24),
        "W",
        "L",
        "ERA",
        "WHIP",
        "SO",
        "SV",
        "IP"
    );
    for (i, team) in teams.iter().enumerate() {
        println!(
            "{:>3} {} {:>4} {:>4} {:>5} {:>5} {:>5} {:>4} {:>6}",
            team.rank.unwrap_or(i as u32 + 1),
            cell(&team.team_name, 24),
            opt_count(team.wins),
            opt_count(team.losses),
            opt_rate(&team.era),
            opt_rate(&team.whip),
            opt_count(team.strike_outs),
            opt_count(team.saves),
            opt_rate(&team.innings_pitched),
        );
    }
}
