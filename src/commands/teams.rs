//! Teams command implementation

use crate::{
    core::{
        cache::QueryKey,
        params::Endpoint,
        query::ViewStatus,
    },
    mlb::types::Team,
    Result,
};

use super::common::{cell, load, print_json, print_status, CommandContext};

/// Handle the teams command
pub async fn handle_teams(ctx: &CommandContext, as_json: bool) -> Result<ViewStatus> {
    if !as_json {
        print_status(&ViewStatus::Loading, "teams");
    }

    let state = load(&ctx.caches.teams, Some(QueryKey::bare(Endpoint::Teams)), || {
        ctx.client.get_teams()
    })
    .await;
    let status = state.view_status(|t| t.mlb_teams().is_empty());

    let teams: Vec<&Team> = state.value().map(|t| t.mlb_teams()).unwrap_or_default();

    if as_json && state.value().is_some() {
        print_json(&teams)?;
        return Ok(status);
    }

    if print_status(&status, "teams") {
        println!("{:>4} {} {}", "ID", cell("Abbr", 5), "Team");
        for team in teams {
            println!(
                "{:>4} {} {}",
                team.id,
                cell(team.abbreviation.as_deref().unwrap_or("-"), 5),
                team.name
            );
        }
    }

    Ok(status)
}
