//! Schedule command implementation
//!
//! With `--watch` the day's games are re-fetched on the configured interval
//! and re-printed after each refresh until Ctrl-C.

use std::{future::Future, sync::Arc};

use chrono::{Local, NaiveDate};
use tokio::sync::watch;

use crate::{
    cli::types::ScheduleDay,
    core::{
        cache::QueryKey,
        params::{build_schedule_params, Endpoint, ScheduleQuery},
        query::{Query, QueryState, RefetchHandle, ViewStatus},
    },
    mlb::{
        types::{Game, ScheduleResponse},
        MlbClient,
    },
    Result,
};

use super::common::{print_json, print_status, CommandContext};

/// Handle the schedule command
pub async fn handle_schedule(
    ctx: &CommandContext,
    day: ScheduleDay,
    watch: bool,
    as_json: bool,
) -> Result<ViewStatus> {
    let date = day.resolve(Local::now().date_naive());
    let query = build_schedule_params(date);
    let key = QueryKey::new(Endpoint::Schedule, &query)?;

    let schedule = Arc::new(Query::new(Arc::clone(&ctx.caches.schedule), Some(key)));

    if !as_json {
        println!("Games for {} ({})", day, date);
        print_status(&ViewStatus::Loading, "games");
    }

    let client = ctx.client.clone();
    let state = schedule
        .run(|| fetch_schedule(client.clone(), query.clone()))
        .await;
    let status = render(&state, date, as_json)?;

    if !watch {
        return Ok(status);
    }

    let updates = schedule.subscribe();
    let refetch = RefetchHandle::spawn(
        Arc::clone(&schedule),
        ctx.config.refetch_interval,
        move || fetch_schedule(client.clone(), query.clone()),
    );

    if !as_json {
        println!(
            "Watching; refreshing every {}s. Press Ctrl-C to stop.",
            ctx.config.refetch_interval.as_secs()
        );
    }

    let last = watch_until(
        updates,
        status,
        date,
        as_json,
        tokio::signal::ctrl_c(),
    )
    .await?;

    refetch.shutdown().await;
    Ok(last)
}

/// Re-render on every settled state until `stop` resolves or the query goes
/// away. `stop` is created once, so a signal that lands mid-render is still
/// seen on the next pass.
async fn watch_until<S>(
    mut updates: watch::Receiver<QueryState<ScheduleResponse>>,
    mut last: ViewStatus,
    date: NaiveDate,
    as_json: bool,
    stop: S,
) -> Result<ViewStatus>
where
    S: Future,
{
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if state.is_loading() {
                    continue;
                }
                last = render(&state, date, as_json)?; // tarpaulin::skip
            }
        }
    }

    Ok(last)
}

async fn fetch_schedule(client: MlbClient, query: ScheduleQuery) -> Result<ScheduleResponse> {
    client.get_schedule(&query).await
}

fn render(state: &QueryState<ScheduleResponse>, date: NaiveDate, as_json: bool) -> Result<ViewStatus> {
    let status = state.view_status(|s| s.games().next().is_none());

    if as_json {
        if let Some(schedule) = state.value() {
            print_json(schedule)?;
            return Ok(status);
        }
    }

    if print_status(&status, &format!("games on {date}")) {
        if let Some(schedule) = state.value() {
            print_games(schedule); // tarpaulin::skip
        }
    }
    Ok(status)
}

/// `"Yankees 3 @ Red Sox 5  [Final]"`; scores are blank before first pitch.
pub fn game_line(game: &Game) -> String {
    let side = |name: &str, score: Option<u32>| match score {
        Some(runs) => format!("{name} {runs}"),
        None => name.to_string(),
    };

    format!(
        "{} @ {}  [{}]",
        side(&game.teams.away.team.name, game.teams.away.score),
        side(&game.teams.home.team.name, game.teams.home.score),
        game.status.detailed_state
    )
}

fn print_games(schedule: &ScheduleResponse) {
    println!();
    for game in schedule.games() {
        let marker = if game.is_live() { "●" } else { " " };
        println!("{marker} {}", game_line(game));
    }
}
