//! Entry point: parse CLI and dispatch to command handlers.

use std::process::ExitCode;

use clap::Parser;
use mlb_stats::{
    cli::{Commands, GetCmd, StatsCli},
    commands::{
        player_stats::{handle_player_stats, PlayerStatsParams},
        schedule::handle_schedule,
        standings::handle_standings,
        team_stats::handle_team_stats,
        teams::handle_teams,
        CommandContext,
    },
    config::Config,
    core::query::ViewStatus,
    Result,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "mlb_stats=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(app: StatsCli) -> Result<ViewStatus> {
    let ctx = CommandContext::new(Config::from_env()?)?;

    let status = match app.command {
        Commands::Get { cmd } => match cmd {
            GetCmd::Standings {
                league,
                season,
                output,
            } => handle_standings(&ctx, league, season, output.json).await?,

            GetCmd::TeamStats {
                stat_type,
                season,
                split,
                game_type,
                output,
            } => handle_team_stats(&ctx, stat_type, season, split, game_type, output.json).await?,

            GetCmd::PlayerStats {
                group,
                view,
                team_id,
                search,
                pool,
                season,
                limit,
                game_type,
                output,
            } => {
                handle_player_stats(
                    &ctx,
                    PlayerStatsParams {
                        group,
                        view,
                        team_id,
                        search,
                        pool,
                        season,
                        limit,
                        game_type,
                        as_json: output.json,
                    },
                )
                .await?
            }

            GetCmd::Schedule { day, watch, output } => {
                handle_schedule(&ctx, day, watch, output.json).await?
            }

            GetCmd::Teams { output } => handle_teams(&ctx, output.json).await?,
        },
    };

    Ok(status)
}

/// Run the CLI.
#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let app = StatsCli::parse();

    match run(app).await {
        // The view has already printed the failure.
        Ok(ViewStatus::Error(_)) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
