//! CLI argument definitions and parsing structures.

use super::types::{
    groups::{GameType, PlayerPool, StatGroup, TeamStatType, ViewMode},
    ids::{LeagueId, TeamId},
    time::{ScheduleDay, Season, StatSeason},
};
use clap::{Args, Parser, Subcommand};

/// Output switches shared by every view.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Output results as JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Division standings for one league.
    Standings {
        /// League: `al`, `nl` or a numeric league ID.
        #[clap(long, short, default_value_t = LeagueId::default())]
        league: LeagueId,

        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Team leaderboard for hitting or pitching, with quick-stat leaders.
    TeamStats {
        /// Leaderboard to show.
        #[clap(long = "type", short = 't', value_enum, default_value_t)]
        stat_type: TeamStatType,

        /// Season year (e.g. 2025).
        #[clap(long, short, default_value_t = Season::default())]
        season: Season,

        /// Optional situational split passed through to the service.
        #[clap(long)]
        split: Option<String>,

        /// Regular season, postseason or spring training.
        #[clap(long, value_enum, default_value_t)]
        game_type: GameType,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Player statistics: league leaders, full search, or one team's roster.
    PlayerStats {
        /// Stat group.
        #[clap(long, short, value_enum, default_value_t)]
        group: StatGroup,

        /// Which player view to show.
        #[clap(long, short, value_enum, default_value_t)]
        view: ViewMode,

        /// Team for the roster view (see `get teams` for IDs).
        #[clap(long)]
        team_id: Option<TeamId>,

        /// Filter by player or team name (substring, case-insensitive).
        #[clap(long = "search", short = 'q')]
        search: Option<String>,

        /// Player pool for the search view.
        #[clap(long, value_enum, default_value_t)]
        pool: PlayerPool,

        /// Season year, or `career`.
        #[clap(long, short, default_value_t = StatSeason::default())]
        season: StatSeason,

        /// Number of leaders to request (leaders view only).
        #[clap(long)]
        limit: Option<u32>,

        /// Game type for the search view; leaders and rosters are regular season.
        #[clap(long, value_enum, default_value_t)]
        game_type: GameType,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Games for one day. `--watch` keeps refreshing until Ctrl-C.
    Schedule {
        /// Which day to show.
        #[clap(long, short, value_enum, default_value_t)]
        day: ScheduleDay,

        /// Re-fetch on the configured interval (default 30 s).
        #[clap(long, short)]
        watch: bool,

        #[clap(flatten)]
        output: OutputArgs,
    },

    /// Every MLB team with its ID.
    Teams {
        #[clap(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "mlb-stats", about = "MLB standings, leaderboards and schedule")]
pub struct StatsCli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get data from the MLB stats services
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}
