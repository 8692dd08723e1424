//! Integration tests for command handlers

use super::*;
use crate::{
    cli::types::{GameType, LeagueId, ScheduleDay, Season, StatGroup, TeamStatType, ViewMode},
    commands::{
        player_stats::{handle_player_stats, PlayerStatsParams},
        schedule::handle_schedule,
        standings::handle_standings,
        team_stats::handle_team_stats,
        teams::handle_teams,
    },
    config::Config,
    core::query::ViewStatus,
};
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn context_for(server: &MockServer) -> CommandContext {
    CommandContext::new(Config::default().with_base_url(&server.uri())).unwrap()
}

fn players_body() -> serde_json::Value {
    json!({
        "stats": [
            { "playerId": 592450, "playerName": "Aaron Judge", "teamName": "New York Yankees",
              "teamAbbrev": "NYY", "homeRuns": 58, "avg": ".322", "rbi": 144 },
            { "playerId": 660271, "playerName": "Shohei Ohtani", "teamName": "Los Angeles Dodgers",
              "teamAbbrev": "LAD", "homeRuns": 54, "avg": ".310", "rbi": 130 }
        ],
        "totalSize": 2
    })
}

#[cfg(test)]
mod view_tests {
    use super::*;

    #[tokio::test]
    async fn test_standings_ready() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/standings"))
            .and(query_param("leagueId", "103"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "records": [{
                    "division": { "id": 201 },
                    "teamRecords": [{
                        "team": { "id": 110, "name": "Baltimore Orioles" },
                        "wins": 101, "losses": 61,
                        "winningPercentage": ".623", "gamesBack": "-",
                        "runDifferential": 129
                    }]
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        let status = handle_standings(&ctx, LeagueId::AMERICAN, Season::new(2023), false)
            .await
            .unwrap();
        assert_eq!(status, ViewStatus::Ready);
    }

    #[tokio::test]
    async fn test_repeat_view_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "teams": [
                    { "id": 147, "name": "New York Yankees", "abbreviation": "NYY", "sport": { "id": 1 } },
                    { "id": 531, "name": "Scranton/Wilkes-Barre RailRiders", "sport": { "id": 11 } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        assert_eq!(handle_teams(&ctx, false).await.unwrap(), ViewStatus::Ready);
        assert_eq!(handle_teams(&ctx, true).await.unwrap(), ViewStatus::Ready);
        assert_eq!(ctx.caches.teams.stats().entries, 1);
    }

    #[tokio::test]
    async fn test_team_stats_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        let status = handle_team_stats(
            &ctx,
            TeamStatType::Pitching,
            Season::new(2024),
            None,
            GameType::Regular,
            false,
        )
        .await
        .unwrap();

        assert!(matches!(status, ViewStatus::Error(ref msg) if msg.contains("500")));
        assert_eq!(ctx.caches.team_stats.stats().entries, 0);
    }

    #[tokio::test]
    async fn test_roster_without_team_never_fetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/player"))
            .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
            .expect(0)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        let params = PlayerStatsParams {
            view: ViewMode::Team,
            ..Default::default()
        };
        let status = handle_player_stats(&ctx, params).await.unwrap();
        assert_eq!(status, ViewStatus::Idle);
    }

    #[tokio::test]
    async fn test_player_search_filters_by_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/player"))
            .and(query_param("playerPool", "all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(players_body()))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        let search = |term: &str| PlayerStatsParams {
            group: StatGroup::Hitting,
            view: ViewMode::Search,
            search: Some(term.to_string()),
            pool: crate::cli::types::PlayerPool::All,
            ..Default::default()
        };

        let found = handle_player_stats(&ctx, search("dodgers")).await.unwrap();
        assert_eq!(found, ViewStatus::Ready);

        let missing = handle_player_stats(&ctx, search("mariners")).await.unwrap();
        assert_eq!(missing, ViewStatus::Empty);
    }

    #[tokio::test]
    async fn test_empty_schedule() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedule"))
            .and(query_param("sportId", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "totalGames": 0, "dates": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context_for(&server);
        let status = handle_schedule(&ctx, ScheduleDay::Today, false, false)
            .await
            .unwrap();
        assert_eq!(status, ViewStatus::Empty);
    }
}
