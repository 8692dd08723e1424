//! Unit tests for the query parameter builders

use super::*;
use serde_json::json;

fn params_of<T: Serialize>(query: &T) -> QueryParams {
    query.to_query_params().unwrap()
}

#[cfg(test)]
mod league_leaders_tests {
    use super::*;

    #[test]
    fn test_sort_stat_per_group() {
        let season = Season::new(2024);
        let cases = [
            (StatGroup::Hitting, "homeRuns", "desc"),
            (StatGroup::Pitching, "era", "asc"),
            (StatGroup::Fielding, "fielding", "desc"),
        ];

        for (group, sort_stat, order) in cases {
            let params = params_of(&build_league_leaders_params(group, season, 20).unwrap());
            assert_eq!(params.get_str("sortStat"), Some(sort_stat));
            assert_eq!(params.get_str("order"), Some(order));
        }
    }

    #[test]
    fn test_ascending_only_for_lower_is_better() {
        for group in [StatGroup::Hitting, StatGroup::Pitching, StatGroup::Fielding] {
            let query = build_league_leaders_params(group, Season::new(2025), 10).unwrap();
            let ascending = query.order == SortOrder::Asc;
            let lower_better = matches!(query.sort_stat, SortStat::Era | SortStat::Whip);
            assert_eq!(ascending, lower_better, "group {group}");
        }
    }

    #[test]
    fn test_qualified_regular_season_no_team() {
        let params =
            params_of(&build_league_leaders_params(StatGroup::Hitting, Season::new(2025), 20).unwrap());

        assert_eq!(params.get_str("playerPool"), Some("qualified"));
        assert_eq!(params.get_str("gameType"), Some("R"));
        assert_eq!(params.get_int("limit"), Some(20));
        assert_eq!(params.get_int("offset"), Some(0));
        assert_eq!(params.get_str("stats"), Some("season"));
        assert_eq!(params.get_str("env"), Some("prod"));
        assert_eq!(params.get_int("sportId"), Some(1));
        assert!(!params.contains("teamId"));
        assert!(!params.contains("split"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = build_league_leaders_params(StatGroup::Pitching, Season::new(2025), 0).unwrap_err();
        assert!(matches!(err, StatsError::InvalidLimit { limit: 0 }));
    }

    #[test]
    fn test_career_scope() {
        let params =
            params_of(&build_league_leaders_params(StatGroup::Hitting, StatSeason::Career, 10).unwrap());
        assert_eq!(params.get_str("stats"), Some("career"));
        assert_eq!(params.get_str("season"), Some("career"));
    }
}

#[cfg(test)]
mod roster_tests {
    use super::*;

    #[test]
    fn test_requires_team() {
        let err = build_team_roster_params(None, StatGroup::Hitting, Season::new(2025)).unwrap_err();
        assert!(matches!(err, StatsError::MissingTeamId));
    }

    #[test]
    fn test_all_players_and_team_id() {
        for group in [StatGroup::Hitting, StatGroup::Pitching, StatGroup::Fielding] {
            let query =
                build_team_roster_params(Some(TeamId::new(147)), group, Season::new(2025)).unwrap();
            let params = params_of(&query);

            assert_eq!(params.get_str("playerPool"), Some("all"));
            assert_eq!(params.get_int("teamId"), Some(147));
            assert!(params.get_int("limit").unwrap() >= 50);
        }
    }

    #[test]
    fn test_sort_defaults() {
        let team = Some(TeamId::new(121));
        let season = Season::new(2024);

        let hitting = build_team_roster_params(team, StatGroup::Hitting, season).unwrap();
        assert_eq!(hitting.sort_stat, SortStat::Avg);
        assert_eq!(hitting.order, SortOrder::Desc);

        let pitching = build_team_roster_params(team, StatGroup::Pitching, season).unwrap();
        assert_eq!(pitching.sort_stat, SortStat::Era);
        assert_eq!(pitching.order, SortOrder::Asc);

        let fielding = build_team_roster_params(team, StatGroup::Fielding, season).unwrap();
        assert_eq!(fielding.sort_stat, SortStat::Era);
        assert_eq!(fielding.order, SortOrder::Asc);
    }
}

#[cfg(test)]
mod player_search_tests {
    use super::*;

    #[test]
    fn test_sort_policy_and_page_size() {
        let cases = [
            (StatGroup::Hitting, SortStat::Avg, SortOrder::Desc),
            (StatGroup::Pitching, SortStat::Era, SortOrder::Asc),
            (StatGroup::Fielding, SortStat::Fielding, SortOrder::Desc),
        ];

        for (group, stat, order) in cases {
            let query = build_player_search_params(group, Season::new(2025), PlayerPool::default());
            assert_eq!(query.sort_stat, stat);
            assert_eq!(query.order, order);
            assert_eq!(query.limit, SEARCH_PAGE_SIZE);
        }
    }

    #[test]
    fn test_default_pool_is_qualified() {
        let params = params_of(&build_player_search_params(
            StatGroup::Hitting,
            Season::new(2025),
            PlayerPool::default(),
        ));
        assert_eq!(params.get_str("playerPool"), Some("qualified"));
        assert!(!params.contains("teamId"));
    }

    #[test]
    fn test_selected_pool_is_passed_through() {
        let params = params_of(&build_player_search_params(
            StatGroup::Pitching,
            Season::new(2025),
            PlayerPool::All,
        ));
        assert_eq!(params.get_str("playerPool"), Some("all"));
    }
}

#[cfg(test)]
mod team_stat_tests {
    use super::*;

    #[test]
    fn test_pitching_scenario() {
        let params = params_of(&build_team_stat_params(
            TeamStatType::Pitching,
            Season::new(2024),
        ));

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(
            json,
            json!({
                "env": "prod",
                "sportId": 1,
                "gameType": "R",
                "group": "pitching",
                "order": "asc",
                "sortStat": "earnedRunAverage",
                "stats": "season",
                "season": 2024,
                "limit": 30,
                "offset": 0
            })
        );
    }

    #[test]
    fn test_hitting_sorted_by_home_runs() {
        let query = build_team_stat_params(TeamStatType::Hitting, Season::new(2025));
        assert_eq!(query.sort_stat, SortStat::HomeRuns);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!(query.limit, LEAGUE_TEAM_COUNT);
        assert!(query.player_pool.is_none());
    }

    #[test]
    fn test_split_only_when_set() {
        let base = build_team_stat_params(TeamStatType::Hitting, Season::new(2025));

        let with_split = params_of(&base.clone().with_split(Some("h".to_string())));
        assert_eq!(with_split.get_str("split"), Some("h"));

        let blank = params_of(&base.clone().with_split(Some("  ".to_string())));
        assert!(!blank.contains("split"));

        let none = params_of(&base.with_split(None));
        assert!(!none.contains("split"));
    }

    #[test]
    fn test_game_type_override() {
        let query = build_team_stat_params(TeamStatType::Hitting, Season::new(2025))
            .with_game_type(GameType::Postseason);
        assert_eq!(params_of(&query).get_str("gameType"), Some("P"));
    }
}

#[cfg(test)]
mod standings_schedule_tests {
    use super::*;

    #[test]
    fn test_standings_params() {
        let params = params_of(&build_standings_params(LeagueId::NATIONAL, Season::new(2024)));
        assert_eq!(params.get_int("leagueId"), Some(104));
        assert_eq!(params.get_int("season"), Some(2024));
        assert_eq!(params.get_str("standingsTypes"), Some("regularSeason"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_schedule_params() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let params = params_of(&build_schedule_params(date));
        assert_eq!(params.get_int("sportId"), Some(1));
        assert_eq!(params.get_str("date"), Some("2024-07-04"));
    }
}

#[cfg(test)]
mod query_params_tests {
    use super::*;

    #[test]
    fn test_building_twice_is_identical() {
        let a = params_of(&build_league_leaders_params(StatGroup::Pitching, Season::new(2023), 15).unwrap());
        let b = params_of(&build_league_leaders_params(StatGroup::Pitching, Season::new(2023), 15).unwrap());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let mut a = QueryParams::new();
        a.insert("season", 2025i64);
        a.insert("group", "hitting");

        let mut b = QueryParams::new();
        b.insert("group", "hitting");
        b.insert("season", 2025i64);

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "group=hitting&season=2025");
    }

    #[test]
    fn test_display_joins_pairs() {
        let params = params_of(&build_standings_params(LeagueId::AMERICAN, Season::new(2024)));
        assert_eq!(
            params.to_string(),
            "leagueId=103&season=2024&standingsTypes=regularSeason"
        );
    }

    #[test]
    fn test_endpoint_names_and_paths() {
        assert_eq!(Endpoint::TeamLeaderboard.path(), "/team");
        assert_eq!(Endpoint::PlayerLeaderboard.path(), "/player");
        assert_eq!(Endpoint::Standings.to_string(), "standings");
    }
}
