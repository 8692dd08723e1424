//! Unit tests for the query cache

use super::*;
use crate::cli::types::{LeagueId, Season, StatGroup};
use crate::core::params::{build_league_leaders_params, build_standings_params};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn standings_key(season: u16) -> QueryKey {
    QueryKey::new(
        Endpoint::Standings,
        &build_standings_params(LeagueId::AMERICAN, Season::new(season)),
    )
    .unwrap()
}

#[cfg(test)]
mod key_tests {
    use super::*;

    #[test]
    fn test_key_independent_of_insertion_order() {
        let mut a = QueryParams::new();
        a.insert("season", 2024i64);
        a.insert("leagueId", 103i64);

        let mut b = QueryParams::new();
        b.insert("leagueId", 103i64);
        b.insert("season", 2024i64);

        let key_a = QueryKey {
            endpoint: Endpoint::Standings,
            params: a,
        };
        let key_b = QueryKey {
            endpoint: Endpoint::Standings,
            params: b,
        };
        assert_eq!(key_a, key_b);

        let mut map = HashMap::new();
        map.insert(key_a, 1);
        assert_eq!(map.get(&key_b), Some(&1));
    }

    #[test]
    fn test_same_params_different_endpoint() {
        let query = build_league_leaders_params(StatGroup::Hitting, Season::new(2024), 20).unwrap();
        let player = QueryKey::new(Endpoint::PlayerLeaderboard, &query).unwrap();
        let team = QueryKey::new(Endpoint::TeamLeaderboard, &query).unwrap();
        assert_ne!(player, team);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            standings_key(2024).to_string(),
            "standings?leagueId=103&season=2024&standingsTypes=regularSeason"
        );
        assert_eq!(QueryKey::bare(Endpoint::Teams).to_string(), "teams");
    }
}

#[cfg(test)]
mod fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_miss_then_hit() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        let key = standings_key(2024);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let fetcher = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(7)
        };

        let (value, status) = cache.fetch(&key, fetcher).await.unwrap();
        assert_eq!((value, status), (7, CacheStatus::Miss));

        let (value, status) = cache.fetch(&key, fetcher).await.unwrap();
        assert_eq!((value, status), (7, CacheStatus::Hit));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_call() {
        let cache: QueryCache<String> = QueryCache::new(4);
        let key = standings_key(2024);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let slow = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok("standings".to_string())
        };

        let (a, b, c) = tokio::join!(
            cache.fetch(&key, slow),
            cache.fetch(&key, slow),
            cache.fetch(&key, slow),
        );

        assert_eq!(a.unwrap().0, "standings");
        assert_eq!(b.unwrap().0, "standings");
        assert_eq!(c.unwrap().0, "standings");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().in_flight, 0);
    }

    #[tokio::test]
    async fn test_distinct_keys_fetch_separately() {
        let cache: QueryCache<u16> = QueryCache::new(4);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for season in [2023, 2024] {
            let key = standings_key(season);
            cache
                .fetch(&key, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(season)
                })
                .await
                .unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.peek(&standings_key(2023)), Some(2023));
        assert_eq!(cache.stats().entries, 2);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        let key = standings_key(2024);

        let err = cache
            .fetch(&key, || async { Err(StatsError::MissingTeamId) })
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::MissingTeamId | StatsError::Shared(_)));
        assert!(cache.peek(&key).is_none());
        assert_eq!(cache.stats().in_flight, 0);

        let (value, status) = cache.fetch(&key, || async { Ok(1) }).await.unwrap();
        assert_eq!((value, status), (1, CacheStatus::Miss));
    }

    #[tokio::test]
    async fn test_concurrent_waiters_all_see_error() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        let key = standings_key(2024);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let failing = move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(StatsError::InvalidSeason("bad".into()))
        };

        let (a, b) = tokio::join!(cache.fetch(&key, failing), cache.fetch(&key, failing));
        assert!(a.is_err());
        let b = b.unwrap_err();
        assert!(b.to_string().contains("bad"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cached_value() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        let key = standings_key(2024);

        cache.fetch(&key, || async { Ok(1) }).await.unwrap();
        let (value, status) = cache.refresh(&key, || async { Ok(2) }).await.unwrap();

        assert_eq!((value, status), (2, CacheStatus::Refreshed));
        assert_eq!(cache.peek(&key), Some(2));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_value() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        let key = standings_key(2024);

        cache.fetch(&key, || async { Ok(1) }).await.unwrap();
        let result = cache
            .refresh(&key, || async { Err(StatsError::MissingTeamId) })
            .await;

        assert!(result.is_err());
        assert_eq!(cache.peek(&key), Some(1));
    }
}

#[cfg(test)]
mod eviction_tests {
    use super::*;

    #[tokio::test]
    async fn test_lru_eviction_and_invalidate() {
        let cache: QueryCache<u16> = QueryCache::new(2);

        for season in [2022, 2023, 2024] {
            cache
                .fetch(&standings_key(season), move || async move { Ok(season) })
                .await
                .unwrap();
        }

        assert!(cache.peek(&standings_key(2022)).is_none());
        assert_eq!(cache.stats().entries, 2);
        assert_eq!(cache.stats().capacity, 2);

        assert_eq!(cache.invalidate(&standings_key(2024)), Some(2024));
        assert!(cache.peek(&standings_key(2024)).is_none());

        cache.clear();
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        let cache: QueryCache<u8> = QueryCache::new(0);
        assert_eq!(cache.stats().capacity, 1);
    }

    #[test]
    fn test_manager_covers_every_endpoint() {
        let manager = CacheManager::new(8);
        let stats = manager.stats();
        assert_eq!(stats.len(), 5);
        assert!(stats.values().all(|s| s.capacity == 8 && s.entries == 0));
        manager.clear_all();
    }
}
