//! In-memory query cache with request de-duplication
//!
//! Each endpoint gets its own [`QueryCache`]: an LRU of successful results
//! keyed by [`QueryKey`], plus a table of fetches currently in flight. Callers
//! asking for a key that is already being fetched wait on the same result
//! instead of issuing a second request. Failures are handed to every waiter
//! but never stored.

use std::{
    collections::HashMap,
    fmt,
    future::Future,
    num::NonZeroUsize,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use lru::LruCache;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::{
    core::params::{Endpoint, QueryParams, ToQueryParams},
    error::{Result, StatsError},
    mlb::types::{
        PlayerStatsResponse, ScheduleResponse, StandingsResponse, TeamStatsResponse,
        TeamsResponse,
    },
};

#[cfg(test)]
mod tests;

/// Where a returned value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
    Refreshed,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
            CacheStatus::Refreshed => "refreshed",
        };
        f.write_str(s)
    }
}

/// Cache identity of a request: the endpoint plus its full parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub endpoint: Endpoint,
    pub params: QueryParams,
}

impl QueryKey {
    pub fn new<Q: Serialize>(endpoint: Endpoint, query: &Q) -> Result<Self> {
        Ok(Self {
            endpoint,
            params: query.to_query_params()?,
        })
    }

    /// Key for an endpoint that takes no parameters.
    pub fn bare(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            params: QueryParams::new(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.endpoint)
        } else {
            write!(f, "{}?{}", self.endpoint, self.params)
        }
    }
}

/// Snapshot of a cache's occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub in_flight: usize,
}

type SharedResult<V> = std::result::Result<V, Arc<StatsError>>;
type Flight<V> = Arc<OnceCell<SharedResult<V>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct QueryCache<V> {
    entries: Mutex<LruCache<QueryKey, V>>,
    in_flight: Mutex<HashMap<QueryKey, Flight<V>>>,
    capacity: NonZeroUsize,
}

impl<V> QueryCache<V>
where
    V: Clone,
{
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Cached value for `key`, or the result of `fetcher`.
    ///
    /// `fetcher` only runs when nothing is cached and no other caller is
    /// already fetching the same key.
    pub async fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<(V, CacheStatus)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let cached = lock(&self.entries).get(key).cloned();
        if let Some(value) = cached {
            return Ok((value, CacheStatus::Hit));
        }

        match self.join_flight(key, true) {
            Joined::Cached(value) => Ok((value, CacheStatus::Hit)),
            Joined::Flight(flight) => {
                let value = self.complete(key, &flight, fetcher).await?;
                Ok((value, CacheStatus::Miss))
            }
        }
    }

    /// Fetch `key` regardless of what is cached and replace the entry on
    /// success. Joins a fetch already in flight for the same key.
    pub async fn refresh<F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<(V, CacheStatus)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        match self.join_flight(key, false) {
            Joined::Cached(value) => Ok((value, CacheStatus::Hit)),
            Joined::Flight(flight) => {
                let value = self.complete(key, &flight, fetcher).await?;
                Ok((value, CacheStatus::Refreshed))
            }
        }
    }

    /// Cached value without touching recency.
    pub fn peek(&self, key: &QueryKey) -> Option<V> {
        lock(&self.entries).peek(key).cloned()
    }

    pub fn invalidate(&self, key: &QueryKey) -> Option<V> {
        lock(&self.entries).pop(key)
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = lock(&self.entries).len();
        let in_flight = lock(&self.in_flight).len();
        CacheStats {
            entries,
            capacity: self.capacity.get(),
            in_flight,
        }
    }

    /// Find or register the in-flight slot for `key`. With `use_cached`, a
    /// value stored since the caller's first lookup wins over a new fetch.
    fn join_flight(&self, key: &QueryKey, use_cached: bool) -> Joined<V> {
        let mut flights = lock(&self.in_flight);
        if let Some(flight) = flights.get(key) {
            return Joined::Flight(Arc::clone(flight));
        }

        if use_cached {
            if let Some(value) = lock(&self.entries).get(key).cloned() {
                return Joined::Cached(value);
            }
        }

        let flight = Arc::new(OnceCell::new());
        flights.insert(key.clone(), Arc::clone(&flight));
        Joined::Flight(flight)
    }

    async fn complete<F, Fut>(&self, key: &QueryKey, flight: &Flight<V>, fetcher: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let result = flight
            .get_or_init(|| async {
                let result = fetcher().await.map_err(Arc::new);
                if let Ok(value) = &result {
                    lock(&self.entries).put(key.clone(), value.clone());
                }
                self.retire(key, flight);
                result
            })
            .await
            .clone();

        result.map_err(StatsError::from)
    }

    /// Drop the in-flight slot, unless a newer fetch has already replaced it.
    fn retire(&self, key: &QueryKey, flight: &Flight<V>) {
        let mut flights = lock(&self.in_flight);
        if flights.get(key).is_some_and(|f| Arc::ptr_eq(f, flight)) {
            flights.remove(key);
        }
    }
}

enum Joined<V> {
    Cached(V),
    Flight(Flight<V>),
}

/// One cache per endpoint, sized from configuration.
pub struct CacheManager {
    pub standings: Arc<QueryCache<StandingsResponse>>,
    pub schedule: Arc<QueryCache<ScheduleResponse>>,
    pub teams: Arc<QueryCache<TeamsResponse>>,
    pub team_stats: Arc<QueryCache<TeamStatsResponse>>,
    pub player_stats: Arc<QueryCache<PlayerStatsResponse>>,
}

impl CacheManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            standings: Arc::new(QueryCache::new(capacity)),
            schedule: Arc::new(QueryCache::new(capacity)),
            teams: Arc::new(QueryCache::new(capacity)),
            team_stats: Arc::new(QueryCache::new(capacity)),
            player_stats: Arc::new(QueryCache::new(capacity)),
        }
    }

    pub fn clear_all(&self) {
        self.standings.clear();
        self.schedule.clear();
        self.teams.clear();
        self.team_stats.clear();
        self.player_stats.clear();
    }

    pub fn stats(&self) -> HashMap<Endpoint, CacheStats> {
        HashMap::from([
            (Endpoint::Standings, self.standings.stats()),
            (Endpoint::Schedule, self.schedule.stats()),
            (Endpoint::Teams, self.teams.stats()),
            (Endpoint::TeamLeaderboard, self.team_stats.stats()),
            (Endpoint::PlayerLeaderboard, self.player_stats.stats()),
        ])
    }
}
