//! Per-view query state and scheduled re-fetch
//!
//! A [`Query`] binds one cache key to a [`QueryCache`] and publishes its
//! [`QueryState`] on a `watch` channel, so a view can render whatever the
//! latest state is. [`RefetchHandle`] re-runs a query on a fixed interval
//! until it is cancelled or dropped.

use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    core::cache::{QueryCache, QueryKey},
    error::{Result, StatsError},
};


/// Lifecycle of one query.
///
/// `Idle → Loading → Success | Error`. A reload from `Success` keeps the
/// previous value visible while loading. `Error` stays put until the key
/// changes or a retry is requested.
#[derive(Debug, Clone)]
pub enum QueryState<V> {
    Idle,
    Loading { previous: Option<V> },
    Success(V),
    Error(Arc<StatsError>),
}

/// What a view should render for a [`QueryState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Loading,
    Error(String),
    Empty,
    Ready,
}

impl<V> QueryState<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    /// The value to show: the current result, or the previous one while
    /// reloading.
    pub fn value(&self) -> Option<&V> {
        match self {
            QueryState::Success(value) => Some(value),
            QueryState::Loading { previous } => previous.as_ref(),
            QueryState::Idle | QueryState::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&StatsError> {
        match self {
            QueryState::Error(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Classify for rendering. `is_empty` decides whether a loaded value
    /// has anything to show.
    pub fn view_status<F>(&self, is_empty: F) -> ViewStatus
    where
        F: FnOnce(&V) -> bool,
    {
        match self {
            QueryState::Idle => ViewStatus::Idle,
            QueryState::Error(err) => ViewStatus::Error(err.to_string()),
            QueryState::Loading { previous: None } => ViewStatus::Loading,
            QueryState::Loading {
                previous: Some(value),
            }
            | QueryState::Success(value) => {
                if is_empty(value) {
                    ViewStatus::Empty
                } else {
                    ViewStatus::Ready
                }
            }
        }
    }
}

/// One observable query. A `None` key means the query is gated and never
/// fetches.
pub struct Query<V> {
    cache: Arc<QueryCache<V>>,
    key: Mutex<Option<QueryKey>>,
    state: watch::Sender<QueryState<V>>,
    /// Bumped whenever a load starts.
    generation: AtomicU64,
}

impl<V> Query<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: Arc<QueryCache<V>>, key: Option<QueryKey>) -> Self {
        let (state, _) = watch::channel(QueryState::Idle);
        Self {
            cache,
            key: Mutex::new(key),
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn key(&self) -> Option<QueryKey> {
        self.key
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> QueryState<V> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<V>> {
        self.state.subscribe()
    }

    /// Point the query at new parameters. Returns `false` when nothing
    /// changed. A changed key clears any error and keeps the last value
    /// around for the next load.
    pub fn set_key(&self, key: Option<QueryKey>) -> bool {
        {
            let mut current = self.key.lock().unwrap_or_else(PoisonError::into_inner);
            if *current == key {
                return false;
            }
            *current = key;
        }

        self.state.send_modify(|state| {
            if state.is_error() {
                *state = QueryState::Idle;
            }
        });
        true
    }

    /// Load through the cache. No-op when gated or sitting in `Error`.
    pub async fn run<F, Fut>(&self, fetcher: F) -> QueryState<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if self.state.borrow().is_error() {
            return self.state();
        }
        self.load(fetcher, false).await
    }

    /// Leave `Error` and load again.
    pub async fn retry<F, Fut>(&self, fetcher: F) -> QueryState<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        self.load(fetcher, false).await
    }

    /// Bypass the cached value. Used by the scheduled re-fetch.
    pub async fn refetch<F, Fut>(&self, fetcher: F) -> QueryState<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if self.state.borrow().is_error() {
            return self.state();
        }
        self.load(fetcher, true).await
    }

    /// A load whose key was replaced while it was in flight returns its
    /// result without publishing it. If no newer load has started by then,
    /// the `Loading` it published is rolled back to the last value (or
    /// `Idle`) so subscribers never sit on a loading state nobody owns.
    async fn load<F, Fut>(&self, fetcher: F, refresh: bool) -> QueryState<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let Some(key) = self.key() else {
            return self.state();
        };

        self.state.send_modify(|state| {
            let previous = match std::mem::replace(state, QueryState::Idle) {
                QueryState::Success(value) => Some(value),
                QueryState::Loading { previous } => previous,
                QueryState::Idle | QueryState::Error(_) => None,
            };
            *state = QueryState::Loading { previous };
        });
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = if refresh {
            self.cache.refresh(&key, fetcher).await
        } else {
            self.cache.fetch(&key, fetcher).await
        };

        let next = match result {
            Ok((value, _)) => QueryState::Success(value),
            Err(err) => QueryState::Error(Arc::new(err)),
        };

        // Parameters moved on while this was in flight.
        if self.key().as_ref() != Some(&key) {
            if self.generation.load(Ordering::SeqCst) == generation {
                self.state.send_if_modified(|state| match state {
                    QueryState::Loading { previous } => {
                        *state = previous
                            .take()
                            .map_or(QueryState::Idle, QueryState::Success);
                        true
                    }
                    _ => false,
                });
            }
            return next;
        }

        self.state.send_replace(next.clone());
        next
    }
}

/// Scheduled re-fetch for one query. Dropping the handle stops it.
pub struct RefetchHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefetchHandle {
    /// Re-run `query` every `every`, starting one interval from now. Ticks
    /// never overlap: a slow fetch delays the next tick instead of
    /// stacking up behind it.
    pub fn spawn<V, F, Fut>(query: Arc<Query<V>>, every: Duration, fetcher: F) -> Self
    where
        V: Clone + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let key = query.key();
                let state = tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    state = query.refetch(&fetcher) => state,
                };

                match (&state, key) {
                    (QueryState::Error(err), Some(key)) => {
                        warn!(%key, error = %err, "scheduled refetch failed")
                    }
                    (_, Some(key)) => debug!(%key, "scheduled refetch complete"),
                    (_, None) => debug!("scheduled refetch skipped: no key"),
                }
            }

            debug!("scheduled refetch stopped");
        });

        Self {
            token,
            task: Some(task),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token for tying the refetch to something else's lifetime.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Cancel and wait for the loop to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "refetch task ended abnormally");
            }
        }
    }
}

impl Drop for RefetchHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
