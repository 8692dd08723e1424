//! Common utilities and helper functions shared across commands.
//!
//! Every view goes through the same steps: build a query key, run it through
//! the shared cache, then print a loading line, an error line, a "no data"
//! line, or the table itself.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;

use crate::{
    config::Config,
    core::{
        cache::{CacheManager, QueryCache, QueryKey},
        query::{Query, QueryState, ViewStatus},
    },
    mlb::MlbClient,
    Result,
};

/// Placeholder for a stat the service didn't send.
pub const MISSING: &str = "--";

/// Resources shared by every command: one HTTP client, one set of caches.
pub struct CommandContext {
    pub config: Config,
    pub client: MlbClient,
    pub caches: CacheManager,
}

impl CommandContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = MlbClient::new(&config)?;
        let caches = CacheManager::new(config.cache_capacity);
        Ok(Self {
            config,
            client,
            caches,
        })
    }
}

/// Run one query to completion through `cache`. A `None` key leaves the
/// query idle without fetching.
pub async fn load<V, F, Fut>(
    cache: &Arc<QueryCache<V>>,
    key: Option<QueryKey>,
    fetcher: F,
) -> QueryState<V>
where
    V: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V>>,
{
    Query::new(Arc::clone(cache), key).run(fetcher).await
}

/// Print the non-table presentations. Returns `true` when the caller should
/// go on to print its table.
pub fn print_status(status: &ViewStatus, what: &str) -> bool {
    match status {
        ViewStatus::Idle => false,
        ViewStatus::Loading => {
            println!("Loading {what}...");
            false
        }
        ViewStatus::Error(msg) => {
            eprintln!("⚠ Could not load {what}: {msg}");
            false
        }
        ViewStatus::Empty => {
            println!("No {what} found.");
            false
        }
        ViewStatus::Ready => true,
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?); // tarpaulin::skip
    Ok(())
}

/// Fixed-width cell: truncated with `…` when too long, left-aligned.
pub fn cell(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        format!("{text:<width$}")
    }
}

pub fn opt_count(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

pub fn opt_rate(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING.to_string())
}
