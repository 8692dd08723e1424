//! Request plumbing shared by every view
//!
//! - `params`: typed query parameters for each endpoint
//! - `cache`: in-memory query cache with request de-duplication
//! - `query`: per-view query state and the scheduled re-fetch

pub mod cache;
pub mod params;
pub mod query;

pub use cache::{CacheManager, CacheStatus, QueryCache, QueryKey};
pub use params::{Endpoint, QueryParams, ToQueryParams};
pub use query::{Query, QueryState, RefetchHandle, ViewStatus};
