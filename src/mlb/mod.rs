//! MLB service access: response types, the HTTP gateway and derived stats.

pub mod compute;
pub mod http;
pub mod types;

pub use http::MlbClient;
