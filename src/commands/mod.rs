//! Command implementations for the MLB stats CLI

pub mod common;
pub mod player_stats;
pub mod schedule;
pub mod standings;
pub mod team_stats;
pub mod teams;

pub use common::CommandContext;

#[cfg(test)]
mod tests;
