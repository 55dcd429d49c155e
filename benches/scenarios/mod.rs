//! Real-world scenario benchmarks.
//!
//! These render complete players against an in-memory store, with the pool
//! kept busy so the per-sample voice loop dominates.

mod players;
mod voices;

pub use players::bench_players;
pub use voices::bench_engines;
