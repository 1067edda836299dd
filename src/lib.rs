// Marine Voting System - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod config;
pub mod store;
pub mod catalog;
pub mod seed;
pub mod ledger;
pub mod voting;
pub mod aggregate;
pub mod queries;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use aggregate::{Aggregator, LeaderboardEntry, StatsSnapshot};
pub use catalog::{Animal, AnimalCategory, Catalog, CategoryCount, SILENT};
pub use config::Config;
pub use error::{VoteError, VoteResult};
pub use ledger::{DailyCount, VoteLedger, VoteOutcome};
pub use queries::{
    AnimalDetail, AnimalWithVotes, Leaderboard, QueryService, STATS_WINDOW_DAYS,
};
pub use seed::{default_catalog, insert_animal, load_catalog_csv, seed_catalog, AnimalSeed};
pub use store::{setup_schema, Store};
pub use voting::{VotingClock, VotingService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
