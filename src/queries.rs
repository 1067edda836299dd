// Query Facade - the read side of the API
// Thin compositions over the catalog and aggregation engine; every call
// recomputes from storage, nothing is cached

use serde::Serialize;

use crate::aggregate::{Aggregator, LeaderboardEntry, StatsSnapshot};
use crate::catalog::{Animal, Catalog};
use crate::error::VoteResult;
use crate::voting::VotingClock;

/// Days covered by the statistics window, today included
pub const STATS_WINDOW_DAYS: i64 = 7;

/// Animal decorated with its live vote total
#[derive(Debug, Serialize)]
pub struct AnimalWithVotes {
    #[serde(flatten)]
    pub animal: Animal,
    pub votes: i64,
}

/// Single-animal view: vote total plus the category's swim description
#[derive(Debug, Serialize)]
pub struct AnimalDetail {
    #[serde(flatten)]
    pub animal: Animal,
    pub votes: i64,
    pub swim_method: String,
}

/// Ranked entries plus the grand total across all animals
#[derive(Debug, Serialize)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub total_votes: i64,
}

#[derive(Clone)]
pub struct QueryService {
    catalog: Catalog,
    aggregator: Aggregator,
    clock: VotingClock,
    default_limit: i64,
}

impl QueryService {
    pub fn new(
        catalog: Catalog,
        aggregator: Aggregator,
        clock: VotingClock,
        default_limit: i64,
    ) -> Self {
        Self {
            catalog,
            aggregator,
            clock,
            default_limit,
        }
    }

    pub fn get_animal(&self, id: i64) -> VoteResult<AnimalDetail> {
        let animal = self.catalog.get_by_id(id)?;
        let votes = self.aggregator.vote_count_for(id)?;
        let swim_method = animal.swim_description().to_string();

        Ok(AnimalDetail {
            animal,
            votes,
            swim_method,
        })
    }

    /// Every animal in catalog order with its vote total
    pub fn get_all_animals(&self) -> VoteResult<Vec<AnimalWithVotes>> {
        let entries = self.aggregator.catalog_with_counts()?;

        Ok(entries
            .into_iter()
            .map(|e| AnimalWithVotes {
                animal: e.animal,
                votes: e.votes,
            })
            .collect())
    }

    /// `None` falls back to the configured default; `Some(n)` with `n <= 0`
    /// returns the whole ranking
    pub fn get_leaderboard(&self, limit: Option<i64>) -> VoteResult<Leaderboard> {
        let limit = limit.unwrap_or(self.default_limit);

        Ok(Leaderboard {
            entries: self.aggregator.leaderboard(limit)?,
            total_votes: self.aggregator.total_votes()?,
        })
    }

    pub fn get_statistics(&self) -> VoteResult<StatsSnapshot> {
        self.aggregator.statistics(STATS_WINDOW_DAYS, self.clock.today())
    }

    pub fn vote_count(&self, animal_id: i64) -> VoteResult<i64> {
        self.aggregator.vote_count_for(animal_id)
    }
}

// ============================================================================
// TESTS
// ============================================================================
