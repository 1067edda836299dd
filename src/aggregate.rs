// 📊 Aggregation Engine - Leaderboard and statistics snapshots
// Everything here is derived from the catalog + ledger on each call

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::catalog::{Animal, Catalog, CategoryCount};
use crate::error::VoteResult;
use crate::ledger::{DailyCount, VoteLedger};

/// One leaderboard row: the animal plus its lifetime vote total
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub animal: Animal,
    pub votes: i64,
}

/// Point-in-time aggregate view. Never stored; recomputed per request.
#[derive(Debug, Serialize)]
pub struct StatsSnapshot {
    pub total_animals: i64,
    pub total_votes: i64,
    pub category_counts: Vec<CategoryCount>,
    pub daily_votes: Vec<DailyCount>,
}

#[derive(Clone)]
pub struct Aggregator {
    catalog: Catalog,
    ledger: VoteLedger,
}

impl Aggregator {
    pub fn new(catalog: Catalog, ledger: VoteLedger) -> Self {
        Self { catalog, ledger }
    }

    pub fn vote_count_for(&self, animal_id: i64) -> VoteResult<i64> {
        self.ledger.count_for(animal_id)
    }

    pub fn total_votes(&self) -> VoteResult<i64> {
        self.ledger.count_all()
    }

    /// Every animal in catalog order, each joined with its vote total.
    /// Animals nobody voted for appear with zero.
    pub fn catalog_with_counts(&self) -> VoteResult<Vec<LeaderboardEntry>> {
        let animals = self.catalog.get_all()?;
        let counts = self.ledger.counts_by_animal()?;

        Ok(animals
            .into_iter()
            .map(|animal| {
                let votes = counts.get(&animal.id).copied().unwrap_or(0);
                LeaderboardEntry { animal, votes }
            })
            .collect())
    }

    /// Every animal ranked by votes, descending. The sort is stable over the
    /// name-ordered catalog, so ties keep catalog order. Zero-vote animals
    /// rank too. `limit <= 0` means no limit.
    pub fn leaderboard(&self, limit: i64) -> VoteResult<Vec<LeaderboardEntry>> {
        let mut entries = self.catalog_with_counts()?;

        entries.sort_by(|a, b| b.votes.cmp(&a.votes));

        if limit > 0 {
            entries.truncate(limit as usize);
        }

        Ok(entries)
    }

    /// Snapshot over a trailing window that includes `today`:
    /// `window_days = 7` covers today and the six days before it.
    pub fn statistics(&self, window_days: i64, today: NaiveDate) -> VoteResult<StatsSnapshot> {
        let window_days = window_days.max(1);
        let since = today - Duration::days(window_days - 1);

        Ok(StatsSnapshot {
            total_animals: self.catalog.count()?,
            total_votes: self.ledger.count_all()?,
            category_counts: self.catalog.category_counts()?,
            daily_votes: self.ledger.count_by_day(since)?,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
