// 🗳️ Vote Ledger - Append-only record of accepted votes
// One INSERT per vote; the UNIQUE(animal_id, voter, vote_date) constraint is
// the only duplicate check, so there is no read-then-write race window

use chrono::NaiveDate;
use rusqlite::params;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::VoteResult;
use crate::store::Store;

/// Result of a vote attempt. A duplicate is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Accepted,
    AlreadyVoted,
}

impl VoteOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VoteOutcome::Accepted)
    }
}

/// Votes aggregated for one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Clone)]
pub struct VoteLedger {
    store: Store,
}

impl VoteLedger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Record one vote. Exactly one of N concurrent attempts on the same
    /// (animal, voter, day) triple gets `Accepted`; the rest get
    /// `AlreadyVoted` from the UNIQUE constraint. Any other failure
    /// (including a foreign-key violation) is a storage error.
    pub fn record(&self, animal_id: i64, voter: &str, day: NaiveDate) -> VoteResult<VoteOutcome> {
        let conn = self.store.conn();
        let result = conn.execute(
            "INSERT INTO votes (animal_id, voter, vote_date) VALUES (?1, ?2, ?3)",
            params![animal_id, voter, day],
        );

        match result {
            Ok(_) => Ok(VoteOutcome::Accepted),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Ok(VoteOutcome::AlreadyVoted)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Has this voter already voted for this animal on this day?
    pub fn has_voted_today(
        &self,
        animal_id: i64,
        voter: &str,
        day: NaiveDate,
    ) -> VoteResult<bool> {
        let conn = self.store.conn();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM votes WHERE animal_id = ?1 AND voter = ?2 AND vote_date = ?3",
            params![animal_id, voter, day],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    /// Lifetime vote total for one animal
    pub fn count_for(&self, animal_id: i64) -> VoteResult<i64> {
        let conn = self.store.conn();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM votes WHERE animal_id = ?1",
            [animal_id],
            |row| row.get(0),
        )?;

        Ok(count)
    }

    /// Lifetime vote total across all animals
    pub fn count_all(&self) -> VoteResult<i64> {
        let conn = self.store.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM votes", [], |row| row.get(0))?;

        Ok(count)
    }

    /// Vote totals for every animal that has at least one vote
    pub fn counts_by_animal(&self) -> VoteResult<HashMap<i64, i64>> {
        let conn = self.store.conn();
        let mut stmt = conn.prepare("SELECT animal_id, COUNT(*) FROM votes GROUP BY animal_id")?;

        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(counts)
    }

    /// Daily totals from `since` onwards, newest first. Days without votes
    /// do not appear.
    pub fn count_by_day(&self, since: NaiveDate) -> VoteResult<Vec<DailyCount>> {
        let conn = self.store.conn();
        let mut stmt = conn.prepare(
            "SELECT vote_date, COUNT(*) FROM votes
             WHERE vote_date >= ?1
             GROUP BY vote_date
             ORDER BY vote_date DESC",
        )?;

        let days = stmt
            .query_map([since], |row| {
                Ok(DailyCount {
                    date: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(days)
    }
}

// ============================================================================
// TESTS
// ============================================================================
