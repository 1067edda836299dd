// ⏰ Voting Service - validate, resolve, record
// The voting day is explicit everywhere; only the clock knows what "today" is

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::catalog::Catalog;
use crate::error::{VoteError, VoteResult};
use crate::ledger::{VoteLedger, VoteOutcome};

/// Longest voter identity we accept, in bytes
const MAX_VOTER_LEN: usize = 255;

/// Computes the current voting day in the configured timezone.
///
/// "One vote per day" is defined by calendar days in this zone, not UTC.
#[derive(Debug, Clone, Copy)]
pub struct VotingClock {
    tz: Tz,
}

impl VotingClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

#[derive(Clone)]
pub struct VotingService {
    catalog: Catalog,
    ledger: VoteLedger,
    clock: VotingClock,
}

impl VotingService {
    pub fn new(catalog: Catalog, ledger: VoteLedger, clock: VotingClock) -> Self {
        Self {
            catalog,
            ledger,
            clock,
        }
    }

    /// Cast a vote for today. The day is read from the clock exactly once,
    /// so an attempt spanning midnight lands on a single day.
    pub fn vote(&self, animal_id: i64, voter: &str) -> VoteResult<VoteOutcome> {
        let day = self.clock.today();
        self.vote_on(animal_id, voter, day)
    }

    /// Cast a vote for an explicit day. Deterministic path for tests and
    /// backfills; `vote` delegates here.
    pub fn vote_on(&self, animal_id: i64, voter: &str, day: NaiveDate) -> VoteResult<VoteOutcome> {
        if animal_id <= 0 {
            return Err(VoteError::Validation(format!(
                "invalid animal id: {}",
                animal_id
            )));
        }
        let voter = validate_voter(voter)?;

        // Resolve before recording: an unknown id fails with NotFound and
        // leaves the ledger untouched
        let animal = self.catalog.get_by_id(animal_id)?;

        let outcome = self.ledger.record(animal.id, voter, day)?;
        match outcome {
            VoteOutcome::Accepted => {
                info!(animal = %animal.name, voter, %day, "vote accepted");
            }
            VoteOutcome::AlreadyVoted => {
                info!(animal = %animal.name, voter, %day, "duplicate vote ignored");
            }
        }

        Ok(outcome)
    }

    /// Has this voter already voted for this animal today?
    pub fn has_voted_today(&self, animal_id: i64, voter: &str) -> VoteResult<bool> {
        let voter = validate_voter(voter)?;
        self.ledger.has_voted_today(animal_id, voter, self.clock.today())
    }
}

/// Voter identities are opaque strings (the HTTP layer passes client IPs).
/// Whitespace padding does not create a new identity.
fn validate_voter(voter: &str) -> VoteResult<&str> {
    let trimmed = voter.trim();
    if trimmed.is_empty() {
        return Err(VoteError::validation("voter identity must not be empty"));
    }
    if trimmed.len() > MAX_VOTER_LEN {
        return Err(VoteError::validation("voter identity too long"));
    }
    Ok(trimmed)
}

// ============================================================================
// TESTS
// ============================================================================
