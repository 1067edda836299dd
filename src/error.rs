use thiserror::Error;

/// Error taxonomy for the voting domain.
///
/// A duplicate vote is NOT an error - it is a normal outcome and travels
/// in `VoteOutcome::AlreadyVoted`. Only missing animals, rejected input,
/// and storage failures surface here.
#[derive(Debug, Error)]
pub enum VoteError {
    /// No animal with this id exists in the catalog
    #[error("animal {0} not found")]
    NotFound(i64),

    /// Input rejected before touching storage
    #[error("{0}")]
    Validation(String),

    /// Underlying SQLite failure (anything we did not expect)
    #[error("storage error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

pub type VoteResult<T> = Result<T, VoteError>;

impl VoteError {
    pub fn validation(msg: impl Into<String>) -> Self {
        VoteError::Validation(msg.into())
    }

    /// True for errors caused by the caller (bad id, bad input)
    pub fn is_client_error(&self) -> bool {
        matches!(self, VoteError::NotFound(_) | VoteError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(VoteError::NotFound(42).to_string(), "animal 42 not found");
        assert_eq!(
            VoteError::validation("voter must not be empty").to_string(),
            "voter must not be empty"
        );
    }

    #[test]
    fn test_client_error_classification() {
        assert!(VoteError::NotFound(1).is_client_error());
        assert!(VoteError::validation("bad").is_client_error());
        assert!(!VoteError::Persistence(rusqlite::Error::InvalidQuery).is_client_error());
    }

    #[test]
    fn test_persistence_from_rusqlite() {
        let err: VoteError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, VoteError::Persistence(_)));
    }
}
