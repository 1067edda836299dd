use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::VoteResult;

/// Shared handle to the SQLite database.
///
/// Constructed once at the process entry point and cloned into every
/// component that needs storage. Cheap to clone.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) a file-backed database and install the schema
    pub fn open<P: AsRef<Path>>(path: P) -> VoteResult<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        setup_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory database for tests (WAL does not apply here)
    pub fn open_in_memory() -> VoteResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        setup_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Lock the connection for a batch of statements
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

pub fn setup_schema(conn: &Connection) -> VoteResult<()> {
    // ==========================================================================
    // Animals Table (the catalog)
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS animals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            scientific_name TEXT NOT NULL,
            category TEXT NOT NULL,
            subtype TEXT NOT NULL,
            description TEXT NOT NULL,
            habitat TEXT NOT NULL,
            image_url TEXT NOT NULL,
            sound TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    // ==========================================================================
    // Votes Table (append-only ledger)
    // The UNIQUE triple enforces one vote per animal per voter per day
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS votes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            animal_id INTEGER NOT NULL,
            voter TEXT NOT NULL,
            vote_date TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(animal_id, voter, vote_date),
            FOREIGN KEY(animal_id) REFERENCES animals(id)
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_votes_animal ON votes(animal_id)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_votes_date ON votes(vote_date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_animals_name ON animals(name)",
        [],
    )?;

    Ok(())
}
