//! redb-based durable key-value store
//!
//! One string table maps storage keys to JSON-encoded text:
//!
//! | Key | Value |
//! |-----|-------|
//! | `<namespace>.models` | JSON array of Model |
//! | `<namespace>.orders` | JSON array of Order |
//! | `tenantName` | active tenant display name (global, not namespaced) |
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns and use
//! copy-on-write with an atomic pointer swap, so a write is atomic at
//! storage-key granularity: a later read always sees the last completed
//! write, never a partial record.

use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Single table for all namespaced collections: key = storage key, value = JSON text
const RECORDS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("records");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable key-value store backed by redb
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
}

impl LocalStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Create the table so reads never hit a missing-table error
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Read the JSON text stored under `key`
    pub fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    /// Durably write `value` under `key`. The write is committed when this
    /// returns.
    pub fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove `key` if present
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
