//! The persistence boundary for per-account order history.
//!
//! The ledger is generic over an [`OrderStore`] so the engine can run
//! against an in-memory fake in tests and a file-backed store in the app.
//! The store holds the full history per account as one scoped value,
//! mirroring a per-account key-value storage capability.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::instrument;

use frostline_core::AccountId;

use super::Order;

/// Errors that can occur at the persistence boundary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage backend is unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// An I/O error from the storage backend.
    #[error("storage i/o error: {0}")]
    Io(#[from] io::Error),

    /// Stored order history could not be decoded.
    #[error("corrupt order history: {0}")]
    Corrupt(String),

    /// Order history could not be encoded for storage.
    #[error("failed to encode order history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Per-account scoped persistence for order history.
///
/// `load` and `save` operate on the account's entire history at once; there
/// are no partial writes to recover from.
pub trait OrderStore {
    /// Load the full order history for an account, newest first.
    ///
    /// A missing account is an empty history, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend fails or the stored data
    /// cannot be decoded.
    fn load(&self, account: &AccountId) -> Result<Vec<Order>, PersistenceError>;

    /// Replace the full order history for an account.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the write fails.
    fn save(&self, account: &AccountId, orders: &[Order]) -> Result<(), PersistenceError>;
}

/// In-memory order store.
///
/// The injectable fake for tests, and the fallback when no data directory is
/// configured. Saves can be made to fail on demand so checkout failure paths
/// are testable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    orders: Mutex<HashMap<AccountId, Vec<Order>>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `save` calls fail with
    /// [`PersistenceError::Unavailable`].
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<AccountId, Vec<Order>>> {
        match self.orders.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl OrderStore for MemoryStore {
    fn load(&self, account: &AccountId) -> Result<Vec<Order>, PersistenceError> {
        Ok(self.guard().get(account).cloned().unwrap_or_default())
    }

    fn save(&self, account: &AccountId, orders: &[Order]) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(PersistenceError::Unavailable(
                "memory store configured to fail saves".to_owned(),
            ));
        }
        self.guard().insert(account.clone(), orders.to_vec());
        Ok(())
    }
}

/// File-backed order store: one JSON file per account under a data
/// directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at the given data directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, account: &AccountId) -> PathBuf {
        // Account ids come from an external identity provider; sanitize
        // before using them as file names.
        let name: String = account
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("orders-{name}.json"))
    }
}

impl OrderStore for JsonFileStore {
    #[instrument(skip(self))]
    fn load(&self, account: &AccountId) -> Result<Vec<Order>, PersistenceError> {
        let path = self.path_for(account);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::Io(e)),
        };
        serde_json::from_str(&raw).map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    #[instrument(skip(self, orders))]
    fn save(&self, account: &AccountId, orders: &[Order]) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(orders)?;
        fs::write(self.path_for(account), raw)?;
        Ok(())
    }
}
