//! Learning Store
//!
//! Keeps a bounded history of user corrections ("this was a lunge, not a
//! squat") and turns it into per-exercise score boosts for poses that look
//! like previously corrected ones. Persistence goes through a small
//! key-value interface and is best-effort throughout.

mod config;
mod entry;
mod kv;
mod store;

pub use config::LearningConfig;
pub use entry::{Confusion, CorrectionEntry, LearningStats, TrainingSample};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use store::LearningStore;

use thiserror::Error;

/// Key-value backend errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Correction persistence errors
#[derive(Debug, Error)]
pub enum LearningError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
