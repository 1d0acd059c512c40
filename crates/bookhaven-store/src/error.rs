//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ├── on read  → swallowed by the Store: the affected collection   │
//! │       │              rehydrates as its empty default (logged at warn)  │
//! │       │                                                                 │
//! │       └── on write → logged at warn; the in-memory mutation already    │
//! │                      succeeded and the operation contract holds        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing a storage entry failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be serialized or deserialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
