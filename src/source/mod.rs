//! Snapshot sources
//!
//! The engine never performs I/O. A `SnapshotSource` stands for the storage
//! collaborator that lists users and matches; `load_snapshot` pulls both,
//! tags each user with its play type and checks the match invariants before
//! handing a consistent `Snapshot` to the engine.

pub mod json;
pub mod provider;

// Re-export commonly used types
pub use json::JsonFileSource;
pub use provider::{ingest, load_snapshot, SnapshotSource, StaticSnapshotSource, UserRecord};
