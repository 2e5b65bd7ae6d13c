//! Persistence adapter between the note collection and key-value storage.
//!
//! # Responsibility
//! - Serialize the whole collection into one storage entry and read it back.
//!
//! # Invariants
//! - Reads are best-effort: absent or malformed data loads as empty.
//! - Writes replace the whole collection; there is no partial write.

pub mod collection_repo;
