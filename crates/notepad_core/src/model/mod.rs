//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the single persisted entity (`Note`) and its identifier.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - The serialized shape is `{id, title, content, createdAt}`.

pub mod note;
