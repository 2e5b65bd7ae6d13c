//! Canonical in-memory note collection.
//!
//! # Invariants
//! - `NoteStore` is the only mutator of the collection.
//! - Every effective mutation is followed by a whole-collection save.

pub mod note_store;
