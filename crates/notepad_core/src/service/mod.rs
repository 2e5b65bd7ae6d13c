//! Use-case facade over the store and the editor session.
//!
//! # Responsibility
//! - Keep UI layers decoupled from storage and session wiring.

pub mod notes_app;
