//! Editor selection and uncommitted edit buffer.

pub mod editor_session;
