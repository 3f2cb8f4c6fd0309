//! API endpoint integration tests
//!
//! Drives the composed router against the in-memory backend: teams,
//! member references, and the documentation snippets for each operation.

mod common;
mod members;
mod teams;
