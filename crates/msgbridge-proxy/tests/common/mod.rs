//! Shared helpers for msgbridge-proxy integration tests.

pub mod backends;
