//! Command handlers.
//!
//! Each handler is a thin `execute` wrapper: validate CLI input, call into the
//! library crates, format output for the terminal.

pub mod normalize;
pub mod serve;
