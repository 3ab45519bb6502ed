//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod text_generation;

pub use text_generation::{GenerateError, TextGenerationPort};
