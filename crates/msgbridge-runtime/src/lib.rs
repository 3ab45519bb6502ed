#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod backends;

pub use backends::{BackendKind, EchoBackend, OpenAiCompatBackend, OpenAiCompatConfig};
