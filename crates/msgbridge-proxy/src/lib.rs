#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod emitter;
pub mod error;
pub mod models;
pub mod server;
pub mod sse;

pub use server::{AppState, DEFAULT_CHUNK_DELAY, ProxyConfig, create_router, serve};
