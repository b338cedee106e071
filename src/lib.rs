//! Library entry for pkgtrim exposing the engine for the binary and integration tests.

pub mod app;
pub mod args;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod intent;
pub mod render;
pub mod util;

pub use error::{Error, Result};
