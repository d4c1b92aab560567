//! Nebula Player command-line front end
//!
//! Library half of the `nebula` binary: configuration, the composition root
//! and the headless audio output. Kept separate from `main.rs` so it can be
//! tested.

pub mod config;
pub mod context;
pub mod error;
pub mod output;

pub use config::NebulaConfig;
pub use context::AppContext;
pub use error::{CliError, Result};
pub use output::LoggingOutput;
