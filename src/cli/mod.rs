//! Command-line interface definitions and helpers.
//!
//! This module contains CLI argument parsing, settings resolution, and the
//! command handler that ties decoding and rendering to files and the console.

mod args;
mod commands;
mod settings;

pub use args::Args;
pub use commands::{render_file, run, RunError};
pub use settings::Settings;
