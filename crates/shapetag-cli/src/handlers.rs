//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod completions;
mod tags;

pub use check::handle_check;
pub use completions::handle_completions;
pub use tags::handle_tags;
