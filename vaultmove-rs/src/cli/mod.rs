//! CLI command implementations.

pub mod args;
pub mod output;

pub mod index;
pub mod links;
pub mod move_notes;
pub mod resolve;
pub mod scan;

pub use args::{Cli, Commands};
pub use output::Output;
