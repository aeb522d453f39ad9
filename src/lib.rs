#![warn(missing_docs)]
//! Library support for the skillget CLI.

/// Skill catalog loading.
mod catalog;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Settings loading and validation.
mod config;
/// Usage extraction from installed skill descriptors.
mod descriptor;
/// Common diagnostics and warning aggregation.
mod diagnostics;
/// Error handling for the crate.
mod error;
/// YAML frontmatter parsing for skills.
mod frontmatter;
/// Skill installation and the usage guide.
mod install;
/// Repository browse URL parsing.
mod location;
/// Color palette and styling for CLI output.
mod palette;
/// Path expansion and normalization utilities.
mod paths;
/// Retrieval strategies for skill files.
mod retrieve;
/// External process execution.
mod runner;
/// Catalog relevance ranking.
mod search;
/// Installed skill directory helpers.
mod skill;
/// Fakes and fixtures shared by tests.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
