//! CLI command implementations.

use std::io::{self, IsTerminal};

use crate::{
    config::Config, error::Result, install::Installer, retrieve::Retriever, runner::SystemRunner,
};

/// Output color handling selection.
#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    /// Colorize only when output is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorChoice {
    /// Determine whether color output should be enabled.
    pub(crate) fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Build an installer that shells out to the host's real tools.
fn system_installer(config: &Config, color: ColorChoice) -> Result<Installer<SystemRunner>> {
    let retriever = Retriever::new(SystemRunner, config)?;
    Ok(Installer::new(retriever, config.skills_dir(), color.enabled()))
}

// Command modules are ordered alphabetically - maintain this order.
/// Direct install command implementation.
pub mod direct;
/// Install command implementation.
pub mod install;
/// Search command implementation.
pub mod search;
