//! CLI parsing and command dispatch.

use std::{
    io,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{commands, config::Config, error::Result, paths::expand_cli_path};

/// Usage examples appended to the help text.
const EXAMPLES: &str = "\
Examples:
  skillget search pdf
  skillget search python testing
  skillget install pdf 1
  skillget direct https://github.com/owner/repo/tree/main/skills/name";

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "skillget",
    version,
    about = "Search a skill catalog and install agent skills",
    after_help = EXAMPLES,
    allow_external_subcommands = true
)]
struct Cli {
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorMode,
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,
    /// Catalog file to search (overrides the settings file).
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Directory skills are installed into (overrides the settings file).
    #[arg(long, global = true)]
    skills_dir: Option<PathBuf>,
    /// Command to execute (prints usage when omitted).
    #[command(subcommand)]
    command: Option<Command>,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

// Commands are ordered alphabetically - maintain this order.
/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Install a skill straight from a repository tree URL.
    Direct {
        /// Browse URL of the skill folder.
        url: String,
        /// Directory name to install under (defaults to the folder name).
        #[arg(long)]
        name: Option<String>,
    },
    /// Install the search result at a 1-based index.
    Install {
        /// Query words followed by the result index.
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// Search the catalog by name, description, and author.
    Search {
        /// Query words, joined with spaces.
        #[arg(allow_negative_numbers = true)]
        query: Vec<String>,
    },
    /// Anything that is not a known command.
    #[command(external_subcommand)]
    External(Vec<String>),
}

/// Run the requested command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let color = cli.color.into_choice();

    let Some(command) = cli.command else {
        println!("{}", Cli::command().render_long_help());
        return Ok(());
    };
    if let Command::External(args) = &command {
        let name = args.first().map_or("", String::as_str);
        eprintln!("Unknown command: {name}");
        eprintln!("Run 'skillget --help' for usage.");
        return Ok(());
    }

    let config = load_config(cli.catalog.as_deref(), cli.skills_dir.as_deref())?;
    debug!(
        catalog = %config.catalog().display(),
        skills_dir = %config.skills_dir().display(),
        "resolved settings"
    );

    // Match arms are ordered alphabetically - maintain this order.
    match command {
        Command::Direct { url, name } => {
            commands::direct::run(color, &config, &url, name.as_deref()).await
        }
        Command::External(_) => Ok(()),
        Command::Install { args } => commands::install::run(color, &config, &args).await,
        Command::Search { query } => commands::search::run(color, &config, &query).await,
    }
}

/// Load settings and apply command line overrides.
fn load_config(catalog: Option<&Path>, skills_dir: Option<&Path>) -> Result<Config> {
    let catalog = catalog.map(expand_cli_path).transpose()?;
    let skills_dir = skills_dir.map(expand_cli_path).transpose()?;
    Ok(Config::load()?
        .with_catalog(catalog)
        .with_skills_dir(skills_dir))
}

/// Install the log subscriber, letting `RUST_LOG` override the default level.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "skillget=debug"
    } else {
        "skillget=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

impl ColorMode {
    /// Convert a CLI color mode into a color choice.
    fn into_choice(self) -> commands::ColorChoice {
        match self {
            Self::Auto => commands::ColorChoice::Auto,
            Self::Always => commands::ColorChoice::Always,
            Self::Never => commands::ColorChoice::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn install_keeps_trailing_index() {
        let cli = Cli::parse_from(["skillget", "install", "pdf", "tools", "2"]);
        match cli.command {
            Some(Command::Install { args }) => assert_eq!(args, ["pdf", "tools", "2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn negative_index_reaches_the_install_command() {
        let cli = Cli::try_parse_from(["skillget", "install", "pdf", "-1"]).expect("parse");
        match cli.command {
            Some(Command::Install { args }) => assert_eq!(args, ["pdf", "-1"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::parse_from(["skillget", "search", "pdf", "--catalog", "c.json"]);
        assert_eq!(
            cli.catalog.as_deref().and_then(|path| path.to_str()),
            Some("c.json")
        );
        assert!(matches!(cli.command, Some(Command::Search { .. })));
    }

    #[test]
    fn unknown_commands_are_captured() {
        let cli = Cli::parse_from(["skillget", "serach", "pdf"]);
        match cli.command {
            Some(Command::External(args)) => assert_eq!(args, ["serach", "pdf"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_arguments_means_no_command() {
        let cli = Cli::parse_from(["skillget"]);
        assert!(cli.command.is_none());
    }
}
