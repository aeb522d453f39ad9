//! Error types for the skillget CLI.

use std::{env::VarError, io, path::PathBuf, process::ExitCode, result::Result as StdResult};

use thiserror::Error;
use toml::de::Error as TomlError;

use crate::retrieve::InstallMethod;

/// Result type for skillget operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// The skill catalog could not be read.
    #[error("Failed to load skills catalog at {path}: {source}")]
    CatalogRead {
        /// Path to the catalog file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The skill catalog was not valid JSON.
    #[error("Failed to parse skills catalog at {path}: {source}")]
    CatalogParse {
        /// Path to the catalog file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The settings file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the settings file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The settings file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the settings file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// Home directory resolution failed.
    #[error("Failed to resolve the home directory.")]
    HomeDirMissing,
    /// A configured path could not be expanded.
    #[error("Invalid path in config: {path}: {source}")]
    PathExpansion {
        /// Input path that failed to expand.
        path: String,
        /// Underlying expansion error.
        source: shellexpand::LookupError<VarError>,
    },
    /// A path was not valid Unicode where text was required.
    #[error("Path is not valid Unicode: {path}")]
    PathNotUnicode {
        /// Path that could not be represented as UTF-8.
        path: PathBuf,
    },
    /// The search query was empty.
    #[error("Please provide a search query.")]
    InvalidQuery,
    /// The install index was not a number or fell outside the result list.
    #[error("Invalid index '{index}'. Please choose between 1 and {count}.")]
    InvalidIndex {
        /// Index as given on the command line.
        index: String,
        /// Number of results available.
        count: usize,
    },
    /// A skill name cannot be used as a directory name.
    #[error("Invalid skill name '{name}'")]
    InvalidSkillName {
        /// The rejected name.
        name: String,
    },
    /// A source URL did not have the expected browse shape.
    #[error("Invalid GitHub URL format: {url}")]
    InvalidUrl {
        /// The invalid URL.
        url: String,
    },
    /// An install method failed to retrieve the skill.
    #[error("{method} failed: {message}")]
    Retrieval {
        /// Method that failed.
        method: InstallMethod,
        /// Diagnostic output or failure description.
        message: String,
    },
    /// The HTTP client could not be constructed.
    #[error("Failed to set up HTTP client: {message}")]
    HttpClient {
        /// Error message.
        message: String,
    },
    /// Failed to download from URL.
    #[error("Failed to download from {url}: {message}")]
    Download {
        /// URL that failed.
        url: String,
        /// Error message.
        message: String,
    },
    /// Downloaded file too large.
    #[error("File too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// Actual size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },
    /// Search results could not be serialized.
    #[error("Failed to serialize search results: {source}")]
    OutputSerialize {
        /// Underlying serialization error.
        source: serde_json::Error,
    },
    /// A skill file or directory could not be written.
    #[error("Failed to write skill file at {path}: {source}")]
    SkillWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A skill file could not be read.
    #[error("Failed to read skill file at {path}: {source}")]
    SkillRead {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    ///
    /// Bad user input is reported but does not fail the process.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidQuery | Self::InvalidIndex { .. } => ExitCode::SUCCESS,
            _ => ExitCode::from(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::process::ExitCode;

    use super::Error;

    #[test]
    fn input_errors_exit_cleanly() {
        assert_eq!(Error::InvalidQuery.exit_code(), ExitCode::SUCCESS);
        let error = Error::InvalidIndex {
            index: "9".to_string(),
            count: 2,
        };
        assert_eq!(error.exit_code(), ExitCode::SUCCESS);
        assert_eq!(Error::HomeDirMissing.exit_code(), ExitCode::from(1));
    }
}
