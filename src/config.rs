//! Settings loading from the optional `~/.skillget.toml` file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    paths,
};

/// Default HTTP request timeout in seconds.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default number of redirects followed by the single-file download.
const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Resolved settings for the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON skill catalog.
    catalog: PathBuf,
    /// Directory skills are installed into.
    skills_dir: PathBuf,
    /// Timeout applied to each HTTP request.
    http_timeout: Duration,
    /// Redirect responses followed before a download gives up.
    max_redirects: usize,
}

/// Raw settings file structure.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// Catalog path override.
    catalog: Option<String>,
    /// Install directory override.
    skills_dir: Option<String>,
    /// HTTP timeout override in seconds.
    http_timeout_secs: Option<u64>,
    /// Redirect limit override.
    max_redirects: Option<usize>,
}

impl Config {
    /// Load settings from the default location, falling back to defaults.
    pub(crate) fn load() -> Result<Self> {
        let path = paths::default_config_path()?;
        Self::load_from(&path)
    }

    /// Load settings from an explicit path. A missing file yields defaults.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|error| Error::ConfigParse {
                path: path.to_path_buf(),
                source: error,
            })?,
            Err(error) if error.kind() == ErrorKind::NotFound => RawConfig::default(),
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let base_dir = path.parent().unwrap_or(Path::new("."));
        Self::resolve(raw, base_dir)
    }

    /// Apply defaults and expand paths for a parsed settings file.
    fn resolve(raw: RawConfig, base_dir: &Path) -> Result<Self> {
        let catalog = match raw.catalog {
            Some(path) => paths::expand_path(&path, base_dir)?,
            None => paths::default_catalog_path()?,
        };
        let skills_dir = match raw.skills_dir {
            Some(path) => paths::expand_path(&path, base_dir)?,
            None => paths::default_skills_dir()?,
        };

        Ok(Self {
            catalog,
            skills_dir,
            http_timeout: Duration::from_secs(
                raw.http_timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
            max_redirects: raw.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS),
        })
    }

    /// Override the catalog path, typically from a CLI flag.
    pub(crate) fn with_catalog(mut self, catalog: Option<PathBuf>) -> Self {
        if let Some(catalog) = catalog {
            self.catalog = catalog;
        }
        self
    }

    /// Override the install directory, typically from a CLI flag.
    pub(crate) fn with_skills_dir(mut self, skills_dir: Option<PathBuf>) -> Self {
        if let Some(skills_dir) = skills_dir {
            self.skills_dir = skills_dir;
        }
        self
    }

    /// Path to the JSON skill catalog.
    pub(crate) fn catalog(&self) -> &Path {
        &self.catalog
    }

    /// Directory skills are installed into.
    pub(crate) fn skills_dir(&self) -> &Path {
        &self.skills_dir
    }

    /// Timeout applied to each HTTP request.
    pub(crate) fn http_timeout(&self) -> Duration {
        self.http_timeout
    }

    /// Redirect responses followed before a download gives up.
    pub(crate) fn max_redirects(&self) -> usize {
        self.max_redirects
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::Duration};

    use tempfile::tempdir;

    use crate::{config::Config, error::Error, paths::normalize_path};

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("missing.toml")).expect("config");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_redirects(), 5);
        assert!(config.skills_dir().ends_with(".claude/skills"));
    }

    #[test]
    fn resolves_paths_relative_to_config() {
        let dir = tempdir().expect("tempdir");
        let base = normalize_path(dir.path());
        let path = base.join("skillget.toml");
        fs::write(
            &path,
            "catalog = \"data/skills.json\"\nskills_dir = \"installed\"\nmax_redirects = 2\n",
        )
        .expect("write config");

        let config = Config::load_from(&path).expect("config");
        assert_eq!(config.catalog(), base.join("data").join("skills.json"));
        assert_eq!(config.skills_dir(), base.join("installed"));
        assert_eq!(config.max_redirects(), 2);
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("skillget.toml");
        fs::write(&path, "sources = []").expect("write config");

        let error = Config::load_from(&path).expect_err("config should fail");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn flags_override_settings() {
        let dir = tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("missing.toml"))
            .expect("config")
            .with_catalog(Some(PathBuf::from("/tmp/catalog.json")))
            .with_skills_dir(None);
        assert_eq!(config.catalog(), PathBuf::from("/tmp/catalog.json"));
        assert!(config.skills_dir().ends_with(".claude/skills"));
    }
}
