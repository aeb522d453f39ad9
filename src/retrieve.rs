//! Retrieval strategies that materialize a skill folder on disk.
//!
//! Three methods are supported, in decreasing order of completeness: a
//! Subversion export of the folder, a shallow Git sparse checkout, and a
//! download of the single `SKILL.md` file. The method is chosen once from the
//! tools available on the host and is not retried with another method.

use std::{
    fmt, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use reqwest::{Client, ClientBuilder, redirect::Policy};
use tempfile::Builder;
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{Error, Result},
    location::RepoLocation,
    runner::{CommandRunner, is_available},
    skill::SKILL_FILE_NAME,
};

/// Maximum download size in bytes (10 MB).
const MAX_DOWNLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// User agent sent with HTTP downloads.
const USER_AGENT: &str = concat!("skillget/", env!("CARGO_PKG_VERSION"));

/// How a skill gets onto disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMethod {
    /// `svn export` of the skill folder.
    SvnExport,
    /// Shallow `git` sparse checkout of the skill folder.
    SparseCheckout,
    /// HTTP download of `SKILL.md` alone.
    SkillFileOnly,
}

impl InstallMethod {
    /// Pick the most complete method the host supports.
    pub fn select(svn_available: bool, git_available: bool) -> Self {
        if svn_available {
            Self::SvnExport
        } else if git_available {
            Self::SparseCheckout
        } else {
            Self::SkillFileOnly
        }
    }

    /// Probe the host and pick a method. `git` is probed only without `svn`.
    pub fn detect(runner: &impl CommandRunner) -> Self {
        if is_available(runner, "svn") {
            return Self::SvnExport;
        }
        Self::select(false, is_available(runner, "git"))
    }

    /// Human-readable method name.
    pub fn label(self) -> &'static str {
        match self {
            Self::SvnExport => "SVN Export",
            Self::SparseCheckout => "Git Sparse Checkout",
            Self::SkillFileOnly => "SKILL.md Only",
        }
    }

    /// One-line explanation printed when the method is chosen.
    pub fn announcement(self) -> &'static str {
        match self {
            Self::SvnExport => "SVN detected - using efficient folder download",
            Self::SparseCheckout => "Git detected - using sparse checkout",
            Self::SkillFileOnly => "Neither SVN nor Git detected - downloading SKILL.md only",
        }
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Executes retrieval methods with an injected command runner.
#[derive(Debug)]
pub struct Retriever<R> {
    /// Runner for `svn` and `git`.
    runner: R,
    /// Client for single-file downloads.
    http: Client,
}

impl<R: CommandRunner> Retriever<R> {
    /// Build a retriever using HTTP limits from settings.
    pub fn new(runner: R, config: &Config) -> Result<Self> {
        let http = http_client(config)
            .build()
            .map_err(|error| Error::HttpClient {
                message: error.to_string(),
            })?;
        Ok(Self { runner, http })
    }

    /// The command runner used for probing and version control calls.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Populate `destination` with the skill at `location` using `method`.
    pub async fn fetch(
        &self,
        method: InstallMethod,
        location: &RepoLocation,
        destination: &Path,
    ) -> Result<()> {
        match method {
            InstallMethod::SvnExport => self.svn_export(location, destination),
            InstallMethod::SparseCheckout => self.sparse_checkout(location, destination),
            InstallMethod::SkillFileOnly => self.download_skill_file(location, destination).await,
        }
    }

    /// Export the skill folder straight into `destination`.
    fn svn_export(&self, location: &RepoLocation, destination: &Path) -> Result<()> {
        remove_dir_if_exists(destination)?;
        let url = location.svn_export_url();
        info!(%url, "exporting with svn");
        let target = path_arg(destination)?;
        self.run_checked(
            InstallMethod::SvnExport,
            "svn",
            &["export", &url, target],
            None,
        )
    }

    /// Fetch only the skill folder into a temporary repository, then move it.
    ///
    /// The temporary directory lives beside `destination` and is removed on
    /// every exit path.
    fn sparse_checkout(&self, location: &RepoLocation, destination: &Path) -> Result<()> {
        let (root, name) = split_destination(destination)?;
        fs::create_dir_all(root).map_err(|error| Error::SkillWrite {
            path: root.to_path_buf(),
            source: error,
        })?;

        let temp = Builder::new()
            .prefix(&format!(".temp_{name}_"))
            .tempdir_in(root)
            .map_err(|error| Error::SkillWrite {
                path: root.to_path_buf(),
                source: error,
            })?;
        let work = temp.path();
        debug!(work = %work.display(), "created sparse checkout directory");

        self.git(work, &["init"])?;
        self.git(work, &["remote", "add", "origin", &location.clone_url()])?;
        self.git(work, &["config", "core.sparseCheckout", "true"])?;

        let info_dir = work.join(".git").join("info");
        fs::create_dir_all(&info_dir).map_err(|error| Error::SkillWrite {
            path: info_dir.clone(),
            source: error,
        })?;
        let sparse_file = info_dir.join("sparse-checkout");
        fs::write(&sparse_file, format!("{}/*\n", location.subpath)).map_err(|error| {
            Error::SkillWrite {
                path: sparse_file.clone(),
                source: error,
            }
        })?;

        info!(branch = %location.branch, "pulling sparse checkout");
        self.git(work, &["pull", "origin", &location.branch, "--depth=1"])?;

        let downloaded = work.join(&location.subpath);
        if !downloaded.is_dir() {
            return Err(Error::Retrieval {
                method: InstallMethod::SparseCheckout,
                message: format!(
                    "path '{}' not found on branch '{}'",
                    location.subpath, location.branch
                ),
            });
        }

        remove_dir_if_exists(destination)?;
        fs::rename(&downloaded, destination).map_err(|error| Error::SkillWrite {
            path: destination.to_path_buf(),
            source: error,
        })?;

        let temp_path = work.to_path_buf();
        temp.close().map_err(|error| Error::SkillWrite {
            path: temp_path,
            source: error,
        })
    }

    /// Download `SKILL.md` from the raw content host into `destination`.
    async fn download_skill_file(&self, location: &RepoLocation, destination: &Path) -> Result<()> {
        let url = location.raw_file_url(SKILL_FILE_NAME);
        info!(%url, "downloading skill file");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|error| Error::Download {
                url: url.clone(),
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download {
                url,
                message: format!("server returned {status}"),
            });
        }

        if let Some(len) = response.content_length()
            && len > MAX_DOWNLOAD_SIZE
        {
            return Err(Error::FileTooLarge {
                size: len,
                max: MAX_DOWNLOAD_SIZE,
            });
        }

        let bytes = response.bytes().await.map_err(|error| Error::Download {
            url: url.clone(),
            message: error.to_string(),
        })?;
        if bytes.len() as u64 > MAX_DOWNLOAD_SIZE {
            return Err(Error::FileTooLarge {
                size: bytes.len() as u64,
                max: MAX_DOWNLOAD_SIZE,
            });
        }

        write_skill_file(destination, &bytes)
    }

    /// Run a git subcommand inside `work`.
    fn git(&self, work: &Path, args: &[&str]) -> Result<()> {
        self.run_checked(InstallMethod::SparseCheckout, "git", args, Some(work))
    }

    /// Run a command and turn spawn failures or non-zero exits into errors.
    fn run_checked(
        &self,
        method: InstallMethod,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<()> {
        let output = self
            .runner
            .run(program, args, cwd)
            .map_err(|error| Error::Retrieval {
                method,
                message: format!("failed to run {program}: {error}"),
            })?;
        if output.success {
            return Ok(());
        }
        Err(Error::Retrieval {
            method,
            message: format!(
                "`{program} {}` exited unsuccessfully: {}",
                args.join(" "),
                output.diagnostic()
            ),
        })
    }
}

/// HTTP client settings for single-file downloads.
fn http_client(config: &Config) -> ClientBuilder {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.http_timeout())
        .redirect(Policy::limited(config.max_redirects()))
}

/// Write the downloaded descriptor into `destination`, creating it as needed.
pub fn write_skill_file(destination: &Path, contents: &[u8]) -> Result<()> {
    fs::create_dir_all(destination).map_err(|error| Error::SkillWrite {
        path: destination.to_path_buf(),
        source: error,
    })?;
    let skill_path = destination.join(SKILL_FILE_NAME);
    fs::write(&skill_path, contents).map_err(|error| Error::SkillWrite {
        path: skill_path,
        source: error,
    })
}

/// Remove a directory tree, ignoring a missing directory.
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
        Err(error) => Err(Error::SkillWrite {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

/// Split an install destination into its parent and final component.
fn split_destination(destination: &Path) -> Result<(&Path, String)> {
    match (destination.parent(), destination.file_name()) {
        (Some(root), Some(name)) => Ok((root, name.to_string_lossy().into_owned())),
        _ => Err(Error::InvalidSkillName {
            name: destination.display().to_string(),
        }),
    }
}

/// Borrow a path as UTF-8 for use as a command argument.
fn path_arg(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| Error::PathNotUnicode {
        path: PathBuf::from(path),
    })
}
