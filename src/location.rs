//! Decomposition of repository browse URLs.

use std::borrow::Cow;

use url::Url;

/// Host whose raw file contents are served from a separate domain.
const GITHUB_HOST: &str = "github.com";
/// Raw content host paired with [`GITHUB_HOST`].
const GITHUB_RAW_HOST: &str = "raw.githubusercontent.com";

/// Location of a skill folder inside a hosted repository.
///
/// Path components are stored decoded, as they appear on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// URL scheme of the browse URL, `http` or `https`.
    pub scheme: String,
    /// Hosting service with an explicit port if one was given, e.g. `github.com`.
    pub host: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch the browse URL points at.
    pub branch: String,
    /// Folder path within the repository, possibly containing slashes.
    pub subpath: String,
}

impl RepoLocation {
    /// Parse `https://<host>/<owner>/<repo>/tree/<branch>/<subpath...>`.
    ///
    /// Returns `None` for any other shape, or when a segment does not decode
    /// to a single UTF-8 path component.
    pub fn parse(raw: &str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        if !matches!(url.scheme(), "https" | "http") {
            return None;
        }
        let host = match url.port() {
            Some(port) => format!("{}:{port}", url.host_str()?),
            None => url.host_str()?.to_string(),
        };

        let mut segments = url
            .path_segments()?
            .map(decode_segment)
            .collect::<Option<Vec<String>>>()?;
        if segments.last().is_some_and(String::is_empty) {
            segments.pop();
        }
        if segments.len() < 5 || segments[2] != "tree" {
            return None;
        }
        if segments.iter().any(String::is_empty) {
            return None;
        }

        Some(Self {
            scheme: url.scheme().to_string(),
            host,
            owner: segments[0].clone(),
            repo: segments[1].clone(),
            branch: segments[3].clone(),
            subpath: segments[4..].join("/"),
        })
    }

    /// Clone URL for the repository.
    pub fn clone_url(&self) -> String {
        format!(
            "{}://{}/{}/{}.git",
            self.scheme,
            self.host,
            encode_path(&self.owner),
            encode_path(&self.repo)
        )
    }

    /// Export URL understood by the host's Subversion bridge.
    pub fn svn_export_url(&self) -> String {
        format!(
            "{}://{}/{}/{}/trunk/{}",
            self.scheme,
            self.host,
            encode_path(&self.owner),
            encode_path(&self.repo),
            encode_path(&self.subpath)
        )
    }

    /// Raw content URL for a single file inside the skill folder.
    pub fn raw_file_url(&self, file_name: &str) -> String {
        let (scheme, host) = if self.host == GITHUB_HOST {
            ("https", GITHUB_RAW_HOST)
        } else {
            (self.scheme.as_str(), self.host.as_str())
        };
        format!(
            "{scheme}://{host}/{}/{}/{}/{}/{}",
            encode_path(&self.owner),
            encode_path(&self.repo),
            encode_path(&self.branch),
            encode_path(&self.subpath),
            encode_path(file_name)
        )
    }

    /// Last segment of the subpath, used as a default skill name.
    pub fn folder_name(&self) -> &str {
        self.subpath.rsplit('/').next().unwrap_or(&self.subpath)
    }
}

/// Percent-decode one path segment, rejecting invalid UTF-8 and embedded slashes.
fn decode_segment(segment: &str) -> Option<String> {
    let decoded = urlencoding::decode(segment).ok()?;
    if decoded.contains('/') {
        return None;
    }
    Some(decoded.into_owned())
}

/// Percent-encode each component of a slash-separated path.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(urlencoding::encode)
        .collect::<Vec<Cow<'_, str>>>()
        .join("/")
}
