//! Path expansion and normalization utilities.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use path_clean::PathClean;

use crate::error::{Error, Result};

/// Resolve the current user's home directory.
fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(Error::HomeDirMissing)
}

/// Return the default settings path for the current platform.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(".skillget.toml"))
}

/// Return the default catalog location.
pub fn default_catalog_path() -> Result<PathBuf> {
    Ok(home_dir()?.join(".skillget").join("catalog.json"))
}

/// Return the per-user directory skills are installed into.
pub fn default_skills_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".claude").join("skills"))
}

/// Expand a user-provided path and resolve it relative to a base directory.
pub fn expand_path(raw: &str, base_dir: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).map_err(|error| Error::PathExpansion {
        path: raw.to_string(),
        source: error,
    })?;
    let expanded_path = PathBuf::from(expanded.as_ref());
    let resolved = if expanded_path.is_relative() {
        base_dir.join(expanded_path)
    } else {
        expanded_path
    };
    Ok(normalize_path(&resolved))
}

/// Expand a path given on the command line, relative to the working directory.
pub fn expand_cli_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_str().ok_or_else(|| Error::PathNotUnicode {
        path: path.to_path_buf(),
    })?;
    expand_path(raw, Path::new("."))
}

/// Normalize a path by canonicalizing when possible and cleaning otherwise.
pub fn normalize_path(path: &Path) -> PathBuf {
    match dunce::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => path.clean(),
    }
}

/// Render a path for display, using a tilde prefix for the home directory.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}
