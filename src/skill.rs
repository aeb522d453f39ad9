//! Helpers for installed skill directories.

use std::{
    fs,
    io::{self, ErrorKind},
    path::Path,
};

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};

/// The expected skill file name within a skill directory.
pub const SKILL_FILE_NAME: &str = "SKILL.md";

/// Version control metadata directories left out of file listings.
const METADATA_DIRS: [&str; 2] = [".git", ".svn"];

/// Reject names that cannot safely be used as a single directory name.
pub fn validate_skill_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.contains('\0');
    if invalid {
        return Err(Error::InvalidSkillName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// List files under an installed skill, relative to its directory, sorted.
pub fn list_installed_files(skill_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(skill_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_metadata_dir(entry));
    for entry in walker {
        let entry = entry.map_err(|error| Error::SkillRead {
            path: skill_dir.to_path_buf(),
            source: error
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("walkdir error")),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(skill_dir)
            .unwrap_or(entry.path());
        files.push(relative.to_string_lossy().replace('\\', "/"));
    }
    Ok(files)
}

/// Read the installed `SKILL.md`, returning `None` when it is absent.
pub fn read_descriptor(skill_dir: &Path) -> Result<Option<String>> {
    let path = skill_dir.join(SKILL_FILE_NAME);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
        Err(error) => Err(Error::SkillRead {
            path,
            source: error,
        }),
    }
}

/// Whether a walk entry is a version control metadata directory.
fn is_metadata_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| METADATA_DIRS.contains(&name))
}
