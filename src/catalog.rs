//! Skill catalog loading from the on-disk JSON record list.

use std::{collections::HashSet, fs, path::Path, result::Result as StdResult};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
};

/// A single catalog entry describing an installable skill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SkillRecord {
    /// Skill name, unique within the catalog.
    pub name: String,
    /// Skill author.
    #[serde(default)]
    pub author: String,
    /// Short description of the skill.
    #[serde(default)]
    pub description: String,
    /// Browse URL of the skill folder on the hosting service.
    #[serde(rename = "sourceUrl", alias = "githubUrl")]
    pub source_url: String,
    /// Path to the skill within the host repository.
    #[serde(default)]
    pub path: String,
    /// Star count of the host repository.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub stars: u64,
    /// Fork count of the host repository.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub forks: u64,
}

/// Read a count, treating `null` as zero.
fn null_as_zero<'de, D>(deserializer: D) -> StdResult<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Immutable in-memory catalog of known skills.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Records in catalog file order.
    skills: Vec<SkillRecord>,
}

impl Catalog {
    /// Load the catalog file, warning about and dropping duplicate names.
    pub(crate) fn load(path: &Path, diagnostics: &mut Diagnostics) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|error| Error::CatalogRead {
            path: path.to_path_buf(),
            source: error,
        })?;
        let records: Vec<SkillRecord> =
            serde_json::from_str(&contents).map_err(|error| Error::CatalogParse {
                path: path.to_path_buf(),
                source: error,
            })?;

        let catalog = Self::from_records(records, diagnostics);
        debug!(
            count = catalog.len(),
            path = %path.display(),
            "loaded skills catalog"
        );
        Ok(catalog)
    }

    /// Build a catalog from records, keeping the first of any duplicate name.
    pub(crate) fn from_records(records: Vec<SkillRecord>, diagnostics: &mut Diagnostics) -> Self {
        let mut seen = HashSet::new();
        let mut skills = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.name.clone()) {
                diagnostics.warn(format!(
                    "duplicate skill '{}' in catalog, keeping the first entry",
                    record.name
                ));
                continue;
            }
            skills.push(record);
        }
        Self { skills }
    }

    /// Records in catalog order.
    pub(crate) fn skills(&self) -> &[SkillRecord] {
        &self.skills
    }

    /// Number of records in the catalog.
    pub(crate) fn len(&self) -> usize {
        self.skills.len()
    }
}
