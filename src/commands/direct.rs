//! Direct install command implementation.

use crate::{
    catalog::SkillRecord,
    commands::{ColorChoice, system_installer},
    config::Config,
    diagnostics::Diagnostics,
    error::{Error, Result},
    location::RepoLocation,
};

/// Install a skill straight from a browse URL, bypassing the catalog.
pub async fn run(
    color: ColorChoice,
    config: &Config,
    url: &str,
    name: Option<&str>,
) -> Result<()> {
    let mut diagnostics = Diagnostics::default();
    let Some(skill) = record_for(url, name) else {
        diagnostics.warn(
            Error::InvalidUrl {
                url: url.to_string(),
            }
            .to_string(),
        );
        diagnostics.print_warning_summary();
        return Ok(());
    };

    let installer = system_installer(config, color)?;
    installer.install(&skill, &mut diagnostics).await;
    diagnostics.print_warning_summary();
    Ok(())
}

/// Describe a browse URL as a catalog record.
///
/// The name defaults to the final subpath segment and the author to the
/// repository owner.
fn record_for(url: &str, name: Option<&str>) -> Option<SkillRecord> {
    let location = RepoLocation::parse(url)?;
    Some(SkillRecord {
        name: name.unwrap_or(location.folder_name()).to_string(),
        author: location.owner.clone(),
        description: String::new(),
        source_url: url.to_string(),
        path: location.subpath.clone(),
        stars: 0,
        forks: 0,
    })
}
