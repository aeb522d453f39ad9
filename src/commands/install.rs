//! Install command implementation.

use crate::{
    catalog::{Catalog, SkillRecord},
    commands::{ColorChoice, search::parse_query, system_installer},
    config::Config,
    diagnostics::Diagnostics,
    error::{Error, Result},
    search::{CLI_LIMIT, RankedResult, rank},
};

/// Re-run a search and install the result at a one-based index.
///
/// The final argument is the index; the words before it form the query.
pub async fn run(color: ColorChoice, config: &Config, args: &[String]) -> Result<()> {
    let mut diagnostics = Diagnostics::default();
    let catalog = Catalog::load(config.catalog(), &mut diagnostics)?;
    let (query, index) = split_args(args)?;
    let results = rank(&query, catalog.skills(), Some(CLI_LIMIT));
    let skill = select(&results, index)?;

    let installer = system_installer(config, color)?;
    installer.install(skill, &mut diagnostics).await;
    diagnostics.print_warning_summary();
    Ok(())
}

/// Separate the query words from the trailing index argument.
fn split_args(args: &[String]) -> Result<(String, &str)> {
    let Some((index, words)) = args.split_last() else {
        return Err(Error::InvalidQuery);
    };
    let query = parse_query(words)?;
    Ok((query, index.as_str()))
}

/// Pick the result at a one-based index.
fn select<'a>(results: &[RankedResult<'a>], raw_index: &str) -> Result<&'a SkillRecord> {
    let invalid = || Error::InvalidIndex {
        index: raw_index.to_string(),
        count: results.len(),
    };
    let index: usize = raw_index.trim().parse().map_err(|_| invalid())?;
    index
        .checked_sub(1)
        .and_then(|offset| results.get(offset))
        .map(|result| result.skill)
        .ok_or_else(invalid)
}
