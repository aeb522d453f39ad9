//! Relevance ranking of catalog records against a query.

use std::cmp::Reverse;

use crate::catalog::SkillRecord;

/// Result limit when the caller does not give one.
pub const DEFAULT_LIMIT: usize = 10;

/// Result limit used by the `search` and `install` commands.
pub const CLI_LIMIT: usize = 20;

/// Score added when the query appears in the skill name.
const NAME_WEIGHT: u32 = 10;
/// Score added when the query appears in the description.
const DESCRIPTION_WEIGHT: u32 = 5;
/// Score added when the query appears in the author.
const AUTHOR_WEIGHT: u32 = 3;

/// A catalog record paired with its relevance score.
#[derive(Debug, Clone, Copy)]
pub struct RankedResult<'a> {
    /// The matching record.
    pub skill: &'a SkillRecord,
    /// Accumulated relevance score, always non-zero.
    pub score: u32,
}

/// Rank catalog records against a query, returning at most `limit` results.
///
/// `limit` defaults to [`DEFAULT_LIMIT`].
///
/// Matching is a case-insensitive substring test over name, description and
/// author. Results are ordered by score, then stars, then catalog order. An
/// empty query matches nothing.
pub fn rank<'a>(
    query: &str,
    catalog: &'a [SkillRecord],
    limit: Option<usize>,
) -> Vec<RankedResult<'a>> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut results: Vec<RankedResult<'a>> = catalog
        .iter()
        .filter_map(|skill| {
            let score = score(skill, &needle);
            (score > 0).then_some(RankedResult { skill, score })
        })
        .collect();

    // sort_by_key is stable, so equal keys keep catalog order.
    results.sort_by_key(|result| (Reverse(result.score), Reverse(result.skill.stars)));
    results.truncate(limit.unwrap_or(DEFAULT_LIMIT));
    results
}

/// Score a single record against an already lowercased needle.
fn score(skill: &SkillRecord, needle: &str) -> u32 {
    let fields = [
        (&skill.name, NAME_WEIGHT),
        (&skill.description, DESCRIPTION_WEIGHT),
        (&skill.author, AUTHOR_WEIGHT),
    ];
    fields
        .iter()
        .filter(|(field, _)| field.to_lowercase().contains(needle))
        .map(|(_, weight)| weight)
        .sum()
}
