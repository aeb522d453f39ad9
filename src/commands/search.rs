//! Search command implementation.

use serde::Serialize;

use crate::{
    catalog::Catalog,
    commands::ColorChoice,
    config::Config,
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette,
    search::{CLI_LIMIT, RankedResult, rank},
};

/// Marker line opening the machine-readable result block.
const JSON_START: &str = "---JSON-OUTPUT---";
/// Marker line closing the machine-readable result block.
const JSON_END: &str = "---END-JSON-OUTPUT---";
/// Characters of description shown per result.
const DESCRIPTION_PREVIEW: usize = 100;

/// Machine-readable search output.
#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    /// The query as searched.
    query: &'a str,
    /// Ranked results, best first.
    results: Vec<JsonResult<'a>>,
}

/// A single result in the machine-readable block.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonResult<'a> {
    /// One-based position, as accepted by `install`.
    index: usize,
    /// Skill name.
    name: &'a str,
    /// Skill author.
    author: &'a str,
    /// Full description.
    description: &'a str,
    /// Star count.
    stars: u64,
    /// Fork count.
    forks: u64,
    /// Browse URL of the skill folder.
    source_url: &'a str,
}

/// Search the catalog and print ranked results.
pub async fn run(color: ColorChoice, config: &Config, query: &[String]) -> Result<()> {
    let mut diagnostics = Diagnostics::default();
    let catalog = Catalog::load(config.catalog(), &mut diagnostics)?;
    let query = parse_query(query)?;
    let results = rank(&query, catalog.skills(), Some(CLI_LIMIT));
    let use_color = color.enabled();

    print!("{}", render_results(&query, &results, use_color));
    if !results.is_empty() {
        println!("{JSON_START}");
        println!("{}", render_json(&query, &results)?);
        println!("{JSON_END}");
    }

    diagnostics.print_warning_summary();
    Ok(())
}

/// Join query words into a single query, rejecting blank input.
pub(crate) fn parse_query(words: &[String]) -> Result<String> {
    let query = words.join(" ");
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::InvalidQuery);
    }
    Ok(query.to_string())
}

/// Render the human-readable result list.
fn render_results(query: &str, results: &[RankedResult<'_>], use_color: bool) -> String {
    let mut lines = vec![format!("Searching for: \"{query}\"")];
    if results.is_empty() {
        lines.push(palette::fmt_error(
            "No skills found matching your query.",
            use_color,
        ));
        return lines.join("\n") + "\n";
    }

    lines.push(palette::fmt_heading(
        &format!("\nFound {} matching skills:", results.len()),
        use_color,
    ));
    for (offset, result) in results.iter().enumerate() {
        let skill = result.skill;
        lines.push(format!(
            "\n{} {} {}",
            palette::fmt_label(&format!("{}.", offset + 1), use_color),
            palette::fmt_skill_name(&skill.name, use_color),
            palette::fmt_label(&format!("(by {})", skill.author), use_color),
        ));
        lines.push(format!("   Stars: {} | Forks: {}", skill.stars, skill.forks));
        if !skill.description.is_empty() {
            lines.push(format!(
                "   {}",
                palette::fmt_description(&preview(&skill.description), use_color)
            ));
        }
        lines.push(format!(
            "   {}",
            palette::fmt_path(&skill.source_url, use_color)
        ));
    }
    lines.join("\n") + "\n\n"
}

/// Shorten a description to its preview length on a character boundary.
fn preview(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_PREVIEW).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Render the machine-readable result block body.
fn render_json(query: &str, results: &[RankedResult<'_>]) -> Result<String> {
    let output = SearchOutput {
        query,
        results: results
            .iter()
            .enumerate()
            .map(|(offset, result)| JsonResult {
                index: offset + 1,
                name: &result.skill.name,
                author: &result.skill.author,
                description: &result.skill.description,
                stars: result.skill.stars,
                forks: result.skill.forks,
                source_url: &result.skill.source_url,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&output).map_err(|source| Error::OutputSerialize { source })
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{parse_query, preview, render_json, render_results};
    use crate::{
        error::Error,
        search::{CLI_LIMIT, rank},
        testutil::record,
    };

    #[test]
    fn joins_query_words() {
        let words = vec!["pdf".to_string(), "tools".to_string()];
        assert_eq!(parse_query(&words).expect("query"), "pdf tools");
    }

    #[test]
    fn rejects_blank_queries() {
        assert!(matches!(parse_query(&[]), Err(Error::InvalidQuery)));
        let blank = vec!["  ".to_string()];
        assert!(matches!(parse_query(&blank), Err(Error::InvalidQuery)));
    }

    #[test]
    fn lists_results_with_indices() {
        let catalog = vec![record("pytest-helper", "jane", 5), record("lint", "bob", 9)];
        let results = rank("pytest", &catalog, Some(CLI_LIMIT));
        let text = render_results("pytest", &results, false);
        assert!(text.contains("Found 1 matching skills:"));
        assert!(text.contains("1. pytest-helper (by jane)"));
        assert!(text.contains("   Stars: 5 | Forks: 0"));
        assert!(text.contains("   Description for pytest-helper"));
        assert!(text.contains("https://github.com/jane/skills/tree/main/skills/pytest-helper"));
    }

    #[test]
    fn reports_empty_results() {
        let text = render_results("zzz", &[], false);
        assert!(text.contains("No skills found matching your query."));
    }

    #[test]
    fn truncates_long_descriptions_on_char_boundaries() {
        let long = "é".repeat(150);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), 103);
        assert!(shown.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn json_block_carries_one_based_indices() {
        let catalog = vec![record("a-skill", "x", 1), record("b-skill", "x", 3)];
        let results = rank("skill", &catalog, Some(CLI_LIMIT));
        let json: Value = serde_json::from_str(&render_json("skill", &results).expect("json"))
            .expect("parse");

        assert_eq!(json["query"], "skill");
        assert_eq!(json["results"][0]["index"], 1);
        assert_eq!(json["results"][0]["name"], "b-skill");
        assert_eq!(json["results"][1]["stars"], 1);
        assert_eq!(
            json["results"][1]["sourceUrl"],
            "https://github.com/x/skills/tree/main/skills/a-skill"
        );
    }
}
