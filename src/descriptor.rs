//! Extraction of usage information from a skill's `SKILL.md`.

use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::split_frontmatter;

/// Headings introducing the example section.
const EXAMPLE_HEADINGS: [&str; 2] = ["example", "examples"];

/// Number of examples shown in the install summary.
pub const DISPLAYED_EXAMPLES: usize = 3;

/// Matches an ATX heading, capturing its marker and text.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$").expect("invalid heading regex")
});

/// Matches the opening or closing line of a fenced code block.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(```|~~~)").expect("invalid fence regex"));

/// Structured fields read from an installed descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSkillConfig {
    /// Title from the first top-level heading.
    pub name: String,
    /// Body of the "Description" section.
    pub description: String,
    /// Body of the "Usage" section.
    pub usage: String,
    /// Paragraph blocks from the "Example(s)" section, in document order.
    pub examples: Vec<String>,
}

impl InstalledSkillConfig {
    /// The examples shown in the install summary.
    pub fn displayed_examples(&self) -> impl Iterator<Item = &str> {
        self.examples
            .iter()
            .take(DISPLAYED_EXAMPLES)
            .map(String::as_str)
    }
}

/// One line of the document body with its heading, if it is one.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    /// Raw line text.
    text: &'a str,
    /// Heading level and title; never set inside code fences.
    heading: Option<(usize, &'a str)>,
    /// Whether the line belongs to a fenced code block, fences included.
    fenced: bool,
}

/// Extract name, description, usage and examples from a descriptor.
///
/// Missing sections produce empty fields. Frontmatter `name` and
/// `description` fill in when the body has no matching heading or section.
pub fn extract(document: &str) -> InstalledSkillConfig {
    let (frontmatter, body) = split_frontmatter(document);
    let lines = scan(body);

    let name = lines
        .iter()
        .find_map(|line| match line.heading {
            Some((1, title)) if !title.is_empty() => Some(title.to_string()),
            _ => None,
        })
        .or(frontmatter.name.map(|name| name.trim().to_string()))
        .unwrap_or_default();

    let description = section(&lines, &["description"])
        .map(|body| join(body).trim().to_string())
        .filter(|text| !text.is_empty())
        .or(frontmatter
            .description
            .map(|description| description.trim().to_string()))
        .unwrap_or_default();

    let usage = section(&lines, &["usage"])
        .map(|body| join(body).trim().to_string())
        .unwrap_or_default();

    let examples = section(&lines, &EXAMPLE_HEADINGS)
        .map(split_blocks)
        .unwrap_or_default();

    InstalledSkillConfig {
        name,
        description,
        usage,
        examples,
    }
}

/// Classify each line, tracking code fences so their contents are inert.
fn scan(body: &str) -> Vec<Line<'_>> {
    let mut in_fence = false;
    body.lines()
        .map(|text| {
            if FENCE.is_match(text) {
                in_fence = !in_fence;
                return Line {
                    text,
                    heading: None,
                    fenced: true,
                };
            }
            let heading = if in_fence {
                None
            } else {
                HEADING.captures(text).and_then(|captures| {
                    let level = captures.get(1)?.as_str().len();
                    let title = captures.get(2)?.as_str();
                    Some((level, title))
                })
            };
            Line {
                text,
                heading,
                fenced: in_fence,
            }
        })
        .collect()
}

/// Lines under the first level 1 or 2 heading named like one of `titles`.
///
/// The section runs until the next heading of the same or a higher level.
fn section<'l, 'a>(lines: &'l [Line<'a>], titles: &[&str]) -> Option<&'l [Line<'a>]> {
    let (start, level) = lines.iter().enumerate().find_map(|(index, line)| {
        let (level, title) = line.heading?;
        let named = titles
            .iter()
            .any(|candidate| title.eq_ignore_ascii_case(candidate));
        (level <= 2 && named).then_some((index + 1, level))
    })?;

    let end = lines[start..]
        .iter()
        .position(|line| matches!(line.heading, Some((next, _)) if next <= level))
        .map_or(lines.len(), |offset| start + offset);
    Some(&lines[start..end])
}

/// Join section lines back into text.
fn join(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| line.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split section lines into blocks at blank lines outside code fences.
fn split_blocks(lines: &[Line<'_>]) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in lines {
        if !line.fenced && line.text.trim().is_empty() {
            push_block(&mut blocks, &mut current);
        } else {
            current.push(line.text);
        }
    }
    push_block(&mut blocks, &mut current);
    blocks
}

/// Move accumulated lines into `blocks` if they hold any text.
fn push_block(blocks: &mut Vec<String>, current: &mut Vec<&str>) {
    let block = current.join("\n");
    current.clear();
    let block = block.trim_end();
    if !block.trim().is_empty() {
        blocks.push(block.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{InstalledSkillConfig, extract};

    #[test]
    fn extracts_basic_sections() {
        let config = extract("# Widget\n\n## Usage\nDo X\n\n## Examples\nEx1\n\nEx2\n");
        assert_eq!(config.name, "Widget");
        assert_eq!(config.usage, "Do X");
        assert_eq!(config.examples, ["Ex1", "Ex2"]);
        assert_eq!(config.description, "");
    }

    #[test]
    fn empty_document_yields_empty_config() {
        assert_eq!(extract(""), InstalledSkillConfig::default());
    }

    #[test]
    fn headings_are_case_insensitive_and_level_limited() {
        let doc = "# Tool\n\n# DESCRIPTION\nDoes things.\n\n### Usage\nnot a section\n";
        let config = extract(doc);
        assert_eq!(
            config.description,
            "Does things.\n\n### Usage\nnot a section"
        );
        assert_eq!(config.usage, "");
    }

    #[test]
    fn sections_end_at_same_or_higher_level() {
        let doc = "## Usage\nRun it.\n### Flags\n--fast\n## Notes\nignored\n";
        let config = extract(doc);
        assert_eq!(config.usage, "Run it.\n### Flags\n--fast");
        assert_eq!(config.name, "");
    }

    #[test]
    fn code_fences_hide_headings_and_blank_lines() {
        let doc = "# Real\n\n## Example\n```sh\n# not a heading\n\nrun --all\n```\n\nSecond\n";
        let config = extract(doc);
        assert_eq!(config.name, "Real");
        assert_eq!(
            config.examples,
            ["```sh\n# not a heading\n\nrun --all\n```", "Second"]
        );
    }

    #[test]
    fn frontmatter_fills_missing_fields() {
        let doc = "---\nname: from-yaml\ndescription: From YAML.\n---\n## Usage\nGo\n";
        let config = extract(doc);
        assert_eq!(config.name, "from-yaml");
        assert_eq!(config.description, "From YAML.");
        assert_eq!(config.usage, "Go");
    }

    #[test]
    fn headings_win_over_frontmatter() {
        let doc = "---\nname: yaml\n---\n# Title\n\n## Description\nBody text\n";
        let config = extract(doc);
        assert_eq!(config.name, "Title");
        assert_eq!(config.description, "Body text");
    }

    #[test]
    fn displays_at_most_three_examples() {
        let doc = "## Examples\none\n\ntwo\n\nthree\n\nfour\n";
        let config = extract(doc);
        assert_eq!(config.examples.len(), 4);
        assert_eq!(
            config.displayed_examples().collect::<Vec<_>>(),
            ["one", "two", "three"]
        );
    }
}
