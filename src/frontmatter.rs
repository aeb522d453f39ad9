//! YAML frontmatter splitting for skill descriptors.

use serde::Deserialize;

/// Fields a descriptor's frontmatter may declare.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// The declared skill name.
    #[serde(default)]
    pub name: Option<String>,
    /// The declared skill description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Split a document into its parsed frontmatter and the remaining body.
///
/// Documents without a frontmatter block, or whose block is not valid YAML,
/// yield empty frontmatter. The body never includes the block.
pub fn split_frontmatter(contents: &str) -> (Frontmatter, &str) {
    let Some(bounds) = frontmatter_bounds(contents) else {
        return (Frontmatter::default(), contents);
    };
    let yaml = &contents[bounds.start..bounds.end];
    let frontmatter = serde_yaml::from_str::<Frontmatter>(yaml).unwrap_or_default();
    (frontmatter, &contents[bounds.body..])
}

/// Byte range bounds for frontmatter in a document.
#[derive(Debug, Clone, Copy)]
struct FrontmatterBounds {
    /// Start byte index of the YAML payload.
    start: usize,
    /// End byte index of the YAML payload.
    end: usize,
    /// Start byte index of the document body after the closing fence.
    body: usize,
}

/// Locate the byte range containing frontmatter in a document.
fn frontmatter_bounds(contents: &str) -> Option<FrontmatterBounds> {
    let mut offset = 0;
    let mut lines = contents.split_inclusive('\n');
    let first = lines.next()?;
    if trim_line_endings(first) != "---" {
        return None;
    }
    offset += first.len();
    let start = offset;

    for line in lines {
        if trim_line_endings(line) == "---" {
            return Some(FrontmatterBounds {
                start,
                end: offset,
                body: offset + line.len(),
            });
        }
        offset += line.len();
    }

    None
}

/// Trim CRLF and LF suffixes from a line fragment.
fn trim_line_endings(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}
