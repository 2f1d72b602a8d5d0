//! Frontmatter parsing for template files.

use super::types::{ParsedTemplate, TemplateFrontmatter};

/// Parse frontmatter from template content.
///
/// Frontmatter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// description: morning pages
/// ---
/// > [!journal-entry] {{date}}
/// ```
///
/// Parsing is lenient: a frontmatter block that is not valid YAML (for
/// example because a value contains an unrendered `{{placeholder}}`) yields
/// no frontmatter but still strips the block from the body.
pub fn parse_template(content: &str) -> ParsedTemplate {
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return ParsedTemplate { frontmatter: None, body: content.to_string() };
    }

    let after_first = &trimmed[3..];

    // Skip the newline after opening ---
    let after_newline = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))
        .unwrap_or(after_first);

    let Some(end_pos) = find_closing_delimiter(after_newline) else {
        // No closing ---, treat as no frontmatter
        return ParsedTemplate { frontmatter: None, body: content.to_string() };
    };

    let yaml_content = &after_newline[..end_pos];

    // Body starts after the closing --- and the following newline
    let after_closing = &after_newline[end_pos + 3..];
    let body = after_closing
        .strip_prefix('\n')
        .or_else(|| after_closing.strip_prefix("\r\n"))
        .unwrap_or(after_closing)
        .to_string();

    let frontmatter = if yaml_content.trim().is_empty() {
        Some(TemplateFrontmatter::default())
    } else {
        serde_yaml::from_str::<TemplateFrontmatter>(yaml_content.trim()).ok()
    };

    ParsedTemplate { frontmatter, body }
}

/// Find the position of the closing `---` delimiter.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.trim() == "---" {
            let pos: usize = content
                .lines()
                .take(i)
                .map(|l| l.len() + 1) // +1 for newline
                .sum();
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_frontmatter() {
        let content = "> [!journal-entry] {{date}}\n> {{journal-content}}";
        let result = parse_template(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }

    #[test]
    fn parse_description() {
        let content = "---\ndescription: morning pages\n---\n> [!journal-entry]";
        let result = parse_template(content);
        let fm = result.frontmatter.unwrap();
        assert_eq!(fm.description.as_deref(), Some("morning pages"));
        assert_eq!(result.body, "> [!journal-entry]");
    }

    #[test]
    fn parse_name_override() {
        let content = "---\nname: Dream Log\n---\nbody";
        let result = parse_template(content);
        assert_eq!(result.frontmatter.unwrap().name.as_deref(), Some("Dream Log"));
    }

    #[test]
    fn parse_empty_frontmatter() {
        let content = "---\n---\nbody";
        let result = parse_template(content);
        assert!(result.frontmatter.is_some());
        assert_eq!(result.body, "body");
    }

    #[test]
    fn parse_invalid_yaml_still_strips_block() {
        let content = "---\n: not yaml {{date}}\n---\nbody";
        let result = parse_template(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, "body");
    }

    #[test]
    fn parse_unclosed_frontmatter_is_body() {
        let content = "---\ndescription: oops\nbody without closing";
        let result = parse_template(content);
        assert!(result.frontmatter.is_none());
        assert_eq!(result.body, content);
    }
}
