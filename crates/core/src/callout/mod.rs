//! Callout block parsing primitives.
//!
//! A callout is a markdown blockquote with a typed header line such as
//! `> [!journal-entry] Saturday`. Nested content carries one extra leading
//! `>` per level. Nesting depth is inferred purely from the count of `>`
//! markers; indentation is not significant.

pub mod scanner;

use std::sync::LazyLock;

use regex::Regex;

static IMAGE_EMBED_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches ![[path]] and ![[path|300]]
    Regex::new(r"!\[\[[^\]]*\]\]").unwrap()
});

/// Build the header regex for a named callout: `> [!<name>]`, case-insensitive,
/// with optional title text after the bracket.
pub fn header_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)^>\s*\[!{}\]", regex::escape(name))).expect("valid regex")
}

/// Matcher for a named callout header, or for a callout of any name when
/// `name` is empty. Compile once and reuse when scanning many lines.
pub fn header_matcher(name: &str) -> Regex {
    if name.is_empty() {
        ANY_HEADER_RE.clone()
    } else {
        header_regex(name)
    }
}

/// True if `line` opens a callout with the given name; an empty name matches
/// a callout of any name.
pub fn is_header_line(line: &str, name: &str) -> bool {
    header_matcher(name).is_match(line)
}

static ANY_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^>\s*\[![^\]\s]+\]").unwrap());

/// Count `![[...]]` image embeds in `text`. Width annotations (`|300`) are
/// part of the embed and do not affect the count.
pub fn count_image_embeds(text: &str) -> usize {
    IMAGE_EMBED_RE.find_iter(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_matches_case_insensitive() {
        assert!(is_header_line("> [!journal-entry] 2025-06-28", "journal-entry"));
        assert!(is_header_line("> [!Journal-Entry]", "journal-entry"));
        assert!(is_header_line(">[!journal-entry]", "journal-entry"));
    }

    #[test]
    fn test_header_requires_exact_name() {
        assert!(!is_header_line("> [!journal-entry-old]", "journal-entry"));
        assert!(!is_header_line("> [!journal]", "journal-entry"));
    }

    #[test]
    fn test_any_name_mode() {
        assert!(is_header_line("> [!toc]", ""));
        assert!(is_header_line("> [!whatever] title", ""));
        assert!(!is_header_line("> plain quote", ""));
    }

    #[test]
    fn test_nested_header_does_not_open() {
        // A `>>`-prefixed header is inside another callout and does not match
        // the single-`>` opening pattern.
        assert!(!is_header_line(">> [!dream-diary]", "dream-diary"));
    }

    #[test]
    fn test_count_image_embeds() {
        let block = "> ![[a.png]]\n>> some text ![[b.png|300]]\n> end";
        assert_eq!(count_image_embeds(block), 2);
        assert_eq!(count_image_embeds("no embeds"), 0);
    }
}
