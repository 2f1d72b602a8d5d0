//! Template structure analysis.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{PlaceholderKind, PlaceholderPosition, TemplateStructure};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // No nested braces: the first `}` closes the token
    Regex::new(r"\{\{([^{}]+)\}\}").unwrap()
});

/// Date placeholder spellings, any of which satisfies the date requirement.
pub const DATE_PLACEHOLDERS: [&str; 4] =
    ["date", "date-long", "date-month-day", "date-compact"];

/// Scan `content` for `{{...}}` tokens and record every occurrence with its
/// character-offset span, in first-occurrence order.
///
/// Analysis is deterministic: the same string always yields an identical
/// structure. The recorded offsets refer to this exact string; any edit
/// invalidates them.
pub fn analyze(content: &str) -> TemplateStructure {
    let mut placeholders = Vec::new();

    for caps in PLACEHOLDER_RE.captures_iter(content) {
        let whole = caps.get(0).expect("match group 0");
        let name = caps[1].to_string();
        placeholders.push(PlaceholderPosition {
            kind: classify(&name),
            name,
            start: whole.start(),
            end: whole.end(),
        });
    }

    let first_span = |kind: PlaceholderKind| {
        placeholders.iter().find(|p| p.kind == kind).map(|p| (p.start, p.end))
    };

    let journal_content = first_span(PlaceholderKind::JournalContent);
    let dream_content = first_span(PlaceholderKind::DreamContent);
    let date_position = placeholders
        .iter()
        .find(|p| p.kind == PlaceholderKind::Date)
        .map(|p| p.start);

    TemplateStructure { placeholders, journal_content, dream_content, date_position }
}

fn classify(name: &str) -> PlaceholderKind {
    match name {
        "journal-content" => PlaceholderKind::JournalContent,
        "dream-content" => PlaceholderKind::DreamContent,
        n if DATE_PLACEHOLDERS.contains(&n) => PlaceholderKind::Date,
        _ => PlaceholderKind::Other,
    }
}

/// True when the template carries the placeholders dashboard parsing needs:
/// the literal `{{journal-content}}` and at least one date placeholder.
///
/// Templates failing this check are still usable for entry insertion; they
/// are only excluded from dashboard parsing.
pub fn has_required_placeholders(content: &str) -> bool {
    content.contains("{{journal-content}}")
        && DATE_PLACEHOLDERS.iter().any(|d| content.contains(&format!("{{{{{d}}}}}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_positions_in_order() {
        let tpl = "> [!journal-entry] {{date}}\n> {{journal-content}}\n> {{mood}}";
        let s = analyze(tpl);

        assert_eq!(s.placeholders.len(), 3);
        assert_eq!(s.placeholders[0].name, "date");
        assert_eq!(s.placeholders[0].kind, PlaceholderKind::Date);
        assert_eq!(s.placeholders[1].kind, PlaceholderKind::JournalContent);
        assert_eq!(s.placeholders[2].kind, PlaceholderKind::Other);

        for p in &s.placeholders {
            assert!(p.start < p.end);
            assert_eq!(&tpl[p.start..p.end], format!("{{{{{}}}}}", p.name));
        }
    }

    #[test]
    fn test_cached_fields_point_at_first_occurrence() {
        let tpl = "{{date-long}} {{date}} {{journal-content}} {{journal-content}}";
        let s = analyze(tpl);

        assert_eq!(s.date_position, Some(0));
        let (start, end) = s.journal_content.unwrap();
        assert_eq!(&tpl[start..end], "{{journal-content}}");
        assert_eq!(start, 23);
        assert!(s.dream_content.is_none());
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let tpl = "> {{date}}\n> {{journal-content}}\n>> [!dream-diary]\n>> {{dream-content}}";
        assert_eq!(analyze(tpl), analyze(tpl));
    }

    #[test]
    fn test_no_nested_braces() {
        // The first `}` closes nothing here; `{{a{{b}}` has no valid token
        // until `{{b}}`.
        let s = analyze("{{outer {{inner}} }}");
        assert_eq!(s.placeholders.len(), 1);
        assert_eq!(s.placeholders[0].name, "inner");
    }

    #[test]
    fn test_date_spellings_classified() {
        for name in DATE_PLACEHOLDERS {
            let s = analyze(&format!("{{{{{name}}}}}"));
            assert_eq!(s.placeholders[0].kind, PlaceholderKind::Date, "{name}");
        }
    }

    #[test]
    fn test_required_placeholders() {
        assert!(has_required_placeholders("{{journal-content}} {{date}}"));
        assert!(has_required_placeholders("{{date-compact}}\n{{journal-content}}"));
        assert!(!has_required_placeholders("{{journal-content}} only"));
        assert!(!has_required_placeholders("{{date}} without content"));
        assert!(!has_required_placeholders("plain text"));
    }
}
