//! Placeholder substitution.
//!
//! Rendering happens in three ordered passes over a copy of the template
//! text: dates, content, then metrics. Within the metrics pass the generic
//! `{{metrics}}` / `{{metrics-inline}}` tokens are replaced before the
//! per-metric-name tokens, since a metric's display name could collide with
//! one of them. Unrecognized placeholders are left untouched; substitution
//! never fails on unknown tokens.

use chrono::{Local, NaiveDate, NaiveDateTime};

use super::metrics::{self, MetricDefinition};
use super::types::{FormState, ImageRef, JournalTemplate};

/// Render `template` against `form` with the current wall clock for the
/// time-of-day placeholders. See [`render_at`].
pub fn render(
    template: &JournalTemplate,
    form: &FormState,
    selected: &[MetricDefinition],
) -> String {
    render_at(template, form, selected, Local::now().naive_local())
}

/// Render `template` against `form`, taking the time-of-day placeholders
/// from `now`. Pure; the template itself is never modified.
pub fn render_at(
    template: &JournalTemplate,
    form: &FormState,
    selected: &[MetricDefinition],
    now: NaiveDateTime,
) -> String {
    let mut out = template.content.clone();
    date_pass(&mut out, form, now);
    content_pass(&mut out, form);
    metrics_pass(&mut out, form, selected);
    out
}

fn substitute(text: &mut String, token: &str, value: &str) {
    if text.contains(token) {
        *text = text.replace(token, value);
    }
}

/// The form date is parsed as a plain calendar date, never converted through
/// UTC: a timezone round-trip can shift the day.
fn date_pass(text: &mut String, form: &FormState, now: NaiveDateTime) {
    let date = NaiveDate::parse_from_str(&form.date, "%Y-%m-%d")
        .unwrap_or_else(|_| now.date());

    substitute(text, "{{date}}", &date.format("%Y-%m-%d").to_string());
    substitute(text, "{{date-long}}", &date.format("%B %-d, %Y").to_string());
    substitute(text, "{{date-month-day}}", &date.format("%B %-d").to_string());
    substitute(text, "{{date-compact}}", &date.format("%Y%m%d").to_string());

    substitute(text, "{{time}}", &now.format("%H:%M").to_string());
    substitute(text, "{{time-12}}", &now.format("%-I:%M %p").to_string());
    substitute(text, "{{time-12-lower}}", &now.format("%-I:%M%P").to_string());
}

fn content_pass(text: &mut String, form: &FormState) {
    substitute(text, "{{content}}", &combined_content(form));
    substitute(text, "{{journal-content}}", &form.journal_text);
    substitute(text, "{{dream-content}}", &form.dream_content);
    substitute(text, "{{title}}", &form.dream_title);
    substitute(text, "{{dream-title}}", &form.dream_title);
    substitute(text, "{{dream-title-kebab}}", &slugify(&form.dream_title));
    substitute(text, "{{dream-image}}", &image_embed(&form.dream_image));
    substitute(text, "{{journal-image}}", &image_embed(&form.journal_image));
}

/// Journal text followed by the dream block (bolded title, then content),
/// all joined by blank lines.
fn combined_content(form: &FormState) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !form.journal_text.is_empty() {
        parts.push(form.journal_text.clone());
    }
    if !form.dream_title.trim().is_empty() {
        parts.push(format!("**Dream: {}**", form.dream_title));
    }
    if !form.dream_content.trim().is_empty() {
        parts.push(form.dream_content.clone());
    }
    parts.join("\n\n")
}

fn image_embed(image: &ImageRef) -> String {
    if image.path.is_empty() {
        String::new()
    } else if image.width > 0 {
        format!("![[{}|{}]]", image.path, image.width)
    } else {
        format!("![[{}]]", image.path)
    }
}

fn metrics_pass(text: &mut String, form: &FormState, selected: &[MetricDefinition]) {
    // Word count of the dream content always leads the metrics text
    let mut lines = vec![format!("Words: {}", word_count(&form.dream_content))];
    for def in selected {
        let value = metrics::format_value(def, form.metric_values.get(&def.id));
        lines.push(format!("{}: {}", def.name, value));
    }

    substitute(text, "{{metrics}}", &lines.join("\n"));
    substitute(text, "{{metrics-inline}}", &lines.join(", "));

    // Individual per-metric tokens come after the generic ones
    for def in selected {
        let token = format!("{{{{{}}}}}", def.name);
        let value = metrics::format_value(def, form.metric_values.get(&def.id));
        substitute(text, &token, &value);
    }
}

/// Whitespace-split token count of the trimmed text; empty text counts 0.
pub fn word_count(text: &str) -> usize {
    text.trim().split_whitespace().count()
}

/// Lowercase, strip special characters, spaces to hyphens, collapse runs of
/// hyphens, trim leading/trailing hyphens.
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
        } else if c == ' ' || c == '_' || c == '-' {
            // Only add hyphen if last char wasn't already a hyphen
            if !result.ends_with('-') {
                result.push('-');
            }
        }
        // Other characters are skipped
    }

    result.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::metrics::{builtin_metrics, MetricValue};
    use chrono::NaiveTime;

    fn template(content: &str) -> JournalTemplate {
        JournalTemplate {
            id: "test".to_string(),
            name: "test".to_string(),
            content: content.to_string(),
            description: None,
        }
    }

    fn noon(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
    }

    fn form(date: &str) -> FormState {
        FormState { date: date.to_string(), ..FormState::default() }
    }

    #[test]
    fn test_date_placeholders() {
        let tpl = template("{{date}} | {{date-long}} | {{date-month-day}} | {{date-compact}}");
        let out = render_at(&tpl, &form("2025-06-28"), &[], noon("2025-01-01"));
        assert_eq!(out, "2025-06-28 | June 28, 2025 | June 28 | 20250628");
    }

    #[test]
    fn test_date_day_not_zero_padded() {
        let tpl = template("{{date-long}}");
        let out = render_at(&tpl, &form("2025-06-05"), &[], noon("2025-01-01"));
        assert_eq!(out, "June 5, 2025");
    }

    #[test]
    fn test_time_placeholders_use_clock_not_form_date() {
        let tpl = template("{{time}} / {{time-12}} / {{time-12-lower}}");
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(15, 7, 0).unwrap());
        let out = render_at(&tpl, &form("2025-06-28"), &[], now);
        assert_eq!(out, "15:07 / 3:07 PM / 3:07pm");
    }

    #[test]
    fn test_journal_content() {
        let tpl = template("> {{journal-content}}");
        let mut f = form("2025-06-28");
        f.journal_text = "Hello world".to_string();
        let out = render_at(&tpl, &f, &[], noon("2025-06-28"));
        assert_eq!(out, "> Hello world");
    }

    #[test]
    fn test_combined_content_with_dream() {
        let tpl = template("{{content}}");
        let mut f = form("2025-06-28");
        f.journal_text = "Journal text".to_string();
        f.dream_title = "Falling".to_string();
        f.dream_content = "I was falling".to_string();
        let out = render_at(&tpl, &f, &[], noon("2025-06-28"));
        assert_eq!(out, "Journal text\n\n**Dream: Falling**\n\nI was falling");
    }

    #[test]
    fn test_combined_content_without_dream() {
        let tpl = template("{{content}}");
        let mut f = form("2025-06-28");
        f.journal_text = "Only journal".to_string();
        let out = render_at(&tpl, &f, &[], noon("2025-06-28"));
        assert_eq!(out, "Only journal");
    }

    #[test]
    fn test_dream_title_kebab() {
        let tpl = template("{{dream-title-kebab}}");
        let mut f = form("2025-06-28");
        f.dream_title = "The  Falling Dream!".to_string();
        let out = render_at(&tpl, &f, &[], noon("2025-06-28"));
        assert_eq!(out, "the-falling-dream");
    }

    #[test]
    fn test_image_embed_forms() {
        let tpl = template("{{journal-image}}|{{dream-image}}");
        let mut f = form("2025-06-28");
        f.journal_image = ImageRef { path: "a.png".to_string(), width: 0 };
        f.dream_image = ImageRef { path: "b.png".to_string(), width: 300 };
        let out = render_at(&tpl, &f, &[], noon("2025-06-28"));
        assert_eq!(out, "![[a.png]]|![[b.png|300]]");
    }

    #[test]
    fn test_missing_image_renders_empty() {
        let tpl = template("image:{{journal-image}}");
        let out = render_at(&tpl, &form("2025-06-28"), &[], noon("2025-06-28"));
        assert_eq!(out, "image:");
    }

    #[test]
    fn test_metrics_multi_line_and_word_count() {
        let tpl = template("{{metrics}}");
        let mut f = form("2025-06-28");
        f.dream_content = "one two three".to_string();
        f.metric_values
            .insert("sensory-detail".to_string(), MetricValue::Number(4.0));

        let selected: Vec<_> = builtin_metrics()
            .into_iter()
            .filter(|m| m.id == "sensory-detail" || m.id == "setting")
            .collect();

        let out = render_at(&tpl, &f, &selected, noon("2025-06-28"));
        assert_eq!(out, "Words: 3\nSensory Detail: 4\nSetting: ");
    }

    #[test]
    fn test_metrics_inline() {
        let tpl = template("{{metrics-inline}}");
        let mut f = form("2025-06-28");
        f.dream_content = "one two".to_string();

        let selected: Vec<_> =
            builtin_metrics().into_iter().filter(|m| m.id == "confidence").collect();

        let out = render_at(&tpl, &f, &selected, noon("2025-06-28"));
        assert_eq!(out, "Words: 2, Confidence Score: 0");
    }

    #[test]
    fn test_individual_metric_token() {
        let tpl = template("score={{Confidence Score}}");
        let mut f = form("2025-06-28");
        f.metric_values.insert("confidence".to_string(), MetricValue::Number(5.0));

        let selected: Vec<_> =
            builtin_metrics().into_iter().filter(|m| m.id == "confidence").collect();

        let out = render_at(&tpl, &f, &selected, noon("2025-06-28"));
        assert_eq!(out, "score=5");
    }

    #[test]
    fn test_unknown_placeholders_left_untouched() {
        let tpl = template("{{date}} {{mystery-token}}");
        let out = render_at(&tpl, &form("2025-06-28"), &[], noon("2025-06-28"));
        assert_eq!(out, "2025-06-28 {{mystery-token}}");
    }

    #[test]
    fn test_word_count_edge_cases() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("  spaced   out words "), 3);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's up?"), "whats-up");
        assert_eq!(slugify("  trim -- me  "), "trim-me");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_invalid_form_date_falls_back_to_clock() {
        let tpl = template("{{date}}");
        let out = render_at(&tpl, &form("not-a-date"), &[], noon("2025-03-09"));
        assert_eq!(out, "2025-03-09");
    }
}
