//! Dream metric definitions and value formatting.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Kind of a metric, deciding the input widget and the value formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Score,
    Number,
    Text,
    List,
}

/// A metric the user can record alongside a dream entry.
///
/// `min`/`max` bounds are hints for input widgets only; rendering never
/// clamps or validates against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub id: String,
    pub name: String,
    pub kind: MetricKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// A value entered for a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

/// The built-in metric catalog.
pub fn builtin_metrics() -> Vec<MetricDefinition> {
    fn score(id: &str, name: &str, description: &str) -> MetricDefinition {
        MetricDefinition {
            id: id.to_string(),
            name: name.to_string(),
            kind: MetricKind::Score,
            description: description.to_string(),
            min: Some(1.0),
            max: Some(5.0),
        }
    }

    vec![
        score("sensory-detail", "Sensory Detail", "Vividness of sensory impressions in the dream"),
        score("emotional-recall", "Emotional Recall", "How clearly the dream's emotions are remembered"),
        score("confidence", "Confidence Score", "Confidence that the recalled dream matches what was dreamt"),
        MetricDefinition {
            id: "lost-segments".to_string(),
            name: "Lost Segments".to_string(),
            kind: MetricKind::Number,
            description: "Number of dream segments felt but not remembered".to_string(),
            min: None,
            max: None,
        },
        MetricDefinition {
            id: "characters".to_string(),
            name: "Characters".to_string(),
            kind: MetricKind::List,
            description: "People or beings appearing in the dream".to_string(),
            min: None,
            max: None,
        },
        MetricDefinition {
            id: "setting".to_string(),
            name: "Setting".to_string(),
            kind: MetricKind::Text,
            description: "Where the dream took place".to_string(),
            min: None,
            max: None,
        },
    ]
}

/// Resolve the user's ordered selection against the catalog.
///
/// Order is meaningful: it decides the rendering order of the metrics text.
/// Unknown ids are skipped with a warning.
pub fn select_metrics(selected: &[String]) -> Vec<MetricDefinition> {
    let catalog = builtin_metrics();
    let mut out = Vec::with_capacity(selected.len());
    for id in selected {
        match catalog.iter().find(|m| &m.id == id) {
            Some(def) => out.push(def.clone()),
            None => warn!(metric = %id, "unknown metric id in configuration, skipping"),
        }
    }
    out
}

/// Format a metric value for rendering.
///
/// Score and number metrics render the raw numeric value, `"0"` when unset;
/// other kinds render the text as-is, `""` when unset.
pub fn format_value(def: &MetricDefinition, value: Option<&MetricValue>) -> String {
    match (def.kind, value) {
        (MetricKind::Score | MetricKind::Number, None) => "0".to_string(),
        (_, None) => String::new(),
        (_, Some(MetricValue::Number(n))) => format_number(*n),
        (_, Some(MetricValue::Text(s))) => s.clone(),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
