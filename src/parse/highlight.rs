//! Line-by-line minima annotation of multi-line METAR/TAF text.
//!
//! Each input line becomes one `<div>` wrapper. Line text is copied
//! verbatim and NOT escaped; the renderer receiving `html` must treat raw
//! report characters accordingly. Input is split on `\n` only, so a
//! trailing newline yields a final empty wrapper and a `\r` stays in its
//! line's text. Wrappers are joined with `\n`, so `strip_markup` recovers
//! the exact original text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::alert::category::{flight_category, FlightCategory};
use crate::alert::minima::meets_minima;
use crate::model::{Minima, ParsedConditions};
use crate::parse::line::parse_line;

const LINE_CLASS: &str = "wx-line";
const VIOLATION_CLASS: &str = "wx-line wx-violation";

const CLOSE_TAG: &str = "</div>";

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<div class="wx-line(?: wx-violation)?"(?: data-category="[A-Z]+")?>"#)
        .expect("wrapper pattern is valid")
});

/// Per-line result of the minima scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAnnotation {
    pub text: String,
    pub conditions: ParsedConditions,
    /// Below minima on a line that reported ceiling or visibility.
    pub violation: bool,
    pub category: Option<FlightCategory>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HighlightedReport {
    pub html: String,
    pub has_violations: bool,
    pub lines: Vec<LineAnnotation>,
}

fn annotate(line: &str, minima: &Minima) -> LineAnnotation {
    if line.trim().is_empty() {
        return LineAnnotation {
            text: line.to_string(),
            conditions: ParsedConditions::default(),
            violation: false,
            category: None,
        };
    }

    let conditions = parse_line(line);
    LineAnnotation {
        text: line.to_string(),
        violation: conditions.has_any() && !meets_minima(&conditions, minima),
        category: flight_category(&conditions),
        conditions,
    }
}

fn render(annotation: &LineAnnotation) -> String {
    let class = if annotation.violation { VIOLATION_CLASS } else { LINE_CLASS };
    match annotation.category {
        Some(category) => format!(
            r#"<div class="{}" data-category="{}">{}</div>"#,
            class, category, annotation.text
        ),
        None => format!(r#"<div class="{}">{}</div>"#, class, annotation.text),
    }
}

/// Annotates every line of `raw` against `minima`.
///
/// Empty or whitespace-only input yields an empty report.
pub fn highlight(raw: &str, minima: &Minima) -> HighlightedReport {
    if raw.trim().is_empty() {
        return HighlightedReport::default();
    }

    let lines: Vec<LineAnnotation> = raw.split('\n').map(|line| annotate(line, minima)).collect();
    let html = lines.iter().map(render).collect::<Vec<_>>().join("\n");
    let has_violations = lines.iter().any(|l| l.violation);

    HighlightedReport {
        html,
        has_violations,
        lines,
    }
}

/// Removes the line wrappers added by `highlight`, returning the original
/// text. Only the opening tag at the start of each line and the one closing
/// tag at its end are removed; markup inside the report text is kept.
pub fn strip_markup(html: &str) -> String {
    html.split('\n')
        .map(|fragment| {
            let Some(open) = OPEN_TAG_RE.find(fragment) else {
                return fragment;
            };
            let inner = &fragment[open.end()..];
            inner.strip_suffix(CLOSE_TAG).unwrap_or(inner)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
