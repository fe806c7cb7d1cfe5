//! Source snippets rendered with ariadne.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use yamlnav_parse::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Advice,
}

/// A labelled source range to render.
pub struct Highlight<'a> {
    pub severity: Severity,
    pub title: &'a str,
    pub label: &'a str,
    pub range: Range,
}

/// Render `highlight` against `content`. Ranges are character offsets,
/// which is what ariadne expects.
pub fn render(source_id: &str, content: &str, highlight: &Highlight<'_>, color: bool) -> Option<String> {
    let (kind, label_color) = match highlight.severity {
        Severity::Error => (ReportKind::Error, Color::Red),
        Severity::Warning => (ReportKind::Warning, Color::Yellow),
        Severity::Advice => (ReportKind::Advice, Color::Cyan),
    };

    let span = highlight.range.start..highlight.range.end;
    let report = Report::build(kind, source_id.to_string(), highlight.range.start)
        .with_config(Config::default().with_color(color))
        .with_message(highlight.title)
        .with_label(
            Label::new((source_id.to_string(), span))
                .with_message(highlight.label)
                .with_color(label_color),
        )
        .finish();

    let mut output = Vec::new();
    report
        .write((source_id.to_string(), Source::from(content)), &mut output)
        .ok()?;

    String::from_utf8(output).ok()
}
