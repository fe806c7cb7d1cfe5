//! Query command implementation

use super::{load, render_highlight, FormatArg};
use crate::diagnostic::Severity;
use anyhow::{bail, Context, Result};
use std::fmt::Write;
use std::path::Path as FilePath;
use yamlnav::{Items, Kind, Path, Traversal, TraversalEntry};
use yamlnav_parse::{ResourceParse, SourceText};

pub fn execute(file: &FilePath, path: &str, format: Option<FormatArg>, document: usize) -> Result<()> {
    let loaded = load(file, format)?;
    let path: Path = path
        .parse()
        .with_context(|| format!("Invalid path expression: {}", path))?;

    let Some(resource) = loaded.documents.get(document) else {
        bail!(
            "Document {} not found: {} contains {} document(s)",
            document,
            loaded.name,
            loaded.documents.len()
        );
    };

    print!("{}", summary(&loaded.content, resource, &path)?);

    let entry = Traversal::new(resource).at(&path);
    let (severity, title, label) = match entry.kind() {
        Kind::NotPresent => (
            Severity::Warning,
            format!("{} is not present", path),
            "nearest existing location",
        ),
        _ => (Severity::Advice, format!("{} is a {}", path, entry.kind()), "here"),
    };
    if let Some(report) = render_highlight(
        &loaded.name,
        &loaded.content,
        severity,
        &title,
        label,
        entry.highlight_range(),
    ) {
        print!("{}", report);
    }

    Ok(())
}

/// Plain-text description of the entry at `path`.
pub fn summary(content: &str, resource: &ResourceParse, path: &Path) -> Result<String> {
    let entry = Traversal::new(resource).at(path);
    let source = SourceText::new(content);
    let mut out = String::new();

    writeln!(out, "path: {}", path)?;
    writeln!(out, "kind: {}", entry.kind())?;
    writeln!(out, "exists: {}", entry.exists())?;

    if let Ok(value) = entry.value() {
        writeln!(out, "value: {}", serde_json::to_string(&value)?)?;
        if let Ok(raw) = entry.raw_text() {
            writeln!(out, "raw: {}", raw)?;
        }
    } else if let Ok(items) = entry.items() {
        let shape = match items {
            Items::Array(_) => "array",
            Items::Map(_) => "map",
        };
        writeln!(out, "items: {} ({})", items.len(), shape)?;
    }

    if let Ok(key_range) = entry.key_range() {
        writeln!(out, "key: {}", key_range)?;
    }

    let highlight = entry.highlight_range();
    match source.location(highlight.start) {
        Some(location) => writeln!(out, "highlight: {} at {}", highlight, location)?,
        None => writeln!(out, "highlight: {}", highlight)?,
    }

    Ok(out)
}
