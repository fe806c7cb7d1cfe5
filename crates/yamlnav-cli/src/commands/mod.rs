//! Command implementations for the yamlnav CLI
//!
//! Each command reads its input through [`load`] and writes plain text to
//! stdout. Formatting lives in functions that return strings so that it
//! can be tested without a terminal.

pub mod kinds;
pub mod query;
pub mod strings;

use crate::diagnostic::{self, Highlight, Severity};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::io::IsTerminal;
use std::path::Path;
use yamlnav_parse::{Format, Range, ResourceParse};

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
    /// YAML with {{ ... }} template expressions
    Helm,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => Format::Yaml,
            FormatArg::Json => Format::Json,
            FormatArg::Helm => Format::HelmTemplate,
        }
    }
}

/// A parsed input file.
pub struct Loaded {
    pub name: String,
    pub content: String,
    pub documents: Vec<ResourceParse>,
}

/// Read and parse `file`. Without an explicit format, the format is
/// inferred from the file name, falling back to YAML.
pub fn load(file: &Path, format: Option<FormatArg>) -> Result<Loaded> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let name = file.display().to_string();

    let format = match format {
        Some(arg) => arg.into(),
        None => Format::from_path(file, &content).unwrap_or_else(|| {
            tracing::debug!(file = %name, "unrecognized extension, reading as YAML");
            Format::Yaml
        }),
    };

    let documents = parse_content(&name, &content, format)?;
    tracing::info!(file = %name, format = %format, documents = documents.len(), "loaded");

    Ok(Loaded {
        name,
        content,
        documents,
    })
}

fn parse_content(name: &str, content: &str, format: Format) -> Result<Vec<ResourceParse>> {
    yamlnav_parse::parse(content, format).map_err(|err| {
        if let Some(range) = err.location() {
            if let Some(report) = render_highlight(
                name,
                content,
                Severity::Error,
                "Failed to parse input",
                &err.to_string(),
                range,
            ) {
                eprint!("{}", report);
            }
        }
        anyhow::Error::new(err).context(format!("Failed to parse {} as {}", name, format))
    })
}

/// Render a report for stdout, colored when stdout is a terminal.
pub fn render_highlight(
    name: &str,
    content: &str,
    severity: Severity,
    title: &str,
    label: &str,
    range: Range,
) -> Option<String> {
    let highlight = Highlight {
        severity,
        title,
        label,
        range,
    };
    diagnostic::render(name, content, &highlight, std::io::stdout().is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(Format::from(FormatArg::Helm), Format::HelmTemplate);
        assert_eq!(Format::from(FormatArg::Json), Format::Json);
    }

    #[test]
    fn test_parse_content_error_has_context() {
        let err = parse_content("bad.json", "{ \"a\": ", Format::Json).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse bad.json as json"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/nonexistent/input.yaml"), None)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
