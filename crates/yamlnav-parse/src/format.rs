//! Input formats and the parse dispatcher.

use crate::model::ResourceParse;
use crate::{parse_helm_template, parse_json, parse_yaml, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The grammar used to read a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
    /// YAML with embedded `{{ ... }}` template expressions
    HelmTemplate,
}

impl Format {
    /// Infer the format from a file extension. YAML files that contain a
    /// template expression are read as Helm templates.
    ///
    /// Returns None for unrecognized extensions.
    pub fn from_path(path: impl AsRef<Path>, content: &str) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" if content.contains("{{") => Some(Format::HelmTemplate),
            "yaml" | "yml" => Some(Format::Yaml),
            "tpl" => Some(Format::HelmTemplate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::HelmTemplate => "helm",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "helm" | "helm-template" => Ok(Format::HelmTemplate),
            other => Err(format!("unknown format '{}'", other)),
        }
    }
}

/// Parse `content` with the grammar for `format`.
///
/// JSON always yields exactly one document.
pub fn parse(content: &str, format: Format) -> Result<Vec<ResourceParse>> {
    tracing::debug!(format = %format, "parsing document");
    match format {
        Format::Yaml => parse_yaml(content),
        Format::Json => parse_json(content).map(|doc| vec![doc]),
        Format::HelmTemplate => parse_helm_template(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path("deploy.yaml", "a: b"), Some(Format::Yaml));
        assert_eq!(Format::from_path("deploy.YML", "a: b"), Some(Format::Yaml));
        assert_eq!(Format::from_path("pkg.json", "{}"), Some(Format::Json));
        assert_eq!(
            Format::from_path("templates/svc.yaml", "name: {{ .Release.Name }}"),
            Some(Format::HelmTemplate)
        );
        assert_eq!(Format::from_path("README.md", ""), None);
        assert_eq!(Format::from_path("Makefile", ""), None);
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for format in [Format::Yaml, Format::Json, Format::HelmTemplate] {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
        assert!("toml".parse::<Format>().is_err());
    }

    #[test]
    fn test_parse_dispatch() {
        assert_eq!(parse("a: 1\n---\nb: 2", Format::Yaml).unwrap().len(), 2);
        assert_eq!(parse(r#"{"a": 1}"#, Format::Json).unwrap().len(), 1);
        let helm = parse("a: {{ .x }}", Format::HelmTemplate).unwrap();
        assert_eq!(helm[0].get("a").unwrap().value.as_str(), Some("{{ .x }}"));
    }
}
