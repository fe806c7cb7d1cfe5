//! Kinds command implementation

use super::{load, FormatArg};
use anyhow::Result;
use std::path::Path;
use yamlnav::{is_kind, MapTraversal};
use yamlnav_parse::ResourceParse;

pub fn execute(
    file: &Path,
    format: Option<FormatArg>,
    kind: Option<&str>,
    api_version: Option<&str>,
) -> Result<()> {
    let loaded = load(file, format)?;
    for line in list_kinds(&loaded.documents, kind, api_version) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per document: index, apiVersion and kind. With a `kind`
/// filter, only matching documents are listed.
pub fn list_kinds(
    documents: &[ResourceParse],
    kind: Option<&str>,
    api_version: Option<&str>,
) -> Vec<String> {
    documents
        .iter()
        .enumerate()
        .filter(|(_, document)| kind.is_none_or(|kind| is_kind(*document, kind, api_version)))
        .map(|(index, document)| {
            let resource = MapTraversal::new(document);
            let field = |key: &str| resource.as_string(key).value().unwrap_or("-").to_string();
            format!("{}\t{}\t{}", index, field("apiVersion"), field("kind"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlnav_parse::parse_yaml;

    const TEXT: &str = "apiVersion: v1\nkind: Service\n---\napiVersion: apps/v1\nkind: Deployment\n---\nkind: 42\n";

    #[test]
    fn test_lists_every_document() {
        let documents = parse_yaml(TEXT).unwrap();
        assert_eq!(
            list_kinds(&documents, None, None),
            vec!["0\tv1\tService", "1\tapps/v1\tDeployment", "2\t-\t-"]
        );
    }

    #[test]
    fn test_filters_by_kind_and_version() {
        let documents = parse_yaml(TEXT).unwrap();
        assert_eq!(
            list_kinds(&documents, Some("Deployment"), None),
            vec!["1\tapps/v1\tDeployment"]
        );
        assert!(list_kinds(&documents, Some("Deployment"), Some("v1")).is_empty());
    }
}
