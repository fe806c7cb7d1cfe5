//! Resource-level predicates.

use crate::traversal::{MapTraversal, TraversalEntry};

/// True if the resource's `kind` is `kind` and, when given, its
/// `apiVersion` is `api_version`. Absent or non-string fields never match.
///
/// ```rust
/// use yamlnav::is_kind;
/// use yamlnav_parse::parse_yaml;
///
/// let docs = parse_yaml("apiVersion: apps/v1\nkind: Namespace").unwrap();
/// assert!(is_kind(&docs[0], "Namespace", Some("apps/v1")));
/// assert!(!is_kind(&docs[0], "Namespace", Some("gnomes/v1")));
/// ```
pub fn is_kind<'a>(
    resource: impl Into<MapTraversal<'a>>,
    kind: &str,
    api_version: Option<&str>,
) -> bool {
    let resource = resource.into();
    let matches = |key: &str, expected: &str| {
        let field = resource.as_string(key);
        field.is_valid() && field.value() == Ok(expected)
    };

    matches("kind", kind) && api_version.is_none_or(|version| matches("apiVersion", version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlnav_parse::parse_yaml;

    #[test]
    fn test_kind_must_be_a_string() {
        let docs = parse_yaml("kind: 123\n---\nkind:\n  name: Namespace").unwrap();
        assert!(!is_kind(&docs[0], "123", None));
        assert!(!is_kind(&docs[1], "Namespace", None));
    }

    #[test]
    fn test_accepts_nested_map_traversal() {
        let docs = parse_yaml("items:\n- kind: Service\n  apiVersion: v1").unwrap();
        let item = MapTraversal::new(&docs[0]).as_array("items").as_map(0);
        assert!(is_kind(item, "Service", Some("v1")));
        assert!(!is_kind(item, "Service", Some("apps/v1")));
    }
}
