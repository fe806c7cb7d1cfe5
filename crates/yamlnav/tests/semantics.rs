//! Kind checking across grammars and traversal entries.

use yamlnav::{is_kind, MapTraversal};
use yamlnav_parse::{parse_json, parse_yaml};

#[test]
fn yaml_kind_checking() {
    let resource = parse_yaml("apiVersion: apps/v1\nkind: Namespace").unwrap().remove(0);
    assert!(is_kind(&resource, "Namespace", None));
    assert!(!is_kind(&resource, "Gnomespace", None));
    assert!(is_kind(&resource, "Namespace", Some("apps/v1")));
    assert!(!is_kind(&resource, "Namespace", Some("gnomes/v1")));
}

#[test]
fn yaml_kind_missing() {
    let resource = parse_yaml("notanapiVersion: apps/v1\nnotakind: Namespace")
        .unwrap()
        .remove(0);
    assert!(!is_kind(&resource, "Namespace", None));
    assert!(!is_kind(&resource, "Namespace", Some("apps/v1")));
}

#[test]
fn json_kind_checking() {
    let resource = parse_json(r#"{ "apiVersion": "apps/v1", "kind": "Namespace" }"#).unwrap();
    assert!(is_kind(&resource, "Namespace", None));
    assert!(!is_kind(&resource, "Gnomespace", None));
    assert!(is_kind(&resource, "Namespace", Some("apps/v1")));
    assert!(!is_kind(&resource, "Namespace", Some("gnomes/v1")));

    let missing =
        parse_json(r#"{ "notanapiVersion": "apps/v1", "notakind": "Namespace" }"#).unwrap();
    assert!(!is_kind(&missing, "Namespace", None));
}

#[test]
fn traversal_kind_checking() {
    let resource = parse_yaml("apiVersion: apps/v1\nkind: Namespace").unwrap().remove(0);
    let doc = MapTraversal::new(&resource);
    assert!(is_kind(doc, "Namespace", None));
    assert!(!is_kind(doc, "Gnomespace", None));
    assert!(is_kind(doc, "Namespace", Some("apps/v1")));
    assert!(!is_kind(doc, "Namespace", Some("gnomes/v1")));

    // A view that is not present never matches
    assert!(!is_kind(doc.as_map("spec"), "Namespace", None));
}

#[test]
fn kind_without_value_does_not_match() {
    let resource = parse_yaml("kind:\napiVersion: v1").unwrap().remove(0);
    assert!(!is_kind(&resource, "", None));
}
