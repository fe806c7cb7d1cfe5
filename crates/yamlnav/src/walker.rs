//! Depth-first walking of a parsed document with ancestor chains.
//!
//! [`walk`] visits every node of a [`ResourceParse`] once, in document
//! order, calling the matching methods of a [`ResourceWalker`]. Each call
//! receives the node together with its [`Ancestors`]: the containers
//! between the node and the document root, closest first.

use crate::path::Path;
use std::ptr;
use yamlnav_parse::{
    ArrayValue, BooleanValue, MapValue, NumberValue, Range, ResourceParse, StringValue, Value,
};

/// A container on the way from a node to the document root.
#[derive(Debug, Clone, Copy)]
pub enum Ancestor<'a> {
    /// The node is the value of `key` in `map`
    Map {
        map: &'a MapValue,
        key: &'a str,
        key_range: Range,
    },
    /// The node is element `index` of `array`
    Array { array: &'a ArrayValue, index: usize },
}

/// The ancestor chain of a visited node, closest first.
#[derive(Debug, Clone, Copy)]
pub struct Ancestors<'a, 's> {
    /// Stored root first, as the walk pushes them
    chain: &'s [Ancestor<'a>],
}

impl<'a, 's> Ancestors<'a, 's> {
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The ancestor `level` steps up: 0 is the immediate container.
    pub fn get(&self, level: usize) -> Option<&'s Ancestor<'a>> {
        let idx = self.chain.len().checked_sub(level + 1)?;
        self.chain.get(idx)
    }

    /// The immediate container, or None for the document root.
    pub fn parent(&self) -> Option<&'s Ancestor<'a>> {
        self.get(0)
    }

    /// Closest first.
    pub fn iter(&self) -> impl Iterator<Item = &'s Ancestor<'a>> {
        self.chain.iter().rev()
    }

    /// The path from the document root to the visited node.
    pub fn path(&self) -> Path {
        let mut path = Path::new();
        for ancestor in self.chain {
            match ancestor {
                Ancestor::Map { key, .. } => path.push_key(*key),
                Ancestor::Array { index, .. } => path.push_index(*index),
            }
        }
        path
    }
}

/// A visited node and its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct Parented<'a, 's, T> {
    pub value: &'a T,
    pub ancestors: Ancestors<'a, 's>,
}

/// Callbacks for [`walk`]. Every method defaults to doing nothing.
///
/// `on_node` is called for every node, followed by the method for the
/// node's type. Missing values only get `on_node`.
pub trait ResourceWalker<'a> {
    fn on_node(&mut self, _node: &Parented<'a, '_, Value>) {}

    fn on_string(&mut self, _node: &Parented<'a, '_, StringValue>) {}

    fn on_number(&mut self, _node: &Parented<'a, '_, NumberValue>) {}

    fn on_boolean(&mut self, _node: &Parented<'a, '_, BooleanValue>) {}

    fn on_array(&mut self, _node: &Parented<'a, '_, ArrayValue>) {}

    fn on_map(&mut self, _node: &Parented<'a, '_, MapValue>) {}
}

/// Visit every node of `resource`, depth-first and pre-order, starting at
/// the root map.
pub fn walk<'a, W: ResourceWalker<'a>>(resource: &'a ResourceParse, walker: &mut W) {
    Walk::new(walker).visit(resource.as_value());
}

/// Visit only the subtree rooted at `start`, which is identified by
/// reference (for example a node returned by
/// [`parse_node`](crate::TraversalEntry::parse_node)). Ancestors are still
/// reported up to the document root.
///
/// Returns false, without visiting anything, if `start` is not part of
/// `resource`.
pub fn walk_from<'a, W: ResourceWalker<'a>>(
    resource: &'a ResourceParse,
    start: &'a Value,
    walker: &mut W,
) -> bool {
    let found = Walk::new(walker).find(resource.as_value(), start);
    if !found {
        tracing::trace!("walk start node is not part of the resource");
    }
    found
}

struct Walk<'a, 'w, W> {
    walker: &'w mut W,
    stack: Vec<Ancestor<'a>>,
}

impl<'a, 'w, W: ResourceWalker<'a>> Walk<'a, 'w, W> {
    fn new(walker: &'w mut W) -> Self {
        Walk {
            walker,
            stack: Vec::new(),
        }
    }

    fn visit(&mut self, value: &'a Value) {
        let ancestors = Ancestors { chain: &self.stack };
        self.walker.on_node(&Parented { value, ancestors });

        match value {
            Value::String(s) => self.walker.on_string(&Parented { value: s, ancestors }),
            Value::Number(n) => self.walker.on_number(&Parented { value: n, ancestors }),
            Value::Boolean(b) => self.walker.on_boolean(&Parented { value: b, ancestors }),
            Value::Missing(_) => {}
            Value::Array(array) => {
                self.walker.on_array(&Parented {
                    value: array,
                    ancestors,
                });
                for (index, item) in array.items.iter().enumerate() {
                    self.stack.push(Ancestor::Array { array, index });
                    self.visit(item);
                    self.stack.pop();
                }
            }
            Value::Map(map) => {
                self.walker.on_map(&Parented {
                    value: map,
                    ancestors,
                });
                for (key, entry) in &map.entries {
                    self.stack.push(Ancestor::Map {
                        map,
                        key,
                        key_range: entry.key_range,
                    });
                    self.visit(&entry.value);
                    self.stack.pop();
                }
            }
        }
    }

    /// Search for `target` below `value`, keeping the ancestor stack in
    /// step, and walk it once found.
    fn find(&mut self, value: &'a Value, target: &'a Value) -> bool {
        if ptr::eq(value, target) {
            tracing::trace!(depth = self.stack.len(), "found walk start node");
            self.visit(value);
            return true;
        }

        match value {
            Value::Array(array) => {
                for (index, item) in array.items.iter().enumerate() {
                    self.stack.push(Ancestor::Array { array, index });
                    let found = self.find(item, target);
                    self.stack.pop();
                    if found {
                        return true;
                    }
                }
                false
            }
            Value::Map(map) => {
                for (key, entry) in &map.entries {
                    self.stack.push(Ancestor::Map {
                        map,
                        key,
                        key_range: entry.key_range,
                    });
                    let found = self.find(&entry.value, target);
                    self.stack.pop();
                    if found {
                        return true;
                    }
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlnav_parse::parse_yaml;

    #[derive(Default)]
    struct Paths(Vec<String>);

    impl<'a> ResourceWalker<'a> for Paths {
        fn on_node(&mut self, node: &Parented<'a, '_, Value>) {
            self.0.push(node.ancestors.path().to_string());
        }
    }

    #[test]
    fn test_visits_in_document_order() {
        let resource = parse_yaml("b: 1\na:\n- x\n- y: z").unwrap().remove(0);
        let mut paths = Paths::default();
        walk(&resource, &mut paths);
        assert_eq!(paths.0, vec!["", "b", "a", "a[0]", "a[1]", "a[1].y"]);
    }

    #[test]
    fn test_missing_values_only_get_on_node() {
        struct Counter {
            nodes: usize,
            strings: usize,
        }
        impl<'a> ResourceWalker<'a> for Counter {
            fn on_node(&mut self, _node: &Parented<'a, '_, Value>) {
                self.nodes += 1;
            }
            fn on_string(&mut self, _node: &Parented<'a, '_, StringValue>) {
                self.strings += 1;
            }
        }

        let resource = parse_yaml("naughty:\nnice: x").unwrap().remove(0);
        let mut counter = Counter {
            nodes: 0,
            strings: 0,
        };
        walk(&resource, &mut counter);
        assert_eq!(counter.nodes, 3);
        assert_eq!(counter.strings, 1);
    }

    #[test]
    fn test_walk_from_unrelated_node() {
        let resource = parse_yaml("a: 1").unwrap().remove(0);
        let other = parse_yaml("a: 1").unwrap().remove(0);
        let mut paths = Paths::default();
        assert!(!walk_from(&resource, other.as_value(), &mut paths));
        assert!(paths.0.is_empty());
    }
}
