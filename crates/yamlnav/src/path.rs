//! Path expressions for navigating documents by name.
//!
//! A path is a sequence of map keys and array indices written as
//! `spec.containers[0].image`. Keys that contain `.` or brackets are
//! written quoted inside brackets: `metadata.labels["app.kubernetes.io/name"]`.
//!
//! ```rust
//! use yamlnav::{Path, TraversalEntry, Traversal};
//! use yamlnav_parse::parse_yaml;
//!
//! let docs = parse_yaml("spec:\n  containers:\n  - image: nginx").unwrap();
//! let path: Path = "spec.containers[0].image".parse().unwrap();
//! let image = Traversal::new(&docs[0]).at(&path);
//! assert_eq!(image.as_string().value(), Ok("nginx"));
//! ```

use crate::error::PathError;
use std::fmt;
use std::str::FromStr;

/// One owned step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A parsed path expression. The empty path denotes the entry it is
/// applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    /// Builder form of [`push_key`](Self::push_key).
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.push_key(key);
        self
    }

    /// Builder form of [`push_index`](Self::push_index).
    pub fn index(mut self, index: usize) -> Self {
        self.push_index(index);
        self
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Path {
            segments: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;

        if chars.is_empty() {
            return Ok(Path::new());
        }

        // True at the start and after '.', where a segment must follow
        let mut need_segment = true;
        loop {
            if need_segment {
                match chars.get(i) {
                    Some('[') if i == 0 => {
                        let (segment, next) = parse_bracket(&chars, i)?;
                        segments.push(segment);
                        i = next;
                    }
                    None | Some('.') | Some('[') => {
                        return Err(PathError::EmptySegment { offset: i });
                    }
                    Some(_) => {
                        let len = chars[i..]
                            .iter()
                            .take_while(|c| !matches!(c, '.' | '['))
                            .count();
                        segments.push(PathSegment::Key(chars[i..i + len].iter().collect()));
                        i += len;
                    }
                }
                need_segment = false;
                continue;
            }

            match chars.get(i) {
                None => break,
                Some('.') => {
                    i += 1;
                    need_segment = true;
                }
                Some('[') => {
                    let (segment, next) = parse_bracket(&chars, i)?;
                    segments.push(segment);
                    i = next;
                }
                Some(&found) => return Err(PathError::UnexpectedChar { found, offset: i }),
            }
        }

        Ok(Path { segments })
    }
}

/// Parse `[n]`, `["key"]` or `['key']` starting at the `[` at `open`.
/// Returns the segment and the offset just past the closing bracket.
fn parse_bracket(chars: &[char], open: usize) -> Result<(PathSegment, usize), PathError> {
    let start = open + 1;

    if let Some(&quote) = chars.get(start).filter(|c| matches!(c, '"' | '\'')) {
        let mut key = String::new();
        let mut i = start + 1;
        loop {
            match chars.get(i) {
                None => return Err(PathError::UnterminatedQuote { offset: start }),
                Some('\\') if quote == '"' => {
                    let escaped = chars
                        .get(i + 1)
                        .ok_or(PathError::UnterminatedQuote { offset: start })?;
                    key.push(*escaped);
                    i += 2;
                }
                Some(&c) if c == quote => {
                    i += 1;
                    break;
                }
                Some(&c) => {
                    key.push(c);
                    i += 1;
                }
            }
        }
        if chars.get(i) != Some(&']') {
            return Err(PathError::UnterminatedBracket { offset: open });
        }
        return Ok((PathSegment::Key(key), i + 1));
    }

    let close = chars[start..]
        .iter()
        .position(|c| *c == ']')
        .map(|n| start + n)
        .ok_or(PathError::UnterminatedBracket { offset: open })?;
    let text: String = chars[start..close].iter().collect();
    let index = text
        .trim()
        .parse::<usize>()
        .map_err(|_| PathError::BadIndex {
            text: text.clone(),
            offset: start,
        })?;

    Ok((PathSegment::Index(index), close + 1))
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', '"', '\'', '\\'])
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if is_bare_key(key) => {
                    if n > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => {
                    f.write_str("[\"")?;
                    for c in key.chars() {
                        if matches!(c, '"' | '\\') {
                            f.write_str("\\")?;
                        }
                        write!(f, "{}", c)?;
                    }
                    f.write_str("\"]")?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Navigate a traversal entry with path syntax checked at compile time.
///
/// Identifiers are map keys, `[expr]` is an array index, and `."text"`
/// is a key that is not a valid identifier. Expands to chained
/// [`TraversalEntry::child`](crate::TraversalEntry::child) calls.
///
/// ```rust
/// use yamlnav::{nav, Kind, Traversal, TraversalEntry};
/// use yamlnav_parse::parse_yaml;
///
/// let docs = parse_yaml("metadata:\n  labels:\n    app.kubernetes.io/name: web").unwrap();
/// let doc = Traversal::new(&docs[0]);
/// let name = nav!(doc, metadata.labels."app.kubernetes.io/name");
/// assert_eq!(name.kind(), Kind::String);
/// assert_eq!(nav!(doc, metadata.missing[0]).kind(), Kind::NotPresent);
/// ```
#[macro_export]
macro_rules! nav {
    (@acc $e:expr ;) => { $e };
    (@acc $e:expr ; . $key:ident $($rest:tt)*) => {
        $crate::nav!(@acc $crate::TraversalEntry::child(&$e, stringify!($key)) ; $($rest)*)
    };
    (@acc $e:expr ; . $key:literal $($rest:tt)*) => {
        $crate::nav!(@acc $crate::TraversalEntry::child(&$e, $key) ; $($rest)*)
    };
    (@acc $e:expr ; [ $idx:expr ] $($rest:tt)*) => {
        $crate::nav!(@acc $crate::TraversalEntry::child(&$e, $crate::Segment::Index($idx)) ; $($rest)*)
    };
    ($e:expr, $key:ident $($rest:tt)*) => {
        $crate::nav!(@acc $crate::TraversalEntry::child(&$e, stringify!($key)) ; $($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Path {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_keys_and_indices() {
        let path = parse("spec.containers[0].image");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("spec".into()),
                PathSegment::Key("containers".into()),
                PathSegment::Index(0),
                PathSegment::Key("image".into()),
            ]
        );
        assert_eq!(parse("[2][3]"), Path::new().index(2).index(3));
        assert_eq!(parse("items.0"), Path::new().key("items").key("0"));
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_quoted_keys() {
        assert_eq!(
            parse(r#"metadata.labels["app.kubernetes.io/name"]"#),
            Path::new()
                .key("metadata")
                .key("labels")
                .key("app.kubernetes.io/name")
        );
        assert_eq!(parse(r#"a['b"c']"#), Path::new().key("a").key("b\"c"));
        assert_eq!(parse(r#"a["q\"x"]"#), Path::new().key("a").key("q\"x"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "a[0".parse::<Path>(),
            Err(PathError::UnterminatedBracket { offset: 1 })
        );
        assert_eq!(
            "a[x]".parse::<Path>(),
            Err(PathError::BadIndex {
                text: "x".into(),
                offset: 2
            })
        );
        assert_eq!(
            "a..b".parse::<Path>(),
            Err(PathError::EmptySegment { offset: 2 })
        );
        assert_eq!("a.".parse::<Path>(), Err(PathError::EmptySegment { offset: 2 }));
        assert_eq!(
            r#"a["b]"#.parse::<Path>(),
            Err(PathError::UnterminatedQuote { offset: 2 })
        );
        assert_eq!(
            "a[0]b".parse::<Path>(),
            Err(PathError::UnexpectedChar {
                found: 'b',
                offset: 4
            })
        );
    }

    #[test]
    fn test_display_round_trips() {
        for text in [
            "spec.containers[0].image",
            r#"metadata.labels["app.kubernetes.io/name"]"#,
            "[1].name",
            r#"a["with \"quote\""]"#,
        ] {
            let path = parse(text);
            assert_eq!(path.to_string(), text);
            assert_eq!(parse(&path.to_string()), path);
        }
    }
}
