//! Scalar typing and scalar extents.
//!
//! The event parser reports only the start marker of each scalar, so the end
//! of the scalar is recovered from the source text according to its style.
//! Block scalars are reported at their first content line; their range is
//! widened back to the `|` or `>` indicator.

use once_cell::sync::Lazy;
use regex::Regex;
use yaml_rust2::parser::Tag;
use yaml_rust2::scanner::TScalarStyle;
use yamlnav_source_map::{Range, SourceText};

/// Handle of the YAML core schema tags (`!!str`, `!!int`, ...).
const CORE_TAG_HANDLE: &str = "tag:yaml.org,2002:";

static INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());
static OCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0o[0-7]+$").unwrap());
static HEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$").unwrap()
});
static INF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?\.(inf|Inf|INF)$").unwrap());
static NAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.(nan|NaN|NAN)$").unwrap());

/// Trailing part of a block scalar header line: indicator, chomping and
/// indentation flags, then an optional comment.
static BLOCK_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[|>][-+0-9]*\s*(?:#.*)?$").unwrap());

/// Scalar payload after type resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Typed {
    String(String),
    Number(f64),
    Boolean(bool),
}

/// Resolve the type of a scalar using the YAML 1.2 core schema.
///
/// A core tag (`!!str`, `!!int`, `!!float`, `!!bool`, `!!null`) decides the
/// type when the text is valid for it. Otherwise only plain scalars are
/// typed; quoted and block scalars are always strings. Explicit nulls stay
/// strings so their raw text is preserved.
pub(crate) fn resolve(value: &str, style: TScalarStyle, tag: Option<&Tag>) -> Typed {
    let core_tag = tag
        .filter(|t| t.handle == CORE_TAG_HANDLE)
        .map(|t| t.suffix.as_str());

    match core_tag {
        Some("str" | "null") => return Typed::String(value.to_string()),
        Some("bool") => {
            if let Some(b) = parse_bool(value) {
                return Typed::Boolean(b);
            }
        }
        Some("int" | "float") => {
            if let Some(n) = parse_number(value) {
                return Typed::Number(n);
            }
        }
        _ => {}
    }

    if core_tag.is_some() || style != TScalarStyle::Plain {
        return Typed::String(value.to_string());
    }

    if let Some(b) = parse_bool(value) {
        return Typed::Boolean(b);
    }

    if let Some(n) = parse_number(value) {
        return Typed::Number(n);
    }

    Typed::String(value.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn parse_number(value: &str) -> Option<f64> {
    if INT_RE.is_match(value) || FLOAT_RE.is_match(value) {
        return value.parse::<f64>().ok();
    }
    if OCT_RE.is_match(value) {
        return i64::from_str_radix(&value[2..], 8).ok().map(|i| i as f64);
    }
    if HEX_RE.is_match(value) {
        return i64::from_str_radix(&value[2..], 16).ok().map(|i| i as f64);
    }
    if INF_RE.is_match(value) {
        return Some(if value.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if NAN_RE.is_match(value) {
        return Some(f64::NAN);
    }
    None
}

/// Source range of the scalar whose token the parser reported at `marker`.
pub(crate) fn scalar_range(
    source: &SourceText<'_>,
    marker: usize,
    style: TScalarStyle,
    value: &str,
) -> Range {
    let (start, end) = match style {
        TScalarStyle::SingleQuoted => (marker, single_quoted_end(source, marker)),
        TScalarStyle::DoubleQuoted => (marker, double_quoted_end(source, marker)),
        TScalarStyle::Plain => (marker, plain_end(source, marker, value)),
        // literal and folded
        _ => {
            let start = block_indicator(source, marker);
            (start, block_end(source, start))
        }
    };
    Range::new(start, end.max(start))
}

/// Offset of the `|` or `>` indicator of a block scalar.
///
/// The marker sits on the first content line, or on the indicator itself
/// when the scalar has no content. Content lines hold nothing before the
/// marker but indentation, so the header is the closest non-blank line
/// above.
fn block_indicator(source: &SourceText<'_>, marker: usize) -> usize {
    let line_start = source.line_start(marker);
    let before = source
        .slice(Range::new(line_start, marker))
        .unwrap_or_default();
    if !before.trim().is_empty() || line_start == 0 {
        return marker;
    }

    // Offset of the newline ending the line above
    let mut newline = line_start - 1;
    loop {
        let start = source.line_start(newline);
        let line = source.slice(Range::new(start, newline)).unwrap_or_default();
        if !line.trim().is_empty() {
            return BLOCK_HEADER_RE
                .find(line)
                .map_or(marker, |m| start + line[..m.start()].chars().count());
        }
        if start == 0 {
            return marker;
        }
        newline = start - 1;
    }
}

fn single_quoted_end(source: &SourceText<'_>, start: usize) -> usize {
    let chars = source.chars_from(start);
    let mut i = 1;
    while i < chars.len() {
        if chars[i] == '\'' {
            // '' is an escaped quote
            if chars.get(i + 1) == Some(&'\'') {
                i += 2;
                continue;
            }
            return start + i + 1;
        }
        i += 1;
    }
    source.char_len()
}

fn double_quoted_end(source: &SourceText<'_>, start: usize) -> usize {
    let chars = source.chars_from(start);
    let mut i = 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return start + i + 1,
            _ => i += 1,
        }
    }
    source.char_len()
}

/// A plain scalar has no leading or trailing whitespace, but line folding
/// can turn a line break plus indentation into a single space. Match the
/// non-whitespace characters of the value against the source and end after
/// the last of them.
fn plain_end(source: &SourceText<'_>, start: usize, value: &str) -> usize {
    let chars = source.chars_from(start);
    let mut pos = 0;
    let mut end = 0;

    for vc in value.chars().filter(|c| !c.is_whitespace()) {
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if chars.get(pos) != Some(&vc) {
            return start + value.chars().count();
        }
        pos += 1;
        end = pos;
    }

    start + end
}

/// A block scalar (`|` or `>`) runs from its indicator to the last
/// non-blank line indented at least as deeply as its first content line.
fn block_end(source: &SourceText<'_>, start: usize) -> usize {
    let header_end = source.line_end(start);
    let parent_indent = indent_of_line(source, start);
    let total = source.char_len();
    let mut end = header_end;
    let mut content_indent: Option<usize> = None;
    let mut line_start = header_end + 1;

    while line_start < total {
        let line_end = source.line_end(line_start);
        let line = source.chars_from(line_start);
        let line_len = line_end - line_start;
        let indent = line[..line_len].iter().take_while(|c| **c == ' ').count();
        let blank = line[..line_len].iter().all(|c| c.is_whitespace());

        if !blank {
            let required = *content_indent.get_or_insert(indent);
            // Content must be indented past the line holding the indicator
            if indent < required || indent <= parent_indent {
                break;
            }
            end = line_end;
        }

        line_start = line_end + 1;
    }

    end
}

fn indent_of_line(source: &SourceText<'_>, offset: usize) -> usize {
    let line_start = source.line_start(offset);
    let line = source.chars_from(line_start);
    let leading = line.iter().take_while(|c| **c == ' ').count();
    // Sequence entries ("- |") indent their content relative to the dash
    let rest = &line[leading..];
    if rest.first() == Some(&'-') && offset > line_start + leading {
        leading + 1
    } else {
        leading
    }
}
