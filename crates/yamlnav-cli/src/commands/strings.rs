//! Strings command implementation

use super::{load, FormatArg};
use anyhow::Result;
use std::path::Path as FilePath;
use yamlnav::{walk, Parented, Path, ResourceWalker};
use yamlnav_parse::{ResourceParse, SourceText, StringValue};

pub fn execute(file: &FilePath, format: Option<FormatArg>) -> Result<()> {
    let loaded = load(file, format)?;
    for line in list_strings(&loaded.content, &loaded.documents)? {
        println!("{}", line);
    }
    Ok(())
}

#[derive(Default)]
struct StringCollector<'a> {
    strings: Vec<(Path, &'a StringValue)>,
}

impl<'a> ResourceWalker<'a> for StringCollector<'a> {
    fn on_string(&mut self, node: &Parented<'a, '_, StringValue>) {
        self.strings.push((node.ancestors.path(), node.value));
    }
}

/// One line per string value: document index, path, `row:column` and the
/// value as a JSON string.
pub fn list_strings(content: &str, documents: &[ResourceParse]) -> Result<Vec<String>> {
    let source = SourceText::new(content);
    let mut lines = Vec::new();

    for (index, document) in documents.iter().enumerate() {
        let mut collector = StringCollector::default();
        walk(document, &mut collector);

        for (path, value) in collector.strings {
            let location = source
                .location(value.range.start)
                .map(|loc| loc.to_string())
                .unwrap_or_default();
            lines.push(format!(
                "{}\t{}\t{}\t{}",
                index,
                path,
                location,
                serde_json::to_string(&value.value)?
            ));
        }
    }

    Ok(lines)
}
