//! JSON presentation of extracted entries.

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::extract::ResolvedEntry;

/// How extracted entries are shaped in JSON output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Ordered list of `{ name: value }` objects, duplicates kept
    #[default]
    Entries,

    /// One object keyed by tag name; the last occurrence wins
    Names,

    /// One object keyed by `<fq ifd path>/<name>`; the last occurrence wins
    Paths,

    /// Ordered list of complete entries with types and typed values
    Full,
}

/// Render `entries` as JSON in the requested shape.
pub fn render_entries(entries: &[ResolvedEntry], format: OutputFormat) -> Value {
    match format {
        OutputFormat::Entries => entries
            .iter()
            .map(|e| {
                let mut object = Map::new();
                object.insert(e.tag_name.clone(), Value::String(e.value_string.clone()));
                Value::Object(object)
            })
            .collect(),
        OutputFormat::Names => {
            let mut map = Map::new();
            for e in entries {
                map.insert(e.tag_name.clone(), Value::String(e.value_string.clone()));
            }
            Value::Object(map)
        }
        OutputFormat::Paths => {
            let mut map = Map::new();
            for e in entries {
                map.insert(
                    format!("{}/{}", e.fq_ifd_path, e.tag_name),
                    Value::String(e.value_string.clone()),
                );
            }
            Value::Object(map)
        }
        OutputFormat::Full => entries.iter().map(|e| json!(e)).collect(),
    }
}
