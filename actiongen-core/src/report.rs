//! Output documents - JSON file and plain summary.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{ActiongenError, ActiongenResult, IoResultExt};
use crate::resolve::ResolutionResult;
use crate::variants::EnumDescriptor;

/// The document consumed by action generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDocument {
    /// Variants of the root enum
    #[serde(rename = "Actions")]
    pub actions: EnumDescriptor,
    /// Every dependency enum and its variants
    #[serde(rename = "Dependencies")]
    pub dependencies: IndexMap<String, EnumDescriptor>,
}

impl From<ResolutionResult> for ActionDocument {
    fn from(result: ResolutionResult) -> Self {
        Self {
            actions: result.actions,
            dependencies: result.dependencies,
        }
    }
}

impl From<&ResolutionResult> for ActionDocument {
    fn from(result: &ResolutionResult) -> Self {
        Self {
            actions: result.actions.clone(),
            dependencies: result.dependencies.clone(),
        }
    }
}

/// Serialize `value` as pretty JSON indented by `indent` spaces.
///
/// The output ends with a newline so files diff cleanly.
pub fn to_json<T: Serialize + ?Sized>(value: &T, indent: usize) -> ActiongenResult<String> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::with_capacity(1024);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    String::from_utf8(buf).map_err(|e| ActiongenError::serialize(e.to_string()))
}

/// Write `doc` to `path` as JSON.
pub fn write_document(path: &Path, doc: &ActionDocument, indent: usize) -> ActiongenResult<()> {
    let json = to_json(doc, indent)?;
    fs::write(path, json).with_path(path)
}

/// One-line summary of a resolution, for humans.
pub fn summary_line(result: &ResolutionResult) -> String {
    let variant_count: usize = result.dependencies.values().map(Vec::len).sum();
    format!(
        "{}: {} actions, {} dependencies ({} variants)",
        result.root,
        result.actions.len(),
        result.dependencies.len(),
        variant_count
    )
}

/// Prints one summary line per result to stderr (stdout stays clean for JSON).
pub fn print_summary(results: &[ResolutionResult]) {
    for result in results {
        eprintln!("{}", summary_line(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::VariantDescriptor;

    fn sample() -> ResolutionResult {
        let mut dependencies = IndexMap::new();
        dependencies.insert("Dir".to_string(), vec![VariantDescriptor::unit("Up")]);
        ResolutionResult {
            root: "Action".to_string(),
            actions: vec![
                VariantDescriptor::unit("Quit"),
                VariantDescriptor::with_payload("Move", "Dir"),
            ],
            dependencies,
        }
    }

    #[test]
    fn test_document_field_names() {
        let doc = ActionDocument::from(&sample());
        let value = serde_json::to_value(&doc).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("Actions"));
        assert!(object.contains_key("Dependencies"));
    }

    #[test]
    fn test_to_json_indent_two() {
        let doc = ActionDocument::from(sample());
        let json = to_json(&doc, 2).unwrap();
        let expected = r#"{
  "Actions": [
    {
      "name": "Quit"
    },
    {
      "name": "Move",
      "type": "Dir"
    }
  ],
  "Dependencies": {
    "Dir": [
      {
        "name": "Up"
      }
    ]
  }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_indent_four() {
        let doc = ActionDocument::from(sample());
        let json = to_json(&doc, 4).unwrap();
        assert!(json.starts_with("{\n    \"Actions\": [\n        {"));
    }

    #[test]
    fn test_empty_dependencies_serialize_as_object() {
        let doc = ActionDocument {
            actions: vec![VariantDescriptor::unit("Quit")],
            dependencies: IndexMap::new(),
        };
        let json = to_json(&doc, 2).unwrap();
        assert!(json.contains("\"Dependencies\": {}"));
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&sample()),
            "Action: 2 actions, 1 dependencies (1 variants)"
        );
    }
}
