//! Ordered dotted-key settings document.
//!
//! A flow configuration is a hierarchy of TOML tables. Downstream code
//! addresses settings by dotted namespace key (`vlsi.core.build_system`), so
//! the parsed tree is flattened into an ordered map from dotted key to value.
//! Arrays (including arrays of tables such as `vlsi.inputs.clocks`) are kept
//! intact as leaf values.

use std::collections::BTreeMap;

use toml::Value;

use super::error::FlowError;

/// An ordered mapping from dotted namespace keys to raw values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowDocument {
    settings: BTreeMap<String, Value>,
}

impl FlowDocument {
    /// Parse a TOML document and flatten it into dotted keys.
    pub fn from_str(text: &str) -> Result<Self, FlowError> {
        let table: toml::Table = toml::from_str(text)?;
        let mut settings = BTreeMap::new();
        flatten("", &table, &mut settings);
        Ok(Self { settings })
    }

    /// Parse a JSON document and flatten it into dotted keys.
    ///
    /// Files with a `.json` extension take this path, so a normalized JSON
    /// dump can be reloaded or layered like any other config file.
    pub fn from_json_str(text: &str) -> Result<Self, FlowError> {
        let root: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut table = toml::Table::new();
        for (name, value) in &root {
            table.insert(name.clone(), json_to_toml(name, value)?);
        }
        let mut settings = BTreeMap::new();
        flatten("", &table, &mut settings);
        Ok(Self { settings })
    }

    /// Look up the raw value at a dotted key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Overlay another document on top of this one.
    ///
    /// Keys present in `other` replace keys in `self`; arrays are replaced
    /// wholesale, not appended. Later configuration files therefore override
    /// earlier ones per setting.
    pub fn merge(&mut self, other: FlowDocument) {
        for (key, value) in other.settings {
            self.settings.insert(key, value);
        }
    }

    /// Number of settings in the document.
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Iterate over settings in key order.
    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.settings.iter()
    }
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, Value>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match value {
            Value::Table(inner) => flatten(&key, inner, out),
            other => {
                out.insert(key, other.clone());
            }
        }
    }
}

/// Convert a JSON value into the TOML value model. TOML has no null, so
/// nulls are rejected with the offending key path.
fn json_to_toml(key: &str, value: &serde_json::Value) -> Result<Value, FlowError> {
    use serde_json::Value as Json;

    match value {
        Json::Null => Err(FlowError::invalid(key, "null is not a supported setting value")),
        Json::Bool(b) => Ok(Value::Boolean(*b)),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Err(FlowError::invalid(key, format!("number {} is out of range", n)))
            }
        }
        Json::String(s) => Ok(Value::String(s.clone())),
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| json_to_toml(&format!("{}[{}]", key, i), item))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Json::Object(map) => {
            let mut table = toml::Table::new();
            for (name, item) in map {
                table.insert(name.clone(), json_to_toml(&format!("{}.{}", key, name), item)?);
            }
            Ok(Value::Table(table))
        }
    }
}

/// Human-readable name of a raw value's type, for type mismatch errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::Boolean(_) => "boolean",
        Value::Datetime(_) => "datetime",
        Value::Array(_) => "array",
        Value::Table(_) => "table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_tables() {
        let doc = FlowDocument::from_str(
            r#"
[vlsi.core]
build_system = "make"
technology = "asap7"
"#,
        )
        .unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(
            doc.get("vlsi.core.build_system"),
            Some(&Value::String("make".to_string()))
        );
        assert_eq!(
            doc.get("vlsi.core.technology"),
            Some(&Value::String("asap7".to_string()))
        );
    }

    #[test]
    fn test_arrays_of_tables_are_leaves() {
        let doc = FlowDocument::from_str(
            r#"
[[vlsi.inputs.clocks]]
name = "clock"
period = "2ns"
"#,
        )
        .unwrap();

        assert_eq!(doc.len(), 1);
        let clocks = doc.get("vlsi.inputs.clocks").unwrap();
        assert!(matches!(clocks, Value::Array(a) if a.len() == 1));
    }

    #[test]
    fn test_merge_overrides_per_key() {
        let mut base = FlowDocument::from_str(
            r#"
[vlsi.core]
build_system = "none"
technology = "asap7"
"#,
        )
        .unwrap();
        let overlay = FlowDocument::from_str(
            r#"
[vlsi.core]
build_system = "make"
"#,
        )
        .unwrap();

        base.merge(overlay);
        assert_eq!(
            base.get("vlsi.core.build_system"),
            Some(&Value::String("make".to_string()))
        );
        // Untouched keys survive the merge
        assert_eq!(
            base.get("vlsi.core.technology"),
            Some(&Value::String("asap7".to_string()))
        );
    }

    #[test]
    fn test_merge_replaces_arrays_wholesale() {
        let mut base = FlowDocument::from_str(r#"layers = ["met1", "met2"]"#).unwrap();
        let overlay = FlowDocument::from_str(r#"layers = ["met4"]"#).unwrap();
        base.merge(overlay);

        let layers = base.get("layers").unwrap();
        assert!(matches!(layers, Value::Array(a) if a.len() == 1));
    }

    #[test]
    fn test_json_document_flattens_like_toml() {
        let from_json = FlowDocument::from_json_str(
            r#"{"vlsi": {"core": {"build_system": "make", "technology": "asap7"}}}"#,
        )
        .unwrap();
        let from_toml = FlowDocument::from_str(
            r#"
[vlsi.core]
build_system = "make"
technology = "asap7"
"#,
        )
        .unwrap();

        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_json_arrays_of_objects_are_leaves() {
        let doc = FlowDocument::from_json_str(
            r#"{"vlsi": {"inputs": {"clocks": [{"name": "clock", "period": "2ns"}]}}}"#,
        )
        .unwrap();

        assert_eq!(doc.len(), 1);
        let clocks = doc.get("vlsi.inputs.clocks").unwrap();
        assert!(matches!(clocks, Value::Array(a) if a.len() == 1));
    }

    #[test]
    fn test_json_null_rejected_with_key_path() {
        let err = FlowDocument::from_json_str(r#"{"vlsi": {"core": {"technology": null}}}"#)
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidValue { ref key, .. }
            if key == "vlsi.core.technology"));
    }

    #[test]
    fn test_json_non_object_root_rejected() {
        assert!(matches!(
            FlowDocument::from_json_str("[1, 2]"),
            Err(FlowError::Json(_))
        ));
    }

    #[test]
    fn test_parse_error_reported() {
        assert!(matches!(
            FlowDocument::from_str("this is not toml ["),
            Err(FlowError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_key_absent() {
        let doc = FlowDocument::from_str("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.get("vlsi.core.build_system").is_none());
    }
}
