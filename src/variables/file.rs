//! Variable files passed with `--data`

use crate::constants::YAML_EXTENSIONS;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A flat key-value document loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableFile {
    pub path: PathBuf,
    pub values: IndexMap<String, Value>,
}

impl VariableFile {
    /// Reads a JSON or YAML (by extension) file whose top level is an object.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| Error::ReadError { path: path.to_path_buf(), source })?;
        Self::parse(path, &content)
    }

    pub fn parse<P: AsRef<Path>>(path: P, content: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let parse_error = |reason: String| Error::VariableFileParseError { path: path.clone(), reason };

        let value: Value = if is_yaml(&path) {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?
        } else {
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
        };

        let values = match value {
            Value::Object(map) => map.into_iter().collect(),
            other => return Err(parse_error(format!("expected an object, found {}", kind(&other)))),
        };

        log::debug!("Loaded variable file {}", path.display());
        Ok(Self { path, values })
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Short name of a JSON value's type for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_json_objects() {
        let file = VariableFile::parse("vars.json", r#"{"a": "x", "n": 2, "list": [1, 2]}"#).unwrap();
        assert_eq!(file.values["a"], json!("x"));
        assert_eq!(file.values["n"], json!(2));
        assert_eq!(file.values["list"], json!([1, 2]));
    }

    #[test]
    fn parses_yaml_by_extension() {
        let file = VariableFile::parse("vars.YML", "a: x\nenabled: true\n").unwrap();
        assert_eq!(file.values["a"], json!("x"));
        assert_eq!(file.values["enabled"], json!(true));
    }

    #[test]
    fn rejects_non_object_documents() {
        let err = VariableFile::parse("vars.json", "[1, 2]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to parse variable file 'vars.json': expected an object, found an array."
        );
    }

    #[test]
    fn malformed_json_names_the_file() {
        let err = VariableFile::parse("broken.json", "{").unwrap_err();
        match err {
            Error::VariableFileParseError { path, .. } => assert_eq!(path, PathBuf::from("broken.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn loads_from_disk() {
        let mut tmp = NamedTempFile::with_suffix(".json").unwrap();
        write!(tmp, r#"{{"KEY": "A"}}"#).unwrap();
        let file = VariableFile::load(tmp.path()).unwrap();
        assert_eq!(file.path, tmp.path());
        assert_eq!(file.values["KEY"], json!("A"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = VariableFile::load("/nonexistent/vars.json").unwrap_err();
        assert!(matches!(err, Error::ReadError { .. }));
    }
}
