//! Config file formats.

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// File extensions probed during config discovery, in order.
pub const SUPPORTED_EXTS: &[&str] = &["json", "toml", "yaml", "yml"];

/// A supported config file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Looks up a format by file extension, case-insensitively.
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Parses config text into a table with lower-cased keys.
    ///
    /// An empty document yields an empty table. Any other top-level value
    /// than a table is an error.
    pub fn parse(self, text: &str) -> Result<Map<String, Value>, ConfigError> {
        let value: Value = match self {
            _ if text.trim().is_empty() => Value::Null,
            Self::Json => {
                serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            Self::Toml => toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Self::Yaml => {
                serde_yaml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
        };
        match lowercase_keys(value) {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(ConfigError::Parse(format!(
                "expected a table at the top level, found {}",
                kind_of(&other)
            ))),
        }
    }
}

/// Lower-cases every key of every nested table.
pub(crate) fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), lowercase_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_ext() {
        assert_eq!(ConfigFormat::from_ext("YML"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_ext("toml"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_ext("ini"), None);
    }

    #[test]
    fn test_formats_agree() {
        let json = ConfigFormat::Json
            .parse(r#"{"Server": {"Port": 8080, "hosts": ["a", "b"]}}"#)
            .unwrap();
        let toml = ConfigFormat::Toml
            .parse("[Server]\nPort = 8080\nhosts = [\"a\", \"b\"]\n")
            .unwrap();
        let yaml = ConfigFormat::Yaml
            .parse("Server:\n  Port: 8080\n  hosts:\n    - a\n    - b\n")
            .unwrap();

        let expected = json!({"server": {"port": 8080, "hosts": ["a", "b"]}});
        assert_eq!(Value::Object(json), expected);
        assert_eq!(Value::Object(toml), expected);
        assert_eq!(Value::Object(yaml), expected);
    }

    #[test]
    fn test_empty_documents() {
        assert!(ConfigFormat::Json.parse("  ").unwrap().is_empty());
        assert!(ConfigFormat::Yaml.parse("").unwrap().is_empty());
        assert!(ConfigFormat::Toml.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_non_table_is_rejected() {
        let err = ConfigFormat::Json.parse("[1, 2]").unwrap_err();
        assert_eq!(
            err.to_string(),
            "While parsing config: expected a table at the top level, found an array"
        );
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let err = ConfigFormat::Toml.parse("key = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
