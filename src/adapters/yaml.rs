// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document parser.

use crate::domain::{ConfigError, ConfigMap, ConfigValue, Result};
use crate::ports::ConfigParser;

/// YAML parser implementation.
///
/// The document must be a mapping at the top level. Nested values keep their
/// native shape.
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::YamlParser;
/// use cfgchain::domain::ConfigValue;
/// use cfgchain::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let map = parser.parse("---\nAPP_VERBOSITY: 'critical'\nport: 5432\n").unwrap();
/// assert_eq!(map.get("APP_VERBOSITY"), Some(&ConfigValue::from("critical")));
/// assert_eq!(map.get("port"), Some(&ConfigValue::Integer(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn convert(value: serde_yaml::Value) -> Result<ConfigValue> {
        Ok(match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ConfigValue::Integer(i),
                (None, Some(f)) => ConfigValue::Float(f),
                (None, None) => ConfigValue::String(n.to_string()),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(items) => ConfigValue::Sequence(
                items
                    .into_iter()
                    .map(Self::convert)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_yaml::Value::Mapping(map) => ConfigValue::Mapping(Self::convert_mapping(map)?),
            serde_yaml::Value::Tagged(tagged) => Self::convert(tagged.value)?,
        })
    }

    fn convert_mapping(map: serde_yaml::Mapping) -> Result<ConfigMap> {
        map.into_iter()
            .map(|(k, v)| Ok((Self::key_text(k)?, Self::convert(v)?)))
            .collect()
    }

    // Scalar keys are stringified; `1: x` is reachable as key "1".
    fn key_text(key: serde_yaml::Value) -> Result<String> {
        match key {
            serde_yaml::Value::String(s) => Ok(s),
            serde_yaml::Value::Number(n) => Ok(n.to_string()),
            serde_yaml::Value::Bool(b) => Ok(b.to_string()),
            serde_yaml::Value::Null => Ok("null".to_string()),
            serde_yaml::Value::Tagged(tagged) => Self::key_text(tagged.value),
            other => Err(ConfigError::ParseError {
                message: format!("Unsupported YAML mapping key: {:?}", other),
                source: None,
            }),
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigMap> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            serde_yaml::Value::Mapping(map) => Self::convert_mapping(map),
            other => Err(ConfigError::ParseError {
                message: format!(
                    "YAML document must be a mapping at the top level, found {}",
                    yaml_kind(&other)
                ),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "an empty document",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
