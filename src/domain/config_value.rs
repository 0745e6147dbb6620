// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! Sources answer in whatever shape is natural to them: the environment and raw
//! files answer with text, YAML and JSON documents answer with native scalars,
//! lists and nested mappings, and argument records answer with whatever their
//! fields serialize to. `ConfigValue` carries all of those shapes so one chain
//! can mix sources freely, while the conversion helpers give callers typed
//! access at the point of use.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A mapping from top-level field names to values.
///
/// This is the shape every structured document (YAML or JSON) must parse to,
/// and the backing store of a [`MappingSource`](crate::adapters::MappingSource).
pub type ConfigMap = BTreeMap<String, ConfigValue>;

/// A resolved configuration value.
///
/// A present-but-empty value (`String("")`, `Null`, `Bool(false)`,
/// `Integer(0)`) is still an answer. Absence is never encoded here; resolvers
/// report it as `Ok(None)`.
///
/// # Examples
///
/// ```
/// use cfgchain::domain::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_str(), Some("42"));
/// assert_eq!(value.as_i64("port").unwrap(), 42);
///
/// let value = ConfigValue::from(false);
/// assert_eq!(value.as_bool("dry_run").unwrap(), false);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An explicit null (YAML `~`, JSON `null`, an unset optional field).
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Text.
    String(String),
    /// An ordered list of values.
    Sequence(Vec<ConfigValue>),
    /// A nested mapping.
    Mapping(ConfigMap),
}

impl ConfigValue {
    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the text of a [`ConfigValue::String`], `None` for any other shape.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the textual form of the value.
    ///
    /// Strings come back verbatim, scalars use their usual rendering, and
    /// sequences and mappings are rendered as compact JSON.
    pub fn as_string(&self) -> String {
        self.to_string()
    }

    /// Returns the entries of a [`ConfigValue::Mapping`].
    pub fn as_mapping(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the items of a [`ConfigValue::Sequence`].
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up a field of a mapping value.
    ///
    /// ```
    /// use cfgchain::domain::{ConfigMap, ConfigValue};
    ///
    /// let mut map = ConfigMap::new();
    /// map.insert("host".to_string(), ConfigValue::from("localhost"));
    /// let value = ConfigValue::Mapping(map);
    ///
    /// assert_eq!(value.get("host"), Some(&ConfigValue::from("localhost")));
    /// assert_eq!(value.get("port"), None);
    /// ```
    pub fn get(&self, field: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|map| map.get(field))
    }

    /// Converts the value to a boolean.
    ///
    /// Native booleans convert directly. Any other scalar is read through its
    /// textual form, recognizing (case-insensitively) `true`/`yes`/`1`/`on` and
    /// `false`/`no`/`0`/`off`.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        if let ConfigValue::Bool(b) = self {
            return Ok(*b);
        }
        let text = self.as_string();
        match text.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => text
                .parse::<bool>()
                .map_err(|e| ConfigError::from_parse_bool_error(key.to_string(), e)),
        }
    }

    /// Converts the value to an `i64`.
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        match self {
            ConfigValue::Integer(i) => Ok(*i),
            _ => self
                .as_string()
                .parse::<i64>()
                .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e)),
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.as_string()
            .parse::<i32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.as_string()
            .parse::<u32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.as_string()
            .parse::<u64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `f64`.
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        match self {
            ConfigValue::Float(f) => Ok(*f),
            ConfigValue::Integer(i) => Ok(*i as f64),
            _ => self
                .as_string()
                .parse::<f64>()
                .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e)),
        }
    }

    /// Parses the textual form of the value into any `FromStr` type.
    ///
    /// ```
    /// use cfgchain::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("bind").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.as_string()
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<u32> for ConfigValue {
    fn from(i: u32) -> Self {
        ConfigValue::Integer(i64::from(i))
    }
}

impl From<u64> for ConfigValue {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(i) => ConfigValue::Integer(i),
            Err(_) => ConfigValue::Float(i as f64),
        }
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Mapping(map)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => n
                    .as_f64()
                    .map(ConfigValue::Float)
                    .unwrap_or_else(|| ConfigValue::String(n.to_string())),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => f.write_str("null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Sequence(_) | ConfigValue::Mapping(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}
