// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document parser and the structured file resolver node built on it.

use crate::adapters::FileSource;
use crate::domain::{ConfigError, ConfigKey, ConfigMap, ConfigValue, Result};
use crate::ports::{ConfigParser, MountHook, Resolver};
use std::path::{Path, PathBuf};

/// JSON parser implementation.
///
/// The document must be an object at the top level.
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<ConfigMap> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;

        match value {
            serde_json::Value::Object(map) => Ok(map
                .into_iter()
                .map(|(k, v)| (k, ConfigValue::from(v)))
                .collect()),
            other => Err(ConfigError::ParseError {
                message: format!(
                    "JSON document must be an object at the top level, found {}",
                    json_kind(&other)
                ),
                source: None,
            }),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Resolver node that answers with a top-level field of a JSON file.
///
/// The file is obtained exactly the way a [`FileSource`] obtains it, mount
/// hook included, and parsed on every request. A file that cannot be parsed
/// is an error. A missing file, a zero-length file or a document without the key
/// delegates.
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::{DefaultSource, JsonFileSource};
/// use cfgchain::domain::ConfigValue;
/// use cfgchain::ports::Resolver;
/// use std::io::Write;
///
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// write!(file, r#"{{"KEY": "value"}}"#).unwrap();
///
/// let source = JsonFileSource::new(file.path())
///     .with_next(Box::new(DefaultSource::new("fallback")));
/// assert_eq!(source.resolve("KEY").unwrap(), Some(ConfigValue::from("value")));
/// assert_eq!(source.resolve("OTHER").unwrap(), Some(ConfigValue::from("fallback")));
/// ```
pub struct JsonFileSource {
    file: FileSource,
    parser: JsonParser,
    next: Option<Box<dyn Resolver>>,
}

impl JsonFileSource {
    /// Creates a source reading the JSON document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: FileSource::new(path),
            parser: JsonParser::new(),
            next: None,
        }
    }

    /// Installs a hook that is run when the file is missing.
    pub fn with_mount_hook(self, hook: impl MountHook + 'static) -> Self {
        self.with_boxed_mount_hook(Box::new(hook))
    }

    /// Like [`with_mount_hook`](Self::with_mount_hook) for an already boxed hook.
    pub fn with_boxed_mount_hook(mut self, hook: Box<dyn MountHook>) -> Self {
        self.file = self.file.with_boxed_mount_hook(hook);
        self
    }

    /// Installs the successor consulted when the file or the key is missing.
    pub fn with_next(mut self, next: Box<dyn Resolver>) -> Self {
        self.next = Some(next);
        self
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn load(&self) -> Result<Option<ConfigMap>> {
        let contents = match self.file.read_contents()? {
            Some(contents) if !contents.is_empty() => contents,
            _ => return Ok(None),
        };

        self.parser
            .parse(&contents)
            .map(Some)
            .map_err(|e| match e {
                ConfigError::ParseError { message, source } => ConfigError::ParseError {
                    message: format!("{}: {}", self.path().display(), message),
                    source,
                },
                other => other,
            })
    }
}

impl Resolver for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        if let Some(mut document) = self.load()? {
            if let Some(value) = document.remove(key.as_str()) {
                tracing::debug!("'json-file' answered '{}' from '{}'", key, self.path().display());
                return Ok(Some(value));
            }
        }
        self.get_from_next_handler(key)
    }

    fn next_handler(&self) -> Option<&dyn Resolver> {
        self.next.as_deref()
    }
}

impl_link!(JsonFileSource);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DefaultSource;
    use std::fs;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::{NamedTempFile, TempDir};

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    fn fallback() -> Box<dyn Resolver> {
        Box::new(DefaultSource::new("fallback"))
    }

    #[test]
    fn test_json_parser_object() {
        let map = JsonParser::new()
            .parse(r#"{"KEY": "value", "n": 3, "nested": {"a": [1, 2]}}"#)
            .unwrap();
        assert_eq!(map.get("KEY"), Some(&ConfigValue::from("value")));
        assert_eq!(map.get("n"), Some(&ConfigValue::Integer(3)));
        assert!(map.get("nested").unwrap().get("a").is_some());
    }

    #[test]
    fn test_json_parser_rejects_non_object() {
        let err = JsonParser::new().parse("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(JsonParser::new().parse("\"text\"").is_err());
    }

    #[test]
    fn test_json_parser_invalid() {
        let result = JsonParser::new().parse("{not json");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
        assert_eq!(JsonParser::default().supported_extensions(), &["json"]);
    }

    #[test]
    fn test_json_file_answers_top_level_key() {
        let file = json_file(r#"{"KEY": "value"}"#);
        let source = JsonFileSource::new(file.path());
        assert_eq!(source.name(), "json-file");
        assert_eq!(source.resolve("KEY").unwrap(), Some(ConfigValue::from("value")));
    }

    #[test]
    fn test_json_file_falsy_values_are_answers() {
        let file = json_file(r#"{"empty": "", "zero": 0, "off": false, "none": null}"#);
        let source = JsonFileSource::new(file.path()).with_next(fallback());

        assert_eq!(source.resolve("empty").unwrap(), Some(ConfigValue::from("")));
        assert_eq!(source.resolve("zero").unwrap(), Some(ConfigValue::Integer(0)));
        assert_eq!(source.resolve("off").unwrap(), Some(ConfigValue::Bool(false)));
        assert_eq!(source.resolve("none").unwrap(), Some(ConfigValue::Null));
    }

    #[test]
    fn test_json_file_missing_key_delegates() {
        let file = json_file(r#"{"KEY": "value"}"#);
        let source = JsonFileSource::new(file.path()).with_next(fallback());
        assert_eq!(source.resolve("OTHER").unwrap(), Some(ConfigValue::from("fallback")));
    }

    #[test]
    fn test_json_file_does_not_look_into_nested_objects() {
        let file = json_file(r#"{"db": {"host": "localhost"}}"#);
        let source = JsonFileSource::new(file.path());
        assert_eq!(source.resolve("host").unwrap(), None);
        assert_eq!(source.resolve("db.host").unwrap(), None);
    }

    #[test]
    fn test_json_file_missing_file_delegates() {
        let dir = TempDir::new().unwrap();
        let source = JsonFileSource::new(dir.path().join("absent.json")).with_next(fallback());
        assert_eq!(source.resolve("KEY").unwrap(), Some(ConfigValue::from("fallback")));
    }

    #[test]
    fn test_json_file_empty_file_delegates() {
        let file = json_file("");
        let source = JsonFileSource::new(file.path()).with_next(fallback());
        assert_eq!(source.resolve("KEY").unwrap(), Some(ConfigValue::from("fallback")));
    }

    #[test]
    fn test_json_file_whitespace_only_is_fatal() {
        let file = json_file("  \n");
        let source = JsonFileSource::new(file.path()).with_next(fallback());
        assert!(matches!(
            source.resolve("KEY"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_json_file_malformed_is_fatal() {
        let file = json_file("{not json");
        let source = JsonFileSource::new(file.path()).with_next(fallback());

        let err = source.resolve("KEY").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_json_file_non_object_is_fatal() {
        let file = json_file("[\"KEY\"]");
        let source = JsonFileSource::new(file.path()).with_next(fallback());
        assert!(source.resolve("KEY").is_err());
    }

    #[test]
    fn test_json_file_mount_hook_provisions_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mounted.json");
        let calls = Arc::new(AtomicUsize::new(0));

        let hook_path = path.clone();
        let counter = calls.clone();
        let source = JsonFileSource::new(&path)
            .with_mount_hook(move || -> Result<()> {
                counter.fetch_add(1, Ordering::SeqCst);
                fs::write(&hook_path, r#"{"KEY": "mounted"}"#)?;
                Ok(())
            })
            .with_next(fallback());

        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.resolve("KEY").unwrap(), Some(ConfigValue::from("mounted")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
