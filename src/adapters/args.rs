// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument resolver node.
//!
//! Answers from a record of already-parsed named values. A name that is
//! defined answers even when its value is empty, false, zero or null. Only an
//! undefined name is delegated.

use crate::domain::{ConfigError, ConfigKey, ConfigValue, Result};
use crate::ports::Resolver;
use serde::Serialize;
use std::collections::HashMap;

/// Resolver node backed by parsed command-line arguments.
///
/// The record can come from several places:
///
/// - [`from_args`](Self::from_args): a raw argument vector scanned for
///   `--key=value`, `--key value`, `-k value` and bare `--flag` (recorded as
///   `true`)
/// - [`from_record`](Self::from_record): any `Serialize` struct, such as a
///   `clap` derive struct. Every serialized field is defined.
/// - [`from_arg_matches`](Self::from_arg_matches) (feature `cli`): a `clap`
///   match result, defaults included
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::ArgumentSource;
/// use cfgchain::domain::ConfigValue;
/// use cfgchain::ports::Resolver;
///
/// let source = ArgumentSource::from_args(vec!["--verbosity=error", "--dry-run"]);
/// assert_eq!(source.resolve("verbosity").unwrap(), Some(ConfigValue::from("error")));
/// assert_eq!(source.resolve("dry-run").unwrap(), Some(ConfigValue::from(true)));
/// assert_eq!(source.resolve("duration").unwrap(), None);
/// ```
pub struct ArgumentSource {
    values: HashMap<String, ConfigValue>,
    next: Option<Box<dyn Resolver>>,
}

impl ArgumentSource {
    /// Creates a source with no defined names.
    pub fn new() -> Self {
        Self::from_values(HashMap::new())
    }

    /// Creates a source from an explicit name/value record.
    pub fn from_values(values: HashMap<String, ConfigValue>) -> Self {
        Self { values, next: None }
    }

    /// Creates a source by scanning an argument vector.
    ///
    /// Positional arguments are ignored. When a name repeats, the last
    /// occurrence wins.
    pub fn from_args<S: AsRef<str>>(args: Vec<S>) -> Self {
        Self::from_values(scan_args(&args))
    }

    /// Creates a source from any record that serializes to a map.
    ///
    /// Field names become keys. A field serialized as `null` is still defined;
    /// use `#[serde(skip_serializing_if = "Option::is_none")]` on fields that
    /// should fall through to the next source when unset.
    ///
    /// ```rust
    /// use cfgchain::adapters::ArgumentSource;
    /// use cfgchain::domain::ConfigValue;
    /// use cfgchain::ports::Resolver;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Args {
    ///     verbosity: String,
    ///     dry_run: bool,
    /// }
    ///
    /// let args = Args { verbosity: "info".into(), dry_run: false };
    /// let source = ArgumentSource::from_record(&args).unwrap();
    /// assert_eq!(source.resolve("dry_run").unwrap(), Some(ConfigValue::from(false)));
    /// ```
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self> {
        let value = serde_json::to_value(record).map_err(|e| ConfigError::SourceError {
            source_name: "args".to_string(),
            message: format!("Failed to serialize argument record: {}", e),
            source: Some(Box::new(e)),
        })?;

        match value {
            serde_json::Value::Object(fields) => Ok(Self::from_values(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            )),
            _ => Err(ConfigError::SourceError {
                source_name: "args".to_string(),
                message: "Argument record must serialize to a map of named fields".to_string(),
                source: None,
            }),
        }
    }

    /// Creates a source from `clap` matches.
    ///
    /// Every id clap reports is defined, including arguments that only carry
    /// their default value. Single values become strings, repeated values a
    /// sequence of strings, and an id present without values becomes `null`.
    #[cfg(feature = "cli")]
    pub fn from_arg_matches(matches: &clap::ArgMatches) -> Self {
        let mut values = HashMap::new();
        for id in matches.ids() {
            let name = id.as_str();
            let value = match matches.try_get_raw(name) {
                Ok(Some(raw)) => {
                    let mut items: Vec<ConfigValue> = raw
                        .map(|v| ConfigValue::from(v.to_string_lossy().into_owned()))
                        .collect();
                    if items.len() == 1 {
                        items.remove(0)
                    } else {
                        ConfigValue::Sequence(items)
                    }
                }
                Ok(None) => ConfigValue::Null,
                Err(e) => {
                    tracing::debug!("Skipping argument id '{}': {}", name, e);
                    continue;
                }
            };
            values.insert(name.to_string(), value);
        }
        Self::from_values(values)
    }

    /// Installs the successor consulted for undefined names.
    pub fn with_next(mut self, next: Box<dyn Resolver>) -> Self {
        self.next = Some(next);
        self
    }

    /// Returns `true` if `name` is defined, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the defined names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Scans `--key=value`, `--key value`, `-k value` and bare flags.
fn scan_args<S: AsRef<str>>(args: &[S]) -> HashMap<String, ConfigValue> {
    let mut values = HashMap::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_ref();
        let next_value = args
            .get(i + 1)
            .map(AsRef::as_ref)
            .filter(|next| !next.starts_with('-'));

        let name = if let Some(long) = arg.strip_prefix("--") {
            if long.is_empty() {
                i += 1;
                continue;
            }
            if let Some((key, value)) = long.split_once('=') {
                values.insert(key.to_string(), ConfigValue::from(value));
                i += 1;
                continue;
            }
            long
        } else if arg.len() == 2 && arg.starts_with('-') {
            &arg[1..]
        } else {
            i += 1;
            continue;
        };

        match next_value {
            Some(value) => {
                values.insert(name.to_string(), ConfigValue::from(value));
                i += 2;
            }
            None => {
                values.insert(name.to_string(), ConfigValue::from(true));
                i += 1;
            }
        }
    }
    values
}

impl Default for ArgumentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for ArgumentSource {
    fn name(&self) -> &str {
        "args"
    }

    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        match self.values.get(key.as_str()) {
            Some(value) => {
                tracing::debug!("'args' answered '{}'", key);
                Ok(Some(value.clone()))
            }
            None => self.get_from_next_handler(key),
        }
    }

    fn next_handler(&self) -> Option<&dyn Resolver> {
        self.next.as_deref()
    }
}

impl_link!(ArgumentSource);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DefaultSource;

    struct Unreachable;

    impl Resolver for Unreachable {
        fn name(&self) -> &str {
            "unreachable"
        }

        fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
            panic!("successor consulted for '{}'", key);
        }

        fn next_handler(&self) -> Option<&dyn Resolver> {
            None
        }
    }

    #[test]
    fn test_args_name() {
        assert_eq!(ArgumentSource::new().name(), "args");
    }

    #[test]
    fn test_args_empty_delegates_to_nothing() {
        let source = ArgumentSource::new();
        assert_eq!(source.resolve("test.key").unwrap(), None);
    }

    #[test]
    fn test_args_long_form_equals() {
        let source = ArgumentSource::from_args(vec!["--database.host=localhost"]);
        assert_eq!(
            source.resolve("database.host").unwrap(),
            Some(ConfigValue::from("localhost"))
        );
    }

    #[test]
    fn test_args_long_form_space_and_short_form() {
        let source = ArgumentSource::from_args(vec!["--host", "localhost", "-p", "8080"]);
        assert_eq!(source.resolve("host").unwrap(), Some(ConfigValue::from("localhost")));
        assert_eq!(source.resolve("p").unwrap(), Some(ConfigValue::from("8080")));
    }

    #[test]
    fn test_args_bare_flags_are_true() {
        let source = ArgumentSource::from_args(vec!["--dry-run", "--port", "8080", "-q"]);
        assert_eq!(source.resolve("dry-run").unwrap(), Some(ConfigValue::from(true)));
        assert_eq!(source.resolve("port").unwrap(), Some(ConfigValue::from("8080")));
        assert_eq!(source.resolve("q").unwrap(), Some(ConfigValue::from(true)));
    }

    #[test]
    fn test_args_equals_in_value_and_last_wins() {
        let source = ArgumentSource::from_args(vec![
            "--conn=host=localhost;port=5432",
            "--key=value1",
            "--key=value2",
        ]);
        assert_eq!(
            source.resolve("conn").unwrap(),
            Some(ConfigValue::from("host=localhost;port=5432"))
        );
        assert_eq!(source.resolve("key").unwrap(), Some(ConfigValue::from("value2")));
    }

    #[test]
    fn test_args_positionals_ignored() {
        let source = ArgumentSource::from_args(vec!["positional1", "--key", "value", "positional2"]);
        assert_eq!(source.names().count(), 1);
        assert!(source.contains("key"));
    }

    #[test]
    fn test_args_empty_value_answers_without_delegating() {
        let source = ArgumentSource::from_args(vec!["--key="]).with_next(Box::new(Unreachable));
        assert_eq!(source.resolve("key").unwrap(), Some(ConfigValue::from("")));
    }

    #[test]
    fn test_args_undefined_delegates() {
        let source = ArgumentSource::from_args(vec!["--key=value"])
            .with_next(Box::new(DefaultSource::new("fallback")));
        assert_eq!(source.resolve("other").unwrap(), Some(ConfigValue::from("fallback")));
    }

    #[derive(Serialize)]
    struct Record {
        verbosity: String,
        dry_run: bool,
        duration: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        config: Option<String>,
    }

    #[test]
    fn test_from_record_zero_values_are_defined() {
        let record = Record {
            verbosity: "info".to_string(),
            dry_run: false,
            duration: None,
            config: None,
        };
        let source = ArgumentSource::from_record(&record)
            .unwrap()
            .with_next(Box::new(DefaultSource::new("fallback")));

        assert_eq!(source.resolve("verbosity").unwrap(), Some(ConfigValue::from("info")));
        assert_eq!(source.resolve("dry_run").unwrap(), Some(ConfigValue::from(false)));
        assert_eq!(source.resolve("duration").unwrap(), Some(ConfigValue::Null));
        // Skipped fields are undefined and fall through.
        assert_eq!(source.resolve("config").unwrap(), Some(ConfigValue::from("fallback")));
    }

    #[test]
    fn test_from_record_rejects_non_map() {
        let result = ArgumentSource::from_record(&vec![1, 2, 3]);
        assert!(matches!(result, Err(ConfigError::SourceError { .. })));
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_from_arg_matches_includes_defaults() {
        use clap::{Arg, Command};

        let command = Command::new("test").arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .default_value("info"),
        );

        let defaults = command.clone().try_get_matches_from(["test"]).unwrap();
        let source = ArgumentSource::from_arg_matches(&defaults);
        assert_eq!(source.resolve("verbosity").unwrap(), Some(ConfigValue::from("info")));

        let given = command
            .try_get_matches_from(["test", "--verbosity", "error"])
            .unwrap();
        let source = ArgumentSource::from_arg_matches(&given);
        assert_eq!(source.resolve("verbosity").unwrap(), Some(ConfigValue::from("error")));
        assert_eq!(source.resolve("does-not-exist").unwrap(), None);
    }
}
