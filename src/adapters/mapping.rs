// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory mapping resolver node, optionally seeded from a YAML file.

use crate::domain::{ConfigKey, ConfigMap, ConfigValue, Result};
use crate::ports::Resolver;
use std::path::{Path, PathBuf};

#[cfg(feature = "yaml")]
use crate::adapters::{JsonParser, YamlParser};
#[cfg(feature = "yaml")]
use crate::domain::ConfigError;
#[cfg(feature = "yaml")]
use crate::ports::ConfigParser;
#[cfg(feature = "yaml")]
use directories::ProjectDirs;
#[cfg(feature = "yaml")]
use std::fs;

/// Maximum allowed size for a file backing a mapping (10MB)
#[cfg(feature = "yaml")]
const MAX_MAPPING_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Resolver node backed by a key/value mapping.
///
/// The mapping is built once: an initial in-memory mapping, with the top-level
/// entries of a YAML file merged over it when a file is given. A file with a
/// `.json` extension is read as JSON instead. On a key
/// collision the file wins. The file is read and parsed eagerly, so a
/// malformed file fails construction rather than a later lookup.
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::MappingSource;
/// use cfgchain::domain::{ConfigMap, ConfigValue};
/// use cfgchain::ports::Resolver;
///
/// let mut initial = ConfigMap::new();
/// initial.insert("NAME".to_string(), ConfigValue::from("fixme"));
///
/// let source = MappingSource::new(initial);
/// assert_eq!(source.resolve("NAME").unwrap(), Some(ConfigValue::from("fixme")));
/// ```
pub struct MappingSource {
    values: ConfigMap,
    file_path: Option<PathBuf>,
    next: Option<Box<dyn Resolver>>,
}

impl std::fmt::Debug for MappingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappingSource")
            .field("values", &self.values)
            .field("file_path", &self.file_path)
            .field("next", &self.next.as_ref().map(|n| n.name().to_string()))
            .finish()
    }
}

impl MappingSource {
    /// Creates a source over an in-memory mapping.
    pub fn new(initial: ConfigMap) -> Self {
        Self {
            values: initial,
            file_path: None,
            next: None,
        }
    }

    /// Creates a source from a YAML or JSON file alone.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is larger than 10MB, does not parse
    /// or is not a mapping at the top level.
    #[cfg(feature = "yaml")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_file(ConfigMap::new(), path)
    }

    /// Creates a source from an initial mapping with a file merged over it.
    ///
    /// ```rust,no_run
    /// use cfgchain::adapters::MappingSource;
    /// use cfgchain::domain::ConfigMap;
    ///
    /// let source = MappingSource::with_file(ConfigMap::new(), "/etc/myapp/config.yaml").unwrap();
    /// ```
    #[cfg(feature = "yaml")]
    pub fn with_file<P: AsRef<Path>>(initial: ConfigMap, path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();
        let file_values = read_mapping_file(&file_path)?;

        tracing::debug!(
            "Loaded {} keys from '{}' over {} initial keys",
            file_values.len(),
            file_path.display(),
            initial.len()
        );

        let mut values = initial;
        values.extend(file_values);

        Ok(Self {
            values,
            file_path: Some(file_path),
            next: None,
        })
    }

    /// Like [`with_file`](Self::with_file), but a missing file contributes no
    /// entries instead of failing.
    #[cfg(feature = "yaml")]
    pub fn from_optional_file<P: AsRef<Path>>(initial: ConfigMap, path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Optional mapping file '{}' not found", path.display());
                Ok(Self::new(initial))
            }
            _ => Self::with_file(initial, path),
        }
    }

    /// Creates a source from `config.yaml` in the OS-appropriate config
    /// directory for the application. A missing file yields an empty mapping.
    ///
    /// ```rust,no_run
    /// use cfgchain::adapters::MappingSource;
    ///
    /// let source = MappingSource::from_default_location("myapp", "com.example").unwrap();
    /// ```
    #[cfg(feature = "yaml")]
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
                source_name: "mapping".to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Self::from_optional_file(ConfigMap::new(), proj_dirs.config_dir().join("config.yaml"))
    }

    /// Installs the successor consulted for keys outside the mapping.
    pub fn with_next(mut self, next: Box<dyn Resolver>) -> Self {
        self.next = Some(next);
        self
    }

    /// Returns the path of the backing file, if one was loaded.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns `true` if `key` is a member of the merged mapping.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the merged mapping.
    pub fn values(&self) -> &ConfigMap {
        &self.values
    }
}

// JSON by extension, YAML for everything else.
#[cfg(feature = "yaml")]
fn parser_for(path: &Path) -> Box<dyn ConfigParser> {
    let json = JsonParser::new();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            json.supported_extensions()
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        });

    if is_json {
        Box::new(json)
    } else {
        Box::new(YamlParser::new())
    }
}

#[cfg(feature = "yaml")]
fn read_mapping_file(path: &Path) -> Result<ConfigMap> {
    let metadata = fs::metadata(path)
        .map_err(|e| ConfigError::source_io("mapping", "Failed to read metadata of", path, e))?;

    if metadata.len() > MAX_MAPPING_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: "mapping".to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_MAPPING_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::source_io("mapping", "Failed to read", path, e))?;

    parser_for(path).parse(&content).map_err(|e| match e {
        ConfigError::ParseError { message, source } => ConfigError::ParseError {
            message: format!("{}: {}", path.display(), message),
            source,
        },
        other => other,
    })
}

impl Resolver for MappingSource {
    fn name(&self) -> &str {
        "mapping"
    }

    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        match self.values.get(key.as_str()) {
            Some(value) => {
                tracing::debug!("'mapping' answered '{}'", key);
                Ok(Some(value.clone()))
            }
            None => self.get_from_next_handler(key),
        }
    }

    fn next_handler(&self) -> Option<&dyn Resolver> {
        self.next.as_deref()
    }
}

impl_link!(MappingSource);
