// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chain assembly and resolution entry point.
//!
//! A [`Chain`] owns the head node of a resolver chain. The [`ChainBuilder`]
//! collects linkable nodes in lookup order, first consulted first, and wires each
//! one to the next when the chain is built, so callers never nest `with_next`
//! calls by hand.

use crate::adapters::{ArgumentSource, DefaultSource, FileSource, JsonFileSource, MappingSource};
use crate::domain::{ConfigError, ConfigKey, ConfigMap, ConfigValue, Result};
use crate::ports::{Link, MountHook, Resolver};
use std::fmt;
use std::path::PathBuf;

/// An immutable, fully wired resolver chain.
///
/// # Examples
///
/// ```rust
/// use cfgchain::adapters::{ArgumentSource, EnvironmentSource, MappingSource};
/// use cfgchain::domain::{ConfigMap, ConfigValue};
/// use cfgchain::service::Chain;
/// use std::collections::HashMap;
///
/// # fn main() -> cfgchain::domain::Result<()> {
/// let mut initial = ConfigMap::new();
/// initial.insert("NAME".to_string(), ConfigValue::from("fixme"));
///
/// let chain = Chain::builder()
///     .with_args(ArgumentSource::from_args(vec!["--verbose"]))
///     .then(EnvironmentSource::with_values(HashMap::new()))
///     .with_mapping(initial)
///     .or_default("unknown");
///
/// assert_eq!(chain.require("NAME")?, ConfigValue::from("fixme"));
/// assert_eq!(chain.require("verbose")?, ConfigValue::Bool(true));
/// assert_eq!(chain.require("missing")?, ConfigValue::from("unknown"));
/// assert_eq!(chain.names(), vec!["args", "env", "mapping", "default"]);
/// # Ok(())
/// # }
/// ```
pub struct Chain {
    head: Option<Box<dyn Resolver>>,
}

impl Chain {
    /// Wraps an already wired head node.
    pub fn new(head: Box<dyn Resolver>) -> Self {
        Self { head: Some(head) }
    }

    /// Creates a chain with no nodes. It resolves every key to `None`.
    pub fn empty() -> Self {
        Self { head: None }
    }

    /// Creates a new chain builder.
    pub fn builder() -> ChainBuilder {
        ChainBuilder::new()
    }

    /// Returns the head node, if the chain is not empty.
    pub fn head(&self) -> Option<&dyn Resolver> {
        self.head.as_deref()
    }

    /// Resolves `key` from the head of the chain.
    ///
    /// `Ok(None)` means no node answered.
    pub fn resolve(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.resolve_key(&ConfigKey::from(key))
    }

    /// Resolves an already constructed key.
    pub fn resolve_key(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        match &self.head {
            Some(head) => {
                tracing::debug!("Resolving '{}' starting at '{}'", key, head.name());
                head.handle_request(key)
            }
            None => {
                tracing::debug!("Resolving '{}' on an empty chain", key);
                Ok(None)
            }
        }
    }

    /// Resolves `key`, treating the absence of an answer as an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigKeyNotFound`] when no node answers, or the
    /// error of the node that failed.
    pub fn require(&self, key: &str) -> Result<ConfigValue> {
        self.resolve(key)?
            .ok_or_else(|| ConfigError::ConfigKeyNotFound {
                key: key.to_string(),
            })
    }

    /// Resolves `key`, falling back to `default` when no node answers.
    ///
    /// Errors from the chain are still returned.
    pub fn resolve_or(&self, key: &str, default: impl Into<ConfigValue>) -> Result<ConfigValue> {
        Ok(self.resolve(key)?.unwrap_or_else(|| default.into()))
    }

    /// Returns the node names from head to tail.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut node = self.head();
        while let Some(current) = node {
            names.push(current.name());
            node = current.next_handler();
        }
        names
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.names().len()
    }

    /// Returns `true` if the chain has no nodes.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("nodes", &self.names()).finish()
    }
}

impl From<Box<dyn Resolver>> for Chain {
    fn from(head: Box<dyn Resolver>) -> Self {
        Self::new(head)
    }
}

/// Builder for constructing a [`Chain`].
///
/// Nodes are consulted in the order they are added. The chain is closed either
/// with [`or_default`](Self::or_default), which appends a
/// [`DefaultSource`], or with [`build`](Self::build), which leaves the last
/// node without a successor.
///
/// # Examples
///
/// ```rust
/// use cfgchain::service::ChainBuilder;
///
/// # fn main() -> cfgchain::domain::Result<()> {
/// let chain = ChainBuilder::new()
///     .with_env()
///     .with_file("/run/secrets/token", None)
///     .build();
/// assert_eq!(chain.names(), vec!["env", "file"]);
/// # Ok(())
/// # }
/// ```
pub struct ChainBuilder {
    nodes: Vec<Box<dyn Link>>,
}

impl ChainBuilder {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Appends any linkable node.
    pub fn then(mut self, node: impl Link + 'static) -> Self {
        self.nodes.push(Box::new(node));
        self
    }

    /// Appends an argument source.
    pub fn with_args(self, source: ArgumentSource) -> Self {
        self.then(source)
    }

    /// Appends a snapshot of the process environment.
    #[cfg(feature = "env")]
    pub fn with_env(self) -> Self {
        self.then(crate::adapters::EnvironmentSource::from_process())
    }

    /// Appends an environment source over the given variables.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self, vars: std::collections::HashMap<String, String>) -> Self {
        self.then(crate::adapters::EnvironmentSource::with_values(vars))
    }

    /// Appends an in-memory mapping source.
    pub fn with_mapping(self, values: ConfigMap) -> Self {
        self.then(MappingSource::new(values))
    }

    /// Appends a mapping source loaded from a YAML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(self.then(MappingSource::from_file(path)?))
    }

    /// Appends a raw file source, optionally with a mount hook.
    pub fn with_file(self, path: impl Into<PathBuf>, hook: Option<Box<dyn MountHook>>) -> Self {
        let source = FileSource::new(path);
        let source = match hook {
            Some(hook) => source.with_boxed_mount_hook(hook),
            None => source,
        };
        self.then(source)
    }

    /// Appends a JSON file source, optionally with a mount hook.
    pub fn with_json_file(
        self,
        path: impl Into<PathBuf>,
        hook: Option<Box<dyn MountHook>>,
    ) -> Self {
        let source = JsonFileSource::new(path);
        let source = match hook {
            Some(hook) => source.with_boxed_mount_hook(hook),
            None => source,
        };
        self.then(source)
    }

    /// Closes the chain with a [`DefaultSource`] answering `value`.
    pub fn or_default(self, value: impl Into<ConfigValue>) -> Chain {
        let tail: Box<dyn Resolver> = Box::new(DefaultSource::new(value));
        Chain::new(Self::wire(self.nodes, tail))
    }

    /// Builds the chain. The last node added has no successor.
    pub fn build(mut self) -> Chain {
        match self.nodes.pop() {
            Some(last) => Chain::new(Self::wire(self.nodes, last.into_resolver())),
            None => Chain::empty(),
        }
    }

    fn wire(nodes: Vec<Box<dyn Link>>, tail: Box<dyn Resolver>) -> Box<dyn Resolver> {
        nodes
            .into_iter()
            .rev()
            .fold(tail, |next, node| node.link(next))
    }
}

impl Default for ChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
