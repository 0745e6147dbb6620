// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture configuration resolution crate.
//!
//! A value is resolved by handing its key to the head of a chain of sources.
//! Each source either answers from its own data or passes the very same key to
//! the next source. The first answer wins; if nobody answers the result is
//! `Ok(None)`, which is never confused with an empty string, `false` or zero.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`ConfigKey`, `ConfigValue`, `ConfigError`)
//! - **Ports**: Trait definitions (`Resolver`, `Link`, `ConfigParser`, `MountHook`)
//! - **Adapters**: One resolver node per kind of source
//! - **Service**: `Chain` and `ChainBuilder`, which wire nodes together
//!
//! # Sources
//!
//! - **Arguments**: parsed command-line values, defined names answer even when empty
//! - **Environment**: exact variable-name match on a snapshot of the environment
//! - **Mapping**: an in-memory mapping, optionally merged with a YAML file
//! - **File**: the whole contents of a file, with an optional mount hook
//! - **JSON file**: a top-level field of a JSON document
//! - **Default**: a fixed value, always last
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML-backed mapping sources (default)
//! - `env`: Enable the environment source (default)
//! - `cli`: Enable the `cfgchain` binary, its argument surface and logging setup (default)
//!
//! # Quick Start
//!
//! ```rust
//! use cfgchain::prelude::*;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<()> {
//! let mut initial = ConfigMap::new();
//! initial.insert("NAME".to_string(), ConfigValue::from("fixme"));
//!
//! let chain = Chain::builder()
//!     .with_args(ArgumentSource::from_args(Vec::<String>::new()))
//!     .with_env_vars(HashMap::new())
//!     .with_mapping(initial)
//!     .build();
//!
//! assert_eq!(chain.resolve("NAME")?, Some(ConfigValue::from("fixme")));
//! assert_eq!(chain.resolve("OTHER")?, None);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod cli;
pub mod domain;
#[cfg(feature = "cli")]
pub mod logging;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{
        ArgumentSource, DefaultSource, FileSource, JsonFileSource, MappingSource,
    };
    pub use crate::domain::{ConfigError, ConfigKey, ConfigMap, ConfigValue, Result};
    pub use crate::ports::{ConfigParser, Link, MountHook, Resolver};
    pub use crate::service::{Chain, ChainBuilder};

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvironmentSource;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
