// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! Keys, values and errors shared by every resolver. Nothing here touches the
//! filesystem, the environment or any parser.

pub mod config_key;
pub mod config_value;
pub mod errors;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::{ConfigMap, ConfigValue};
pub use errors::{ConfigError, Result};
