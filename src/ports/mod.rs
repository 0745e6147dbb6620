// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The resolver node contract, the document parser contract and the mount hook
//! capability. Adapters implement them.

pub mod mount;
pub mod parser;
pub mod resolver;

// Re-export commonly used types
pub use mount::MountHook;
pub use parser::ConfigParser;
pub use resolver::{Link, Resolver};
