// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing chain assembly.
//!
//! Adapters know how to answer or delegate; this layer wires them together
//! and gives callers a single entry point for resolving keys.

pub mod chain;

// Re-export commonly used types
pub use chain::{Chain, ChainBuilder};
