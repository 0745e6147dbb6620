// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborators of the resolver used by command-line front ends.
//!
//! The duration parser and the table printer are always available. The
//! argument surface of the bundled binary needs the `cli` feature.

#[cfg(feature = "cli")]
pub mod app;
pub mod duration;
pub mod table;

pub use duration::duration_in_seconds;
pub use table::{print_table, write_table};

#[cfg(feature = "cli")]
pub use app::{Cli, Command, GetArgs, StartArgs, UnknownVerbosity, Verbosity, VERBOSITY_KEY};
