// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Installs a formatted subscriber writing to standard error.
///
/// `RUST_LOG`, when set, takes precedence over `default_level`. Calling this
/// more than once keeps the first subscriber.
pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("A global subscriber is already installed");
    }
}
