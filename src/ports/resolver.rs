// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolver node trait definition.
//!
//! A resolver chain is a singly-linked list of nodes. Each node either answers
//! a key from its own source or forwards the very same key to its successor.
//! The tail of the chain decides what happens when nobody answers: a
//! [`DefaultSource`](crate::adapters::DefaultSource) always answers, and a
//! missing successor yields `Ok(None)`.

use crate::domain::{ConfigKey, ConfigValue, Result};

/// A node in a resolver chain.
///
/// `handle_request` returns:
///
/// * `Ok(Some(value))` - this node, or one after it, answered
/// * `Ok(None)` - no node from here to the tail could answer
/// * `Err(ConfigError)` - a backing resource was unreadable or malformed
///
/// Nodes never inspect one another; delegation through
/// [`get_from_next_handler`](Resolver::get_from_next_handler) is the only way a
/// request moves down the chain.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. A built chain is immutable, so
/// different keys can be resolved concurrently, with the caveat that file
/// sources may run their mount hook from several threads at once.
///
/// # Examples
///
/// ```rust
/// use cfgchain::domain::{ConfigKey, ConfigValue, Result};
/// use cfgchain::ports::Resolver;
///
/// struct Constant(&'static str, &'static str);
///
/// impl Resolver for Constant {
///     fn name(&self) -> &str {
///         "constant"
///     }
///
///     fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
///         if key.as_str() == self.0 {
///             return Ok(Some(ConfigValue::from(self.1)));
///         }
///         self.get_from_next_handler(key)
///     }
///
///     fn next_handler(&self) -> Option<&dyn Resolver> {
///         None
///     }
/// }
///
/// let node = Constant("NAME", "fixme");
/// assert_eq!(node.resolve("NAME").unwrap(), Some(ConfigValue::from("fixme")));
/// assert_eq!(node.resolve("OTHER").unwrap(), None);
/// ```
pub trait Resolver: Send + Sync {
    /// Returns a short identifier for this node, used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Answers `key` locally or delegates it to the successor.
    fn handle_request(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns the successor of this node, if any.
    fn next_handler(&self) -> Option<&dyn Resolver>;

    /// Forwards `key` unchanged to the successor.
    ///
    /// Returns `Ok(None)` when there is no successor.
    fn get_from_next_handler(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        match self.next_handler() {
            Some(next) => {
                tracing::debug!(
                    "'{}' has no answer for '{}', delegating to '{}'",
                    self.name(),
                    key,
                    next.name()
                );
                next.handle_request(key)
            }
            None => {
                tracing::debug!("'{}' has no answer for '{}' and no successor", self.name(), key);
                Ok(None)
            }
        }
    }

    /// Resolves a key given as a string slice.
    ///
    /// Equivalent to `handle_request(&ConfigKey::from(key))`.
    fn resolve(&self, key: &str) -> Result<Option<ConfigValue>> {
        self.handle_request(&ConfigKey::from(key))
    }
}

/// A node that can take a successor while a chain is being assembled.
///
/// Every source implements this except
/// [`DefaultSource`](crate::adapters::DefaultSource), which answers every key
/// and therefore can only ever be the tail of a chain.
pub trait Link: Resolver {
    /// Consumes the node and returns it with `next` installed as its successor.
    fn link(self: Box<Self>, next: Box<dyn Resolver>) -> Box<dyn Resolver>;

    /// Consumes the node and returns it as a plain resolver.
    fn into_resolver(self: Box<Self>) -> Box<dyn Resolver>;
}
