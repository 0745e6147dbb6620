// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the concrete resolver nodes.
//!
//! Each adapter implements [`Resolver`](crate::ports::Resolver) over one kind
//! of source. All of them except [`DefaultSource`] also implement
//! [`Link`](crate::ports::Link) so a chain builder can give them a successor.

// Every linkable node exposes `with_next(self, Box<dyn Resolver>) -> Self`.
macro_rules! impl_link {
    ($ty:ty) => {
        impl $crate::ports::Link for $ty {
            fn link(
                self: Box<Self>,
                next: Box<dyn $crate::ports::Resolver>,
            ) -> Box<dyn $crate::ports::Resolver> {
                Box::new((*self).with_next(next))
            }

            fn into_resolver(self: Box<Self>) -> Box<dyn $crate::ports::Resolver> {
                self
            }
        }
    };
}

pub mod args;
pub mod command;
pub mod default;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file;
pub mod json_file;
pub mod mapping;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use args::ArgumentSource;
pub use command::{run_command, CommandMountHook};
pub use default::DefaultSource;
#[cfg(feature = "env")]
pub use env_var::EnvironmentSource;
pub use file::FileSource;
pub use json_file::{JsonFileSource, JsonParser};
pub use mapping::MappingSource;
#[cfg(feature = "yaml")]
pub use yaml::YamlParser;
