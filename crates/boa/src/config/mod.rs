//! Layered configuration.
//!
//! A [`Config`] merges four layers, highest precedence first:
//!
//! 1. values set explicitly with [`Config::set`]
//! 2. environment variables, bound per key or derived automatically
//! 3. the config file (JSON, TOML or YAML)
//! 4. defaults
//!
//! [`ConfigBuilder`] wraps a `Config` for fluent setup at program start.

mod builder;
mod format;
mod store;

pub use builder::ConfigBuilder;
pub use format::{ConfigFormat, SUPPORTED_EXTS};
pub use store::Config;
