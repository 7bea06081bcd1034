//! Error types for command execution and configuration.
//!
//! [`Error`] is returned from command execution and rendering; its `Display`
//! output is exactly what is printed after the `Error: ` prefix when a command
//! fails. [`ConfigError`] covers configuration discovery, parsing and
//! decoding.

use std::path::PathBuf;

use boa_render::RenderError;
use thiserror::Error;

/// Result alias for command operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for command execution.
#[derive(Debug, Error)]
pub enum Error {
    /// Flags or arguments could not be parsed.
    #[error("{0}")]
    Parse(String),

    /// A positional argument named no known subcommand.
    #[error("unknown command {name:?} for {path:?}{suggestions}")]
    UnknownCommand {
        name: String,
        path: String,
        suggestions: String,
    },

    /// A positional argument was not among the valid args.
    #[error("invalid argument {arg:?} for {path:?}{suggestions}")]
    InvalidArgument {
        arg: String,
        path: String,
        suggestions: String,
    },

    /// Wrong number of positional arguments.
    #[error("{0}")]
    Args(String),

    /// Required flags were not provided.
    #[error("required flag(s) {} not set", quoted(.0))]
    RequiredFlags(Vec<String>),

    /// A flag group constraint was violated.
    #[error("{0}")]
    FlagGroup(String),

    /// A profile references options the command does not declare.
    #[error("profile {profile:?} references unknown option(s) {}", quoted(.missing))]
    UnresolvedProfile {
        profile: String,
        missing: Vec<String>,
    },

    /// A usage, help or version template failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A lifecycle hook returned an error.
    #[error(transparent)]
    Hook(#[from] anyhow::Error),

    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("{s:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config file was found in any search path.
    #[error("Config File {name:?} Not Found in {paths:?}")]
    NotFound { name: String, paths: Vec<PathBuf> },

    /// The config type (file extension) is not supported.
    #[error("Unsupported Config Type {0:?}")]
    UnsupportedType(String),

    /// The config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config content is malformed.
    #[error("While parsing config: {0}")]
    Parse(String),

    /// The merged settings could not be decoded into the requested type.
    #[error("failed to decode config: {0}")]
    Decode(String),
}
