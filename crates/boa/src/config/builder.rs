//! Fluent construction of a [`Config`].

use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::store::Config;
use crate::error::ConfigError;

/// Builds a [`Config`] by chaining setup calls.
///
/// The `read_*` methods treat a failure as fatal: the error is printed to
/// stderr and the process exits with status 1. Use the `try_read_*` variants
/// to handle the error yourself.
///
/// ```rust
/// use boa::ConfigBuilder;
///
/// let cfg = ConfigBuilder::new()
///     .with_config_type("json")
///     .with_default("log.level", "info")
///     .try_read_config(r#"{"log": {"level": "debug"}}"#.as_bytes())
///     .unwrap()
///     .build();
///
/// assert_eq!(cfg.get_string("log.level"), "debug");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    cfg: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches the current directory, then `<config dir>/<name>`, for a
    /// file called `name` with any supported extension, and reads it if
    /// found. A missing or unreadable file is not an error here.
    pub fn new_default(name: &str) -> Self {
        let mut cfg = Config::new();
        match std::env::current_dir() {
            Ok(cwd) => cfg.add_config_path(cwd),
            Err(e) => log::warn!("cannot determine current directory: {e}"),
        }
        if let Some(dir) = dirs::config_dir() {
            cfg.add_config_path(dir.join(name));
        }
        cfg.set_config_name(name);
        if let Err(e) = cfg.read_in_config() {
            log::debug!("no default config for {name:?}: {e}");
        }
        Self { cfg }
    }

    /// Continues building an existing config.
    pub fn from_config(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Uses the first of `files` that exists as the config file.
    pub fn with_config_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        if let Some(file) = files.into_iter().find(|f| f.as_ref().exists()) {
            self.cfg.set_config_file(file.as_ref());
        }
        self
    }

    /// Adds the existing directories among `paths` to the search paths.
    pub fn with_config_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for path in paths.into_iter().map(Into::into) {
            if path.exists() {
                self.cfg.add_config_path(path);
            }
        }
        self
    }

    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.cfg.set_config_name(name);
        self
    }

    /// Config file extension, e.g. `"json"`.
    pub fn with_config_type(mut self, ext: impl Into<String>) -> Self {
        self.cfg.set_config_type(ext);
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.cfg.set_env_prefix(prefix);
        self
    }

    /// See [`Config::bind_env`].
    pub fn with_bound_env<I, S>(mut self, key: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cfg.bind_env(key, names);
        self
    }

    pub fn with_automatic_env(mut self) -> Self {
        self.cfg.automatic_env();
        self
    }

    pub fn with_env_key_replacer<I, F, T>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        self.cfg.set_env_key_replacer(pairs);
        self
    }

    /// Maps `.` to `_`, so `server.port` reads `SERVER_PORT`.
    pub fn with_default_env_key_replacer(self) -> Self {
        self.with_env_key_replacer([(".", "_")])
    }

    pub fn with_default(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.cfg.set_default(key, value);
        self
    }

    /// Reads config text of the configured type. Exits the process on error.
    pub fn read_config(self, reader: impl Read) -> Self {
        self.try_read_config(reader)
            .unwrap_or_else(|e| fatal("Error reading config", &e))
    }

    /// Discovers and reads the config file. Exits the process on error.
    pub fn read_in_config(self) -> Self {
        self.try_read_in_config()
            .unwrap_or_else(|e| fatal("Error reading in config", &e))
    }

    pub fn try_read_config(mut self, reader: impl Read) -> Result<Self, ConfigError> {
        self.cfg.read_config(reader)?;
        Ok(self)
    }

    pub fn try_read_in_config(mut self) -> Result<Self, ConfigError> {
        self.cfg.read_in_config()?;
        Ok(self)
    }

    pub fn build(self) -> Config {
        self.cfg
    }

    /// [`read_in_config`](Self::read_in_config) followed by [`build`](Self::build).
    pub fn read_in_config_and_build(self) -> Config {
        self.read_in_config().build()
    }
}

fn fatal(context: &str, e: &ConfigError) -> ! {
    log::error!("{context}: {e}");
    eprintln!("{context}: {e}");
    std::process::exit(1)
}
