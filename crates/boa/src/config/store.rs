//! The layered key/value store.

use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use super::format::{lowercase_keys, ConfigFormat, SUPPORTED_EXTS};
use crate::cli::parse_bool;
use crate::error::ConfigError;

const DEFAULT_CONFIG_NAME: &str = "config";

/// Layered configuration: explicit sets override environment variables,
/// which override the config file, which overrides defaults.
///
/// Keys are case-insensitive and dotted keys address nested tables, so
/// `server.port` reads `port` inside the `[server]` table of a TOML file.
///
/// ```rust
/// use boa::Config;
///
/// let mut cfg = Config::new();
/// cfg.set_config_type("toml");
/// cfg.read_config("[server]\nport = 8080\n".as_bytes()).unwrap();
/// cfg.set_default("server.host", "localhost");
///
/// assert_eq!(cfg.get_i64("Server.Port"), 8080);
/// assert_eq!(cfg.get_string("server.host"), "localhost");
///
/// cfg.set("server.port", 9090);
/// assert_eq!(cfg.get_i64("server.port"), 9090);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    config_paths: Vec<PathBuf>,
    config_name: Option<String>,
    config_type: Option<String>,
    config_file: Option<PathBuf>,
    env_prefix: String,
    env_bindings: Vec<(String, Vec<String>)>,
    automatic_env: bool,
    env_key_replacer: Vec<(String, String)>,
    defaults: Map<String, Value>,
    config: Map<String, Value>,
    overrides: Map<String, Value>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory to search for the config file. Paths are searched
    /// in the order they were added; duplicates are ignored.
    pub fn add_config_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.config_paths.contains(&path) {
            log::debug!("adding {} to config search paths", path.display());
            self.config_paths.push(path);
        }
    }

    /// Name of the config file without extension. Defaults to `config`.
    pub fn set_config_name(&mut self, name: impl Into<String>) {
        self.config_name = Some(name.into());
        self.config_file = None;
    }

    /// Restricts discovery to one format and sets the format used by
    /// [`read_config`](Self::read_config).
    pub fn set_config_type(&mut self, ext: impl Into<String>) {
        self.config_type = Some(ext.into());
    }

    /// Uses this file instead of searching the config paths.
    pub fn set_config_file(&mut self, path: impl Into<PathBuf>) {
        self.config_file = Some(path.into());
    }

    /// Prefix for environment variable names, joined to the key with `_`.
    pub fn set_env_prefix(&mut self, prefix: impl Into<String>) {
        self.env_prefix = prefix.into();
    }

    /// Binds a key to environment variables.
    ///
    /// Without names the key's own name is used, upper-cased and prefixed.
    /// Explicit names are used verbatim and checked in order.
    pub fn bind_env<I, S>(&mut self, key: &str, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = key.to_lowercase();
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            names.push(self.env_name(&key));
        }
        self.env_bindings.retain(|(k, _)| *k != key);
        self.env_bindings.push((key, names));
    }

    /// Checks `PREFIX_KEY` for every key read, with the key replacer applied.
    pub fn automatic_env(&mut self) {
        self.automatic_env = true;
    }

    /// Replacements applied to environment variable names, in order.
    pub fn set_env_key_replacer<I, F, T>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        self.env_key_replacer = pairs
            .into_iter()
            .map(|(from, to)| (from.into(), to.into()))
            .collect();
    }

    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        insert_path(&mut self.defaults, key, lowercase_keys(value.into()));
    }

    /// Sets a value that overrides every other layer.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        insert_path(&mut self.overrides, key, lowercase_keys(value.into()));
    }

    /// Discovers, reads and parses the config file, replacing the previous
    /// file layer.
    pub fn read_in_config(&mut self) -> Result<(), ConfigError> {
        let path = self.find_config_file()?;
        let ext = match &self.config_type {
            Some(ext) => ext.clone(),
            None => path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_string(),
        };
        let format =
            ConfigFormat::from_ext(&ext).ok_or_else(|| ConfigError::UnsupportedType(ext.clone()))?;
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        log::debug!("reading config file {} as {format:?}", path.display());
        self.config = format.parse(&text)?;
        self.config_file = Some(path);
        Ok(())
    }

    /// Reads config text of the configured type from a reader, replacing the
    /// previous file layer.
    pub fn read_config(&mut self, mut reader: impl Read) -> Result<(), ConfigError> {
        let ext = self.config_type.clone().unwrap_or_default();
        let format =
            ConfigFormat::from_ext(&ext).ok_or_else(|| ConfigError::UnsupportedType(ext.clone()))?;
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        self.config = format.parse(&text)?;
        Ok(())
    }

    /// The config file that was read, or the one set explicitly.
    pub fn config_file_used(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// The value for `key` from the highest layer that has it.
    pub fn get(&self, key: &str) -> Option<Value> {
        let key = key.to_lowercase();
        if let Some(v) = lookup(&self.overrides, &key) {
            return Some(v.clone());
        }
        let fallback = lookup(&self.config, &key).or_else(|| lookup(&self.defaults, &key));
        if let Some(raw) = self.env_value(&key) {
            return Some(coerce(raw, fallback));
        }
        fallback.cloned()
    }

    /// The value as a string; empty when unset. Tables and arrays are
    /// rendered as JSON.
    pub fn get_string(&self, key: &str) -> String {
        match self.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        }
    }

    /// The value as a boolean; `false` when unset or not convertible.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => parse_bool(&s).unwrap_or(false),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            _ => false,
        }
    }

    /// The value as an integer; `0` when unset or not convertible.
    pub fn get_i64(&self, key: &str) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            Some(Value::Bool(b)) => i64::from(b),
            _ => 0,
        }
    }

    /// The value as a float; `0.0` when unset or not convertible.
    pub fn get_f64(&self, key: &str) -> f64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            Some(Value::Bool(b)) => f64::from(u8::from(b)),
            _ => 0.0,
        }
    }

    /// Deserializes the value for `key`, environment overrides of nested
    /// keys included.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let key = key.to_lowercase();
        let value = match self.get(&key) {
            Some(Value::Object(_)) => self.subtree(&key),
            Some(v) => v,
            None => Value::Null,
        };
        serde_json::from_value(value).map_err(|e| ConfigError::Decode(format!("{key}: {e}")))
    }

    /// True if any layer, the environment included, has a value for `key`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Every leaf key known to any layer, plus bound environment keys, sorted.
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys = BTreeSet::new();
        for layer in [&self.defaults, &self.config, &self.overrides] {
            collect_keys(layer, "", &mut keys);
        }
        keys.extend(self.env_bindings.iter().map(|(k, _)| k.clone()));
        keys.into_iter().collect()
    }

    /// All settings merged into one nested table.
    pub fn all_settings(&self) -> Map<String, Value> {
        let mut settings = Map::new();
        for key in self.all_keys() {
            if let Some(value) = self.get(&key) {
                insert_path(&mut settings, &key, value);
            }
        }
        settings
    }

    /// Deserializes all settings into `T`.
    pub fn unmarshal<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.all_settings()))
            .map_err(|e| ConfigError::Decode(e.to_string()))
    }

    fn subtree(&self, prefix: &str) -> Value {
        let mut tree = Map::new();
        let dotted = format!("{prefix}.");
        for key in self.all_keys() {
            if let Some(rest) = key.strip_prefix(&dotted) {
                if let Some(value) = self.get(&key) {
                    insert_path(&mut tree, rest, value);
                }
            }
        }
        Value::Object(tree)
    }

    fn find_config_file(&self) -> Result<PathBuf, ConfigError> {
        if let Some(file) = &self.config_file {
            return Ok(file.clone());
        }
        let name = self.config_name.as_deref().unwrap_or(DEFAULT_CONFIG_NAME);
        let exts: Vec<&str> = match &self.config_type {
            Some(ext) => vec![ext.as_str()],
            None => SUPPORTED_EXTS.to_vec(),
        };
        for dir in &self.config_paths {
            log::debug!("searching for config {name:?} in {}", dir.display());
            for ext in &exts {
                let candidate = dir.join(format!("{name}.{ext}"));
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
            if self.config_type.is_some() {
                let bare = dir.join(name);
                if bare.is_file() {
                    return Ok(bare);
                }
            }
        }
        Err(ConfigError::NotFound {
            name: name.to_string(),
            paths: self.config_paths.clone(),
        })
    }

    fn env_name(&self, key: &str) -> String {
        if self.env_prefix.is_empty() {
            key.to_uppercase()
        } else {
            format!("{}_{}", self.env_prefix, key).to_uppercase()
        }
    }

    fn replace_env_key(&self, name: &str) -> String {
        self.env_key_replacer
            .iter()
            .fold(name.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }

    // Empty variables count as unset.
    fn env_value(&self, key: &str) -> Option<String> {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some((_, names)) = self.env_bindings.iter().find(|(k, _)| k == key) {
            if let Some(v) = names.iter().find_map(|n| read(&self.replace_env_key(n))) {
                return Some(v);
            }
        }
        if self.automatic_env {
            return read(&self.replace_env_key(&self.env_name(key)));
        }
        None
    }
}

/// Looks up a dotted key in nested tables.
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut current = map.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Inserts at a dotted key, replacing non-table intermediates.
fn insert_path(map: &mut Map<String, Value>, key: &str, value: Value) {
    let key = key.to_lowercase();
    let mut parts: Vec<&str> = key.split('.').collect();
    let Some(last) = parts.pop() else {
        return;
    };
    let mut current = map;
    for part in parts {
        let entry = current
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), value);
}

fn collect_keys(map: &Map<String, Value>, prefix: &str, keys: &mut BTreeSet<String>) {
    for (k, v) in map {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        match v {
            Value::Object(inner) if !inner.is_empty() => collect_keys(inner, &key, keys),
            _ => {
                keys.insert(key);
            }
        }
    }
}

/// Converts an environment string to the type of the value it overrides.
fn coerce(raw: String, like: Option<&Value>) -> Value {
    match like {
        Some(Value::Bool(_)) => parse_bool(&raw)
            .map(Value::Bool)
            .unwrap_or(Value::String(raw)),
        Some(Value::Number(n)) if n.is_f64() => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::String(raw)),
        Some(Value::Number(_)) => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or(Value::String(raw)),
        Some(Value::Array(_)) => raw.split_whitespace().map(Value::from).collect(),
        _ => Value::String(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use serial_test::serial;

    fn toml_config(text: &str) -> Config {
        let mut cfg = Config::new();
        cfg.set_config_type("toml");
        cfg.read_config(text.as_bytes()).unwrap();
        cfg
    }

    #[test]
    fn test_layer_precedence() {
        let mut cfg = toml_config("name = \"file\"\nlevel = 2\n");
        cfg.set_default("name", "default");
        cfg.set_default("only_default", true);

        assert_eq!(cfg.get_string("name"), "file");
        assert!(cfg.get_bool("only_default"));

        cfg.set("name", "explicit");
        assert_eq!(cfg.get_string("name"), "explicit");
        assert_eq!(cfg.get_i64("level"), 2);
    }

    #[test]
    fn test_dotted_keys_are_case_insensitive() {
        let cfg = toml_config("[Database]\nHost = \"db\"\nport = 5432\n");
        assert_eq!(cfg.get_string("database.host"), "db");
        assert_eq!(cfg.get_i64("DATABASE.PORT"), 5432);
        assert_eq!(cfg.get("database.missing"), None);
        assert_eq!(cfg.get("database.host.deeper"), None);
    }

    #[test]
    fn test_get_conversions() {
        let mut cfg = Config::new();
        cfg.set("ratio", 0.5);
        cfg.set("flag", "T");
        cfg.set("count", "42");
        cfg.set("list", json!(["a", "b"]));

        assert_eq!(cfg.get_f64("ratio"), 0.5);
        assert!(cfg.get_bool("flag"));
        assert_eq!(cfg.get_i64("count"), 42);
        assert_eq!(cfg.get_string("list"), r#"["a","b"]"#);
        assert_eq!(cfg.get_string("unset"), "");
        assert_eq!(cfg.get_i64("unset"), 0);
    }

    #[test]
    fn test_all_keys_and_settings() {
        let mut cfg = toml_config("[server]\nport = 80\n");
        cfg.set_default("server.host", "localhost");
        cfg.set("debug", true);

        assert_eq!(cfg.all_keys(), vec!["debug", "server.host", "server.port"]);
        assert_eq!(
            Value::Object(cfg.all_settings()),
            json!({"debug": true, "server": {"host": "localhost", "port": 80}})
        );
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut cfg = Config::new();
        cfg.set("a", 1);
        cfg.set("a.b", 2);
        assert_eq!(cfg.get("a"), Some(json!({"b": 2})));
    }

    #[test]
    fn test_unmarshal() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Server {
            host: String,
            port: u16,
        }
        #[derive(Debug, Deserialize, PartialEq)]
        struct Settings {
            server: Server,
        }

        let mut cfg = toml_config("[server]\nport = 8080\n");
        cfg.set_default("server.host", "0.0.0.0");

        let settings: Settings = cfg.unmarshal().unwrap();
        assert_eq!(
            settings,
            Settings {
                server: Server {
                    host: "0.0.0.0".into(),
                    port: 8080
                }
            }
        );
        let server: Server = cfg.get_as("server").unwrap();
        assert_eq!(server.port, 8080);
        assert!(cfg.get_as::<u16>("server.host").is_err());
    }

    #[test]
    fn test_read_config_requires_type() {
        let mut cfg = Config::new();
        let err = cfg.read_config("a = 1".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported Config Type \"\"");
    }

    #[test]
    #[serial]
    fn test_bound_env_overrides_file() {
        std::env::set_var("BOA_STORE_TEST_PORT", "9000");
        std::env::set_var("BOA_STORE_TEST_EMPTY", "");

        let mut cfg = toml_config("port = 80\nempty = \"kept\"\n");
        cfg.set_env_prefix("boa_store_test");
        cfg.bind_env("port", Vec::<String>::new());
        cfg.bind_env("empty", ["BOA_STORE_TEST_EMPTY"]);

        assert_eq!(cfg.get("port"), Some(json!(9000)));
        assert_eq!(cfg.get_string("empty"), "kept");

        cfg.set("port", 1);
        assert_eq!(cfg.get_i64("port"), 1);

        std::env::remove_var("BOA_STORE_TEST_PORT");
        std::env::remove_var("BOA_STORE_TEST_EMPTY");
    }

    #[test]
    #[serial]
    fn test_automatic_env_with_replacer() {
        std::env::set_var("BOAAUTO_SERVER_DEBUG", "true");

        let mut cfg = toml_config("[server]\ndebug = false\n");
        cfg.set_env_prefix("boaauto");
        cfg.set_env_key_replacer([(".", "_")]);
        assert!(!cfg.get_bool("server.debug"));

        cfg.automatic_env();
        assert_eq!(cfg.get("server.debug"), Some(json!(true)));

        std::env::remove_var("BOAAUTO_SERVER_DEBUG");
    }
}
