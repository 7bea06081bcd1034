//! What a hook sees of the current invocation.

use std::any::Any;
use std::collections::HashMap;
use std::time::Duration;

use clap::parser::ValueSource;
use clap::ArgMatches;

use super::command::{Command, Lineage};

/// The resolved command, its positional arguments and parsed flag values.
///
/// Flag values are read with the Rust type of the flag's [`FlagKind`](crate::FlagKind).
/// Lookups with an unknown name or a mismatched type return `None` (or an
/// empty collection) rather than panicking.
///
/// ```rust
/// use boa::CommandBuilder;
///
/// let cmd = CommandBuilder::new("serve")
///     .with_int_p_flag("port", 'p', 8080, "port to listen on")
///     .with_run(|inv| {
///         assert_eq!(inv.get_one::<i64>("port"), Some(9000));
///         assert!(inv.flag_changed("port"));
///     })
///     .build();
///
/// cmd.execute_with(["-p", "9000"], &mut std::io::sink(), &mut std::io::sink())
///     .unwrap();
/// ```
pub struct Invocation<'a> {
    lineage: Lineage<'a>,
    matches: &'a ArgMatches,
    args: Vec<String>,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(lineage: Lineage<'a>, matches: &'a ArgMatches, args: Vec<String>) -> Self {
        Self {
            lineage,
            matches,
            args,
        }
    }

    /// The command being executed.
    pub fn command(&self) -> &'a Command {
        self.lineage.command()
    }

    pub fn lineage(&self) -> &Lineage<'a> {
        &self.lineage
    }

    /// Names from the root to the executed command, joined by spaces.
    pub fn command_path(&self) -> String {
        self.lineage.command_path()
    }

    /// Positional arguments, flags removed.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The raw clap matches of the executed command.
    pub fn matches(&self) -> &'a ArgMatches {
        self.matches
    }

    /// The value of a single-valued flag.
    pub fn get_one<T>(&self, name: &str) -> Option<T>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.matches.try_get_one::<T>(name).ok().flatten().cloned()
    }

    /// All values of a slice flag, in command-line order.
    pub fn get_many<T>(&self, name: &str) -> Vec<T>
    where
        T: Any + Clone + Send + Sync + 'static,
    {
        self.matches
            .try_get_many::<T>(name)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }

    /// The entries of a map flag. Later entries win on repeated keys.
    pub fn get_map<V>(&self, name: &str) -> HashMap<String, V>
    where
        V: Any + Clone + Send + Sync + 'static,
    {
        self.get_many::<(String, V)>(name).into_iter().collect()
    }

    /// A boolean flag; `false` when unknown.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get_one::<bool>(name).unwrap_or(false)
    }

    /// A string flag; empty when unknown.
    pub fn get_string(&self, name: &str) -> String {
        self.get_one::<String>(name).unwrap_or_default()
    }

    /// How many times a count flag was given.
    pub fn get_count(&self, name: &str) -> u8 {
        self.get_one::<u8>(name).unwrap_or(0)
    }

    pub fn get_duration(&self, name: &str) -> Option<Duration> {
        self.get_one::<Duration>(name)
    }

    /// True if the flag was set on the command line rather than defaulted.
    pub fn flag_changed(&self, name: &str) -> bool {
        changed(self.matches, name)
    }
}

/// True if `name` is a known argument given on the command line.
pub(crate) fn changed(matches: &ArgMatches, name: &str) -> bool {
    matches.try_contains_id(name).unwrap_or(false)
        && matches.value_source(name) == Some(ValueSource::CommandLine)
}

impl std::fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("command_path", &self.command_path())
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandBuilder, Flag, FlagKind};

    fn parse(cmd: &Command, argv: &[&str]) -> ArgMatches {
        let mut app = clap::Command::new(cmd.name().to_string()).no_binary_name(true);
        for flag in cmd.flags() {
            app = app.arg(flag.to_arg(false));
        }
        app.try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_typed_getters() {
        let cmd = CommandBuilder::new("c")
            .with_string_flag("name", "bob", "")
            .with_count_p_flag("verbose", 'v', "")
            .with_duration_flag("wait", Duration::from_secs(1), "")
            .with_string_slice_flag("tag", &[], "")
            .build();
        let matches = parse(&cmd, &["-vv", "--tag", "a,b", "--tag=c", "--wait", "2m"]);
        let inv = Invocation::new(Lineage::new(&cmd), &matches, Vec::new());

        assert_eq!(inv.get_string("name"), "bob");
        assert!(!inv.flag_changed("name"));
        assert_eq!(inv.get_count("verbose"), 2);
        assert_eq!(inv.get_duration("wait"), Some(Duration::from_secs(120)));
        assert_eq!(inv.get_many::<String>("tag"), vec!["a", "b", "c"]);
        assert!(inv.flag_changed("tag"));
    }

    #[test]
    fn test_map_flag() {
        let cmd = CommandBuilder::new("c")
            .with_flag(Flag::new("label", FlagKind::StringToString, &[] as &[(&str, &str)], ""))
            .build();
        let matches = parse(&cmd, &["--label", "a=1,b=2", "--label", "a=3"]);
        let inv = Invocation::new(Lineage::new(&cmd), &matches, Vec::new());

        let labels = inv.get_map::<String>("label");
        assert_eq!(labels.get("a").map(String::as_str), Some("3"));
        assert_eq!(labels.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_unknown_and_mismatched_lookups() {
        let cmd = CommandBuilder::new("c").with_bool_flag("dry-run", false, "").build();
        let matches = parse(&cmd, &["--dry-run"]);
        let inv = Invocation::new(Lineage::new(&cmd), &matches, Vec::new());

        assert!(inv.get_bool("dry-run"));
        assert_eq!(inv.get_one::<String>("dry-run"), None);
        assert_eq!(inv.get_one::<bool>("missing"), None);
        assert!(!inv.flag_changed("missing"));
    }
}
