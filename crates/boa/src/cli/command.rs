//! The sealed command model and its ancestry view.
//!
//! A [`Command`] is produced by [`CommandBuilder::build`](crate::CommandBuilder::build)
//! and only read afterwards. Behaviour that depends on a command's position
//! in the tree (its command path, the persistent flags it inherits, the
//! usage/help functions and templates it falls back to) lives on
//! [`Lineage`], the chain from the root down to one command.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use serde::Serialize;

use super::args::ArgsRule;
use super::flag::{Flag, FlagKind};
use super::help::{HELP_TEMPLATE, USAGE_TEMPLATE, VERSION_TEMPLATE};
use super::hooks::Hooks;
use super::options::{ArgOption, Profile};
use crate::error::Error;

/// Name of the help subcommand a root with children provides.
pub(crate) const HELP_COMMAND: &str = "help";

const MIN_NAME_PADDING: usize = 11;

/// Renders usage text for the command at the end of the lineage.
///
/// Receives the output and error writers; errors are also returned.
pub type UsageFn = Rc<dyn Fn(&Lineage<'_>, &mut dyn Write, &mut dyn Write) -> Result<(), Error>>;

/// Renders help for the command at the end of the lineage, given the
/// positional arguments of the invocation.
pub type HelpFn = Rc<dyn Fn(&Lineage<'_>, &[String], &mut dyn Write, &mut dyn Write)>;

/// A titled group of subcommands in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub id: String,
    pub title: String,
}

impl Group {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Constraint over a set of flags, checked after the pre-run hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FlagGroup {
    RequiredTogether(Vec<String>),
    OneRequired(Vec<String>),
    MutuallyExclusive(Vec<String>),
}

/// A command in a command tree.
#[derive(Clone, Default)]
pub struct Command {
    pub(crate) use_line: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) suggest_for: Vec<String>,
    pub(crate) short: String,
    pub(crate) long: String,
    pub(crate) example: String,
    pub(crate) group_id: String,
    pub(crate) groups: Vec<Group>,
    pub(crate) valid_args: Vec<String>,
    pub(crate) arg_aliases: Vec<String>,
    pub(crate) args: Option<ArgsRule>,
    pub(crate) deprecated: Option<String>,
    pub(crate) annotations: BTreeMap<String, String>,
    pub(crate) version: String,
    pub(crate) hooks: Hooks,
    pub(crate) hidden: bool,
    pub(crate) silence_errors: bool,
    pub(crate) silence_usage: bool,
    pub(crate) disable_flag_parsing: bool,
    pub(crate) disable_flags_in_use_line: bool,
    pub(crate) disable_suggestions: bool,
    pub(crate) suggestions_minimum_distance: usize,
    pub(crate) flags: Vec<Flag>,
    pub(crate) persistent_flags: Vec<Flag>,
    pub(crate) flag_groups: Vec<FlagGroup>,
    pub(crate) commands: Vec<Command>,
    pub(crate) usage_template: Option<String>,
    pub(crate) help_template: Option<String>,
    pub(crate) version_template: Option<String>,
    pub(crate) usage_fn: Option<UsageFn>,
    pub(crate) help_fn: Option<HelpFn>,
    pub(crate) options: Vec<ArgOption>,
    pub(crate) profiles: Vec<Profile>,
}

impl Command {
    /// The first word of the use line.
    pub fn name(&self) -> &str {
        self.use_line.split_whitespace().next().unwrap_or_default()
    }

    /// The use line as given to the builder.
    pub fn use_line(&self) -> &str {
        &self.use_line
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn valid_args(&self) -> &[String] {
        &self.valid_args
    }

    pub fn arg_aliases(&self) -> &[String] {
        &self.arg_aliases
    }

    pub fn args_rule(&self) -> Option<&ArgsRule> {
        self.args.as_ref()
    }

    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn deprecated(&self) -> Option<&str> {
        self.deprecated.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Child commands in insertion order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Declared options in insertion order.
    pub fn options(&self) -> &[ArgOption] {
        &self.options
    }

    /// Declared profiles in insertion order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    pub fn has_profiles(&self) -> bool {
        !self.profiles.is_empty()
    }

    /// Flags defined on this command only, excluding persistent ones.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Persistent flags defined on this command.
    pub fn persistent_flags(&self) -> &[Flag] {
        &self.persistent_flags
    }

    /// Looks up a flag defined on this command, local or persistent.
    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags
            .iter()
            .chain(&self.persistent_flags)
            .find(|f| f.name == name)
    }

    pub fn is_runnable(&self) -> bool {
        self.hooks.run.is_set()
    }

    pub fn has_sub_commands(&self) -> bool {
        !self.commands.is_empty()
    }

    pub fn has_available_sub_commands(&self) -> bool {
        self.commands.iter().any(Command::is_available_command)
    }

    /// Not hidden, not deprecated, and either runnable or a parent of
    /// available commands.
    pub fn is_available_command(&self) -> bool {
        if self.deprecated.is_some() || self.hidden {
            return false;
        }
        self.is_runnable() || self.has_available_sub_commands()
    }

    /// A command with no behaviour of its own, documenting a topic.
    pub fn is_additional_help_topic(&self) -> bool {
        if self.is_runnable() || self.deprecated.is_some() || self.hidden {
            return false;
        }
        self.commands.iter().all(Command::is_additional_help_topic)
    }

    /// True if `name` is this command's name or one of its aliases.
    pub fn has_name_or_alias(&self, name: &str) -> bool {
        self.name() == name || self.aliases.iter().any(|a| a == name)
    }

    /// Finds a direct child by name or alias.
    pub fn find_child(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.has_name_or_alias(name))
    }

    /// Resolves a path of subcommand names into a [`Lineage`].
    ///
    /// ```rust
    /// use boa::CommandBuilder;
    ///
    /// let root = CommandBuilder::new("app")
    ///     .with_sub_commands([CommandBuilder::new("serve").with_no_op().build()])
    ///     .build();
    /// assert_eq!(root.find(&["serve"]).unwrap().command_path(), "app serve");
    /// assert!(root.find(&["nope"]).is_none());
    /// ```
    pub fn find(&self, path: &[&str]) -> Option<Lineage<'_>> {
        let mut lineage = Lineage::new(self);
        for name in path {
            let child = lineage.command().find_child(name)?;
            lineage = lineage.child(child);
        }
        Some(lineage)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("use_line", &self.use_line)
            .field("aliases", &self.aliases)
            .field("short", &self.short)
            .field("args", &self.args)
            .field("hooks", &self.hooks)
            .field("flags", &self.flags)
            .field("persistent_flags", &self.persistent_flags)
            .field("options", &self.options)
            .field("profiles", &self.profiles)
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}

/// The chain of commands from the root down to one command.
///
/// ```rust
/// use boa::{CommandBuilder, Lineage};
///
/// let root = CommandBuilder::new("app")
///     .with_string_persistent_flag("config", "", "config file")
///     .with_sub_commands([CommandBuilder::new("serve").with_no_op().build()])
///     .build();
///
/// let serve = Lineage::new(&root).child(&root.commands()[0]);
/// assert_eq!(serve.command_path(), "app serve");
/// assert_eq!(serve.inherited_flags()[0].name(), "config");
/// ```
#[derive(Clone)]
pub struct Lineage<'a> {
    chain: Vec<&'a Command>,
}

impl<'a> Lineage<'a> {
    /// A lineage holding only `root`.
    pub fn new(root: &'a Command) -> Self {
        Self { chain: vec![root] }
    }

    /// Extends the lineage by one child of the current command.
    pub fn child(&self, child: &'a Command) -> Self {
        let mut chain = self.chain.clone();
        chain.push(child);
        Self { chain }
    }

    /// The command at the end of the chain.
    pub fn command(&self) -> &'a Command {
        self.chain[self.chain.len() - 1]
    }

    pub fn root(&self) -> &'a Command {
        self.chain[0]
    }

    pub fn parent(&self) -> Option<Lineage<'a>> {
        if self.has_parent() {
            Some(Self {
                chain: self.chain[..self.chain.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    pub fn has_parent(&self) -> bool {
        self.chain.len() > 1
    }

    /// Ancestors and self, from the command up to the root.
    pub(crate) fn upwards(&self) -> impl Iterator<Item = &'a Command> + '_ {
        self.chain.iter().rev().copied()
    }

    /// Names from the root to this command, joined by spaces.
    pub fn command_path(&self) -> String {
        self.chain
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The full use line: parent path, use, and `[flags]` when flags exist.
    pub fn use_line(&self) -> String {
        let cmd = self.command();
        let mut line = match self.parent() {
            Some(parent) => format!("{} {}", parent.command_path(), cmd.use_line),
            None => cmd.use_line.clone(),
        };
        if cmd.disable_flags_in_use_line {
            return line;
        }
        if self.has_available_flags() && !line.contains("[flags]") {
            line.push_str(" [flags]");
        }
        line
    }

    /// The built-in `--help` flag, unless the command defines its own.
    pub(crate) fn help_flag(&self) -> Option<Flag> {
        if self.find_flag("help").is_some() {
            return None;
        }
        let name = self.command().name();
        let usage = if name.is_empty() {
            "help for this command".to_string()
        } else {
            format!("help for {name}")
        };
        let mut flag = Flag::new("help", FlagKind::Bool, false, usage);
        if !self.shorthand_taken('h') {
            flag.shorthand = Some('h');
        }
        Some(flag)
    }

    /// The built-in `--version` flag when the command has a version.
    pub(crate) fn version_flag(&self) -> Option<Flag> {
        let cmd = self.command();
        if cmd.version.is_empty() || self.find_flag("version").is_some() {
            return None;
        }
        let mut flag = Flag::new(
            "version",
            FlagKind::Bool,
            false,
            format!("version for {}", cmd.name()),
        );
        if !self.shorthand_taken('v') {
            flag.shorthand = Some('v');
        }
        Some(flag)
    }

    fn shorthand_taken(&self, c: char) -> bool {
        self.declared_flags().any(|f| f.shorthand == Some(c))
    }

    // User-declared flags visible to the command, without the built-ins.
    fn declared_flags(&self) -> impl Iterator<Item = &'a Flag> + '_ {
        let cmd = self.command();
        cmd.flags
            .iter()
            .chain(&cmd.persistent_flags)
            .chain(self.inherited_flags())
    }

    /// Flags defined on the command itself, persistent ones included, plus
    /// the built-in help and version flags.
    pub fn local_flags(&self) -> Vec<Flag> {
        let cmd = self.command();
        let mut flags: Vec<Flag> = cmd
            .flags
            .iter()
            .chain(&cmd.persistent_flags)
            .cloned()
            .collect();
        flags.extend(self.help_flag());
        flags.extend(self.version_flag());
        flags
    }

    /// Persistent flags of ancestors not shadowed by a local flag. The
    /// nearest ancestor wins when names repeat.
    pub fn inherited_flags(&self) -> Vec<&'a Flag> {
        let cmd = self.command();
        let mut seen: Vec<&str> = cmd
            .flags
            .iter()
            .chain(&cmd.persistent_flags)
            .map(|f| f.name.as_str())
            .collect();
        let mut inherited = Vec::new();
        for ancestor in self.upwards().skip(1) {
            for flag in &ancestor.persistent_flags {
                if !seen.contains(&flag.name.as_str()) {
                    seen.push(flag.name.as_str());
                    inherited.push(flag);
                }
            }
        }
        inherited
    }

    /// Every flag the command accepts.
    pub fn all_flags(&self) -> Vec<Flag> {
        let mut flags = self.local_flags();
        flags.extend(self.inherited_flags().into_iter().cloned());
        flags
    }

    /// Finds a user-declared flag by name, local first, then inherited.
    pub fn find_flag(&self, name: &str) -> Option<&'a Flag> {
        self.declared_flags().find(|f| f.name == name)
    }

    pub fn has_available_flags(&self) -> bool {
        self.all_flags().iter().any(|f| !f.hidden)
    }

    pub fn has_available_local_flags(&self) -> bool {
        self.local_flags().iter().any(|f| !f.hidden)
    }

    pub fn has_available_inherited_flags(&self) -> bool {
        self.inherited_flags().iter().any(|f| !f.hidden)
    }

    /// The nearest usage template, or the default one.
    pub fn usage_template(&self) -> &'a str {
        self.upwards()
            .find_map(|c| c.usage_template.as_deref())
            .unwrap_or(USAGE_TEMPLATE)
    }

    /// The nearest help template, or the default one.
    pub fn help_template(&self) -> &'a str {
        self.upwards()
            .find_map(|c| c.help_template.as_deref())
            .unwrap_or(HELP_TEMPLATE)
    }

    /// The nearest version template, or the default one.
    pub fn version_template(&self) -> &'a str {
        self.upwards()
            .find_map(|c| c.version_template.as_deref())
            .unwrap_or(VERSION_TEMPLATE)
    }

    pub(crate) fn usage_fn(&self) -> Option<UsageFn> {
        self.upwards().find_map(|c| c.usage_fn.clone())
    }

    pub(crate) fn help_fn(&self) -> Option<HelpFn> {
        self.upwards().find_map(|c| c.help_fn.clone())
    }

    /// Whether the root of this tree offers the `help` subcommand.
    pub(crate) fn lists_help_command(&self) -> bool {
        let cmd = self.command();
        !self.has_parent() && cmd.has_sub_commands() && cmd.find_child(HELP_COMMAND).is_none()
    }

    /// Width the subcommand names of this command are padded to.
    pub(crate) fn name_padding(&self) -> usize {
        let mut widest = self
            .command()
            .commands
            .iter()
            .map(|c| c.name().len())
            .max()
            .unwrap_or(0);
        if self.lists_help_command() {
            widest = widest.max(HELP_COMMAND.len());
        }
        widest.max(MIN_NAME_PADDING)
    }

    /// Width the subcommand paths of this command are padded to.
    pub(crate) fn command_path_padding(&self) -> usize {
        let base = self.command_path().len() + 1;
        let widest = self
            .command()
            .commands
            .iter()
            .map(|c| base + c.name().len())
            .max()
            .unwrap_or(0);
        widest.max(MIN_NAME_PADDING)
    }
}

impl fmt::Debug for Lineage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lineage").field(&self.command_path()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandBuilder;

    fn tree() -> Command {
        CommandBuilder::new("app")
            .with_bool_p_persistent_flag("verbose", 'v', false, "verbose output")
            .with_version("1.0.0")
            .with_sub_commands([CommandBuilder::new("serve [port]")
                .with_string_flag("host", "localhost", "bind address")
                .with_no_op()
                .build()])
            .build()
    }

    #[test]
    fn test_name_is_first_word_of_use() {
        let cmd = CommandBuilder::new("serve [port]").build();
        assert_eq!(cmd.name(), "serve");
    }

    #[test]
    fn test_use_line_includes_parent_path_and_flags() {
        let root = tree();
        let serve = root.find(&["serve"]).unwrap();
        assert_eq!(serve.use_line(), "app serve [port] [flags]");
    }

    #[test]
    fn test_use_line_without_flags_marker() {
        let cmd = CommandBuilder::new("plain").disable_flags_in_use_line().build();
        assert_eq!(Lineage::new(&cmd).use_line(), "plain");
    }

    #[test]
    fn test_inherited_flags() {
        let root = tree();
        let serve = root.find(&["serve"]).unwrap();
        let names: Vec<_> = serve.inherited_flags().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["verbose"]);
        assert!(serve.find_flag("verbose").is_some());
        assert!(Lineage::new(&root).inherited_flags().is_empty());
    }

    #[test]
    fn test_version_flag_yields_shorthand_when_taken() {
        let root = tree();
        let flag = Lineage::new(&root).version_flag().unwrap();
        assert_eq!(flag.short(), None);
        assert_eq!(flag.usage(), "version for app");
    }

    #[test]
    fn test_help_flag_usage() {
        let root = tree();
        let flag = root.find(&["serve"]).unwrap().help_flag().unwrap();
        assert_eq!(flag.short(), Some('h'));
        assert_eq!(flag.usage(), "help for serve");
    }

    #[test]
    fn test_availability() {
        let root = tree();
        assert!(root.commands()[0].is_available_command());
        let hidden = CommandBuilder::new("x").with_no_op().hidden().build();
        assert!(!hidden.is_available_command());
        let topic = CommandBuilder::new("topic").with_short_description("about").build();
        assert!(topic.is_additional_help_topic());
        assert!(!topic.is_available_command());
    }

    #[test]
    fn test_name_padding_minimum() {
        let root = tree();
        assert_eq!(Lineage::new(&root).name_padding(), 11);
    }

    #[test]
    fn test_templates_inherit_from_parent() {
        let root = CommandBuilder::new("app")
            .with_usage_template("custom")
            .with_sub_commands([CommandBuilder::new("child").build()])
            .build();
        assert_eq!(root.find(&["child"]).unwrap().usage_template(), "custom");
        assert_eq!(Lineage::new(&root).help_template(), HELP_TEMPLATE);
    }
}
