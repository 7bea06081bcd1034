//! CommandBuilder for constructing [`Command`] trees.
//!
//! Every method sets one field of the command under construction (or
//! registers one flag) and returns the builder, so a whole command tree reads
//! as one expression:
//!
//! ```rust
//! use boa::{ArgsRule, CommandBuilder};
//!
//! let root = CommandBuilder::new("app")
//!     .with_short_description("An example application")
//!     .with_bool_p_persistent_flag("verbose", 'v', false, "verbose output")
//!     .with_sub_commands([
//!         CommandBuilder::new("get <key>")
//!             .with_short_description("Print a value")
//!             .with_args(ArgsRule::ExactArgs(1))
//!             .with_run(|inv| println!("{}", inv.args()[0]))
//!             .build(),
//!     ])
//!     .build();
//!
//! assert_eq!(root.commands()[0].name(), "get");
//! ```
//!
//! The builder is split into submodules by concern:
//! - [`flags`]: typed flag registration, flag marking and flag groups
//! - [`options`]: options, profiles and the options template
//! - [`rendering`]: usage, help and version templates and functions

mod flags;
mod options;
mod rendering;

use std::collections::BTreeMap;
use std::rc::Rc;

use super::args::ArgsRule;
use super::command::{Command, Group};
use super::context::Invocation;

/// Builder for a [`Command`].
///
/// The builder owns the command until [`build`](Self::build) hands it out.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    pub(crate) cmd: Command,
}

impl CommandBuilder {
    /// Starts a command from its use line. The first word is the name:
    /// `"get <key>"` builds a command named `get`.
    pub fn new(use_line: impl Into<String>) -> Self {
        Self {
            cmd: Command {
                use_line: use_line.into(),
                ..Command::default()
            },
        }
    }

    /// Reopens an existing command for modification.
    pub fn from_command(cmd: Command) -> Self {
        Self { cmd }
    }

    /// Seals and returns the command.
    ///
    /// Profile references that match no option are logged as warnings; use
    /// [`validate_profiles`](crate::validate_profiles) to turn them into errors.
    pub fn build(self) -> Command {
        self.warn_unresolved_profiles();
        self.cmd
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmd.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Words for which this command is suggested when mistyped as a
    /// subcommand, in addition to close matches of its name.
    pub fn suggest_for<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmd.suggest_for = words.into_iter().map(Into::into).collect();
        self
    }

    /// One-line description shown in subcommand lists.
    pub fn with_short_description(mut self, short: impl Into<String>) -> Self {
        self.cmd.short = short.into();
        self
    }

    /// Description shown at the top of the command's help.
    pub fn with_long_description(mut self, long: impl Into<String>) -> Self {
        self.cmd.long = long.into();
        self
    }

    /// Places the command under a group of its parent's help output.
    pub fn with_group_id(mut self, id: impl Into<String>) -> Self {
        self.cmd.group_id = id.into();
        self
    }

    /// Declares the subcommand groups this command lists, in order.
    pub fn with_groups(mut self, groups: impl IntoIterator<Item = Group>) -> Self {
        self.cmd.groups.extend(groups);
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.cmd.example = example.into();
        self
    }

    /// Replaces the annotations.
    pub fn with_annotations(mut self, annotations: BTreeMap<String, String>) -> Self {
        self.cmd.annotations = annotations;
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.cmd.annotations.insert(key.into(), value.into());
        self
    }

    /// Sets the version and enables the `--version` flag.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.cmd.version = version.into();
        self
    }

    /// Marks the command deprecated; running it prints `message` first.
    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.cmd.deprecated = Some(message.into());
        self
    }

    /// Accepted positional arguments. An entry may carry a description after
    /// a tab (`"json\tJSON output"`); only the part before the tab is matched.
    pub fn with_valid_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmd.valid_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Positional arguments accepted by [`ArgsRule::OnlyValidArgs`] but not
    /// suggested.
    pub fn with_arg_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cmd.arg_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_args(mut self, rule: ArgsRule) -> Self {
        self.cmd.args = Some(rule);
        self
    }

    // Lifecycle hooks. Execution order: persistent pre-run, pre-run, run,
    // post-run, persistent post-run.

    /// Runs before the pre-run of this command and of every descendant that
    /// has no persistent pre-run of its own.
    pub fn with_persistent_pre_run<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) + 'static,
    {
        self.cmd.hooks.persistent_pre_run.set_plain(Rc::new(f));
        self
    }

    pub fn with_persistent_pre_run_e<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + 'static,
    {
        self.cmd.hooks.persistent_pre_run.set_fallible(Rc::new(f));
        self
    }

    pub fn with_pre_run<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) + 'static,
    {
        self.cmd.hooks.pre_run.set_plain(Rc::new(f));
        self
    }

    pub fn with_pre_run_e<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + 'static,
    {
        self.cmd.hooks.pre_run.set_fallible(Rc::new(f));
        self
    }

    /// The command's work. A command without a run function only shows help.
    pub fn with_run<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) + 'static,
    {
        self.cmd.hooks.run.set_plain(Rc::new(f));
        self
    }

    pub fn with_run_e<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + 'static,
    {
        self.cmd.hooks.run.set_fallible(Rc::new(f));
        self
    }

    pub fn with_post_run<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) + 'static,
    {
        self.cmd.hooks.post_run.set_plain(Rc::new(f));
        self
    }

    pub fn with_post_run_e<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + 'static,
    {
        self.cmd.hooks.post_run.set_fallible(Rc::new(f));
        self
    }

    pub fn with_persistent_post_run<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) + 'static,
    {
        self.cmd.hooks.persistent_post_run.set_plain(Rc::new(f));
        self
    }

    pub fn with_persistent_post_run_e<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + 'static,
    {
        self.cmd.hooks.persistent_post_run.set_fallible(Rc::new(f));
        self
    }

    /// A run function that does nothing, making the command runnable.
    pub fn with_no_op(self) -> Self {
        self.with_run(|_| {})
    }

    /// Hides the command from subcommand lists and suggestions.
    pub fn hidden(mut self) -> Self {
        self.cmd.hidden = true;
        self
    }

    /// Suppresses the `Error: ...` line when execution fails.
    pub fn silence_errors(mut self) -> Self {
        self.cmd.silence_errors = true;
        self
    }

    /// Suppresses the usage text printed after an error.
    pub fn silence_usage(mut self) -> Self {
        self.cmd.silence_usage = true;
        self
    }

    /// Passes every argument, flags included, through as positional.
    pub fn disable_flag_parsing(mut self) -> Self {
        self.cmd.disable_flag_parsing = true;
        self
    }

    /// Keeps `[flags]` off the usage line.
    pub fn disable_flags_in_use_line(mut self) -> Self {
        self.cmd.disable_flags_in_use_line = true;
        self
    }

    pub fn disable_suggestions(mut self) -> Self {
        self.cmd.disable_suggestions = true;
        self
    }

    /// Maximum edit distance for subcommand suggestions (default 2).
    pub fn with_suggestions_minimum_distance(mut self, distance: usize) -> Self {
        self.cmd.suggestions_minimum_distance = distance;
        self
    }

    /// Appends child commands.
    pub fn with_sub_commands(mut self, cmds: impl IntoIterator<Item = Command>) -> Self {
        self.cmd.commands.extend(cmds);
        self
    }
}

impl Command {
    /// Reopens a copy of this command for modification.
    pub fn to_builder(&self) -> CommandBuilder {
        CommandBuilder::from_command(self.clone())
    }
}
