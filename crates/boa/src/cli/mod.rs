//! Commands, flags and their execution.
//!
//! A command tree is assembled with [`CommandBuilder`] and sealed into an
//! immutable [`Command`]. Executing it follows a linear pipeline:
//!
//! ```text
//! clap parsing → target resolution → help/version → args rule → hooks → error report
//! ```
//!
//! 1. Parsing: the tree is translated into a clap command. Persistent flags
//!    become global arguments; clap's own help and version handling is
//!    disabled so that help goes through the usage/help templates.
//!
//! 2. Resolution: the executed command is found by walking the subcommand
//!    matches. A leftover positional argument on the root is reported as an
//!    unknown command, with suggestions.
//!
//! 3. Hooks: the nearest persistent pre-run hook, the pre-run hook, required
//!    flag and flag group checks, run, post-run and the nearest persistent
//!    post-run hook. Each hook has a fallible variant whose error stops the
//!    chain.
//!
//! 4. Reporting: a failure prints `Error: <message>` and the usage of the
//!    failing command on the error writer, unless silenced, and is returned.
//!
//! Help output is described in [`help`](self::help): the "Options:" and
//! "Profiles:" sections document positional arguments declared with
//! [`ArgOption`] and [`Profile`].

mod args;
mod builder;
mod command;
mod context;
mod execute;
mod flag;
pub mod help;
mod hooks;
mod options;
mod suggest;

pub use args::{ArgsFn, ArgsRule};
pub use builder::CommandBuilder;
pub use command::{Command, Group, HelpFn, Lineage, UsageFn};
pub use context::Invocation;
pub use flag::{format_duration, parse_duration, DefaultValue, Flag, FlagDefault, FlagKind};
pub(crate) use flag::parse_bool;
pub use help::{
    render_help, render_usage, render_version, usage_view, CommandEntry, UsageView,
    HELP_TEMPLATE, OPTIONS_TEMPLATE, USAGE_TEMPLATE, VERSION_TEMPLATE,
};
pub use hooks::{HookFn, HookResultFn};
pub use options::{validate_profiles, ArgOption, Profile};
pub use suggest::suggestions_for;
