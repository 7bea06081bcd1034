//! # boa - fluent builders for clap commands and layered configuration
//!
//! `boa` assembles command-line programs from chained builder calls. Every
//! builder method sets one field or registers one flag and returns the
//! builder, so a whole command tree reads as a single expression.
//!
//! On top of the usual flags and subcommands, a command can document its
//! positional arguments as **options** and bundle them into **profiles**.
//! Both are listed in help output in their own aligned sections:
//!
//! ```rust
//! use boa::{ArgOption, CommandBuilder, Profile};
//!
//! let cmd = CommandBuilder::new("profiles")
//!     .with_options_and_template([
//!         ArgOption::new(["option1", "opt1"], "opt1 description"),
//!         ArgOption::new(["option2"], "opt2 description"),
//!     ])
//!     .with_profiles([
//!         Profile::new(["profile1", "prof1"], ["opt1", "option2"], "prof1 description"),
//!         Profile::new(["profile2"], ["option1"], "prof2 description"),
//!     ])
//!     .with_no_op()
//!     .build();
//!
//! let mut out = Vec::new();
//! cmd.execute_with(["-h"], &mut out, &mut std::io::sink()).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "\
//! Usage:
//!   profiles [flags] [options]
//!
//! Options:
//!   option1, opt1   opt1 description
//!   option2         opt2 description
//!
//! Profiles:
//!   profile1, prof1   prof1 description
//!     ↳ Options:      opt1, option2
//!   profile2          prof2 description
//!     ↳ Options:      option1
//!
//! Flags:
//!   -h, --help   help for profiles
//! "
//! );
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: [`CommandBuilder`], [`Command`], flags, argument rules,
//!   execution and help rendering.
//! - [`config`]: [`Config`], a layered key/value store, and
//!   [`ConfigBuilder`].
//!
//! Logging goes through the [`log`] facade; install a logger such as
//! `env_logger` in the binary to see it.

pub mod cli;
pub mod config;
mod error;

pub use cli::{
    format_duration, parse_duration, render_help, render_usage, render_version,
    suggestions_for, usage_view, validate_profiles, ArgOption, ArgsFn, ArgsRule, Command,
    CommandBuilder, CommandEntry, DefaultValue, Flag, FlagDefault, FlagKind, Group, HelpFn,
    HookFn, HookResultFn, Invocation, Lineage, Profile, UsageFn, UsageView, HELP_TEMPLATE,
    OPTIONS_TEMPLATE, USAGE_TEMPLATE, VERSION_TEMPLATE,
};
pub use config::{Config, ConfigBuilder, ConfigFormat};
pub use error::{ConfigError, Error, Result};
