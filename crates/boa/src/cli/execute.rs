//! Command execution: parsing, dispatch, hooks and error reporting.
//!
//! The command tree is translated into a clap command on every execution.
//! Persistent flags become global arguments and every command gets a
//! trailing positional argument collecting its positional values, so clap
//! only ever resolves subcommands and flag values. Help, version, argument
//! rules, required flags and flag groups are handled here.

use std::error::Error as StdError;
use std::io::Write;

use clap::builder::ValueParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches, ColorChoice};

use super::args::legacy_args;
use super::command::{Command, FlagGroup, Lineage, HELP_COMMAND};
use super::context::{changed, Invocation};
use super::help::{help, render_version, usage};
use crate::error::{Error, Result};

/// Id of the positional argument holding a command's positional values.
const ARGS_ID: &str = "__boa_args";

impl Command {
    /// Executes the command tree with the process arguments, writing to
    /// stdout and stderr.
    pub fn execute(&self) -> Result<()> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        self.execute_with(args, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Executes the command tree with explicit arguments (without the binary
    /// name) and writers.
    ///
    /// On failure the error is also reported on `err` as `Error: <message>`
    /// followed by the usage of the failing command, unless silenced.
    ///
    /// ```rust
    /// use boa::CommandBuilder;
    ///
    /// let cmd = CommandBuilder::new("greet")
    ///     .with_string_flag("name", "world", "who to greet")
    ///     .with_run(|inv| println!("hello {}", inv.get_string("name")))
    ///     .build();
    ///
    /// let mut out = Vec::new();
    /// let mut err = Vec::new();
    /// let result = cmd.execute_with(["--nope"], &mut out, &mut err);
    ///
    /// assert_eq!(result.unwrap_err().to_string(), "unknown flag: --nope");
    /// assert!(String::from_utf8(err).unwrap().starts_with("Error: unknown flag: --nope\nUsage:"));
    /// ```
    pub fn execute_with<I, S>(&self, args: I, out: &mut dyn Write, err: &mut dyn Write) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let root = Lineage::new(self);

        if root.lists_help_command() && args.first().map(String::as_str) == Some(HELP_COMMAND) {
            log::debug!("{}: help command for {:?}", self.name(), &args[1..]);
            return help_command(&root, &args[1..], out, err);
        }

        let matches = match clap_command(&root).no_binary_name(true).try_get_matches_from(&args) {
            Ok(matches) => matches,
            Err(e) => {
                let target = locate(self, &args);
                return report(&target, parse_error(e), err);
            }
        };

        let (lineage, matches) = resolve(self, &matches);
        let positional: Vec<String> = matches
            .try_get_many::<String>(ARGS_ID)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        log::debug!("executing {:?} with args {:?}", lineage.command_path(), positional);

        if lineage.command().args.is_none() {
            if let Err(e) = legacy_args(&lineage, &positional) {
                if !self.silence_errors && !lineage.command().silence_errors {
                    let _ = writeln!(err, "Error: {e}");
                    let _ = writeln!(err, "Run '{} --help' for usage.", self.name());
                }
                return Err(e);
            }
        }

        match run(&lineage, matches, positional, &args, out, err) {
            Ok(()) => Ok(()),
            Err(e) => report(&lineage, e, err),
        }
    }
}

fn run(
    lineage: &Lineage<'_>,
    matches: &ArgMatches,
    args: Vec<String>,
    raw: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let cmd = lineage.command();

    if let Some(message) = &cmd.deprecated {
        writeln!(out, "Command {:?} is deprecated, {message}", cmd.name())?;
    }
    warn_deprecated_flags(lineage, matches, raw, err)?;

    if !cmd.disable_flag_parsing && changed(matches, "help") && flag_set(matches, "help") {
        help(lineage, &args, out, err);
        return Ok(());
    }
    if !cmd.version.is_empty() && flag_set(matches, "version") {
        return render_version(lineage, out);
    }
    if !cmd.is_runnable() {
        help(lineage, &args, out, err);
        return Ok(());
    }

    if let Some(rule) = &cmd.args {
        rule.validate(lineage, &args)?;
    }

    let inv = Invocation::new(lineage.clone(), matches, args);

    if let Some(hook) = lineage
        .upwards()
        .find_map(|c| c.hooks.persistent_pre_run.get())
    {
        hook.call(&inv)?;
    }
    if let Some(hook) = cmd.hooks.pre_run.get() {
        hook.call(&inv)?;
    }

    validate_required_flags(lineage, matches)?;
    validate_flag_groups(lineage, matches)?;

    if let Some(hook) = cmd.hooks.run.get() {
        hook.call(&inv)?;
    }
    if let Some(hook) = cmd.hooks.post_run.get() {
        hook.call(&inv)?;
    }
    if let Some(hook) = lineage
        .upwards()
        .find_map(|c| c.hooks.persistent_post_run.get())
    {
        hook.call(&inv)?;
    }
    Ok(())
}

/// Prints `Error: ...` and the usage of the failing command, then returns the error.
fn report(lineage: &Lineage<'_>, e: Error, err: &mut dyn Write) -> Result<()> {
    let cmd = lineage.command();
    let root = lineage.root();
    if !cmd.silence_errors && !root.silence_errors {
        let _ = writeln!(err, "Error: {e}");
    }
    if !cmd.silence_usage && !root.silence_usage {
        let mut buf = Vec::new();
        let _ = usage(lineage, &mut buf, err);
        let _ = err.write_all(&buf);
        let _ = writeln!(err);
    }
    Err(e)
}

/// The built-in `help [command...]` subcommand.
fn help_command(
    root: &Lineage<'_>,
    path: &[String],
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let names: Vec<&String> = path.iter().filter(|a| !a.starts_with('-')).collect();

    let mut lineage = root.clone();
    let mut rest = names.as_slice();
    while let Some((first, tail)) = rest.split_first() {
        match lineage.command().find_child(first) {
            Some(child) => {
                lineage = lineage.child(child);
                rest = tail;
            }
            None => break,
        }
    }

    if !rest.is_empty() && !lineage.has_parent() {
        let topics: Vec<String> = path.iter().map(|p| format!("`{p}`")).collect();
        writeln!(out, "Unknown help topic [{}]", topics.join(" "))?;
        return usage(root, out, err);
    }
    help(&lineage, &[], out, err);
    Ok(())
}

/// Builds the clap command for the command at the end of `lineage`,
/// subcommands included.
fn clap_command(lineage: &Lineage<'_>) -> clap::Command {
    let cmd = lineage.command();
    let mut app = clap::Command::new(cmd.name().to_string())
        .aliases(cmd.aliases.clone())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .color(ColorChoice::Never)
        .args_override_self(true);

    let mut positional = Arg::new(ARGS_ID)
        .num_args(0..)
        .action(ArgAction::Append)
        .value_parser(ValueParser::string());
    if cmd.disable_flag_parsing {
        positional = positional.trailing_var_arg(true).allow_hyphen_values(true);
    }
    app = app.arg(positional);

    if !cmd.disable_flag_parsing {
        for flag in &cmd.flags {
            app = app.arg(flag.to_arg(false));
        }
        for flag in lineage.help_flag().into_iter().chain(lineage.version_flag()) {
            app = app.arg(flag.to_arg(false));
        }
    }
    for flag in &cmd.persistent_flags {
        app = app.arg(flag.to_arg(true));
    }

    for child in &cmd.commands {
        app = app.subcommand(clap_command(&lineage.child(child)));
    }
    app
}

/// Walks the subcommand matches down to the executed command.
fn resolve<'a>(root: &'a Command, matches: &'a ArgMatches) -> (Lineage<'a>, &'a ArgMatches) {
    let mut lineage = Lineage::new(root);
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        match lineage.command().find_child(name) {
            Some(child) => {
                lineage = lineage.child(child);
                current = sub;
            }
            None => break,
        }
    }
    (lineage, current)
}

/// Best-effort target for errors raised before matches exist: follows
/// leading arguments that name subcommands.
fn locate<'a>(root: &'a Command, args: &[String]) -> Lineage<'a> {
    let mut lineage = Lineage::new(root);
    for arg in args.iter().filter(|a| !a.starts_with('-')) {
        match lineage.command().find_child(arg) {
            Some(child) => lineage = lineage.child(child),
            None => break,
        }
    }
    lineage
}

fn flag_set(matches: &ArgMatches, name: &str) -> bool {
    matches
        .try_get_one::<bool>(name)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

fn warn_deprecated_flags(
    lineage: &Lineage<'_>,
    matches: &ArgMatches,
    raw: &[String],
    err: &mut dyn Write,
) -> Result<()> {
    for flag in lineage.all_flags() {
        if let Some(message) = &flag.deprecated {
            if changed(matches, &flag.name) {
                writeln!(err, "Flag --{} has been deprecated, {message}", flag.name)?;
            }
        }
        if let (Some(c), Some(message)) = (flag.shorthand, &flag.shorthand_deprecated) {
            let short = format!("-{c}");
            let used = raw
                .iter()
                .any(|a| *a == short || a.starts_with(&format!("{short}=")));
            if used {
                writeln!(err, "Flag shorthand {short} has been deprecated, {message}")?;
            }
        }
    }
    Ok(())
}

fn validate_required_flags(lineage: &Lineage<'_>, matches: &ArgMatches) -> Result<()> {
    let mut missing: Vec<String> = lineage
        .all_flags()
        .into_iter()
        .filter(|f| f.required && !changed(matches, &f.name))
        .map(|f| f.name)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    missing.sort();
    Err(Error::RequiredFlags(missing))
}

fn validate_flag_groups(lineage: &Lineage<'_>, matches: &ArgMatches) -> Result<()> {
    let known = lineage.all_flags();
    let groups: Vec<&FlagGroup> = lineage
        .upwards()
        .flat_map(|c| c.flag_groups.iter())
        .filter(|group| {
            group_names(group)
                .iter()
                .all(|name| known.iter().any(|f| &f.name == name))
        })
        .collect();

    for group in groups.iter().filter(|g| matches!(g, FlagGroup::RequiredTogether(_))) {
        let names = group_names(group);
        let (set, mut unset) = partition(names, matches);
        if !set.is_empty() && !unset.is_empty() {
            unset.sort();
            return Err(Error::FlagGroup(format!(
                "if any flags in the group [{}] are set they must all be set; missing [{}]",
                names.join(" "),
                unset.join(" ")
            )));
        }
    }
    for group in groups.iter().filter(|g| matches!(g, FlagGroup::OneRequired(_))) {
        let names = group_names(group);
        let (set, _) = partition(names, matches);
        if set.is_empty() {
            return Err(Error::FlagGroup(format!(
                "at least one of the flags in the group [{}] is required",
                names.join(" ")
            )));
        }
    }
    for group in groups.iter().filter(|g| matches!(g, FlagGroup::MutuallyExclusive(_))) {
        let names = group_names(group);
        let (mut set, _) = partition(names, matches);
        if set.len() > 1 {
            set.sort();
            return Err(Error::FlagGroup(format!(
                "if any flags in the group [{}] are set none of the others can be; [{}] were all set",
                names.join(" "),
                set.join(" ")
            )));
        }
    }
    Ok(())
}

fn group_names(group: &FlagGroup) -> &[String] {
    match group {
        FlagGroup::RequiredTogether(names)
        | FlagGroup::OneRequired(names)
        | FlagGroup::MutuallyExclusive(names) => names,
    }
}

fn partition<'a>(names: &'a [String], matches: &ArgMatches) -> (Vec<&'a str>, Vec<&'a str>) {
    names
        .iter()
        .map(String::as_str)
        .partition(|name| changed(matches, name))
}

/// Maps a clap parse error to the `unknown flag` and `invalid argument` messages.
fn parse_error(e: clap::Error) -> Error {
    let context = |kind| match e.get(kind) {
        Some(ContextValue::String(s)) => Some(s.clone()),
        _ => None,
    };

    match e.kind() {
        ErrorKind::UnknownArgument => {
            if let Some(arg) = context(ContextKind::InvalidArg) {
                let token = arg.split('=').next().unwrap_or(&arg);
                if let Some(long) = token.strip_prefix("--") {
                    return Error::Parse(format!("unknown flag: --{long}"));
                }
                if let Some(c) = token.strip_prefix('-').and_then(|s| s.chars().next()) {
                    return Error::Parse(format!("unknown shorthand flag: {c:?} in {token}"));
                }
            }
        }
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => {
            if let (Some(arg), Some(value)) = (
                context(ContextKind::InvalidArg),
                context(ContextKind::InvalidValue),
            ) {
                let flag = arg
                    .split(|c: char| c == ' ' || c == '=' || c == '[')
                    .next()
                    .unwrap_or(&arg);
                let reason = e
                    .source()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| first_line(&e));
                return Error::Parse(format!(
                    "invalid argument {value:?} for {flag:?} flag: {reason}"
                ));
            }
        }
        _ => {}
    }
    Error::Parse(first_line(&e))
}

fn first_line(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
