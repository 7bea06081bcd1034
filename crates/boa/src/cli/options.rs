//! Positional-argument options and profiles.
//!
//! An [`ArgOption`] documents one positional-argument choice of a command; a
//! [`Profile`] is a shorthand that bundles several options under its own
//! aliases. Both exist for help output (the "Options:" and "Profiles:"
//! sections) and, through
//! [`with_valid_args_from_options`](crate::CommandBuilder::with_valid_args_from_options),
//! for argument validation.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::Error;

use super::command::Command;

/// A documented positional-argument choice.
///
/// The first alias is the canonical name.
///
/// ```rust
/// use boa::ArgOption;
///
/// let opt = ArgOption::new(["option1", "opt1"], "opt1 description");
/// assert_eq!(opt.name(), Some("option1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgOption {
    /// Aliases in display order; the first one is canonical.
    pub args: Vec<String>,
    /// Description shown in the "Options:" section.
    pub desc: String,
}

impl ArgOption {
    /// Creates an option from its aliases and description.
    pub fn new<I, S>(args: I, desc: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            desc: desc.into(),
        }
    }

    /// Returns the canonical alias.
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Returns true if `arg` is one of this option's aliases.
    pub fn matches(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

/// A named bundle of option references.
///
/// ```rust
/// use boa::Profile;
///
/// let profile = Profile::new(["profile1", "prof1"], ["opt1", "option2"], "prof1 description");
/// assert_eq!(profile.opts, vec!["opt1", "option2"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Aliases in display order; the first one is canonical.
    pub args: Vec<String>,
    /// Referenced option identifiers, in declared order.
    pub opts: Vec<String>,
    /// Description shown in the "Profiles:" section.
    pub desc: String,
}

impl Profile {
    /// Creates a profile from its aliases, the options it bundles and a description.
    pub fn new<A, SA, O, SO>(args: A, opts: O, desc: impl Into<String>) -> Self
    where
        A: IntoIterator<Item = SA>,
        SA: Into<String>,
        O: IntoIterator<Item = SO>,
        SO: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            opts: opts.into_iter().map(Into::into).collect(),
            desc: desc.into(),
        }
    }

    /// Returns the canonical alias.
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Returns the option references of `profile` that match no option alias.
pub(crate) fn unresolved_refs<'a>(opts: &[ArgOption], profile: &'a Profile) -> Vec<&'a str> {
    let known: HashSet<&str> = opts
        .iter()
        .flat_map(|o| o.args.iter().map(String::as_str))
        .collect();
    profile
        .opts
        .iter()
        .map(String::as_str)
        .filter(|r| !known.contains(r))
        .collect()
}

/// Validates that every profile reference resolves to a declared option.
///
/// Building a command never fails on unresolved references (they only
/// produce a warning log); call this from a `#[test]` to catch them in CI.
///
/// # Example
///
/// ```rust
/// use boa::{validate_profiles, ArgOption, CommandBuilder, Profile};
///
/// let cmd = CommandBuilder::new("deploy")
///     .with_options([ArgOption::new(["web"], "web tier")])
///     .with_profiles([Profile::new(["all"], ["web", "db"], "everything")])
///     .build();
///
/// let err = validate_profiles(&cmd).unwrap_err();
/// assert!(err.to_string().contains("\"db\""));
/// ```
pub fn validate_profiles(cmd: &Command) -> Result<(), Error> {
    for profile in cmd.profiles() {
        let missing = unresolved_refs(cmd.options(), profile);
        if !missing.is_empty() {
            return Err(Error::UnresolvedProfile {
                profile: profile.name().unwrap_or_default().to_string(),
                missing: missing.into_iter().map(String::from).collect(),
            });
        }
    }
    for child in cmd.commands() {
        validate_profiles(child)?;
    }
    Ok(())
}
