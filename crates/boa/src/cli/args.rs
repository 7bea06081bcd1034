//! Positional argument rules.

use std::fmt;
use std::rc::Rc;

use super::command::{Command, Lineage};
use super::suggest::suggestions_message;
use crate::error::Error;

/// Custom positional argument check.
pub type ArgsFn = Rc<dyn Fn(&Command, &[String]) -> anyhow::Result<()>>;

/// Validation applied to a command's positional arguments.
///
/// ```rust
/// use boa::{ArgsRule, CommandBuilder};
///
/// let cmd = CommandBuilder::new("get")
///     .with_args(ArgsRule::RangeArgs(1, 2))
///     .with_no_op()
///     .build();
///
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let result = cmd.execute_with(Vec::<String>::new(), &mut out, &mut err);
/// assert_eq!(
///     result.unwrap_err().to_string(),
///     "accepts between 1 and 2 arg(s), received 0"
/// );
/// ```
#[derive(Clone)]
pub enum ArgsRule {
    /// Any positional argument is an error.
    NoArgs,
    /// Anything goes.
    ArbitraryArgs,
    /// Every argument must be one of the command's valid args or arg aliases.
    OnlyValidArgs,
    MinimumNArgs(usize),
    MaximumNArgs(usize),
    ExactArgs(usize),
    /// Inclusive bounds.
    RangeArgs(usize, usize),
    /// All rules must pass, checked in order.
    MatchAll(Vec<ArgsRule>),
    Custom(ArgsFn),
}

impl ArgsRule {
    /// Wraps a custom check.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Command, &[String]) -> anyhow::Result<()> + 'static,
    {
        ArgsRule::Custom(Rc::new(f))
    }

    pub(crate) fn validate(&self, lineage: &Lineage<'_>, args: &[String]) -> Result<(), Error> {
        let cmd = lineage.command();
        match self {
            ArgsRule::NoArgs => match args.first() {
                Some(first) => Err(Error::UnknownCommand {
                    name: first.clone(),
                    path: lineage.command_path(),
                    suggestions: String::new(),
                }),
                None => Ok(()),
            },
            ArgsRule::ArbitraryArgs => Ok(()),
            ArgsRule::OnlyValidArgs => {
                if cmd.valid_args.is_empty() {
                    return Ok(());
                }
                let valid: Vec<&str> = cmd
                    .valid_args
                    .iter()
                    .map(|v| v.split('\t').next().unwrap_or(v))
                    .chain(cmd.arg_aliases.iter().map(String::as_str))
                    .collect();
                match args.iter().find(|a| !valid.contains(&a.as_str())) {
                    Some(bad) => Err(Error::InvalidArgument {
                        arg: bad.clone(),
                        path: lineage.command_path(),
                        suggestions: suggestions_message(cmd, &args[0]),
                    }),
                    None => Ok(()),
                }
            }
            ArgsRule::MinimumNArgs(n) if args.len() < *n => Err(Error::Args(format!(
                "requires at least {n} arg(s), only received {}",
                args.len()
            ))),
            ArgsRule::MaximumNArgs(n) if args.len() > *n => Err(Error::Args(format!(
                "accepts at most {n} arg(s), received {}",
                args.len()
            ))),
            ArgsRule::ExactArgs(n) if args.len() != *n => Err(Error::Args(format!(
                "accepts {n} arg(s), received {}",
                args.len()
            ))),
            ArgsRule::RangeArgs(min, max) if args.len() < *min || args.len() > *max => {
                Err(Error::Args(format!(
                    "accepts between {min} and {max} arg(s), received {}",
                    args.len()
                )))
            }
            ArgsRule::MinimumNArgs(_)
            | ArgsRule::MaximumNArgs(_)
            | ArgsRule::ExactArgs(_)
            | ArgsRule::RangeArgs(..) => Ok(()),
            ArgsRule::MatchAll(rules) => {
                for rule in rules {
                    rule.validate(lineage, args)?;
                }
                Ok(())
            }
            ArgsRule::Custom(f) => f(cmd, args).map_err(Error::Hook),
        }
    }
}

/// The check applied when a command declares no rule: the root of a tree
/// treats a leftover positional argument as a mistyped subcommand.
pub(crate) fn legacy_args(lineage: &Lineage<'_>, args: &[String]) -> Result<(), Error> {
    let cmd = lineage.command();
    if !cmd.has_sub_commands() || lineage.has_parent() {
        return Ok(());
    }
    match args.first() {
        Some(first) => Err(Error::UnknownCommand {
            name: first.clone(),
            path: lineage.command_path(),
            suggestions: suggestions_message(cmd, first),
        }),
        None => Ok(()),
    }
}

impl fmt::Debug for ArgsRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsRule::NoArgs => write!(f, "NoArgs"),
            ArgsRule::ArbitraryArgs => write!(f, "ArbitraryArgs"),
            ArgsRule::OnlyValidArgs => write!(f, "OnlyValidArgs"),
            ArgsRule::MinimumNArgs(n) => write!(f, "MinimumNArgs({n})"),
            ArgsRule::MaximumNArgs(n) => write!(f, "MaximumNArgs({n})"),
            ArgsRule::ExactArgs(n) => write!(f, "ExactArgs({n})"),
            ArgsRule::RangeArgs(min, max) => write!(f, "RangeArgs({min}, {max})"),
            ArgsRule::MatchAll(rules) => f.debug_tuple("MatchAll").field(rules).finish(),
            ArgsRule::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandBuilder;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn check(cmd: &Command, rule: ArgsRule, given: &[&str]) -> Result<(), Error> {
        rule.validate(&Lineage::new(cmd), &args(given))
    }

    #[test]
    fn test_count_rules() {
        let cmd = CommandBuilder::new("c").build();
        assert_eq!(
            check(&cmd, ArgsRule::MinimumNArgs(2), &["a"]).unwrap_err().to_string(),
            "requires at least 2 arg(s), only received 1"
        );
        assert_eq!(
            check(&cmd, ArgsRule::MaximumNArgs(1), &["a", "b"]).unwrap_err().to_string(),
            "accepts at most 1 arg(s), received 2"
        );
        assert_eq!(
            check(&cmd, ArgsRule::ExactArgs(1), &[]).unwrap_err().to_string(),
            "accepts 1 arg(s), received 0"
        );
        assert!(check(&cmd, ArgsRule::RangeArgs(1, 3), &["a", "b"]).is_ok());
    }

    #[test]
    fn test_no_args() {
        let cmd = CommandBuilder::new("c").build();
        assert_eq!(
            check(&cmd, ArgsRule::NoArgs, &["x"]).unwrap_err().to_string(),
            "unknown command \"x\" for \"c\""
        );
        assert!(check(&cmd, ArgsRule::NoArgs, &[]).is_ok());
    }

    #[test]
    fn test_only_valid_args_strips_descriptions() {
        let cmd = CommandBuilder::new("c")
            .with_valid_args(["json\tJSON output", "yaml"])
            .with_arg_aliases(["yml"])
            .build();
        assert!(check(&cmd, ArgsRule::OnlyValidArgs, &["json", "yml"]).is_ok());
        assert_eq!(
            check(&cmd, ArgsRule::OnlyValidArgs, &["xml"]).unwrap_err().to_string(),
            "invalid argument \"xml\" for \"c\""
        );
    }

    #[test]
    fn test_match_all_stops_at_first_failure() {
        let cmd = CommandBuilder::new("c").with_valid_args(["a"]).build();
        let rule = ArgsRule::MatchAll(vec![ArgsRule::ExactArgs(1), ArgsRule::OnlyValidArgs]);
        assert_eq!(
            check(&cmd, rule.clone(), &["a", "b"]).unwrap_err().to_string(),
            "accepts 1 arg(s), received 2"
        );
        assert!(check(&cmd, rule, &["a"]).is_ok());
    }

    #[test]
    fn test_custom_rule() {
        let cmd = CommandBuilder::new("c").build();
        let rule = ArgsRule::custom(|_, args| {
            if args.iter().all(|a| a.parse::<u32>().is_ok()) {
                Ok(())
            } else {
                anyhow::bail!("arguments must be numbers")
            }
        });
        assert!(check(&cmd, rule.clone(), &["1", "2"]).is_ok());
        assert_eq!(
            check(&cmd, rule, &["x"]).unwrap_err().to_string(),
            "arguments must be numbers"
        );
    }

    #[test]
    fn test_legacy_args_on_root_with_children() {
        let cmd = CommandBuilder::new("app")
            .with_sub_commands([CommandBuilder::new("list").with_no_op().build()])
            .build();
        let err = legacy_args(&Lineage::new(&cmd), &args(&["lst"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown command \"lst\" for \"app\"\n\nDid you mean this?\n\tlist\n"
        );

        let leaf = CommandBuilder::new("leaf").build();
        assert!(legacy_args(&Lineage::new(&leaf), &args(&["x"])).is_ok());
    }
}
