//! Options and profiles.

use super::CommandBuilder;
use crate::cli::help::OPTIONS_TEMPLATE;
use crate::cli::options::{unresolved_refs, ArgOption, Profile};

impl CommandBuilder {
    /// Appends documented positional-argument options, in order.
    ///
    /// An option whose canonical alias is already declared is skipped with a
    /// warning, as is an option without aliases.
    pub fn with_options(mut self, opts: impl IntoIterator<Item = ArgOption>) -> Self {
        for opt in opts {
            let Some(name) = opt.name() else {
                log::warn!("{}: ignoring option without aliases", self.cmd.name());
                continue;
            };
            if self.cmd.options.iter().any(|o| o.name() == Some(name)) {
                log::warn!("{}: ignoring duplicate option {name:?}", self.cmd.name());
                continue;
            }
            self.cmd.options.push(opt);
        }
        self
    }

    /// Appends profiles, in order.
    pub fn with_profiles(mut self, profiles: impl IntoIterator<Item = Profile>) -> Self {
        self.cmd.profiles.extend(profiles);
        self
    }

    /// Uses [`OPTIONS_TEMPLATE`] for both usage and help, adding the
    /// "Options:" and "Profiles:" sections.
    pub fn with_options_template(self) -> Self {
        self.with_usage_template(OPTIONS_TEMPLATE)
            .with_help_template(OPTIONS_TEMPLATE)
    }

    /// [`with_options`](Self::with_options) followed by
    /// [`with_options_template`](Self::with_options_template).
    pub fn with_options_and_template(self, opts: impl IntoIterator<Item = ArgOption>) -> Self {
        self.with_options(opts).with_options_template()
    }

    /// Appends every alias of every option to the valid args, for use with
    /// [`ArgsRule::OnlyValidArgs`](crate::ArgsRule::OnlyValidArgs).
    pub fn with_valid_args_from_options(mut self) -> Self {
        let aliases: Vec<String> = self
            .cmd
            .options
            .iter()
            .flat_map(|o| o.args.iter().cloned())
            .collect();
        self.cmd.valid_args.extend(aliases);
        self
    }

    pub(super) fn warn_unresolved_profiles(&self) {
        for profile in &self.cmd.profiles {
            let missing = unresolved_refs(&self.cmd.options, profile);
            if !missing.is_empty() {
                log::warn!(
                    "{}: profile {:?} references undeclared option(s) {:?}",
                    self.cmd.name(),
                    profile.name().unwrap_or_default(),
                    missing
                );
            }
        }
    }
}
