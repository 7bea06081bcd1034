//! Usage, help and version rendering configuration.
//!
//! Templates are inherited: a command without its own template uses its
//! nearest ancestor's, falling back to the built-in defaults. The same holds
//! for usage and help functions.

use std::io::Write;
use std::rc::Rc;

use super::CommandBuilder;
use crate::cli::command::Lineage;
use crate::error::Error;

impl CommandBuilder {
    /// Sets the MiniJinja template for usage output.
    ///
    /// The template is rendered against a [`UsageView`](crate::UsageView)
    /// and aligned with tab stops of 8: separate columns with `\t`.
    pub fn with_usage_template(mut self, template: impl Into<String>) -> Self {
        self.cmd.usage_template = Some(template.into());
        self
    }

    /// Sets the MiniJinja template for help output, aligned with tab stops of 3.
    pub fn with_help_template(mut self, template: impl Into<String>) -> Self {
        self.cmd.help_template = Some(template.into());
        self
    }

    /// Sets the template printed for `--version`.
    pub fn with_version_template(mut self, template: impl Into<String>) -> Self {
        self.cmd.version_template = Some(template.into());
        self
    }

    /// Replaces usage rendering entirely.
    pub fn with_usage_func<F>(mut self, f: F) -> Self
    where
        F: Fn(&Lineage<'_>, &mut dyn Write, &mut dyn Write) -> Result<(), Error> + 'static,
    {
        self.cmd.usage_fn = Some(Rc::new(f));
        self
    }

    /// Replaces help rendering entirely.
    pub fn with_help_func<F>(mut self, f: F) -> Self
    where
        F: Fn(&Lineage<'_>, &[String], &mut dyn Write, &mut dyn Write) + 'static,
    {
        self.cmd.help_fn = Some(Rc::new(f));
        self
    }
}
