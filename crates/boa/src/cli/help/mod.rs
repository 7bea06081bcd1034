//! Usage and help rendering.
//!
//! Templates are rendered with MiniJinja against a [`UsageView`] and aligned
//! by an elastic tab-stop writer: usage output uses tab stops of 8, help
//! output tab stops of 3. Columns are separated by a literal tab in the
//! template, as in the "Options:" and "Profiles:" sections of
//! [`OPTIONS_TEMPLATE`].

mod data;
mod render;

pub use data::{usage_view, CommandEntry, UsageView};
pub use render::{render_help, render_usage, render_version};
pub(crate) use render::{help, usage};

/// The default usage template: usage line, aliases, examples, subcommands,
/// local and global flags, help topics.
pub const USAGE_TEMPLATE: &str = include_str!("templates/usage.txt");

/// The default help template: the long (or short) description followed by
/// the usage text.
pub const HELP_TEMPLATE: &str = include_str!("templates/help.txt");

/// The default version template.
pub const VERSION_TEMPLATE: &str = include_str!("templates/version.txt");

/// The usage template extended with the "Options:" and "Profiles:" sections
/// and a ` [options]` suffix on the usage line.
pub const OPTIONS_TEMPLATE: &str = include_str!("templates/options.txt");
