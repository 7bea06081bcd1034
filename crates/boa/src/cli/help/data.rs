//! The data usage and help templates are rendered against.

use serde::Serialize;
use std::collections::BTreeMap;

use super::super::command::{Group, Lineage, HELP_COMMAND};
use super::super::flag::flag_usages;
use super::super::options::{ArgOption, Profile};

const HELP_COMMAND_SHORT: &str = "Help about any command";

/// Everything a usage/help template can reference about one command.
///
/// Field names are the template variable names, e.g. `{{ use_line }}` or
/// `{% for o in opts %}`.
#[derive(Debug, Clone, Serialize)]
pub struct UsageView {
    pub name: String,
    pub use_line: String,
    pub command_path: String,
    pub short: String,
    pub long: String,
    pub example: String,
    pub has_example: bool,
    pub aliases: Vec<String>,
    pub name_and_aliases: String,
    pub version: String,
    pub annotations: BTreeMap<String, String>,
    pub runnable: bool,
    pub has_sub_commands: bool,
    pub has_available_sub_commands: bool,
    pub has_help_sub_commands: bool,
    pub groups: Vec<Group>,
    pub all_child_commands_have_group: bool,
    pub commands: Vec<CommandEntry>,
    pub has_available_local_flags: bool,
    pub has_available_inherited_flags: bool,
    pub local_flag_usages: String,
    pub inherited_flag_usages: String,
    pub has_options: bool,
    pub opts: Vec<ArgOption>,
    pub has_profiles: bool,
    pub profiles: Vec<Profile>,
    /// The rendered usage text; filled in for help templates only.
    pub usage_string: String,
}

/// One subcommand row.
#[derive(Debug, Clone, Serialize)]
pub struct CommandEntry {
    pub name: String,
    pub name_padding: usize,
    pub short: String,
    pub group_id: String,
    pub command_path: String,
    pub command_path_padding: usize,
    pub is_available: bool,
    pub is_additional_help_topic: bool,
}

/// Builds the template data for the command at the end of `lineage`.
///
/// ```rust
/// use boa::{usage_view, ArgOption, CommandBuilder, Lineage};
///
/// let cmd = CommandBuilder::new("options")
///     .with_options([ArgOption::new(["option1"], "first")])
///     .build();
/// let view = usage_view(&Lineage::new(&cmd));
/// assert!(view.has_options);
/// assert!(!view.has_profiles);
/// ```
pub fn usage_view(lineage: &Lineage<'_>) -> UsageView {
    let cmd = lineage.command();
    let name_padding = lineage.name_padding();
    let command_path_padding = lineage.command_path_padding();
    let command_path = lineage.command_path();

    let mut commands: Vec<CommandEntry> = cmd
        .commands()
        .iter()
        .map(|child| CommandEntry {
            name: child.name().to_string(),
            name_padding,
            short: child.short().to_string(),
            group_id: child.group_id().to_string(),
            command_path: format!("{command_path} {}", child.name()),
            command_path_padding,
            is_available: child.is_available_command(),
            is_additional_help_topic: child.is_additional_help_topic(),
        })
        .collect();
    if lineage.lists_help_command() {
        commands.push(CommandEntry {
            name: HELP_COMMAND.to_string(),
            name_padding,
            short: HELP_COMMAND_SHORT.to_string(),
            group_id: String::new(),
            command_path: format!("{command_path} {HELP_COMMAND}"),
            command_path_padding,
            is_available: false,
            is_additional_help_topic: false,
        });
    }
    commands.sort_by(|a, b| a.name.cmp(&b.name));

    let all_child_commands_have_group = commands
        .iter()
        .filter(|c| c.is_available || c.name == HELP_COMMAND)
        .all(|c| !c.group_id.is_empty());

    let local_flags = lineage.local_flags();
    let inherited_flags = lineage.inherited_flags();

    let mut name_and_aliases = vec![cmd.name().to_string()];
    name_and_aliases.extend(cmd.aliases().iter().cloned());

    UsageView {
        name: cmd.name().to_string(),
        use_line: lineage.use_line(),
        command_path,
        short: cmd.short().to_string(),
        long: cmd.long().to_string(),
        example: cmd.example().to_string(),
        has_example: !cmd.example().is_empty(),
        aliases: cmd.aliases().to_vec(),
        name_and_aliases: name_and_aliases.join(", "),
        version: cmd.version().to_string(),
        annotations: cmd.annotations().clone(),
        runnable: cmd.is_runnable(),
        has_sub_commands: cmd.has_sub_commands(),
        has_available_sub_commands: cmd.has_available_sub_commands(),
        has_help_sub_commands: cmd.commands().iter().any(|c| c.is_additional_help_topic()),
        groups: cmd.groups().to_vec(),
        all_child_commands_have_group,
        commands,
        has_available_local_flags: local_flags.iter().any(|f| !f.is_hidden()),
        has_available_inherited_flags: inherited_flags.iter().any(|f| !f.is_hidden()),
        local_flag_usages: flag_usages(&local_flags),
        inherited_flag_usages: flag_usages(inherited_flags.iter().copied()),
        has_options: cmd.has_options(),
        opts: cmd.options().to_vec(),
        has_profiles: cmd.has_profiles(),
        profiles: cmd.profiles().to_vec(),
        usage_string: String::new(),
    }
}
