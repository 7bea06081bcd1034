//! "Did you mean this?" suggestions for mistyped subcommands.

use super::command::Command;

const DEFAULT_MINIMUM_DISTANCE: usize = 2;

/// Names of available subcommands of `cmd` close to `typed`.
///
/// A child matches when its name is within the command's suggestion distance
/// (case-insensitive Levenshtein), starts with `typed`, or lists `typed` in
/// its `suggest_for` words.
pub fn suggestions_for(cmd: &Command, typed: &str) -> Vec<String> {
    let min_distance = match cmd.suggestions_minimum_distance {
        0 => DEFAULT_MINIMUM_DISTANCE,
        n => n,
    };
    let typed_lower = typed.to_lowercase();

    let mut suggestions = Vec::new();
    for child in cmd.commands().iter().filter(|c| c.is_available_command()) {
        let name = child.name();
        let name_lower = name.to_lowercase();
        let close = strsim::levenshtein(&typed_lower, &name_lower) <= min_distance;
        let prefix = name_lower.starts_with(&typed_lower);
        let explicit = child
            .suggest_for
            .iter()
            .any(|word| word.eq_ignore_ascii_case(typed));
        if close || prefix || explicit {
            suggestions.push(name.to_string());
        }
    }
    suggestions
}

/// The suggestion block appended to "unknown command" errors, or an empty
/// string when suggestions are disabled or nothing matches.
pub(crate) fn suggestions_message(cmd: &Command, typed: &str) -> String {
    if cmd.disable_suggestions {
        return String::new();
    }
    let suggestions = suggestions_for(cmd, typed);
    if suggestions.is_empty() {
        return String::new();
    }
    let mut message = String::from("\n\nDid you mean this?\n");
    for s in suggestions {
        message.push('\t');
        message.push_str(&s);
        message.push('\n');
    }
    message
}
