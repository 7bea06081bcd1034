//! The "Flags:" block of usage output.

use super::{Flag, FlagKind};

/// Splits the usage into the value placeholder and the usage text.
///
/// A backquoted word names the placeholder and loses its quotes:
/// "the `file` to read" gives `("file", "the file to read")`.
fn unquote_usage(flag: &Flag) -> (String, String) {
    let usage = &flag.usage;
    if let Some(start) = usage.find('`') {
        if let Some(len) = usage[start + 1..].find('`') {
            let name = &usage[start + 1..start + 1 + len];
            let text = format!("{}{}{}", &usage[..start], name, &usage[start + 2 + len..]);
            return (name.to_string(), text);
        }
    }
    (flag.kind.placeholder().to_string(), usage.clone())
}

/// Formats flags one per line: names, then usages starting in a shared
/// column. Hidden flags are skipped and the rest sorted by name.
pub(crate) fn flag_usages<'a>(flags: impl IntoIterator<Item = &'a Flag>) -> String {
    let mut flags: Vec<&Flag> = flags.into_iter().filter(|f| !f.hidden).collect();
    flags.sort_by(|a, b| a.name.cmp(&b.name));

    let mut rows = Vec::with_capacity(flags.len());
    let mut max_len = 0;
    for flag in flags {
        let mut line = match (flag.shorthand, &flag.shorthand_deprecated) {
            (Some(c), None) => format!("  -{c}, --{}", flag.name),
            _ => format!("      --{}", flag.name),
        };

        let (placeholder, usage) = unquote_usage(flag);
        if !placeholder.is_empty() {
            line.push(' ');
            line.push_str(&placeholder);
        }

        if let Some(no_opt) = &flag.no_opt_default {
            match flag.kind {
                FlagKind::String => line.push_str(&format!("[=\"{no_opt}\"]")),
                FlagKind::Bool if no_opt == "true" => {}
                FlagKind::Count if no_opt == "+1" => {}
                _ => line.push_str(&format!("[={no_opt}]")),
            }
        }

        max_len = max_len.max(line.len() + 1);

        let mut rest = usage;
        if !flag.kind.is_zero_default(&flag.default.display) {
            if flag.kind == FlagKind::String {
                rest.push_str(&format!(" (default {:?})", flag.default.display));
            } else {
                rest.push_str(&format!(" (default {})", flag.default.display));
            }
        }
        if let Some(msg) = &flag.deprecated {
            rest.push_str(&format!(" (DEPRECATED: {msg})"));
        }
        rows.push((line, rest));
    }

    let mut out = String::new();
    for (line, rest) in rows {
        let spacing = " ".repeat(max_len - line.len());
        let indent = format!("\n{}", " ".repeat(max_len + 2));
        out.push_str(&line);
        out.push(' ');
        out.push_str(&spacing);
        out.push(' ');
        out.push_str(&rest.replace('\n', &indent));
        out.push('\n');
    }
    out
}
