//! Default usage, help and version rendering.

use std::io::Write;

use boa_render::{render_aligned, RenderError, TabSettings};

use super::data::usage_view;
use crate::cli::command::Lineage;
use crate::error::Error;

/// Renders the usage text of the command at the end of `lineage`.
///
/// Uses the nearest usage template and usage alignment (tab stops of 8).
/// A template error is written to `err` and returned.
pub fn render_usage(
    lineage: &Lineage<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), Error> {
    let view = usage_view(lineage);
    render_aligned(&mut *out, lineage.usage_template(), &view, TabSettings::USAGE).map_err(
        |e| {
            let _ = writeln!(err, "{e}");
            Error::Render(e)
        },
    )
}

/// Renders the help text of the command at the end of `lineage`.
///
/// Uses the nearest help template and help alignment (tab stops of 3). A
/// template error is written to `err`; help never fails the invocation.
///
/// ```rust
/// use boa::{render_help, ArgOption, CommandBuilder, Lineage};
///
/// let cmd = CommandBuilder::new("options")
///     .with_options_and_template([
///         ArgOption::new(["option1", "opt1"], "opt1 description"),
///         ArgOption::new(["option2"], "opt2 description"),
///     ])
///     .with_no_op()
///     .build();
///
/// let mut out = Vec::new();
/// render_help(&Lineage::new(&cmd), &mut out, &mut std::io::sink());
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("  option2         opt2 description\n"));
/// ```
pub fn render_help(lineage: &Lineage<'_>, out: &mut dyn Write, err: &mut dyn Write) {
    let template = lineage.help_template();
    let mut view = usage_view(lineage);
    if template.contains("usage_string") {
        match usage_string(lineage) {
            Ok(usage) => view.usage_string = usage,
            Err(e) => {
                let _ = writeln!(err, "{e}");
                return;
            }
        }
    }
    if let Err(e) = render_aligned(&mut *out, template, &view, TabSettings::HELP) {
        let _ = writeln!(err, "{e}");
    }
}

/// Renders the version template.
pub fn render_version(lineage: &Lineage<'_>, out: &mut dyn Write) -> Result<(), Error> {
    let view = usage_view(lineage);
    render_aligned(&mut *out, lineage.version_template(), &view, TabSettings::USAGE)?;
    Ok(())
}

/// The usage text as a string, as help templates embed it.
pub(crate) fn usage_string(lineage: &Lineage<'_>) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    let view = usage_view(lineage);
    render_aligned(&mut buf, lineage.usage_template(), &view, TabSettings::USAGE)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Shows usage through the nearest custom usage function, or the default.
pub(crate) fn usage(
    lineage: &Lineage<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), Error> {
    match lineage.usage_fn() {
        Some(f) => f(lineage, out, err),
        None => render_usage(lineage, out, err),
    }
}

/// Shows help through the nearest custom help function, or the default.
pub(crate) fn help(lineage: &Lineage<'_>, args: &[String], out: &mut dyn Write, err: &mut dyn Write) {
    match lineage.help_fn() {
        Some(f) => f(lineage, args, out, err),
        None => render_help(lineage, out, err),
    }
}
