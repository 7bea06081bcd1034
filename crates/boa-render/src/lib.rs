//! # boa-render - aligned text rendering for command help
//!
//! `boa-render` turns a usage/help template plus serializable data into
//! column-aligned text. Rendering happens in two passes:
//!
//! 1. **MiniJinja** evaluates the template. Columns are separated with `\t`.
//! 2. **[`TabWriter`]** replaces the tabs with padding so that every cell of a
//!    column block starts at the same offset.
//!
//! ```rust
//! use boa_render::{render_aligned, TabSettings};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Row { args: Vec<String>, desc: String }
//!
//! #[derive(Serialize)]
//! struct View { opts: Vec<Row> }
//!
//! let view = View {
//!     opts: vec![
//!         Row { args: vec!["option1".into(), "opt1".into()], desc: "first".into() },
//!         Row { args: vec!["option2".into()], desc: "second".into() },
//!     ],
//! };
//! let template = "Options:{% for o in opts %}\n  {{ o.args | slice_to_csv }}\t{{ o.desc }}{% endfor %}\n";
//!
//! let mut out = Vec::new();
//! render_aligned(&mut out, template, &view, TabSettings::HELP).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "Options:\n  option1, opt1   first\n  option2         second\n",
//! );
//! ```

mod error;
mod tabwriter;
pub mod template;
mod util;

pub use error::RenderError;
pub use tabwriter::{align, TabSettings, TabWriter};
pub use template::{register_filters, TemplateEngine};
pub use util::{display_width, rpad, slice_to_csv, trim_right_space};

use serde::Serialize;
use std::io::Write;

/// Renders a template to a string without alignment.
pub fn render_template<T: Serialize + ?Sized>(
    template: &str,
    data: &T,
) -> Result<String, RenderError> {
    TemplateEngine::new().render(template, data)
}

/// Renders a template and writes it through a [`TabWriter`] into `out`.
///
/// The tab writer is flushed before returning, so `out` holds the complete
/// aligned text on success. Nothing is written when the template fails.
pub fn render_aligned<W: Write, T: Serialize + ?Sized>(
    out: W,
    template: &str,
    data: &T,
    settings: TabSettings,
) -> Result<(), RenderError> {
    render_aligned_with(&TemplateEngine::new(), out, template, data, settings)
}

/// Like [`render_aligned`], using a caller-configured engine.
pub fn render_aligned_with<W: Write, T: Serialize + ?Sized>(
    engine: &TemplateEngine,
    out: W,
    template: &str,
    data: &T,
    settings: TabSettings,
) -> Result<(), RenderError> {
    let text = engine.render(template, data)?;
    let mut writer = TabWriter::new(out, settings);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
