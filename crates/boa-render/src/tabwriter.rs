//! Elastic tab-stop alignment.
//!
//! Rendered templates separate columns with `\t`. The [`TabWriter`] buffers
//! that text and, on flush, replaces each tab with padding so cells of the
//! same column line up across consecutive lines.
//!
//! ## Column blocks
//!
//! A line is split into cells at every tab; every cell except the last one is
//! *tab-terminated*. A column block is a maximal run of consecutive lines that
//! all have a terminated cell in that column. Within a block the column width
//! is
//!
//! ```text
//! max(min_width, widest cell + padding)
//! ```
//!
//! and every terminated cell is left aligned and padded to that width. Blocks
//! nest: the next column is formatted independently for each run of lines
//! that continue past the current one. A line without tabs therefore ends all
//! blocks, which is what keeps the "Options:" and "Profiles:" sections of a
//! help screen aligned independently of each other.
//!
//! ```rust
//! use boa_render::{align, TabSettings};
//!
//! let text = "  option1, opt1\topt1 description\n  option2\topt2 description\n";
//! assert_eq!(
//!     align(text, TabSettings::HELP),
//!     "  option1, opt1   opt1 description\n  option2         opt2 description\n",
//! );
//! ```

use std::io::{self, Write};

use crate::util::display_width;

/// Column sizing parameters for a [`TabWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSettings {
    /// Minimal cell width including any padding.
    pub min_width: usize,
    /// Width of a tab character, used when `pad_char` is `'\t'`.
    pub tab_width: usize,
    /// Padding added to the widest cell of a column.
    pub padding: usize,
    /// Character used for padding.
    pub pad_char: char,
}

impl TabSettings {
    /// Settings used when rendering usage text.
    pub const USAGE: TabSettings = TabSettings::uniform(8);

    /// Settings used when rendering help text.
    pub const HELP: TabSettings = TabSettings::uniform(3);

    /// Space padding with min width, tab width and padding all set to `n`.
    pub const fn uniform(n: usize) -> Self {
        Self {
            min_width: n,
            tab_width: n,
            padding: n,
            pad_char: ' ',
        }
    }
}

impl Default for TabSettings {
    fn default() -> Self {
        TabSettings::USAGE
    }
}

struct Cell<'a> {
    text: &'a str,
    width: usize,
}

struct Layout<'a> {
    lines: Vec<Vec<Cell<'a>>>,
    trailing_newline: bool,
    settings: TabSettings,
}

impl<'a> Layout<'a> {
    fn parse(text: &'a str, settings: TabSettings) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = if trailing_newline {
            &text[..text.len() - 1]
        } else {
            text
        };

        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .map(|line| {
                    line.split('\t')
                        .map(|text| Cell {
                            text,
                            width: display_width(text),
                        })
                        .collect()
                })
                .collect()
        };

        Self {
            lines,
            trailing_newline,
            settings,
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        let mut widths = Vec::new();
        self.format(&mut out, &mut widths, 0, self.lines.len());
        out
    }

    // Number of tab-terminated cells on a line.
    fn terminated(&self, line: usize) -> usize {
        self.lines[line].len().saturating_sub(1)
    }

    fn format(&self, out: &mut String, widths: &mut Vec<usize>, line0: usize, line1: usize) {
        let column = widths.len();
        let mut start = line0;
        let mut this = line0;

        while this < line1 {
            if column >= self.terminated(this) {
                this += 1;
                continue;
            }

            // Lines before the block are complete at the current depth.
            self.write_lines(out, widths, start, this);
            start = this;

            let mut width = self.settings.min_width;
            while this < line1 && column < self.terminated(this) {
                width = width.max(self.lines[this][column].width + self.settings.padding);
                this += 1;
            }

            widths.push(width);
            self.format(out, widths, start, this);
            widths.pop();
            start = this;
        }

        self.write_lines(out, widths, start, line1);
    }

    fn write_lines(&self, out: &mut String, widths: &[usize], line0: usize, line1: usize) {
        for i in line0..line1 {
            for (j, cell) in self.lines[i].iter().enumerate() {
                out.push_str(cell.text);
                if let Some(&cell_width) = widths.get(j) {
                    self.write_padding(out, cell.width, cell_width);
                }
            }
            if i + 1 < self.lines.len() || self.trailing_newline {
                out.push('\n');
            }
        }
    }

    fn write_padding(&self, out: &mut String, text_width: usize, cell_width: usize) {
        if self.settings.pad_char == '\t' {
            let tab = self.settings.tab_width;
            if tab == 0 {
                return;
            }
            let cell_width = cell_width.div_ceil(tab) * tab;
            let n = cell_width.saturating_sub(text_width);
            out.extend(std::iter::repeat('\t').take(n.div_ceil(tab)));
            return;
        }
        let n = cell_width.saturating_sub(text_width);
        out.extend(std::iter::repeat(self.settings.pad_char).take(n));
    }
}

/// Aligns tab-separated text in one step.
pub fn align(text: &str, settings: TabSettings) -> String {
    Layout::parse(text, settings).render()
}

/// A writer that aligns tab-separated columns before forwarding text.
///
/// Everything written is buffered until [`flush`](Write::flush) (or drop),
/// since a column's width depends on every line of its block.
///
/// ```rust
/// use std::io::Write;
/// use boa_render::{TabSettings, TabWriter};
///
/// let mut tw = TabWriter::new(Vec::new(), TabSettings::HELP);
/// write!(tw, "a\tone\nlonger\ttwo\n").unwrap();
/// let out = tw.into_inner().unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "a        one\nlonger   two\n");
/// ```
pub struct TabWriter<W: Write> {
    inner: Option<W>,
    settings: TabSettings,
    buf: Vec<u8>,
}

impl<W: Write> TabWriter<W> {
    /// Creates a tab writer forwarding aligned text to `inner`.
    pub fn new(inner: W, settings: TabSettings) -> Self {
        Self {
            inner: Some(inner),
            settings,
            buf: Vec::new(),
        }
    }

    /// Returns the settings this writer aligns with.
    pub fn settings(&self) -> TabSettings {
        self.settings
    }

    /// Flushes buffered text and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush_buffer()?;
        self.inner
            .take()
            .ok_or_else(|| io::Error::other("tab writer has no inner writer"))
    }

    fn flush_buffer(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buf);
        let aligned = align(&text, self.settings);
        self.buf.clear();
        if let Some(inner) = self.inner.as_mut() {
            inner.write_all(aligned.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> Write for TabWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_buffer()?;
        match self.inner.as_mut() {
            Some(inner) => inner.flush(),
            None => Ok(()),
        }
    }
}

impl<W: Write> Drop for TabWriter<W> {
    fn drop(&mut self) {
        // Errors cannot be reported from drop; callers that care flush first.
        let _ = self.flush_buffer();
    }
}
