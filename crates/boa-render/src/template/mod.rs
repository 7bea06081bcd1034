//! Template rendering for usage and help text.
//!
//! Templates use MiniJinja syntax. The engine keeps trailing newlines and
//! registers a small set of text filters (see [`register_filters`]) that
//! usage templates rely on for padding and list formatting.

mod engine;
mod filters;

pub use engine::TemplateEngine;
pub use filters::register_filters;
