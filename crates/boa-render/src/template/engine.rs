//! MiniJinja-backed template engine.

use minijinja::{Environment, Value};
use serde::Serialize;

use super::filters::register_filters;
use crate::error::RenderError;

/// Template engine used for usage and help text.
///
/// Templates are rendered with trailing newlines preserved, since help
/// screens are expected to end with a newline, and with the filters from
/// [`register_filters`] available.
///
/// # Example
///
/// ```rust
/// use boa_render::TemplateEngine;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Data { name: String }
///
/// let engine = TemplateEngine::new();
/// let output = engine
///     .render("Usage:\n  {{ name }}\n", &Data { name: "options".into() })
///     .unwrap();
/// assert_eq!(output, "Usage:\n  options\n");
/// ```
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Creates a new engine with the help filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        register_filters(&mut env);
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register additional filters or functions for custom
    /// usage and help templates.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    /// Compiles and renders a template string with the given data.
    pub fn render<T: Serialize + ?Sized>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    /// Checks that a template compiles without rendering it.
    pub fn validate(&self, template: &str) -> Result<(), RenderError> {
        self.env.template_from_str(template)?;
        Ok(())
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
