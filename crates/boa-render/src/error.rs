//! Error types for template rendering.
//!
//! This module provides [`RenderError`], the error type for all rendering
//! operations. It abstracts over the underlying template engine's errors so
//! callers never match on `minijinja` types directly.

use thiserror::Error;

/// Error type for template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template syntax error, unknown filter, or failed evaluation.
    #[error("template error: {0}")]
    TemplateError(String),

    /// Data could not be serialized into a template context.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Writing the rendered output failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other operational error raised while rendering.
    #[error("{0}")]
    OperationError(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod
            | ErrorKind::TemplateNotFound => RenderError::TemplateError(err.to_string()),
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            _ => RenderError::OperationError(err.to_string()),
        }
    }
}
