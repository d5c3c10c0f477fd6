//! Template Engine - schema-driven document rendering
//!
//! This crate provides:
//! - Template record and schema model types
//! - Placeholder substitution (`{{field}}`) against a flat data map
//! - Element rendering (text, table, image, container)
//! - Layout configuration (margins)
//! - Category-based rendering for templates without a schema
//! - The document renderer that picks a strategy and falls back gracefully
//!
//! # Example
//!
//! ```ignore
//! use template::{parse_template, DataMap, DocumentRenderer};
//!
//! let template = parse_template(template_json)?;
//! let data: DataMap = serde_json::from_str(r#"{"name": "Ayşe"}"#)?;
//! let pdf_bytes = DocumentRenderer::new().render(&template, Some(&data))?;
//! ```

mod category;
mod config;
mod elements;
mod layout;
pub mod parser;
mod renderer;
mod schema;
mod store;
pub mod validation;

pub use category::{render_basic, render_category};
pub use config::RendererConfig;
pub use elements::ElementRenderer;
pub use layout::apply_layout;
pub use parser::{data_from_value, parse_template, resolve_placeholders, value_to_string};
pub use renderer::{DocumentRenderer, RenderPlan};
pub use schema::*;
pub use store::{InMemoryTemplateStore, TemplateStore};
pub use validation::{validate_schema, ValidationErrors};

use thiserror::Error;

/// Flat field name to value mapping supplied per render call
///
/// Keys keep their insertion order.
pub type DataMap = serde_json::Map<String, serde_json::Value>;

/// Errors that can occur during template processing
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to parse template: {0}")]
    ParseError(String),

    #[error("Template not found: {template_id}")]
    TemplateNotFound { template_id: String },

    #[error("Failed to generate PDF for template {template_id}: {message}")]
    GenerationFailed {
        template_id: String,
        message: String,
    },

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TemplateError {
    /// Stable error code for the calling layer
    pub fn code(&self) -> &'static str {
        match self {
            TemplateError::ParseError(_) | TemplateError::JsonError(_) => "TMPL_004",
            TemplateError::TemplateNotFound { .. } => "TMPL_005",
            TemplateError::GenerationFailed { .. } | TemplateError::PdfError(_) => "PDF_001",
        }
    }

    /// Template the error refers to, if known
    pub fn template_id(&self) -> Option<&str> {
        match self {
            TemplateError::TemplateNotFound { template_id }
            | TemplateError::GenerationFailed { template_id, .. } => Some(template_id),
            _ => None,
        }
    }
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
