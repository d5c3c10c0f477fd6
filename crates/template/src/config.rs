//! Renderer configuration

use crate::Result;
use serde::{Deserialize, Serialize};

/// Settings for [`crate::DocumentRenderer`]
///
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererConfig {
    /// Maximum container nesting accepted in a schema
    pub max_depth: usize,

    /// Title of the basic rendering when the data has no `title`
    pub default_title: String,

    /// Title written to the PDF Info dictionary
    pub document_title: String,

    /// Creator written to the PDF Info dictionary
    pub creator: String,

    /// Compress page content streams
    pub compress: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            default_title: "Generated Document".to_string(),
            document_title: "Generated PDF Document".to_string(),
            creator: "PDF Generator Platform".to_string(),
            compress: true,
        }
    }
}

impl RendererConfig {
    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
