//! WASM bindings for docgen
//!
//! This crate provides JavaScript-friendly API for:
//! - Loading templates from JSON
//! - Rendering PDFs with a data object
//! - Rendering templates held in an in-memory store by id
//! - Validating template schemas before they are saved
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { DocumentTemplate, TemplateLibrary } from 'docgen-wasm';
//!
//! await init();
//!
//! const template = DocumentTemplate.fromJson(templateJson);
//! const output = template.render({ name: "Ayşe" });
//!
//! const library = new TemplateLibrary();
//! library.add(templateJson);
//! const receipt = library.renderById("rcp-1", { amount: "100 TL" });
//! ```

use template::{
    data_from_value, parse_template, validate_schema, DocumentRenderer, InMemoryTemplateStore,
    RendererConfig, Template, TemplateError,
};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JS `Error` named after the error code, e.g. `TMPL_005`
fn to_js_error(err: TemplateError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.code());
    js_err.into()
}

fn data_from_js(data: JsValue) -> Result<template::DataMap, JsValue> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(data)?;
    Ok(data_from_value(value))
}

fn renderer_from_json(config_json: Option<String>) -> Result<DocumentRenderer, TemplateError> {
    let config = match config_json {
        Some(json) => RendererConfig::from_json(&json)?,
        None => RendererConfig::default(),
    };
    Ok(DocumentRenderer::with_config(config))
}

/// A single template ready for rendering
#[wasm_bindgen]
pub struct DocumentTemplate {
    template: Template,
    renderer: DocumentRenderer,
}

#[wasm_bindgen]
impl DocumentTemplate {
    /// Create template from JSON
    ///
    /// @param json - Template record JSON (id, name, category, schema)
    /// @param configJson - Optional renderer configuration JSON
    /// @returns DocumentTemplate instance
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str, config_json: Option<String>) -> Result<DocumentTemplate, JsValue> {
        let template = parse_template(json).map_err(to_js_error)?;
        let renderer = renderer_from_json(config_json).map_err(to_js_error)?;
        Ok(DocumentTemplate { template, renderer })
    }

    /// Template identifier
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.template.id.clone()
    }

    /// Display name of the template's category
    #[wasm_bindgen(getter, js_name = categoryName)]
    pub fn category_name(&self) -> String {
        self.template.category.display_name().to_string()
    }

    /// Render PDF with data
    ///
    /// @param data - Data object for placeholders (may be null)
    /// @returns PDF bytes (Uint8Array)
    pub fn render(&self, data: JsValue) -> Result<Vec<u8>, JsValue> {
        let data = data_from_js(data)?;
        self.renderer
            .render(&self.template, Some(&data))
            .map_err(to_js_error)
    }
}

/// Templates kept in memory and rendered by id
#[wasm_bindgen]
pub struct TemplateLibrary {
    store: InMemoryTemplateStore,
    renderer: DocumentRenderer,
}

#[wasm_bindgen]
impl TemplateLibrary {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TemplateLibrary {
        TemplateLibrary {
            store: InMemoryTemplateStore::new(),
            renderer: DocumentRenderer::new(),
        }
    }

    /// Add (or replace) a template
    ///
    /// @param json - Template record JSON
    /// @returns The template id
    pub fn add(&mut self, json: &str) -> Result<String, JsValue> {
        let template = parse_template(json).map_err(to_js_error)?;
        let id = template.id.clone();
        self.store.insert(template);
        Ok(id)
    }

    /// Remove a template, returning whether it existed
    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id).is_some()
    }

    /// Number of templates held
    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.store.len()
    }

    /// Render a stored template
    ///
    /// @param id - Template id
    /// @param data - Data object for placeholders (may be null)
    /// @returns PDF bytes (Uint8Array); throws `TMPL_005` for unknown ids
    #[wasm_bindgen(js_name = renderById)]
    pub fn render_by_id(&self, id: &str, data: JsValue) -> Result<Vec<u8>, JsValue> {
        let data = data_from_js(data)?;
        self.renderer
            .render_by_id(&self.store, id, Some(&data))
            .map_err(to_js_error)
    }
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a schema against the authoring rules
///
/// @param schemaJson - Schema JSON string
/// @returns Array of problems (empty when valid)
#[wasm_bindgen(js_name = validateSchema)]
pub fn validate_schema_json(schema_json: &str) -> Result<Vec<String>, JsValue> {
    let schema: serde_json::Value = serde_json::from_str(schema_json)
        .map_err(|e| to_js_error(TemplateError::JsonError(e)))?;
    Ok(schema_problems(&schema))
}

fn schema_problems(schema: &serde_json::Value) -> Vec<String> {
    match validate_schema(schema) {
        Ok(()) => Vec::new(),
        Err(e) => e.errors,
    }
}
