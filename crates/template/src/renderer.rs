//! Document rendering

use crate::category::{render_basic, render_category};
use crate::config::RendererConfig;
use crate::elements::ElementRenderer;
use crate::layout::apply_layout;
use crate::schema::{Schema, Template};
use crate::store::TemplateStore;
use crate::{DataMap, Result, TemplateError};
use pdf_core::{DocumentInfo, PageSize, PdfDocument};

/// How a template is going to be rendered
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    /// Layout elements from a well-formed schema
    Schema(Schema),
    /// Fixed layout for the template's category (no elements declared)
    Category,
    /// Title and key/value table (schema could not be parsed)
    Basic,
}

/// Turns templates plus data into PDF bytes
///
/// Holds no per-render state; one renderer can serve any number of
/// concurrent renders.
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    config: RendererConfig,
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Decide how `template` is rendered
    pub fn plan(&self, template: &Template) -> RenderPlan {
        let Some(raw) = template
            .schema
            .as_ref()
            .filter(|raw| Schema::declares_elements(raw))
        else {
            return RenderPlan::Category;
        };

        match Schema::parse(raw, self.config.max_depth) {
            Ok(schema) => RenderPlan::Schema(schema),
            Err(e) => {
                log::warn!(
                    "Malformed schema for template {}, using basic rendering: {e}",
                    template.id
                );
                RenderPlan::Basic
            }
        }
    }

    /// Build the document model for `template` without serializing it
    pub fn build_document(&self, template: &Template, data: Option<&DataMap>) -> Result<PdfDocument> {
        let empty = DataMap::new();
        let data = data.unwrap_or(&empty);

        match self.plan(template) {
            RenderPlan::Schema(schema) => {
                log::debug!(
                    "Rendering template {} from {} schema elements",
                    template.id,
                    schema.elements.len()
                );
                let mut doc = self.new_document();
                apply_layout(&mut doc, &schema.layout);
                match ElementRenderer::new(data).render_all(&schema.elements, &mut doc) {
                    Ok(()) => Ok(doc),
                    Err(e) => {
                        log::warn!(
                            "Schema rendering failed for template {}, using basic rendering: {e}",
                            template.id
                        );
                        self.basic_document(Some(data))
                    }
                }
            }
            RenderPlan::Category => {
                log::debug!(
                    "Rendering template {} by category {:?}",
                    template.id,
                    template.category
                );
                let mut doc = self.new_document();
                render_category(&mut doc, template, data)?;
                Ok(doc)
            }
            RenderPlan::Basic => self.basic_document(Some(data)),
        }
    }

    /// Document for the basic rendering of `data`
    pub fn basic_document(&self, data: Option<&DataMap>) -> Result<PdfDocument> {
        let empty = DataMap::new();
        let mut doc = self.new_document();
        render_basic(
            &mut doc,
            data.unwrap_or(&empty),
            &self.config.default_title,
        )?;
        Ok(doc)
    }

    /// Render `template` with `data` to PDF bytes
    ///
    /// Fails only with [`TemplateError::GenerationFailed`]; nothing partial is
    /// returned.
    pub fn render(&self, template: &Template, data: Option<&DataMap>) -> Result<Vec<u8>> {
        log::info!("Generating PDF for template {} ({})", template.id, template.name);

        let bytes = self
            .build_document(template, data)
            .and_then(|doc| doc.to_bytes().map_err(TemplateError::from))
            .map_err(|e| {
                log::error!("PDF generation failed for template {}: {e}", template.id);
                TemplateError::GenerationFailed {
                    template_id: template.id.clone(),
                    message: e.to_string(),
                }
            })?;

        log::info!(
            "Generated PDF for template {} ({} bytes)",
            template.id,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Look up a template by id and render it
    pub fn render_by_id<S: TemplateStore + ?Sized>(
        &self,
        store: &S,
        template_id: &str,
        data: Option<&DataMap>,
    ) -> Result<Vec<u8>> {
        let template = store
            .lookup(template_id)
            .ok_or_else(|| TemplateError::TemplateNotFound {
                template_id: template_id.to_string(),
            })?;
        self.render(&template, data)
    }

    fn new_document(&self) -> PdfDocument {
        let mut doc = PdfDocument::new(PageSize::A4);
        doc.set_info(DocumentInfo {
            title: self.config.document_title.clone(),
            creator: self.config.creator.clone(),
            ..DocumentInfo::default()
        });
        doc.set_compress(self.config.compress);
        doc
    }
}
