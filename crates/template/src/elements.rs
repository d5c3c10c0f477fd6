//! Element rendering

use crate::parser::{resolve_placeholders, value_to_string};
use crate::schema::*;
use crate::{DataMap, Result};
use pdf_core::{Align, Paragraph, PdfDocument, Table};

/// Renders schema elements into a document, resolving placeholders from `data`
pub struct ElementRenderer<'a> {
    data: &'a DataMap,
}

impl<'a> ElementRenderer<'a> {
    pub fn new(data: &'a DataMap) -> Self {
        Self { data }
    }

    /// Render elements in order
    pub fn render_all(&self, elements: &[Element], doc: &mut PdfDocument) -> Result<()> {
        for element in elements {
            self.render(element, doc)?;
        }
        Ok(())
    }

    /// Render a single element
    pub fn render(&self, element: &Element, doc: &mut PdfDocument) -> Result<()> {
        match element {
            Element::Text(text) => self.render_text(text, doc),
            Element::Table(table) => self.render_table(table, doc)?,
            Element::Image(image) => self.render_image(image, doc),
            Element::Container(children) => self.render_all(children, doc)?,
            Element::Unsupported { kind, text } => {
                log::warn!("Unsupported element type '{kind}', rendering as TEXT");
                self.render_text(text, doc);
            }
        }
        Ok(())
    }

    fn render_text(&self, element: &TextElement, doc: &mut PdfDocument) {
        let mut paragraph = Paragraph::new(resolve_placeholders(&element.text, self.data))
            .align(to_pdf_align(element.align));
        if let Some(size) = element.font_size {
            paragraph = paragraph.font_size(size);
        }
        if element.bold {
            paragraph = paragraph.bold();
        }
        doc.add_paragraph(paragraph);
    }

    fn render_table(&self, element: &TableElement, doc: &mut PdfDocument) -> Result<()> {
        if element.columns.is_empty() {
            log::warn!("Table element has no columns, skipping");
            return Ok(());
        }

        let mut table = Table::new(element.columns.iter().map(|c| c.width).collect())?;
        for column in &element.columns {
            table.add_header_cell(Paragraph::new(column.header.clone()).bold());
        }

        // A data-keyed column shows that field; every other column shows the
        // row's resolved value.
        for row in &element.rows {
            for column in &element.columns {
                let text = match &column.data_key {
                    Some(key) => self.data.get(key).map(value_to_string).unwrap_or_default(),
                    None => row
                        .value
                        .as_deref()
                        .map(|v| resolve_placeholders(v, self.data))
                        .unwrap_or_default(),
                };
                table.add_cell(Paragraph::new(text));
            }
        }

        doc.add_table(table);
        Ok(())
    }

    fn render_image(&self, element: &ImageElement, doc: &mut PdfDocument) {
        match &element.src {
            Some(src) => doc.add_paragraph(
                Paragraph::new(format!("[IMAGE: {src}]"))
                    .align(Align::Center)
                    .italic(),
            ),
            None => log::warn!("Image element has no src, skipping"),
        }
    }
}

fn to_pdf_align(align: TextAlign) -> Align {
    match align {
        TextAlign::Left => Align::Left,
        TextAlign::Center => Align::Center,
        TextAlign::Right => Align::Right,
        TextAlign::Justify => Align::Justify,
    }
}
