//! PDF Document model and serialization

use crate::encoding::encoding_dictionary;
use crate::font::{FontStyle, FontWeight, StandardFont};
use crate::layout::LayoutEngine;
use crate::{Align, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::io::Write;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
    pub const A3: PageSize = PageSize {
        width: 841.89,
        height: 1190.55,
    };
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
    pub const LEGAL: PageSize = PageSize {
        width: 612.0,
        height: 1008.0,
    };

    /// Same size with width and height swapped so width is the long side
    pub fn landscape(self) -> Self {
        Self {
            width: self.width.max(self.height),
            height: self.width.min(self.height),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same margin on every side
    pub fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(36.0)
    }
}

/// A paragraph of text with its formatting
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub font_size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub align: Align,
    pub color: Color,
}

impl Paragraph {
    /// Create a 12pt regular, left-aligned paragraph
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 12.0,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
            align: Align::Left,
            color: Color::black(),
        }
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Face used to draw this paragraph
    pub fn font(&self) -> StandardFont {
        StandardFont::for_variant(self.weight, self.style)
    }
}

/// A table with relative column widths
///
/// Cells are added row by row; rows are formed by splitting the cell list
/// into chunks of `column_count()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    column_widths: Vec<f32>,
    header_cells: Vec<Paragraph>,
    body_cells: Vec<Paragraph>,
}

impl Table {
    /// Create a table spanning the content width
    ///
    /// Widths are kept as declared; each column gets `width / sum(widths)` of
    /// the available width when laid out.
    pub fn new(column_widths: Vec<f32>) -> Result<Self> {
        if column_widths.is_empty() {
            return Err(PdfError::InvalidTable(
                "table must have at least one column".to_string(),
            ));
        }

        Ok(Self {
            column_widths,
            header_cells: Vec::new(),
            body_cells: Vec::new(),
        })
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    /// Declared column widths
    pub fn column_widths(&self) -> &[f32] {
        &self.column_widths
    }

    /// Fraction of the table width given to each column
    pub fn column_fractions(&self) -> Vec<f32> {
        let widths: Vec<f32> = self
            .column_widths
            .iter()
            .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
            .collect();
        let total: f32 = widths.iter().sum();

        if total <= 0.0 {
            let equal = 1.0 / widths.len() as f32;
            return vec![equal; widths.len()];
        }
        widths.iter().map(|w| w / total).collect()
    }

    pub fn add_header_cell(&mut self, cell: Paragraph) -> &mut Self {
        self.header_cells.push(cell);
        self
    }

    pub fn add_cell(&mut self, cell: Paragraph) -> &mut Self {
        self.body_cells.push(cell);
        self
    }

    /// Header rows (repeated at the top of every page the table spans)
    pub fn header_rows(&self) -> std::slice::Chunks<'_, Paragraph> {
        self.header_cells.chunks(self.column_count())
    }

    pub fn body_rows(&self) -> std::slice::Chunks<'_, Paragraph> {
        self.body_cells.chunks(self.column_count())
    }
}

/// A unit of document content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Values for the PDF Info dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
    pub producer: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: String::new(),
            creator: String::new(),
            producer: format!("docgen pdf-core {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// PDF document built from a flow of blocks
///
/// Content is only laid out when the document is serialized, so margins may
/// be changed at any point before [`PdfDocument::to_bytes`].
#[derive(Debug, Clone)]
pub struct PdfDocument {
    page_size: PageSize,
    margins: Margins,
    blocks: Vec<Block>,
    info: DocumentInfo,
    compress: bool,
}

impl PdfDocument {
    /// Create an empty document
    ///
    /// # Example
    /// ```ignore
    /// let doc = PdfDocument::new(PageSize::A4);
    /// ```
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            margins: Margins::default(),
            blocks: Vec::new(),
            info: DocumentInfo::default(),
            compress: true,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    pub fn set_info(&mut self, info: DocumentInfo) {
        self.info = info;
    }

    /// Enable or disable Flate compression of page content
    pub fn set_compress(&mut self, compress: bool) {
        self.compress = compress;
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn add_table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    /// Content added so far, in order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lay out the content and return one operator stream per page
    pub fn layout_pages(&self) -> Vec<Vec<u8>> {
        let mut engine = LayoutEngine::new(self.page_size, self.margins);
        for block in &self.blocks {
            match block {
                Block::Paragraph(p) => engine.layout_paragraph(p),
                Block::Table(t) => engine.layout_table(t),
            }
        }
        engine.finish()
    }

    /// Serialize the document to PDF bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let pages = self.layout_pages();
        log::debug!("Serializing document with {} page(s)", pages.len());

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let encoding_id = doc.add_object(encoding_dictionary());
        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => encoding_id,
            });
            fonts.set(font.resource_name(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids = Vec::with_capacity(pages.len());
        for content in pages {
            let stream = self.content_stream(content)?;
            let content_id = doc.add_object(stream);

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(self.page_size.width),
                    Object::Real(self.page_size.height),
                ],
                "Resources" => resources_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(self.info.title.as_str()),
            "Creator" => Object::string_literal(self.info.creator.as_str()),
            "Producer" => Object::string_literal(self.info.producer.as_str()),
        });
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Wrap page operators in a (possibly compressed) content stream
    fn content_stream(&self, content: Vec<u8>) -> Result<Stream> {
        if !self.compress {
            return Ok(Stream::new(Dictionary::new(), content));
        }

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&content)?;
        let compressed = encoder.finish()?;

        Ok(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            compressed,
        ))
    }
}
