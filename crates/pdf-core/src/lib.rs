//! PDF Core - Flow-layout PDF writing
//!
//! This crate provides functionality for:
//! - Building a document from paragraphs and tables
//! - Laying content out on pages (margins, word wrap, alignment, page breaks)
//! - Writing text with the built-in Helvetica faces (WinAnsi + Turkish letters)
//! - Serializing the result to PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, PageSize, Paragraph, PdfDocument, Table};
//!
//! let mut doc = PdfDocument::new(PageSize::A4);
//! doc.add_paragraph(Paragraph::new("Invoice").font_size(18.0).bold().align(Align::Center));
//!
//! let mut table = Table::new(vec![30.0, 70.0])?;
//! table.add_header_cell(Paragraph::new("Field").bold());
//! table.add_header_cell(Paragraph::new("Value").bold());
//! table.add_cell(Paragraph::new("Customer"));
//! table.add_cell(Paragraph::new("Ayşe"));
//! doc.add_table(table);
//!
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod encoding;
mod font;
mod layout;
mod text;

pub use document::{Block, Color, DocumentInfo, Margins, PageSize, Paragraph, PdfDocument, Table};
pub use encoding::{encode_char, encode_text, hex_encode};
pub use font::{text_width, FontStyle, FontWeight, StandardFont};
pub use text::{generate_text_operators, wrap_text, TextRenderContext, WrappedLine};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch every line but the last of a paragraph to the full width
    Justify,
}
