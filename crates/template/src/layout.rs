//! Document layout configuration

use crate::schema::Layout;
use pdf_core::PdfDocument;

/// Apply schema layout settings to a document
///
/// Only margins take effect. Page size and orientation are read but the
/// document keeps its page size.
pub fn apply_layout(doc: &mut PdfDocument, layout: &Layout) {
    if let Some(margins) = layout.margins {
        log::debug!(
            "Applying margins top={} right={} bottom={} left={}",
            margins.top,
            margins.right,
            margins.bottom,
            margins.left
        );
        doc.set_margins(margins);
    }

    if layout.has_custom_page_setup() {
        log::debug!(
            "Declared page size {:?} ({:?}) not applied",
            layout.page_size,
            layout.orientation
        );
    }
}
