//! Flow layout: places paragraphs and tables on pages

use crate::document::{Margins, PageSize, Paragraph, Table};
use crate::font::text_width;
use crate::text::{calculate_x_offset, generate_text_operators, justify_spacing, wrap_text};
use crate::text::{fmt_num, TextRenderContext, WrappedLine};
use crate::Align;

/// Line height as a multiple of the font size
const LEADING: f32 = 1.2;
/// Baseline offset from the top of a line, as a multiple of the font size
const ASCENT: f32 = 0.9;
/// Space left below every block
const BLOCK_SPACING: f32 = 4.0;
/// Inner padding of table cells
const CELL_PADDING: f32 = 2.0;
/// Narrowest usable content width
const MIN_WIDTH: f32 = 1.0;

/// A paragraph broken into lines for a given width
struct LaidOutText<'a> {
    paragraph: &'a Paragraph,
    lines: Vec<WrappedLine>,
}

impl<'a> LaidOutText<'a> {
    fn new(paragraph: &'a Paragraph, width: f32) -> Self {
        let lines = wrap_text(
            &paragraph.text,
            paragraph.font(),
            paragraph.font_size,
            width.max(MIN_WIDTH),
        );
        Self { paragraph, lines }
    }

    fn line_height(&self) -> f32 {
        self.paragraph.font_size * LEADING
    }

    fn height(&self) -> f32 {
        self.line_height() * self.lines.len() as f32
    }
}

/// Page-by-page layout state
pub(crate) struct LayoutEngine {
    page_size: PageSize,
    margins: Margins,
    pages: Vec<Vec<u8>>,
    /// Top of the free area on the current page (PDF coordinates)
    cursor_y: f32,
    /// Nothing has been placed on the current page yet
    at_page_top: bool,
}

impl LayoutEngine {
    pub(crate) fn new(page_size: PageSize, margins: Margins) -> Self {
        let mut engine = Self {
            page_size,
            margins,
            pages: Vec::new(),
            cursor_y: 0.0,
            at_page_top: true,
        };
        engine.new_page();
        engine
    }

    /// Operator streams, one per page (always at least one)
    pub(crate) fn finish(self) -> Vec<Vec<u8>> {
        self.pages
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.cursor_y = self.page_size.height - self.margins.top;
        self.at_page_top = true;
    }

    fn content_left(&self) -> f32 {
        self.margins.left
    }

    fn content_width(&self) -> f32 {
        (self.page_size.width - self.margins.left - self.margins.right).max(MIN_WIDTH)
    }

    fn bottom(&self) -> f32 {
        self.margins.bottom
    }

    /// Start a new page unless `height` fits below the cursor
    ///
    /// Content taller than a whole page is placed anyway at the top of a page.
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor_y - height < self.bottom() && !self.at_page_top {
            self.new_page();
            return true;
        }
        false
    }

    fn emit(&mut self, ops: &[u8]) {
        if let Some(page) = self.pages.last_mut() {
            page.extend_from_slice(ops);
        }
        self.at_page_top = false;
    }

    pub(crate) fn layout_paragraph(&mut self, paragraph: &Paragraph) {
        let width = self.content_width();
        let left = self.content_left();
        let text = LaidOutText::new(paragraph, width);
        let line_height = text.line_height();

        for line in &text.lines {
            self.ensure_space(line_height);
            let top = self.cursor_y;
            self.draw_line(paragraph, line, left, top, width);
            self.cursor_y -= line_height;
            self.at_page_top = false;
        }

        self.cursor_y -= BLOCK_SPACING;
    }

    pub(crate) fn layout_table(&mut self, table: &Table) {
        let width = self.content_width();
        let left = self.content_left();

        let mut columns = Vec::with_capacity(table.column_count());
        let mut x = left;
        for fraction in table.column_fractions() {
            let column_width = width * fraction;
            columns.push((x, column_width));
            x += column_width;
        }

        let headers: Vec<&[Paragraph]> = table.header_rows().collect();
        self.draw_rows(&headers, &columns);

        for row in table.body_rows() {
            let height = row_height(row, &columns);
            if self.ensure_space(height) {
                self.draw_rows(&headers, &columns);
            }
            self.draw_row(row, &columns, height);
        }

        self.cursor_y -= BLOCK_SPACING;
    }

    fn draw_rows(&mut self, rows: &[&[Paragraph]], columns: &[(f32, f32)]) {
        for row in rows {
            let height = row_height(row, columns);
            self.ensure_space(height);
            self.draw_row(row, columns, height);
        }
    }

    fn draw_row(&mut self, row: &[Paragraph], columns: &[(f32, f32)], height: f32) {
        let top = self.cursor_y;

        for (index, &(x, column_width)) in columns.iter().enumerate() {
            let border = format!(
                "0.5 w 0 0 0 RG {} {} {} {} re S\n",
                fmt_num(x),
                fmt_num(top - height),
                fmt_num(column_width),
                fmt_num(height)
            );
            self.emit(border.as_bytes());

            let Some(cell) = row.get(index) else {
                continue;
            };
            let inner_width = column_width - 2.0 * CELL_PADDING;
            let text = LaidOutText::new(cell, inner_width);
            let mut line_top = top - CELL_PADDING;
            for line in &text.lines {
                self.draw_line(cell, line, x + CELL_PADDING, line_top, inner_width);
                line_top -= text.line_height();
            }
        }

        self.cursor_y -= height;
        self.at_page_top = false;
    }

    /// Draw one line whose top edge is at `top`, inside `[left, left + width]`
    fn draw_line(&mut self, paragraph: &Paragraph, line: &WrappedLine, left: f32, top: f32, width: f32) {
        if line.text.is_empty() {
            return;
        }

        let font = paragraph.font();
        let line_width = text_width(font, paragraph.font_size, &line.text);
        let word_spacing = if paragraph.align == Align::Justify && !line.ends_paragraph {
            justify_spacing(&line.text, line_width, width)
        } else {
            0.0
        };

        let ctx = TextRenderContext {
            font,
            font_size: paragraph.font_size,
            word_spacing,
            color: paragraph.color,
        };
        let x = left + calculate_x_offset(line_width, width, paragraph.align);
        let baseline = top - paragraph.font_size * ASCENT;

        let ops = generate_text_operators(&line.text, x, baseline, &ctx);
        self.emit(&ops);
    }
}

/// Height of a table row: its tallest cell plus padding
fn row_height(row: &[Paragraph], columns: &[(f32, f32)]) -> f32 {
    let content = row
        .iter()
        .zip(columns)
        .map(|(cell, &(_, width))| LaidOutText::new(cell, width - 2.0 * CELL_PADDING).height())
        .fold(0.0_f32, f32::max);
    content + 2.0 * CELL_PADDING
}
