//! Text rendering utilities

use crate::document::Color;
use crate::encoding::{encode_text, hex_encode};
use crate::font::{text_units, units_to_points, StandardFont};
use crate::Align;

/// Context for rendering one line of text
pub struct TextRenderContext {
    /// Face used for the line
    pub font: StandardFont,
    /// Font size in points
    pub font_size: f32,
    /// Extra space added to each space character (justified lines)
    pub word_spacing: f32,
    /// Text color (RGB)
    pub color: Color,
}

/// A line produced by [`wrap_text`]
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    /// Last line before a hard break (never stretched when justifying)
    pub ends_paragraph: bool,
}

/// Format a number for a content stream (at most two decimals)
///
/// Non-finite values are written as 0 so the content stream stays valid.
pub(crate) fn fmt_num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Calculate X offset for text alignment inside a container
pub fn calculate_x_offset(text_width: f32, container_width: f32, align: Align) -> f32 {
    match align {
        Align::Left | Align::Justify => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Word spacing that stretches a line to the container width
pub fn justify_spacing(line: &str, text_width: f32, container_width: f32) -> f32 {
    let spaces = line.chars().filter(|c| *c == ' ').count();
    if spaces == 0 || text_width >= container_width {
        return 0.0;
    }
    (container_width - text_width) / spaces as f32
}

/// Generate PDF operators for one line of text
///
/// Creates the text operators (BT, rg, Tf, Tw, Td, Tj, ET) for a line whose
/// baseline starts at `(x, y)` in PDF coordinates (origin bottom-left).
pub fn generate_text_operators(text: &str, x: f32, y: f32, ctx: &TextRenderContext) -> Vec<u8> {
    let text_hex = hex_encode(&encode_text(text));
    let mut ops = String::new();

    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        fmt_num(ctx.color.r),
        fmt_num(ctx.color.g),
        fmt_num(ctx.color.b)
    ));
    ops.push_str(&format!(
        "/{} {} Tf\n",
        ctx.font.resource_name(),
        fmt_num(ctx.font_size)
    ));
    if ctx.word_spacing != 0.0 {
        ops.push_str(&format!("{} Tw\n", fmt_num(ctx.word_spacing)));
    }
    ops.push_str(&format!("{} {} Td\n", fmt_num(x), fmt_num(y)));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Split text into lines no wider than `max_width` points
///
/// Newlines are hard breaks. Runs of whitespace collapse to one space, and a
/// word wider than the line is broken between characters. Widths are kept as
/// running totals, so each character is measured once.
pub fn wrap_text(text: &str, font: StandardFont, font_size: f32, max_width: f32) -> Vec<WrappedLine> {
    let fits = |units: u64| units_to_points(units, font_size) <= max_width;
    let space_units = u64::from(font.char_width(' '));
    let mut lines = Vec::new();

    for hard_line in text.split('\n') {
        let mut current = String::new();
        let mut current_units = 0u64;

        for word in hard_line.split_whitespace() {
            let word_units = text_units(font, word);
            let candidate_units = if current.is_empty() {
                word_units
            } else {
                current_units + space_units + word_units
            };

            if fits(candidate_units) {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_units = candidate_units;
                continue;
            }

            if !current.is_empty() {
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    ends_paragraph: false,
                });
                current_units = 0;
            }

            // Break an overlong word between characters
            for c in word.chars() {
                let char_units = u64::from(font.char_width(c));
                if !current.is_empty() && !fits(current_units + char_units) {
                    lines.push(WrappedLine {
                        text: std::mem::take(&mut current),
                        ends_paragraph: false,
                    });
                    current_units = 0;
                }
                current.push(c);
                current_units += char_units;
            }
        }

        lines.push(WrappedLine {
            text: current,
            ends_paragraph: true,
        });
    }

    lines
}
