//! Display-width helpers for fixed-width table cells.
//!
//! Widths are measured in terminal columns, not Unicode scalar count, so
//! wide characters line up with their narrow neighbours.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates text to the provided display width and appends an ellipsis.
///
/// Widths of three columns or fewer fall back to dots.
pub(crate) fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target_width = max_width.saturating_sub(3);
    let mut truncated = String::new();
    let mut current_width = 0;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + char_width > target_width {
            break;
        }
        truncated.push(ch);
        current_width += char_width;
    }
    format!("{truncated}...")
}

/// Truncates `text` to `width` columns and pads it with spaces to fill them.
pub(crate) fn fit_cell(text: &str, width: usize) -> String {
    let mut cell = truncate_with_ellipsis(text, width);
    let padding = width.saturating_sub(cell.width());
    cell.extend(std::iter::repeat_n(' ', padding));
    cell
}
