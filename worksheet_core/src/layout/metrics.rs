//! # Font Metrics Estimation
//!
//! Approximate text measurement for cell sizing. The layout engine cannot
//! measure real glyphs - that is the render surface's job - so it
//! estimates from per-character advance-width factors and reconciles with
//! the renderer through [`fit_font_size`] (shrink the font when the
//! measured width exceeds the assigned cell).

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Base font size for worksheet problems at preview resolution (px)
pub const BASE_FONT_SIZE: f64 = 22.0;

/// Line height as a multiple of font size
pub const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// Vertical padding added above and below the text line (px, per side)
pub const CELL_PADDING: f64 = 5.0;

/// Smallest font the fit pass will shrink to (px)
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Fallback advance width for characters not in the table (em)
const DEFAULT_ADVANCE_EM: f64 = 0.56;

/// Advance widths in em for the characters worksheet text uses.
static ADVANCE_WIDTHS: Lazy<HashMap<char, f64>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for digit in '0'..='9' {
        map.insert(digit, 0.56);
    }
    map.insert('+', 0.62);
    map.insert('-', 0.40);
    map.insert('=', 0.62);
    map.insert(' ', 0.28);
    map
});

/// Estimate the rendered width of `text` at `font_size` pixels.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars()
        .map(|c| ADVANCE_WIDTHS.get(&c).copied().unwrap_or(DEFAULT_ADVANCE_EM))
        .sum::<f64>()
        * font_size
}

/// Estimate the cell height needed for one line of problem text.
pub fn estimate_cell_height(font_size: f64) -> f64 {
    font_size * LINE_HEIGHT_FACTOR + 2.0 * CELL_PADDING
}

/// Shrink a font size until `measured_width(size) <= max_width`.
///
/// `measure` is whatever text measurement the caller has - the renderer's
/// real `measure_text`, or [`estimate_text_width`] when only the estimate
/// exists. Never shrinks below [`MIN_FONT_SIZE`].
pub fn fit_font_size<F>(max_width: f64, mut font_size: f64, mut measure: F) -> f64
where
    F: FnMut(f64) -> f64,
{
    while font_size > MIN_FONT_SIZE && measure(font_size) > max_width {
        font_size -= 1.0;
    }
    font_size.max(MIN_FONT_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_font_size() {
        let narrow = estimate_text_width("7 + 5 =", 10.0);
        let wide = estimate_text_width("7 + 5 =", 20.0);
        assert!((wide - 2.0 * narrow).abs() < 1e-9);
    }

    #[test]
    fn test_longer_text_is_wider() {
        let short = estimate_text_width("7 + 5 =", BASE_FONT_SIZE);
        let long = estimate_text_width("97 + 85 =", BASE_FONT_SIZE);
        assert!(long > short);
    }

    #[test]
    fn test_cell_height_includes_padding() {
        let height = estimate_cell_height(BASE_FONT_SIZE);
        assert!((height - (22.0 * 1.4 + 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_fit_font_size_shrinks_to_fit() {
        let text = "100 + 100 =";
        let fitted = fit_font_size(60.0, BASE_FONT_SIZE, |size| {
            estimate_text_width(text, size)
        });
        assert!(fitted < BASE_FONT_SIZE);
        assert!(estimate_text_width(text, fitted) <= 60.0);
    }

    #[test]
    fn test_fit_font_size_respects_minimum() {
        let fitted = fit_font_size(1.0, BASE_FONT_SIZE, |size| size * 100.0);
        assert_eq!(fitted, MIN_FONT_SIZE);
    }

    #[test]
    fn test_fit_font_size_keeps_fitting_size() {
        let fitted = fit_font_size(1000.0, BASE_FONT_SIZE, |_| 10.0);
        assert_eq!(fitted, BASE_FONT_SIZE);
    }
}
