//! # Render Collaborator Interface
//!
//! The core does not paint pixels. This module defines the seam a
//! rendering collaborator must satisfy and the walk that drives it:
//! clear, background, title, then every positioned problem, shrinking the
//! font whenever the surface's real measurement exceeds the assigned
//! cell.
//!
//! Layout estimates and real text measurement reconcile here - the layout
//! engine sizes cells from [`crate::layout::metrics`] estimates, and
//! [`render_worksheet`] trusts the surface's `measure_text` for the final
//! fit.

use serde::{Deserialize, Serialize};

use crate::config::{BackgroundStyle, WorksheetConfig};
use crate::errors::WorksheetResult;
use crate::layout::metrics::{fit_font_size, BASE_FONT_SIZE, CELL_PADDING};
use crate::layout::{LayoutResult, Point};

/// Font parameters for one draw-text call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: f64,
    pub bold: bool,
}

impl FontStyle {
    /// Problem-text style at the given size.
    pub fn problem(size: f64) -> Self {
        FontStyle {
            family: "sans-serif".to_string(),
            size,
            bold: false,
        }
    }

    /// Title style, sized relative to the problem font.
    pub fn title(scale: f64) -> Self {
        FontStyle {
            family: "sans-serif".to_string(),
            size: BASE_FONT_SIZE * 1.3 * scale,
            bold: true,
        }
    }
}

/// Background description passed to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSpec {
    pub style: BackgroundStyle,
    /// Image URL when `style` is [`BackgroundStyle::Custom`]
    pub custom_url: Option<String>,
}

/// A drawing surface the worksheet renders onto.
///
/// Implemented outside the core - an HTML canvas, an image rasterizer, a
/// test mock. `measure_text` must return the width the surface would
/// actually paint, which may disagree with the layout engine's estimate.
pub trait RenderSurface {
    /// Reset the surface to a blank page.
    fn clear(&mut self);

    /// Paint the page background.
    fn draw_background(&mut self, spec: &BackgroundSpec) -> WorksheetResult<()>;

    /// Draw a text run with its baseline-left anchor at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &FontStyle);

    /// Width `text` would occupy in `style`, in surface pixels.
    fn measure_text(&mut self, text: &str, style: &FontStyle) -> f64;
}

/// Paint a calculated layout onto a surface.
///
/// Every problem is drawn inside its assigned cell; when the measured
/// text is wider than the cell, the font scales down until it fits.
pub fn render_worksheet<S: RenderSurface>(
    surface: &mut S,
    layout: &LayoutResult,
    config: &WorksheetConfig,
) -> WorksheetResult<()> {
    let scale = layout.page_size.width / crate::layout::page::A4_PREVIEW_WIDTH;

    surface.clear();
    surface.draw_background(&BackgroundSpec {
        style: config.background_style,
        custom_url: config.custom_background_url.clone(),
    })?;

    if !config.title.is_empty() {
        let style = FontStyle::title(scale);
        surface.draw_text(
            &config.title,
            Point::new(layout.margins.left, layout.margins.top * 0.75),
            &style,
        );
    }

    for cell in &layout.positioned_problems {
        let text = cell.problem.expression(config.show_answers);
        let padding = CELL_PADDING * scale;
        let max_width = cell.width - 2.0 * padding;

        let size = fit_font_size(max_width, BASE_FONT_SIZE * scale, |candidate| {
            surface.measure_text(&text, &FontStyle::problem(candidate))
        });
        let style = FontStyle::problem(size);

        // Baseline roughly centered in the cell
        let baseline = cell.y + (cell.height + size) / 2.0;
        surface.draw_text(&text, Point::new(cell.x + padding, baseline), &style);
    }

    Ok(())
}
