//! # Page Geometry
//!
//! Fixed physical constants for an A4 sheet at the two target resolutions:
//! the interactive preview (96 dpi) and high-resolution export (300 dpi).
//!
//! The export pipeline re-runs the layout algorithm at export dimensions
//! rather than scaling preview coordinates, so margins and configured
//! spacings scale through [`RenderResolution::scale`] here and nowhere
//! else.

use serde::{Deserialize, Serialize};

use crate::config::PaperFormat;
use crate::layout::geometry::Size;

/// A4 preview canvas at 96 dpi
pub const A4_PREVIEW_WIDTH: f64 = 794.0;
pub const A4_PREVIEW_HEIGHT: f64 = 1123.0;

/// A4 export canvas at 300 dpi
pub const A4_EXPORT_WIDTH: f64 = 2480.0;
pub const A4_EXPORT_HEIGHT: f64 = 3508.0;

/// Preview margins (px); export margins scale proportionally
const MARGIN_TOP: f64 = 60.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const MARGIN_LEFT: f64 = 50.0;

/// Which pixel scale the layout targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderResolution {
    /// Interactive preview, 96 dpi
    Preview,
    /// Print-quality export, 300 dpi
    Export,
}

impl RenderResolution {
    /// Linear scale factor relative to the preview resolution.
    pub fn scale(&self) -> f64 {
        match self {
            RenderResolution::Preview => 1.0,
            RenderResolution::Export => A4_EXPORT_WIDTH / A4_PREVIEW_WIDTH,
        }
    }
}

/// Page margins in pixels at the target resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Resolved page dimensions and margins for one layout run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub size: Size,
    pub margins: Margins,
}

impl PageGeometry {
    /// Resolve the page geometry for a paper format at a resolution.
    pub fn resolve(format: PaperFormat, resolution: RenderResolution) -> Self {
        let scale = resolution.scale();
        match format {
            PaperFormat::A4 => PageGeometry {
                size: match resolution {
                    RenderResolution::Preview => Size::new(A4_PREVIEW_WIDTH, A4_PREVIEW_HEIGHT),
                    RenderResolution::Export => Size::new(A4_EXPORT_WIDTH, A4_EXPORT_HEIGHT),
                },
                margins: Margins {
                    top: MARGIN_TOP * scale,
                    right: MARGIN_RIGHT * scale,
                    bottom: MARGIN_BOTTOM * scale,
                    left: MARGIN_LEFT * scale,
                },
            },
        }
    }

    /// Width available to content between the side margins.
    pub fn available_width(&self) -> f64 {
        self.size.width - self.margins.left - self.margins.right
    }

    /// Height available to content between the top and bottom margins.
    pub fn available_height(&self) -> f64 {
        self.size.height - self.margins.top - self.margins.bottom
    }
}
