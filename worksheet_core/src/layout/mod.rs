//! # Layout Engine
//!
//! Transforms a list of problems plus a configuration into absolute page
//! coordinates: a multi-column grid on a fixed A4 page, refined by
//! deterministic optimization passes and validated before it is returned.
//!
//! The engine is a pure function of its inputs - no randomness, no I/O.
//! Calling it twice with the same problems and configuration yields
//! byte-identical positions. The export pipeline re-invokes the same
//! algorithm at export resolution instead of scaling preview coordinates
//! (see [`page::RenderResolution`]).
//!
//! ## Pipeline
//!
//! 1. Resolve page geometry, columns, and spacing from the configuration
//! 2. Assign problem `i` to `row = i / columns`, `column = i % columns`
//! 3. Redistribute vertical slack so content is balanced, not top-packed
//! 4. Align cells within their columns (pluggable, left by default)
//! 5. Sweep once for same-row overlaps and push collisions right
//! 6. Validate: finite positive extents, no overlap, in page bounds
//!
//! A layout that fails validation fails the whole call - the caller never
//! receives a partially-correct layout.
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::config::WorksheetConfig;
//! use worksheet_core::generator::generate_problems;
//! use worksheet_core::layout::calculate_layout;
//!
//! let config = WorksheetConfig::default();
//! let problems = generate_problems(&config, Some(8)).unwrap();
//! let layout = calculate_layout(&problems, &config).unwrap();
//!
//! assert_eq!(layout.columns, 2);
//! assert_eq!(layout.rows, 4);
//! assert_eq!(layout.positioned_problems.len(), 8);
//! ```

pub mod geometry;
pub mod metrics;
pub mod page;

use serde::{Deserialize, Serialize};

use crate::config::WorksheetConfig;
use crate::errors::{WorksheetError, WorksheetResult};
use crate::problem::Problem;

pub use geometry::{Point, Rect, Size};
pub use page::{Margins, PageGeometry, RenderResolution};

/// Positions closer than this on the y axis count as the same visual row
/// (preview px, scaled to the target resolution)
pub const SAME_ROW_TOLERANCE: f64 = 10.0;

/// Gap inserted when the overlap sweep pushes a cell right (preview px)
pub const OVERLAP_PUSH_GAP: f64 = 20.0;

/// Floor for compressed inter-row spacing (preview px)
const MIN_VERTICAL_SPACING: f64 = 4.0;

/// Rows thinner than this cannot hold a problem line (preview px)
const MIN_ROW_HEIGHT: f64 = 16.0;

/// A problem with its computed cell rectangle and grid coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedProblem {
    pub problem: Problem,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Grid row, `index / columns`
    pub row: usize,
    /// Grid column, `index % columns`
    pub column: usize,
    /// Position in the original problem list
    pub index: usize,
}

impl PositionedProblem {
    /// The cell rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Horizontal alignment of cells within their column.
///
/// Left is the shipped behavior; Center and Right are extension points
/// that matter once cells shrink to their content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A validated page layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub positioned_problems: Vec<PositionedProblem>,
    pub page_size: Size,
    pub margins: Margins,
    pub columns: usize,
    pub rows: usize,
}

/// Read-only layout statistics for inspection and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Mean gap between grid-adjacent cells (px)
    pub average_spacing: f64,
    /// Content bounding-box width over page width
    pub horizontal_utilization: f64,
    /// Content bounding-box height over page height
    pub vertical_utilization: f64,
    /// Smallest rectangle containing every cell
    pub bounding_box: Rect,
}

impl LayoutResult {
    /// Compute inspection statistics over the placed cells.
    pub fn stats(&self) -> LayoutStats {
        let cells = &self.positioned_problems;
        if cells.is_empty() {
            return LayoutStats {
                average_spacing: 0.0,
                horizontal_utilization: 0.0,
                vertical_utilization: 0.0,
                bounding_box: Rect::default(),
            };
        }
        let mut bounding_box = cells[0].rect();
        for cell in &cells[1..] {
            bounding_box = bounding_box.union(&cell.rect());
        }

        let mut gaps = Vec::new();
        for cell in cells {
            // Right-hand neighbor in the same row
            if let Some(right) = cells
                .iter()
                .find(|c| c.row == cell.row && c.column == cell.column + 1)
            {
                gaps.push(right.x - cell.rect().right());
            }
            // Neighbor in the row below, same column
            if let Some(below) = cells
                .iter()
                .find(|c| c.column == cell.column && c.row == cell.row + 1)
            {
                gaps.push(below.y - cell.rect().bottom());
            }
        }
        let average_spacing = if gaps.is_empty() {
            0.0
        } else {
            gaps.iter().sum::<f64>() / gaps.len() as f64
        };

        LayoutStats {
            average_spacing,
            horizontal_utilization: bounding_box.width / self.page_size.width,
            vertical_utilization: bounding_box.height / self.page_size.height,
            bounding_box,
        }
    }
}

/// Calculate a preview-resolution layout.
///
/// See [`calculate_layout_at`] for the full contract.
pub fn calculate_layout(
    problems: &[Problem],
    config: &WorksheetConfig,
) -> WorksheetResult<LayoutResult> {
    calculate_layout_at(problems, config, RenderResolution::Preview)
}

/// Calculate a layout at the given resolution.
///
/// Fails with [`WorksheetError::EmptyInput`] when `problems` is empty,
/// with a validation error when the configuration is invalid, and with
/// [`WorksheetError::InvalidLayout`] when the final layout cannot satisfy
/// the no-overlap/in-bounds invariants.
pub fn calculate_layout_at(
    problems: &[Problem],
    config: &WorksheetConfig,
    resolution: RenderResolution,
) -> WorksheetResult<LayoutResult> {
    if problems.is_empty() {
        return Err(WorksheetError::empty_input("problems"));
    }
    config.validate()?;

    let page = PageGeometry::resolve(config.paper_format, resolution);
    let params = config.layout.params();
    let scale = resolution.scale();

    let columns = params.columns;
    let rows = problems.len().div_ceil(columns);
    let h_spacing = params.horizontal_spacing * scale;
    let base_v_spacing = params.vertical_spacing * scale;

    let available_width = page.available_width();
    let available_height = page.available_height();
    let column_width = (available_width - (columns as f64 - 1.0) * h_spacing) / columns as f64;

    let (row_height, v_spacing) = resolve_rows(
        rows,
        metrics::estimate_cell_height(metrics::BASE_FONT_SIZE * scale),
        base_v_spacing,
        MIN_VERTICAL_SPACING * scale,
        MIN_ROW_HEIGHT * scale,
        available_height,
    )?;

    let mut positioned = assign_grid(
        problems,
        &page,
        columns,
        column_width,
        row_height,
        h_spacing,
        v_spacing,
    );

    redistribute_vertical_slack(&mut positioned, rows, row_height, v_spacing, &page);
    align_horizontal(
        &mut positioned,
        Alignment::default(),
        &page,
        column_width,
        h_spacing,
    );
    resolve_overlaps(&mut positioned, scale);

    let layout = LayoutResult {
        positioned_problems: positioned,
        page_size: page.size,
        margins: page.margins,
        columns,
        rows,
    };
    validate_layout(&layout)?;
    Ok(layout)
}

/// Pick the row height and effective vertical spacing.
///
/// Rows take the estimated cell height while the grid fits; when the
/// configured spacing would overflow the page the spacing compresses, and
/// past that the rows themselves take the exact per-row share. The page
/// bound always holds for a layout that is returned.
fn resolve_rows(
    rows: usize,
    estimated_height: f64,
    base_v_spacing: f64,
    min_v_spacing: f64,
    min_row_height: f64,
    available_height: f64,
) -> WorksheetResult<(f64, f64)> {
    let rows_f = rows as f64;
    let gaps = rows_f - 1.0;

    if rows_f * estimated_height + gaps * base_v_spacing <= available_height {
        return Ok((estimated_height, base_v_spacing));
    }

    // Compress spacing before touching row height
    if rows > 1 {
        let compressed = (available_height - rows_f * estimated_height) / gaps;
        if compressed >= min_v_spacing {
            return Ok((estimated_height, compressed));
        }
    }

    let row_height = (available_height - gaps * min_v_spacing) / rows_f;
    if row_height < min_row_height {
        return Err(WorksheetError::invalid_layout(format!(
            "{} rows cannot fit the page: row height {:.1}px is below the {:.0}px minimum",
            rows, row_height, min_row_height
        )));
    }
    Ok((row_height, min_v_spacing))
}

/// Assign each problem to its grid cell.
fn assign_grid(
    problems: &[Problem],
    page: &PageGeometry,
    columns: usize,
    column_width: f64,
    row_height: f64,
    h_spacing: f64,
    v_spacing: f64,
) -> Vec<PositionedProblem> {
    problems
        .iter()
        .enumerate()
        .map(|(index, problem)| {
            let row = index / columns;
            let column = index % columns;
            PositionedProblem {
                problem: problem.clone(),
                x: page.margins.left + column as f64 * (column_width + h_spacing),
                y: page.margins.top + row as f64 * (row_height + v_spacing),
                width: column_width,
                height: row_height,
                row,
                column,
                index,
            }
        })
        .collect()
}

/// Pass 1: distribute leftover vertical space as extra inter-row spacing,
/// proportional to row index, so content sits balanced on the page.
fn redistribute_vertical_slack(
    positioned: &mut [PositionedProblem],
    rows: usize,
    row_height: f64,
    v_spacing: f64,
    page: &PageGeometry,
) {
    let rows_f = rows as f64;
    let content_height = rows_f * row_height + (rows_f - 1.0) * v_spacing;
    let slack = page.available_height() - content_height;
    if slack <= 0.0 {
        return;
    }

    let extra_per_gap = slack / (rows_f + 1.0);
    for cell in positioned.iter_mut() {
        cell.y += extra_per_gap * (cell.row as f64 + 1.0);
    }
}

/// Pass 2: align cells within their columns.
///
/// Cells currently span the full column, so Left re-anchors to the column
/// origin and Center/Right collapse to the same position; they become
/// meaningful when cells shrink to content width.
fn align_horizontal(
    positioned: &mut [PositionedProblem],
    alignment: Alignment,
    page: &PageGeometry,
    column_width: f64,
    h_spacing: f64,
) {
    for cell in positioned.iter_mut() {
        let column_origin = page.margins.left + cell.column as f64 * (column_width + h_spacing);
        let free = column_width - cell.width;
        cell.x = match alignment {
            Alignment::Left => column_origin,
            Alignment::Center => column_origin + free / 2.0,
            Alignment::Right => column_origin + free,
        };
    }
}

/// Pass 3: one deterministic sweep over same-visual-row neighbors.
///
/// Cells are visited sorted by (y rounded to the nearest 10, then x);
/// when two adjacent cells share a visual row and their x extents
/// overlap, the later one is pushed to `previous.right + gap`.
fn resolve_overlaps(positioned: &mut [PositionedProblem], scale: f64) {
    let tolerance = SAME_ROW_TOLERANCE * scale;
    let gap = OVERLAP_PUSH_GAP * scale;

    let mut order: Vec<usize> = (0..positioned.len()).collect();
    order.sort_by(|&a, &b| {
        let ya = (positioned[a].y / 10.0).round();
        let yb = (positioned[b].y / 10.0).round();
        ya.total_cmp(&yb)
            .then(positioned[a].x.total_cmp(&positioned[b].x))
    });

    for pair in order.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let same_row = (positioned[next].y - positioned[prev].y).abs() < tolerance;
        let x_overlap = positioned[next].x < positioned[prev].rect().right()
            && positioned[prev].x < positioned[next].rect().right();
        if same_row && x_overlap {
            positioned[next].x = positioned[prev].rect().right() + gap;
        }
    }
}

/// Reject any layout violating the geometric invariants.
fn validate_layout(layout: &LayoutResult) -> WorksheetResult<()> {
    for cell in &layout.positioned_problems {
        let rect = cell.rect();
        if !rect.width.is_finite()
            || !rect.height.is_finite()
            || !rect.x.is_finite()
            || !rect.y.is_finite()
        {
            return Err(WorksheetError::invalid_layout(format!(
                "problem {} has a non-finite rectangle",
                cell.index
            )));
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(WorksheetError::invalid_layout(format!(
                "problem {} has a non-positive extent",
                cell.index
            )));
        }
        if !rect.within(layout.page_size) {
            return Err(WorksheetError::invalid_layout(format!(
                "problem {} extends outside the page",
                cell.index
            )));
        }
    }

    let cells = &layout.positioned_problems;
    for i in 0..cells.len() {
        for j in (i + 1)..cells.len() {
            if cells[i].rect().intersects(&cells[j].rect()) {
                return Err(WorksheetError::invalid_layout(format!(
                    "problems {} and {} overlap",
                    cells[i].index, cells[j].index
                )));
            }
        }
    }

    Ok(())
}
