//! Grid geometry
//!
//! Turns grid cells into page rectangles. The page interior (page minus outer
//! margins and the single inter-cell gap) is split evenly into a 2×2 grid.
//! Row 0 is the top row; rectangles use PDF coordinates with the origin at the
//! bottom-left corner of the page.

use crate::constants::{GRID_COLS, GRID_ROWS};
use crate::options::ReceiptOptions;
use crate::types::{ReceiptError, Result};

use super::{Placement, Rect};

/// Fixed page geometry for the 2×2 receipt grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub spacing_pt: f32,
    pub caption_strip_pt: f32,
    /// Width of a single cell in points
    pub cell_width_pt: f32,
    /// Height of a single cell in points
    pub cell_height_pt: f32,
}

impl GridGeometry {
    pub fn new(
        page_width_pt: f32,
        page_height_pt: f32,
        margin_pt: f32,
        spacing_pt: f32,
        caption_strip_pt: f32,
    ) -> Self {
        let cols = GRID_COLS as f32;
        let rows = GRID_ROWS as f32;
        let cell_width_pt = (page_width_pt - 2.0 * margin_pt - (cols - 1.0) * spacing_pt) / cols;
        let cell_height_pt = (page_height_pt - 2.0 * margin_pt - (rows - 1.0) * spacing_pt) / rows;

        Self {
            page_width_pt,
            page_height_pt,
            margin_pt,
            spacing_pt,
            caption_strip_pt,
            cell_width_pt,
            cell_height_pt,
        }
    }

    pub fn from_options(options: &ReceiptOptions) -> Self {
        let (page_width_pt, page_height_pt) = options.paper_size.dimensions_pt();
        Self::new(
            page_width_pt,
            page_height_pt,
            options.margin_pt,
            options.spacing_pt,
            options.caption_strip_pt,
        )
    }

    /// Cells must have positive size and leave room above the caption strip
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_width_pt > 0.0 && self.cell_height_pt > 0.0) {
            return Err(ReceiptError::Config(format!(
                "Margins and spacing leave no room for cells ({:.1}x{:.1} pt)",
                self.cell_width_pt, self.cell_height_pt
            )));
        }
        if !(self.cell_height_pt - self.caption_strip_pt > 0.0) {
            return Err(ReceiptError::Config(format!(
                "Caption strip ({:.1} pt) must be shorter than a cell ({:.1} pt)",
                self.caption_strip_pt, self.cell_height_pt
            )));
        }
        Ok(())
    }

    /// Rectangle covered by a placement starting at (`row`, `col`) and spanning
    /// `col_span` columns.
    pub fn cell_rect(&self, row: usize, col: usize, col_span: usize) -> Rect {
        let span = col_span.max(1) as f32;
        let x = self.margin_pt + col as f32 * (self.cell_width_pt + self.spacing_pt);
        let y = self.page_height_pt
            - self.margin_pt
            - (row + 1) as f32 * self.cell_height_pt
            - row as f32 * self.spacing_pt;
        let width = self.cell_width_pt * span + self.spacing_pt * (span - 1.0);

        Rect::new(x, y, width, self.cell_height_pt)
    }

    pub fn placement_rect(&self, placement: &Placement) -> Rect {
        self.cell_rect(placement.row, placement.col, placement.col_span)
    }

    /// Area of `rect` available to the image: everything above the caption strip
    pub fn content_box(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x,
            rect.y + self.caption_strip_pt,
            rect.width,
            (rect.height - self.caption_strip_pt).max(0.0),
        )
    }

    /// Strip at the bottom of `rect` reserved for the caption
    pub fn caption_strip(&self, rect: &Rect) -> Rect {
        Rect::new(
            rect.x,
            rect.y,
            rect.width,
            self.caption_strip_pt.min(rect.height),
        )
    }
}

// =============================================================================
// Fitting
// =============================================================================

/// Uniform scale that makes an image fit entirely inside a box.
pub fn fit_scale(image_width: f32, image_height: f32, box_width: f32, box_height: f32) -> f32 {
    (box_width / image_width).min(box_height / image_height)
}

/// Scale an image to fit `bounds` and center it on both axes.
pub fn fit_and_center(bounds: &Rect, image_width: f32, image_height: f32) -> Rect {
    let scale = fit_scale(image_width, image_height, bounds.width, bounds.height);
    let width = image_width * scale;
    let height = image_height * scale;

    Rect::new(
        bounds.x + (bounds.width - width) / 2.0,
        bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn simple_grid() -> GridGeometry {
        // 540x840 page, 20pt margins, 20pt gap: cells 240x390
        GridGeometry::new(540.0, 840.0, 20.0, 20.0, 80.0)
    }

    #[test]
    fn test_cell_size() {
        let grid = simple_grid();
        assert_eq!(grid.cell_width_pt, 240.0);
        assert_eq!(grid.cell_height_pt, 390.0);
    }

    #[test]
    fn test_a4_defaults() {
        let grid = GridGeometry::from_options(&ReceiptOptions::default());
        assert!(approx(grid.cell_width_pt, (595.2756 - 60.0 - 20.0) / 2.0));
        assert!(approx(grid.cell_height_pt, (841.8898 - 60.0 - 20.0) / 2.0));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_cell_rects() {
        let grid = simple_grid();

        // Top-left
        assert_eq!(grid.cell_rect(0, 0, 1), Rect::new(20.0, 430.0, 240.0, 390.0));
        // Top-right
        assert_eq!(grid.cell_rect(0, 1, 1), Rect::new(280.0, 430.0, 240.0, 390.0));
        // Bottom-left
        assert_eq!(grid.cell_rect(1, 0, 1), Rect::new(20.0, 20.0, 240.0, 390.0));
        // Bottom-right
        assert_eq!(grid.cell_rect(1, 1, 1), Rect::new(280.0, 20.0, 240.0, 390.0));
    }

    #[test]
    fn test_spanning_rect_includes_gap() {
        let grid = simple_grid();
        let rect = grid.cell_rect(1, 0, 2);
        assert_eq!(rect.width, 500.0);
        assert_eq!(rect.x, 20.0);
        assert_eq!(rect.right(), grid.cell_rect(1, 1, 1).right());
    }

    #[test]
    fn test_content_box_and_caption_strip() {
        let grid = simple_grid();
        let rect = grid.cell_rect(0, 0, 1);

        let content = grid.content_box(&rect);
        assert_eq!(content, Rect::new(20.0, 510.0, 240.0, 310.0));
        assert_eq!(content.top(), rect.top());

        let strip = grid.caption_strip(&rect);
        assert_eq!(strip, Rect::new(20.0, 430.0, 240.0, 80.0));
        assert_eq!(strip.top(), content.y);
    }

    #[test]
    fn test_fit_scale_binding_height() {
        // 800x1600 into 300x500: width allows 0.375, height 0.3125
        assert_eq!(fit_scale(800.0, 1600.0, 300.0, 500.0), 0.3125);
    }

    #[test]
    fn test_fit_scale_binding_width() {
        assert_eq!(fit_scale(1600.0, 800.0, 400.0, 400.0), 0.25);
    }

    #[test]
    fn test_fit_scale_small_image_fits_box_exactly() {
        // Scale is exactly the fit ratio, never larger
        let scale = fit_scale(100.0, 200.0, 300.0, 500.0);
        assert_eq!(scale, 2.5);
        assert!(100.0 * scale <= 300.0);
        assert!(200.0 * scale <= 500.0);
    }

    #[test]
    fn test_fit_and_center() {
        let bounds = Rect::new(10.0, 20.0, 300.0, 500.0);
        let fitted = fit_and_center(&bounds, 800.0, 1600.0);

        assert!(approx(fitted.width, 250.0));
        assert!(approx(fitted.height, 500.0));
        assert!(approx(fitted.center_x(), bounds.center_x()));
        assert!(approx(fitted.center_y(), bounds.center_y()));
        assert!(bounds.contains(&fitted));
    }

    #[test]
    fn test_validate_rejects_oversized_margins() {
        let grid = GridGeometry::new(100.0, 100.0, 60.0, 10.0, 10.0);
        assert!(grid.validate().is_err());
    }
}
