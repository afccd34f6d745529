//! Greedy page packing
//!
//! Images are consumed strictly in document order. Each page starts with an
//! empty 2×2 occupancy grid; landscape images need a whole free row, portrait
//! images take the first free cell in row-major order. The first image that
//! does not fit closes the page and leads the next one, so captions numbered
//! by document order always read in visual order.

use crate::constants::{GRID_COLS, GRID_ROWS, MAX_ITEMS_PER_PAGE};
use crate::types::{ImageItem, Orientation};

use super::{GridCell, PageLayout, Placement};

// =============================================================================
// Occupancy
// =============================================================================

/// Which cells of the current page are taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occupancy {
    cells: [[bool; GRID_COLS]; GRID_ROWS],
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free(&self, cell: GridCell) -> bool {
        !self.cells[cell.row][cell.col]
    }

    /// Every column of `row` is free
    pub fn is_row_free(&self, row: usize) -> bool {
        self.cells[row].iter().all(|taken| !taken)
    }

    /// First free row able to take a full-width placement
    pub fn first_free_row(&self) -> Option<usize> {
        (0..GRID_ROWS).find(|&row| self.is_row_free(row))
    }

    /// First free cell in row-major order
    pub fn first_free_cell(&self) -> Option<GridCell> {
        GridCell::all().find(|&cell| self.is_free(cell))
    }

    pub fn occupy(&mut self, placement: &Placement) {
        for cell in placement.occupied_cells() {
            debug_assert!(self.is_free(cell), "cell {:?} placed twice", cell);
            self.cells[cell.row][cell.col] = true;
        }
    }

    pub fn is_full(&self) -> bool {
        self.first_free_cell().is_none()
    }
}

// =============================================================================
// Packing
// =============================================================================

/// Try to place `item` on a page with the given occupancy.
///
/// Returns `None` when the item does not fit; the caller closes the page.
pub fn try_place(occupancy: &Occupancy, item: &ImageItem) -> Option<Placement> {
    match item.orientation {
        Orientation::Landscape => occupancy
            .first_free_row()
            .map(|row| Placement::full_row(item.clone(), row)),
        Orientation::Portrait => occupancy
            .first_free_cell()
            .map(|cell| Placement::single(item.clone(), cell)),
    }
}

/// Fill one page from the front of `items`, stopping at the first overflow.
pub fn fill_page(items: &[ImageItem]) -> PageLayout {
    let mut occupancy = Occupancy::new();
    let mut page = PageLayout::default();

    for item in items {
        if page.len() == MAX_ITEMS_PER_PAGE {
            break;
        }
        let Some(placement) = try_place(&occupancy, item) else {
            break;
        };
        occupancy.occupy(&placement);
        page.placements.push(placement);
    }

    page
}

/// Pack images into pages, preserving their order.
///
/// An empty input yields no pages.
pub fn pack(items: &[ImageItem]) -> Vec<PageLayout> {
    let mut pages = Vec::new();
    let mut cursor = 0;

    while cursor < items.len() {
        let page = fill_page(&items[cursor..]);
        // Any single image fits on an empty page, so every page makes progress
        assert!(
            !page.is_empty(),
            "image {} did not fit on an empty page",
            items[cursor].file_name
        );
        cursor += page.len();
        log::debug!(
            "Page {}: {} image(s), {} cell(s) used",
            pages.len() + 1,
            page.len(),
            page.occupied_cell_count()
        );
        pages.push(page);
    }

    pages
}

// =============================================================================
// Tests
// =============================================================================
