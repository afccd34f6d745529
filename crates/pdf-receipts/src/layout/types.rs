//! Layout data types
//!
//! These types sit between packing and rendering: the packer produces
//! [`PageLayout`]s, the grid geometry turns their cells into [`Rect`]s.

use crate::constants::{GRID_COLS, GRID_ROWS};
use crate::types::ImageItem;

/// Position within the 2×2 grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// All cells in row-major order
    pub fn all() -> impl Iterator<Item = GridCell> {
        (0..GRID_ROWS).flat_map(|row| (0..GRID_COLS).map(move |col| GridCell::new(row, col)))
    }
}

/// An image assigned to one or two cells of a page.
///
/// Landscape images always span a full row (`col == 0`, `col_span == 2`);
/// portrait images occupy exactly one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub item: ImageItem,
    pub row: usize,
    pub col: usize,
    pub col_span: usize,
}

impl Placement {
    /// Rows spanned by any placement
    pub const ROW_SPAN: usize = 1;

    pub fn single(item: ImageItem, cell: GridCell) -> Self {
        Self {
            item,
            row: cell.row,
            col: cell.col,
            col_span: 1,
        }
    }

    pub fn full_row(item: ImageItem, row: usize) -> Self {
        Self {
            item,
            row,
            col: 0,
            col_span: GRID_COLS,
        }
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.row, self.col)
    }

    /// Cells covered by this placement
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (self.col..self.col + self.col_span).map(move |col| GridCell::new(self.row, col))
    }
}

/// One output page: placements in the order they were packed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub placements: Vec<Placement>,
}

impl PageLayout {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of grid cells covered on this page
    pub fn occupied_cell_count(&self) -> usize {
        self.placements.iter().map(|p| p.col_span).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &ImageItem> {
        self.placements.iter().map(|p| &p.item)
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether `other` lies entirely inside this rectangle (with a small tolerance)
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.top() <= self.top() + EPS
    }
}
