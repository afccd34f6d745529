//! Layout calculation for receipt pages
//!
//! This module handles all the geometric decisions made before rendering:
//! - Packing (which image goes on which page, in which cell)
//! - Grid geometry (cell rectangles, content boxes, caption strips)
//! - Fitting (scale and centering of an image inside its content box)

mod grid;
mod pack;
mod types;

pub use grid::*;
pub use pack::*;
pub use types::*;
