use crate::constants::MAX_ITEMS_PER_PAGE;
use crate::layout::PageLayout;
use crate::types::Orientation;

/// Summary of a packing plan
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackingStatistics {
    /// Images placed across all pages
    pub images: usize,
    /// Output pages
    pub pages: usize,
    pub landscape: usize,
    pub portrait: usize,
    /// Grid cells left unused across all pages
    pub empty_cells: usize,
    /// Pages with at least one unused cell, the last page included
    pub underfilled_pages: usize,
    /// Pages closed early because the next image did not fit
    pub overflow_pages: usize,
}

/// Calculate statistics for a packing plan
pub fn calculate_statistics(layouts: &[PageLayout]) -> PackingStatistics {
    let mut stats = PackingStatistics {
        pages: layouts.len(),
        ..Default::default()
    };

    for (index, page) in layouts.iter().enumerate() {
        for item in page.items() {
            stats.images += 1;
            match item.orientation {
                Orientation::Landscape => stats.landscape += 1,
                Orientation::Portrait => stats.portrait += 1,
            }
        }

        let free = MAX_ITEMS_PER_PAGE - page.occupied_cell_count();
        stats.empty_cells += free;
        if free > 0 {
            stats.underfilled_pages += 1;
        }

        // Only a following page proves the page was cut short
        let is_last = index + 1 == layouts.len();
        if !is_last && free > 0 {
            stats.overflow_pages += 1;
        }
    }

    stats
}
