//! Shared constants for receipt layout
//!
//! Default geometry mirrors a 2×2 grid on an A4 portrait page, measured in
//! PDF points.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = POINTS_PER_INCH / 25.4;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Grid
// =============================================================================

pub const GRID_ROWS: usize = 2;
pub const GRID_COLS: usize = 2;

/// A page never holds more than one image per cell
pub const MAX_ITEMS_PER_PAGE: usize = GRID_ROWS * GRID_COLS;

// =============================================================================
// Default Page Geometry
// =============================================================================

/// Outer margin on every side of the page (points)
pub const DEFAULT_MARGIN_PT: f32 = 30.0;

/// Gap between neighbouring cells (points)
pub const DEFAULT_SPACING_PT: f32 = 20.0;

/// Height reserved at the bottom of each cell for the caption (points)
pub const DEFAULT_CAPTION_STRIP_PT: f32 = 80.0;

// =============================================================================
// Captions
// =============================================================================

pub const DEFAULT_CAPTION_FONT_SIZE_PT: f32 = 24.0;

/// Distance from the bottom of the image down to the caption baseline (points)
pub const DEFAULT_CAPTION_GAP_PT: f32 = 30.0;

/// Descender allowance kept between the caption baseline and the strip bottom,
/// as a fraction of the font size
pub const CAPTION_DESCENT_RATIO: f32 = 0.25;

pub const CAPTION_PREFIX: &str = "Receipt No: ";

// =============================================================================
// Images
// =============================================================================

/// Resolution images are resampled to before embedding
pub const DEFAULT_IMAGE_DPI: f32 = 150.0;

/// File extensions accepted as receipt scans (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

pub const DEFAULT_INPUT_DIR: &str = "images";

// =============================================================================
// Fonts
// =============================================================================

/// Bold TrueType fonts probed first for captions
pub const DEFAULT_BOLD_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Regular TrueType fonts probed when no bold font is available
pub const DEFAULT_REGULAR_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
