//! Page rendering
//!
//! For every placement: decode the image, fit it into the content box of its
//! cell, resample the pixels to the drawn size and hand them to the canvas,
//! then draw the caption centered beneath the image. Images are processed one
//! at a time in document order.

mod canvas;
mod font;

pub use canvas::{PageCanvas, PdfCanvas};
pub use font::{CaptionFont, FontSource, font_sources, load_font_file};

use crate::constants::{CAPTION_DESCENT_RATIO, POINTS_PER_INCH};
use crate::layout::{GridGeometry, PageLayout, Placement, Rect, fit_and_center};
use crate::options::ReceiptOptions;
use crate::source::decode_image;
use crate::types::{ReceiptError, Result};
use image::RgbImage;
use image::imageops::FilterType;

// =============================================================================
// Placement Geometry
// =============================================================================

/// Where a placement's image and caption land on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPlacement {
    pub cell: Rect,
    pub content: Rect,
    pub image: Rect,
}

pub fn resolve_placement(geometry: &GridGeometry, placement: &Placement) -> ResolvedPlacement {
    let cell = geometry.placement_rect(placement);
    let content = geometry.content_box(&cell);
    let image = fit_and_center(
        &content,
        placement.item.width as f32,
        placement.item.height as f32,
    );
    ResolvedPlacement {
        cell,
        content,
        image,
    }
}

/// Baseline origin of a caption of `text_width` points drawn under `image`.
///
/// The caption is centered on the image and sits `gap_pt` below it, but never
/// lower than the caption strip allows.
pub fn caption_origin(
    image: &Rect,
    strip: &Rect,
    text_width: f32,
    gap_pt: f32,
    font_size_pt: f32,
) -> (f32, f32) {
    let x = image.center_x() - text_width / 2.0;
    let lowest = strip.y + font_size_pt * CAPTION_DESCENT_RATIO;
    let y = (image.y - gap_pt).max(lowest);
    (x, y)
}

/// Pixel size to resample to for drawing at `target` size and `dpi`.
///
/// Never exceeds the natural size: small scans are stretched by the PDF
/// transform instead of being upsampled.
pub fn target_pixel_size(natural: (u32, u32), target: &Rect, dpi: f32) -> (u32, u32) {
    let to_px = |pt: f32| (pt / POINTS_PER_INCH * dpi).round().max(1.0) as u32;
    (
        to_px(target.width).min(natural.0).max(1),
        to_px(target.height).min(natural.1).max(1),
    )
}

// =============================================================================
// Rendering
// =============================================================================

fn load_pixels(placement: &Placement, target: &Rect, dpi: f32) -> Result<RgbImage> {
    let path = &placement.item.path;
    let decoded = decode_image(path)?;

    let natural = (decoded.width(), decoded.height());
    let (width, height) = target_pixel_size(natural, target, dpi);
    let rgb = decoded.to_rgb8();

    if (width, height) == natural {
        Ok(rgb)
    } else {
        Ok(image::imageops::resize(&rgb, width, height, FilterType::Lanczos3))
    }
}

/// Draw one placement: image first, caption beneath it.
pub fn render_placement<C: PageCanvas>(
    canvas: &mut C,
    geometry: &GridGeometry,
    placement: &Placement,
    options: &ReceiptOptions,
) -> Result<()> {
    let resolved = resolve_placement(geometry, placement);
    log::debug!(
        "{} -> cell ({}, {}) span {}: {:.1}x{:.1} pt at ({:.1}, {:.1})",
        placement.item.file_name,
        placement.row,
        placement.col,
        placement.col_span,
        resolved.image.width,
        resolved.image.height,
        resolved.image.x,
        resolved.image.y
    );

    let pixels = load_pixels(placement, &resolved.image, options.image_dpi)?;
    canvas.draw_image(pixels, resolved.image)?;

    let caption = &placement.item.caption;
    let (x, y) = caption_origin(
        &resolved.image,
        &geometry.caption_strip(&resolved.cell),
        canvas.text_width(caption),
        options.caption_gap_pt,
        options.caption_font_size_pt,
    );
    canvas.draw_text(caption, x, y)
}

/// Draw every page in order, committing each one when its placements are done.
pub fn render_pages<C: PageCanvas>(
    canvas: &mut C,
    layouts: &[PageLayout],
    options: &ReceiptOptions,
) -> Result<()> {
    let geometry = GridGeometry::from_options(options);
    geometry.validate()?;

    for (index, layout) in layouts.iter().enumerate() {
        for placement in &layout.placements {
            render_placement(canvas, &geometry, placement, options)?;
        }
        canvas.finish_page()?;
        log::debug!("Finished page {} of {}", index + 1, layouts.len());
    }
    Ok(())
}

/// Render page layouts into PDF bytes.
pub fn render_document(layouts: &[PageLayout], options: &ReceiptOptions) -> Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(options)?;
    render_pages(&mut canvas, layouts, options)?;
    log::info!("Rendered {} page(s)", canvas.page_count());
    canvas.into_bytes()
}

// =============================================================================
// Tests
// =============================================================================
