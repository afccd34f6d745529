//! Lay out scanned receipt images on a 2×2 grid of PDF pages.
//!
//! The pipeline is:
//! 1. [`list_images`]: discover images, derive captions, classify orientation
//! 2. [`pack`]: greedily assign images to pages and grid cells
//! 3. [`generate_pdf`]: fit, draw and caption every image
//! 4. [`save_pdf`]: write the document atomically

pub mod constants;
pub mod io;
pub mod layout;
mod options;
pub mod render;
pub mod source;
mod stats;
mod types;

pub use io::{default_output_path, output_file_name, save_pdf};
pub use layout::{GridCell, GridGeometry, PageLayout, Placement, Rect, pack};
pub use options::*;
pub use source::list_images;
pub use stats::{PackingStatistics, calculate_statistics};
pub use types::*;

use std::path::Path;

/// Render page layouts to PDF bytes.
pub async fn generate_pdf(layouts: &[PageLayout], options: &ReceiptOptions) -> Result<Vec<u8>> {
    let layouts = layouts.to_vec();
    let options = options.clone();

    // Decoding, resampling and PDF assembly are CPU-bound
    tokio::task::spawn_blocking(move || render::render_document(&layouts, &options)).await?
}

/// Discover and pack the images of `input_dir` without rendering anything.
pub async fn plan(input_dir: impl AsRef<Path>) -> Result<(Vec<ImageItem>, Vec<PageLayout>)> {
    let items = list_images(input_dir).await?;
    let layouts = pack(&items);
    log::info!(
        "Planned {} image(s) on {} page(s)",
        items.len(),
        layouts.len()
    );
    Ok((items, layouts))
}

/// Convert a directory of receipt images into a single PDF at `output_path`.
///
/// An input directory without images is a no-op: nothing is written and the
/// summary carries no output path.
pub async fn convert(
    input_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &ReceiptOptions,
) -> Result<ConversionSummary> {
    options.validate()?;

    let input_dir = input_dir.as_ref();
    let output_path = output_path.as_ref();
    let (items, layouts) = plan(input_dir).await?;

    if items.is_empty() {
        log::warn!(
            "No images found in {}; nothing written",
            input_dir.display()
        );
        return Ok(ConversionSummary {
            images: 0,
            pages: 0,
            output: None,
        });
    }

    let bytes = generate_pdf(&layouts, options).await?;
    save_pdf(bytes, output_path).await?;

    Ok(ConversionSummary {
        images: items.len(),
        pages: layouts.len(),
        output: Some(output_path.to_owned()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn options_without_system_fonts() -> ReceiptOptions {
        ReceiptOptions {
            bold_fonts: Vec::new(),
            regular_fonts: Vec::new(),
            ..Default::default()
        }
    }

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([250, 250, 240]))
            .save(dir.join(name))
            .unwrap();
    }

    #[tokio::test]
    async fn test_convert_directory() {
        let input = tempfile::tempdir().unwrap();
        for i in 1..=5 {
            write_image(input.path(), &format!("receipt_no_{i}.png"), 30, 60);
        }
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("receipts.pdf");

        let summary = convert(input.path(), &output, &options_without_system_fonts())
            .await
            .unwrap();

        assert_eq!(summary.images, 5);
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.output.as_deref(), Some(output.as_path()));
        let bytes = tokio::fs::read(&output).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));

        let mut warnings = Vec::new();
        let doc = printpdf::PdfDocument::parse(
            &bytes,
            &printpdf::PdfParseOptions::default(),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(doc.pages.len(), summary.pages);
        let per_page: Vec<usize> = doc
            .pages
            .iter()
            .map(|page| {
                page.ops
                    .iter()
                    .filter(|op| matches!(op, printpdf::Op::UseXobject { .. }))
                    .count()
            })
            .collect();
        assert_eq!(per_page, vec![4, 1]);
    }

    #[tokio::test]
    async fn test_convert_empty_directory_is_noop() {
        let input = tempfile::tempdir().unwrap();
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("receipts.pdf");

        let summary = convert(input.path(), &output, &options_without_system_fonts())
            .await
            .unwrap();

        assert_eq!(
            summary,
            ConversionSummary {
                images: 0,
                pages: 0,
                output: None
            }
        );
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_convert_missing_directory_writes_nothing() {
        let out_dir = tempfile::tempdir().unwrap();
        let output = out_dir.path().join("receipts.pdf");

        let err = convert(
            out_dir.path().join("images"),
            &output,
            &options_without_system_fonts(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ReceiptError::SourceUnavailable { .. }));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_convert_rejects_invalid_options() {
        let input = tempfile::tempdir().unwrap();
        let options = ReceiptOptions {
            caption_font_size_pt: 0.0,
            ..options_without_system_fonts()
        };
        let err = convert(input.path(), input.path().join("x.pdf"), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, ReceiptError::Config(_)));
    }

    #[tokio::test]
    async fn test_plan_preserves_order() {
        let input = tempfile::tempdir().unwrap();
        write_image(input.path(), "01.png", 60, 30);
        write_image(input.path(), "02.jpg", 30, 60);
        write_image(input.path(), "03.bmp", 30, 60);
        write_image(input.path(), "04.jpeg", 30, 60);

        let (items, layouts) = plan(input.path()).await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(layouts.len(), 2);
        let captions: Vec<_> = layouts
            .iter()
            .flat_map(|page| page.items().map(|item| item.caption.clone()))
            .collect();
        assert_eq!(
            captions,
            vec!["Receipt No: 1", "Receipt No: 2", "Receipt No: 3", "Receipt No: 4"]
        );
    }
}
