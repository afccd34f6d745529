//! Image discovery and caption derivation

use crate::constants::{CAPTION_PREFIX, IMAGE_EXTENSIONS};
use crate::types::{ImageItem, ReceiptError, Result};
use image::{DynamicImage, ImageReader};
use image::error::{DecodingError, ImageError, ImageFormatHint};
use regex::Regex;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// "receipt no" in any case, separated by spaces, underscores or hyphens,
/// followed by the number itself
static RECEIPT_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)receipt[\s_-]*no[\s_-]*(\d+)").expect("receipt number pattern is valid")
});

/// Whether the path carries one of the recognized image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Receipt number embedded in a file name, e.g. `"Receipt No 123.jpg"` → `"123"`
pub fn extract_receipt_number(file_name: &str) -> Option<&str> {
    RECEIPT_NUMBER
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Caption for the image at 1-based `position` in document order
pub fn derive_caption(file_name: &str, position: usize) -> String {
    match extract_receipt_number(file_name) {
        Some(number) => format!("{}{}", CAPTION_PREFIX, number),
        None => format!("{}{}", CAPTION_PREFIX, position),
    }
}

/// Read the pixel size of an image from its header.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let (width, height) = open_sniffed(path)?
        .into_dimensions()
        .map_err(|source| decode_failure(path, source))?;

    if width == 0 || height == 0 {
        return Err(decode_failure(
            path,
            ImageError::Decoding(DecodingError::new(
                ImageFormatHint::Unknown,
                "image has zero width or height",
            )),
        ));
    }

    Ok((width, height))
}

/// Fully decode an image, detecting the format from its contents
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    open_sniffed(path)?
        .decode()
        .map_err(|source| decode_failure(path, source))
}

fn decode_failure(path: &Path, source: ImageError) -> ReceiptError {
    ReceiptError::DecodeFailure {
        path: path.to_owned(),
        source,
    }
}

// The extension only selects the files; contents decide the decoder
fn open_sniffed(path: &Path) -> Result<ImageReader<BufReader<File>>> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_failure(path, ImageError::IoError(e)))
}

/// Recognized image files in `directory`, sorted by file name
pub async fn list_image_paths(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    let unavailable = |source: std::io::Error| ReceiptError::SourceUnavailable {
        path: directory.to_owned(),
        source,
    };

    let mut entries = tokio::fs::read_dir(directory).await.map_err(unavailable)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
        let path = entry.path();
        if !is_supported_image(&path) {
            continue;
        }
        // Follows symlinks; a dangling link is skipped like any non-file
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push((entry.file_name(), path)),
            Ok(_) => {}
            Err(e) => log::debug!("Skipping {}: {}", path.display(), e),
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// Load the ordered, captioned and classified images of `directory`.
pub async fn list_images(directory: impl AsRef<Path>) -> Result<Vec<ImageItem>> {
    let directory = directory.as_ref();
    let paths = list_image_paths(directory).await?;
    log::info!(
        "Found {} image(s) in {}",
        paths.len(),
        directory.display()
    );

    // Header probing is blocking I/O
    let items = tokio::task::spawn_blocking(move || {
        let mut items = Vec::with_capacity(paths.len());
        for (index, path) in paths.into_iter().enumerate() {
            let position = index + 1;
            let (width, height) = probe_dimensions(&path)?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let caption = derive_caption(&file_name, position);
            let item = ImageItem::new(position, path, caption, width, height);
            log::debug!(
                "{}: {}x{} {} \"{}\"",
                item.file_name,
                width,
                height,
                item.orientation.name(),
                item.caption
            );
            items.push(item);
        }
        Ok::<_, ReceiptError>(items)
    })
    .await??;

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;
    use image::{Rgb, RgbImage};

    fn write_image(dir: &Path, name: &str, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, Rgb([200, 200, 200]))
            .save(dir.join(name))
            .unwrap();
    }

    fn write_png_as(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([10, 20, 30]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_decode_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png_as(dir.path(), "scan.jpg", 12, 7);

        assert_eq!(probe_dimensions(&path).unwrap(), (12, 7));
        let decoded = decode_image(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(
            decode_image(&path),
            Err(ReceiptError::DecodeFailure { .. })
        ));
    }

    #[test]
    fn test_caption_from_receipt_number() {
        assert_eq!(derive_caption("Receipt No 123.jpg", 5), "Receipt No: 123");
    }

    #[test]
    fn test_caption_falls_back_to_position() {
        assert_eq!(derive_caption("img.jpg", 5), "Receipt No: 5");
    }

    #[test]
    fn test_receipt_number_separators_and_case() {
        assert_eq!(extract_receipt_number("receipt_no_42.png"), Some("42"));
        assert_eq!(extract_receipt_number("RECEIPT-NO-0007.jpeg"), Some("0007"));
        assert_eq!(extract_receipt_number("ReceiptNo9.gif"), Some("9"));
        assert_eq!(extract_receipt_number("scan receipt _- no _ 15 copy.bmp"), Some("15"));
        assert_eq!(extract_receipt_number("receipt 12.jpg"), None);
        assert_eq!(extract_receipt_number("no 12.jpg"), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a.jpg")));
        assert!(is_supported_image(Path::new("a.JPEG")));
        assert!(is_supported_image(Path::new("a.Png")));
        assert!(is_supported_image(Path::new("a.bmp")));
        assert!(is_supported_image(Path::new("a.gif")));
        assert!(!is_supported_image(Path::new("a.tiff")));
        assert!(!is_supported_image(Path::new("a.pdf")));
        assert!(!is_supported_image(Path::new("jpg")));
    }

    #[tokio::test]
    async fn test_list_images_orders_and_classifies() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "b.png", 40, 20);
        write_image(dir.path(), "Receipt No 77.png", 20, 40);
        write_image(dir.path(), "a.png", 20, 20);
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let items = list_images(dir.path()).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.file_name.as_str()).collect();
        // Byte order: uppercase sorts before lowercase
        assert_eq!(names, vec!["Receipt No 77.png", "a.png", "b.png"]);

        assert_eq!(items[0].caption, "Receipt No: 77");
        assert_eq!(items[1].caption, "Receipt No: 2");
        assert_eq!(items[2].caption, "Receipt No: 3");

        assert_eq!(items[0].orientation, Orientation::Portrait);
        assert_eq!(items[1].orientation, Orientation::Portrait);
        assert_eq!(items[2].orientation, Orientation::Landscape);
        assert_eq!((items[2].width, items[2].height), (40, 20));
        assert_eq!(
            items.iter().map(|i| i.sequence_index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[tokio::test]
    async fn test_list_images_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_images(dir.path()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let err = list_images(&missing).await.unwrap_err();
        assert!(matches!(err, ReceiptError::SourceUnavailable { path, .. } if path == missing));
    }

    #[tokio::test]
    async fn test_undecodable_image_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        write_image(dir.path(), "a.png", 10, 10);
        std::fs::write(dir.path().join("broken.jpg"), b"definitely not a jpeg").unwrap();

        let err = list_images(dir.path()).await.unwrap_err();
        match err {
            ReceiptError::DecodeFailure { path, .. } => {
                assert_eq!(path.file_name().unwrap(), "broken.jpg")
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
