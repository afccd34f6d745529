use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Cannot read image directory {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot decode image {}: {source}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Render error: {0}")]
    RenderUnavailable(String),
    #[error("Font unavailable ({}): {reason}", path.display())]
    FontUnavailable { path: PathBuf, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ReceiptError>;

/// Image orientation, decided once from the natural pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// height >= width (square images count as portrait)
    Portrait,
    /// width > height
    Landscape,
}

impl Orientation {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// A source image with its caption, classified and ready for packing.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    /// 1-based position in document order
    pub sequence_index: usize,
    pub path: PathBuf,
    pub file_name: String,
    pub caption: String,
    pub orientation: Orientation,
    /// Natural width in pixels
    pub width: u32,
    /// Natural height in pixels
    pub height: u32,
}

impl ImageItem {
    pub fn new(
        sequence_index: usize,
        path: impl Into<PathBuf>,
        caption: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            sequence_index,
            path,
            file_name,
            caption: caption.into(),
            orientation: Orientation::from_dimensions(width, height),
            width,
            height,
        }
    }

    pub fn is_landscape(&self) -> bool {
        self.orientation == Orientation::Landscape
    }
}

/// Outcome of a full directory-to-PDF conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub images: usize,
    pub pages: usize,
    /// `None` when there was nothing to convert and no file was written
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_dimensions() {
        assert_eq!(Orientation::from_dimensions(1600, 800), Orientation::Landscape);
        assert_eq!(Orientation::from_dimensions(800, 1600), Orientation::Portrait);
        assert_eq!(Orientation::from_dimensions(500, 500), Orientation::Portrait);
    }

    #[test]
    fn test_image_item_file_name() {
        let item = ImageItem::new(3, "images/Receipt No 12.jpg", "Receipt No: 12", 640, 480);
        assert_eq!(item.file_name, "Receipt No 12.jpg");
        assert!(item.is_landscape());
        assert_eq!(item.sequence_index, 3);
    }
}
