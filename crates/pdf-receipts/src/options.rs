use crate::constants::*;
use crate::types::{ReceiptError, Result};
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output paper sizes (always portrait)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom {
        width_mm: f32,
        height_mm: f32,
    },
}

impl PaperSize {
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    pub fn dimensions_pt(self) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        (mm_to_pt(w), mm_to_pt(h))
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
            PaperSize::Custom { .. } => "Custom",
        }
    }
}

/// Layout and rendering configuration for a receipt document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReceiptOptions {
    // Page
    pub paper_size: PaperSize,
    pub margin_pt: f32,
    pub spacing_pt: f32,

    // Captions
    pub caption_strip_pt: f32,
    pub caption_font_size_pt: f32,
    pub caption_gap_pt: f32,
    /// RGB components in 0.0..=1.0
    pub caption_color: [f32; 3],
    pub bold_fonts: Vec<PathBuf>,
    pub regular_fonts: Vec<PathBuf>,

    // Images
    pub image_dpi: f32,

    // Document
    pub title: String,
}

impl Default for ReceiptOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin_pt: DEFAULT_MARGIN_PT,
            spacing_pt: DEFAULT_SPACING_PT,
            caption_strip_pt: DEFAULT_CAPTION_STRIP_PT,
            caption_font_size_pt: DEFAULT_CAPTION_FONT_SIZE_PT,
            caption_gap_pt: DEFAULT_CAPTION_GAP_PT,
            caption_color: [0.0, 0.0, 0.0],
            bold_fonts: DEFAULT_BOLD_FONTS.iter().map(PathBuf::from).collect(),
            regular_fonts: DEFAULT_REGULAR_FONTS.iter().map(PathBuf::from).collect(),
            image_dpi: DEFAULT_IMAGE_DPI,
            title: "Receipts".to_string(),
        }
    }
}

impl ReceiptOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ReceiptError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ReceiptError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        let (page_w, page_h) = self.paper_size.dimensions_pt();
        if !(page_w > 0.0 && page_h > 0.0) {
            return Err(ReceiptError::Config(format!(
                "Paper size must be positive, got {}x{} pt",
                page_w, page_h
            )));
        }

        for (name, value) in [
            ("margin", self.margin_pt),
            ("spacing", self.spacing_pt),
            ("caption strip", self.caption_strip_pt),
            ("caption gap", self.caption_gap_pt),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReceiptError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if !(self.caption_font_size_pt > 0.0) {
            return Err(ReceiptError::Config(
                "Caption font size must be positive".to_string(),
            ));
        }

        if !(self.image_dpi > 0.0) {
            return Err(ReceiptError::Config("Image DPI must be positive".to_string()));
        }

        if self
            .caption_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(ReceiptError::Config(
                "Caption color components must be within 0.0..=1.0".to_string(),
            ));
        }

        // Cells must leave room for an image once the caption strip is taken out
        crate::layout::GridGeometry::from_options(self).validate()
    }
}
