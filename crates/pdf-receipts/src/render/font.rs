//! Caption font selection
//!
//! Fonts are probed in priority order: bold TrueType candidates, then regular
//! TrueType candidates, then the built-in Helvetica-Bold which is always
//! available. A candidate that cannot be read or parsed is skipped.
//!
//! Built-in fonts are drawn by name but measured with the subset font program
//! printpdf bundles for them, so both paths share the same glyph-advance math.

use crate::options::ReceiptOptions;
use crate::types::{ReceiptError, Result};
use printpdf::{BuiltinFont, FontId, ParsedFont, PdfDocument};
use std::path::{Path, PathBuf};

/// Where a caption font can come from
#[derive(Debug, Clone, PartialEq)]
pub enum FontSource {
    File(PathBuf),
    Builtin(BuiltinFont),
}

/// Probe order for caption fonts, ending with the built-in fallback
pub fn font_sources(options: &ReceiptOptions) -> Vec<FontSource> {
    options
        .bold_fonts
        .iter()
        .chain(options.regular_fonts.iter())
        .cloned()
        .map(FontSource::File)
        .chain(std::iter::once(FontSource::Builtin(BuiltinFont::HelveticaBold)))
        .collect()
}

/// Read and parse a TrueType/OpenType font file
pub fn load_font_file(path: &Path) -> Result<ParsedFont> {
    let unavailable = |reason: String| ReceiptError::FontUnavailable {
        path: path.to_owned(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
    let mut warnings = Vec::new();
    ParsedFont::from_bytes(&bytes, 0, &mut warnings)
        .ok_or_else(|| unavailable("not a parseable font".to_string()))
}

/// Parse the metrics printpdf bundles for a built-in font
pub fn builtin_metrics(font: BuiltinFont) -> Result<ParsedFont> {
    let subset = font.get_subset_font();
    let mut warnings = Vec::new();
    ParsedFont::from_bytes(&subset.bytes, 0, &mut warnings).ok_or_else(|| {
        ReceiptError::RenderUnavailable(format!("no metrics for built-in {:?}", font))
    })
}

/// Advance width of `text` in points at `size_pt`; unmapped characters add nothing
pub fn advance_width(font: &ParsedFont, text: &str, size_pt: f32) -> f32 {
    let units_per_em = font.font_metrics.units_per_em.max(1) as f32;
    text.chars()
        .filter_map(|ch| font.lookup_glyph_index(ch as u32))
        .map(|glyph_id| font.get_horizontal_advance(glyph_id) as f32 / units_per_em * size_pt)
        .sum()
}

/// A font ready to draw captions with
pub enum CaptionFont {
    External {
        font: Box<ParsedFont>,
        id: FontId,
        path: PathBuf,
    },
    Builtin {
        font: BuiltinFont,
        metrics: Box<ParsedFont>,
    },
}

impl CaptionFont {
    /// Walk the probe list and register the first usable font with `doc`.
    pub fn acquire(doc: &mut PdfDocument, sources: &[FontSource]) -> Result<CaptionFont> {
        for source in sources {
            match source {
                FontSource::File(path) => match load_font_file(path) {
                    Ok(font) => {
                        let id = doc.add_font(&font);
                        log::debug!("Caption font: {}", path.display());
                        return Ok(CaptionFont::External {
                            font: Box::new(font),
                            id,
                            path: path.clone(),
                        });
                    }
                    Err(e) => log::debug!("{}", e),
                },
                FontSource::Builtin(font) => {
                    log::debug!("Caption font: built-in {:?}", font);
                    return CaptionFont::builtin(*font);
                }
            }
        }

        log::debug!("No caption font candidates; using built-in Helvetica-Bold");
        CaptionFont::builtin(BuiltinFont::HelveticaBold)
    }

    pub fn builtin(font: BuiltinFont) -> Result<CaptionFont> {
        Ok(CaptionFont::Builtin {
            font,
            metrics: Box::new(builtin_metrics(font)?),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            CaptionFont::External { path, .. } => path.display().to_string(),
            CaptionFont::Builtin { font, .. } => format!("built-in {:?}", font),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, CaptionFont::Builtin { .. })
    }

    /// Advance width of `text` in points at `size_pt`
    pub fn text_width(&self, text: &str, size_pt: f32) -> f32 {
        match self {
            CaptionFont::External { font, .. } => advance_width(font, text, size_pt),
            CaptionFont::Builtin { metrics, .. } => advance_width(metrics, text, size_pt),
        }
    }
}
