//! Page drawing surface
//!
//! [`PageCanvas`] is the seam between layout and the PDF library: the renderer
//! only decides where things go, the canvas draws them. [`PdfCanvas`] is the
//! printpdf implementation.

use crate::layout::Rect;
use crate::options::ReceiptOptions;
use crate::types::{ReceiptError, Result};
use ::image::RgbImage;
use printpdf::*;

use super::font::{CaptionFont, font_sources};

pub trait PageCanvas {
    /// Draw RGB pixels stretched to `rect`
    fn draw_image(&mut self, image: RgbImage, rect: Rect) -> Result<()>;

    /// Draw caption text with its baseline starting at (`x`, `y`)
    fn draw_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;

    /// Width of `text` in points in the caption font
    fn text_width(&self, text: &str) -> f32;

    /// Commit the current page and start a new one
    fn finish_page(&mut self) -> Result<()>;
}

/// Canvas building a printpdf document in memory
pub struct PdfCanvas {
    doc: PdfDocument,
    font: CaptionFont,
    ops: Vec<Op>,
    page_width_pt: f32,
    page_height_pt: f32,
    font_size_pt: f32,
    color: [f32; 3],
    image_dpi: f32,
}

impl PdfCanvas {
    pub fn new(options: &ReceiptOptions) -> Result<Self> {
        let mut doc = PdfDocument::new(&options.title);
        let font = CaptionFont::acquire(&mut doc, &font_sources(options))?;
        log::info!("Caption font: {}", font.describe());
        let (page_width_pt, page_height_pt) = options.paper_size.dimensions_pt();

        Ok(Self {
            doc,
            font,
            ops: Vec::new(),
            page_width_pt,
            page_height_pt,
            font_size_pt: options.caption_font_size_pt,
            color: options.caption_color,
            image_dpi: options.image_dpi,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.pages.len()
    }

    /// Serialize the finished document
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        if !self.ops.is_empty() {
            return Err(ReceiptError::RenderUnavailable(
                "document closed with an unfinished page".to_string(),
            ));
        }

        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        log::debug!("PDF serialized with {} warning(s)", warnings.len());

        if bytes.is_empty() {
            return Err(ReceiptError::RenderUnavailable(
                "PDF serialization produced no output".to_string(),
            ));
        }
        Ok(bytes)
    }

    fn page_rect(&self) -> printpdf::Rect {
        printpdf::Rect {
            x: Pt(0.0),
            y: Pt(0.0),
            width: Pt(self.page_width_pt),
            height: Pt(self.page_height_pt),
        }
    }
}

fn check_finite(what: &str, values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ReceiptError::RenderUnavailable(format!(
            "{} has non-finite coordinates",
            what
        )))
    }
}

impl PageCanvas for PdfCanvas {
    fn draw_image(&mut self, image: RgbImage, rect: Rect) -> Result<()> {
        check_finite("image", &[rect.x, rect.y, rect.width, rect.height])?;
        let (width_px, height_px) = image.dimensions();
        if width_px == 0 || height_px == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(ReceiptError::RenderUnavailable(format!(
                "cannot draw {}x{} px image into {:.1}x{:.1} pt",
                width_px, height_px, rect.width, rect.height
            )));
        }

        let raw = RawImage {
            pixels: RawImageData::U8(image.into_raw()),
            width: width_px as usize,
            height: height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let id = self.doc.add_image(&raw);

        // Natural size at the embedding DPI, then stretched to the target rect
        let natural_width_pt = width_px as f32 * 72.0 / self.image_dpi;
        let natural_height_pt = height_px as f32 * 72.0 / self.image_dpi;

        self.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(rect.x)),
                translate_y: Some(Pt(rect.y)),
                scale_x: Some(rect.width / natural_width_pt),
                scale_y: Some(rect.height / natural_height_pt),
                dpi: Some(self.image_dpi),
                ..Default::default()
            },
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        check_finite("caption", &[x, y])?;
        let [r, g, b] = self.color;

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFillColor {
            col: Color::Rgb(Rgb {
                r,
                g,
                b,
                icc_profile: None,
            }),
        });
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(x), Pt(y)),
        });
        match &self.font {
            CaptionFont::External { id, .. } => {
                self.ops.push(Op::SetFontSize {
                    font: id.clone(),
                    size: Pt(self.font_size_pt),
                });
                self.ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font: id.clone(),
                });
            }
            CaptionFont::Builtin { font, .. } => {
                self.ops.push(Op::SetFontSizeBuiltinFont {
                    font: *font,
                    size: Pt(self.font_size_pt),
                });
                self.ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.to_string())],
                    font: *font,
                });
            }
        }
        self.ops.push(Op::EndTextSection);
        Ok(())
    }

    fn text_width(&self, text: &str) -> f32 {
        self.font.text_width(text, self.font_size_pt)
    }

    fn finish_page(&mut self) -> Result<()> {
        let ops = std::mem::take(&mut self.ops);
        self.doc.pages.push(PdfPage {
            media_box: self.page_rect(),
            trim_box: self.page_rect(),
            crop_box: self.page_rect(),
            ops,
        });
        Ok(())
    }
}
