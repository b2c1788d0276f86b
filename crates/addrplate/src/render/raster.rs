#![forbid(unsafe_code)]

//! PDF and PNG output, converted from the plate SVG without any font database.

use crate::render::{Color, HeadlessError, PlateRenderer};
use addrplate_core::PlateRequest;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error("failed to parse plate SVG")]
    SvgParse,
    #[error("plate raster of {width}x{height} px cannot be allocated")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("failed to convert plate SVG to PDF")]
    PdfConvert,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    /// Pixels per point.
    pub scale: f32,
    /// Fills the area outside the rounded plate corners; transparent when `None`.
    pub background: Option<Color>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

impl PlateRenderer<'_> {
    pub fn render_pdf(&self, request: &PlateRequest) -> Result<Vec<u8>> {
        let svg = self.render_svg(request)?;
        svg_to_pdf(&svg)
    }

    pub fn render_png(&self, request: &PlateRequest, raster: &RasterOptions) -> Result<Vec<u8>> {
        let svg = self.render_svg(request)?;
        svg_to_png(&svg, raster)
    }
}

/// One page whose size is the SVG's user-space size in points.
pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>> {
    let opt = svg2pdf::usvg::Options::default();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    let size = tree.size();
    let width = (size.width() * options.scale).ceil().max(1.0) as u32;
    let height = (size.height() * options.scale).ceil().max(1.0) as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;

    if let Some(color) = options.background {
        let [r, g, b] = color.to_rgb();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(options.scale, options.scale),
        &mut pixmap.as_mut(),
    );
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20" viewBox="0 0 40 20"><rect x="0" y="0" width="40" height="20" rx="2" ry="2" fill="#101640"/><line x1="4" y1="10" x2="36" y2="10" stroke="#ffffff" stroke-width="2"/></svg>"##;

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        let be = |at: usize| {
            u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        (be(16), be(20))
    }

    #[test]
    fn png_is_sized_by_scale() {
        let bytes = svg_to_png(PLATE, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
        assert_eq!(png_size(&bytes), (40, 20));

        let options = RasterOptions {
            scale: 2.5,
            background: Some(Color::WHITE),
        };
        let bytes = svg_to_png(PLATE, &options).unwrap();
        assert_eq!(png_size(&bytes), (100, 50));
    }

    #[test]
    fn pdf_has_signature() {
        let bytes = svg_to_pdf(PLATE).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(svg_to_pdf("not svg"), Err(RasterError::SvgParse)));
        assert!(matches!(
            svg_to_png("<svg", &RasterOptions::default()),
            Err(RasterError::SvgParse)
        ));
    }
}
