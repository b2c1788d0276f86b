#![forbid(unsafe_code)]

//! Glyph-path composition and plate layout.
//!
//! A render is two passes: [`layout::LayoutEngine`] resolves every glyph, decomposition and
//! scale-to-fit decision into a [`model::PlateLayout`], then [`paint::paint`] replays that layout
//! onto a [`surface::Surface`]. All fallible work happens in the first pass, so a surface never
//! sees a partial plate.

pub mod glyph;
pub mod layout;
pub mod model;
pub mod paint;
pub mod path;
pub mod surface;
pub mod svg;
pub mod text;
pub mod transform;

pub use glyph::{Extents, GlyphFragment, GlyphStore};
pub use layout::{LayoutEngine, layout_plate};
pub use model::{PlateElement, PlateLayout};
pub use paint::paint;
pub use surface::{Color, RecordingSurface, Surface};
pub use svg::SvgSurface;
pub use text::{TextComposer, TextRun, wrap_words};

use addrplate_core::Face;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing glyph asset: face={face} size={size} char={ch:?}")]
    MissingGlyphAsset { face: Face, size: f64, ch: char },
    #[error("unsupported glyph asset version {found} (supported: {supported})")]
    UnsupportedGlyphAssetVersion { found: u32, supported: u32 },
    #[error("invalid glyph asset: {message}")]
    InvalidGlyphAsset { message: String },
    #[error(transparent)]
    Core(#[from] addrplate_core::Error),
    #[error("glyph asset JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
