//! Precomputed glyph fragments.
//!
//! The store is produced offline (one outline per character per face and size) and shipped as a
//! versioned JSON asset. It is loaded once, never mutated, and passed by reference to everything
//! that composes text.

use crate::path::PathCommand;
use crate::{Error, Result};
use addrplate_core::geom::{Vector, point, vector};
use addrplate_core::{Face, FontSpec};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path as FsPath;

pub const GLYPH_ASSET_VERSION: u32 = 1;

/// Axis-aligned box relative to some origin: `left`/`top` are the minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extents {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Extents {
    pub const ZERO: Extents = Extents {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn translated(self, by: Vector) -> Self {
        Self {
            left: self.left + by.x,
            top: self.top + by.y,
            right: self.right + by.x,
            bottom: self.bottom + by.y,
        }
    }

    pub fn union(self, other: Extents) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphFragment {
    /// Outline relative to the glyph origin.
    pub path: Vec<PathCommand>,
    /// Offset from this glyph's origin to the next one.
    pub advance: Vector,
    pub extents: Extents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GlyphKey {
    face: Face,
    size_millis: i64,
    ch: char,
}

impl GlyphKey {
    fn new(face: Face, size: f64, ch: char) -> Self {
        Self {
            face,
            size_millis: (size * 1000.0).round() as i64,
            ch,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GlyphStore {
    glyphs: FxHashMap<GlyphKey, GlyphFragment>,
}

impl GlyphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, face: Face, size: f64, ch: char, fragment: GlyphFragment) {
        self.glyphs.insert(GlyphKey::new(face, size, ch), fragment);
    }

    pub fn lookup(&self, face: Face, size: f64, ch: char) -> Result<&GlyphFragment> {
        self.glyphs
            .get(&GlyphKey::new(face, size, ch))
            .ok_or(Error::MissingGlyphAsset { face, size, ch })
    }

    pub fn lookup_font(&self, font: &FontSpec, ch: char) -> Result<&GlyphFragment> {
        self.lookup(font.face, font.size, ch)
    }

    pub fn contains(&self, face: Face, size: f64, ch: char) -> bool {
        self.glyphs.contains_key(&GlyphKey::new(face, size, ch))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let asset: GlyphAsset = serde_json::from_str(text)?;
        Self::from_asset(asset)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let asset: GlyphAsset = serde_json::from_slice(bytes)?;
        Self::from_asset(asset)
    }

    pub fn load(path: impl AsRef<FsPath>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_slice(&bytes)
    }

    fn from_asset(asset: GlyphAsset) -> Result<Self> {
        if asset.version != GLYPH_ASSET_VERSION {
            return Err(Error::UnsupportedGlyphAssetVersion {
                found: asset.version,
                supported: GLYPH_ASSET_VERSION,
            });
        }

        let mut store = GlyphStore::new();
        for raw in asset.glyphs {
            let mut chars = raw.ch.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(Error::InvalidGlyphAsset {
                    message: format!("glyph key must be a single character, got {:?}", raw.ch),
                });
            };
            let path = raw
                .path
                .iter()
                .map(RawCommand::to_command)
                .collect::<Result<Vec<_>>>()?;
            let [l, t, r, b] = raw.extents;
            store.insert(
                raw.face,
                raw.size,
                ch,
                GlyphFragment {
                    path,
                    advance: vector(raw.advance[0], raw.advance[1]),
                    extents: Extents::new(l, t, r, b),
                },
            );
        }

        tracing::debug!(glyphs = store.len(), "glyph store loaded");
        Ok(store)
    }
}

#[derive(Debug, Deserialize)]
struct GlyphAsset {
    version: u32,
    glyphs: Vec<RawGlyph>,
}

#[derive(Debug, Deserialize)]
struct RawGlyph {
    face: Face,
    size: f64,
    #[serde(rename = "char")]
    ch: String,
    path: Vec<RawCommand>,
    advance: [f64; 2],
    extents: [f64; 4],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawOp {
    Move,
    Line,
    Curve,
    Close,
}

#[derive(Debug, Deserialize)]
struct RawCommand {
    op: RawOp,
    #[serde(default)]
    points: Vec<f64>,
}

impl RawCommand {
    fn to_command(&self) -> Result<PathCommand> {
        let p = &self.points;
        let cmd = match (&self.op, p.len()) {
            (RawOp::Move, 2) => PathCommand::Move(point(p[0], p[1])),
            (RawOp::Line, 2) => PathCommand::Line(point(p[0], p[1])),
            (RawOp::Curve, 6) => PathCommand::Curve(
                point(p[0], p[1]),
                point(p[2], p[3]),
                point(p[4], p[5]),
            ),
            (RawOp::Close, 0) => PathCommand::Close,
            (op, n) => {
                return Err(Error::InvalidGlyphAsset {
                    message: format!("{op:?} command with {n} coordinates"),
                });
            }
        };
        Ok(cmd)
    }
}
