use crate::Result;
use crate::glyph::{Extents, GlyphStore};
use crate::path::Path;
use addrplate_core::FontSpec;
use addrplate_core::geom::{Vector, vector};

mod wrap;

pub use wrap::wrap_words;

/// A string laid out in one font: its outline, where the pen ends up and the measured box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontSpec,
    pub path: Path,
    /// Sum of every glyph's advance.
    pub cursor: Vector,
    pub extents: Extents,
}

impl TextRun {
    /// Horizontal distance the pen moved.
    pub fn advance_x(&self) -> f64 {
        self.cursor.x
    }

    /// Measured width, used for every fit-to-width decision.
    pub fn width(&self) -> f64 {
        self.extents.right
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextComposer<'a> {
    store: &'a GlyphStore,
}

impl<'a> TextComposer<'a> {
    pub fn new(store: &'a GlyphStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &'a GlyphStore {
        self.store
    }

    /// Concatenates the glyph fragments for `text` in `font`.
    ///
    /// Each glyph's outline is placed at the cursor before its advance, but its extents are
    /// folded in at the cursor after the advance. Width and centering math downstream is
    /// calibrated against that box, so it is not a tight bound.
    pub fn compose(&self, text: &str, font: FontSpec) -> Result<TextRun> {
        let mut path = Path::new();
        let mut cursor = vector(0.0, 0.0);
        let mut extents = Extents::ZERO;

        for ch in text.chars() {
            let fragment = self.store.lookup_font(&font, ch)?;
            path.extend_translated(&fragment.path, cursor);
            cursor += fragment.advance;
            extents = extents.union(fragment.extents.translated(cursor));
        }

        tracing::trace!(
            text,
            face = %font.face,
            size = font.size,
            advance = cursor.x,
            right = extents.right,
            "composed text run"
        );

        Ok(TextRun {
            text: text.to_string(),
            font,
            path,
            cursor,
            extents,
        })
    }
}
