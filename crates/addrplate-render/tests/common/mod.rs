use addrplate_core::geom::{point, vector};
use addrplate_core::{GeometryTable, SizeClass};
use addrplate_render::path::PathCommand;
use addrplate_render::{Extents, GlyphFragment, GlyphStore};

pub const CHARSET: &str = "0123456789/- .'\
    АБВГҐДЕЄЖЗИІЇЙКЛМНОПРСТУФХЦЧШЩЬЮЯабвгґдеєжзиіїйклмнопрстуфхцчшщьюя\
    ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Advance 0.5em, ink 0.4em, 0.7em tall.
pub fn box_glyph(size: f64) -> GlyphFragment {
    let ink = size * 0.4;
    let height = size * 0.7;
    GlyphFragment {
        path: vec![
            PathCommand::Move(point(0.0, 0.0)),
            PathCommand::Line(point(ink, 0.0)),
            PathCommand::Line(point(ink, -height)),
            PathCommand::Line(point(0.0, -height)),
            PathCommand::Close,
        ],
        advance: vector(size * 0.5, 0.0),
        extents: Extents::new(0.0, -height, ink, 0.0),
    }
}

/// Box glyphs for every font the built-in geometry table uses.
pub fn synthetic_store() -> GlyphStore {
    let table = GeometryTable::builtin();
    let mut store = GlyphStore::new();
    for size in [SizeClass::Compact, SizeClass::Large] {
        for font in table.size_class(size).fonts() {
            for ch in CHARSET.chars() {
                store.insert(font.face, font.size, ch, box_glyph(font.size));
            }
        }
    }
    store
}
