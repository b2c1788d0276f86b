//! Plate geometry table.
//!
//! Every dimension the layout engine uses lives in `plates.json`, keyed by size class and plate
//! variant. Lengths are stored either as points or as millimetres (`{"mm": 40}`), optionally with
//! a point offset (`{"mm": 36, "plus_pt": 32.625}`), and are resolved to points on load.

use crate::geom::pt;
use crate::house_number::Level;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

/// Number of entries in a number-plate width table.
pub const WIDTH_BUCKETS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeClass {
    /// Narrow streets ("thin" plates).
    #[default]
    Compact,
    /// Wide streets.
    Large,
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeClass::Compact => f.write_str("compact"),
            SizeClass::Large => f.write_str("large"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Face {
    Regular,
    SemiBold,
    Bold,
    /// Dedicated face holding the fraction-bar glyph.
    Slash,
}

impl Face {
    pub fn as_str(self) -> &'static str {
        match self {
            Face::Regular => "regular",
            Face::SemiBold => "semi-bold",
            Face::Bold => "bold",
            Face::Slash => "slash",
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontSpec {
    pub face: Face,
    pub size: f64,
    /// Line spacing for multi-line blocks, in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leading: Option<f64>,
}

impl FontSpec {
    pub fn new(face: Face, size: f64) -> Self {
        Self {
            face,
            size,
            leading: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Pt(f64),
    Mm {
        mm: f64,
        #[serde(default)]
        plus_pt: f64,
    },
}

impl LengthRepr {
    fn to_pt(&self) -> f64 {
        match *self {
            LengthRepr::Pt(v) => v,
            LengthRepr::Mm { mm, plus_pt } => pt(mm) + plus_pt,
        }
    }
}

fn length<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<f64, D::Error> {
    LengthRepr::deserialize(d).map(|l| l.to_pt())
}

fn width_table<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<[f64; WIDTH_BUCKETS], D::Error> {
    let raw = <[LengthRepr; WIDTH_BUCKETS]>::deserialize(d)?;
    Ok(raw.map(|l| l.to_pt()))
}

/// A single text line drawn at a fixed baseline.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextLine {
    pub font: FontSpec,
    #[serde(deserialize_with = "length")]
    pub baseline: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Separator {
    #[serde(deserialize_with = "length")]
    pub line_width: f64,
    #[serde(deserialize_with = "length")]
    pub baseline: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamePlateGeometry {
    #[serde(deserialize_with = "length")]
    pub margin: f64,
    #[serde(deserialize_with = "length")]
    pub height: f64,
    #[serde(deserialize_with = "length")]
    pub radius: f64,
    pub street_type: TextLine,
    pub street_name: TextLine,
    pub separator: Separator,
    pub street_translit: TextLine,
}

impl NamePlateGeometry {
    pub fn fonts(&self) -> Vec<FontSpec> {
        vec![
            self.street_type.font,
            self.street_name.font,
            self.street_translit.font,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseNumberFonts {
    pub lvl1: FontSpec,
    pub lvl2c: FontSpec,
    pub lvl2s: FontSpec,
    pub lvl3: FontSpec,
    pub slash: FontSpec,
}

impl HouseNumberFonts {
    pub fn font(&self, level: Level) -> FontSpec {
        match level {
            Level::Primary => self.lvl1,
            Level::Slash => self.slash,
            Level::Suffix => self.lvl2c,
            Level::Denominator => self.lvl2s,
            Level::FractionSuffix => self.lvl3,
        }
    }

    pub fn all(&self) -> [FontSpec; 5] {
        [self.lvl1, self.lvl2c, self.lvl2s, self.lvl3, self.slash]
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrowLabelFonts {
    pub lvl_a1: FontSpec,
    pub lvl_a2c: FontSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrowGeometry {
    #[serde(deserialize_with = "length")]
    pub baseline: f64,
    #[serde(deserialize_with = "length")]
    pub line_width: f64,
    /// Arrowhead length along the baseline.
    #[serde(deserialize_with = "length")]
    pub length: f64,
    #[serde(deserialize_with = "length")]
    pub half_height: f64,
    /// Half of the gap left open at the plate center.
    #[serde(deserialize_with = "length")]
    pub half_space: f64,
    #[serde(deserialize_with = "length")]
    pub label_baseline: f64,
    pub label_fonts: ArrowLabelFonts,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberPlateGeometry {
    #[serde(deserialize_with = "length")]
    pub margin: f64,
    #[serde(deserialize_with = "length")]
    pub height: f64,
    #[serde(deserialize_with = "length")]
    pub radius: f64,
    #[serde(deserialize_with = "width_table")]
    pub widths: [f64; WIDTH_BUCKETS],
    #[serde(deserialize_with = "length")]
    pub baseline: f64,
    pub fonts: HouseNumberFonts,
    #[serde(default)]
    pub arrows: Option<ArrowGeometry>,
}

impl NumberPlateGeometry {
    /// Plate width for a house number, picked by its character count.
    pub fn width_for(&self, house_number: &str) -> f64 {
        self.widths[width_bucket(house_number.chars().count())]
    }

    pub fn fonts(&self) -> Vec<FontSpec> {
        let mut out = self.fonts.all().to_vec();
        if let Some(arrows) = &self.arrows {
            out.push(arrows.label_fonts.lvl_a1);
            out.push(arrows.label_fonts.lvl_a2c);
        }
        out
    }
}

/// Width-table index for a house number of `char_count` characters: one bucket per length up to
/// five characters, everything longer shares the last bucket.
pub fn width_bucket(char_count: usize) -> usize {
    char_count.saturating_sub(1).min(WIDTH_BUCKETS - 1)
}

/// A block that wraps onto several lines when it does not fit the drawable width.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrappedBlock {
    pub font: FontSpec,
    /// Vertical step from the previous block to this block's first baseline.
    #[serde(deserialize_with = "length")]
    pub offset: f64,
    /// Character budget per line used when re-wrapping.
    pub max_chars: usize,
}

impl WrappedBlock {
    /// Line spacing, falling back to the font size when the table leaves it out.
    pub fn leading(&self) -> f64 {
        self.font.leading.unwrap_or(self.font.size)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerticalSeparator {
    #[serde(deserialize_with = "length")]
    pub line_width: f64,
    #[serde(deserialize_with = "length")]
    pub offset: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HouseNumberBlock {
    #[serde(deserialize_with = "length")]
    pub baseline: f64,
    pub fonts: HouseNumberFonts,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VerticalPlateGeometry {
    #[serde(deserialize_with = "length")]
    pub width: f64,
    #[serde(deserialize_with = "length")]
    pub height: f64,
    #[serde(deserialize_with = "length")]
    pub margin: f64,
    #[serde(deserialize_with = "length")]
    pub radius: f64,
    pub street_type: TextLine,
    pub street_name: WrappedBlock,
    pub separator: VerticalSeparator,
    pub street_translit: WrappedBlock,
    pub house_number: HouseNumberBlock,
}

impl VerticalPlateGeometry {
    pub fn drawable_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    pub fn fonts(&self) -> Vec<FontSpec> {
        let mut out = vec![
            self.street_type.font,
            self.street_name.font,
            self.street_translit.font,
        ];
        out.extend(self.house_number.fonts.all());
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeClassGeometry {
    pub name: NamePlateGeometry,
    pub number: NumberPlateGeometry,
    pub number_with_arrows: NumberPlateGeometry,
    pub vertical: VerticalPlateGeometry,
}

impl SizeClassGeometry {
    pub fn number_plate(&self, with_arrows: bool) -> &NumberPlateGeometry {
        if with_arrows {
            &self.number_with_arrows
        } else {
            &self.number
        }
    }

    /// Every font any plate of this size class draws with (duplicates included).
    pub fn fonts(&self) -> Vec<FontSpec> {
        let mut out = self.name.fonts();
        out.extend(self.number.fonts());
        out.extend(self.number_with_arrows.fonts());
        out.extend(self.vertical.fonts());
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryTable {
    pub compact: SizeClassGeometry,
    pub large: SizeClassGeometry,
}

static BUILTIN: OnceLock<GeometryTable> = OnceLock::new();

impl GeometryTable {
    /// The table shipped with the crate.
    pub fn builtin() -> &'static GeometryTable {
        BUILTIN.get_or_init(|| {
            let json_text = include_str!("plates.json");
            GeometryTable::from_json_str(json_text).expect("bundled plate geometry is valid")
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let table: GeometryTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn size_class(&self, size: SizeClass) -> &SizeClassGeometry {
        match size {
            SizeClass::Compact => &self.compact,
            SizeClass::Large => &self.large,
        }
    }

    fn validate(&self) -> Result<()> {
        for size in [SizeClass::Compact, SizeClass::Large] {
            let g = self.size_class(size);
            let invalid = |what: &str| Error::InvalidGeometry {
                message: format!("{size}: {what}"),
            };

            if g.fonts().iter().any(|f| !(f.size.is_finite() && f.size > 0.0)) {
                return Err(invalid("font sizes must be positive"));
            }
            if !(g.name.margin > 0.0 && g.name.height > 0.0) {
                return Err(invalid("name plate margin and height must be positive"));
            }
            for (label, plate) in [
                ("number", &g.number),
                ("number_with_arrows", &g.number_with_arrows),
            ] {
                if plate.widths.iter().any(|w| *w <= plate.margin * 2.0) {
                    return Err(invalid(&format!(
                        "{label} plate widths must leave room inside both margins"
                    )));
                }
            }
            if g.number_with_arrows.arrows.is_none() {
                return Err(invalid("number_with_arrows needs arrow geometry"));
            }
            if g.vertical.drawable_width() <= 0.0 {
                return Err(invalid("vertical plate margins exceed its width"));
            }
            if g.vertical.street_name.max_chars == 0 || g.vertical.street_translit.max_chars == 0
            {
                return Err(invalid("wrap thresholds must be at least one character"));
            }
        }
        Ok(())
    }
}
