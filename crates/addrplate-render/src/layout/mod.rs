//! Plate layout: turns a validated request into a [`PlateLayout`].
//!
//! Layout runs on a recording canvas that tracks the current transform through an explicit
//! [`TransformStack`]. Every step that translates or scales restores what it saved before it
//! returns, and the recorded elements carry the absolute transform they were laid out under.

mod name;
mod number;
mod vertical;

use crate::Result;
use crate::glyph::GlyphStore;
use crate::model::{PlateElement, PlateLayout};
use crate::text::{TextComposer, TextRun};
use crate::transform::TransformStack;
use addrplate_core::geom::Point;
use addrplate_core::geometry::HouseNumberFonts;
use addrplate_core::{GeometryTable, HouseNumber, Level, PlateInput, PlateRequest};

/// Validates and lays out one plate.
pub fn layout_plate(
    request: &PlateRequest,
    store: &GlyphStore,
    geometry: &GeometryTable,
) -> Result<PlateLayout> {
    LayoutEngine::new(store, geometry).layout(request)
}

#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    composer: TextComposer<'a>,
    geometry: &'a GeometryTable,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(store: &'a GlyphStore, geometry: &'a GeometryTable) -> Self {
        Self {
            composer: TextComposer::new(store),
            geometry,
        }
    }

    pub fn composer(&self) -> TextComposer<'a> {
        self.composer
    }

    pub fn layout(&self, request: &PlateRequest) -> Result<PlateLayout> {
        let input = request.validate()?;
        self.layout_input(&input)
    }

    pub fn layout_input(&self, input: &PlateInput) -> Result<PlateLayout> {
        let geometry = self.geometry.size_class(input.size());
        match input {
            PlateInput::Name { size, street } => {
                name::layout(self.composer, &geometry.name, *size, street)
            }
            PlateInput::Number {
                size,
                house_number,
                left_number,
                right_number,
            } => number::layout(
                self.composer,
                geometry,
                *size,
                house_number,
                left_number.as_deref(),
                right_number.as_deref(),
            ),
            PlateInput::Vertical {
                size,
                street,
                house_number,
            } => vertical::layout(
                self.composer,
                &geometry.vertical,
                *size,
                street,
                house_number,
            ),
        }
    }
}

/// Records elements under the current transform of a [`TransformStack`].
struct PlateCanvas {
    stack: TransformStack,
    elements: Vec<PlateElement>,
}

impl PlateCanvas {
    /// A canvas whose origin sits on the left margin, at the top edge of the plate.
    fn new(margin: f64) -> Self {
        let mut stack = TransformStack::new();
        stack.translate(margin, 0.0);
        Self {
            stack,
            elements: Vec::new(),
        }
    }

    /// Runs `f` between a save and a restore, so the transform never leaks out of `f`.
    fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.stack.save();
        let out = f(self);
        self.stack.restore();
        out
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.stack.translate(dx, dy);
    }

    fn scale(&mut self, factor: f64) {
        self.stack.scale(factor);
    }

    fn draw_run(&mut self, run: &TextRun) {
        self.elements.push(PlateElement::Text {
            text: run.text.clone(),
            font: run.font,
            path: run.path.clone(),
            transform: self.stack.current(),
        });
    }

    fn line(&mut self, from: Point, to: Point, line_width: f64) {
        self.elements.push(PlateElement::Rule {
            from,
            to,
            line_width,
            transform: self.stack.current(),
        });
    }

    fn arrowhead(&mut self, points: [Point; 3]) {
        self.elements.push(PlateElement::Arrowhead {
            points,
            transform: self.stack.current(),
        });
    }

    fn into_elements(self) -> Vec<PlateElement> {
        debug_assert_eq!(self.stack.depth(), 0, "unbalanced save/restore");
        self.elements
    }
}

/// One composed run per house-number level, in drawing order.
struct HouseNumberRuns {
    runs: Vec<(Level, TextRun)>,
    /// Sum of every run's advance.
    width: f64,
}

impl HouseNumberRuns {
    fn compose(
        composer: TextComposer<'_>,
        number: &HouseNumber,
        fonts: &HouseNumberFonts,
    ) -> Result<Self> {
        let mut runs = Vec::new();
        let mut width = 0.0;
        for (level, text) in number.levels() {
            let run = composer.compose(text, fonts.font(level))?;
            width += run.advance_x();
            runs.push((level, run));
        }
        Ok(Self { runs, width })
    }

    /// Draws the runs left to right from the current origin. The run after the fraction bar is
    /// pulled left by its own left extent so the denominator tucks under the bar.
    fn draw(&self, canvas: &mut PlateCanvas) {
        let mut after_slash = false;
        for (level, run) in &self.runs {
            if after_slash {
                canvas.translate(-run.extents.left, 0.0);
                after_slash = false;
            }
            canvas.draw_run(run);
            canvas.translate(run.advance_x(), 0.0);
            if *level == Level::Slash {
                after_slash = true;
            }
        }
    }
}
