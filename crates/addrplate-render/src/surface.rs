//! The drawing surface a plate is painted onto.

use crate::path::Path;
use addrplate_core::geom::{Point, Transform};
use serde::Serialize;

/// A process color in CMYK percentages (0..=100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Color {
    pub const WHITE: Color = Color::cmyk(0.0, 0.0, 0.0, 0.0);
    pub const DARK_BLUE: Color = Color::cmyk(75.0, 65.0, 0.0, 75.0);

    pub const fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Self { c, m, y, k }
    }

    /// Naive device conversion: `255 · (1 − c) · (1 − k)` per channel.
    pub fn to_rgb(self) -> [u8; 3] {
        let k = 1.0 - self.k / 100.0;
        let channel = |v: f64| (255.0 * (1.0 - v / 100.0) * k).round().clamp(0.0, 255.0) as u8;
        [channel(self.c), channel(self.m), channel(self.y)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// The primitive set a plate is drawn with. Transforms compose like a PDF content stream:
/// `translate`/`scale` act on the current transform and `save`/`restore` bracket them.
pub trait Surface {
    fn begin_page(&mut self, width: f64, height: f64);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn fill_path(&mut self, path: &Path);
    fn line(&mut self, from: Point, to: Point);
    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64);
    fn end_page(&mut self);
}

/// One recorded primitive, with the transform that was current when it was issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    BeginPage {
        width: f64,
        height: f64,
    },
    FillPath {
        path: Path,
        color: Color,
        transform: Transform,
    },
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color,
        transform: Transform,
    },
    RoundRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
        color: Color,
        transform: Transform,
    },
    EndPage,
}

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    transform: Transform,
    fill: Color,
    stroke: Color,
    line_width: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            fill: Color::cmyk(0.0, 0.0, 0.0, 100.0),
            stroke: Color::cmyk(0.0, 0.0, 0.0, 100.0),
            line_width: 1.0,
        }
    }
}

/// Graphics state with a save/restore stack, shared by the concrete surfaces.
#[derive(Debug, Clone, Default)]
pub(crate) struct StateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl StateStack {
    pub(crate) fn transform(&self) -> Transform {
        self.current.transform
    }

    pub(crate) fn fill(&self) -> Color {
        self.current.fill
    }

    pub(crate) fn stroke(&self) -> Color {
        self.current.stroke
    }

    pub(crate) fn line_width(&self) -> f64 {
        self.current.line_width
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn set_fill(&mut self, color: Color) {
        self.current.fill = color;
    }

    pub(crate) fn set_stroke(&mut self, color: Color) {
        self.current.stroke = color;
    }

    pub(crate) fn set_line_width(&mut self, width: f64) {
        self.current.line_width = width;
    }

    pub(crate) fn save(&mut self) {
        self.saved.push(self.current);
    }

    pub(crate) fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.current = state;
        }
    }

    pub(crate) fn translate(&mut self, dx: f64, dy: f64) {
        self.current.transform = self
            .current
            .transform
            .pre_translate(addrplate_core::geom::vector(dx, dy));
    }

    pub(crate) fn scale(&mut self, sx: f64, sy: f64) {
        self.current.transform = self.current.transform.pre_scale(sx, sy);
    }
}

/// Keeps every primitive in memory instead of producing a document.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    state: StateStack,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }

    /// Unmatched `save` calls so far.
    pub fn depth(&self) -> usize {
        self.state.depth()
    }
}

impl Surface for RecordingSurface {
    fn begin_page(&mut self, width: f64, height: f64) {
        self.ops.push(DrawOp::BeginPage { width, height });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.set_fill(color);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.set_stroke(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.set_line_width(width);
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.scale(sx, sy);
    }

    fn fill_path(&mut self, path: &Path) {
        self.ops.push(DrawOp::FillPath {
            path: path.clone(),
            color: self.state.fill(),
            transform: self.state.transform(),
        });
    }

    fn line(&mut self, from: Point, to: Point) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width: self.state.line_width(),
            color: self.state.stroke(),
            transform: self.state.transform(),
        });
    }

    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        self.ops.push(DrawOp::RoundRect {
            x,
            y,
            width,
            height,
            radius,
            color: self.state.fill(),
            transform: self.state.transform(),
        });
    }

    fn end_page(&mut self) {
        self.ops.push(DrawOp::EndPage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_converts_to_rgb() {
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
        // 255 * 0.25 * 0.25, 255 * 0.35 * 0.25, 255 * 1.0 * 0.25
        assert_eq!(Color::DARK_BLUE.to_rgb(), [16, 22, 64]);
        assert_eq!(Color::DARK_BLUE.to_hex(), "#101640");
    }

    #[test]
    fn recording_surface_keeps_state_per_save() {
        let mut surface = RecordingSurface::new();
        surface.set_fill_color(Color::WHITE);
        surface.save();
        surface.set_fill_color(Color::DARK_BLUE);
        surface.translate(10.0, 0.0);
        surface.fill_path(&Path::new());
        surface.restore();
        surface.fill_path(&Path::new());

        let ops = surface.ops();
        assert!(matches!(
            &ops[0],
            DrawOp::FillPath { color, transform, .. }
                if *color == Color::DARK_BLUE && transform.m31 == 10.0
        ));
        assert!(matches!(
            &ops[1],
            DrawOp::FillPath { color, transform, .. }
                if *color == Color::WHITE && transform.m31 == 0.0
        ));
        assert_eq!(surface.depth(), 0);
    }
}
