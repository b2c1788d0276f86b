//! Single-page SVG output.

use crate::path::{Path, PathCommand};
use crate::surface::{Color, StateStack, Surface};
use addrplate_core::geom::{Point, Transform};
use std::fmt::Write as _;

/// Writes SVG markup, one element per primitive. One user unit is one PostScript point, so a
/// PDF converter that maps user units to points reproduces the plate size exactly.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    state: StateStack,
    out: String,
    open: bool,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished document. Closes the page if `end_page` was never called.
    pub fn into_svg(mut self) -> String {
        if self.open {
            self.end_page();
        }
        self.out
    }

    fn push_transform(&mut self) {
        let t = self.state.transform();
        if t == Transform::identity() {
            return;
        }
        let _ = write!(
            &mut self.out,
            r#" transform="matrix({} {} {} {} {} {})""#,
            fmt(t.m11),
            fmt(t.m12),
            fmt(t.m21),
            fmt(t.m22),
            fmt(t.m31),
            fmt(t.m32)
        );
    }
}

impl Surface for SvgSurface {
    fn begin_page(&mut self, width: f64, height: f64) {
        let (w, h) = (fmt(width), fmt(height));
        let _ = write!(
            &mut self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        self.open = true;
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
        if path.is_empty() {
            return;
        }
        let d = path_data(path);
        let fill = self.state.fill().to_hex();
        let _ = write!(&mut self.out, r#"<path d="{d}" fill="{fill}""#);
        self.push_transform();
        self.out.push_str("/>");
    }

    fn line(&mut self, from: Point, to: Point) {
        let stroke = self.state.stroke().to_hex();
        let _ = write!(
            &mut self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{}""#,
            fmt(from.x),
            fmt(from.y),
            fmt(to.x),
            fmt(to.y),
            fmt(self.state.line_width())
        );
        self.push_transform();
        self.out.push_str("/>");
    }

    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        let fill = self.state.fill().to_hex();
        let _ = write!(
            &mut self.out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{fill}""#,
            fmt(x),
            fmt(y),
            fmt(width),
            fmt(height),
            r = fmt(radius)
        );
        self.push_transform();
        self.out.push_str("/>");
    }

    fn end_page(&mut self) {
        self.out.push_str("</svg>\n");
        self.open = false;
    }
}

fn path_data(path: &Path) -> String {
    let mut d = String::new();
    for cmd in path.commands() {
        if !d.is_empty() {
            d.push(' ');
        }
        match cmd {
            PathCommand::Move(p) => {
                let _ = write!(&mut d, "M{},{}", fmt(p.x), fmt(p.y));
            }
            PathCommand::Line(p) => {
                let _ = write!(&mut d, "L{},{}", fmt(p.x), fmt(p.y));
            }
            PathCommand::Curve(c1, c2, p) => {
                let _ = write!(
                    &mut d,
                    "C{},{} {},{} {},{}",
                    fmt(c1.x),
                    fmt(c1.y),
                    fmt(c2.x),
                    fmt(c2.y),
                    fmt(p.x),
                    fmt(p.y)
                );
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

/// Shortest round-trippable decimal, without `-0` or float noise from layout arithmetic.
fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use addrplate_core::geom::point;

    #[test]
    fn fmt_trims_noise() {
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(2.5), "2.5");
        assert_eq!(fmt(3.0000000001), "3");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn writes_a_single_page() {
        let mut svg = SvgSurface::new();
        svg.begin_page(100.0, 50.0);
        svg.set_fill_color(Color::DARK_BLUE);
        svg.round_rect(0.0, 0.0, 100.0, 50.0, 5.0);
        svg.set_fill_color(Color::WHITE);
        svg.save();
        svg.translate(10.0, 20.0);
        svg.scale(0.5, 0.5);
        svg.fill_path(
            &Path::new()
                .move_to(point(0.0, 0.0))
                .line_to(point(4.0, 0.0))
                .curve_to(point(4.0, 1.0), point(3.0, 2.0), point(2.0, 2.0))
                .close(),
        );
        svg.restore();
        svg.set_stroke_color(Color::WHITE);
        svg.set_line_width(4.0);
        svg.line(point(0.0, 30.0), point(80.0, 30.0));
        let out = svg.into_svg();

        assert!(out.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50" viewBox="0 0 100 50">"#
        ));
        assert!(out.contains(r##"<rect x="0" y="0" width="100" height="50" rx="5" ry="5" fill="#101640"/>"##));
        assert!(out.contains(
            r##"<path d="M0,0 L4,0 C4,1 3,2 2,2 Z" fill="#ffffff" transform="matrix(0.5 0 0 0.5 10 20)"/>"##
        ));
        assert!(out.contains(
            r##"<line x1="0" y1="30" x2="80" y2="30" stroke="#ffffff" stroke-width="4"/>"##
        ));
        assert!(out.ends_with("</svg>\n"));
        assert_eq!(out.matches("<svg").count(), 1);
    }
}
