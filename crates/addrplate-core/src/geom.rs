#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Transform = euclid::Transform2D<f64, Unit, Unit>;

/// Points per millimetre (72 / 25.4).
pub const PT_PER_MM: f64 = 2.834645669;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Millimetres to PostScript points.
pub fn pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}
