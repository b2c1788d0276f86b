use crate::path::Path;
use addrplate_core::geom::{Point, Transform};
use addrplate_core::{FontSpec, PlateKind, SizeClass};
use serde::Serialize;

/// A fully resolved plate: page size plus everything drawn on it, in painting order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateLayout {
    pub kind: PlateKind,
    pub size: SizeClass,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub radius: f64,
    pub elements: Vec<PlateElement>,
}

/// Each element carries the absolute transform that was current when it was laid out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlateElement {
    Text {
        text: String,
        font: FontSpec,
        path: Path,
        transform: Transform,
    },
    Rule {
        from: Point,
        to: Point,
        line_width: f64,
        transform: Transform,
    },
    Arrowhead {
        points: [Point; 3],
        transform: Transform,
    },
}

impl PlateElement {
    pub fn transform(&self) -> &Transform {
        match self {
            PlateElement::Text { transform, .. }
            | PlateElement::Rule { transform, .. }
            | PlateElement::Arrowhead { transform, .. } => transform,
        }
    }
}

impl PlateLayout {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            PlateElement::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rule_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PlateElement::Rule { .. }))
            .count()
    }

    pub fn arrowhead_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PlateElement::Arrowhead { .. }))
            .count()
    }

    pub fn drawable_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }
}
