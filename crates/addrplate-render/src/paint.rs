use crate::model::{PlateElement, PlateLayout};
use crate::path::Path;
use crate::surface::{Color, Surface};
use addrplate_core::geom::Transform;

/// Replays a laid-out plate onto `surface` as exactly one page.
///
/// Layout only ever translates and scales uniformly, so each element's transform is reapplied as
/// a translate followed by a scale.
pub fn paint(layout: &PlateLayout, surface: &mut dyn Surface) {
    surface.begin_page(layout.width, layout.height);

    surface.set_fill_color(Color::DARK_BLUE);
    surface.round_rect(0.0, 0.0, layout.width, layout.height, layout.radius);

    surface.set_fill_color(Color::WHITE);
    surface.set_stroke_color(Color::WHITE);

    for element in &layout.elements {
        surface.save();
        apply(surface, element.transform());
        match element {
            PlateElement::Text { path, .. } => surface.fill_path(path),
            PlateElement::Rule {
                from,
                to,
                line_width,
                ..
            } => {
                surface.set_line_width(*line_width);
                surface.line(*from, *to);
            }
            PlateElement::Arrowhead { points, .. } => {
                let [apex, a, b] = *points;
                surface.fill_path(&Path::new().move_to(apex).line_to(a).line_to(b).close());
            }
        }
        surface.restore();
    }

    surface.end_page();
}

fn apply(surface: &mut dyn Surface, t: &Transform) {
    debug_assert!(t.m12 == 0.0 && t.m21 == 0.0, "layout never rotates or skews");
    surface.translate(t.m31, t.m32);
    surface.scale(t.m11, t.m22);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use addrplate_core::geom::{point, vector};
    use addrplate_core::{Face, FontSpec, PlateKind, SizeClass};

    fn sample_layout() -> PlateLayout {
        let placed = Transform::identity()
            .pre_translate(vector(40.0, 100.0))
            .pre_scale(0.5, 0.5);
        PlateLayout {
            kind: PlateKind::Number,
            size: SizeClass::Compact,
            width: 300.0,
            height: 200.0,
            margin: 40.0,
            radius: 10.0,
            elements: vec![
                PlateElement::Text {
                    text: "1".to_string(),
                    font: FontSpec::new(Face::SemiBold, 480.0),
                    path: Path::new().move_to(point(0.0, 0.0)).line_to(point(1.0, 0.0)),
                    transform: placed,
                },
                PlateElement::Rule {
                    from: point(0.0, 150.0),
                    to: point(220.0, 150.0),
                    line_width: 4.0,
                    transform: Transform::identity().pre_translate(vector(40.0, 0.0)),
                },
                PlateElement::Arrowhead {
                    points: [point(0.0, 150.0), point(9.0, 154.0), point(9.0, 146.0)],
                    transform: Transform::identity().pre_translate(vector(40.0, 0.0)),
                },
            ],
        }
    }

    #[test]
    fn paints_background_then_elements_on_one_page() {
        let mut surface = RecordingSurface::new();
        paint(&sample_layout(), &mut surface);
        assert_eq!(surface.depth(), 0);

        let ops = surface.ops();
        assert_eq!(ops.len(), 6);
        assert!(matches!(
            ops[0],
            DrawOp::BeginPage { width, height } if width == 300.0 && height == 200.0
        ));
        assert!(matches!(
            &ops[1],
            DrawOp::RoundRect { color, radius, .. } if *color == Color::DARK_BLUE && *radius == 10.0
        ));
        assert!(matches!(
            &ops[2],
            DrawOp::FillPath { color, transform, .. }
                if *color == Color::WHITE && transform == sample_layout().elements[0].transform()
        ));
        assert!(matches!(
            &ops[3],
            DrawOp::Line { width, color, .. } if *width == 4.0 && *color == Color::WHITE
        ));
        assert!(matches!(&ops[4], DrawOp::FillPath { path, .. } if path.len() == 4));
        assert!(matches!(ops[5], DrawOp::EndPage));
        assert_eq!(ops.iter().filter(|op| matches!(op, DrawOp::BeginPage { .. })).count(), 1);
    }
}
