use super::PlateCanvas;
use crate::Result;
use crate::model::PlateLayout;
use crate::text::TextComposer;
use addrplate_core::geom::point;
use addrplate_core::geometry::NamePlateGeometry;
use addrplate_core::{PlateKind, SizeClass, StreetLabel};

/// Share of a margin that must stay free to the right of the widest line.
const BREATHING_ROOM: f64 = 0.7;

pub(super) fn layout(
    composer: TextComposer<'_>,
    g: &NamePlateGeometry,
    size: SizeClass,
    street: &StreetLabel,
) -> Result<PlateLayout> {
    let street_type = composer.compose(&street.street_type, g.street_type.font)?;
    let street_name = composer.compose(&street.street_name, g.street_name.font)?;
    let street_translit = composer.compose(&street.street_translit, g.street_translit.font)?;

    let widest = [&street_type, &street_name, &street_translit]
        .iter()
        .map(|run| run.width())
        .fold(0.0_f64, f64::max);
    let width = plate_width(widest, g.margin);
    tracing::debug!(widest, width, "name plate width");

    let mut canvas = PlateCanvas::new(g.margin);
    for (run, baseline) in [
        (&street_type, g.street_type.baseline),
        (&street_name, g.street_name.baseline),
    ] {
        canvas.scoped(|c| {
            c.translate(0.0, baseline);
            c.draw_run(run);
        });
    }

    let y = g.separator.baseline;
    canvas.line(
        point(0.0, y),
        point(width - g.margin * 2.0, y),
        g.separator.line_width,
    );

    canvas.scoped(|c| {
        c.translate(0.0, g.street_translit.baseline);
        c.draw_run(&street_translit);
    });

    Ok(PlateLayout {
        kind: PlateKind::Name,
        size,
        width,
        height: g.height,
        margin: g.margin,
        radius: g.radius,
        elements: canvas.into_elements(),
    })
}

/// Plate width grows in whole margins: the widest line plus some breathing room, rounded down to
/// a margin multiple, plus one margin on each side.
pub(super) fn plate_width(widest: f64, margin: f64) -> f64 {
    (((widest + margin * BREATHING_ROOM) / margin).floor() + 2.0) * margin
}
