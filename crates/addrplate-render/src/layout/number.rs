use super::{HouseNumberRuns, PlateCanvas};
use crate::Result;
use crate::model::PlateLayout;
use crate::text::TextComposer;
use addrplate_core::geom::point;
use addrplate_core::geometry::{ArrowGeometry, SizeClassGeometry};
use addrplate_core::{ArrowNumber, PlateKind, SizeClass, decompose, decompose_arrow, width_bucket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

pub(super) fn layout(
    composer: TextComposer<'_>,
    geometry: &SizeClassGeometry,
    size: SizeClass,
    house_number: &str,
    left_number: Option<&str>,
    right_number: Option<&str>,
) -> Result<PlateLayout> {
    // Parse everything up front: a bad neighbor number must fail before anything is laid out.
    let number = decompose(house_number)?;
    let left = left_number.map(decompose_arrow).transpose()?;
    let right = right_number.map(decompose_arrow).transpose()?;

    let with_arrows = left.is_some() || right.is_some();
    let g = geometry.number_plate(with_arrows);
    let width = g.width_for(house_number);
    let drawable = width - g.margin * 2.0;
    tracing::debug!(
        bucket = width_bucket(house_number.chars().count()),
        width,
        with_arrows,
        "number plate width"
    );

    let runs = HouseNumberRuns::compose(composer, &number, &g.fonts)?;

    let mut canvas = PlateCanvas::new(g.margin);
    canvas.scoped(|c| {
        c.translate(0.0, g.baseline);
        let tx = (drawable - runs.width) / 2.0;
        if tx >= 0.0 {
            c.translate(tx, 0.0);
        } else {
            // Content is wider than the plate, so `runs.width > drawable > 0`.
            let scale = drawable / runs.width;
            tracing::debug!(scale, content = runs.width, drawable, "house number scaled to fit");
            c.scale(scale);
        }
        runs.draw(c);
    });

    if with_arrows {
        let arrows = g.arrows.as_ref().ok_or_else(|| addrplate_core::Error::InvalidGeometry {
            message: format!("{size}: number_with_arrows needs arrow geometry"),
        })?;
        draw_arrows(&mut canvas, arrows, drawable, left.is_some(), right.is_some());
        if let Some(left) = &left {
            draw_label(composer, &mut canvas, arrows, drawable, left, Side::Left)?;
        }
        if let Some(right) = &right {
            draw_label(composer, &mut canvas, arrows, drawable, right, Side::Right)?;
        }
    }

    Ok(PlateLayout {
        kind: PlateKind::Number,
        size,
        width,
        height: g.height,
        margin: g.margin,
        radius: g.radius,
        elements: canvas.into_elements(),
    })
}

/// Arrowheads point at the plate edges on sides that have a neighbor. Where a side has none, its
/// line runs unbroken past the center gap.
fn draw_arrows(
    canvas: &mut PlateCanvas,
    a: &ArrowGeometry,
    width: f64,
    left: bool,
    right: bool,
) {
    let y = a.baseline;
    let center = width / 2.0;

    if left {
        canvas.arrowhead([
            point(0.0, y),
            point(a.length, y + a.half_height),
            point(a.length, y - a.half_height),
        ]);
        canvas.line(point(a.length, y), point(center - a.half_space, y), a.line_width);
    } else {
        canvas.line(point(0.0, y), point(center + a.half_space, y), a.line_width);
    }

    if right {
        canvas.arrowhead([
            point(width, y),
            point(width - a.length, y + a.half_height),
            point(width - a.length, y - a.half_height),
        ]);
        canvas.line(
            point(center + a.half_space, y),
            point(width - a.length, y),
            a.line_width,
        );
    } else {
        canvas.line(point(center - a.half_space, y), point(width, y), a.line_width);
    }
}

/// Left labels start at the left edge, numeral first. Right labels end at the right edge: the
/// letter suffix is placed first, then the numeral to its left.
fn draw_label(
    composer: TextComposer<'_>,
    canvas: &mut PlateCanvas,
    a: &ArrowGeometry,
    width: f64,
    label: &ArrowNumber,
    side: Side,
) -> Result<()> {
    let numeral = composer.compose(&label.primary, a.label_fonts.lvl_a1)?;
    let letter = label
        .letter
        .as_deref()
        .map(|l| composer.compose(l, a.label_fonts.lvl_a2c))
        .transpose()?;

    canvas.scoped(|c| match side {
        Side::Left => {
            c.translate(0.0, a.label_baseline);
            c.draw_run(&numeral);
            if let Some(letter) = &letter {
                c.translate(numeral.advance_x(), 0.0);
                c.draw_run(letter);
            }
        }
        Side::Right => {
            c.translate(width, a.label_baseline);
            if let Some(letter) = &letter {
                c.translate(-letter.advance_x(), 0.0);
                c.draw_run(letter);
            }
            c.translate(-numeral.advance_x(), 0.0);
            c.draw_run(&numeral);
        }
    });
    Ok(())
}
