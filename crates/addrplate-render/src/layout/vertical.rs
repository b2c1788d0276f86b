use super::{HouseNumberRuns, PlateCanvas};
use crate::Result;
use crate::model::PlateLayout;
use crate::text::{TextComposer, wrap_words};
use addrplate_core::geom::point;
use addrplate_core::geometry::{VerticalPlateGeometry, WrappedBlock};
use addrplate_core::{PlateKind, SizeClass, StreetLabel, decompose};

pub(super) fn layout(
    composer: TextComposer<'_>,
    g: &VerticalPlateGeometry,
    size: SizeClass,
    street: &StreetLabel,
    house_number: &str,
) -> Result<PlateLayout> {
    let number = decompose(house_number)?;
    let drawable = g.drawable_width();

    let mut canvas = PlateCanvas::new(g.margin);

    // The street blocks stack: each offset is relative to the block above it.
    canvas.scoped(|c| -> Result<()> {
        let street_type = composer.compose(&street.street_type, g.street_type.font)?;
        c.translate(0.0, g.street_type.baseline);
        c.draw_run(&street_type);

        c.translate(0.0, g.street_name.offset);
        wrapped_block(composer, c, &g.street_name, &street.street_name, drawable)?;

        c.translate(0.0, g.separator.offset);
        c.line(point(0.0, 0.0), point(drawable, 0.0), g.separator.line_width);

        c.translate(0.0, g.street_translit.offset);
        wrapped_block(composer, c, &g.street_translit, &street.street_translit, drawable)?;
        Ok(())
    })?;

    let runs = HouseNumberRuns::compose(composer, &number, &g.house_number.fonts)?;
    canvas.scoped(|c| {
        c.translate(0.0, g.house_number.baseline);
        if runs.width > drawable {
            let scale = drawable / runs.width;
            tracing::debug!(scale, content = runs.width, drawable, "house number scaled to fit");
            c.scale(scale);
        }
        runs.draw(c);
    });

    Ok(PlateLayout {
        kind: PlateKind::Vertical,
        size,
        width: g.width,
        height: g.height,
        margin: g.margin,
        radius: g.radius,
        elements: canvas.into_elements(),
    })
}

/// Draws `text` on one line when it fits, otherwise re-wraps it and shrinks every line by the
/// same factor. Leaves the origin on the baseline of the last line drawn.
fn wrapped_block(
    composer: TextComposer<'_>,
    canvas: &mut PlateCanvas,
    block: &WrappedBlock,
    text: &str,
    drawable: f64,
) -> Result<()> {
    let single = composer.compose(text, block.font)?;
    if single.width() < drawable {
        canvas.draw_run(&single);
        return Ok(());
    }

    let lines = wrap_words(text, block.max_chars)
        .iter()
        .map(|line| composer.compose(line, block.font))
        .collect::<Result<Vec<_>>>()?;
    let widest = lines.iter().map(|run| run.width()).fold(0.0_f64, f64::max);
    let scale = if widest > drawable {
        drawable / widest
    } else {
        1.0
    };
    let leading = block.leading();
    tracing::debug!(lines = lines.len(), widest, scale, "wrapped block");

    canvas.scoped(|c| {
        c.scale(scale);
        for (idx, run) in lines.iter().enumerate() {
            if idx > 0 {
                c.translate(0.0, leading);
            }
            c.draw_run(run);
        }
    });
    let consumed = lines.len().saturating_sub(1) as f64 * leading * scale;
    canvas.translate(0.0, consumed);
    Ok(())
}
