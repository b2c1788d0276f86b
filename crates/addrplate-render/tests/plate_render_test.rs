mod common;

use addrplate_core::geom::pt;
use addrplate_core::{GeometryTable, PlateRequest, SizeClass};
use addrplate_render::surface::DrawOp;
use addrplate_render::{Color, RecordingSurface, SvgSurface, layout_plate, paint};

#[test]
fn compact_145_renders_one_page_without_arrows() {
    let store = common::synthetic_store();
    let request = PlateRequest::number(SizeClass::Compact, "145");
    let layout = layout_plate(&request, &store, GeometryTable::builtin()).unwrap();

    let mut surface = RecordingSurface::new();
    paint(&layout, &mut surface);
    let ops = surface.ops();

    let pages: Vec<_> = ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::BeginPage { width, height } => Some((*width, *height)),
            _ => None,
        })
        .collect();
    assert_eq!(pages.len(), 1);
    assert!((pages[0].0 - pt(380.0)).abs() < 1e-9);
    assert!((pages[0].1 - pt(215.0)).abs() < 1e-9);

    // Background plus the one house-number run; no lines, no arrowheads.
    let fills = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillPath { .. }))
        .count();
    assert_eq!(fills, 1);
    assert!(!ops.iter().any(|op| matches!(op, DrawOp::Line { .. })));
    assert!(matches!(
        &ops[1],
        DrawOp::RoundRect { color, .. } if *color == Color::DARK_BLUE
    ));
    assert!(matches!(ops.last(), Some(DrawOp::EndPage)));
    assert_eq!(surface.depth(), 0);
}

#[test]
fn every_plate_kind_renders_to_svg() {
    let store = common::synthetic_store();
    let requests = [
        PlateRequest::name(SizeClass::Large, "проспект", "Перемоги", "Peremohy avenue"),
        PlateRequest::number(SizeClass::Large, "27/2А")
            .with_neighbors(Some("25".to_string()), Some("29-31".to_string())),
        PlateRequest::vertical(
            SizeClass::Large,
            "вулиця",
            "Академіка Володимира Глушкова",
            "Akademika Volodymyra Hlushkova street",
            "40 к2",
        ),
    ];

    for request in &requests {
        let layout = layout_plate(request, &store, GeometryTable::builtin()).unwrap();
        let mut svg = SvgSurface::new();
        paint(&layout, &mut svg);
        let out = svg.into_svg();

        assert_eq!(out.matches("<svg").count(), 1, "{:?}", request.kind);
        assert!(out.contains(r##"fill="#101640""##));
        assert_eq!(
            out.matches("<path").count(),
            layout.texts().count() + layout.arrowhead_count()
        );
        assert_eq!(out.matches("<line").count(), layout.rule_count());
    }
}

#[test]
fn failed_layout_produces_no_output() {
    let store = common::synthetic_store();
    let request = PlateRequest::number(SizeClass::Compact, "№5");
    assert!(layout_plate(&request, &store, GeometryTable::builtin()).is_err());
}

#[test]
fn layout_serializes_to_json() {
    let store = common::synthetic_store();
    let request = PlateRequest::number(SizeClass::Compact, "7")
        .with_neighbors(None, Some("9".to_string()));
    let layout = layout_plate(&request, &store, GeometryTable::builtin()).unwrap();
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["kind"], "number");
    assert_eq!(json["size"], "compact");
    let types: Vec<_> = json["elements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        types,
        vec!["text", "rule", "arrowhead", "rule", "text"]
    );
}
