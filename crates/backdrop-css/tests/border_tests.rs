//! Integration tests for border radii, border specs and border geometry.

use backdrop_css::borders::{BorderPaths, EdgeValues, rectangular_border, rounded_border};
use backdrop_css::paint::{CornerRadii, DashPattern, Radius};
use backdrop_css::{
    BorderSpec, BorderStyle, ColorValue, Corner, CornerRadiusSpec, DisplayCommand, Edge,
    LengthValue, Point, PxScale, Rect, StyleError,
};
use quickcheck_macros::quickcheck;

const ID: PxScale = PxScale::IDENTITY;

// ---------------------------------------------------------------------------
// Radius precedence
// ---------------------------------------------------------------------------

#[test]
fn test_corner_percent_beats_corner_px_on_every_corner() {
    for (index, corner) in Corner::ALL.into_iter().enumerate() {
        let mut spec = CornerRadiusSpec {
            uniform_px: Some(3.0),
            uniform_percent: Some(0.1),
            ..CornerRadiusSpec::default()
        };
        spec.corner_px[index] = Some(10.0);
        spec.corner_percent[index] = Some(0.2);

        assert!((spec.resolve(corner, 100.0, ID) - 20.0).abs() < 1e-4, "{corner}");
        for other in Corner::ALL.into_iter().filter(|c| *c != corner) {
            // Untouched corners fall back to the uniform percentage.
            assert!((spec.resolve(other, 100.0, ID) - 10.0).abs() < 1e-4, "{other}");
        }
    }
}

#[test]
fn test_precedence_chain() {
    let mut spec = CornerRadiusSpec::default();
    assert!(spec.resolve(Corner::TopLeft, 100.0, ID).abs() < 1e-6);

    spec.uniform_px = Some(4.0);
    assert!((spec.resolve(Corner::TopLeft, 100.0, ID) - 4.0).abs() < 1e-6);

    spec.uniform_percent = Some(0.25);
    assert!((spec.resolve(Corner::TopLeft, 100.0, ID) - 25.0).abs() < 1e-6);

    spec.corner_px[0] = Some(7.0);
    assert!((spec.resolve(Corner::TopLeft, 100.0, ID) - 7.0).abs() < 1e-6);
    assert!((spec.resolve(Corner::TopRight, 100.0, ID) - 25.0).abs() < 1e-6);

    spec.corner_percent[0] = Some(0.5);
    assert!((spec.resolve(Corner::TopLeft, 100.0, ID) - 50.0).abs() < 1e-6);
}

#[quickcheck]
fn prop_corner_percent_always_wins(percent: u8, px: u8, corner: u8) -> bool {
    let index = usize::from(corner % 4);
    let mut spec = CornerRadiusSpec {
        uniform_px: Some(1.0),
        uniform_percent: Some(0.3),
        ..CornerRadiusSpec::default()
    };
    spec.corner_px[index] = Some(f32::from(px));
    spec.corner_percent[index] = Some(f32::from(percent) / 100.0);
    let resolved = spec.resolve(Corner::ALL[index], 200.0, ID);
    (resolved - f32::from(percent) * 2.0).abs() < 1e-3
}

#[test]
fn test_percent_radius_uses_width_and_height() {
    let spec = CornerRadiusSpec::parse("50%").expect("valid");
    let radii = spec.resolve_all(100.0, 50.0, ID);
    for radius in [radii.top_left, radii.top_right, radii.bottom_right, radii.bottom_left] {
        assert_eq!(radius, Radius::new(50.0, 25.0));
    }
}

#[test]
fn test_px_radius_is_scaled() {
    let spec = CornerRadiusSpec::parse("8px").expect("valid");
    let radii = spec.resolve_all(100.0, 50.0, PxScale(2.0));
    assert_eq!(radii.top_left, Radius::new(16.0, 16.0));
}

#[test]
fn test_four_value_radius() {
    let spec = CornerRadiusSpec::parse("1px 2px 3% 4px").expect("valid");
    assert_eq!(spec.corner_px, [Some(1.0), Some(2.0), None, Some(4.0)]);
    assert_eq!(spec.corner_percent[2], Some(0.03));
    assert!(spec.uniform_px.is_none());
    assert!(spec.is_rounded());
}

#[test]
fn test_radius_rejections() {
    assert_eq!(CornerRadiusSpec::parse(""), Err(StyleError::Empty("border-radius")));
    assert!(CornerRadiusSpec::parse("1px 2px").is_err());
    assert!(CornerRadiusSpec::parse("-4px").is_err());
    assert!(CornerRadiusSpec::parse("4pxx").is_err());
    let fallback = CornerRadiusSpec::parse_or_default("1px 2px 3px");
    assert_eq!(fallback, CornerRadiusSpec::default());
    assert!(!fallback.is_rounded());
}

#[test]
fn test_setting_one_unit_clears_the_other() {
    let mut spec = CornerRadiusSpec::default();
    spec.set_corner(Corner::BottomLeft, LengthValue::Percent(10.0));
    spec.set_corner(Corner::BottomLeft, LengthValue::Px(6.0));
    assert_eq!(spec.corner_percent[3], None);
    assert_eq!(spec.corner_px[3], Some(6.0));

    spec.set_uniform(LengthValue::Px(2.0));
    spec.set_uniform(LengthValue::Percent(50.0));
    assert_eq!(spec.uniform_px, None);
    assert_eq!(spec.uniform_percent, Some(0.5));
}

#[test]
fn test_zero_radius_is_not_rounded() {
    assert!(!CornerRadiusSpec::parse("0px").expect("valid").is_rounded());
    assert!(!CornerRadiusSpec::parse("0 0 0 0").expect("valid").is_rounded());
    assert!(CornerRadiusSpec::parse("0 0 1% 0").expect("valid").is_rounded());
}

// ---------------------------------------------------------------------------
// Border spec
// ---------------------------------------------------------------------------

#[test]
fn test_full_values_need_four_equal_edges() {
    let mut spec = BorderSpec::default();
    let _ = spec.widths.set(Edge::All, Some(2.0));
    assert!((spec.full_width(ID) - 2.0).abs() < 1e-6);

    let _ = spec.widths.set(Edge::Top, Some(3.0));
    assert!(spec.full_width(ID).abs() < 1e-6);
    assert!((spec.width(Edge::Top, ID) - 3.0).abs() < 1e-6);
    assert!((spec.width(Edge::Left, ID) - 2.0).abs() < 1e-6);

    let red = ColorValue::rgb(255, 0, 0);
    let _ = spec.colors.set(Edge::All, Some(red));
    assert_eq!(spec.full_color(), red);
    let _ = spec.colors.set(Edge::Right, Some(ColorValue::WHITE));
    assert_eq!(spec.full_color(), ColorValue::BLACK);
    assert_eq!(spec.draw_color(Edge::Right), ColorValue::WHITE);
}

#[test]
fn test_default_border_has_no_edge_values() {
    let spec = BorderSpec::default();
    assert_eq!(spec.colors, EdgeValues::<ColorValue>::default());
    assert_eq!(spec.colors.get(Edge::Top), None);
    assert_eq!(spec.color(Edge::Top), ColorValue::BLACK);
    assert!(spec.full_width(ID).abs() < 1e-6);
}

#[test]
fn test_edge_values_report_changes() {
    let mut values = EdgeValues::<f32>::default();
    assert!(values.set(Edge::Left, Some(1.0)));
    assert!(!values.set(Edge::Left, Some(1.0)));
    assert_eq!(values.get(Edge::Top), None);
    assert!(values.set(Edge::All, Some(4.0)));
    assert_eq!(values.get(Edge::Top), Some(4.0));
    assert_eq!(values.get(Edge::Left), Some(1.0));
}

#[test]
fn test_draw_width_falls_back_to_full_width() {
    let mut spec = BorderSpec::default();
    for edge in Edge::SIDES {
        let _ = spec.widths.set(edge, Some(5.0));
    }
    let _ = spec.widths.set(Edge::Top, Some(0.0));
    // Edges differ, so there is no full width to fall back to.
    assert!(!spec.needs_draw(Edge::Top, ID));
    assert!(spec.needs_draw(Edge::Left, ID));
}

#[test]
fn test_dash_patterns() {
    assert_eq!(BorderStyle::Solid.dash(4.0), None);
    assert_eq!(BorderStyle::Dashed.dash(2.0), Some(DashPattern { on: 6.0, off: 6.0 }));
    assert_eq!(BorderStyle::Dotted.dash(1.0), Some(DashPattern { on: 2.0, off: 2.0 }));
    assert_eq!(BorderStyle::Dotted.dash(3.0), Some(DashPattern { on: 3.0, off: 3.0 }));
    assert_eq!("DASHED".parse::<BorderStyle>(), Ok(BorderStyle::Dashed));
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn test_rounded_paths() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let radii = CornerRadii::uniform(Radius::new(10.0, 10.0));
    let paths = BorderPaths::new(&bounds, 4.0, &radii);
    assert_eq!(paths.inner.bounds(), Some(Rect::new(2.0, 2.0, 96.0, 46.0)));
    assert_eq!(paths.outline.bounds(), Some(bounds));
    // The outline corner is wider than the inner one by half the border.
    assert!(paths.outline.points().any(|p| p == Point::new(12.0, 0.0)));
    assert!(paths.inner.points().any(|p| p == Point::new(12.0, 2.0)));
    assert!(!paths.covers_box);
}

#[test]
fn test_border_wider_than_box_fills_the_box() {
    let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
    let radii = CornerRadii::uniform(Radius::new(2.0, 2.0));
    let paths = BorderPaths::new(&bounds, 12.0, &radii);
    assert!(paths.covers_box);
    assert_eq!(paths.inner.bounds(), Some(bounds));
    assert!(!paths.outline.is_empty());

    let mut spec = BorderSpec::default();
    let _ = spec.widths.set(Edge::All, Some(12.0));
    let _ = spec.colors.set(Edge::All, Some(ColorValue::rgb(255, 0, 0)));
    match rounded_border(&paths, &spec, ID, 255) {
        Some(DisplayCommand::FillPath { path, color }) => {
            assert_eq!(path.bounds(), Some(bounds));
            assert_eq!(color, ColorValue::rgb(255, 0, 0));
        }
        other => panic!("expected a filled border, got {other:?}"),
    }
}

fn four_color_border(width: f32) -> BorderSpec {
    let mut spec = BorderSpec::default();
    let colors = [
        (Edge::Left, ColorValue::rgb(255, 0, 0)),
        (Edge::Top, ColorValue::rgb(0, 255, 0)),
        (Edge::Right, ColorValue::rgb(0, 0, 255)),
        (Edge::Bottom, ColorValue::rgb(255, 255, 0)),
    ];
    for (edge, color) in colors {
        let _ = spec.widths.set(edge, Some(width));
        let _ = spec.colors.set(edge, Some(color));
    }
    spec
}

fn polygons(commands: &[DisplayCommand]) -> Vec<(Vec<Point>, ColorValue)> {
    commands
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillPath { path, color } => Some((path.points().collect(), *color)),
            _ => None,
        })
        .collect()
}

/// Even-odd ray casting.
fn polygon_contains(polygon: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[test]
fn test_rectangular_border_strokes_and_corners() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let spec = four_color_border(4.0);
    let commands = rectangular_border(&bounds, &spec, ID, 255);
    let strokes: Vec<_> = commands
        .iter()
        .filter(|c| matches!(c, DisplayCommand::StrokePath { .. }))
        .collect();
    assert_eq!(strokes.len(), 4);
    assert_eq!(polygons(&commands).len(), 8);

    let DisplayCommand::StrokePath { path, width, color, .. } = strokes[0] else {
        panic!("expected a stroke");
    };
    assert_eq!(*color, ColorValue::rgb(255, 0, 0));
    assert!((width - 4.0).abs() < 1e-6);
    let points: Vec<_> = path.points().collect();
    assert_eq!(points, vec![Point::new(2.0, 4.0), Point::new(2.0, 46.0)]);
}

#[test]
fn test_thin_edges_stay_inside_bounds() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let spec = four_color_border(1.0);
    let commands = rectangular_border(&bounds, &spec, ID, 255);
    let DisplayCommand::StrokePath { path, .. } = &commands[3] else {
        panic!("expected the bottom stroke");
    };
    assert!(path.points().all(|p| (p.y - 49.0).abs() < 1e-6));
}

#[test]
fn test_corners_have_no_gaps() {
    let (w, h, b) = (100.0, 50.0, 6.0);
    let bounds = Rect::new(10.0, 20.0, w, h);
    let spec = four_color_border(b);
    let polygons = polygons(&rectangular_border(&bounds, &spec, ID, 255));

    let corners = [
        (10.0, 20.0),
        (10.0 + w - b, 20.0),
        (10.0 + w - b, 20.0 + h - b),
        (10.0, 20.0 + h - b),
    ];
    for (cx, cy) in corners {
        for i in 0..6 {
            for j in 0..6 {
                // Offsets never land on the corner diagonals.
                let p = Point::new(cx + i as f32 + 0.25, cy + j as f32 + 0.6);
                let covering: Vec<_> = polygons
                    .iter()
                    .filter(|(polygon, _)| polygon_contains(polygon, p))
                    .collect();
                assert_eq!(covering.len(), 1, "({}, {}) covered {} times", p.x, p.y, covering.len());
            }
        }
    }
}

#[test]
fn test_corner_colors_split_on_diagonal() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let spec = four_color_border(4.0);
    let polygons = polygons(&rectangular_border(&bounds, &spec, ID, 255));
    let color_at = |p: Point| {
        polygons
            .iter()
            .find(|(polygon, _)| polygon_contains(polygon, p))
            .map(|(_, color)| *color)
    };
    // Top-left: below the diagonal is the left edge, above it the top edge.
    assert_eq!(color_at(Point::new(0.5, 3.0)), Some(ColorValue::rgb(255, 0, 0)));
    assert_eq!(color_at(Point::new(3.0, 0.5)), Some(ColorValue::rgb(0, 255, 0)));
    // Bottom-right: right edge above the diagonal, bottom edge below it.
    assert_eq!(color_at(Point::new(99.5, 47.0)), Some(ColorValue::rgb(0, 0, 255)));
    assert_eq!(color_at(Point::new(97.0, 49.5)), Some(ColorValue::rgb(255, 255, 0)));
    // The overlap pixel reaches one pixel past the neighbouring edge.
    assert_eq!(color_at(Point::new(2.0, 4.5)), Some(ColorValue::rgb(255, 0, 0)));
}

#[test]
fn test_undrawn_edges_emit_nothing() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let mut spec = BorderSpec::default();
    let _ = spec.widths.set(Edge::Top, Some(2.0));
    let commands = rectangular_border(&bounds, &spec, ID, 255);
    assert_eq!(
        commands
            .iter()
            .filter(|c| matches!(c, DisplayCommand::StrokePath { .. }))
            .count(),
        1
    );
    // No corner has two drawn edges, so nothing is patched.
    assert!(polygons(&commands).is_empty());
}

#[test]
fn test_corner_patched_only_where_both_edges_draw() {
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let mut spec = BorderSpec::default();
    let _ = spec.widths.set(Edge::Top, Some(2.0));
    let _ = spec.widths.set(Edge::Left, Some(3.0));
    let polygons = polygons(&rectangular_border(&bounds, &spec, ID, 255));
    // Only the top-left corner has both of its edges, one patch per edge.
    assert_eq!(polygons.len(), 2);
    assert!(
        polygons
            .iter()
            .all(|(points, _)| points[0] == Point::new(0.0, 0.0))
    );
}

#[test]
fn test_alpha_applies_to_rectangular_border() {
    let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
    let spec = four_color_border(1.0);
    let commands = rectangular_border(&bounds, &spec, ID, 0);
    assert!(commands.is_empty());
    let commands = rectangular_border(&bounds, &spec, ID, 128);
    assert!(polygons(&commands).iter().all(|(_, color)| color.a == 128));
}
