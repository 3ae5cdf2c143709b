//! Border geometry
//!
//! Two drawing modes exist. When any corner is rounded, the fill and the
//! border share one rounded outline and the border is a single stroke of the
//! full width. Otherwise each edge is stroked on its own and the four
//! corners are patched with small polygons so adjacent edges of different
//! colors meet on the corner diagonal.
//!
//! [§ 5.5 Drawing borders](https://www.w3.org/TR/css-backgrounds-3/#border-style)

use super::{BorderSpec, Edge};
use crate::config::PxScale;
use crate::paint::{CornerRadii, DisplayCommand, Path, Point, Rect};

/// Extra pixel each corner polygon reaches past the edge it patches, so the
/// polygon overlaps the neighbouring stroke instead of leaving a seam.
const CORNER_OVERLAP: f32 = 1.0;

/// Minimum inset of a rectangular edge stroke's center line.
const MIN_STROKE_INSET: f32 = 1.0;

/// Paths shared by the fill, the clip and the border in rounded mode.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderPaths {
    /// The bounds inset by half the border width: the centerline of the
    /// border stroke, and the fill area when the border is opaque.
    pub inner: Path,
    /// The bounds with radii grown by half the border width: the full
    /// visual outline of the box.
    pub outline: Path,
    /// The border is at least as wide as the box's smaller side, so
    /// it covers the whole box. `inner` is then the box outline itself and
    /// the border is filled instead of stroked.
    pub covers_box: bool,
}

impl BorderPaths {
    /// Build both paths for `bounds` with `radii` and a uniform border of
    /// `full_width`.
    #[must_use]
    pub fn new(bounds: &Rect, full_width: f32, radii: &CornerRadii) -> Self {
        let inner_rect = if full_width > 0.0 {
            bounds.inset(full_width / 2.0)
        } else {
            *bounds
        };
        let covers_box = inner_rect.is_empty();
        let inner = if covers_box {
            Path::round_rect(bounds, radii)
        } else {
            Path::round_rect(&inner_rect, radii)
        };
        Self {
            inner,
            outline: Path::round_rect(bounds, &radii.expand(full_width / 2.0)),
            covers_box,
        }
    }
}

/// The single stroke drawn around a rounded box, or `None` without a
/// uniform border width. A border too wide to leave an inner area is a
/// solid fill of the box outline.
#[must_use]
pub fn rounded_border(
    paths: &BorderPaths,
    spec: &BorderSpec,
    scale: PxScale,
    alpha: u8,
) -> Option<DisplayCommand> {
    let width = spec.full_width(scale);
    if width <= 0.0 {
        return None;
    }
    let color = spec.full_color().multiply_alpha(alpha);
    if color.is_transparent() {
        return None;
    }
    if paths.covers_box {
        return Some(DisplayCommand::FillPath {
            path: paths.inner.clone(),
            color,
        });
    }
    Some(DisplayCommand::StrokePath {
        path: paths.inner.clone(),
        color,
        width,
        dash: spec.style.dash(width),
    })
}

/// Edge strokes and corner patches for a box with square corners.
#[must_use]
pub fn rectangular_border(
    bounds: &Rect,
    spec: &BorderSpec,
    scale: PxScale,
    alpha: u8,
) -> Vec<DisplayCommand> {
    let widths = EdgeWidths {
        left: spec.draw_width(Edge::Left, scale),
        top: spec.draw_width(Edge::Top, scale),
        right: spec.draw_width(Edge::Right, scale),
        bottom: spec.draw_width(Edge::Bottom, scale),
    };
    let color = |edge| spec.draw_color(edge).multiply_alpha(alpha);

    let mut commands = Vec::new();
    for edge in Edge::SIDES {
        if !spec.needs_draw(edge, scale) {
            continue;
        }
        let width = widths.get(edge);
        let color = color(edge);
        if color.is_transparent() {
            continue;
        }
        commands.push(DisplayCommand::StrokePath {
            path: edge_line(bounds, &widths, edge),
            color,
            width,
            dash: spec.style.dash(width),
        });
    }

    for (edge, neighbour, polygon) in corner_polygons(bounds, &widths) {
        if !(spec.needs_draw(edge, scale) && spec.needs_draw(neighbour, scale)) {
            continue;
        }
        let color = color(edge);
        if color.is_transparent() {
            continue;
        }
        commands.push(DisplayCommand::FillPath {
            path: Path::polygon(&polygon),
            color,
        });
    }
    commands
}

/// Opaque-fill test used by the compositor: the background may be clipped
/// to the inner path only when the border covers everything outside it.
#[must_use]
pub fn fill_inner_only(spec: &BorderSpec, scale: PxScale) -> bool {
    spec.full_width(scale) > 0.0 && !spec.is_translucent()
}

#[derive(Debug, Clone, Copy)]
struct EdgeWidths {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl EdgeWidths {
    const fn get(&self, edge: Edge) -> f32 {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom | Edge::All => self.bottom,
        }
    }
}

/// Center line of one edge stroke, running between the neighbouring edges.
fn edge_line(bounds: &Rect, w: &EdgeWidths, edge: Edge) -> Path {
    let inset = |width: f32| (width / 2.0).max(MIN_STROKE_INSET);
    let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
    let (from, to) = match edge {
        Edge::Left => {
            let x = l + inset(w.left);
            (Point::new(x, t + w.top), Point::new(x, b - w.bottom))
        }
        Edge::Top => {
            let y = t + inset(w.top);
            (Point::new(l + w.left, y), Point::new(r - w.right, y))
        }
        Edge::Right => {
            let x = r - inset(w.right);
            (Point::new(x, t + w.top), Point::new(x, b - w.bottom))
        }
        Edge::Bottom | Edge::All => {
            let y = b - inset(w.bottom);
            (Point::new(l + w.left, y), Point::new(r - w.right, y))
        }
    };
    Path::line(from, to)
}

/// The eight corner patches, two per corner, each tagged with the edge
/// whose color fills it and the other edge meeting at that corner. A
/// corner is patched only when both of its edges are drawn.
///
/// Each patch runs from the outer corner along its own edge, one pixel past
/// the neighbouring edge's width, across the border, and back to the inner
/// corner. The two patches of one corner split it along the diagonal from
/// the outer to the inner corner.
fn corner_polygons(bounds: &Rect, w: &EdgeWidths) -> [(Edge, Edge, [Point; 5]); 8] {
    let o = CORNER_OVERLAP;
    let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
    let p = Point::new;
    [
        // top-left
        (
            Edge::Left,
            Edge::Top,
            [
                p(l, t),
                p(l, t + w.top),
                p(l, t + w.top + o),
                p(l + w.left, t + w.top + o),
                p(l + w.left, t + w.top),
            ],
        ),
        (
            Edge::Top,
            Edge::Left,
            [
                p(l, t),
                p(l + w.left, t),
                p(l + w.left + o, t),
                p(l + w.left + o, t + w.top),
                p(l + w.left, t + w.top),
            ],
        ),
        // top-right
        (
            Edge::Top,
            Edge::Right,
            [
                p(r, t),
                p(r - w.right, t),
                p(r - w.right - o, t),
                p(r - w.right - o, t + w.top),
                p(r - w.right, t + w.top),
            ],
        ),
        (
            Edge::Right,
            Edge::Top,
            [
                p(r, t),
                p(r, t + w.top),
                p(r, t + w.top + o),
                p(r - w.right, t + w.top + o),
                p(r - w.right, t + w.top),
            ],
        ),
        // bottom-right
        (
            Edge::Right,
            Edge::Bottom,
            [
                p(r, b),
                p(r, b - w.bottom),
                p(r, b - w.bottom - o),
                p(r - w.right, b - w.bottom - o),
                p(r - w.right, b - w.bottom),
            ],
        ),
        (
            Edge::Bottom,
            Edge::Right,
            [
                p(r, b),
                p(r - w.right, b),
                p(r - w.right - o, b),
                p(r - w.right - o, b - w.bottom),
                p(r - w.right, b - w.bottom),
            ],
        ),
        // bottom-left
        (
            Edge::Bottom,
            Edge::Left,
            [
                p(l, b),
                p(l + w.left, b),
                p(l + w.left + o, b),
                p(l + w.left + o, b - w.bottom),
                p(l + w.left, b - w.bottom),
            ],
        ),
        (
            Edge::Left,
            Edge::Bottom,
            [
                p(l, b),
                p(l, b - w.bottom),
                p(l, b - w.bottom - o),
                p(l + w.left, b - w.bottom - o),
                p(l + w.left, b - w.bottom),
            ],
        ),
    ]
}
