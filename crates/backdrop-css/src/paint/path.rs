//! Backend-neutral 2D geometry: points, rectangles, paths and affine
//! transforms.
//!
//! The compositor only ever describes shapes with these types; a raster
//! backend translates them to its own path and matrix objects.

use serde::Serialize;

/// Cubic control-point factor approximating a quarter ellipse.
const KAPPA: f32 = 0.552_284_75;

/// A point in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `self + (other * factor)`, i.e. move along a vector.
    #[must_use]
    pub fn offset_by(self, vector: Self, factor: f32) -> Self {
        Self::new(self.x + vector.x * factor, self.y + vector.y * factor)
    }

    /// Vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(self, other: Self) -> Self {
        Self::new(other.x - self.x, other.y - self.y)
    }

    /// Euclidean length of this point taken as a vector.
    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// An axis-aligned rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink every side by `amount`.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - 2.0 * amount,
            self.height - 2.0 * amount,
        )
    }

    /// Overlap of two rectangles, or `None` when they do not intersect.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > x && bottom > y).then(|| Self::new(x, y, right - x, bottom - y))
    }
}

/// Horizontal and vertical radius of one elliptical corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Radius {
    /// Horizontal radius.
    pub x: f32,
    /// Vertical radius.
    pub y: f32,
}

impl Radius {
    /// Create a corner radius.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether the corner is square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x <= 0.0 || self.y <= 0.0
    }

    /// Grow both radii by `amount`, keeping them non-negative.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new((self.x + amount).max(0.0), (self.y + amount).max(0.0))
    }
}

/// The four corner radii of a rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CornerRadii {
    /// Top-left corner.
    pub top_left: Radius,
    /// Top-right corner.
    pub top_right: Radius,
    /// Bottom-right corner.
    pub bottom_right: Radius,
    /// Bottom-left corner.
    pub bottom_left: Radius,
}

impl CornerRadii {
    /// The same radius on every corner.
    #[must_use]
    pub const fn uniform(radius: Radius) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Whether every corner is square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
            .iter()
            .all(Radius::is_zero)
    }

    /// Grow every radius by `amount`.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self {
            top_left: self.top_left.expand(amount),
            top_right: self.top_right.expand(amount),
            bottom_right: self.bottom_right.expand(amount),
            bottom_left: self.bottom_left.expand(amount),
        }
    }

    /// [§ 5.5 Overlapping Curves](https://www.w3.org/TR/css-backgrounds-3/#corner-overlap)
    ///
    /// "Let f = min(Li/Si), where i ∈ {top, right, bottom, left}, Si is the
    /// sum of the two corresponding radii of the corners on side i, and
    /// Ltop = Lbottom = the width of the box, and Lleft = Lright = the height
    /// of the box. If f < 1, then all corner radii are reduced by multiplying
    /// them by f."
    #[must_use]
    pub fn fit_to(&self, rect: &Rect) -> Self {
        let ratio = |length: f32, sum: f32| if sum > 0.0 { length / sum } else { f32::INFINITY };
        let f = ratio(rect.width, self.top_left.x + self.top_right.x)
            .min(ratio(rect.width, self.bottom_left.x + self.bottom_right.x))
            .min(ratio(rect.height, self.top_left.y + self.bottom_left.y))
            .min(ratio(rect.height, self.top_right.y + self.bottom_right.y));
        if f >= 1.0 {
            return *self;
        }
        let scale = |r: Radius| Radius::new(r.x * f, r.y * f);
        Self {
            top_left: scale(self.top_left),
            top_right: scale(self.top_right),
            bottom_right: scale(self.bottom_right),
            bottom_left: scale(self.bottom_left),
        }
    }
}

/// One drawing verb of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    /// Start a new contour.
    MoveTo(Point),
    /// Straight segment to a point.
    LineTo(Point),
    /// Cubic Bézier with two control points and an end point.
    CubicTo(Point, Point, Point),
    /// Close the current contour.
    Close,
}

/// An immutable sequence of path commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// A closed rectangle contour.
    #[must_use]
    pub fn rect(rect: &Rect) -> Self {
        let mut builder = PathBuilder::new();
        builder.push_rect(rect);
        builder.finish()
    }

    /// A closed rounded-rectangle contour.
    #[must_use]
    pub fn round_rect(rect: &Rect, radii: &CornerRadii) -> Self {
        let mut builder = PathBuilder::new();
        builder.push_round_rect(rect, radii);
        builder.finish()
    }

    /// A closed polygon through `points`.
    #[must_use]
    pub fn polygon(points: &[Point]) -> Self {
        let mut builder = PathBuilder::new();
        builder.push_polygon(points);
        builder.finish()
    }

    /// An open two-point line.
    #[must_use]
    pub fn line(from: Point, to: Point) -> Self {
        let mut builder = PathBuilder::new();
        builder.move_to(from);
        builder.line_to(to);
        builder.finish()
    }

    /// The commands in drawing order.
    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Whether the path draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every on-curve and control point, in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|command| match *command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::CubicTo(c1, c2, p) => vec![c1, c2, p],
            PathCommand::Close => Vec::new(),
        })
    }

    /// Bounding box of all points, control points included.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.points();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}

/// Incrementally builds a [`Path`].
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    /// An empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Start a new contour at `point`.
    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    /// Add a straight segment.
    pub fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    /// Add a cubic Bézier segment.
    pub fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.commands.push(PathCommand::CubicTo(c1, c2, end));
    }

    /// Close the current contour.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Add a closed rectangle contour, clockwise from the top-left corner.
    pub fn push_rect(&mut self, rect: &Rect) {
        self.move_to(Point::new(rect.x, rect.y));
        self.line_to(Point::new(rect.right(), rect.y));
        self.line_to(Point::new(rect.right(), rect.bottom()));
        self.line_to(Point::new(rect.x, rect.bottom()));
        self.close();
    }

    /// Add a closed polygon contour. Fewer than three points add nothing.
    pub fn push_polygon(&mut self, points: &[Point]) {
        if let [first, rest @ ..] = points
            && rest.len() >= 2
        {
            self.move_to(*first);
            for point in rest {
                self.line_to(*point);
            }
            self.close();
        }
    }

    /// Add a closed rounded rectangle, clockwise from the end of the top-left
    /// corner. Radii are first reduced so adjacent corners never overlap.
    /// Square corners degrade to plain line joins.
    pub fn push_round_rect(&mut self, rect: &Rect, radii: &CornerRadii) {
        if rect.is_empty() {
            return;
        }
        if radii.is_zero() {
            self.push_rect(rect);
            return;
        }

        let r = radii.fit_to(rect);
        let (x, y, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        let k = 1.0 - KAPPA;

        self.move_to(Point::new(x + r.top_left.x, y));
        self.line_to(Point::new(right - r.top_right.x, y));
        if !r.top_right.is_zero() {
            self.cubic_to(
                Point::new(right - r.top_right.x * k, y),
                Point::new(right, y + r.top_right.y * k),
                Point::new(right, y + r.top_right.y),
            );
        }

        self.line_to(Point::new(right, bottom - r.bottom_right.y));
        if !r.bottom_right.is_zero() {
            self.cubic_to(
                Point::new(right, bottom - r.bottom_right.y * k),
                Point::new(right - r.bottom_right.x * k, bottom),
                Point::new(right - r.bottom_right.x, bottom),
            );
        }

        self.line_to(Point::new(x + r.bottom_left.x, bottom));
        if !r.bottom_left.is_zero() {
            self.cubic_to(
                Point::new(x + r.bottom_left.x * k, bottom),
                Point::new(x, bottom - r.bottom_left.y * k),
                Point::new(x, bottom - r.bottom_left.y),
            );
        }

        self.line_to(Point::new(x, y + r.top_left.y));
        if !r.top_left.is_zero() {
            self.cubic_to(
                Point::new(x, y + r.top_left.y * k),
                Point::new(x + r.top_left.x * k, y),
                Point::new(x + r.top_left.x, y),
            );
        }

        self.close();
    }

    /// Take the accumulated commands.
    #[must_use]
    pub fn finish(self) -> Path {
        Path {
            commands: self.commands,
        }
    }
}

/// A 2D affine transform, stored row-major like a canvas matrix:
///
/// ```text
/// | sx kx tx |
/// | ky sy ty |
/// | 0  0  1  |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineTransform {
    /// Horizontal scale.
    pub sx: f32,
    /// Vertical skew.
    pub ky: f32,
    /// Horizontal skew.
    pub kx: f32,
    /// Vertical scale.
    pub sy: f32,
    /// Horizontal translation.
    pub tx: f32,
    /// Vertical translation.
    pub ty: f32,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        sx: 1.0,
        ky: 0.0,
        kx: 0.0,
        sy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// A pure translation.
    #[must_use]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            tx,
            ty,
            ..Self::IDENTITY
        }
    }

    /// A pure scale about the origin.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            sx,
            sy,
            ..Self::IDENTITY
        }
    }

    /// `self * other`: apply `other` first, then `self`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            sx: self.sx * other.sx + self.kx * other.ky,
            ky: self.ky * other.sx + self.sy * other.ky,
            kx: self.sx * other.kx + self.kx * other.sy,
            sy: self.ky * other.kx + self.sy * other.sy,
            tx: self.sx * other.tx + self.kx * other.ty + self.tx,
            ty: self.ky * other.tx + self.sy * other.ty + self.ty,
        }
    }

    /// Scale in local space before the existing transform.
    #[must_use]
    pub fn pre_scale(&self, sx: f32, sy: f32) -> Self {
        self.concat(&Self::scale(sx, sy))
    }

    /// Map a point through the transform.
    #[must_use]
    pub fn map_point(&self, point: Point) -> Point {
        Point::new(
            self.sx * point.x + self.kx * point.y + self.tx,
            self.ky * point.x + self.sy * point.y + self.ty,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_rect_starts_after_top_left_corner() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let path = Path::round_rect(&rect, &CornerRadii::uniform(Radius::new(10.0, 10.0)));
        assert_eq!(path.commands()[0], PathCommand::MoveTo(Point::new(10.0, 0.0)));
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(path.bounds(), Some(rect));
    }

    #[test]
    fn test_overlapping_radii_are_scaled_down() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        let fitted = CornerRadii::uniform(Radius::new(50.0, 50.0)).fit_to(&rect);
        assert!((fitted.top_left.x - 25.0).abs() < 1e-4);
        assert!((fitted.top_left.y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_pre_scale_then_translate() {
        let transform = AffineTransform::translate(10.0, 20.0).pre_scale(2.0, 3.0);
        assert_eq!(transform.map_point(Point::new(1.0, 1.0)), Point::new(12.0, 23.0));
    }

    #[test]
    fn test_polygon_needs_three_points() {
        assert!(Path::polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_empty());
        assert_eq!(
            Path::polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)])
                .commands()
                .len(),
            4
        );
    }
}
