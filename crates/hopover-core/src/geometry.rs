//! Fixed dimensions of the intersection and the geometry derived from them.
//!
//! All positions are in widget-local coordinates: the origin is the top-left
//! corner of the square frame and y grows downward.

use std::f64::consts::PI;

use kurbo::{Arc, BezPath, Point, Rect, Shape as KurboShape, Size, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::SerializableColor;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid constants: {0}")]
    InvalidConstants(String),
}

/// Immutable widget dimensions.
///
/// Hosts may load overrides from JSON; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConstants {
    /// Length of each line, which is also the frame's side.
    pub line_length: f64,
    /// Thickness of the lines and of the arc stroke.
    pub line_thickness: f64,
    /// Line and arc color.
    pub color: SerializableColor,
    /// Width of the break in the horizontal line in raised mode.
    pub gap: f64,
}

impl GeometryConstants {
    pub const DEFAULT_LINE_LENGTH: f64 = 100.0;
    pub const DEFAULT_LINE_THICKNESS: f64 = 4.0;
    pub const DEFAULT_GAP: f64 = 12.0;

    /// Parse constants from a JSON object and validate them.
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        let constants: Self = serde_json::from_str(json)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Check that the bars and the gap fit inside the frame.
    pub fn validate(self) -> Result<Self, GeometryError> {
        let invalid = |msg: String| Err(GeometryError::InvalidConstants(msg));
        for (name, value) in [
            ("line_length", self.line_length),
            ("line_thickness", self.line_thickness),
            ("gap", self.gap),
        ] {
            if !value.is_finite() {
                return invalid(format!("{} must be finite, got {}", name, value));
            }
            if value <= 0.0 {
                return invalid(format!("{} must be positive, got {}", name, value));
            }
        }
        if self.gap >= self.line_length {
            return invalid(format!(
                "gap {} must be shorter than line_length {}",
                self.gap, self.line_length
            ));
        }
        if self.line_thickness >= self.line_length {
            return invalid(format!(
                "line_thickness {} must be thinner than line_length {}",
                self.line_thickness, self.line_length
            ));
        }
        Ok(self)
    }

    /// Set the line length.
    pub fn with_line_length(mut self, line_length: f64) -> Self {
        self.line_length = line_length;
        self
    }

    /// Set the line thickness.
    pub fn with_line_thickness(mut self, line_thickness: f64) -> Self {
        self.line_thickness = line_thickness;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: SerializableColor) -> Self {
        self.color = color;
        self
    }

    /// Set the gap width.
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Radius of the bridge arc (half the gap).
    pub fn arc_radius(&self) -> f64 {
        self.gap / 2.0
    }

    /// Margin around the arc so its stroke is not clipped.
    pub fn stroke_margin(&self) -> f64 {
        self.line_thickness / 2.0
    }

    /// Size of the frame.
    pub fn frame_size(&self) -> Size {
        Size::new(self.line_length, self.line_length)
    }
}

impl Default for GeometryConstants {
    fn default() -> Self {
        Self {
            line_length: Self::DEFAULT_LINE_LENGTH,
            line_thickness: Self::DEFAULT_LINE_THICKNESS,
            color: SerializableColor::black(),
            gap: Self::DEFAULT_GAP,
        }
    }
}

/// Geometry of the half-circle bridging the gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    /// Arc radius.
    pub radius: f64,
    /// Stroke width.
    pub stroke_width: f64,
    /// Chord midpoint in widget coordinates.
    pub center: Point,
    /// View box in arc-local coordinates (origin at the chord midpoint).
    pub view_box: Rect,
    /// Where the image sits in the frame. Same size as `view_box`.
    ///
    /// The view box extends `radius + stroke_width / 2` left of the chord
    /// midpoint, so with the default constants the image starts at x = 42,
    /// not at the gap edge (44). That keeps the chord midpoint on (50, 50).
    pub placement: Rect,
}

impl ArcGeometry {
    /// Start point of the arc in arc-local coordinates.
    pub fn start(&self) -> Point {
        Point::new(-self.radius, 0.0)
    }

    /// End point of the arc in arc-local coordinates.
    pub fn end(&self) -> Point {
        Point::new(self.radius, 0.0)
    }

    /// The arc as a kurbo shape in arc-local coordinates, bulging toward -y.
    pub fn kurbo_arc(&self) -> Arc {
        Arc {
            center: Point::ORIGIN,
            radii: Vec2::new(self.radius, self.radius),
            start_angle: PI,
            sweep_angle: PI,
            x_rotation: 0.0,
        }
    }

    /// The arc centerline as a path in arc-local coordinates.
    pub fn to_path(&self) -> BezPath {
        self.kurbo_arc().to_path(0.1)
    }

    /// Bounds of the stroked arc in arc-local coordinates.
    pub fn stroke_bounds(&self) -> Rect {
        let half = self.stroke_width / 2.0;
        let b = self.to_path().bounding_box();
        Rect::new(b.x0 - half, b.y0 - half, b.x1 + half, b.y1 + half)
    }
}

/// Everything needed to draw either mode, derived from [`GeometryConstants`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionGeometry {
    pub frame: Size,
    pub vertical: Rect,
    /// Full-width horizontal bar (flat mode).
    pub horizontal: Rect,
    /// Left half of the broken horizontal bar (raised mode).
    pub left_segment: Rect,
    /// Right half of the broken horizontal bar (raised mode).
    pub right_segment: Rect,
    pub arc: ArcGeometry,
}

impl IntersectionGeometry {
    /// Derive the geometry. Recomputed on every render.
    pub fn compute(constants: &GeometryConstants) -> Self {
        let l = constants.line_length;
        let t = constants.line_thickness;
        let radius = constants.arc_radius();
        let margin = constants.stroke_margin();

        let vertical_x = (l - t) / 2.0;
        let horizontal_y = (l - t) / 2.0;
        let segment_width = l / 2.0 - constants.gap / 2.0;

        let center = Point::new(l / 2.0, horizontal_y + t / 2.0);
        let view_box = Rect::new(-radius - margin, -radius - margin, radius + margin, margin);
        let placement = Rect::from_origin_size(
            Point::new(center.x + view_box.x0, center.y + view_box.y0),
            view_box.size(),
        );

        Self {
            frame: constants.frame_size(),
            vertical: Rect::from_origin_size((vertical_x, 0.0), (t, l)),
            horizontal: Rect::from_origin_size((0.0, horizontal_y), (l, t)),
            left_segment: Rect::from_origin_size((0.0, horizontal_y), (segment_width, t)),
            right_segment: Rect::from_origin_size((l - segment_width, horizontal_y), (segment_width, t)),
            arc: ArcGeometry {
                radius,
                stroke_width: t,
                center,
                view_box,
                placement,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rect(rect: Rect, x: f64, y: f64, w: f64, h: f64) {
        assert!((rect.x0 - x).abs() < 1e-9, "x0 {} != {}", rect.x0, x);
        assert!((rect.y0 - y).abs() < 1e-9, "y0 {} != {}", rect.y0, y);
        assert!((rect.width() - w).abs() < 1e-9, "width {} != {}", rect.width(), w);
        assert!((rect.height() - h).abs() < 1e-9, "height {} != {}", rect.height(), h);
    }

    #[test]
    fn test_default_constants() {
        let c = GeometryConstants::default();
        assert!((c.line_length - 100.0).abs() < f64::EPSILON);
        assert!((c.line_thickness - 4.0).abs() < f64::EPSILON);
        assert!((c.gap - 12.0).abs() < f64::EPSILON);
        assert!((c.arc_radius() - 6.0).abs() < f64::EPSILON);
        assert_eq!(c.color, SerializableColor::black());
    }

    #[test]
    fn test_bars() {
        let g = IntersectionGeometry::compute(&GeometryConstants::default());
        assert_rect(g.vertical, 48.0, 0.0, 4.0, 100.0);
        assert_rect(g.horizontal, 0.0, 48.0, 100.0, 4.0);
        assert_rect(g.left_segment, 0.0, 48.0, 44.0, 4.0);
        assert_rect(g.right_segment, 56.0, 48.0, 44.0, 4.0);
    }

    #[test]
    fn test_gap_is_centered() {
        let g = IntersectionGeometry::compute(&GeometryConstants::default());
        let gap = g.right_segment.x0 - g.left_segment.x1;
        assert!((gap - 12.0).abs() < 1e-9);
        assert!((g.left_segment.x1 + gap / 2.0 - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_placement() {
        let g = IntersectionGeometry::compute(&GeometryConstants::default());
        assert_rect(g.arc.view_box, -8.0, -8.0, 16.0, 10.0);
        assert_rect(g.arc.placement, 42.0, 42.0, 16.0, 10.0);
        // Chord sits on the horizontal centerline, endpoints on the gap edges.
        assert!((g.arc.center.y - 50.0).abs() < 1e-9);
        assert!((g.arc.center.x + g.arc.start().x - g.left_segment.x1).abs() < 1e-9);
        assert!((g.arc.center.x + g.arc.end().x - g.right_segment.x0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_bulges_upward() {
        let g = IntersectionGeometry::compute(&GeometryConstants::default());
        let b = g.arc.to_path().bounding_box();
        assert!((b.y0 + 6.0).abs() < 1e-2);
        assert!(b.y1.abs() < 1e-2);
        assert!((b.width() - 12.0).abs() < 1e-2);
    }

    #[test]
    fn test_stroke_fits_view_box() {
        let g = IntersectionGeometry::compute(&GeometryConstants::default());
        let stroke = g.arc.stroke_bounds();
        let vb = g.arc.view_box.inflate(1e-2, 1e-2);
        assert!(vb.contains(Point::new(stroke.x0, stroke.y0)));
        assert!(vb.contains(Point::new(stroke.x1, stroke.y1)));
    }

    #[test]
    fn test_partial_json_overrides() {
        let c = GeometryConstants::from_json(r#"{"gap": 20.0}"#).unwrap();
        assert!(c.validate().is_ok());
        assert!((c.gap - 20.0).abs() < f64::EPSILON);
        assert!((c.line_length - 100.0).abs() < f64::EPSILON);
        assert!((c.arc_radius() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builders() {
        let c = GeometryConstants::default()
            .with_line_length(200.0)
            .with_line_thickness(8.0)
            .with_gap(24.0);
        let g = IntersectionGeometry::compute(&c);
        assert_rect(g.vertical, 96.0, 0.0, 8.0, 200.0);
        assert_rect(g.left_segment, 0.0, 96.0, 88.0, 8.0);
        assert_rect(g.arc.placement, 84.0, 84.0, 32.0, 20.0);
    }

    fn assert_invalid(json: &str) {
        match GeometryConstants::from_json(json) {
            Err(GeometryError::InvalidConstants(_)) => {}
            other => panic!("expected InvalidConstants for {}, got {:?}", json, other),
        }
    }

    #[test]
    fn test_rejects_gap_wider_than_line() {
        assert_invalid(r#"{"gap": 150.0}"#);
        assert_invalid(r#"{"gap": 100.0}"#);
    }

    #[test]
    fn test_rejects_non_positive_gap() {
        assert_invalid(r#"{"gap": 0.0}"#);
        assert_invalid(r#"{"gap": -12.0}"#);
    }

    #[test]
    fn test_rejects_non_positive_thickness() {
        assert_invalid(r#"{"line_thickness": 0.0}"#);
        assert_invalid(r#"{"line_thickness": -4.0}"#);
    }

    #[test]
    fn test_rejects_thickness_of_whole_line() {
        assert_invalid(r#"{"line_thickness": 100.0}"#);
    }

    #[test]
    fn test_rejects_negative_line_length() {
        assert_invalid(r#"{"line_length": -100.0}"#);
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let c = GeometryConstants::default().with_gap(f64::NAN);
        assert!(matches!(c.validate(), Err(GeometryError::InvalidConstants(_))));
        let c = GeometryConstants::default().with_line_length(f64::INFINITY);
        assert!(matches!(c.validate(), Err(GeometryError::InvalidConstants(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GeometryConstants::from_json("{"),
            Err(GeometryError::Json(_))
        ));
    }

    #[test]
    fn test_validated_builders() {
        let c = GeometryConstants::default()
            .with_line_length(200.0)
            .with_gap(24.0)
            .validate()
            .unwrap();
        assert!((c.line_length - 200.0).abs() < f64::EPSILON);
    }
}
