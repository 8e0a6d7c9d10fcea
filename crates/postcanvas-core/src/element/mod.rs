//! Element definitions for the post canvas.
//!
//! An [`Element`] is one placed object: a vector shape, a block of text or an
//! image. Elements are pure data. The interaction code in
//! [`crate::manipulation`] and [`crate::canvas`] produces new element states,
//! and [`Element::normalized`] is the single place invariants are enforced.

mod glyph;
mod style;

pub use glyph::ShapeKind;
pub use style::{
    Effects, FontWeight, ImageStyle, SerializableColor, Shadow, ShapeStyle, TextAlign, TextStyle,
};

use crate::config::EditorConfig;
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Kind of element, carrying the kind-specific style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Shape(ShapeStyle),
    Text(TextStyle),
    Image(ImageStyle),
}

impl ElementKind {
    /// Short lowercase name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Shape(_) => "shape",
            ElementKind::Text(_) => "text",
            ElementKind::Image(_) => "image",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ElementKind::Text(_))
    }

    /// Font size, for text elements.
    pub fn font_size(&self) -> Option<f64> {
        match self {
            ElementKind::Text(text) => Some(text.font_size),
            _ => None,
        }
    }
}

/// One placed object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub kind: ElementKind,
    /// Top-left of the unrotated bounding box.
    pub position: Point,
    pub size: Size,
    /// Clockwise rotation around the center, in `[0, 360)`.
    #[serde(default)]
    pub rotation_degrees: f64,
    /// Stacking order; ties draw in insertion order.
    pub z_index: i64,
    #[serde(default)]
    pub effects: Effects,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Normalize an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = (degrees % 360.0 + 360.0) % 360.0;
    // -1e-14 wraps to exactly 360.0 after rounding.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

impl Element {
    /// Create a new element above every element in `existing`.
    ///
    /// The result is already normalized against `config`.
    pub fn create(
        kind: ElementKind,
        position: Point,
        size: Size,
        existing: &[Element],
        config: &EditorConfig,
    ) -> Self {
        let z_index = existing
            .iter()
            .map(|e| e.z_index)
            .max()
            .map_or(0, |z| z + 1);
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size,
            rotation_degrees: 0.0,
            z_index,
            effects: Effects::default(),
            locked: false,
            visible: true,
        }
        .normalized(config)
    }

    /// Override the z-index chosen by [`Element::create`].
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation_degrees = normalize_degrees(degrees);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Replace the id with a fresh one (used when duplicating).
    pub(crate) fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Clamp size and font size to their floors and wrap rotation.
    ///
    /// Pure and idempotent.
    pub fn normalized(mut self, config: &EditorConfig) -> Self {
        self.size = Size::new(
            floor_dimension(self.size.width, config.min_element_size),
            floor_dimension(self.size.height, config.min_element_size),
        );
        self.rotation_degrees = normalize_degrees(self.rotation_degrees);
        if let ElementKind::Text(text) = &mut self.kind {
            text.font_size = floor_dimension(text.font_size, config.min_font_size);
        }
        self.effects = self.effects.clamped();
        self
    }

    /// Unrotated bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Rotation pivot.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Transform from the element's unrotated frame to canvas space.
    pub fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation_degrees.to_radians(), self.center())
    }

    /// Map a canvas point into the element's unrotated frame.
    pub fn transform_to_local(&self, point: Point) -> Point {
        self.rotation_transform().inverse() * point
    }

    /// Corners in canvas space: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        let b = self.bounds();
        let t = self.rotation_transform();
        [
            t * Point::new(b.x0, b.y0),
            t * Point::new(b.x1, b.y0),
            t * Point::new(b.x1, b.y1),
            t * Point::new(b.x0, b.y1),
        ]
    }

    /// Axis-aligned box enclosing the rotated element.
    pub fn visual_bounds(&self) -> Rect {
        let [a, b, c, d] = self.corners();
        Rect::from_points(a, b).union_pt(c).union_pt(d)
    }

    /// Whether `point` lies inside the rotated box, inflated by `tolerance`.
    pub fn contains_point(&self, point: Point, tolerance: f64) -> bool {
        self.bounds()
            .inflate(tolerance, tolerance)
            .contains(self.transform_to_local(point))
    }

    /// Outline in canvas space, rotation applied.
    pub fn outline(&self) -> BezPath {
        let local = match &self.kind {
            ElementKind::Shape(style) => style.glyph.outline(self.size),
            ElementKind::Text(_) | ElementKind::Image(_) => {
                Rect::from_origin_size(Point::ZERO, self.size).to_path(0.1)
            }
        };
        let place = self.rotation_transform() * Affine::translate(self.position.to_vec2());
        place * local
    }

    /// Translate by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

fn floor_dimension(value: f64, floor: f64) -> f64 {
    if value.is_finite() { value.max(floor) } else { floor }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    fn square(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::create(
            ElementKind::Shape(ShapeStyle::default()),
            Point::new(x, y),
            Size::new(w, h),
            &[],
            &config(),
        )
    }

    #[test]
    fn test_create_defaults() {
        let el = square(10.0, 20.0, 100.0, 50.0);
        assert!(el.rotation_degrees.abs() < f64::EPSILON);
        assert_eq!(el.z_index, 0);
        assert!(!el.locked);
        assert!(el.visible);
        assert_eq!(el.kind.name(), "shape");
    }

    #[test]
    fn test_create_stacks_above_existing() {
        let a = square(0.0, 0.0, 50.0, 50.0).with_z_index(4);
        let b = square(0.0, 0.0, 50.0, 50.0).with_z_index(-2);
        let c = Element::create(
            ElementKind::Image(ImageStyle::new("https://example.com/x.png")),
            Point::ZERO,
            Size::new(50.0, 50.0),
            &[a.clone(), b],
            &config(),
        );
        assert_eq!(c.z_index, 5);
        assert_ne!(c.id(), a.id());
    }

    #[test]
    fn test_normalize_floors_size() {
        let el = square(0.0, 0.0, 5.0, -3.0);
        assert!((el.size.width - 20.0).abs() < f64::EPSILON);
        assert!((el.size.height - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut el = square(0.0, 0.0, 1.0, 300.0);
        el.rotation_degrees = -370.0;
        let once = el.normalized(&config());
        let twice = once.clone().normalized(&config());
        assert_eq!(once, twice);
        assert!((once.rotation_degrees - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_text_font_floor() {
        let el = Element::create(
            ElementKind::Text(TextStyle::new("Hi", "Inter").with_font_size(2.0)),
            Point::ZERO,
            Size::new(100.0, 40.0),
            &[],
            &config(),
        );
        assert_eq!(el.kind.font_size(), Some(8.0));
    }

    #[test]
    fn test_normalize_degrees() {
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-9);
        // 10 degrees turned back by 370 lands exactly on zero.
        assert!(normalize_degrees(10.0 - 370.0).abs() < 1e-9);
        let el = Element::create(
            ElementKind::Shape(ShapeStyle::default()),
            Point::ZERO,
            Size::new(50.0, 50.0),
            &[],
            &config(),
        )
        .with_rotation(10.0 - 370.0);
        assert!(el.rotation_degrees.abs() < 1e-9);
        assert!(normalize_degrees(-360.0).abs() < 1e-9);
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-9);
        assert!(normalize_degrees(720.0).abs() < 1e-9);
        assert!(normalize_degrees(-1e-14) < 360.0);
        assert!(normalize_degrees(f64::NAN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_contains_point_respects_rotation() {
        // 200x20 bar centered at (100, 10); rotated 90 degrees it becomes vertical.
        let mut el = square(0.0, 0.0, 200.0, 20.0);
        assert!(el.contains_point(Point::new(190.0, 10.0), 0.0));
        el.rotation_degrees = 90.0;
        assert!(!el.contains_point(Point::new(190.0, 10.0), 0.0));
        assert!(el.contains_point(Point::new(100.0, 90.0), 0.0));
    }

    #[test]
    fn test_corners_rotate_about_center() {
        let el = square(0.0, 0.0, 100.0, 100.0).with_rotation(90.0);
        let [tl, ..] = el.corners();
        // Clockwise 90 degrees (y down) sends the top-left corner to the top-right.
        assert!((tl.x - 100.0).abs() < 1e-9);
        assert!(tl.y.abs() < 1e-9);
    }

    #[test]
    fn test_outline_is_placed() {
        let el = square(50.0, 60.0, 100.0, 40.0);
        let bounds = el.outline().bounding_box();
        assert!((bounds.x0 - 50.0).abs() < 1e-6);
        assert!((bounds.y1 - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_shape() {
        let el = square(1.0, 2.0, 30.0, 40.0);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["kind"]["type"], "shape");
        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }
}
