//! Selection handles: placement around a rotated element and hit-testing.

use crate::config::EditorConfig;
use crate::element::Element;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One of the eight resize handles, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeHandle {
    /// All handles, corners first so they win over edges on tiny elements.
    pub fn all() -> &'static [ResizeHandle] {
        &[
            ResizeHandle::Nw,
            ResizeHandle::Ne,
            ResizeHandle::Se,
            ResizeHandle::Sw,
            ResizeHandle::N,
            ResizeHandle::E,
            ResizeHandle::S,
            ResizeHandle::W,
        ]
    }

    /// Dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::Nw | ResizeHandle::Sw)
    }

    /// Dragging this handle moves the right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::Ne | ResizeHandle::Se)
    }

    /// Dragging this handle moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::Nw | ResizeHandle::Ne)
    }

    /// Dragging this handle moves the bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::Sw | ResizeHandle::Se)
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            ResizeHandle::Ne | ResizeHandle::Nw | ResizeHandle::Se | ResizeHandle::Sw
        )
    }

    /// Location on the unrotated box, as fractions of width and height.
    fn anchor_fraction(self) -> (f64, f64) {
        match self {
            ResizeHandle::Nw => (0.0, 0.0),
            ResizeHandle::N => (0.5, 0.0),
            ResizeHandle::Ne => (1.0, 0.0),
            ResizeHandle::E => (1.0, 0.5),
            ResizeHandle::Se => (1.0, 1.0),
            ResizeHandle::S => (0.5, 1.0),
            ResizeHandle::Sw => (0.0, 1.0),
            ResizeHandle::W => (0.0, 0.5),
        }
    }

    /// CSS cursor name for an unrotated element.
    pub fn cursor(self) -> &'static str {
        match self {
            ResizeHandle::N | ResizeHandle::S => "ns-resize",
            ResizeHandle::E | ResizeHandle::W => "ew-resize",
            ResizeHandle::Ne | ResizeHandle::Sw => "nesw-resize",
            ResizeHandle::Nw | ResizeHandle::Se => "nwse-resize",
        }
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Resize(ResizeHandle),
    /// Free-angle rotation handle above the top edge.
    Rotate,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in canvas coordinates, rotation applied.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point hits this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Handles for an element: the rotate handle, then the eight resize handles.
pub fn get_handles(element: &Element, config: &EditorConfig) -> Vec<Handle> {
    let bounds = element.bounds();
    let transform = element.rotation_transform();
    let mut handles = Vec::with_capacity(9);

    let rotate_local = Point::new(bounds.center().x, bounds.y0 - config.rotate_handle_offset);
    handles.push(Handle::new(transform * rotate_local, HandleKind::Rotate));

    for &handle in ResizeHandle::all() {
        let (fx, fy) = handle.anchor_fraction();
        let local = Point::new(
            bounds.x0 + fx * bounds.width(),
            bounds.y0 + fy * bounds.height(),
        );
        handles.push(Handle::new(transform * local, HandleKind::Resize(handle)));
    }
    handles
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(element: &Element, point: Point, config: &EditorConfig) -> Option<HandleKind> {
    get_handles(element, config)
        .into_iter()
        .find(|h| h.hit_test(point, config.handle_tolerance))
        .map(|h| h.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, ShapeStyle};
    use kurbo::Size;

    fn element(rotation: f64) -> Element {
        Element::create(
            ElementKind::Shape(ShapeStyle::default()),
            Point::new(100.0, 100.0),
            Size::new(100.0, 50.0),
            &[],
            &EditorConfig::default(),
        )
        .with_rotation(rotation)
    }

    fn position_of(handles: &[Handle], kind: HandleKind) -> Point {
        handles.iter().find(|h| h.kind == kind).map(|h| h.position).unwrap()
    }

    #[test]
    fn test_nine_handles() {
        let handles = get_handles(&element(0.0), &EditorConfig::default());
        assert_eq!(handles.len(), 9);
        assert_eq!(handles[0].kind, HandleKind::Rotate);
    }

    #[test]
    fn test_handle_positions_unrotated() {
        let handles = get_handles(&element(0.0), &EditorConfig::default());
        let se = position_of(&handles, HandleKind::Resize(ResizeHandle::Se));
        assert!((se.x - 200.0).abs() < 1e-9 && (se.y - 150.0).abs() < 1e-9);
        let w = position_of(&handles, HandleKind::Resize(ResizeHandle::W));
        assert!((w.x - 100.0).abs() < 1e-9 && (w.y - 125.0).abs() < 1e-9);
        let rotate = position_of(&handles, HandleKind::Rotate);
        assert!((rotate.x - 150.0).abs() < 1e-9 && (rotate.y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_handle_follows_rotation() {
        // Center (150, 125); rotated 90 degrees clockwise the handle sits to the right.
        let handles = get_handles(&element(90.0), &EditorConfig::default());
        let rotate = position_of(&handles, HandleKind::Rotate);
        assert!((rotate.x - 200.0).abs() < 1e-9);
        assert!((rotate.y - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_handles() {
        let el = element(0.0);
        let config = EditorConfig::default();
        assert_eq!(
            hit_test_handles(&el, Point::new(203.0, 148.0), &config),
            Some(HandleKind::Resize(ResizeHandle::Se))
        );
        assert_eq!(
            hit_test_handles(&el, Point::new(150.0, 76.0), &config),
            Some(HandleKind::Rotate)
        );
        assert_eq!(hit_test_handles(&el, Point::new(150.0, 125.0), &config), None);
    }

    #[test]
    fn test_handle_edges() {
        assert!(ResizeHandle::Nw.moves_left() && ResizeHandle::Nw.moves_top());
        assert!(!ResizeHandle::N.moves_left() && !ResizeHandle::N.moves_right());
        assert!(ResizeHandle::Se.is_corner());
        assert!(!ResizeHandle::E.is_corner());
        assert_eq!(ResizeHandle::Ne.cursor(), "nesw-resize");
    }
}
