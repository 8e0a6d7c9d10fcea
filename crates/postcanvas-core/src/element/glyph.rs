//! Closed set of shape outlines.
//!
//! Polygonal glyphs are stored as vertex tables in unit space (`0..1` on both
//! axes) and scaled to the element's size on demand.

use kurbo::{BezPath, Ellipse, Point, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};

/// The outline a shape element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Square,
    Circle,
    Triangle,
    Star,
    Diamond,
    Pentagon,
    Hexagon,
    Heart,
}

const TRIANGLE: &[(f64, f64)] = &[(0.5, 0.0), (1.0, 1.0), (0.0, 1.0)];

const DIAMOND: &[(f64, f64)] = &[(0.5, 0.0), (1.0, 0.5), (0.5, 1.0), (0.0, 0.5)];

const PENTAGON: &[(f64, f64)] = &[
    (0.5, 0.0),
    (1.0, 0.382),
    (0.809, 1.0),
    (0.191, 1.0),
    (0.0, 0.382),
];

const HEXAGON: &[(f64, f64)] = &[
    (0.25, 0.0),
    (0.75, 0.0),
    (1.0, 0.5),
    (0.75, 1.0),
    (0.25, 1.0),
    (0.0, 0.5),
];

// Five-point star, outer radius 0.5, inner radius 0.19, first tip up.
const STAR: &[(f64, f64)] = &[
    (0.5, 0.0),
    (0.612, 0.346),
    (0.976, 0.345),
    (0.682, 0.559),
    (0.794, 0.905),
    (0.5, 0.691),
    (0.206, 0.905),
    (0.318, 0.559),
    (0.024, 0.345),
    (0.388, 0.346),
];

impl ShapeKind {
    /// All glyphs, in palette order.
    pub fn all() -> &'static [ShapeKind] {
        &[
            ShapeKind::Square,
            ShapeKind::Circle,
            ShapeKind::Triangle,
            ShapeKind::Star,
            ShapeKind::Diamond,
            ShapeKind::Pentagon,
            ShapeKind::Hexagon,
            ShapeKind::Heart,
        ]
    }

    /// Display name for pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Star => "Star",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::Pentagon => "Pentagon",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Heart => "Heart",
        }
    }

    /// Unit-space vertices for polygonal glyphs, `None` for curved ones.
    pub fn vertices(&self) -> Option<&'static [(f64, f64)]> {
        match self {
            ShapeKind::Triangle => Some(TRIANGLE),
            ShapeKind::Star => Some(STAR),
            ShapeKind::Diamond => Some(DIAMOND),
            ShapeKind::Pentagon => Some(PENTAGON),
            ShapeKind::Hexagon => Some(HEXAGON),
            ShapeKind::Square | ShapeKind::Circle | ShapeKind::Heart => None,
        }
    }

    /// Outline fitted to a box of `size` with its top-left at the origin.
    pub fn outline(&self, size: Size) -> BezPath {
        let (w, h) = (size.width, size.height);
        match self {
            ShapeKind::Square => Rect::new(0.0, 0.0, w, h).to_path(0.1),
            ShapeKind::Circle => {
                Ellipse::from_rect(Rect::new(0.0, 0.0, w, h)).to_path(0.1)
            }
            ShapeKind::Heart => heart(w, h),
            _ => {
                let mut path = BezPath::new();
                for (i, &(x, y)) in self.vertices().unwrap_or_default().iter().enumerate() {
                    let pt = Point::new(x * w, y * h);
                    if i == 0 {
                        path.move_to(pt);
                    } else {
                        path.line_to(pt);
                    }
                }
                path.close_path();
                path
            }
        }
    }
}

fn heart(w: f64, h: f64) -> BezPath {
    let p = |x: f64, y: f64| Point::new(x * w, y * h);
    let mut path = BezPath::new();
    path.move_to(p(0.5, 0.3));
    path.curve_to(p(0.5, 0.0), p(0.0, 0.0), p(0.0, 0.3));
    path.curve_to(p(0.0, 0.6), p(0.5, 0.8), p(0.5, 1.0));
    path.curve_to(p(0.5, 0.8), p(1.0, 0.6), p(1.0, 0.3));
    path.curve_to(p(1.0, 0.0), p(0.5, 0.0), p(0.5, 0.3));
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlines_fit_size() {
        let size = Size::new(200.0, 100.0);
        for kind in ShapeKind::all() {
            let bounds = kind.outline(size).bounding_box();
            assert!(bounds.x0 >= -0.5 && bounds.y0 >= -0.5, "{kind:?}");
            assert!(bounds.x1 <= 200.5 && bounds.y1 <= 100.5, "{kind:?}");
            assert!(bounds.width() > 100.0, "{kind:?}");
        }
    }

    #[test]
    fn test_polygon_tables() {
        assert_eq!(ShapeKind::Triangle.vertices().map(<[_]>::len), Some(3));
        assert_eq!(ShapeKind::Star.vertices().map(<[_]>::len), Some(10));
        assert_eq!(ShapeKind::Hexagon.vertices().map(<[_]>::len), Some(6));
        assert!(ShapeKind::Circle.vertices().is_none());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ShapeKind::Star).unwrap();
        assert_eq!(json, "\"Star\"");
    }
}
