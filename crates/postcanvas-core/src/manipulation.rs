//! Pure geometry for move, resize, rotate and nudge.
//!
//! Every function computes a result from the state captured when the gesture
//! started plus the current pointer, never from the previous frame, so a
//! session can replay any pointer position and always get the same answer.

use crate::config::EditorConfig;
use crate::element::normalize_degrees;
use crate::handles::ResizeHandle;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Geometry captured at the start of a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub position: Point,
    pub size: Size,
    /// Font size of a text element, `None` for other kinds.
    pub font_size: Option<f64>,
}

/// Geometry produced by a resize step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeResult {
    pub position: Point,
    pub size: Size,
    pub font_size: Option<f64>,
}

/// Arrow-key direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in canvas space (y down).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// New position for a drag: the start position plus the pointer delta.
///
/// Drag movement is not clamped to the canvas.
pub fn apply_move(start_position: Point, start_pointer: Point, pointer: Point) -> Point {
    start_position + (pointer - start_pointer)
}

/// Rotate a canvas-space vector into an element's unrotated frame.
pub fn to_local_delta(delta: Vec2, rotation_degrees: f64) -> Vec2 {
    let (sin, cos) = rotation_degrees.to_radians().sin_cos();
    Vec2::new(delta.x * cos + delta.y * sin, -delta.x * sin + delta.y * cos)
}

/// Resize from `start` by dragging `handle` by `delta` (canvas space).
///
/// The delta is first projected into the element's unrotated frame. The edges
/// touching the handle move and the opposite edges stay put. Each dimension
/// is floored at `min_element_size`; when the floor kicks in the position is
/// derived from the fixed edge, so the anchor never moves. Text scales its
/// font with the larger of the two axis ratios.
///
/// Rotation pivots on the center, and the center moves with the box, so for
/// a rotated element the position is shifted to keep the anchor at the same
/// canvas point. At 0 degrees the shift is zero.
pub fn apply_resize(
    start: &ResizeStart,
    handle: ResizeHandle,
    delta: Vec2,
    rotation_degrees: f64,
    config: &EditorConfig,
) -> ResizeResult {
    let local = to_local_delta(delta, rotation_degrees);
    let floor = config.min_element_size;

    let (x0, y0) = (start.position.x, start.position.y);
    let (w0, h0) = (start.size.width, start.size.height);
    let right = x0 + w0;
    let bottom = y0 + h0;

    let (x, width) = if handle.moves_left() {
        let width = (w0 - local.x).max(floor);
        (right - width, width)
    } else if handle.moves_right() {
        (x0, (w0 + local.x).max(floor))
    } else {
        (x0, w0)
    };

    let (y, height) = if handle.moves_top() {
        let height = (h0 - local.y).max(floor);
        (bottom - height, height)
    } else if handle.moves_bottom() {
        (y0, (h0 + local.y).max(floor))
    } else {
        (y0, h0)
    };

    let font_size = start.font_size.map(|font0| {
        let scale = (width / w0).max(height / h0);
        (font0 * scale).max(config.min_font_size)
    });

    let center_shift = Vec2::new(
        (x + width / 2.0) - (x0 + w0 / 2.0),
        (y + height / 2.0) - (y0 + h0 / 2.0),
    );
    let position =
        Point::new(x, y) + to_local_delta(center_shift, -rotation_degrees) - center_shift;

    ResizeResult {
        position,
        size: Size::new(width, height),
        font_size,
    }
}

/// Angle from `center` to `pointer` in degrees, clockwise from +x.
pub fn pointer_angle(center: Point, pointer: Point) -> f64 {
    (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees()
}

/// Rotation after dragging the rotate handle to `pointer`.
///
/// The element turns by exactly the angle the pointer swept around the
/// center. With `snap`, the result rounds to the nearest multiple of that
/// many degrees.
pub fn apply_rotation(
    center: Point,
    start_angle: f64,
    original_rotation: f64,
    pointer: Point,
    snap: Option<f64>,
) -> f64 {
    let angle_diff = pointer_angle(center, pointer) - start_angle;
    let mut rotation = original_rotation + angle_diff;
    if let Some(step) = snap.filter(|s| *s > 0.0) {
        rotation = (rotation / step).round() * step;
    }
    normalize_degrees(rotation)
}

/// Move by one keyboard step, keeping the box inside the canvas.
///
/// An element larger than the canvas pins to the top-left on that axis.
pub fn nudge(position: Point, size: Size, direction: Direction, step: f64, canvas: Size) -> Point {
    let moved = position + direction.unit() * step;
    let max_x = (canvas.width - size.width).max(0.0);
    let max_y = (canvas.height - size.height).max(0.0);
    Point::new(moved.x.min(max_x).max(0.0), moved.y.min(max_y).max(0.0))
}
