//! Interaction sessions.
//!
//! A session spans one pointer-down to pointer-up gesture on one element. It
//! captures the element as it was when the gesture began, and every pointer
//! move recomputes the element from that capture. The canvas holds at most
//! one session at a time in [`InteractionState`]; [`ScopedSession`] ties a
//! session to a borrow so it is always closed when the guard goes away.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementKind};
use crate::handles::ResizeHandle;
use crate::input::Modifiers;
use crate::manipulation::{ResizeStart, apply_move, apply_resize, apply_rotation, pointer_angle};
use kurbo::{Point, Size};

/// What a session does to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Move,
    Resize(ResizeHandle),
    Rotate,
}

/// New geometry for an element, emitted on every pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementUpdate {
    pub id: ElementId,
    pub position: Point,
    pub size: Size,
    pub rotation_degrees: f64,
    /// Present for text elements only.
    pub font_size: Option<f64>,
}

impl ElementUpdate {
    /// Write this geometry into `element`.
    pub fn apply_to(&self, element: &mut Element) {
        element.position = self.position;
        element.size = self.size;
        element.rotation_degrees = self.rotation_degrees;
        if let (ElementKind::Text(text), Some(font_size)) = (&mut element.kind, self.font_size) {
            text.font_size = font_size;
        }
    }
}

/// State of a gesture in progress.
#[derive(Debug, Clone)]
pub struct ActiveSession {
    pub kind: SessionKind,
    /// Pointer position at pointer-down.
    pub start_pointer: Point,
    /// The element as it was at pointer-down.
    pub start: Element,
    /// Rotation pivot, captured at pointer-down.
    pub center: Point,
    /// Pointer angle around `center` at pointer-down, in degrees.
    pub start_angle: f64,
}

impl ActiveSession {
    pub fn new(kind: SessionKind, element: &Element, pointer: Point) -> Self {
        let center = element.center();
        Self {
            kind,
            start_pointer: pointer,
            start: element.clone(),
            center,
            start_angle: pointer_angle(center, pointer),
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.start.id()
    }

    /// Geometry for the element with the pointer at `pointer`.
    pub fn step(&self, pointer: Point, modifiers: Modifiers, config: &EditorConfig) -> ElementUpdate {
        let start = &self.start;
        let mut update = ElementUpdate {
            id: start.id(),
            position: start.position,
            size: start.size,
            rotation_degrees: start.rotation_degrees,
            font_size: start.kind.font_size(),
        };

        match self.kind {
            SessionKind::Move => {
                update.position = apply_move(start.position, self.start_pointer, pointer);
            }
            SessionKind::Resize(handle) => {
                let resize_start = ResizeStart {
                    position: start.position,
                    size: start.size,
                    font_size: start.kind.font_size(),
                };
                let result = apply_resize(
                    &resize_start,
                    handle,
                    pointer - self.start_pointer,
                    start.rotation_degrees,
                    config,
                );
                update.position = result.position;
                update.size = result.size;
                update.font_size = result.font_size;
            }
            SessionKind::Rotate => {
                let snap = modifiers.shift.then_some(config.rotation_snap_degrees);
                update.rotation_degrees = apply_rotation(
                    self.center,
                    self.start_angle,
                    start.rotation_degrees,
                    pointer,
                    snap,
                );
            }
        }
        update
    }
}

/// Whether a gesture is in progress.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(ActiveSession),
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, InteractionState::Dragging(_))
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging(session) => Some(session),
        }
    }
}

/// A session bound to a mutable borrow of the canvas.
///
/// Created by [`Canvas::scoped_session`]. Dropping the guard ends the session
/// exactly like [`ScopedSession::end`], so the session cannot outlive the
/// scope that opened it.
pub struct ScopedSession<'a> {
    canvas: &'a mut Canvas,
    ended: bool,
}

impl<'a> ScopedSession<'a> {
    pub(crate) fn new(canvas: &'a mut Canvas) -> Self {
        Self { canvas, ended: false }
    }

    /// Feed a pointer position; returns the element's new geometry.
    pub fn on_move(&mut self, pointer: Point) -> Option<ElementUpdate> {
        self.canvas.update_session(pointer, Modifiers::NONE)
    }

    /// Like [`ScopedSession::on_move`], with modifier keys.
    pub fn on_move_with(&mut self, pointer: Point, modifiers: Modifiers) -> Option<ElementUpdate> {
        self.canvas.update_session(pointer, modifiers)
    }

    /// End the session, committing one history entry if anything changed.
    pub fn end(mut self) -> bool {
        self.ended = true;
        self.canvas.end_session()
    }

    /// Abandon the session and restore the element.
    pub fn cancel(mut self) {
        self.ended = true;
        self.canvas.cancel_session();
    }

    /// Read access to the canvas while the session is open.
    pub fn canvas(&self) -> &Canvas {
        &*self.canvas
    }
}

impl Drop for ScopedSession<'_> {
    fn drop(&mut self) {
        if !self.ended {
            log::debug!("Scoped session dropped without end; committing");
            self.canvas.end_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ShapeStyle, TextStyle};

    fn element(kind: ElementKind) -> Element {
        Element::create(
            kind,
            Point::new(10.0, 10.0),
            Size::new(100.0, 100.0),
            &[],
            &EditorConfig::default(),
        )
    }

    #[test]
    fn test_step_move() {
        let el = element(ElementKind::Shape(ShapeStyle::default()));
        let session = ActiveSession::new(SessionKind::Move, &el, Point::new(50.0, 50.0));
        let update = session.step(Point::new(80.0, 70.0), Modifiers::NONE, &EditorConfig::default());
        assert_eq!(update.position, Point::new(40.0, 30.0));
        assert_eq!(update.size, el.size);
        assert!(update.font_size.is_none());
    }

    #[test]
    fn test_step_is_relative_to_start() {
        let el = element(ElementKind::Shape(ShapeStyle::default()));
        let session = ActiveSession::new(SessionKind::Move, &el, Point::new(0.0, 0.0));
        let config = EditorConfig::default();
        session.step(Point::new(500.0, 500.0), Modifiers::NONE, &config);
        let update = session.step(Point::new(1.0, 1.0), Modifiers::NONE, &config);
        assert_eq!(update.position, Point::new(11.0, 11.0));
    }

    #[test]
    fn test_step_resize_text_scales_font() {
        let el = element(ElementKind::Text(TextStyle::new("Sale", "Inter").with_font_size(20.0)));
        let session = ActiveSession::new(
            SessionKind::Resize(ResizeHandle::Se),
            &el,
            Point::new(110.0, 110.0),
        );
        let update = session.step(Point::new(210.0, 110.0), Modifiers::NONE, &EditorConfig::default());
        assert_eq!(update.font_size, Some(40.0));

        let mut resized = el.clone();
        update.apply_to(&mut resized);
        assert_eq!(resized.kind.font_size(), Some(40.0));
        assert!((resized.size.width - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_rotate_uses_start_center() {
        let el = element(ElementKind::Shape(ShapeStyle::default()));
        // Center is (60, 60); start straight above it.
        let session = ActiveSession::new(SessionKind::Rotate, &el, Point::new(60.0, 0.0));
        let update = session.step(Point::new(120.0, 60.0), Modifiers::NONE, &EditorConfig::default());
        assert!((update.rotation_degrees - 90.0).abs() < 1e-9);
        assert_eq!(update.position, el.position);
    }

    #[test]
    fn test_state_default_idle() {
        let state = InteractionState::default();
        assert!(!state.is_dragging());
        assert!(state.active().is_none());
    }
}
