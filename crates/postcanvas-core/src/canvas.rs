//! Canvas: the editable document plus selection, sessions and history.
//!
//! [`Canvas`] is the interaction controller. Pointer gestures run as sessions
//! (see [`crate::session`]) and commit one history entry when they end;
//! discrete edits (add, delete, duplicate, reorder, nudge, style changes)
//! commit one entry each. Operations that make no sense for the current state
//! (locked element, already topmost, nothing to undo) are silent no-ops that
//! return `false` and leave history untouched.

use crate::config::EditorConfig;
use crate::document::{CanvasDocument, Snapshot};
use crate::element::{
    Effects, Element, ElementId, ElementKind, SerializableColor, ShapeStyle, TextStyle,
};
use crate::error::EditorResult;
use crate::handles::{Handle, HandleKind, get_handles, hit_test_handles};
use crate::history::History;
use crate::input::{Key, Modifiers, PointerButton, PointerEvent};
use crate::manipulation::{Direction, nudge};
use crate::session::{ActiveSession, ElementUpdate, InteractionState, ScopedSession, SessionKind};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Layer reordering actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerMove {
    ToFront,
    ToBack,
    Up,
    Down,
}

/// Everything the render layer needs to draw a frame.
#[derive(Debug, Clone)]
pub struct RenderState<'a> {
    /// Visible elements, back to front.
    pub elements: Vec<&'a Element>,
    pub selected: Option<ElementId>,
    /// Handles of the selected element.
    pub handles: Vec<Handle>,
    /// True while a handle or body drag is in progress.
    pub is_dragging: bool,
}

/// The editor canvas.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: CanvasDocument,
    config: EditorConfig,
    history: History<Snapshot>,
    selection: Option<ElementId>,
    interaction: InteractionState,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::with_document(CanvasDocument::default())
    }
}

impl Canvas {
    /// Create an empty canvas of the given size.
    pub fn new(size: Size) -> Self {
        Self::with_document(CanvasDocument::new(size))
    }

    /// Create a canvas editing an existing document, with default settings.
    pub fn with_document(document: CanvasDocument) -> Self {
        Self::build(document, EditorConfig::default())
    }

    /// Create a canvas with custom settings.
    pub fn with_config(document: CanvasDocument, config: EditorConfig) -> EditorResult<Self> {
        config.validate()?;
        Ok(Self::build(document, config))
    }

    fn build(mut document: CanvasDocument, config: EditorConfig) -> Self {
        normalize_all(&mut document, &config);
        let history = History::new(document.snapshot(), config.history_limit);
        Self {
            document,
            config,
            history,
            selection: None,
            interaction: InteractionState::Idle,
        }
    }

    /// Replace the document, dropping selection, any session and all history.
    pub fn load_document(&mut self, mut document: CanvasDocument) {
        normalize_all(&mut document, &self.config);
        self.history.clear(document.snapshot());
        self.document = document;
        self.selection = None;
        self.interaction = InteractionState::Idle;
        log::debug!("Loaded document {} ({} elements)", self.document.id, self.document.len());
    }

    // --- Queries ---

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.document.get_element(id)
    }

    /// The currently selected element, if any.
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Whether a session is in progress.
    pub fn is_dragging(&self) -> bool {
        self.interaction.is_dragging()
    }

    /// The session in progress, if any.
    pub fn active_session(&self) -> Option<&ActiveSession> {
        self.interaction.active()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of history entries, including the initial state.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Visible elements in draw order.
    pub fn render_list(&self) -> Vec<&Element> {
        self.document.render_list()
    }

    pub fn render_state(&self) -> RenderState<'_> {
        RenderState {
            elements: self.render_list(),
            selected: self.selection,
            handles: self.selection.map(|id| self.handles_for(id)).unwrap_or_default(),
            is_dragging: self.is_dragging(),
        }
    }

    /// Handles of an element; empty for unknown or hidden elements.
    pub fn handles_for(&self, id: ElementId) -> Vec<Handle> {
        self.document
            .get_element(id)
            .filter(|e| e.visible)
            .map(|e| get_handles(e, &self.config))
            .unwrap_or_default()
    }

    /// Topmost visible element under `point`.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.document.element_at(point, 0.0)
    }

    // --- Selection ---

    /// Select a visible element. Returns false if it does not exist or is hidden.
    pub fn select(&mut self, id: ElementId) -> bool {
        match self.document.get_element(id) {
            Some(element) if element.visible => {
                self.selection = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // --- History ---

    fn commit(&mut self, reason: &str) {
        self.history.commit(self.document.snapshot());
        log::debug!(
            "Committed {reason} (entry {} of {})",
            self.history.index() + 1,
            self.history.len()
        );
    }

    /// Step back one entry. No-op while a session is active.
    pub fn undo(&mut self) -> bool {
        if self.is_dragging() {
            log::debug!("Undo ignored during an active session");
            return false;
        }
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.document.restore(&snapshot);
        self.revalidate_selection();
        log::debug!("Undo to entry {}", self.history.index() + 1);
        true
    }

    /// Step forward one entry. No-op while a session is active.
    pub fn redo(&mut self) -> bool {
        if self.is_dragging() {
            log::debug!("Redo ignored during an active session");
            return false;
        }
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.document.restore(&snapshot);
        self.revalidate_selection();
        log::debug!("Redo to entry {}", self.history.index() + 1);
        true
    }

    fn revalidate_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.document.get_element(id).is_some_and(|e| e.visible) {
                self.selection = None;
            }
        }
    }

    // --- Sessions ---

    /// Start a move, resize or rotate session on `id`.
    ///
    /// Refused when another session is active or the element is missing,
    /// locked or hidden.
    pub fn begin_session(&mut self, id: ElementId, kind: SessionKind, pointer: Point) -> bool {
        if self.is_dragging() {
            log::debug!("Session already active; ignoring {kind:?}");
            return false;
        }
        let Some(element) = self.document.get_element(id) else {
            log::warn!("Cannot start session on unknown element {id}");
            return false;
        };
        if element.locked || !element.visible {
            return false;
        }
        log::debug!("Begin {kind:?} session on {id}");
        self.interaction = InteractionState::Dragging(ActiveSession::new(kind, element, pointer));
        true
    }

    /// Feed the current pointer into the active session.
    ///
    /// Returns the element's new geometry, or `None` when idle.
    pub fn update_session(&mut self, pointer: Point, modifiers: Modifiers) -> Option<ElementUpdate> {
        let InteractionState::Dragging(session) = &self.interaction else {
            return None;
        };
        let update = session.step(pointer, modifiers, &self.config);
        let element = self.document.get_element_mut(update.id)?;
        update.apply_to(element);
        log::trace!("Session update {update:?}");
        Some(update)
    }

    /// End the active session.
    ///
    /// Commits one history entry if the element changed, and returns whether
    /// it did.
    pub fn end_session(&mut self) -> bool {
        let InteractionState::Dragging(session) = std::mem::take(&mut self.interaction) else {
            return false;
        };
        let id = session.element_id();
        let changed = self
            .document
            .get_element(id)
            .is_some_and(|element| *element != session.start);
        log::debug!("End {:?} session on {id} (changed: {changed})", session.kind);
        if changed {
            self.commit("session");
        }
        changed
    }

    /// Abandon the active session and put the element back.
    pub fn cancel_session(&mut self) {
        let InteractionState::Dragging(session) = std::mem::take(&mut self.interaction) else {
            return;
        };
        log::debug!("Cancel {:?} session on {}", session.kind, session.element_id());
        if let Some(element) = self.document.get_element_mut(session.element_id()) {
            *element = session.start;
        }
    }

    /// Start a session bound to the returned guard.
    pub fn scoped_session(
        &mut self,
        id: ElementId,
        kind: SessionKind,
        pointer: Point,
    ) -> Option<ScopedSession<'_>> {
        if self.begin_session(id, kind, pointer) {
            Some(ScopedSession::new(self))
        } else {
            None
        }
    }

    // --- Pointer routing ---

    /// Pointer pressed: pick a handle or element and start the matching session.
    ///
    /// Handles of the selected element win over element bodies. Pressing empty
    /// canvas clears the selection. Returns whether a session started.
    pub fn pointer_down(&mut self, point: Point, button: PointerButton, _modifiers: Modifiers) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        if self.is_dragging() {
            log::warn!("Pointer down during a session; ending the stale session");
            self.end_session();
        }

        if let Some(selected) = self.selection {
            let handle = self
                .document
                .get_element(selected)
                .filter(|e| e.visible)
                .and_then(|e| hit_test_handles(e, point, &self.config));
            if let Some(handle) = handle {
                let kind = match handle {
                    HandleKind::Rotate => SessionKind::Rotate,
                    HandleKind::Resize(h) => SessionKind::Resize(h),
                };
                return self.begin_session(selected, kind, point);
            }
        }

        match self.element_at(point) {
            Some(id) => {
                self.selection = Some(id);
                self.begin_session(id, SessionKind::Move, point)
            }
            None => {
                self.selection = None;
                false
            }
        }
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, point: Point, modifiers: Modifiers) -> Option<ElementUpdate> {
        self.update_session(point, modifiers)
    }

    /// Pointer released: apply the final position and end the session.
    pub fn pointer_up(&mut self, point: Point, button: PointerButton, modifiers: Modifiers) -> bool {
        if button != PointerButton::Primary || !self.is_dragging() {
            return false;
        }
        self.update_session(point, modifiers);
        self.end_session()
    }

    /// Dispatch a pointer event. Returns whether the frame needs redrawing.
    pub fn handle_pointer(&mut self, event: PointerEvent, modifiers: Modifiers) -> bool {
        match event {
            PointerEvent::Down { position, button } => {
                let before = self.selection;
                let started = self.pointer_down(position, button, modifiers);
                started || before != self.selection
            }
            PointerEvent::Move { position } => self.pointer_move(position, modifiers).is_some(),
            PointerEvent::Up { position, button } => {
                let was_dragging = self.is_dragging();
                self.pointer_up(position, button, modifiers);
                was_dragging
            }
        }
    }

    // --- Keyboard ---

    /// Handle a key press. Returns whether anything changed.
    pub fn key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        match key {
            Key::Arrow(direction) => self.nudge_selected(*direction),
            Key::Delete => self.delete_selected(),
            Key::Escape => {
                if self.is_dragging() {
                    self.cancel_session();
                    true
                } else {
                    self.selection.take().is_some()
                }
            }
            k if modifiers.command() && k.is_char('z') => {
                if modifiers.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            k if modifiers.command() && k.is_char('y') => self.redo(),
            k if modifiers.command() && k.is_char('d') => self
                .selection
                .and_then(|id| self.duplicate_element(id))
                .is_some(),
            Key::Character(_) => false,
        }
    }

    /// Move the selected element one step. One history entry per press.
    pub fn nudge_selected(&mut self, direction: Direction) -> bool {
        let Some(id) = self.selection else {
            return false;
        };
        let (step, canvas) = (self.config.nudge_step, self.document.size);
        self.edit_element(id, "nudge", |element| {
            element.position = nudge(element.position, element.size, direction, step, canvas);
        })
    }

    // --- Discrete edits ---

    fn ensure_idle(&self, op: &str) -> bool {
        if self.is_dragging() {
            log::debug!("{op} ignored during an active session");
            return false;
        }
        true
    }

    /// Apply `edit` to an unlocked element and commit if it changed anything.
    fn edit_element(&mut self, id: ElementId, reason: &str, edit: impl FnOnce(&mut Element)) -> bool {
        if !self.ensure_idle(reason) {
            return false;
        }
        let config = &self.config;
        let Some(element) = self.document.get_element_mut(id) else {
            log::warn!("{reason}: unknown element {id}");
            return false;
        };
        if element.locked {
            return false;
        }
        let before = element.clone();
        edit(element);
        *element = element.clone().normalized(config);
        if *element == before {
            return false;
        }
        self.commit(reason);
        true
    }

    /// Add a new element above all others. Returns its id, or `None` while a
    /// session is active.
    pub fn add_element(&mut self, kind: ElementKind, position: Point, size: Size) -> Option<ElementId> {
        let element = Element::create(kind, position, size, &self.document.elements, &self.config);
        self.insert_element(element)
    }

    /// Insert a prepared element as-is (after normalization).
    pub fn insert_element(&mut self, element: Element) -> Option<ElementId> {
        if !self.ensure_idle("add") {
            return None;
        }
        let mut element = element.normalized(&self.config);
        if self.document.get_element(element.id()).is_some() {
            element.regenerate_id();
        }
        let id = element.id();
        self.document.add_element(element);
        self.commit("add");
        Some(id)
    }

    /// Remove an element. Clears the selection if it was selected.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        if !self.ensure_idle("delete") {
            return false;
        }
        match self.document.get_element(id) {
            None => {
                log::warn!("delete: unknown element {id}");
                return false;
            }
            Some(element) if element.locked => return false,
            Some(_) => {}
        }
        self.document.remove_element(id);
        if self.selection == Some(id) {
            self.selection = None;
        }
        self.commit("delete");
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        self.selection.is_some_and(|id| self.delete_element(id))
    }

    /// Copy an element with a fresh id, offset by `duplicate_offset`, on top of
    /// the stack. The copy becomes the selection.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        if !self.ensure_idle("duplicate") {
            return None;
        }
        let Some(original) = self.document.get_element(id) else {
            log::warn!("duplicate: unknown element {id}");
            return None;
        };
        let mut copy = original.clone();
        copy.regenerate_id();
        copy.translate(self.config.duplicate_offset);
        copy.z_index = self.document.max_z_index().map_or(0, |z| z + 1);

        let copy_id = copy.id();
        self.document.add_element(copy);
        if self.document.get_element(copy_id).is_some_and(|e| e.visible) {
            self.selection = Some(copy_id);
        }
        self.commit("duplicate");
        Some(copy_id)
    }

    /// Change an element's stacking position.
    pub fn reorder(&mut self, id: ElementId, action: LayerMove) -> bool {
        let Some(new_z) = self.reordered_z_index(id, action) else {
            return false;
        };
        self.edit_element(id, "reorder", |element| element.z_index = new_z)
    }

    /// Target z-index for a reorder, or `None` when already at the extreme.
    fn reordered_z_index(&self, id: ElementId, action: LayerMove) -> Option<i64> {
        let index = self.document.index_of(id)?;
        let elements = &self.document.elements;
        let z = elements[index].z_index;

        let others = || elements.iter().enumerate().filter(move |(i, _)| *i != index);
        // Drawn above: higher z, or equal z inserted later.
        let above = others()
            .filter(|(i, e)| e.z_index > z || (e.z_index == z && *i > index))
            .map(|(_, e)| e.z_index);
        let below = others()
            .filter(|(i, e)| e.z_index < z || (e.z_index == z && *i < index))
            .map(|(_, e)| e.z_index);

        match action {
            LayerMove::ToFront => {
                above.max()?;
                self.document.max_z_index().map(|max| max + 1)
            }
            LayerMove::ToBack => {
                below.min()?;
                self.document.min_z_index().map(|min| min - 1)
            }
            LayerMove::Up => above.min().map(|next| next + 1),
            LayerMove::Down => below.max().map(|next| next - 1),
        }
    }

    pub fn set_shape_style(&mut self, id: ElementId, style: ShapeStyle) -> bool {
        self.edit_element(id, "shape style", |element| {
            if let ElementKind::Shape(current) = &mut element.kind {
                *current = style;
            }
        })
    }

    pub fn set_text_style(&mut self, id: ElementId, style: TextStyle) -> bool {
        self.edit_element(id, "text style", |element| {
            if let ElementKind::Text(current) = &mut element.kind {
                *current = style;
            }
        })
    }

    pub fn set_text_content(&mut self, id: ElementId, content: impl Into<String>) -> bool {
        let content = content.into();
        self.edit_element(id, "text content", |element| {
            if let ElementKind::Text(text) = &mut element.kind {
                text.content = content;
            }
        })
    }

    pub fn set_image_source(&mut self, id: ElementId, source: impl Into<String>) -> bool {
        let source = source.into();
        self.edit_element(id, "image source", |element| {
            if let ElementKind::Image(image) = &mut element.kind {
                image.source = source;
            }
        })
    }

    pub fn set_effects(&mut self, id: ElementId, effects: Effects) -> bool {
        self.edit_element(id, "effects", |element| element.effects = effects)
    }

    pub fn set_background_color(&mut self, color: SerializableColor) -> bool {
        if !self.ensure_idle("background color") || self.document.background.color == color {
            return false;
        }
        self.document.background.color = color;
        self.commit("background color");
        true
    }

    pub fn set_background_image(&mut self, image: Option<String>) -> bool {
        if !self.ensure_idle("background image") || self.document.background.image == image {
            return false;
        }
        self.document.background.image = image;
        self.commit("background image");
        true
    }

    /// Lock or unlock an element. Always permitted.
    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        self.set_flag(id, "lock", |element| &mut element.locked, locked)
    }

    /// Show or hide an element. Hiding the selection clears it.
    pub fn set_visible(&mut self, id: ElementId, visible: bool) -> bool {
        let changed = self.set_flag(id, "visibility", |element| &mut element.visible, visible);
        if changed && !visible && self.selection == Some(id) {
            self.selection = None;
        }
        changed
    }

    fn set_flag(
        &mut self,
        id: ElementId,
        reason: &str,
        field: impl FnOnce(&mut Element) -> &mut bool,
        value: bool,
    ) -> bool {
        if !self.ensure_idle(reason) {
            return false;
        }
        let Some(element) = self.document.get_element_mut(id) else {
            log::warn!("{reason}: unknown element {id}");
            return false;
        };
        let flag = field(element);
        if *flag == value {
            return false;
        }
        *flag = value;
        self.commit(reason);
        true
    }

    /// Resize the canvas. Not recorded in history.
    pub fn set_canvas_size(&mut self, size: Size) -> bool {
        if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0) {
            log::warn!("Ignoring invalid canvas size {size:?}");
            return false;
        }
        self.document.size = size;
        true
    }
}

fn normalize_all(document: &mut CanvasDocument, config: &EditorConfig) {
    for element in &mut document.elements {
        *element = element.clone().normalized(config);
    }
}
