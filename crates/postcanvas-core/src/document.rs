//! Canvas document: the element list plus canvas-wide settings.
//!
//! The document is the unit handed to the persistence layer. It serializes to
//! plain JSON and carries no interaction or history state.

use crate::element::{Element, ElementId, SerializableColor};
use crate::error::EditorResult;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canvas background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: SerializableColor,
    /// Resolved URI of a background image drawn over the color.
    #[serde(default)]
    pub image: Option<String>,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            color: SerializableColor::white(),
            image: None,
        }
    }
}

/// Whole-state snapshot of everything undoable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub elements: Vec<Element>,
    pub background: Background,
}

/// A post canvas: its dimensions, background and elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    pub id: String,
    pub name: String,
    /// Canvas size in pixels.
    pub size: Size,
    #[serde(default)]
    pub background: Background,
    /// Elements in insertion order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(Size::new(1080.0, 1080.0))
    }
}

impl CanvasDocument {
    /// Create an empty document of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            size,
            background: Background::default(),
            elements: Vec::new(),
        }
    }

    /// Append an element. Insertion order breaks z-index ties.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove an element, preserving the order of the rest.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Position of an element in insertion order.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Elements in draw order (back to front), including hidden ones.
    pub fn elements_ordered(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        // Stable: equal z-index keeps insertion order.
        ordered.sort_by_key(|e| e.z_index);
        ordered
    }

    /// Visible elements in draw order.
    pub fn render_list(&self) -> Vec<&Element> {
        let mut ordered = self.elements_ordered();
        ordered.retain(|e| e.visible);
        ordered
    }

    /// Topmost visible element under `point`.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.render_list()
            .into_iter()
            .rev()
            .find(|e| e.contains_point(point, tolerance))
            .map(Element::id)
    }

    pub fn max_z_index(&self) -> Option<i64> {
        self.elements.iter().map(|e| e.z_index).max()
    }

    pub fn min_z_index(&self) -> Option<i64> {
        self.elements.iter().map(|e| e.z_index).min()
    }

    /// Canvas rectangle with its origin at (0, 0).
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Capture the undoable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            background: self.background.clone(),
        }
    }

    /// Replace the undoable state with `snapshot`.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        self.elements = snapshot.elements.clone();
        self.background = snapshot.background.clone();
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
