//! PostCanvas Core Library
//!
//! Platform-agnostic interaction core for the PostCanvas post editor: the
//! element model, pointer and keyboard manipulation, layer ordering and
//! undo/redo history. Rendering, persistence and asset loading live in the
//! host.

pub mod canvas;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod handles;
pub mod history;
pub mod input;
pub mod manipulation;
pub mod session;

pub use canvas::{Canvas, LayerMove, RenderState};
pub use config::EditorConfig;
pub use document::{Background, CanvasDocument, Snapshot};
pub use element::{
    Effects, Element, ElementId, ElementKind, FontWeight, ImageStyle, SerializableColor, Shadow,
    ShapeKind, ShapeStyle, TextAlign, TextStyle,
};
pub use error::{EditorError, EditorResult};
pub use handles::{Handle, HandleKind, ResizeHandle};
pub use history::History;
pub use input::{Key, Modifiers, PointerButton, PointerEvent};
pub use manipulation::Direction;
pub use session::{ElementUpdate, ScopedSession, SessionKind};
