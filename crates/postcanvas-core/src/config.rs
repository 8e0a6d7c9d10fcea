//! Editor configuration.

use crate::error::{EditorError, EditorResult};
use crate::history::DEFAULT_HISTORY_LIMIT;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable constants for the interaction core.
///
/// Every field has a default, so a host can deserialize a partial JSON object
/// and override only what it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width or height an element may have, in canvas pixels.
    pub min_element_size: f64,
    /// Smallest font size text resizing may produce.
    pub min_font_size: f64,
    /// Distance moved by one arrow-key press.
    pub nudge_step: f64,
    /// Offset applied to a duplicated element.
    pub duplicate_offset: Vec2,
    /// Hit radius around a handle, in canvas pixels.
    pub handle_tolerance: f64,
    /// Distance from the top edge to the rotate handle.
    pub rotate_handle_offset: f64,
    /// Increment used when rotation snapping is requested (shift held).
    pub rotation_snap_degrees: f64,
    /// Maximum number of history entries kept, including the initial one.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_element_size: 20.0,
            min_font_size: 8.0,
            nudge_step: 10.0,
            duplicate_offset: Vec2::new(20.0, 20.0),
            handle_tolerance: 8.0,
            rotate_handle_offset: 25.0,
            rotation_snap_degrees: 15.0,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every size is positive and finite.
    pub fn validate(&self) -> EditorResult<()> {
        let positive = [
            ("min_element_size", self.min_element_size),
            ("min_font_size", self.min_font_size),
            ("nudge_step", self.nudge_step),
            ("handle_tolerance", self.handle_tolerance),
            ("rotation_snap_degrees", self.rotation_snap_degrees),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EditorError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.rotate_handle_offset.is_finite() || self.rotate_handle_offset < 0.0 {
            return Err(EditorError::InvalidConfig(format!(
                "rotate_handle_offset must be non-negative, got {}",
                self.rotate_handle_offset
            )));
        }
        if !self.duplicate_offset.is_finite() {
            return Err(EditorError::InvalidConfig(
                "duplicate_offset must be finite".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(EditorError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
