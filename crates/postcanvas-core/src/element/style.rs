//! Colors and per-kind style attributes.

use super::glyph::ShapeKind;
use crate::error::{EditorError, EditorResult};
use kurbo::{Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS color string: `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn from_hex(color: &str) -> EditorResult<Self> {
        let color = color.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }

        let invalid = || EditorError::InvalidColor(color.to_string());
        let hex = color.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style of a vector shape element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Which outline to draw.
    pub glyph: ShapeKind,
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    /// Stroke color.
    pub stroke: SerializableColor,
    /// Stroke width in canvas pixels.
    pub stroke_width: f64,
}

impl ShapeStyle {
    /// A filled shape with no visible stroke.
    pub fn filled(glyph: ShapeKind, fill: SerializableColor) -> Self {
        Self {
            glyph,
            fill: Some(fill),
            stroke: SerializableColor::transparent(),
            stroke_width: 0.0,
        }
    }

    /// Fill color as a peniko Color.
    pub fn fill_color(&self) -> Option<Color> {
        self.fill.map(Color::from)
    }

    /// Stroke color as a peniko Color.
    pub fn stroke_color(&self) -> Color {
        self.stroke.into()
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            glyph: ShapeKind::default(),
            fill: Some(SerializableColor::new(0xD9, 0x4B, 0x4B, 255)),
            stroke: SerializableColor::black(),
            stroke_width: 0.0,
        }
    }
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Bold,
}

/// Horizontal text alignment inside the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Style and content of a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// The text body.
    pub content: String,
    /// Resolved font family name. Loading the font is the host's job.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    #[serde(default)]
    pub font_weight: FontWeight,
    pub color: SerializableColor,
    #[serde(default)]
    pub align: TextAlign,
}

impl TextStyle {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;

    pub fn new(content: impl Into<String>, font_family: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_family: font_family.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: FontWeight::default(),
            color: SerializableColor::black(),
            align: TextAlign::default(),
        }
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }
}

/// Source of an image element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageStyle {
    /// Resolved image URI.
    pub source: String,
    /// Pixel size of the source image, when the asset layer knows it.
    #[serde(default)]
    pub natural_size: Option<Size>,
}

impl ImageStyle {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            natural_size: None,
        }
    }

    /// Largest size with the source aspect ratio that fits within `max`.
    /// Returns `max` unchanged when the natural size is unknown.
    pub fn fit_within(&self, max: Size) -> Size {
        let Some(natural) = self.natural_size else {
            return max;
        };
        if natural.width <= 0.0 || natural.height <= 0.0 {
            return max;
        }
        let aspect = natural.width / natural.height;
        if aspect > max.width / max.height {
            Size::new(max.width, max.width / aspect)
        } else {
            Size::new(max.height * aspect, max.height)
        }
    }
}

/// Drop shadow drawn under an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: SerializableColor,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Offset from the element.
    pub offset: Vec2,
}

/// Effects shared by every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effects {
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Gaussian blur radius applied to the element itself.
    #[serde(default)]
    pub blur: f64,
    #[serde(default)]
    pub shadow: Option<Shadow>,
}

fn default_opacity() -> f64 {
    1.0
}

impl Effects {
    /// Clamp opacity into `[0, 1]` and blur values to non-negative.
    pub fn clamped(mut self) -> Self {
        self.opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.blur = self.blur.max(0.0);
        if let Some(shadow) = self.shadow.as_mut() {
            shadow.blur = shadow.blur.max(0.0);
        }
        self
    }
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blur: 0.0,
            shadow: None,
        }
    }
}
