//! Badge configuration types.
//!
//! A [`BadgeConfig`] is an immutable value describing one badge. It can be
//! built in code with the `with_*` methods or loaded from JSON, where absent
//! fields fall back to their defaults.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "imageSrc": "/images/me.webp",
//!   "imageAlt": "Jane Doe",
//!   "size": 168,
//!   "gradientColor": { "r": 30, "g": 30, "b": 30 },
//!   "position": { "top": -10 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_BADGE_TEXT: &str = "#opentowork";
pub const DEFAULT_SIZE: f64 = 200.0;
pub const DEFAULT_BORDER_COLOR: &str = "#d4ad00";
pub const DEFAULT_BORDER_WIDTH: f64 = 4.0;
pub const DEFAULT_GRADIENT_COLOR: RgbColor = RgbColor::new(0, 102, 53);
pub const DEFAULT_GRADIENT_ANGLE: f64 = 200.0;
pub const DEFAULT_GRADIENT_OPACITY: f64 = 1.0;

// ============================================================================
// RgbColor
// ============================================================================

/// An opaque 8-bit sRGB color, used for the gradient overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `#rgb` or the same without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        Srgb::<u8>::from_str(hex.trim()).ok().map(Self::from)
    }

    /// Formats the color as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Srgb<u8>> for RgbColor {
    fn from(color: Srgb<u8>) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl From<RgbColor> for Srgb<u8> {
    fn from(color: RgbColor) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

// ============================================================================
// Length / Position
// ============================================================================

/// A CSS length for one edge of the container.
///
/// Bare numbers are pixels, strings are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum Length {
    Px(f64),
    Raw(String),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(px) => write!(f, "{px}px"),
            Self::Raw(raw) => f.write_str(raw),
        }
    }
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<i32> for Length {
    fn from(px: i32) -> Self {
        Self::Px(f64::from(px))
    }
}

impl From<&str> for Length {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

/// Absolute placement of the badge container.
///
/// Only the edges that are set end up in the composed style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Position {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Length>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Length>,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(mut self, value: impl Into<Length>) -> Self {
        self.left = Some(value.into());
        self
    }

    pub fn top(mut self, value: impl Into<Length>) -> Self {
        self.top = Some(value.into());
        self
    }

    pub fn right(mut self, value: impl Into<Length>) -> Self {
        self.right = Some(value.into());
        self
    }

    pub fn bottom(mut self, value: impl Into<Length>) -> Self {
        self.bottom = Some(value.into());
        self
    }

    /// Returns true if no edge is set.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.right.is_none() && self.bottom.is_none()
    }

    /// The set edges in `left, top, right, bottom` order.
    pub fn edges(&self) -> impl Iterator<Item = (&'static str, &Length)> {
        [
            ("left", self.left.as_ref()),
            ("top", self.top.as_ref()),
            ("right", self.right.as_ref()),
            ("bottom", self.bottom.as_ref()),
        ]
        .into_iter()
        .filter_map(|(edge, value)| value.map(|v| (edge, v)))
    }
}

// ============================================================================
// TextStyle
// ============================================================================

/// Optional overrides for the curved text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct TextStyle {
    /// Fill color. Defaults to white.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Font size with unit. Defaults to a size proportional to the badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

impl TextStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// BadgeConfig
// ============================================================================

fn default_badge_text() -> String {
    DEFAULT_BADGE_TEXT.to_string()
}

fn default_size() -> f64 {
    DEFAULT_SIZE
}

fn default_border_color() -> String {
    DEFAULT_BORDER_COLOR.to_string()
}

fn default_border_width() -> f64 {
    DEFAULT_BORDER_WIDTH
}

fn default_gradient_color() -> RgbColor {
    DEFAULT_GRADIENT_COLOR
}

fn default_gradient_angle() -> f64 {
    DEFAULT_GRADIENT_ANGLE
}

fn default_gradient_opacity() -> f64 {
    DEFAULT_GRADIENT_OPACITY
}

/// Complete configuration of a single badge.
///
/// `image_src` and `image_alt` are required; every other field has a default.
/// `size` is expected to be positive and `gradient_opacity` to lie in
/// `0.0..=1.0`, but neither is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BadgeConfig {
    /// Photo URL.
    pub image_src: String,

    /// Alternative text for the photo.
    pub image_alt: String,

    #[serde(default = "default_badge_text")]
    pub badge_text: String,

    /// Diameter of the badge in pixels.
    #[serde(default = "default_size")]
    pub size: f64,

    /// Any CSS color, including `var(--name)`.
    #[serde(default = "default_border_color")]
    pub border_color: String,

    #[serde(default = "default_border_width")]
    pub border_width: f64,

    #[serde(default = "default_gradient_color")]
    pub gradient_color: RgbColor,

    /// CSS gradient angle in degrees.
    #[serde(default = "default_gradient_angle")]
    pub gradient_angle: f64,

    /// Peak opacity of the gradient overlay.
    #[serde(default = "default_gradient_opacity")]
    pub gradient_opacity: f64,

    /// Start of the text along the curve, in percent. Negative renders as 0.
    #[serde(default)]
    pub text_offset: f64,

    /// Replaces the computed text curve when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_path: Option<String>,

    /// Switches the container to absolute placement when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Adds the fade-in entrance class.
    #[serde(default)]
    pub animate: bool,

    /// Extra classes for the container.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub class_name: String,

    /// Container style overrides, keyed by CSS property name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "TextStyle::is_empty")]
    pub text_style: TextStyle,
}

impl BadgeConfig {
    /// Creates a config with the given photo and every other field at its default.
    pub fn new(image_src: impl Into<String>, image_alt: impl Into<String>) -> Self {
        Self {
            image_src: image_src.into(),
            image_alt: image_alt.into(),
            badge_text: default_badge_text(),
            size: DEFAULT_SIZE,
            border_color: default_border_color(),
            border_width: DEFAULT_BORDER_WIDTH,
            gradient_color: DEFAULT_GRADIENT_COLOR,
            gradient_angle: DEFAULT_GRADIENT_ANGLE,
            gradient_opacity: DEFAULT_GRADIENT_OPACITY,
            text_offset: 0.0,
            text_path: None,
            position: None,
            animate: false,
            class_name: String::new(),
            style: BTreeMap::new(),
            text_style: TextStyle::default(),
        }
    }

    pub fn with_badge_text(mut self, text: impl Into<String>) -> Self {
        self.badge_text = text.into();
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_border(mut self, color: impl Into<String>, width: f64) -> Self {
        self.border_color = color.into();
        self.border_width = width;
        self
    }

    pub fn with_gradient(mut self, color: RgbColor, angle: f64, opacity: f64) -> Self {
        self.gradient_color = color;
        self.gradient_angle = angle;
        self.gradient_opacity = opacity;
        self
    }

    pub fn with_text_offset(mut self, offset: f64) -> Self {
        self.text_offset = offset;
        self
    }

    pub fn with_text_path(mut self, path: impl Into<String>) -> Self {
        self.text_path = Some(path.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Adds a container style override. Later values for the same property win.
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_text_style(mut self, text_style: TextStyle) -> Self {
        self.text_style = text_style;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// BadgeOverrides
// ============================================================================

/// A partial configuration: only the fields that are present get applied.
///
/// Serializing an override set lists exactly the fields that were given,
/// which makes it a compact usage snippet for a themed badge.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BadgeOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_color: Option<RgbColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_offset: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_path: Option<String>,
    #[serde(default, skip_serializing_if = "position_unset")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    #[serde(default, skip_serializing_if = "text_style_unset")]
    pub text_style: Option<TextStyle>,
}

fn position_unset(position: &Option<Position>) -> bool {
    position.as_ref().is_none_or(Position::is_empty)
}

fn text_style_unset(text_style: &Option<TextStyle>) -> bool {
    text_style.as_ref().is_none_or(TextStyle::is_empty)
}

impl BadgeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the present fields into `config`.
    ///
    /// A position with no edges set is ignored rather than turning on
    /// absolute placement. An empty text style is ignored too.
    pub fn apply_to(&self, mut config: BadgeConfig) -> BadgeConfig {
        if let Some(text) = &self.badge_text {
            config.badge_text = text.clone();
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(color) = &self.border_color {
            config.border_color = color.clone();
        }
        if let Some(width) = self.border_width {
            config.border_width = width;
        }
        if let Some(color) = self.gradient_color {
            config.gradient_color = color;
        }
        if let Some(angle) = self.gradient_angle {
            config.gradient_angle = angle;
        }
        if let Some(opacity) = self.gradient_opacity {
            config.gradient_opacity = opacity;
        }
        if let Some(offset) = self.text_offset {
            config.text_offset = offset;
        }
        if let Some(path) = &self.text_path {
            config.text_path = Some(path.clone());
        }
        if let Some(position) = self.position.as_ref().filter(|p| !p.is_empty()) {
            config.position = Some(position.clone());
        }
        if let Some(animate) = self.animate {
            config.animate = animate;
        }
        if let Some(text_style) = self.text_style.as_ref().filter(|s| !s.is_empty()) {
            config.text_style = text_style.clone();
        }
        config
    }

    /// Serializes only the present fields.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
