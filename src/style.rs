//! Inline style composition.
//!
//! Turns a [`BadgeConfig`] into the per-instance values that a stylesheet
//! cannot know ahead of time: container placement, frame size and border,
//! the gradient overlay and the text size. Layout, circular clipping and the
//! entrance animation keyframes live in the stylesheet that owns the class
//! names below.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::{BadgeConfig, RgbColor};

pub const CONTAINER_CLASS: &str = "opentowork-badge-container";
pub const WRAPPER_CLASS: &str = "opentowork-badge-wrapper";
pub const IMAGE_CLASS: &str = "opentowork-badge-image";
pub const OVERLAY_CLASS: &str = "opentowork-badge-overlay";
pub const GRADIENT_CLASS: &str = "opentowork-badge-gradient";
pub const TEXT_SVG_CLASS: &str = "opentowork-badge-text-svg";
pub const TEXT_CLASS: &str = "opentowork-badge-text";
pub const ANIMATION_CLASS: &str = "fade-in-up";

/// Font size as a fraction of badge size.
pub const FONT_SCALE: f64 = 0.09;
/// Alpha of the 60% gradient stop relative to the peak opacity.
pub const SOFT_STOP_ALPHA: f64 = 0.3;

// ============================================================================
// StyleDeclarations
// ============================================================================

/// An ordered list of CSS declarations with unique property names.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleDeclarations {
    entries: Vec<(String, String)>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property. An existing property keeps its place and takes the new value.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Merges `other` into `self`; `other` wins on collision.
    pub fn merge<'a>(&mut self, other: impl IntoIterator<Item = (&'a String, &'a String)>) {
        for (property, value) in other {
            self.set(property.as_str(), value.as_str());
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }
}

/// Formats as the value of an HTML `style` attribute.
impl fmt::Display for StyleDeclarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{property}: {value};")?;
        }
        Ok(())
    }
}

/// Serializes as a map of property to value, in declaration order.
impl Serialize for StyleDeclarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

// ============================================================================
// LinearGradient
// ============================================================================

/// One color stop of the overlay gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient line, 0.0-1.0.
    pub offset: f64,
    pub color: RgbColor,
    pub alpha: f64,
}

impl GradientStop {
    /// CSS color for this stop; fully transparent stops use the `transparent` keyword.
    pub fn css_color(&self) -> String {
        if self.alpha == 0.0 {
            "transparent".to_string()
        } else {
            let RgbColor { r, g, b } = self.color;
            format!("rgba({r}, {g}, {b}, {})", self.alpha)
        }
    }
}

/// The overlay gradient: clear over the top half, darkening toward the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// CSS angle in degrees (0 points up, clockwise).
    pub angle: f64,
    pub stops: [GradientStop; 4],
}

impl LinearGradient {
    pub fn new(color: RgbColor, angle: f64, opacity: f64) -> Self {
        let stop = |offset, alpha| GradientStop {
            offset,
            color,
            alpha,
        };
        Self {
            angle,
            stops: [
                stop(0.0, 0.0),
                stop(0.5, 0.0),
                stop(0.6, opacity * SOFT_STOP_ALPHA),
                stop(0.9, opacity),
            ],
        }
    }

    /// Gradient line endpoints in a unit square, following the CSS angle
    /// convention so the line spans the box corner to corner.
    pub fn unit_endpoints(&self) -> ((f64, f64), (f64, f64)) {
        let radians = self.angle.to_radians();
        let (sin, cos) = radians.sin_cos();
        let half = (sin.abs() + cos.abs()) / 2.0;

        let start = (0.5 - sin * half, 0.5 + cos * half);
        let end = (0.5 + sin * half, 0.5 - cos * half);
        (start, end)
    }
}

/// Formats as a CSS `linear-gradient(...)` value.
impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linear-gradient({}deg", self.angle)?;
        for stop in &self.stops {
            write!(f, ", {} {}%", stop.css_color(), percent(stop.offset))?;
        }
        f.write_str(")")
    }
}

fn percent(fraction: f64) -> f64 {
    (fraction * 100.0).round()
}

// ============================================================================
// ComposedStyle
// ============================================================================

/// Every inline value derived from one config.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedStyle {
    /// Space separated container classes.
    pub container_class: String,
    pub container: StyleDeclarations,
    pub frame: StyleDeclarations,
    pub gradient: LinearGradient,
    /// Font size in the same unit as `size`.
    pub font_size: f64,
    /// Start of the text along the curve, in percent, never negative.
    pub text_offset: f64,
}

impl ComposedStyle {
    pub fn compose(config: &BadgeConfig) -> Self {
        Self {
            container_class: container_class(config),
            container: container_style(config),
            frame: frame_style(config),
            gradient: LinearGradient::new(
                config.gradient_color,
                config.gradient_angle,
                config.gradient_opacity,
            ),
            font_size: font_size(config.size),
            text_offset: text_offset(config.text_offset),
        }
    }

    /// The `startOffset` attribute value.
    pub fn start_offset(&self) -> String {
        format!("{}%", self.text_offset)
    }
}

/// Container placement plus caller overrides.
///
/// Without a position the container stays in normal flow. With one, only
/// the edges that were set are emitted.
pub fn container_style(config: &BadgeConfig) -> StyleDeclarations {
    let mut style = StyleDeclarations::new();
    if let Some(position) = &config.position {
        style.set("position", "absolute");
        for (edge, value) in position.edges() {
            style.set(edge, value.to_string());
        }
    }
    style.merge(&config.style);
    style
}

/// Size and border of the circular frame.
pub fn frame_style(config: &BadgeConfig) -> StyleDeclarations {
    let mut style = StyleDeclarations::new();
    style.set("width", format!("{}px", config.size));
    style.set("height", format!("{}px", config.size));
    style.set("border-width", format!("{}px", config.border_width));
    style.set("border-color", config.border_color.as_str());
    style
}

pub fn container_class(config: &BadgeConfig) -> String {
    let animation = if config.animate { ANIMATION_CLASS } else { "" };
    [CONTAINER_CLASS, animation, config.class_name.trim()]
        .into_iter()
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn font_size(size: f64) -> f64 {
    size * FONT_SCALE
}

/// Clamps the text offset at zero. NaN and negative zero also become zero.
pub fn text_offset(offset: f64) -> f64 {
    if offset > 0.0 { offset } else { 0.0 }
}

// ============================================================================
// Tests
// ============================================================================
