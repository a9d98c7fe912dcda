//! opentowork-badge: circular profile-photo badges with curved text
//!
//! A badge is a round photo with a gradient wash over its lower half and a
//! short text (by default `#opentowork`) running along the bottom rim. This
//! crate computes the text curve and the per-instance styles, and renders
//! the badge as an HTML fragment, a standalone SVG document or a PNG.
//!
//! # Example
//!
//! ```
//! use opentowork_badge::{BadgeConfig, BadgeRenderer, RgbColor};
//!
//! let config = BadgeConfig::new("/images/headshot.jpg", "Your Name")
//!     .with_size(300.0)
//!     .with_border("#0077b5", 4.0)
//!     .with_gradient(RgbColor::new(0, 119, 181), 200.0, 1.0);
//!
//! let badge = BadgeRenderer::new().render(&config);
//! let html = badge.html();
//! let svg = badge.svg_document();
//! # assert!(html.contains("width: 300px;"));
//! # assert!(svg.contains("viewBox=\"0 0 300 300\""));
//! ```
//!
//! # Themes
//!
//! Partial configurations are expressed as [`BadgeOverrides`], which only
//! carry the fields that were given:
//!
//! ```
//! use opentowork_badge::{BadgeConfig, BadgeRenderer, Preset};
//!
//! let config = Preset::Vivid
//!     .overrides()
//!     .apply_to(BadgeConfig::new("/images/sarah.webp", "Sarah Chen"));
//!
//! let badge = BadgeRenderer::new().render(&config);
//! assert_eq!(badge.style.container.get("left"), Some("-70px"));
//! ```

mod config;
mod error;
mod geometry;
mod layer;
mod presets;
mod raster;
mod renderer;
mod style;
mod svg;

pub use config::{
    BadgeConfig, BadgeOverrides, DEFAULT_BADGE_TEXT, DEFAULT_BORDER_COLOR, DEFAULT_BORDER_WIDTH,
    DEFAULT_GRADIENT_ANGLE, DEFAULT_GRADIENT_COLOR, DEFAULT_GRADIENT_OPACITY, DEFAULT_SIZE,
    Length, Position, RgbColor, TextStyle,
};
pub use error::{BadgeError, Result};
pub use geometry::{ArcPath, text_path, y_multiplier};
pub use layer::{
    CurveLink, FrameClip, FrameLayer, GradientLayer, LayerEffect, LayerStack, OutputMode,
    PhotoLayer, RenderContext, TextLayer,
};
pub use presets::Preset;
pub use raster::{encode_png, load_photo, prepare_photo, rasterize};
pub use renderer::{BadgeLayout, BadgeRenderer, CurveId, RenderedBadge};
pub use style::{
    ComposedStyle, GradientStop, LinearGradient, StyleDeclarations, container_class,
    container_style, font_size, frame_style, text_offset,
};
pub use svg::{composite_over, escape_xml, render_svg};
