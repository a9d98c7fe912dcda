//! Layer stack for badge rendering.
//!
//! A badge is drawn as a fixed stack of layers, bottom to top:
//!
//! ```text
//! ┌───────────┐
//! │   Frame   │ ◄── circular clip + border ring, emits FrameClip
//! └─────┬─────┘
//!       ▼
//! ┌───────────┐
//! │   Photo   │ ◄── consumes FrameClip
//! └─────┬─────┘
//!       ▼
//! ┌───────────┐
//! │ Gradient  │ ◄── consumes FrameClip
//! └─────┬─────┘
//!       ▼
//! ┌───────────┐
//! │   Text    │ ◄── emits CurveLink
//! └───────────┘
//! ```
//!
//! Each layer implements [`LayerEffect`]. Layers write markup into the
//! [`RenderContext`] fragments and talk to each other through its typed
//! property bag, so no layer needs to know about another. Nothing is cached:
//! the whole stack runs again on every render.

pub mod frame;
pub mod gradient;
pub mod photo;
pub mod text;

pub use frame::FrameLayer;
pub use gradient::GradientLayer;
pub use photo::PhotoLayer;
pub use text::TextLayer;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::config::BadgeConfig;
use crate::style::ComposedStyle;

// ============================================================================
// Output Mode
// ============================================================================

/// What the layers are rendering into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// HTML elements styled by an external stylesheet.
    Html,
    /// A self-contained SVG document including the photo.
    Svg,
    /// A self-contained SVG document without the photo, for compositing
    /// over a photo rasterized separately.
    SvgOverlay,
}

impl OutputMode {
    pub fn is_svg(self) -> bool {
        matches!(self, Self::Svg | Self::SvgOverlay)
    }
}

// ============================================================================
// Fragments
// ============================================================================

/// Markup buckets filled by the layers.
///
/// In HTML mode `base` holds the photo element and `overlay` holds the
/// children of the overlay element. In SVG modes `defs` goes into `<defs>`
/// and the rest is painted in `base`, `overlay`, `frame` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub defs: String,
    pub base: String,
    pub overlay: String,
    pub frame: String,
}

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the layer stack.
pub struct RenderContext {
    pub mode: OutputMode,

    /// Badge diameter.
    pub size: f64,

    /// Markup produced so far.
    pub fragments: Fragments,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    pub fn new(mode: OutputMode, size: f64) -> Self {
        Self {
            mode,
            size,
            fragments: Fragments::default(),
            properties: HashMap::new(),
        }
    }

    /// Sets a typed property that upper layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by a lower layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<T>())
    }
}

// ============================================================================
// Common Properties
// ============================================================================

/// Id of the circular clip path. Only set in SVG modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameClip(pub String);

/// The text curve as linked by the text layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveLink {
    /// Element id of the curve path.
    pub id: String,
    /// Path data of the curve.
    pub path: String,
}

// ============================================================================
// Layer Trait
// ============================================================================

/// A self-contained layer of the badge.
pub trait LayerEffect {
    /// Writes this layer's markup into the context.
    fn transform(&self, ctx: &mut RenderContext);

    /// Emits properties for the layers above. Called after
    /// [`transform`](Self::transform); emits nothing by default.
    fn emit(&self, _ctx: &mut RenderContext) {}

    /// Runs [`transform`](Self::transform) then [`emit`](Self::emit).
    fn apply(&self, ctx: &mut RenderContext) {
        self.transform(ctx);
        self.emit(ctx);
    }
}

// ============================================================================
// Layer Stack
// ============================================================================

/// All layers of one badge, built from its config.
pub struct LayerStack {
    pub frame: FrameLayer,
    pub photo: PhotoLayer,
    pub gradient: GradientLayer,
    pub text: TextLayer,
}

impl LayerStack {
    /// Builds the stack. `instance_id` must be unique within the document;
    /// every element id the stack emits is derived from it.
    pub fn new(config: &BadgeConfig, style: &ComposedStyle, instance_id: &str) -> Self {
        Self {
            frame: FrameLayer::new(config, instance_id),
            photo: PhotoLayer::new(config),
            gradient: GradientLayer::new(config.size, style.gradient.clone(), instance_id),
            text: TextLayer::new(config, style, instance_id),
        }
    }

    /// Runs every layer, bottom to top, and returns the filled context.
    pub fn render(&self, mode: OutputMode, size: f64) -> RenderContext {
        let mut ctx = RenderContext::new(mode, size);
        self.frame.apply(&mut ctx);
        self.photo.apply(&mut ctx);
        self.gradient.apply(&mut ctx);
        self.text.apply(&mut ctx);
        ctx
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Marker(u8);

    #[test]
    fn property_bag_is_typed() {
        let mut ctx = RenderContext::new(OutputMode::Html, 100.0);
        assert!(!ctx.has::<Marker>());

        ctx.set(Marker(7));
        ctx.set(FrameClip("clip".into()));

        assert_eq!(ctx.get::<Marker>(), Some(&Marker(7)));
        assert_eq!(ctx.get::<FrameClip>(), Some(&FrameClip("clip".into())));
        assert!(ctx.get::<CurveLink>().is_none());
    }

    #[test]
    fn html_stack_fills_photo_and_overlay() {
        let config = BadgeConfig::new("/me.webp", "Me");
        let style = ComposedStyle::compose(&config);
        let stack = LayerStack::new(&config, &style, "text-curve-200-1");

        let ctx = stack.render(OutputMode::Html, config.size);

        assert!(ctx.fragments.defs.is_empty());
        assert!(ctx.fragments.frame.is_empty());
        assert!(ctx.fragments.base.starts_with("<img"));
        assert!(ctx.fragments.overlay.contains("opentowork-badge-gradient"));
        assert!(ctx.fragments.overlay.contains("<textPath"));
        assert!(!ctx.has::<FrameClip>());
        assert_eq!(
            ctx.get::<CurveLink>().map(|link| link.id.as_str()),
            Some("text-curve-200-1")
        );
    }

    #[test]
    fn svg_stack_links_layers_through_the_clip() {
        let config = BadgeConfig::new("/me.webp", "Me");
        let style = ComposedStyle::compose(&config);
        let stack = LayerStack::new(&config, &style, "text-curve-200-2");

        let ctx = stack.render(OutputMode::Svg, config.size);

        assert_eq!(
            ctx.get::<FrameClip>(),
            Some(&FrameClip("text-curve-200-2-clip".into()))
        );
        assert!(ctx.fragments.defs.contains(r#"<clipPath id="text-curve-200-2-clip">"#));
        assert!(ctx.fragments.base.contains(r#"clip-path="url(#text-curve-200-2-clip)""#));
        assert!(ctx.fragments.overlay.contains(r#"clip-path="url(#text-curve-200-2-clip)""#));
        assert!(ctx.fragments.frame.contains("stroke=\"#d4ad00\""));
    }

    #[test]
    fn overlay_mode_skips_the_photo() {
        let config = BadgeConfig::new("/me.webp", "Me");
        let style = ComposedStyle::compose(&config);
        let stack = LayerStack::new(&config, &style, "text-curve-200-3");

        let ctx = stack.render(OutputMode::SvgOverlay, config.size);

        assert!(ctx.fragments.base.is_empty());
        assert!(ctx.fragments.overlay.contains("<text"));
    }
}
