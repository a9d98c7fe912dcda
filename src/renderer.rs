//! Badge rendering entry point.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::config::BadgeConfig;
use crate::error::Result;
use crate::layer::{CurveLink, LayerStack, OutputMode};
use crate::style::{ComposedStyle, OVERLAY_CLASS, StyleDeclarations, WRAPPER_CLASS};
use crate::svg::escape_xml;

/// Default prefix of curve element ids.
pub const DEFAULT_ID_PREFIX: &str = "text-curve";

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// CurveId
// ============================================================================

/// Element id linking the badge text to its curve.
///
/// Every id carries a process-wide instance number, so two badges of the
/// same size in one document never share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CurveId(String);

impl CurveId {
    /// Allocates a fresh id of the form `{prefix}-{size}-{instance}`.
    pub fn next(prefix: &str, size: f64) -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{prefix}-{size}-{instance}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// BadgeRenderer
// ============================================================================

/// Renders badge configs.
///
/// # Example
///
/// ```
/// use opentowork_badge::{BadgeConfig, BadgeRenderer, Position};
///
/// let config = BadgeConfig::new("/images/me.webp", "Jane Doe")
///     .with_size(168.0)
///     .with_position(Position::new().top(-10));
///
/// let badge = BadgeRenderer::new().render(&config);
/// assert!(badge.html().contains("top: -10px;"));
/// assert!(badge.svg_document().starts_with("<svg"));
/// ```
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    id_prefix: String,
}

impl Default for BadgeRenderer {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl BadgeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different prefix for curve ids.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Renders one badge instance.
    ///
    /// Each call allocates a new [`CurveId`]; nothing is reused between calls.
    pub fn render(&self, config: &BadgeConfig) -> RenderedBadge {
        if !(config.size > 0.0) {
            log::warn!("badge size {} is not positive, output will be degenerate", config.size);
        }
        if !(0.0..=1.0).contains(&config.gradient_opacity) {
            log::warn!("gradient opacity {} is outside 0..=1", config.gradient_opacity);
        }

        let curve_id = CurveId::next(&self.id_prefix, config.size);
        let style = ComposedStyle::compose(config);
        let stack = LayerStack::new(config, &style, curve_id.as_str());

        let ctx = stack.render(OutputMode::Html, config.size);
        let curve = ctx.get::<CurveLink>().cloned().unwrap_or_else(|| CurveLink {
            id: curve_id.as_str().to_string(),
            path: stack.text.path.clone(),
        });
        let fragments = ctx.fragments;

        let html = format!(
            r#"<div class="{}"{}><div class="{WRAPPER_CLASS}" style="{}">{}<div class="{OVERLAY_CLASS}">{}</div></div></div>"#,
            escape_xml(&style.container_class),
            style_attribute(&style.container),
            escape_xml(&style.frame.to_string()),
            fragments.base,
            fragments.overlay
        );

        log::debug!(
            "rendered badge {} (size {}, text {:?})",
            curve.id,
            config.size,
            config.badge_text
        );

        RenderedBadge {
            size: config.size,
            image_alt: config.image_alt.clone(),
            curve_id,
            curve,
            style,
            stack,
            html,
        }
    }
}

fn style_attribute(style: &StyleDeclarations) -> String {
    if style.is_empty() {
        String::new()
    } else {
        format!(r#" style="{}""#, escape_xml(&style.to_string()))
    }
}

// ============================================================================
// RenderedBadge
// ============================================================================

/// The output of one render pass.
pub struct RenderedBadge {
    pub size: f64,
    pub image_alt: String,
    pub curve_id: CurveId,
    /// The curve the text layer linked to.
    pub curve: CurveLink,
    pub style: ComposedStyle,
    stack: LayerStack,
    html: String,
}

impl RenderedBadge {
    /// HTML fragment; relies on the badge stylesheet for clipping and layout.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Self-contained SVG document including the photo.
    pub fn svg_document(&self) -> String {
        self.document(OutputMode::Svg)
    }

    /// Self-contained SVG document without the photo.
    pub fn svg_overlay_document(&self) -> String {
        self.document(OutputMode::SvgOverlay)
    }

    fn document(&self, mode: OutputMode) -> String {
        let fragments = self.stack.render(mode, self.size).fragments;
        let alt = escape_xml(&self.image_alt);
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" role="img" aria-label="{alt}"><title>{alt}</title><defs>{}</defs>{}{}{}</svg>"#,
            fragments.defs,
            fragments.base,
            fragments.overlay,
            fragments.frame,
            size = self.size
        )
    }

    /// Computed per-instance values, for hosts that build their own markup.
    pub fn layout(&self) -> BadgeLayout<'_> {
        BadgeLayout {
            curve_id: self.curve_id.as_str(),
            text_path: &self.curve.path,
            container_class: &self.style.container_class,
            container_style: &self.style.container,
            frame_style: &self.style.frame,
            gradient: self.style.gradient.to_string(),
            font_size: self.style.font_size,
            start_offset: self.style.start_offset(),
        }
    }

    pub fn layout_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.layout())?)
    }
}

/// Serializable view of a rendered badge's computed values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeLayout<'a> {
    pub curve_id: &'a str,
    pub text_path: &'a str,
    pub container_class: &'a str,
    pub container_style: &'a StyleDeclarations,
    pub frame_style: &'a StyleDeclarations,
    pub gradient: String,
    pub font_size: f64,
    pub start_offset: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Position;
    use std::collections::HashSet;

    fn config() -> BadgeConfig {
        BadgeConfig::new("/placeholder-profile.webp", "Sarah Chen")
    }

    #[test]
    fn same_size_badges_get_distinct_curve_ids() {
        let renderer = BadgeRenderer::new();
        let badges: Vec<_> = (0..5).map(|_| renderer.render(&config())).collect();

        let ids: HashSet<_> = badges.iter().map(|b| b.curve_id.clone()).collect();
        assert_eq!(ids.len(), badges.len());

        for badge in &badges {
            let href = format!("href=\"#{}\"", badge.curve_id.as_str());
            assert!(badge.html().contains(&href));
            assert!(badge.curve_id.as_str().starts_with("text-curve-200-"));
        }
    }

    #[test]
    fn ids_are_unique_across_renderers() {
        let a = BadgeRenderer::new().render(&config());
        let b = BadgeRenderer::new().render(&config());
        assert_ne!(a.curve_id, b.curve_id);
    }

    #[test]
    fn custom_prefix() {
        let badge = BadgeRenderer::new().with_id_prefix("hero").render(&config());
        assert!(badge.curve_id.as_str().starts_with("hero-200-"));
        assert_eq!(badge.curve.id, badge.curve_id.as_str());
    }

    #[test]
    fn html_structure() {
        let badge = BadgeRenderer::new().render(&config().with_animation(true));
        let html = badge.html();

        assert!(html.starts_with(
            r#"<div class="opentowork-badge-container fade-in-up"><div class="opentowork-badge-wrapper" style="width: 200px; height: 200px; border-width: 4px; border-color: #d4ad00;"><img src="/placeholder-profile.webp" alt="Sarah Chen""#
        ));
        assert!(html.contains(r#"<div class="opentowork-badge-overlay"><div class="opentowork-badge-gradient""#));
        assert!(html.ends_with("</textPath></text></svg></div></div></div>"));
    }

    #[test]
    fn positioned_container() {
        let badge = BadgeRenderer::new()
            .render(&config().with_position(Position::new().left(-225).top(-60)));

        assert!(badge.html().starts_with(
            r#"<div class="opentowork-badge-container" style="position: absolute; left: -225px; top: -60px;">"#
        ));
    }

    #[test]
    fn svg_document_is_parseable() {
        let badge = BadgeRenderer::new().render(&config().with_size(140.0));
        let svg = badge.svg_document();

        assert!(svg.contains(r#"viewBox="0 0 140 140""#));
        assert!(svg.contains("<title>Sarah Chen</title>"));
        assert!(svg.contains("<image href=\"/placeholder-profile.webp\""));

        let overlay = badge.svg_overlay_document();
        assert!(!overlay.contains("<image"));
        assert!(resvg::usvg::Tree::from_str(&overlay, &resvg::usvg::Options::default()).is_ok());
    }

    #[test]
    fn curve_matches_geometry() {
        let badge = BadgeRenderer::new().render(&config());
        assert_eq!(badge.curve.path, crate::geometry::text_path(200.0, None));

        let custom = BadgeRenderer::new().render(&config().with_text_path("M 0 0 L 10 10"));
        assert_eq!(custom.curve.path, "M 0 0 L 10 10");
    }

    #[test]
    fn layout_json() {
        let badge = BadgeRenderer::new().render(
            &config()
                .with_text_offset(40.0)
                .with_position(Position::new().top(-10)),
        );
        let json: serde_json::Value = serde_json::from_str(&badge.layout_json().unwrap()).unwrap();

        assert_eq!(json["startOffset"], "40%");
        assert_eq!(json["fontSize"], 18.0);
        assert_eq!(json["containerStyle"]["position"], "absolute");
        assert_eq!(json["containerStyle"]["top"], "-10px");
        assert!(json["containerStyle"].get("left").is_none());
        assert_eq!(json["frameStyle"]["width"], "200px");
        assert_eq!(json["curveId"], badge.curve_id.as_str());
    }
}
