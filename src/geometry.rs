//! Curve geometry for the badge text.
//!
//! The text runs along a minor arc on the lower rim of the badge. The
//! vertical position of the arc is an empirical fit: the multiplier is 0.35
//! at size 100, about 0.395 at size 200 and about 0.44 at size 300.
//!
//! The fit only holds for ordinary badge sizes. Below 6 px the start point
//! is pinned by [`MIN_START_X`], and from about 1474 px up (where the
//! multiplier reaches 0.7) the endpoints rise above the top edge, so the arc
//! leaves the badge.

use std::fmt;

/// Base of the linear fit for the arc height.
pub const Y_MULTIPLIER_BASE: f64 = 0.3;
/// Slope of the linear fit for the arc height, per pixel of badge size.
pub const Y_MULTIPLIER_SLOPE: f64 = 0.000475;
/// Extra room before the chord start, as a fraction of size.
pub const START_EXTENSION: f64 = 0.1;
pub const START_PADDING: f64 = 0.01;
pub const END_PADDING: f64 = -0.005;
/// Lowest allowed x for the start point.
pub const MIN_START_X: f64 = 5.0;

/// The computed text curve: a minor arc from `(x1, y)` to `(x2, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
    pub radius: f64,
}

impl ArcPath {
    /// Computes the default text curve for a badge of the given size.
    pub fn for_size(size: f64) -> Self {
        let radius = size / 2.0;
        let center = size / 2.0;

        let y = size - size * y_multiplier(size);

        // Half-span of the chord at height y; clamped so tiny or huge sizes
        // still produce numbers.
        let dy = y - center;
        let offset = (radius * radius - dy * dy).max(0.0).sqrt();

        let start_padding = size * START_PADDING;
        let end_padding = size * END_PADDING;

        let x1 = (center - offset - size * START_EXTENSION + start_padding).max(MIN_START_X);
        let x2 = center + offset - end_padding;

        Self { x1, x2, y, radius }
    }
}

/// Formats as SVG path data. Sweep flag 0 keeps the arc on the bottom.
impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {} {} 0 0 0 {} {}",
            self.x1, self.y, self.radius, self.radius, self.x2, self.y
        )
    }
}

/// Height fit used to place the arc endpoints.
pub fn y_multiplier(size: f64) -> f64 {
    Y_MULTIPLIER_BASE + Y_MULTIPLIER_SLOPE * size
}

/// Returns the SVG path data for the text curve.
///
/// A custom path is returned unchanged.
pub fn text_path(size: f64, custom: Option<&str>) -> String {
    match custom {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => ArcPath::for_size(size).to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
