//! Error type for the fallible edges of the crate.
//!
//! Geometry and style composition never fail. Only parsing configuration,
//! parsing generated SVG, and raster image work can.

use thiserror::Error;

/// Errors produced while loading configuration or rasterizing a badge.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The configuration document could not be parsed or serialized.
    #[error("invalid badge configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The generated SVG was rejected by usvg.
    #[error("failed to parse badge svg: {0}")]
    SvgParse(#[from] resvg::usvg::Error),

    /// The badge is too small (or too large) to allocate a pixmap for.
    #[error("cannot rasterize a badge of size {size}")]
    RasterSize { size: f64 },

    /// The photo could not be decoded, or the PNG could not be encoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T, E = BadgeError> = std::result::Result<T, E>;
