// File: crates/plot-core/src/error.rs
// Summary: Render and style error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Every point of every series is NaN or infinite.
    #[error("no renderable data: every sampled value is NaN or infinite")]
    NoRenderableData,

    #[error("invalid image size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("failed to create raster surface")]
    Surface,

    #[error("encode PNG failed")]
    Encode,

    #[error("write PNG: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown color '{0}' (use #rgb, #rrggbb, #rrggbbaa or a color name)")]
    Color(String),

    #[error("unknown line style '{0}' (use solid, dashed, dotted or dashdot)")]
    LineStyle(String),

    #[error("unknown marker '{0}' (use one of o s ^ x + . or leave empty)")]
    Marker(String),

    #[error("unknown theme '{0}'")]
    Theme(String),
}
