// File: crates/plot-core/src/lib.rs
// Summary: Core library entry point; exports the line plot model and Skia PNG rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod view;
pub mod theme;
pub mod text;
pub mod style;
pub mod error;

pub use chart::{Chart, RenderOptions};
pub use series::{Series, SeriesStyle};
pub use axis::Axis;
pub use theme::Theme;
pub use text::{Align, Face, TextShaper};
pub use style::{parse_color, LineStyle, Marker};
pub use error::{RenderError, StyleError};
pub use types::Insets;
