// File: crates/plot-server/src/response.rs
// Summary: JSON response body; exactly one of image or error, enforced by the enum shape.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::pipeline::{ErrorKind, Metadata, PlotError, RenderedPlot};

pub const CONTENT_TYPE_PNG: &str = "image/png";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlotResponse {
    Image {
        /// Standard base64 with padding, no data-URL prefix.
        image: String,
        #[serde(rename = "contentType")]
        content_type: String,
        metadata: Metadata,
        default: bool,
    },
    Error {
        error: String,
        kind: ErrorKind,
    },
}

impl PlotResponse {
    pub fn image(plot: &RenderedPlot, default: bool) -> Self {
        PlotResponse::Image {
            image: STANDARD.encode(&plot.png),
            content_type: CONTENT_TYPE_PNG.to_string(),
            metadata: plot.metadata.clone(),
            default,
        }
    }

    pub fn error(err: &PlotError) -> Self {
        PlotResponse::Error { error: err.to_string(), kind: err.kind() }
    }
}
