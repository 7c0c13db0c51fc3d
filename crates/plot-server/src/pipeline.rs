// File: crates/plot-server/src/pipeline.rs
// Summary: validate -> evaluate -> render for one request; single-threaded, no shared mutable state.

use std::time::Instant;

use plot_core::{Axis, Chart, RenderError, RenderOptions, Series};
use plot_expr::{ExprError, Expression, SampledCurve, SymbolTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, ImageConfig};
use crate::request::RawPlotRequest;
use crate::validate::{validate, PlotRequest, ValidationError};

/// Fraction of the finite Y span added above and below the curve.
pub const Y_MARGIN: f64 = 0.05;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("could not evaluate expression: {0}")]
    Expression(#[from] ExprError),
}

#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Machine-readable error category carried in error responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Evaluation,
    Render,
    Internal,
    Payload,
}

impl PlotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlotError::Validation(_) => ErrorKind::Validation,
            PlotError::Evaluation(_) => ErrorKind::Evaluation,
            PlotError::Render(_) => ErrorKind::Render,
            PlotError::PayloadTooLarge { .. } => ErrorKind::Payload,
            PlotError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Echo of the sampled domain returned next to the image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
    pub finite_points: usize,
}

#[derive(Clone, Debug)]
pub struct RenderedPlot {
    pub png: Vec<u8>,
    pub metadata: Metadata,
}

/// Run the whole pipeline for one raw request.
pub fn run(raw: RawPlotRequest, config: &Config) -> Result<RenderedPlot, PlotError> {
    let started = Instant::now();
    let result = run_stages(raw, config);
    match &result {
        Ok(plot) => tracing::info!(
            samples = plot.metadata.samples,
            finite_points = plot.metadata.finite_points,
            png_bytes = plot.png.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plot rendered"
        ),
        Err(err) => tracing::warn!(kind = ?err.kind(), error = %err, "plot rejected"),
    }
    result
}

fn run_stages(raw: RawPlotRequest, config: &Config) -> Result<RenderedPlot, PlotError> {
    let symbols = config.symbol_table().map_err(|e| PlotError::Internal(e.to_string()))?;
    let request = validate(raw, config, &symbols)?;
    let curve = evaluate(&request, &symbols)?;
    let metadata = Metadata {
        x_min: request.domain.x_min,
        x_max: request.domain.x_max,
        samples: curve.len(),
        finite_points: curve.finite_count(),
    };
    let png = render(&request, curve, &config.image)?;
    Ok(RenderedPlot { png, metadata })
}

/// Parse the screened expression and sample it over the request domain.
pub fn evaluate(request: &PlotRequest, symbols: &SymbolTable) -> Result<SampledCurve, EvaluationError> {
    let expression = Expression::parse(&request.expression, symbols)?;
    let curve = expression.sample(&request.domain);
    tracing::debug!(
        expression = %request.expression,
        points = curve.len(),
        finite = curve.finite_count(),
        "sampled expression"
    );
    Ok(curve)
}

/// Draw the curve with the request's styling at the configured size.
pub fn render(request: &PlotRequest, curve: SampledCurve, image: &ImageConfig) -> Result<Vec<u8>, RenderError> {
    let mut chart = Chart::new();
    chart.title = request.title.clone();
    chart.x_axis = Axis::new(request.x_label.as_str(), request.domain.x_min, request.domain.x_max);
    chart.y_axis.label = request.y_label.clone();
    chart.add_series(Series::with_data(curve.into_points()).with_style(request.style));
    chart.autoscale_y(Y_MARGIN);

    let opts = RenderOptions {
        width: image.width,
        height: image.height,
        theme: request.theme,
        grid: request.grid,
        ..RenderOptions::default()
    };
    chart.render_to_png_bytes(&opts)
}
