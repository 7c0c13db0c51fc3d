// File: crates/plot-server/src/routes.rs
// Summary: axum router for /api/plot; the CPU-bound pipeline runs on the blocking pool.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use plot_core::RenderError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pipeline::{self, PlotError};
use crate::request::RawPlotRequest;
use crate::response::PlotResponse;
use crate::validate::ValidationError;

pub const PLOT_PATH: &str = "/api/plot";

pub fn router(config: Arc<Config>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(PLOT_PATH, get(plot_default).post(plot).options(preflight))
        .layer(DefaultBodyLimit::max(config.server.max_body_bytes))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(config)
}

impl PlotError {
    pub fn status(&self) -> StatusCode {
        match self {
            PlotError::Validation(_) | PlotError::Evaluation(_) => StatusCode::BAD_REQUEST,
            PlotError::Render(RenderError::NoRenderableData) => StatusCode::UNPROCESSABLE_ENTITY,
            PlotError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PlotError::Render(_) | PlotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PlotError {
    fn into_response(self) -> Response {
        (self.status(), Json(PlotResponse::error(&self))).into_response()
    }
}

async fn plot(State(config): State<Arc<Config>>, body: Result<Bytes, BytesRejection>) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                PlotError::PayloadTooLarge { limit: config.server.max_body_bytes }
            } else {
                PlotError::Validation(ValidationError::Body(rejection.body_text()))
            };
            tracing::warn!(kind = ?err.kind(), error = %err, "request body rejected");
            return err.into_response();
        }
    };
    match RawPlotRequest::from_json(&body) {
        Ok(raw) => respond(config, raw, false).await,
        Err(e) => {
            let err = PlotError::Validation(ValidationError::Body(e.to_string()));
            tracing::warn!(kind = ?err.kind(), error = %err, "request body rejected");
            err.into_response()
        }
    }
}

async fn plot_default(State(config): State<Arc<Config>>) -> Response {
    respond(config, RawPlotRequest::default(), true).await
}

async fn preflight() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

async fn respond(config: Arc<Config>, raw: RawPlotRequest, default: bool) -> Response {
    let joined = tokio::task::spawn_blocking(move || pipeline::run(raw, &config)).await;
    let result = joined.unwrap_or_else(|e| Err(PlotError::Internal(format!("render task failed: {e}"))));
    match result {
        Ok(plot) => Json(PlotResponse::image(&plot, default)).into_response(),
        Err(err) => err.into_response(),
    }
}
