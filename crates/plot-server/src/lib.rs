// File: crates/plot-server/src/lib.rs
// Summary: Expression plot service: request validation, render pipeline, config, and HTTP routes.

pub mod config;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod routes;
pub mod validate;

pub use config::{Config, ConfigError};
pub use pipeline::{run, ErrorKind, EvaluationError, Metadata, PlotError, RenderedPlot};
pub use request::{NumberLike, RawPlotRequest};
pub use response::PlotResponse;
pub use routes::router;
pub use validate::{validate, PlotRequest, ValidationError};
