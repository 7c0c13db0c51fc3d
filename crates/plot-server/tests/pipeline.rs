// File: crates/plot-server/tests/pipeline.rs
// Purpose: End-to-end pipeline scenarios: raw request in, PNG and metadata out.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::RgbaImage;
use plot_server::{run, Config, ErrorKind, NumberLike, PlotError, PlotResponse, RawPlotRequest, ValidationError};

fn config() -> Config {
    let mut config = Config::default();
    config.image.width = 480;
    config.image.height = 300;
    config
}

fn request(expression: &str, x_min: f64, x_max: f64, samples: f64) -> RawPlotRequest {
    RawPlotRequest {
        expression: Some(expression.into()),
        x_min: Some(x_min.into()),
        x_max: Some(x_max.into()),
        samples: Some(NumberLike::Num(samples)),
        ..Default::default()
    }
}

#[test]
fn sine_returns_png_base64() {
    let plot = run(request("sin(x)", 0.0, 6.283185, 100.0), &config()).expect("plot");
    let resp = PlotResponse::image(&plot, false);
    let PlotResponse::Image { image, content_type, metadata, default } = resp else {
        panic!("expected image response");
    };
    assert_eq!(content_type, "image/png");
    assert!(!default);
    assert_eq!(metadata.samples, 100);
    assert_eq!(metadata.finite_points, 100);

    let png = STANDARD.decode(image).expect("valid base64");
    let img = image::load_from_memory(&png).expect("decodes as image").to_rgba8();
    assert_eq!(img.dimensions(), (480, 300));
}

#[test]
fn log_over_symmetric_range_is_not_an_error() {
    let plot = run(request("log(x)", -1.0, 1.0, 50.0), &config()).expect("plot");
    assert_eq!(plot.metadata.samples, 50);
    assert_eq!(plot.metadata.finite_points, 25);
}

#[test]
fn import_is_rejected_before_evaluation() {
    let err = run(request("__import__('os').system('ls')", 0.0, 1.0, 10.0), &config()).unwrap_err();
    assert!(matches!(err, PlotError::Validation(ValidationError::Expression(_))), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn equal_bounds_rejected() {
    let err = run(request("x", 1.0, 1.0, 10.0), &config()).unwrap_err();
    assert!(matches!(err, PlotError::Validation(ValidationError::EmptyRange { .. })));
}

#[test]
fn single_sample_renders() {
    let plot = run(request("x^2", -3.0, 3.0, 1.0), &config()).expect("plot");
    assert_eq!(plot.metadata.samples, 1);
    assert_eq!(plot.metadata.finite_points, 1);
}

#[test]
fn identical_requests_give_identical_bytes() {
    let raw = RawPlotRequest {
        title: Some("Damped".into()),
        line_style: Some("--".into()),
        marker: Some("o".into()),
        ..request("exp(-x / 3) * cos(2 * x)", 0.0, 10.0, 200.0)
    };
    let a = run(raw.clone(), &config()).expect("first");
    let b = run(raw, &config()).expect("second");
    assert_eq!(a.png, b.png);
}

#[test]
fn empty_request_uses_defaults() {
    let plot = run(RawPlotRequest::default(), &config()).expect("plot");
    assert_eq!(plot.metadata.samples, 500);
    assert_eq!(plot.metadata.x_min, -std::f64::consts::TAU);
    assert_eq!(plot.metadata.x_max, std::f64::consts::TAU);
}

#[test]
fn sample_limit_comes_from_config() {
    let mut config = config();
    config.limits.max_samples = 20;
    assert!(run(request("x", 0.0, 1.0, 20.0), &config).is_ok());
    let err = run(request("x", 0.0, 1.0, 21.0), &config).unwrap_err();
    assert!(matches!(err, PlotError::Validation(ValidationError::Samples { max: 20, .. })));
}

// 480x300 surface with the default insets (88, 32, 56, 72).
const PLOT_LEFT: u32 = 88;
const PLOT_RIGHT: u32 = 448;
const PLOT_TOP: u32 = 56;
const PLOT_BOTTOM: u32 = 228;

fn red_line(expression: &str, x_min: f64, x_max: f64, samples: f64) -> (plot_server::Metadata, RgbaImage) {
    let raw = RawPlotRequest {
        color: Some("#ff0000".into()),
        grid: Some(false),
        ..request(expression, x_min, x_max, samples)
    };
    let plot = run(raw, &config()).expect("plot");
    let img = image::load_from_memory(&plot.png).expect("decodes").to_rgba8();
    (plot.metadata, img)
}

fn red_in(img: &RgbaImage, cols: std::ops::Range<u32>, rows: std::ops::Range<u32>) -> usize {
    cols.flat_map(|x| rows.clone().map(move |y| (x, y)))
        .filter(|&(x, y)| {
            let [r, g, b, _] = img.get_pixel(x, y).0;
            r > 180 && g < 90 && b < 90
        })
        .count()
}

/// The line must reach both horizontal thirds of the plot area.
fn assert_spans_width(img: &RgbaImage) {
    let third = (PLOT_RIGHT - PLOT_LEFT) / 3;
    let rows = PLOT_TOP..PLOT_BOTTOM;
    assert!(red_in(img, PLOT_LEFT..PLOT_LEFT + third, rows.clone()) > 0, "nothing drawn on the left");
    assert!(red_in(img, PLOT_RIGHT - third..PLOT_RIGHT, rows) > 0, "nothing drawn on the right");
}

#[test]
fn domain_wider_than_f64_max_renders_across() {
    let (meta, img) = red_line("x", -1e308, 1e308, 50.0);
    assert_eq!((meta.x_min, meta.x_max), (-1e308, 1e308));
    assert_eq!(meta.samples, 50);
    assert_eq!(meta.finite_points, 50);
    assert_spans_width(&img);
}

#[test]
fn tiny_width_domain_renders_across() {
    let (meta, img) = red_line("x", 0.0, 1e-300, 50.0);
    assert_eq!((meta.x_min, meta.x_max), (0.0, 1e-300));
    assert_eq!(meta.finite_points, 50);
    assert_spans_width(&img);
}

#[test]
fn y_range_wider_than_f64_max_renders() {
    let (meta, img) = red_line("1e308 * sin(x)", 0.0, std::f64::consts::TAU, 200.0);
    assert_eq!(meta.finite_points, 200);
    assert_spans_width(&img);
    let mid = (PLOT_TOP + PLOT_BOTTOM) / 2;
    let cols = PLOT_LEFT..PLOT_RIGHT;
    assert!(red_in(&img, cols.clone(), PLOT_TOP..mid) > 0, "peak missing");
    assert!(red_in(&img, cols, mid..PLOT_BOTTOM) > 0, "trough missing");
}
