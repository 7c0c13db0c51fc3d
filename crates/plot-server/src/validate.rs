// File: crates/plot-server/src/validate.rs
// Summary: Raw request -> well-typed PlotRequest. Pure; the expression is screened, never evaluated.

use std::f64::consts::TAU;
use std::str::FromStr;

use plot_core::{parse_color, theme, LineStyle, Marker, SeriesStyle, StyleError, Theme};
use plot_expr::{Domain, ExprError, SymbolTable};
use thiserror::Error;

use crate::config::Config;
use crate::request::{NumberLike, RawPlotRequest};

pub const DEFAULT_EXPRESSION: &str = "sin(2 * pi * x)";
pub const DEFAULT_X_MIN: f64 = -TAU;
pub const DEFAULT_X_MAX: f64 = TAU;
pub const DEFAULT_SAMPLES: usize = 500;
pub const DEFAULT_X_LABEL: &str = "x";
pub const DEFAULT_Y_LABEL: &str = "f(x)";
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
pub const LINE_WIDTH_RANGE: std::ops::RangeInclusive<f64> = 0.1..=10.0;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid expression: {0}")]
    Expression(#[from] ExprError),

    #[error("expression is longer than {limit} characters")]
    ExpressionTooLong { limit: usize },

    #[error("'{field}' must be a number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("'{field}' must be finite")]
    NotFinite { field: &'static str },

    #[error("xMin ({x_min}) must be less than xMax ({x_max})")]
    EmptyRange { x_min: f64, x_max: f64 },

    #[error("samples must be an integer between 1 and {max}, got '{got}'")]
    Samples { got: String, max: usize },

    #[error("lineWidth must be between 0.1 and 10, got {0}")]
    LineWidth(f64),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("malformed request body: {0}")]
    Body(String),
}

/// A request that passed validation. Every field is concrete.
#[derive(Clone, Debug)]
pub struct PlotRequest {
    pub expression: String,
    pub domain: Domain,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub style: SeriesStyle,
    pub grid: bool,
    pub theme: Theme,
}

pub fn validate(
    raw: RawPlotRequest,
    config: &Config,
    symbols: &SymbolTable,
) -> Result<PlotRequest, ValidationError> {
    let expression = validate_expression(raw.expression.as_deref(), config, symbols)?;

    let x_min = number(raw.x_min.as_ref(), "xMin", DEFAULT_X_MIN)?;
    let x_max = number(raw.x_max.as_ref(), "xMax", DEFAULT_X_MAX)?;
    if x_min >= x_max {
        return Err(ValidationError::EmptyRange { x_min, x_max });
    }
    let samples = samples(raw.samples.as_ref(), config.limits.max_samples)?;

    let line_width = number(raw.line_width.as_ref(), "lineWidth", DEFAULT_LINE_WIDTH)?;
    if !LINE_WIDTH_RANGE.contains(&line_width) {
        return Err(ValidationError::LineWidth(line_width));
    }
    let style = SeriesStyle {
        color: non_blank(raw.color.as_deref()).map(parse_color).transpose()?,
        width: line_width as f32,
        line: parse_or_default::<LineStyle>(raw.line_style.as_deref())?,
        marker: parse_or_default::<Marker>(raw.marker.as_deref())?,
    };
    let theme = match non_blank(raw.theme.as_deref()) {
        Some(name) => theme::find(name)?,
        None => Theme::default(),
    };

    Ok(PlotRequest {
        expression,
        domain: Domain { x_min, x_max, samples },
        title: non_blank(raw.title.as_deref()).map(str::to_string),
        x_label: non_blank(raw.x_label.as_deref()).unwrap_or(DEFAULT_X_LABEL).to_string(),
        y_label: non_blank(raw.y_label.as_deref()).unwrap_or(DEFAULT_Y_LABEL).to_string(),
        style,
        grid: raw.grid.unwrap_or(true),
        theme,
    })
}

/// Trim, bound the length, then tokenize and screen every identifier.
fn validate_expression(
    raw: Option<&str>,
    config: &Config,
    symbols: &SymbolTable,
) -> Result<String, ValidationError> {
    let expression = raw.unwrap_or(DEFAULT_EXPRESSION).trim();
    if expression.is_empty() {
        return Err(ExprError::Empty.into());
    }
    let limit = config.limits.max_expression_len;
    if expression.chars().count() > limit {
        return Err(ValidationError::ExpressionTooLong { limit });
    }
    plot_expr::screen(expression, symbols)?;
    Ok(expression.to_string())
}

fn number(value: Option<&NumberLike>, field: &'static str, default: f64) -> Result<f64, ValidationError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let v = value
        .to_f64()
        .ok_or_else(|| ValidationError::NotANumber { field, value: value.to_string() })?;
    if !v.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    Ok(v)
}

fn samples(value: Option<&NumberLike>, max: usize) -> Result<usize, ValidationError> {
    let Some(value) = value else {
        return Ok(DEFAULT_SAMPLES.min(max));
    };
    let invalid = || ValidationError::Samples { got: value.to_string(), max };
    let v = value.to_f64().ok_or_else(invalid)?;
    if !v.is_finite() || v.fract() != 0.0 || v < 1.0 || v > max as f64 {
        return Err(invalid());
    }
    Ok(v as usize)
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T, StyleError>
where
    T: FromStr<Err = StyleError> + Default,
{
    value.map_or_else(|| Ok(T::default()), str::parse)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(raw: RawPlotRequest) -> Result<PlotRequest, ValidationError> {
        let config = Config::default();
        let symbols = config.symbol_table().unwrap();
        validate(raw, &config, &symbols)
    }

    fn expr(e: &str) -> RawPlotRequest {
        RawPlotRequest { expression: Some(e.into()), ..Default::default() }
    }

    #[test]
    fn defaults_fill_everything() {
        let req = run(RawPlotRequest::default()).unwrap();
        assert_eq!(req.expression, DEFAULT_EXPRESSION);
        assert_eq!(req.domain, Domain { x_min: -TAU, x_max: TAU, samples: 500 });
        assert_eq!(req.title, None);
        assert_eq!((req.x_label.as_str(), req.y_label.as_str()), ("x", "f(x)"));
        assert_eq!(req.style, SeriesStyle::default());
        assert!(req.grid);
        assert_eq!(req.theme.name, "light");
    }

    #[test]
    fn disallowed_identifiers_rejected() {
        for bad in ["__import__('os').system('ls')", "os", "open(x)", "x.real", "eval(x)", "x = 1", "[x]"] {
            assert!(run(expr(bad)).is_err(), "{bad} should be rejected");
        }
        assert!(matches!(
            run(expr("__import__ + x")),
            Err(ValidationError::Expression(ExprError::DisallowedIdentifier { .. }))
        ));
    }

    #[test]
    fn empty_and_long_expressions() {
        assert!(matches!(run(expr("   ")), Err(ValidationError::Expression(ExprError::Empty))));
        let long = "x+".repeat(600) + "x";
        assert!(matches!(run(expr(&long)), Err(ValidationError::ExpressionTooLong { limit: 1000 })));
    }

    #[test]
    fn syntax_errors_pass_the_screen() {
        // parse failures belong to the evaluator stage
        assert_eq!(run(expr("sin(x")).unwrap().expression, "sin(x");
    }

    #[test]
    fn range_checks() {
        let same = RawPlotRequest { x_min: Some(1.0.into()), x_max: Some(1.0.into()), ..Default::default() };
        assert!(matches!(run(same), Err(ValidationError::EmptyRange { .. })));
        let reversed = RawPlotRequest { x_min: Some(2.0.into()), x_max: Some(1.0.into()), ..Default::default() };
        assert!(matches!(run(reversed), Err(ValidationError::EmptyRange { .. })));
        let text = RawPlotRequest { x_min: Some(NumberLike::Text("abc".into())), ..Default::default() };
        assert!(matches!(run(text), Err(ValidationError::NotANumber { field: "xMin", .. })));
        let inf = RawPlotRequest { x_max: Some(NumberLike::Text("inf".into())), ..Default::default() };
        assert!(matches!(run(inf), Err(ValidationError::NotFinite { field: "xMax" })));
        let strings = RawPlotRequest {
            x_min: Some(NumberLike::Text("0".into())),
            x_max: Some(NumberLike::Text(" 6.5 ".into())),
            ..Default::default()
        };
        let req = run(strings).unwrap();
        assert_eq!((req.domain.x_min, req.domain.x_max), (0.0, 6.5));
    }

    #[test]
    fn sample_bounds() {
        let with = |s: NumberLike| RawPlotRequest { samples: Some(s), ..Default::default() };
        assert_eq!(run(with(1.0.into())).unwrap().domain.samples, 1);
        assert_eq!(run(with(10_000.0.into())).unwrap().domain.samples, 10_000);
        assert_eq!(run(with(NumberLike::Text("250".into()))).unwrap().domain.samples, 250);
        for bad in [0.0, -5.0, 2.5, 10_001.0] {
            assert!(matches!(run(with(bad.into())), Err(ValidationError::Samples { .. })), "{bad}");
        }
    }

    #[test]
    fn style_options() {
        let raw = RawPlotRequest {
            color: Some("#ff0000".into()),
            line_width: Some(3.0.into()),
            line_style: Some("--".into()),
            marker: Some("o".into()),
            grid: Some(false),
            theme: Some("Dark".into()),
            title: Some("  Waves ".into()),
            x_label: Some("".into()),
            ..Default::default()
        };
        let req = run(raw).unwrap();
        assert!(req.style.color.is_some());
        assert_eq!(req.style.width, 3.0);
        assert_eq!(req.style.line, LineStyle::Dashed);
        assert_eq!(req.style.marker, Marker::Circle);
        assert!(!req.grid);
        assert_eq!(req.theme.name, "dark");
        assert_eq!(req.title.as_deref(), Some("Waves"));
        assert_eq!(req.x_label, "x");
    }

    #[test]
    fn bad_style_options() {
        let bad_color = RawPlotRequest { color: Some("#12345".into()), ..Default::default() };
        assert!(matches!(run(bad_color), Err(ValidationError::Style(StyleError::Color(_)))));
        let bad_width = RawPlotRequest { line_width: Some(0.0.into()), ..Default::default() };
        assert!(matches!(run(bad_width), Err(ValidationError::LineWidth(_))));
        let bad_marker = RawPlotRequest { marker: Some("*".into()), ..Default::default() };
        assert!(matches!(run(bad_marker), Err(ValidationError::Style(StyleError::Marker(_)))));
        let bad_theme = RawPlotRequest { theme: Some("neon".into()), ..Default::default() };
        assert!(matches!(run(bad_theme), Err(ValidationError::Style(StyleError::Theme(_)))));
    }
}
