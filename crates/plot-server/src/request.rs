// File: crates/plot-server/src/request.rs
// Summary: Raw JSON request body as received; every field optional, numbers may arrive as strings.

use serde::Deserialize;

/// A JSON number, or a string holding one (`"6.28"`, `" 100 "`).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Num(f64),
    Text(String),
}

impl NumberLike {
    /// `None` when the text does not parse as a number.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NumberLike::Num(v) => Some(*v),
            NumberLike::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for NumberLike {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberLike::Num(v) => write!(f, "{v}"),
            NumberLike::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for NumberLike {
    fn from(v: f64) -> Self {
        NumberLike::Num(v)
    }
}

/// Request body before validation. Missing and `null` fields both mean "use the default";
/// unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlotRequest {
    pub expression: Option<String>,
    pub x_min: Option<NumberLike>,
    pub x_max: Option<NumberLike>,
    pub samples: Option<NumberLike>,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub color: Option<String>,
    pub line_width: Option<NumberLike>,
    pub line_style: Option<String>,
    pub marker: Option<String>,
    pub grid: Option<bool>,
    pub theme: Option<String>,
}

impl RawPlotRequest {
    /// Decode a request body. An empty body or a bare `null` is the all-defaults request.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let parsed: Option<Self> = serde_json::from_slice(body)?;
        Ok(parsed.unwrap_or_default())
    }
}
