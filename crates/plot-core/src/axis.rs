// File: crates/plot-core/src/axis.rs
// Summary: Axis model with labels and ranges, plus the linear value-to-pixel mapping.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self {
        Self::new("x", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("f(x)", 0.0, 1.0)
    }

    /// Fraction of the way from `min` to `max` (0 at `min`, 1 at `max`).
    /// Both ends are halved first so ranges wider than `f64::MAX` still map;
    /// an empty range puts everything at 0.5.
    #[inline]
    pub fn fraction(&self, v: f64) -> f64 {
        let half = self.max * 0.5 - self.min * 0.5;
        if half.is_finite() && half > 0.0 {
            (v * 0.5 - self.min * 0.5) / half
        } else {
            0.5
        }
    }
}
