// File: crates/plot-expr/src/sample.rs
// Summary: Evenly spaced sampling of an expression over [x_min, x_max].

use crate::ast::Expr;

/// Sampling domain. Callers validate `x_min < x_max` and `samples > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub samples: usize,
}

/// `steps` evenly spaced values from `start` to `end`, both inclusive.
/// One step yields just `start`; the last value is exactly `end`.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            // interpolate per point; `end - start` may overflow
            let last = (steps - 1) as f64;
            let mut out: Vec<f64> = (0..steps)
                .map(|i| {
                    let t = i as f64 / last;
                    start * (1.0 - t) + end * t
                })
                .collect();
            out[steps - 1] = end;
            out
        }
    }
}

/// Ordered (x, y) pairs. Non-finite y values are kept; the renderer breaks the line there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampledCurve {
    points: Vec<(f64, f64)>,
}

impl SampledCurve {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn finite_count(&self) -> usize {
        self.points.iter().filter(|(_, y)| y.is_finite()).count()
    }
}

/// Evaluate `expr` once per sample point.
pub fn sample(expr: &Expr, domain: &Domain) -> SampledCurve {
    let points = linspace(domain.x_min, domain.x_max, domain.samples)
        .into_iter()
        .map(|x| (x, expr.eval(x)))
        .collect();
    SampledCurve::new(points)
}
