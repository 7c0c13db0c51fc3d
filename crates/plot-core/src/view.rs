// File: crates/plot-core/src/view.rs
// Summary: Y autoscale helpers. Only finite points count.

use crate::series::is_finite_point;
use crate::Chart;

/// Widen `[lo, hi]` by `margin * span` on each side. A flat range becomes one unit wide.
pub fn pad_range(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    // half-width so that `hi - lo` cannot overflow
    let half = hi * 0.5 - lo * 0.5;
    if half <= f64::EPSILON * lo.abs().max(hi.abs()) {
        return (lo - 0.5, hi + 0.5);
    }
    let m = half * (2.0 * margin);
    if !m.is_finite() || !(lo - m).is_finite() || !(hi + m).is_finite() {
        return (lo, hi);
    }
    (lo - m, hi + m)
}

/// Min/max of finite Y values whose X lies in `[x_min, x_max]`.
pub fn visible_y_range(chart: &Chart, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut any = false;
    for s in &chart.series {
        for &(x, y) in &s.data_xy {
            if is_finite_point(&(x, y)) && x >= x_min && x <= x_max {
                y_min = y_min.min(y);
                y_max = y_max.max(y);
                any = true;
            }
        }
    }
    if any { Some((y_min, y_max)) } else { None }
}
