// File: crates/plot-core/src/grid.rs
// Summary: Tick layout helpers: "nice" 1/2/5 steps and compact label formatting.

/// Upper bound on ticks per axis, whatever the range.
const MAX_TICKS: usize = 50;

/// Round `raw` to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let exp = raw.log10().floor();
    let base = 10f64.powf(exp);
    let f = raw / base;
    let nice = if f < 1.5 {
        1.0
    } else if f < 3.0 {
        2.0
    } else if f < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick positions inside `[min, max]` spaced by a nice step, roughly `target` of them.
/// Returns the ticks and the step used.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    // halved ends keep the width finite for ranges near +-f64::MAX
    let half = max * 0.5 - min * 0.5;
    if !half.is_finite() || half <= 0.0 || target == 0 {
        return (Vec::new(), 1.0);
    }
    let step = nice_step(half / target as f64 * 2.0);
    let first = (min / step).ceil() * step;
    let eps = step * 1e-9;
    let ticks = (0..MAX_TICKS)
        .map(|i| first + step * i as f64)
        .take_while(|v| *v <= max + eps)
        .map(|v| if v.abs() < eps { 0.0 } else { v })
        .collect();
    (ticks, step)
}

/// Format a tick value with just enough decimals for `step`.
pub fn format_tick(v: f64, step: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let mag = v.abs();
    if mag >= 1e6 || mag < 1e-4 {
        return format!("{v:.2e}");
    }
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).clamp(0.0, 10.0) as usize
    } else {
        2
    };
    format!("{v:.decimals$}")
}
