// File: crates/plot-core/src/series.rs
// Summary: Line series model with per-series styling and gap-aware segmentation.
// Notes:
// - Points with a non-finite coordinate are kept in `data_xy`; they split the
//   line into segments instead of being interpolated across.

use skia_safe as skia;

use crate::style::{LineStyle, Marker};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesStyle {
    /// `None` uses the theme's line color.
    pub color: Option<skia::Color>,
    pub width: f32,
    pub line: LineStyle,
    pub marker: Marker,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self { color: None, width: 2.0, line: LineStyle::Solid, marker: Marker::None }
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub data_xy: Vec<(f64, f64)>,
    pub style: SeriesStyle,
}

#[inline]
pub(crate) fn is_finite_point(&(x, y): &(f64, f64)) -> bool {
    x.is_finite() && y.is_finite()
}

impl Series {
    pub fn with_data(data: Vec<(f64, f64)>) -> Self {
        Self { data_xy: data, style: SeriesStyle::default() }
    }

    pub fn with_style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }

    /// Maximal runs of consecutive finite points.
    pub fn segments(&self) -> impl Iterator<Item = &[(f64, f64)]> + '_ {
        self.data_xy
            .split(|p| !is_finite_point(p))
            .filter(|run| !run.is_empty())
    }

    pub fn finite_count(&self) -> usize {
        self.data_xy.iter().filter(|p| is_finite_point(p)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_split_on_non_finite() {
        let s = Series::with_data(vec![
            (0.0, f64::NAN),
            (1.0, 1.0),
            (2.0, 2.0),
            (3.0, f64::INFINITY),
            (4.0, 4.0),
            (5.0, f64::NEG_INFINITY),
            (6.0, f64::NAN),
        ]);
        let segs: Vec<_> = s.segments().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0], &[(1.0, 1.0), (2.0, 2.0)]);
        assert_eq!(segs[1], &[(4.0, 4.0)]);
        assert_eq!(s.finite_count(), 3);
    }

    #[test]
    fn all_finite_is_one_segment() {
        let s = Series::with_data(vec![(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(s.segments().count(), 1);
    }
}
