// File: crates/plot-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1200;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 720;
/// Smallest accepted surface edge.
pub const MIN_EDGE: i32 = 64;
/// Largest accepted surface edge.
pub const MAX_EDGE: i32 = 4096;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(88, 32, 56, 72)
    }
}

/// Plot area in pixels, derived from the surface size and insets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotRect {
    /// Shrinks insets proportionally when they do not fit the surface.
    pub fn new(width: i32, height: i32, insets: &Insets) -> Self {
        let (w, h) = (width.max(1) as f32, height.max(1) as f32);
        let fit = |a: u32, b: u32, edge: f32| -> (f32, f32) {
            let sum = (a + b) as f32;
            let room = edge * 0.8;
            if sum <= room || sum == 0.0 {
                (a as f32, b as f32)
            } else {
                (a as f32 * room / sum, b as f32 * room / sum)
            }
        };
        let (l, r) = fit(insets.left, insets.right, w);
        let (t, b) = fit(insets.top, insets.bottom, h);
        Self { left: l, top: t, right: w - r, bottom: h - b }
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
}
