// File: crates/plot-core/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.

use skia_safe as skia;

use crate::error::RenderError;
use crate::grid::{format_tick, nice_ticks};
use crate::series::{is_finite_point, Series};
use crate::style::Marker;
use crate::text::{Align, Face, TextShaper};
use crate::theme::Theme;
use crate::types::{Insets, PlotRect, HEIGHT, MAX_EDGE, MIN_EDGE, WIDTH};
use crate::view::{pad_range, visible_y_range};
use crate::Axis;

/// Pixel coordinates are clamped to this band so extreme values stay drawable.
const PX_LIMIT: f32 = 1.0e6;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    pub grid: bool,
    /// Title, axis labels and tick labels. Off gives font-independent output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            grid: true,
            draw_labels: true,
        }
    }
}

pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: Option<String>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            title: None,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn finite_points(&self) -> usize {
        self.series.iter().map(Series::finite_count).sum()
    }

    /// Fit the Y axis to finite points inside the current X range.
    /// Returns false (axis untouched) when there is nothing finite to fit.
    pub fn autoscale_y(&mut self, margin: f64) -> bool {
        match visible_y_range(self, self.x_axis.min, self.x_axis.max) {
            Some((lo, hi)) => {
                let (lo, hi) = pad_range(lo, hi, margin);
                self.y_axis.min = lo;
                self.y_axis.max = hi;
                true
            }
            None => false,
        }
    }

    /// Render the chart to PNG bytes in memory using a CPU raster surface.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>, RenderError> {
        if self.finite_points() == 0 {
            return Err(RenderError::NoRenderableData);
        }
        if !(MIN_EDGE..=MAX_EDGE).contains(&opts.width) || !(MIN_EDGE..=MAX_EDGE).contains(&opts.height) {
            return Err(RenderError::InvalidSize { width: opts.width, height: opts.height });
        }

        // Create raster surface
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or(RenderError::Surface)?;
        let canvas = surface.canvas();
        let theme = &opts.theme;
        let rect = PlotRect::new(opts.width, opts.height, &opts.insets);

        // Background
        canvas.clear(theme.background);

        let (x_ticks, x_step) = nice_ticks(self.x_axis.min, self.x_axis.max, 8);
        let (y_ticks, y_step) = nice_ticks(self.y_axis.min, self.y_axis.max, 6);

        if opts.grid {
            draw_grid(canvas, &rect, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);
        }
        draw_axes(canvas, &rect, &self.x_axis, &self.y_axis, &x_ticks, &y_ticks, theme);

        // Series, clipped to the plot area
        canvas.save();
        canvas.clip_rect(
            skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom),
            skia::ClipOp::Intersect,
            true,
        );
        for s in &self.series {
            draw_line_series(canvas, &rect, &self.x_axis, &self.y_axis, s, theme);
        }
        canvas.restore();

        if opts.draw_labels {
            let shaper = TextShaper::new();
            draw_labels(canvas, &shaper, &rect, self, &x_ticks, x_step, &y_ticks, y_step, theme);
        }

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or(RenderError::Encode)?;
        let bytes = data.as_bytes().to_vec();
        tracing::debug!(
            width = opts.width,
            height = opts.height,
            points = self.finite_points(),
            png_bytes = bytes.len(),
            "rendered chart"
        );
        Ok(bytes)
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<(), RenderError> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

fn sx(rect: &PlotRect, axis: &Axis, x: f64) -> f32 {
    let px = rect.left as f64 + axis.fraction(x) * rect.width() as f64;
    (px as f32).clamp(-PX_LIMIT, PX_LIMIT)
}

fn sy(rect: &PlotRect, axis: &Axis, y: f64) -> f32 {
    let py = rect.bottom as f64 - axis.fraction(y) * rect.height() as f64;
    (py as f32).clamp(-PX_LIMIT, PX_LIMIT)
}

fn draw_grid(
    canvas: &skia::Canvas,
    rect: &PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);
    if let Some(dash) = skia::PathEffect::dash(&[4.0, 4.0], 0.0) {
        paint.set_path_effect(dash);
    }

    // verticals
    for &v in x_ticks {
        let x = sx(rect, x_axis, v);
        canvas.draw_line((x, rect.top), (x, rect.bottom), &paint);
    }
    // horizontals
    for &v in y_ticks {
        let y = sy(rect, y_axis, v);
        canvas.draw_line((rect.left, y), (rect.right, y), &paint);
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    rect: &PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    // frame: bottom and left axis lines
    canvas.draw_line((rect.left, rect.bottom), (rect.right, rect.bottom), &axis_paint);
    canvas.draw_line((rect.left, rect.top), (rect.left, rect.bottom), &axis_paint);

    let mut tick_paint = skia::Paint::default();
    tick_paint.set_color(theme.tick);
    tick_paint.set_anti_alias(true);
    tick_paint.set_stroke_width(1.0);

    for &v in x_ticks {
        let x = sx(rect, x_axis, v);
        canvas.draw_line((x, rect.bottom), (x, rect.bottom + 5.0), &tick_paint);
    }
    for &v in y_ticks {
        let y = sy(rect, y_axis, v);
        canvas.draw_line((rect.left - 5.0, y), (rect.left, y), &tick_paint);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    rect: &PlotRect,
    chart: &Chart,
    x_ticks: &[f64],
    x_step: f64,
    y_ticks: &[f64],
    y_step: f64,
    theme: &Theme,
) {
    for &v in x_ticks {
        let x = sx(rect, &chart.x_axis, v);
        shaper.draw(canvas, &format_tick(v, x_step), x, rect.bottom + 22.0, 12.0, theme.tick, Face::Mono, Align::Center);
    }
    for &v in y_ticks {
        let y = sy(rect, &chart.y_axis, v);
        shaper.draw(canvas, &format_tick(v, y_step), rect.left - 8.0, y + 4.0, 12.0, theme.tick, Face::Mono, Align::End);
    }

    let mid_x = (rect.left + rect.right) * 0.5;
    let mid_y = (rect.top + rect.bottom) * 0.5;
    if !chart.x_axis.label.is_empty() {
        shaper.draw(canvas, &chart.x_axis.label, mid_x, rect.bottom + 50.0, 14.0, theme.axis_label, Face::Sans, Align::Center);
    }
    if !chart.y_axis.label.is_empty() {
        shaper.draw_vertical(canvas, &chart.y_axis.label, (rect.left - 66.0).max(12.0), mid_y, 14.0, theme.axis_label);
    }
    if let Some(title) = chart.title.as_deref().filter(|t| !t.is_empty()) {
        shaper.draw(canvas, title, mid_x, (rect.top - 20.0).max(18.0), 18.0, theme.title, Face::Sans, Align::Center);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    rect: &PlotRect,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    theme: &Theme,
) {
    let style = &series.style;
    let color = style.color.unwrap_or(theme.line_stroke);
    let width = style.width.max(0.1);

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(width);
    stroke.set_stroke_cap(skia::paint::Cap::Round);
    stroke.set_stroke_join(skia::paint::Join::Round);
    stroke.set_color(color);
    if let Some(dash) = style.line.dash_intervals(width).and_then(|iv| skia::PathEffect::dash(&iv, 0.0)) {
        stroke.set_path_effect(dash);
    }

    let mut dot = skia::Paint::default();
    dot.set_anti_alias(true);
    dot.set_style(skia::paint::Style::Fill);
    dot.set_color(color);

    // One sub-path per finite run; a lone point becomes a dot.
    let mut path = skia::Path::new();
    for segment in series.segments() {
        let (x0, y0) = segment[0];
        if segment.len() == 1 {
            canvas.draw_circle((sx(rect, x_axis, x0), sy(rect, y_axis, y0)), width.max(1.5), &dot);
            continue;
        }
        path.move_to((sx(rect, x_axis, x0), sy(rect, y_axis, y0)));
        for &(x, y) in &segment[1..] {
            path.line_to((sx(rect, x_axis, x), sy(rect, y_axis, y)));
        }
    }
    canvas.draw_path(&path, &stroke);

    if style.marker != Marker::None {
        let size = (width * 2.0).max(3.0);
        let mut marker_stroke = skia::Paint::default();
        marker_stroke.set_anti_alias(true);
        marker_stroke.set_style(skia::paint::Style::Stroke);
        marker_stroke.set_stroke_width(width.min(2.0));
        marker_stroke.set_color(color);
        for &(x, y) in series.data_xy.iter().filter(|p| is_finite_point(p)) {
            draw_marker(canvas, style.marker, sx(rect, x_axis, x), sy(rect, y_axis, y), size, &dot, &marker_stroke);
        }
    }
}

fn draw_marker(
    canvas: &skia::Canvas,
    marker: Marker,
    x: f32,
    y: f32,
    size: f32,
    fill: &skia::Paint,
    stroke: &skia::Paint,
) {
    let h = size * 0.5;
    match marker {
        Marker::None => {}
        Marker::Circle => {
            canvas.draw_circle((x, y), h, fill);
        }
        Marker::Point => {
            canvas.draw_circle((x, y), (h * 0.5).max(1.0), fill);
        }
        Marker::Square => {
            canvas.draw_rect(skia::Rect::from_ltrb(x - h, y - h, x + h, y + h), fill);
        }
        Marker::Triangle => {
            let mut tri = skia::Path::new();
            tri.move_to((x, y - h));
            tri.line_to((x + h, y + h));
            tri.line_to((x - h, y + h));
            tri.close();
            canvas.draw_path(&tri, fill);
        }
        Marker::Cross => {
            canvas.draw_line((x - h, y - h), (x + h, y + h), stroke);
            canvas.draw_line((x - h, y + h), (x + h, y - h), stroke);
        }
        Marker::Plus => {
            canvas.draw_line((x - h, y), (x + h, y), stroke);
            canvas.draw_line((x, y - h), (x, y + h), stroke);
        }
    }
}
