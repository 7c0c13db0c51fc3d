// File: crates/plot-core/src/text.rs
// Summary: Label drawing on top of Skia textlayout: anchored horizontal text and a rotated Y label.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

/// Horizontal anchor of a label relative to its x coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Center,
    End,
}

/// Font family group. `Mono` keeps tick numbers column-aligned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Sans,
    Mono,
}

impl Face {
    fn families(self) -> &'static [&'static str] {
        match self {
            Face::Sans => &["DejaVu Sans", "Helvetica", "Arial", "Roboto", "Segoe UI", "sans-serif"],
            Face::Mono => &["DejaVu Sans Mono", "Roboto Mono", "Menlo", "Consolas", "monospace"],
        }
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts }
    }

    fn paragraph(&self, text: &str, size: f32, color: skia::Color, face: Face) -> Paragraph {
        let mut style = TextStyle::new();
        style.set_font_size(size.max(1.0));
        style.set_color(color);
        style.set_font_families(face.families());

        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Draw one line of text with its approximate baseline at `y`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        face: Face,
        align: Align,
    ) {
        let p = self.paragraph(text, size, color, face);
        let w = p.longest_line();
        let left = match align {
            Align::Center => x - w * 0.5,
            Align::End => x - w,
        };
        // paragraphs paint from their top-left corner
        p.paint(canvas, (left, y - size * 0.8));
    }

    /// Rotated 90 degrees counter-clockwise, centered on (cx, cy).
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color) {
        canvas.save();
        canvas.rotate(-90.0, Some(skia::Point::new(cx, cy)));
        self.draw(canvas, text, cx, cy + size * 0.4, size, color, Face::Sans, Align::Center);
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
