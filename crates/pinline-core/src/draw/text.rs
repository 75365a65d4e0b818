//! Pin labels, titles and live readouts.
//!
//! Text is measured with cosmic-text against the system font database so the
//! renderer can size the SVG viewport to include labels that hang outside the
//! shell. The font system is expensive to build and is created once, on first
//! measurement.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::info;
use svg::node::{Text as SvgText, element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Bounds, Point, Size},
};

/// Horizontal alignment of text relative to its position, mapped to
/// SVG `text-anchor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position and grows to the right.
    Start,
    #[default]
    Middle,
    /// Text ends at the position.
    End,
}

impl TextAnchor {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }

    /// Returns the mirrored anchor, used when a label sits on the opposite edge.
    pub fn flipped(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::Middle => Self::Middle,
            Self::End => Self::Start,
        }
    }
}

/// Font and color of a piece of text.
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
    anchor: TextAnchor,
    layer: RenderLayer,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style for readouts: monospace, drawn on the readout layer.
    pub fn readout(font_size: u16) -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size,
            color: Some(Color::from_static("#188038")),
            anchor: TextAnchor::Middle,
            layer: RenderLayer::Readout,
        }
    }

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Returns a copy aligned with `anchor`.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 11,
            color: None,
            anchor: TextAnchor::Middle,
            layer: RenderLayer::Text,
        }
    }
}

/// Single-line text bound to a [`TextDefinition`].
///
/// The render position is the anchor point on the vertical center line of
/// the text; whether it marks the start, middle or end depends on the
/// definition's [`TextAnchor`].
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &str {
        self.content
    }

    /// Bounds occupied by this text when rendered at `position`.
    pub fn bounds_at(&self, position: Point) -> Bounds {
        let size = self.size();
        let center_x = match self.definition.anchor() {
            TextAnchor::Start => position.x() + size.width() / 2.0,
            TextAnchor::Middle => position.x(),
            TextAnchor::End => position.x() - size.width() / 2.0,
        };
        Bounds::new_from_center(position.with_x(center_x), size)
    }
}

impl Drawable for Text<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.content.is_empty() {
            return output;
        }

        let mut text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", self.definition.anchor().to_svg_value())
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size())
            .add(SvgText::new(self.content));

        if let Some(color) = self.definition.color() {
            text = text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        output.add_to_layer(self.definition.layer, Box::new(text));
        output
    }

    fn size(&self) -> Size {
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure(self.content, self.definition)
    }
}

/// Owns the shared cosmic-text font system.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures `text` in pixels. Falls back to an average glyph width when
    /// shaping produces no runs, e.g. when no system fonts are installed.
    fn measure(&self, text: &str, definition: &TextDefinition) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let font_size_px = f32::from(definition.font_size()) * 1.33;
        let metrics = Metrics::new(font_size_px, font_size_px * 1.15);

        let Ok(mut font_system) = self.font_system.lock() else {
            return Self::estimate(text, metrics);
        };
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(definition.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                width = width.max(last.x + last.w);
            }
            height += metrics.line_height;
        }

        if height == 0.0 {
            return Self::estimate(text, metrics);
        }
        Size::new(width, height)
    }

    fn estimate(text: &str, metrics: Metrics) -> Size {
        Size::new(
            text.chars().count() as f32 * metrics.font_size * 0.55,
            metrics.line_height,
        )
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
