//! The bordered container every symbol is drawn in.
//!
//! A [`SymbolShell`] knows its size and selection state and nothing about
//! pins. Its top-left corner is the origin of the frame that pin offsets are
//! measured in.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

/// Appearance shared by every shell in a rendering.
#[derive(Debug, Clone)]
pub struct ShellStyle {
    border: StrokeDefinition,
    fill: Color,
    background: Option<Color>,
    selection: Color,
    corner_radius: f32,
    content_padding: Insets,
}

impl ShellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill drawn behind the shell on the background layer, if any.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    pub fn set_selection_color(&mut self, color: Color) {
        self.selection = color;
    }

    pub fn border(&self) -> &StrokeDefinition {
        &self.border
    }

    pub fn selection_color(&self) -> Color {
        self.selection
    }

    pub fn content_padding(&self) -> Insets {
        self.content_padding
    }
}

impl Default for ShellStyle {
    fn default() -> Self {
        Self {
            border: StrokeDefinition::outline(),
            fill: Color::from_static("white"),
            background: None,
            selection: Color::from_static("#1a73e8"),
            corner_radius: 4.0,
            content_padding: Insets::uniform(6.0),
        }
    }
}

/// A fixed-size shell with an optional selection highlight.
#[derive(Debug, Clone)]
pub struct SymbolShell<'a> {
    style: &'a ShellStyle,
    size: Size,
    selected: bool,
}

impl<'a> SymbolShell<'a> {
    pub fn new(style: &'a ShellStyle, size: Size) -> Self {
        Self {
            style,
            size,
            selected: false,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Area inside the border available to artwork, with the shell centered
    /// on `position`.
    pub fn content_bounds(&self, position: Point) -> Bounds {
        position
            .to_bounds(self.size)
            .inset(self.style.content_padding())
    }
}

impl Drawable for SymbolShell<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let bounds = position.to_bounds(self.size);
        let top_left = bounds.min_point();

        if let Some(background) = self.style.background {
            let padded = bounds.add_padding(Insets::uniform(self.style.corner_radius));
            let backdrop = svg_element::Rectangle::new()
                .set("x", padded.min_x())
                .set("y", padded.min_y())
                .set("width", padded.width())
                .set("height", padded.height())
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(backdrop));
        }

        if self.selected {
            let glow = bounds.add_padding(Insets::uniform(3.0));
            let highlight = svg_element::Rectangle::new()
                .set("x", glow.min_x())
                .set("y", glow.min_y())
                .set("width", glow.width())
                .set("height", glow.height())
                .set("rx", self.style.corner_radius + 3.0)
                .set("fill", "none")
                .set("data-selected", "true");
            let highlight = apply_stroke!(
                highlight,
                &StrokeDefinition::new(self.style.selection.with_alpha(0.6), 3.0)
            );
            output.add_to_layer(RenderLayer::Selection, Box::new(highlight));
        }

        let body = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("rx", self.style.corner_radius)
            .set("fill", self.style.fill.to_string());
        let body = apply_stroke!(body, self.style.border());
        output.add_to_layer(RenderLayer::Shell, Box::new(body));

        output
    }

    fn size(&self) -> Size {
        self.size
    }
}
