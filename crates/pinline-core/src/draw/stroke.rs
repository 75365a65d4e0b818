//! Stroke definitions for symbol outlines, conductors and glyphs.
//!
//! Symbol artwork uses a handful of line styles: solid conductors, dashed
//! mechanical linkages (relay armatures, potentiometer wipers) and dotted
//! selection outlines. [`StrokeDefinition`] carries the attributes and
//! [`apply_stroke!`](crate::apply_stroke!) writes them onto an SVG element.
//!
//! ```
//! use pinline_core::color::Color;
//! use pinline_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::conductor(Color::from_static("#202124"));
//! let line = svg_element::Line::new().set("x1", 0).set("x2", 10);
//! let line = pinline_core::apply_stroke!(line, &stroke);
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Dash pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// Mechanical linkage, e.g. the coil-to-contact line of a relay.
    Dashed,
    Dotted,
    /// Raw SVG dasharray, e.g. `"6,2"`.
    Custom(String),
}

impl StrokeStyle {
    /// Returns the `stroke-dasharray` value, or `None` for solid lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("4,3".to_string()),
            Self::Dotted => Some("1.5,2.5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            pattern if pattern.chars().all(|c| c.is_ascii_digit() || ".,".contains(c)) => {
                Ok(Self::Custom(pattern.to_string()))
            }
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted or a dasharray"
            )),
        }
    }
}

/// Line endpoint rendering, mapped to `stroke-linecap`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Color, width, dash pattern and cap of a line.
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Stroke used for the symbol shell border.
    pub fn outline() -> Self {
        Self::new(Color::from_static("#3c4043"), 1.5)
    }

    /// Stroke used for conductors inside symbol artwork.
    pub fn conductor(color: Color) -> Self {
        let mut stroke = Self::new(color, 2.0);
        stroke.set_cap(StrokeCap::Round);
        stroke
    }

    /// Dashed stroke for mechanical linkages.
    pub fn linkage(color: Color) -> Self {
        let mut stroke = Self::new(color, 1.0);
        stroke.set_style(StrokeStyle::Dashed);
        stroke
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    pub fn set_cap(&mut self, cap: StrokeCap) {
        self.cap = cap;
    }

    /// Returns a copy drawn in `color`.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
            style: StrokeStyle::default(),
            cap: StrokeCap::default(),
        }
    }
}

/// Writes every stroke attribute of a [`StrokeDefinition`] onto an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
            .set("stroke-linecap", $stroke.cap().to_svg_value());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
