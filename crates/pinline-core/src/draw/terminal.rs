//! Terminal anchors: the dot a wire attaches to, and where it sits on an edge.
//!
//! An [`AnchorPlacement`] is what the host diagram engine receives: a physical
//! side plus a 0-100 % offset along it. [`TerminalAnchor`] draws the dot.
//! Invalidation bookkeeping lives with the anchor registry in the `pinline`
//! crate; this module is purely geometric.

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
    identifier::TerminalKey,
    pin::{PinDirection, PinTone},
    side::Side,
};

/// Where a terminal attaches on its shell, as seen by the host engine.
///
/// `percent` runs left-to-right on Top/Bottom and top-to-bottom on
/// Left/Right, always in `[0, 100]`.
///
/// # Examples
///
/// ```
/// use pinline_core::draw::AnchorPlacement;
/// use pinline_core::geometry::Size;
/// use pinline_core::side::Side;
///
/// let placement = AnchorPlacement::midpoint(Side::Right);
/// assert_eq!(placement.percent(), 50.0);
///
/// let point = placement.local_point(Size::new(80.0, 40.0));
/// assert_eq!((point.x(), point.y()), (80.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPlacement {
    side: Side,
    percent: f32,
}

impl AnchorPlacement {
    /// Anchor at the middle of `side`, the default for single-pin sides.
    pub fn midpoint(side: Side) -> Self {
        Self {
            side,
            percent: 50.0,
        }
    }

    /// Anchor at a caller-supplied fraction along `side`, clamped to `[0, 1]`.
    pub fn at_fraction(side: Side, fraction: f32) -> Self {
        Self {
            side,
            percent: fraction.clamp(0.0, 1.0) * 100.0,
        }
    }

    /// Anchor at a pixel `offset` along `side` of a shell of `size`.
    ///
    /// A degenerate side of zero length anchors at its midpoint.
    pub fn from_offset(side: Side, size: Size, offset: f32) -> Self {
        let length = side.length(size);
        if length <= 0.0 {
            return Self::midpoint(side);
        }
        Self::at_fraction(side, offset / length)
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn fraction(&self) -> f32 {
        self.percent / 100.0
    }

    /// Anchor point relative to the shell's top-left corner.
    pub fn local_point(&self, size: Size) -> Point {
        self.side
            .point_at(size, self.side.length(size) * self.fraction())
    }
}

/// Shared appearance of terminal dots.
#[derive(Debug, Clone)]
pub struct TerminalStyle {
    radius: f32,
    stroke: StrokeDefinition,
}

impl TerminalStyle {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }
}

impl Default for TerminalStyle {
    fn default() -> Self {
        Self {
            radius: 3.5,
            stroke: StrokeDefinition::new(Color::from_static("white"), 1.0),
        }
    }
}

/// A single terminal dot.
///
/// Source and Target terminals look the same; the direction is only written
/// as a data attribute for the host engine. Two anchors may be rendered at
/// the same point to expose a bidirectional junction.
#[derive(Debug, Clone)]
pub struct TerminalAnchor<'a> {
    style: &'a TerminalStyle,
    tone: PinTone,
    key: Option<TerminalKey>,
    direction: Option<PinDirection>,
    placement: Option<AnchorPlacement>,
}

impl<'a> TerminalAnchor<'a> {
    pub fn new(style: &'a TerminalStyle) -> Self {
        Self {
            style,
            tone: PinTone::default(),
            key: None,
            direction: None,
            placement: None,
        }
    }

    pub fn with_tone(mut self, tone: PinTone) -> Self {
        self.tone = tone;
        self
    }

    /// Tags the dot with its `(node, pin)` key and wire direction.
    pub fn with_terminal(mut self, key: TerminalKey, direction: PinDirection) -> Self {
        self.key = Some(key);
        self.direction = Some(direction);
        self
    }

    pub fn with_placement(mut self, placement: AnchorPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn key(&self) -> Option<TerminalKey> {
        self.key
    }
}

impl Drawable for TerminalAnchor<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let dot = svg_element::Circle::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", self.style.radius())
            .set("fill", self.tone.color().to_string());
        let mut dot = apply_stroke!(dot, self.style.stroke());

        if let Some(key) = self.key {
            dot = dot.set("data-terminal", key.to_string());
        }
        if let Some(direction) = self.direction {
            dot = dot.set("data-direction", direction.name());
        }
        if let Some(placement) = self.placement {
            dot = dot
                .set("data-side", placement.side().name())
                .set("data-percent", format!("{:.1}", placement.percent()));
        }

        output.add_to_layer(RenderLayer::Terminal, Box::new(dot));
        output
    }

    fn size(&self) -> Size {
        let diameter = self.style.radius() * 2.0;
        Size::new(diameter, diameter)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::identifier::Id;

    #[test]
    fn test_midpoint_of_each_side() {
        let size = Size::new(100.0, 60.0);
        let top = AnchorPlacement::midpoint(Side::Top).local_point(size);
        let left = AnchorPlacement::midpoint(Side::Left).local_point(size);
        let bottom = AnchorPlacement::midpoint(Side::Bottom).local_point(size);

        assert_eq!(top, Point::new(50.0, 0.0));
        assert_eq!(left, Point::new(0.0, 30.0));
        assert_eq!(bottom, Point::new(50.0, 60.0));
    }

    #[test]
    fn test_from_offset_converts_to_percent() {
        let size = Size::new(100.0, 80.0);
        let placement = AnchorPlacement::from_offset(Side::Left, size, 20.0);
        assert_approx_eq!(f32, placement.percent(), 25.0);
        assert_eq!(placement.local_point(size), Point::new(0.0, 20.0));
    }

    #[test]
    fn test_fraction_is_clamped() {
        assert_approx_eq!(f32, AnchorPlacement::at_fraction(Side::Top, 1.7).percent(), 100.0);
        assert_approx_eq!(f32, AnchorPlacement::at_fraction(Side::Top, -0.2).percent(), 0.0);
    }

    #[test]
    fn test_zero_length_side_anchors_at_midpoint() {
        let placement = AnchorPlacement::from_offset(Side::Top, Size::new(0.0, 10.0), 5.0);
        assert_approx_eq!(f32, placement.percent(), 50.0);
    }

    #[test]
    fn test_anchor_renders_terminal_attributes() {
        let style = TerminalStyle::new(4.0);
        let key = TerminalKey::new(Id::new("relay_1"), Id::new("86"));
        let anchor = TerminalAnchor::new(&style)
            .with_tone(PinTone::Power)
            .with_terminal(key, PinDirection::Target)
            .with_placement(AnchorPlacement::midpoint(Side::Left));

        let output = anchor.render_to_layers(Point::new(0.0, 20.0));
        assert_eq!(output.count_in_layer(RenderLayer::Terminal), 1);

        let rendered = output.render()[0].to_string();
        assert!(rendered.contains("data-terminal=\"relay_1::86\""));
        assert!(rendered.contains("data-direction=\"target\""));
        assert!(rendered.contains("data-side=\"left\""));
        assert!(rendered.contains("data-percent=\"50.0\""));
        assert!(rendered.contains("r=\"4\""));
    }

    #[test]
    fn test_size_is_diameter() {
        let style = TerminalStyle::new(3.0);
        let size = TerminalAnchor::new(&style).size();
        assert_approx_eq!(f32, size.width(), 6.0);
        assert_approx_eq!(f32, size.height(), 6.0);
    }
}
