//! A terminal with its caption.
//!
//! The caption is placed inside the shell, on the far side of the dot from the
//! edge: to the right of a Left terminal, to the left of a Right terminal,
//! below a Top terminal and above a Bottom one. Alignment is derived from the
//! *physical* side, so a mirrored symbol never draws a caption over its dot.

use crate::{
    draw::{Drawable, LayeredOutput, TerminalAnchor, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Point, Size},
    side::Side,
};

/// Distance between a row's dot center and its caption.
const CAPTION_GAP: f32 = 8.0;

/// Caption anchor point and alignment for a terminal at `terminal` on `side`.
///
/// `gap` is the distance between the dot center and the caption.
///
/// # Examples
///
/// ```
/// use pinline_core::draw::{TextAnchor, caption_placement};
/// use pinline_core::geometry::Point;
/// use pinline_core::side::Side;
///
/// let (point, anchor) = caption_placement(Side::Right, Point::new(100.0, 20.0), 8.0);
/// assert_eq!(anchor, TextAnchor::End);
/// assert_eq!(point.x(), 92.0);
/// ```
pub fn caption_placement(side: Side, terminal: Point, gap: f32) -> (Point, TextAnchor) {
    let inward = side.opposite().outward();
    let point = Point::new(
        terminal.x() + inward.x() * gap,
        terminal.y() + inward.y() * gap,
    );
    let anchor = match side {
        Side::Left => TextAnchor::Start,
        Side::Right => TextAnchor::Start.flipped(),
        Side::Top | Side::Bottom => TextAnchor::Middle,
    };
    (point, anchor)
}

/// A labelled terminal on one physical side.
#[derive(Debug, Clone)]
pub struct PinRow<'a> {
    terminal: TerminalAnchor<'a>,
    caption: &'a str,
    caption_definition: TextDefinition,
    side: Side,
}

impl<'a> PinRow<'a> {
    /// Builds a row on physical `side`; the caption alignment is taken from
    /// [`caption_placement`], everything else from `base`.
    pub fn new(
        terminal: TerminalAnchor<'a>,
        caption: &'a str,
        base: &TextDefinition,
        side: Side,
    ) -> Self {
        let (_, anchor) = caption_placement(side, Point::default(), 0.0);
        Self {
            terminal,
            caption,
            caption_definition: base.clone().with_anchor(anchor),
            side,
        }
    }

    fn caption_at(&self, position: Point) -> (Text<'_>, Point) {
        let (point, _) = caption_placement(self.side, position, CAPTION_GAP);
        (Text::new(&self.caption_definition, self.caption), point)
    }

    /// Bounds of dot and caption when the terminal sits at `position`.
    pub fn bounds_at(&self, position: Point) -> Bounds {
        let dot = position.to_bounds(self.terminal.size());
        if self.caption.is_empty() {
            return dot;
        }
        let (text, point) = self.caption_at(position);
        dot.merge(&text.bounds_at(point))
    }
}

impl Drawable for PinRow<'_> {
    /// Renders with `position` as the terminal dot center.
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = self.terminal.render_to_layers(position);
        let (text, point) = self.caption_at(position);
        output.merge(text.render_to_layers(point));
        output
    }

    fn size(&self) -> Size {
        self.bounds_at(Point::default()).to_size()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{RenderLayer, TerminalStyle};

    #[test]
    fn test_caption_alignment_per_side() {
        let origin = Point::new(50.0, 50.0);
        assert_eq!(caption_placement(Side::Left, origin, 6.0).1, TextAnchor::Start);
        assert_eq!(caption_placement(Side::Right, origin, 6.0).1, TextAnchor::End);
        assert_eq!(caption_placement(Side::Top, origin, 6.0).1, TextAnchor::Middle);
        assert_eq!(caption_placement(Side::Bottom, origin, 6.0).1, TextAnchor::Middle);
    }

    #[test]
    fn test_caption_moves_inward() {
        let origin = Point::new(50.0, 50.0);
        let (left, _) = caption_placement(Side::Left, origin, 6.0);
        let (top, _) = caption_placement(Side::Top, origin, 6.0);
        let (bottom, _) = caption_placement(Side::Bottom, origin, 6.0);

        assert_approx_eq!(f32, left.x(), 56.0);
        assert_approx_eq!(f32, top.y(), 56.0);
        assert_approx_eq!(f32, bottom.y(), 44.0);
    }

    #[test]
    fn test_right_row_caption_ends_before_terminal() {
        let style = TerminalStyle::default();
        let base = TextDefinition::default();
        let row = PinRow::new(TerminalAnchor::new(&style), "OUT", &base, Side::Right);

        let terminal = Point::new(120.0, 30.0);
        let bounds = row.bounds_at(terminal);
        assert!(bounds.min_x() < terminal.x());
        assert_approx_eq!(f32, bounds.max_x(), terminal.x() + style.radius());
    }

    #[test]
    fn test_render_emits_terminal_and_caption() {
        let style = TerminalStyle::default();
        let base = TextDefinition::default();
        let row = PinRow::new(TerminalAnchor::new(&style), "86", &base, Side::Left);

        let output = row.render_to_layers(Point::new(0.0, 20.0));
        assert_eq!(output.count_in_layer(RenderLayer::Terminal), 1);
        assert_eq!(output.count_in_layer(RenderLayer::Text), 1);
    }

    #[test]
    fn test_empty_caption_renders_only_terminal() {
        let style = TerminalStyle::default();
        let base = TextDefinition::default();
        let row = PinRow::new(TerminalAnchor::new(&style), "", &base, Side::Top);

        let output = row.render_to_layers(Point::new(10.0, 0.0));
        assert_eq!(output.count_in_layer(RenderLayer::Text), 0);
        assert!(row.size().width() > 0.0);
    }
}
