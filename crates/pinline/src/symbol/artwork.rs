//! Small SVG helpers shared by the symbol catalogue.

use svg::node::element as svg_element;

use pinline_core::{
    apply_stroke,
    color::Color,
    draw::{StrokeDefinition, SvgNode},
    geometry::{Bounds, Point},
};

/// Distance between a terminal and its readout.
pub(super) const READOUT_GAP: f32 = 6.0;

pub(super) fn idle() -> Color {
    Color::from_static("#5f6368")
}

pub(super) fn active() -> Color {
    Color::from_static("#f9ab00")
}

pub(super) fn fault() -> Color {
    Color::from_static("#d93025")
}

/// Stroke for the symbol body, brighter when `on`.
pub(super) fn body_stroke(on: bool) -> StrokeDefinition {
    StrokeDefinition::conductor(if on { active() } else { idle() })
}

pub(super) fn line(from: Point, to: Point, stroke: &StrokeDefinition) -> SvgNode {
    let line = svg_element::Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y());
    Box::new(apply_stroke!(line, stroke))
}

/// Open polyline through `points`, or a closed filled polygon when `fill` is set.
pub(super) fn path(points: &[Point], stroke: &StrokeDefinition, fill: Option<Color>) -> SvgNode {
    let mut data = svg_element::path::Data::new();
    for (index, point) in points.iter().enumerate() {
        data = if index == 0 {
            data.move_to((point.x(), point.y()))
        } else {
            data.line_to((point.x(), point.y()))
        };
    }

    let path = match fill {
        Some(color) => svg_element::Path::new()
            .set("d", data.close())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha()),
        None => svg_element::Path::new().set("d", data).set("fill", "none"),
    };
    Box::new(apply_stroke!(path, stroke))
}

pub(super) fn circle(
    center: Point,
    radius: f32,
    stroke: &StrokeDefinition,
    fill: Option<Color>,
) -> SvgNode {
    let circle = svg_element::Circle::new()
        .set("cx", center.x())
        .set("cy", center.y())
        .set("r", radius)
        .set("fill", fill.map_or_else(|| "none".to_string(), |color| color.to_string()));
    Box::new(apply_stroke!(circle, stroke))
}

pub(super) fn rect(bounds: Bounds, stroke: &StrokeDefinition, fill: Option<Color>) -> SvgNode {
    let rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("fill", fill.map_or_else(|| "none".to_string(), |color| color.to_string()));
    Box::new(apply_stroke!(rect, stroke))
}

/// Soft halo behind a component that is energized, lit or running.
pub(super) fn glow(center: Point, radius: f32, color: Color) -> SvgNode {
    Box::new(
        svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius)
            .set("fill", color.to_string())
            .set("fill-opacity", 0.25)
            .set("data-glow", "true"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_closes_only_when_filled() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)];
        let stroke = StrokeDefinition::outline();

        let open = path(&points, &stroke, None).to_string();
        let closed = path(&points, &stroke, Some(fault())).to_string();

        assert!(open.contains("fill=\"none\""));
        assert!(!open.contains('z'));
        assert!(closed.contains('z'));
    }

    #[test]
    fn test_glow_is_tagged() {
        let rendered = glow(Point::new(10.0, 10.0), 12.0, active()).to_string();
        assert!(rendered.contains("data-glow=\"true\""));
    }
}
