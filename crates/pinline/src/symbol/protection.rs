//! Circuit protection.

use serde::Deserialize;

use pinline_core::{
    draw::SvgNode,
    geometry::{Bounds, Point, Size},
    pin::LogicalPin,
    side::Side,
};

use super::{Symbol, SymbolContext, SymbolKind, artwork, positive_or};
use crate::layout::SymbolSizing;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuseParams {
    /// Rated trip current in amperes.
    pub trip_current: f32,
}

impl Default for FuseParams {
    fn default() -> Self {
        Self { trip_current: 10.0 }
    }
}

impl FuseParams {
    pub fn normalized(self) -> Self {
        Self {
            trip_current: positive_or(
                self.trip_current,
                Self::default().trip_current,
                "trip_current",
            ),
        }
    }
}

/// Blade fuse. Shows a broken element while the solver reports it `blown`.
#[derive(Debug, Clone)]
pub struct Fuse {
    trip_current: f32,
}

impl Fuse {
    pub fn new(params: FuseParams) -> Self {
        Self {
            trip_current: params.normalized().trip_current,
        }
    }

    pub fn trip_current(&self) -> f32 {
        self.trip_current
    }
}

impl Symbol for Fuse {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Fuse
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("in", Side::Left),
            LogicalPin::source("out", Side::Right),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(60.0, 24.0))
    }

    fn title(&self) -> Option<String> {
        Some(format!("{} A", self.trip_current))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let size = ctx.size();
        let center = ctx.center();
        let blown = ctx.state().flag("blown");
        let body = Bounds::new_from_center(center, Size::new(30.0, 12.0));
        let stroke = artwork::body_stroke(false);

        let mut nodes = vec![
            artwork::line(
                Point::new(0.0, center.y()),
                Point::new(body.min_x(), center.y()),
                &stroke,
            ),
            artwork::line(
                Point::new(body.max_x(), center.y()),
                Point::new(size.width(), center.y()),
                &stroke,
            ),
            artwork::rect(body, &stroke, None),
        ];

        if blown {
            let element = artwork::body_stroke(false).with_color(artwork::fault());
            nodes.push(artwork::line(
                Point::new(body.min_x(), center.y()),
                Point::new(center.x() - 4.0, center.y() - 3.0),
                &element,
            ));
            nodes.push(artwork::line(
                Point::new(center.x() + 4.0, center.y() + 3.0),
                Point::new(body.max_x(), center.y()),
                &element,
            ));
        } else {
            nodes.push(artwork::line(
                Point::new(body.min_x(), center.y()),
                Point::new(body.max_x(), center.y()),
                &stroke,
            ));
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_trip_current_defaults_when_invalid() {
        assert_approx_eq!(f32, Fuse::new(FuseParams { trip_current: 0.0 }).trip_current(), 10.0);
        assert_approx_eq!(f32, Fuse::new(FuseParams { trip_current: 7.5 }).trip_current(), 7.5);
    }

    #[test]
    fn test_title_shows_rating() {
        assert_eq!(Fuse::new(FuseParams::default()).title().as_deref(), Some("10 A"));
    }
}
