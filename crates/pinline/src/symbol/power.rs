//! Supply and return symbols.

use log::warn;
use serde::Deserialize;
use svg::node::element as svg_element;

use pinline_core::{
    draw::SvgNode,
    geometry::{Point, Size},
    pin::{LogicalPin, PinTone},
    side::Side,
};

use super::{Symbol, SymbolContext, SymbolKind, artwork, positive_or};
use crate::layout::SymbolSizing;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryParams {
    pub voltage: f32,
}

impl Default for BatteryParams {
    fn default() -> Self {
        Self { voltage: 12.0 }
    }
}

impl BatteryParams {
    pub fn normalized(self) -> Self {
        Self {
            voltage: positive_or(self.voltage, Self::default().voltage, "voltage"),
        }
    }
}

/// Single cell battery, positive terminal on top.
#[derive(Debug, Clone)]
pub struct Battery {
    voltage: f32,
}

impl Battery {
    pub fn new(params: BatteryParams) -> Self {
        let params = params.normalized();
        Self {
            voltage: params.voltage,
        }
    }

    pub fn voltage(&self) -> f32 {
        self.voltage
    }
}

impl Symbol for Battery {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Battery
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::source("pos", Side::Top)
                .with_label("+")
                .with_tone(PinTone::Power),
            LogicalPin::source("neg", Side::Bottom)
                .with_label("-")
                .with_tone(PinTone::Ground),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(40.0, 60.0))
    }

    fn title(&self) -> Option<String> {
        Some(format!("{:.1} V", self.voltage))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let size = ctx.size();
        let center = ctx.center();
        let stroke = artwork::body_stroke(false);
        let long_plate = center.y() - 4.0;
        let short_plate = center.y() + 4.0;

        vec![
            artwork::line(Point::new(center.x(), 0.0), Point::new(center.x(), long_plate), &stroke),
            artwork::line(
                Point::new(center.x() - 12.0, long_plate),
                Point::new(center.x() + 12.0, long_plate),
                &stroke,
            ),
            artwork::line(
                Point::new(center.x() - 6.0, short_plate),
                Point::new(center.x() + 6.0, short_plate),
                &stroke,
            ),
            artwork::line(
                Point::new(center.x(), short_plate),
                Point::new(center.x(), size.height()),
                &stroke,
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroundParams {
    /// Clockwise rotation in degrees, a multiple of 90.
    pub rotation: i32,
}

impl GroundParams {
    pub fn normalized(self) -> Self {
        let rotation = self.rotation.rem_euclid(360);
        if rotation % 90 != 0 {
            warn!(parameter = "rotation", value = self.rotation; "Unsupported rotation, using 0");
            return Self { rotation: 0 };
        }
        Self { rotation }
    }
}

/// Chassis ground. Its single terminal may be rotated to any side.
#[derive(Debug, Clone)]
pub struct Ground {
    rotation: i32,
}

impl Ground {
    pub fn new(params: GroundParams) -> Self {
        Self {
            rotation: params.normalized().rotation,
        }
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }
}

impl Symbol for Ground {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Ground
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("gnd", Side::Top)
                .with_tone(PinTone::Ground)
                .with_rotation(self.rotation),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(30.0, 30.0))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let center = ctx.center();
        let stroke = artwork::body_stroke(false);
        let bar = |y: f32, half: f32| {
            artwork::line(
                Point::new(center.x() - half, y),
                Point::new(center.x() + half, y),
                &stroke,
            )
        };

        let mut group = svg_element::Group::new()
            .add(artwork::line(Point::new(center.x(), 0.0), Point::new(center.x(), 14.0), &stroke))
            .add(bar(14.0, 10.0))
            .add(bar(19.0, 6.0))
            .add(bar(24.0, 2.0));
        if self.rotation != 0 {
            group = group.set(
                "transform",
                format!("rotate({} {} {})", self.rotation, center.x(), center.y()),
            );
        }
        vec![Box::new(group)]
    }
}
