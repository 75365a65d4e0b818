//! Diodes.

use log::warn;
use serde::Deserialize;

use pinline_core::{
    color::Color,
    draw::{StrokeDefinition, SvgNode},
    geometry::{Point, Size},
    pin::LogicalPin,
    side::Side,
};

use super::{Symbol, SymbolContext, SymbolKind, artwork, positive_or};
use crate::layout::SymbolSizing;

/// Half-width of the diode triangle.
const HALF: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedParams {
    /// CSS color of the emitted light.
    pub color: String,
}

impl Default for LedParams {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
        }
    }
}

impl LedParams {
    pub fn normalized(self) -> Self {
        match Color::new(&self.color) {
            Ok(_) => self,
            Err(err) => {
                warn!(
                    parameter = "color",
                    value = self.color.as_str(),
                    err = err.as_str();
                    "Invalid LED color, using default"
                );
                Self::default()
            }
        }
    }
}

/// Light emitting diode, lit while the solver reports `lit`.
#[derive(Debug, Clone)]
pub struct Led {
    color: Color,
}

impl Led {
    pub fn new(params: LedParams) -> Self {
        let params = params.normalized();
        Self {
            color: Color::new(&params.color).unwrap_or_else(|_| Color::from_static("red")),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl Symbol for Led {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Led
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("anode", Side::Left),
            LogicalPin::source("cathode", Side::Right),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(60.0, 30.0))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let lit = ctx.state().flag("lit");
        let center = ctx.center();
        let stroke = artwork::body_stroke(false);

        let mut nodes = Vec::new();
        if lit {
            nodes.push(artwork::glow(center, 16.0, self.color));
        }
        nodes.extend(diode_body(ctx, &stroke, lit.then_some(self.color)));

        // Emission arrows
        let ray = stroke.clone().with_color(if lit { self.color } else { artwork::idle() });
        for dx in [-2.0, 4.0] {
            let from = Point::new(center.x() + dx, center.y() - HALF - 2.0);
            let to = from.add_point(Point::new(5.0, -5.0));
            nodes.push(artwork::line(from, to, &ray));
            nodes.push(artwork::path(
                &[to, to.add_point(Point::new(-3.0, 0.0)), to.add_point(Point::new(0.0, 3.0))],
                &ray,
                Some(ray.color()),
            ));
        }
        nodes
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZenerParams {
    pub breakdown_voltage: f32,
}

impl Default for ZenerParams {
    fn default() -> Self {
        Self {
            breakdown_voltage: 5.1,
        }
    }
}

impl ZenerParams {
    pub fn normalized(self) -> Self {
        Self {
            breakdown_voltage: positive_or(
                self.breakdown_voltage,
                Self::default().breakdown_voltage,
                "breakdown_voltage",
            ),
        }
    }
}

/// Zener diode, highlighted while `conducting`.
///
/// The cathode faces left, so the triangle points against the pin order of
/// an ordinary diode.
#[derive(Debug, Clone)]
pub struct Zener {
    breakdown_voltage: f32,
}

impl Zener {
    pub fn new(params: ZenerParams) -> Self {
        Self {
            breakdown_voltage: params.normalized().breakdown_voltage,
        }
    }

    pub fn breakdown_voltage(&self) -> f32 {
        self.breakdown_voltage
    }
}

impl Symbol for Zener {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Zener
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("cathode", Side::Left),
            LogicalPin::source("anode", Side::Right),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(60.0, 30.0))
    }

    fn title(&self) -> Option<String> {
        Some(format!("{} V", self.breakdown_voltage))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let conducting = ctx.state().flag("conducting");
        let center = ctx.center();
        let size = ctx.size();
        let stroke = artwork::body_stroke(conducting);
        let wire = artwork::body_stroke(false);
        let tip = center.x() - HALF;
        let base = center.x() + HALF;

        vec![
            artwork::line(Point::new(0.0, center.y()), Point::new(tip, center.y()), &wire),
            artwork::line(
                Point::new(base, center.y()),
                Point::new(size.width(), center.y()),
                &wire,
            ),
            artwork::path(
                &[
                    Point::new(base, center.y() - HALF),
                    Point::new(base, center.y() + HALF),
                    Point::new(tip, center.y()),
                ],
                &stroke,
                None,
            ),
            // Cathode bar with the zener wings.
            artwork::path(
                &[
                    Point::new(tip + 3.0, center.y() - HALF - 2.0),
                    Point::new(tip, center.y() - HALF),
                    Point::new(tip, center.y() + HALF),
                    Point::new(tip - 3.0, center.y() + HALF + 2.0),
                ],
                &stroke,
                None,
            ),
        ]
    }
}

/// Leads, triangle pointing right and the cathode bar of a forward diode.
fn diode_body(
    ctx: &SymbolContext<'_>,
    stroke: &StrokeDefinition,
    fill: Option<Color>,
) -> Vec<SvgNode> {
    let center = ctx.center();
    let size = ctx.size();
    let base = center.x() - HALF;
    let tip = center.x() + HALF;

    vec![
        artwork::line(Point::new(0.0, center.y()), Point::new(base, center.y()), stroke),
        artwork::line(Point::new(tip, center.y()), Point::new(size.width(), center.y()), stroke),
        artwork::path(
            &[
                Point::new(base, center.y() - HALF),
                Point::new(base, center.y() + HALF),
                Point::new(tip, center.y()),
            ],
            stroke,
            fill,
        ),
        artwork::line(
            Point::new(tip, center.y() - HALF),
            Point::new(tip, center.y() + HALF),
            stroke,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_led_invalid_color_falls_back() {
        let led = Led::new(LedParams {
            color: "not-a-color".to_string(),
        });
        assert_eq!(led.color(), Color::from_static("red"));
    }

    #[test]
    fn test_led_keeps_valid_color() {
        let led = Led::new(LedParams {
            color: "#00ff00".to_string(),
        });
        assert_eq!(led.color(), Color::from_static("#00ff00"));
    }

    #[test]
    fn test_zener_title_and_pins() {
        let zener = Zener::new(ZenerParams::default());
        assert_eq!(zener.title().as_deref(), Some("5.1 V"));

        let pins = zener.pins();
        assert_eq!(pins[0].id(), "cathode");
        assert_eq!(pins[0].side(), Side::Left);
    }
}
