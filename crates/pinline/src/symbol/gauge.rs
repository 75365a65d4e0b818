//! Instrument cluster gauges.

use std::f32::consts::PI;

use serde::Deserialize;

use pinline_core::{
    color::Color,
    draw::{RenderLayer, SvgNode},
    geometry::{Point, Size},
    pin::{LogicalPin, PinTone},
    side::Side,
};

use super::{Overlay, Symbol, SymbolContext, SymbolKind, artwork, positive_or};
use crate::layout::SymbolSizing;

const DIAL_RADIUS: f32 = 24.0;
/// Needle angle at zero, counter-clockwise from the positive x axis.
const SWEEP_START: f32 = 1.25 * PI;
/// Total clockwise sweep of the needle.
const SWEEP: f32 = 1.5 * PI;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TachometerParams {
    /// Full-scale reading.
    pub max_rpm: f32,
}

impl Default for TachometerParams {
    fn default() -> Self {
        Self { max_rpm: 8000.0 }
    }
}

impl TachometerParams {
    pub fn normalized(self) -> Self {
        Self {
            max_rpm: positive_or(self.max_rpm, Self::default().max_rpm, "max_rpm"),
        }
    }
}

/// Engine speed gauge driven by the solver's `rpm` value.
#[derive(Debug, Clone)]
pub struct Tachometer {
    max_rpm: f32,
}

impl Tachometer {
    pub fn new(params: TachometerParams) -> Self {
        Self {
            max_rpm: params.normalized().max_rpm,
        }
    }

    pub fn max_rpm(&self) -> f32 {
        self.max_rpm
    }

    /// Needle deflection in `[0, 1]`; a missing reading rests at zero.
    pub fn deflection(&self, rpm: Option<f32>) -> f32 {
        rpm.filter(|rpm| rpm.is_finite())
            .map_or(0.0, |rpm| (rpm / self.max_rpm).clamp(0.0, 1.0))
    }
}

/// Point on the dial at `fraction` of the sweep.
fn dial_point(center: Point, radius: f32, fraction: f32) -> Point {
    let angle = SWEEP_START - SWEEP * fraction;
    Point::new(
        radius.mul_add(angle.cos(), center.x()),
        (-radius).mul_add(angle.sin(), center.y()),
    )
}

impl Symbol for Tachometer {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Tachometer
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("sig", Side::Left).with_tone(PinTone::Signal),
            LogicalPin::target("pwr", Side::Top).with_tone(PinTone::Power),
            LogicalPin::target("gnd", Side::Bottom).with_tone(PinTone::Ground),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(70.0, 70.0))
    }

    fn title(&self) -> Option<String> {
        Some(format!("0-{} rpm", self.max_rpm))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let center = ctx.center();
        let stroke = artwork::body_stroke(false);

        let mut nodes = vec![artwork::circle(center, DIAL_RADIUS, &stroke, None)];
        let tick = stroke.clone().with_color(artwork::idle());
        for step in 0..=8 {
            let fraction = step as f32 / 8.0;
            nodes.push(artwork::line(
                dial_point(center, DIAL_RADIUS - 4.0, fraction),
                dial_point(center, DIAL_RADIUS, fraction),
                &tick,
            ));
        }
        nodes
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        let center = ctx.center();
        let rpm = ctx.state().node_number("rpm");
        let fraction = self.deflection(rpm);

        let needle_color = if fraction > 0.85 {
            artwork::fault()
        } else {
            Color::from_static("#202124")
        };
        let needle = artwork::body_stroke(false).with_color(needle_color);
        overlay.add_to_layer(
            RenderLayer::Artwork,
            artwork::line(center, dial_point(center, DIAL_RADIUS - 6.0, fraction), &needle),
        );
        overlay.add_to_layer(
            RenderLayer::Artwork,
            artwork::circle(center, 2.5, &needle, Some(needle_color)),
        );

        let reading = ctx.state().node_number_text("rpm", "rpm");
        ctx.readout_at(&mut overlay, center.add_point(Point::new(0.0, 12.0)), &reading);
        overlay
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_deflection_clamps() {
        let tach = Tachometer::new(TachometerParams::default());
        assert_approx_eq!(f32, tach.deflection(None), 0.0);
        assert_approx_eq!(f32, tach.deflection(Some(4000.0)), 0.5);
        assert_approx_eq!(f32, tach.deflection(Some(12000.0)), 1.0);
        assert_approx_eq!(f32, tach.deflection(Some(-50.0)), 0.0);
        assert_approx_eq!(f32, tach.deflection(Some(f32::NAN)), 0.0);
    }

    #[test]
    fn test_dial_ends_are_symmetric() {
        let center = Point::new(35.0, 35.0);
        let low = dial_point(center, 10.0, 0.0);
        let high = dial_point(center, 10.0, 1.0);
        let mid = dial_point(center, 10.0, 0.5);

        assert_approx_eq!(f32, low.y(), high.y(), epsilon = 0.001);
        assert_approx_eq!(f32, low.x() + high.x(), 70.0, epsilon = 0.001);
        assert_approx_eq!(f32, mid.x(), 35.0, epsilon = 0.001);
        assert_approx_eq!(f32, mid.y(), 25.0, epsilon = 0.001);
    }

    #[test]
    fn test_invalid_max_rpm_defaults() {
        let tach = Tachometer::new(TachometerParams { max_rpm: 0.0 });
        assert_approx_eq!(f32, tach.max_rpm(), 8000.0);
    }
}
