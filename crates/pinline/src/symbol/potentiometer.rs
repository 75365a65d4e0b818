//! Potentiometer with a draggable wiper.

use log::{debug, warn};
use serde::Deserialize;

use pinline_core::{
    draw::SvgNode,
    geometry::{Point, Size},
    identifier::Id,
    pin::{LogicalPin, PinTone},
    side::Side,
};

use super::{Overlay, Symbol, SymbolContext, SymbolKind, artwork, positive_or};
use crate::{
    layout::SymbolSizing,
    store::{NodeDataStore, StatePatch},
};

/// Horizontal extent of the resistive track, in the logical frame.
const TRACK: (f32, f32) = (15.0, 55.0);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PotentiometerParams {
    /// Track resistance in ohms.
    pub resistance: f32,
    /// Wiper position from terminal `a` (0) to terminal `b` (1).
    pub position: f32,
}

impl Default for PotentiometerParams {
    fn default() -> Self {
        Self {
            resistance: 10_000.0,
            position: 0.5,
        }
    }
}

impl PotentiometerParams {
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let position = if self.position.is_finite() {
            self.position.clamp(0.0, 1.0)
        } else {
            defaults.position
        };
        if position != self.position {
            warn!(
                parameter = "position",
                requested = self.position,
                clamped = position;
                "Wiper position out of range, clamping"
            );
        }
        Self {
            resistance: positive_or(self.resistance, defaults.resistance, "resistance"),
            position,
        }
    }
}

/// Three-terminal potentiometer.
#[derive(Debug, Clone)]
pub struct Potentiometer {
    resistance: f32,
    position: f32,
}

impl Potentiometer {
    pub fn new(params: PotentiometerParams) -> Self {
        let params = params.normalized();
        Self {
            resistance: params.resistance,
            position: params.position,
        }
    }

    pub fn resistance(&self) -> f32 {
        self.resistance
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Moves the wiper of `node` through the node-data store.
    ///
    /// `position` is clamped to `[0, 1]`; a NaN request keeps the current
    /// position. Returns the value sent to the store. The symbol itself is not
    /// changed; the host re-renders it with the updated parameters.
    ///
    /// ```
    /// use pinline::store::InMemoryStore;
    /// use pinline::symbol::{Potentiometer, PotentiometerParams};
    /// use pinline_core::identifier::Id;
    ///
    /// let pot = Potentiometer::new(PotentiometerParams::default());
    /// let mut store = InMemoryStore::new();
    /// let node = Id::new("trim");
    ///
    /// assert_eq!(pot.set_wiper(node, 1.4, &mut store), 1.0);
    /// assert_eq!(store.wiper_position(node), Some(1.0));
    /// ```
    pub fn set_wiper(&self, node: Id, position: f32, store: &mut dyn NodeDataStore) -> f32 {
        let clamped = if position.is_nan() {
            self.position
        } else {
            position.clamp(0.0, 1.0)
        };
        debug!(node:% = node, requested = position, position = clamped; "Setting wiper position");
        store.update_node_state(node, StatePatch::WiperPosition(clamped));
        clamped
    }
}

fn format_ohms(ohms: f32) -> String {
    if ohms >= 1_000_000.0 {
        format!("{} MΩ", ohms / 1_000_000.0)
    } else if ohms >= 1_000.0 {
        format!("{} kΩ", ohms / 1_000.0)
    } else {
        format!("{ohms} Ω")
    }
}

impl Symbol for Potentiometer {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Potentiometer
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("a", Side::Left),
            LogicalPin::source("b", Side::Right),
            LogicalPin::source("wiper", Side::Bottom).with_tone(PinTone::Signal),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(70.0, 40.0))
    }

    fn title(&self) -> Option<String> {
        Some(format_ohms(self.resistance))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let size = ctx.size();
        let center_y = size.height() / 2.0 - 4.0;
        let wire = artwork::body_stroke(false);
        let (start, end) = TRACK;

        let zigs = 6;
        let step = (end - start) / zigs as f32;
        let track: Vec<Point> = (0..=zigs)
            .map(|i| {
                let y = match i {
                    0 => center_y,
                    i if i == zigs => center_y,
                    i if i % 2 == 1 => center_y - 5.0,
                    _ => center_y + 5.0,
                };
                Point::new(start + step * i as f32, y)
            })
            .collect();

        let wiper_x = start + (end - start) * self.position;
        let tip = Point::new(wiper_x, center_y + 6.0);
        let wiper_stroke = wire.clone().with_color(artwork::active());

        vec![
            artwork::line(Point::new(0.0, center_y), Point::new(start, center_y), &wire),
            artwork::line(Point::new(end, center_y), Point::new(size.width(), center_y), &wire),
            artwork::path(&track, &wire, None),
            artwork::path(
                &[
                    Point::new(size.width() / 2.0, size.height()),
                    Point::new(size.width() / 2.0, size.height() - 8.0),
                    Point::new(wiper_x, size.height() - 8.0),
                    Point::new(wiper_x, tip.y() + 4.0),
                ],
                &wiper_stroke,
                None,
            ),
            artwork::path(
                &[
                    tip,
                    tip.add_point(Point::new(-3.0, 5.0)),
                    tip.add_point(Point::new(3.0, 5.0)),
                ],
                &wiper_stroke,
                Some(artwork::active()),
            ),
        ]
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        let voltage = ctx.state().pin_voltage_text("wiper");
        ctx.pin_readout(&mut overlay, "wiper", &voltage);
        overlay
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::store::InMemoryStore;

    #[test]
    fn test_position_clamped_on_build() {
        let pot = Potentiometer::new(PotentiometerParams {
            position: -0.3,
            ..PotentiometerParams::default()
        });
        assert_approx_eq!(f32, pot.position(), 0.0);

        let pot = Potentiometer::new(PotentiometerParams {
            position: f32::NAN,
            ..PotentiometerParams::default()
        });
        assert_approx_eq!(f32, pot.position(), 0.5);
    }

    #[test]
    fn test_set_wiper_goes_through_store() {
        let pot = Potentiometer::new(PotentiometerParams::default());
        let node = Id::new("pot_wiper");
        let mut store = InMemoryStore::new();

        assert_approx_eq!(f32, pot.set_wiper(node, 0.75, &mut store), 0.75);
        assert_approx_eq!(f32, pot.set_wiper(node, -2.0, &mut store), 0.0);
        assert_approx_eq!(f32, pot.set_wiper(node, f32::NAN, &mut store), 0.5);

        assert_eq!(
            store.patches(node),
            &[
                StatePatch::WiperPosition(0.75),
                StatePatch::WiperPosition(0.0),
                StatePatch::WiperPosition(0.5),
            ]
        );
        // The symbol is untouched until the host rebuilds it.
        assert_approx_eq!(f32, pot.position(), 0.5);
    }

    #[test]
    fn test_resistance_formatting() {
        assert_eq!(format_ohms(10_000.0), "10 kΩ");
        assert_eq!(format_ohms(470.0), "470 Ω");
        assert_eq!(format_ohms(2_200_000.0), "2.2 MΩ");
    }
}
