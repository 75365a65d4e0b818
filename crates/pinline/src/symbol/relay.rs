//! Automotive relays, normally-open and changeover.
//!
//! The coil pins share the left side and the contacts share the right side,
//! so their positions along a side do not follow the mirrored artwork. The
//! whole relay is therefore drawn in the physical frame from the placed pin
//! points; only the fixed pivot and contact columns are mapped from the
//! logical frame.

use serde::Deserialize;

use pinline_core::{
    color::Color,
    draw::{RenderLayer, StrokeDefinition, SvgNode},
    geometry::{Bounds, Point, Size},
    pin::{LogicalPin, PinTone},
    side::Side,
};

use super::{Overlay, PinPresentation, Symbol, SymbolContext, SymbolKind, artwork, positive_or};
use crate::layout::SymbolSizing;

/// Column of the coil, in the logical frame.
const COIL_X: f32 = 28.0;
/// Column of the contacts, in the logical frame.
const CONTACT_X: f32 = 74.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayParams {
    /// Nominal coil voltage.
    pub coil_voltage: f32,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self { coil_voltage: 12.0 }
    }
}

impl RelayParams {
    pub fn normalized(self) -> Self {
        Self {
            coil_voltage: positive_or(
                self.coil_voltage,
                Self::default().coil_voltage,
                "coil_voltage",
            ),
        }
    }
}

/// ISO mini relay with pins 85, 86, 30, 87 and optionally 87a.
#[derive(Debug, Clone)]
pub struct Relay {
    coil_voltage: f32,
    changeover: bool,
}

impl Relay {
    /// Normally-open relay.
    pub fn new(params: RelayParams) -> Self {
        Self {
            coil_voltage: params.normalized().coil_voltage,
            changeover: false,
        }
    }

    /// Changeover (SPDT) relay with the extra normally-closed contact 87a.
    pub fn changeover(params: RelayParams) -> Self {
        Self {
            changeover: true,
            ..Self::new(params)
        }
    }

    pub fn coil_voltage(&self) -> f32 {
        self.coil_voltage
    }

    pub fn is_changeover(&self) -> bool {
        self.changeover
    }
}

impl Symbol for Relay {
    fn kind(&self) -> SymbolKind {
        if self.changeover {
            SymbolKind::RelaySpdt
        } else {
            SymbolKind::Relay
        }
    }

    fn pins(&self) -> Vec<LogicalPin> {
        let mut pins = vec![
            LogicalPin::target("86", Side::Left)
                .with_label("86")
                .with_tone(PinTone::Power),
            LogicalPin::source("85", Side::Left)
                .with_label("85")
                .with_tone(PinTone::Ground),
            LogicalPin::target("30", Side::Top)
                .with_label("30")
                .with_tone(PinTone::Power),
            LogicalPin::source("87", Side::Right).with_label("87"),
        ];
        if self.changeover {
            pins.push(LogicalPin::source("87a", Side::Right).with_label("87a"));
        }
        pins
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(100.0, 80.0))
    }

    fn pin_presentation(&self) -> PinPresentation {
        PinPresentation::Rows
    }

    fn title(&self) -> Option<String> {
        Some(format!("{:.0} V", self.coil_voltage))
    }

    fn artwork(&self, _ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        Vec::new()
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        let (Some(coil_a), Some(coil_b), Some(common), Some(open)) = (
            ctx.pin_point("86"),
            ctx.pin_point("85"),
            ctx.pin_point("30"),
            ctx.pin_point("87"),
        ) else {
            return overlay;
        };

        let energized = ctx.state().flag("energized");
        let stroke = artwork::body_stroke(energized);
        let wire = artwork::body_stroke(false);
        let coil_x = ctx.physical(Point::new(COIL_X, 0.0)).x();
        let contact_x = ctx.physical(Point::new(CONTACT_X, 0.0)).x();

        // Coil between the two coil pins.
        let coil_top = coil_a.y().min(coil_b.y());
        let coil_height = (coil_a.y() - coil_b.y()).abs();
        let coil = Bounds::new_from_top_left(
            Point::new(coil_x - 8.0, coil_top),
            Size::new(16.0, coil_height),
        );
        let coil_center = coil.center();
        if energized {
            overlay.add_to_layer(
                RenderLayer::Artwork,
                artwork::glow(coil_center, coil_height.max(16.0), artwork::active()),
            );
        }
        for pin in [coil_a, coil_b] {
            overlay.add_to_layer(
                RenderLayer::Artwork,
                artwork::line(pin, Point::new(coil_x, pin.y()), &wire),
            );
        }
        overlay.add_to_layer(
            RenderLayer::Artwork,
            artwork::rect(coil, &stroke, Some(Color::from_static("white"))),
        );

        // Switch: common pivots onto 87 when energized, else rests on 87a.
        let pivot = ctx.physical(Point::new(ctx.center().x(), 22.0));
        let open_contact = Point::new(contact_x, open.y());
        overlay.add_to_layer(RenderLayer::Artwork, artwork::line(common, pivot, &wire));
        overlay.add_to_layer(RenderLayer::Artwork, artwork::line(open, open_contact, &wire));

        let closed_contact = ctx.pin_point("87a").map(|closed| {
            let contact = Point::new(contact_x, closed.y());
            overlay.add_to_layer(RenderLayer::Artwork, artwork::line(closed, contact, &wire));
            contact
        });

        let arm_end = if energized {
            open_contact
        } else {
            closed_contact.unwrap_or_else(|| pivot.lerp(open_contact, 0.8).with_y(pivot.y()))
        };
        overlay.add_to_layer(RenderLayer::Artwork, artwork::line(pivot, arm_end, &stroke));
        for contact in std::iter::once(open_contact).chain(closed_contact) {
            overlay.add_to_layer(
                RenderLayer::Artwork,
                artwork::circle(contact, 2.0, &wire, Some(Color::from_static("white"))),
            );
        }

        // Mechanical linkage from coil to arm.
        overlay.add_to_layer(
            RenderLayer::Artwork,
            artwork::line(
                Point::new(coil.max_x(), coil_center.y()),
                pivot.midpoint(arm_end),
                &StrokeDefinition::linkage(artwork::idle()),
            ),
        );

        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LayoutConfig,
        layout::{LayoutSpec, layout_pins},
    };
    use pinline_core::{
        draw::TextDefinition,
        side::MirrorState,
        state::{LiveValue, NodeVisualState},
    };

    fn render_overlay(relay: &Relay, mirror: MirrorState, state: &NodeVisualState) -> String {
        let layout = layout_pins(&relay.pins(), mirror, relay.sizing(), &LayoutSpec::default());
        let config = LayoutConfig::default();
        let text = TextDefinition::new();
        let readout = TextDefinition::readout(10);
        let ctx = SymbolContext::new(&layout, state, &config, &text, &readout);
        let (output, _) = relay.overlay(&ctx).into_parts();
        output
            .render()
            .iter()
            .map(ToString::to_string)
            .collect::<String>()
    }

    #[test]
    fn test_changeover_adds_normally_closed_pin() {
        let relay = Relay::changeover(RelayParams::default());
        assert_eq!(relay.kind(), SymbolKind::RelaySpdt);
        assert!(relay.is_changeover());
        assert!(relay.pins().iter().any(|pin| pin.id() == "87a"));

        let plain = Relay::new(RelayParams::default());
        assert_eq!(plain.pins().len(), 4);
    }

    #[test]
    fn test_energized_relay_glows() {
        let relay = Relay::new(RelayParams::default());
        let on = NodeVisualState::new().with_node_value("energized", LiveValue::Flag(true));

        assert!(render_overlay(&relay, MirrorState::default(), &on).contains("data-glow"));
        let off = render_overlay(&relay, MirrorState::default(), &NodeVisualState::new());
        assert!(!off.contains("data-glow"));
    }

    #[test]
    fn test_contacts_follow_flipped_pins() {
        let relay = Relay::changeover(RelayParams::default());
        let rendered =
            render_overlay(&relay, MirrorState::new(true, false), &NodeVisualState::new());

        // 87 and 87a move to the left edge; their contacts sit at 100 - 74.
        assert!(rendered.contains("x2=\"26\""));
    }
}
