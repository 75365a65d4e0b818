//! Motors and solenoids.

use pinline_core::{
    draw::SvgNode,
    geometry::{Bounds, Point, Size},
    pin::{LogicalPin, PinTone},
    side::Side,
    state::{LiveValue, PLACEHOLDER},
};

use super::{Overlay, Symbol, SymbolContext, SymbolKind, artwork};
use crate::layout::SymbolSizing;

/// DC motor. Glows while `running` and shows the `current` it draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct Motor;

impl Symbol for Motor {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Motor
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("pos", Side::Left).with_tone(PinTone::Power),
            LogicalPin::source("neg", Side::Right).with_tone(PinTone::Ground),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(60.0, 40.0))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let size = ctx.size();
        let center = ctx.center();
        let running = ctx.state().flag("running");
        let radius = 13.0;
        let wire = artwork::body_stroke(false);

        let mut nodes = Vec::new();
        if running {
            nodes.push(artwork::glow(center, radius + 5.0, artwork::active()));
        }
        nodes.push(artwork::line(
            Point::new(0.0, center.y()),
            Point::new(center.x() - radius, center.y()),
            &wire,
        ));
        nodes.push(artwork::line(
            Point::new(center.x() + radius, center.y()),
            Point::new(size.width(), center.y()),
            &wire,
        ));
        nodes.push(artwork::circle(center, radius, &artwork::body_stroke(running), None));
        nodes
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        ctx.label_at(&mut overlay, ctx.center(), "M");

        let current = ctx
            .state()
            .node_number("current")
            .map_or_else(|| PLACEHOLDER.to_string(), |amps| LiveValue::Current(amps).to_string());
        ctx.readout_at(
            &mut overlay,
            Point::new(ctx.center().x(), ctx.size().height() + 10.0),
            &current,
        );
        overlay
    }
}

/// Linear solenoid. The plunger is drawn pulled in while `energized`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Solenoid;

impl Symbol for Solenoid {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Solenoid
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("in", Side::Left),
            LogicalPin::source("out", Side::Right),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(60.0, 30.0))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let size = ctx.size();
        let center = ctx.center();
        let energized = ctx.state().flag("energized");
        let wire = artwork::body_stroke(false);
        let coil = artwork::body_stroke(energized);

        // Winding as a zig-zag across the middle third.
        let start = size.width() / 3.0;
        let end = size.width() * 2.0 / 3.0;
        let turns = 4;
        let step = (end - start) / (turns * 2) as f32;
        let winding: Vec<Point> = (0..=turns * 2)
            .map(|i| {
                let y = match i % 2 {
                    0 => center.y(),
                    _ => center.y() - 7.0,
                };
                Point::new(start + step * i as f32, y)
            })
            .collect();

        let plunger_offset = if energized { 0.0 } else { 6.0 };
        let plunger = Bounds::new_from_center(
            Point::new(center.x() + plunger_offset, center.y() + 7.0),
            Size::new(end - start, 4.0),
        );

        let mut nodes = Vec::new();
        if energized {
            nodes.push(artwork::glow(center, 16.0, artwork::active()));
        }
        nodes.push(artwork::line(
            Point::new(0.0, center.y()),
            Point::new(start, center.y()),
            &wire,
        ));
        nodes.push(artwork::line(
            Point::new(end, center.y()),
            Point::new(size.width(), center.y()),
            &wire,
        ));
        nodes.push(artwork::path(&winding, &coil, None));
        nodes.push(artwork::rect(plunger, &coil, Some(artwork::idle())));
        nodes
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
        draw::{RenderLayer, TextDefinition},
        side::MirrorState,
        state::NodeVisualState,
    };

    #[test]
    fn test_motor_readout_placeholder_and_value() {
        let layout = layout_pins(
            &Motor.pins(),
            MirrorState::default(),
            Motor.sizing(),
            &LayoutSpec::default(),
        );
        let config = LayoutConfig::default();
        let text = TextDefinition::new();
        let readout = TextDefinition::readout(10);

        let idle = NodeVisualState::new();
        let ctx = SymbolContext::new(&layout, &idle, &config, &text, &readout);
        let (output, bounds) = Motor.overlay(&ctx).into_parts();
        assert_eq!(output.count_in_layer(RenderLayer::Readout), 1);
        assert!(bounds.unwrap().max_y() > 40.0);
        let rendered: String = output.render().iter().map(ToString::to_string).collect();
        assert!(rendered.contains(&format!(">{PLACEHOLDER}<")));

        let running = NodeVisualState::new().with_node_value("current", LiveValue::Current(2.5));
        let ctx = SymbolContext::new(&layout, &running, &config, &text, &readout);
        let rendered: String = Motor
            .overlay(&ctx)
            .into_parts()
            .0
            .render()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert!(rendered.contains("2.50 A"));
    }

    #[test]
    fn test_solenoid_energized_glows() {
        let layout = layout_pins(
            &Solenoid.pins(),
            MirrorState::default(),
            Solenoid.sizing(),
            &LayoutSpec::default(),
        );
        let config = LayoutConfig::default();
        let text = TextDefinition::new();
        let readout = TextDefinition::readout(10);
        let on = NodeVisualState::new().with_node_value("energized", LiveValue::Flag(true));
        let ctx = SymbolContext::new(&layout, &on, &config, &text, &readout);

        let nodes = Solenoid.artwork(&ctx);
        assert!(nodes[0].to_string().contains("data-glow"));
    }
}
