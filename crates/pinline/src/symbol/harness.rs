//! Harness symbols: splices, net labels and bundles.
//!
//! Entry and exit flags carrying the same label are one net. That merge is
//! resolved by the host; these symbols only expose the label through
//! [`Symbol::net_label`].

use serde::Deserialize;

use pinline_core::{
    color::Color,
    draw::{RenderLayer, StrokeCap, StrokeDefinition, SvgNode},
    geometry::{Point, Size},
    identifier::Id,
    pin::{LogicalPin, PinTone},
    side::Side,
};

use super::{Overlay, Symbol, SymbolContext, SymbolKind, artwork, label_or};
use crate::layout::{CountRange, SymbolSizing, TrunkBand, fan_lines};

/// Wire splice: two bidirectional junctions, one per side.
///
/// Each junction exposes a Target and a Source terminal at the same point so
/// wires can both end and start there.
#[derive(Debug, Clone, Copy, Default)]
pub struct Splice;

impl Symbol for Splice {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Splice
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("left_in", Side::Left).with_junction("left"),
            LogicalPin::source("left_out", Side::Left).with_junction("left"),
            LogicalPin::target("right_in", Side::Right).with_junction("right"),
            LogicalPin::source("right_out", Side::Right).with_junction("right"),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(30.0, 20.0))
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let center = ctx.center();
        let stroke = artwork::body_stroke(false);
        vec![
            artwork::line(
                Point::new(0.0, center.y()),
                Point::new(ctx.size().width(), center.y()),
                &stroke,
            ),
            artwork::circle(center, 3.0, &stroke, Some(stroke.color())),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetLabelParams {
    pub label: String,
}

impl Default for NetLabelParams {
    fn default() -> Self {
        Self {
            label: "NET".to_string(),
        }
    }
}

impl NetLabelParams {
    pub fn normalized(self) -> Self {
        Self {
            label: label_or(self.label, &Self::default().label, "label"),
        }
    }
}

const FLAG_SIZE: (f32, f32) = (70.0, 24.0);

/// Flag outline pointing towards `Side::Right`, or `Side::Left` when `inward`.
fn flag(ctx: &SymbolContext<'_>, inward: bool) -> Vec<SvgNode> {
    let size = ctx.size();
    let mid = size.height() / 2.0;
    let stroke = artwork::body_stroke(false);
    let (top, bottom) = (4.0, size.height() - 4.0);

    let (outline, lead) = if inward {
        (
            vec![
                Point::new(8.0, mid),
                Point::new(20.0, top),
                Point::new(size.width() - 4.0, top),
                Point::new(size.width() - 4.0, bottom),
                Point::new(20.0, bottom),
            ],
            (Point::new(0.0, mid), Point::new(8.0, mid)),
        )
    } else {
        (
            vec![
                Point::new(4.0, top),
                Point::new(size.width() - 20.0, top),
                Point::new(size.width() - 8.0, mid),
                Point::new(size.width() - 20.0, bottom),
                Point::new(4.0, bottom),
            ],
            (Point::new(size.width() - 8.0, mid), Point::new(size.width(), mid)),
        )
    };

    vec![
        artwork::path(&outline, &stroke, Some(Color::from_static("#e8f0fe"))),
        artwork::line(lead.0, lead.1, &stroke),
    ]
}

/// Label centered on the flag body, in the physical frame.
fn flag_label(ctx: &SymbolContext<'_>, label: &str, inward: bool) -> Overlay {
    let mut overlay = Overlay::new();
    let body_center_x = if inward {
        (20.0 + ctx.size().width() - 4.0) / 2.0
    } else {
        (4.0 + ctx.size().width() - 20.0) / 2.0
    };
    let point = ctx.physical(Point::new(body_center_x, ctx.size().height() / 2.0));
    ctx.label_at(&mut overlay, point, label);
    overlay
}

/// Where a named net enters the drawing.
#[derive(Debug, Clone)]
pub struct HarnessEntry {
    label: String,
}

impl HarnessEntry {
    pub fn new(params: NetLabelParams) -> Self {
        Self {
            label: params.normalized().label,
        }
    }
}

impl Symbol for HarnessEntry {
    fn kind(&self) -> SymbolKind {
        SymbolKind::HarnessEntry
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![LogicalPin::source("out", Side::Right)]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(FLAG_SIZE.0, FLAG_SIZE.1))
    }

    fn net_label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        flag(ctx, false)
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        flag_label(ctx, &self.label, false)
    }
}

/// Where a named net leaves the drawing.
#[derive(Debug, Clone)]
pub struct HarnessExit {
    label: String,
}

impl HarnessExit {
    pub fn new(params: NetLabelParams) -> Self {
        Self {
            label: params.normalized().label,
        }
    }
}

impl Symbol for HarnessExit {
    fn kind(&self) -> SymbolKind {
        SymbolKind::HarnessExit
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![LogicalPin::target("in", Side::Left)]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(FLAG_SIZE.0, FLAG_SIZE.1))
    }

    fn net_label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        flag(ctx, true)
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        flag_label(ctx, &self.label, true)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessBundleParams {
    pub wire_count: i64,
    pub label: String,
}

impl Default for HarnessBundleParams {
    fn default() -> Self {
        Self {
            wire_count: 4,
            label: "BUNDLE".to_string(),
        }
    }
}

impl HarnessBundleParams {
    pub const WIRE_COUNT: CountRange = CountRange::STANDARD;

    pub fn normalized(self) -> Self {
        let wire_count = Self::WIRE_COUNT.clamp(self.wire_count, "wire_count");
        Self {
            wire_count: i64::try_from(wire_count).unwrap_or(self.wire_count),
            label: label_or(self.label, &Self::default().label, "label"),
        }
    }
}

/// Several wires merged into one trunk.
///
/// Each wire fans in from its own row to an evenly spread point on the trunk.
#[derive(Debug, Clone)]
pub struct HarnessBundle {
    wire_count: usize,
    label: String,
}

impl HarnessBundle {
    pub fn new(params: HarnessBundleParams) -> Self {
        let params = params.normalized();
        Self {
            wire_count: usize::try_from(params.wire_count).unwrap_or(1),
            label: params.label,
        }
    }

    pub fn wire_count(&self) -> usize {
        self.wire_count
    }
}

impl Symbol for HarnessBundle {
    fn kind(&self) -> SymbolKind {
        SymbolKind::HarnessBundle
    }

    fn pins(&self) -> Vec<LogicalPin> {
        (0..self.wire_count)
            .map(|i| LogicalPin::target(Id::indexed("w", i), Side::Left).with_order(i))
            .chain([LogicalPin::source("trunk", Side::Right).with_tone(PinTone::Bus)])
            .collect()
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Parametric {
            min: Size::new(60.0, 40.0),
        }
    }

    fn net_label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn artwork(&self, _ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        Vec::new()
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        let Some(trunk) = ctx.pin_point("trunk") else {
            return overlay;
        };

        let rows: Vec<Point> = (0..self.wire_count)
            .filter_map(|i| ctx.pin_point(Id::indexed("w", i)))
            .collect();
        let thickness = ctx.layout_config().trunk_thickness();
        let band = TrunkBand::centered(trunk.y(), thickness);
        let trunk_x = ctx.center().x();

        let wire = artwork::body_stroke(false);
        for line in fan_lines(&rows, trunk_x, band) {
            overlay.add_to_layer(
                RenderLayer::Artwork,
                artwork::line(line.start(), line.end(), &wire),
            );
        }

        let mut trunk_stroke = StrokeDefinition::conductor(artwork::idle());
        trunk_stroke.set_width(thickness);
        trunk_stroke.set_cap(StrokeCap::Butt);
        overlay.add_to_layer(
            RenderLayer::Artwork,
            artwork::line(Point::new(trunk_x, trunk.y()), trunk, &trunk_stroke),
        );

        let label_point = Point::new((trunk_x + trunk.x()) / 2.0, band.top() - 8.0);
        ctx.label_at(&mut overlay, label_point, &self.label);
        overlay
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        config::LayoutConfig,
        layout::{LayoutSpec, layout_pins},
    };
    use pinline_core::{draw::TextDefinition, side::MirrorState, state::NodeVisualState};

    #[test]
    fn test_splice_junctions_share_points() {
        let layout = layout_pins(
            &Splice.pins(),
            MirrorState::new(true, false),
            Splice.sizing(),
            &LayoutSpec::default(),
        );
        assert_eq!(layout.pin("left_in").unwrap().point(), layout.pin("left_out").unwrap().point());
        assert_eq!(layout.pin("left_in").unwrap().physical_side(), Side::Right);
        assert_eq!(layout.count_on(Side::Right), 2);
    }

    #[test]
    fn test_net_labels() {
        let entry = HarnessEntry::new(NetLabelParams {
            label: "IGN".to_string(),
        });
        let exit = HarnessExit::new(NetLabelParams {
            label: " IGN ".to_string(),
        });
        assert_eq!(entry.net_label(), exit.net_label());

        let blank = HarnessExit::new(NetLabelParams {
            label: String::new(),
        });
        assert_eq!(blank.net_label(), Some("NET"));
    }

    #[test]
    fn test_bundle_clamps_wire_count() {
        let bundle = HarnessBundle::new(HarnessBundleParams {
            wire_count: 15,
            ..HarnessBundleParams::default()
        });
        assert_eq!(bundle.wire_count(), 12);
        assert_eq!(bundle.pins().len(), 13);

        let bundle = HarnessBundle::new(HarnessBundleParams {
            wire_count: -4,
            ..HarnessBundleParams::default()
        });
        assert_eq!(bundle.wire_count(), 1);
    }

    #[test]
    fn test_bundle_fan_enters_trunk_band() {
        let bundle = HarnessBundle::new(HarnessBundleParams::default());
        let layout = layout_pins(
            &bundle.pins(),
            MirrorState::default(),
            bundle.sizing(),
            &LayoutSpec::default(),
        );
        let state = NodeVisualState::new();
        let config = LayoutConfig::default();
        let text = TextDefinition::new();
        let readout = TextDefinition::readout(10);
        let ctx = SymbolContext::new(&layout, &state, &config, &text, &readout);

        // 4 wires: height 2 * 10 + 4 * 20, trunk centered at 50, band 46..54
        assert_approx_eq!(f32, layout.size().height(), 100.0);
        let (output, _) = bundle.overlay(&ctx).into_parts();
        let rendered: String = output.render().iter().map(ToString::to_string).collect();
        assert!(rendered.contains("y2=\"46\""));
        assert!(rendered.contains("y2=\"54\""));
    }
}
