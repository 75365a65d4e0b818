//! Engine control units and bus transceivers.
//!
//! Both ECU variants share one body: a box with a row per input on the left,
//! a row per output on the right and the supply pins on the top and bottom
//! edges. Every input and output shows its live voltage next to its terminal.

use log::debug;
use serde::Deserialize;

use pinline_core::{
    draw::SvgNode,
    geometry::{Bounds, Point, Size},
    identifier::Id,
    pin::{LogicalPin, PinTone},
    side::Side,
};

use super::{Overlay, PinPresentation, Symbol, SymbolContext, SymbolKind, artwork, label_or};
use crate::{
    layout::{CountRange, SymbolSizing},
    store::{EditorKind, NodeDataStore},
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcuParams {
    pub inputs: i64,
    pub outputs: i64,
    /// Caption drawn inside the box.
    pub name: String,
}

impl Default for EcuParams {
    fn default() -> Self {
        Self {
            inputs: 4,
            outputs: 4,
            name: "ECU".to_string(),
        }
    }
}

impl EcuParams {
    pub const PIN_COUNT: CountRange = CountRange::STANDARD;

    /// Parameters as [`Ecu::new`] applies them.
    pub fn normalized(self) -> Self {
        Ecu::new(self).body.params()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgrammableEcuParams {
    pub inputs: i64,
    pub outputs: i64,
    pub name: String,
}

impl Default for ProgrammableEcuParams {
    fn default() -> Self {
        Self {
            inputs: 4,
            outputs: 4,
            name: "PCM".to_string(),
        }
    }
}

impl ProgrammableEcuParams {
    pub const PIN_COUNT: CountRange = CountRange::COMPACT;

    /// Parameters as [`ProgrammableEcu::new`] applies them.
    pub fn normalized(self) -> Self {
        let EcuParams {
            inputs,
            outputs,
            name,
        } = ProgrammableEcu::new(self).body.params();
        Self {
            inputs,
            outputs,
            name,
        }
    }
}

/// Counts and caption after clamping. Built once per symbol.
#[derive(Debug, Clone)]
struct EcuBody {
    inputs: usize,
    outputs: usize,
    name: String,
}

impl EcuBody {
    fn new(range: CountRange, (inputs, outputs): (i64, i64), name: String) -> Self {
        Self {
            inputs: range.clamp(inputs, "inputs"),
            outputs: range.clamp(outputs, "outputs"),
            name,
        }
    }

    fn params(self) -> EcuParams {
        EcuParams {
            inputs: i64::try_from(self.inputs).unwrap_or(1),
            outputs: i64::try_from(self.outputs).unwrap_or(1),
            name: self.name,
        }
    }

    fn pins(&self) -> Vec<LogicalPin> {
        let inputs = (0..self.inputs).map(|i| {
            LogicalPin::target(Id::indexed("in", i), Side::Left)
                .with_label(format!("IN{}", i + 1))
                .with_order(i)
                .with_tone(PinTone::Signal)
        });
        let outputs = (0..self.outputs).map(|i| {
            LogicalPin::source(Id::indexed("out", i), Side::Right)
                .with_label(format!("OUT{}", i + 1))
                .with_order(i)
        });
        inputs
            .chain(outputs)
            .chain([
                LogicalPin::target("vbat", Side::Top)
                    .with_label("VBAT")
                    .with_tone(PinTone::Power),
                LogicalPin::target("gnd", Side::Bottom)
                    .with_label("GND")
                    .with_tone(PinTone::Ground),
            ])
            .collect()
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        // Connector edge strip, symmetric so mirroring leaves it in place.
        let size = ctx.size();
        let strip = Bounds::new_from_top_left(
            Point::new(6.0, 6.0),
            Size::new(size.width() - 12.0, 10.0),
        );
        vec![artwork::rect(strip, &artwork::body_stroke(false), None)]
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        ctx.label_at(&mut overlay, ctx.center(), &self.name);

        let io = (0..self.inputs)
            .map(|i| Id::indexed("in", i))
            .chain((0..self.outputs).map(|i| Id::indexed("out", i)));
        for pin in io {
            let voltage = ctx.state().pin_voltage_text(pin);
            ctx.pin_readout(&mut overlay, pin, &voltage);
        }
        overlay
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Parametric {
            min: Size::new(120.0, 80.0),
        }
    }
}

/// Fixed-function ECU.
#[derive(Debug, Clone)]
pub struct Ecu {
    body: EcuBody,
}

impl Ecu {
    pub fn new(params: EcuParams) -> Self {
        Self {
            body: EcuBody::new(
                EcuParams::PIN_COUNT,
                (params.inputs, params.outputs),
                label_or(params.name, &EcuParams::default().name, "name"),
            ),
        }
    }

    pub fn inputs(&self) -> usize {
        self.body.inputs
    }

    pub fn outputs(&self) -> usize {
        self.body.outputs
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }
}

impl Symbol for Ecu {
    fn kind(&self) -> SymbolKind {
        SymbolKind::Ecu
    }

    fn pins(&self) -> Vec<LogicalPin> {
        self.body.pins()
    }

    fn sizing(&self) -> SymbolSizing {
        self.body.sizing()
    }

    fn pin_presentation(&self) -> PinPresentation {
        PinPresentation::Rows
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        self.body.artwork(ctx)
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        self.body.overlay(ctx)
    }
}

/// ECU whose behavior is defined by user rules, with a CAN bus port.
#[derive(Debug, Clone)]
pub struct ProgrammableEcu {
    body: EcuBody,
}

impl ProgrammableEcu {
    pub fn new(params: ProgrammableEcuParams) -> Self {
        Self {
            body: EcuBody::new(
                ProgrammableEcuParams::PIN_COUNT,
                (params.inputs, params.outputs),
                label_or(params.name, &ProgrammableEcuParams::default().name, "name"),
            ),
        }
    }

    pub fn inputs(&self) -> usize {
        self.body.inputs
    }

    pub fn outputs(&self) -> usize {
        self.body.outputs
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }

    /// Asks the host to open the rules editor for `node`.
    ///
    /// ```
    /// use pinline::store::{EditorKind, InMemoryStore};
    /// use pinline::symbol::{ProgrammableEcu, ProgrammableEcuParams};
    /// use pinline_core::identifier::Id;
    ///
    /// let pcm = ProgrammableEcu::new(ProgrammableEcuParams::default());
    /// let mut store = InMemoryStore::new();
    /// pcm.open_rules_editor(Id::new("pcm"), &mut store);
    ///
    /// assert_eq!(store.editor_requests(), &[(Id::new("pcm"), EditorKind::Rules)]);
    /// ```
    pub fn open_rules_editor(&self, node: Id, store: &mut dyn NodeDataStore) {
        debug!(node:% = node; "Opening rules editor");
        store.request_editor(node, EditorKind::Rules);
    }
}

impl Symbol for ProgrammableEcu {
    fn kind(&self) -> SymbolKind {
        SymbolKind::EcuProgrammable
    }

    fn pins(&self) -> Vec<LogicalPin> {
        let mut pins = self.body.pins();
        pins.extend([
            LogicalPin::source("can_h", Side::Bottom)
                .with_label("CAN H")
                .with_order(1)
                .with_tone(PinTone::Bus),
            LogicalPin::source("can_l", Side::Bottom)
                .with_label("CAN L")
                .with_order(2)
                .with_tone(PinTone::Bus),
        ]);
        pins
    }

    fn sizing(&self) -> SymbolSizing {
        self.body.sizing()
    }

    fn pin_presentation(&self) -> PinPresentation {
        PinPresentation::Rows
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        self.body.artwork(ctx)
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        self.body.overlay(ctx)
    }
}

/// CAN bus transceiver. The bus lines light up while `bus_active`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanTransceiver;

impl Symbol for CanTransceiver {
    fn kind(&self) -> SymbolKind {
        SymbolKind::CanTransceiver
    }

    fn pins(&self) -> Vec<LogicalPin> {
        vec![
            LogicalPin::target("txd", Side::Left).with_label("TXD"),
            LogicalPin::source("rxd", Side::Left).with_label("RXD"),
            LogicalPin::source("can_h", Side::Right)
                .with_label("CAN H")
                .with_tone(PinTone::Bus),
            LogicalPin::source("can_l", Side::Right)
                .with_label("CAN L")
                .with_tone(PinTone::Bus),
            LogicalPin::target("vcc", Side::Top)
                .with_label("VCC")
                .with_tone(PinTone::Power),
            LogicalPin::target("gnd", Side::Bottom)
                .with_label("GND")
                .with_tone(PinTone::Ground),
        ]
    }

    fn sizing(&self) -> SymbolSizing {
        SymbolSizing::Fixed(Size::new(110.0, 70.0))
    }

    fn pin_presentation(&self) -> PinPresentation {
        PinPresentation::Rows
    }

    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode> {
        let active = ctx.state().flag("bus_active");
        let center = ctx.center();
        let mut nodes = Vec::new();
        if active {
            nodes.push(artwork::glow(center, 18.0, artwork::active()));
        }
        nodes.push(artwork::rect(
            Bounds::new_from_center(center, Size::new(34.0, 20.0)),
            &artwork::body_stroke(active),
            None,
        ));
        nodes
    }

    fn overlay(&self, ctx: &SymbolContext<'_>) -> Overlay {
        let mut overlay = Overlay::new();
        ctx.label_at(&mut overlay, ctx.center(), "CAN");
        overlay
    }
}
