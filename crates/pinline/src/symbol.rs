//! Schematic symbol catalogue.
//!
//! A [`Symbol`] declares its logical pins, how its shell is sized and what it
//! draws. It never resolves sides or positions pins itself; the renderer runs
//! every symbol through the shared layout and terminal primitives.
//!
//! Drawing happens in two frames:
//!
//! - [`Symbol::artwork`] is drawn in the *logical* frame. The renderer wraps it
//!   in a mirror transform, so artwork never needs to know about flips.
//! - [`Symbol::overlay`] is drawn in the *physical* frame, on top of the
//!   already-mirrored shell. Anything that must stay readable or that is tied
//!   to a placed pin (readouts, labels, leads, bundle fans) goes here.
//!
//! Symbol parameters come in through [`SymbolConfig`], an explicit parameter
//! struct per kind with declared defaults. Out-of-range values are clamped
//! once when the symbol is built.

mod actuator;
mod artwork;
mod ecu;
mod gauge;
mod harness;
mod potentiometer;
mod power;
mod protection;
mod relay;
mod semiconductor;

pub use actuator::{Motor, Solenoid};
pub use ecu::{CanTransceiver, Ecu, EcuParams, ProgrammableEcu, ProgrammableEcuParams};
pub use gauge::{Tachometer, TachometerParams};
pub use harness::{
    HarnessBundle, HarnessBundleParams, HarnessEntry, HarnessExit, NetLabelParams, Splice,
};
pub use potentiometer::{Potentiometer, PotentiometerParams};
pub use power::{Battery, BatteryParams, Ground, GroundParams};
pub use protection::{Fuse, FuseParams};
pub use relay::{Relay, RelayParams};
pub use semiconductor::{Led, LedParams, Zener, ZenerParams};

use std::{fmt, str::FromStr};

use log::warn;
use serde::Deserialize;

use pinline_core::{
    draw::{
        Drawable, LayeredOutput, RenderLayer, StrokeDefinition, SvgNode, Text, TextDefinition,
        caption_placement,
    },
    geometry::{Bounds, Point, Size},
    identifier::Id,
    pin::LogicalPin,
    side::{MirrorState, Side},
    state::NodeVisualState,
};

use crate::{
    config::LayoutConfig,
    error::PinlineError,
    layout::{SymbolLayout, SymbolSizing},
};

/// Every symbol type in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Battery,
    Fuse,
    Relay,
    RelaySpdt,
    Motor,
    Solenoid,
    Led,
    Zener,
    Potentiometer,
    Splice,
    HarnessEntry,
    HarnessExit,
    HarnessBundle,
    Tachometer,
    Ecu,
    EcuProgrammable,
    CanTransceiver,
    Ground,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 18] = [
        Self::Battery,
        Self::Fuse,
        Self::Relay,
        Self::RelaySpdt,
        Self::Motor,
        Self::Solenoid,
        Self::Led,
        Self::Zener,
        Self::Potentiometer,
        Self::Splice,
        Self::HarnessEntry,
        Self::HarnessExit,
        Self::HarnessBundle,
        Self::Tachometer,
        Self::Ecu,
        Self::EcuProgrammable,
        Self::CanTransceiver,
        Self::Ground,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::Fuse => "fuse",
            Self::Relay => "relay",
            Self::RelaySpdt => "relay_spdt",
            Self::Motor => "motor",
            Self::Solenoid => "solenoid",
            Self::Led => "led",
            Self::Zener => "zener",
            Self::Potentiometer => "potentiometer",
            Self::Splice => "splice",
            Self::HarnessEntry => "harness_entry",
            Self::HarnessExit => "harness_exit",
            Self::HarnessBundle => "harness_bundle",
            Self::Tachometer => "tachometer",
            Self::Ecu => "ecu",
            Self::EcuProgrammable => "ecu_programmable",
            Self::CanTransceiver => "can_transceiver",
            Self::Ground => "ground",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymbolKind {
    type Err = PinlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| PinlineError::UnknownSymbol(s.to_string()))
    }
}

/// How pins are drawn on the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinPresentation {
    /// Terminal dot plus caption, for parameter-rich symbols.
    Rows,
    /// Bare terminal dots.
    Terminals,
}

/// Everything a symbol may read while drawing.
#[derive(Debug, Clone, Copy)]
pub struct SymbolContext<'a> {
    layout: &'a SymbolLayout,
    state: &'a NodeVisualState,
    layout_config: &'a LayoutConfig,
    text: &'a TextDefinition,
    readout: &'a TextDefinition,
}

impl<'a> SymbolContext<'a> {
    pub fn new(
        layout: &'a SymbolLayout,
        state: &'a NodeVisualState,
        layout_config: &'a LayoutConfig,
        text: &'a TextDefinition,
        readout: &'a TextDefinition,
    ) -> Self {
        Self {
            layout,
            state,
            layout_config,
            text,
            readout,
        }
    }

    pub fn size(&self) -> Size {
        self.layout.size()
    }

    pub fn mirror(&self) -> MirrorState {
        self.layout.mirror()
    }

    pub fn layout(&self) -> &'a SymbolLayout {
        self.layout
    }

    pub fn state(&self) -> &'a NodeVisualState {
        self.state
    }

    pub fn layout_config(&self) -> &'a LayoutConfig {
        self.layout_config
    }

    pub fn text(&self) -> &'a TextDefinition {
        self.text
    }

    pub fn readout(&self) -> &'a TextDefinition {
        self.readout
    }

    /// Center of the shell, identical in both frames.
    pub fn center(&self) -> Point {
        let size = self.size();
        Point::new(size.width() / 2.0, size.height() / 2.0)
    }

    /// Maps a point of the logical (artwork) frame into the physical frame.
    pub fn physical(&self, logical: Point) -> Point {
        let size = self.size();
        let mirror = self.mirror();
        Point::new(
            if mirror.flip_horizontal() {
                size.width() - logical.x()
            } else {
                logical.x()
            },
            if mirror.flip_vertical() {
                size.height() - logical.y()
            } else {
                logical.y()
            },
        )
    }

    /// Physical anchor point of a placed pin.
    pub fn pin_point(&self, pin: impl Into<Id>) -> Option<Point> {
        self.layout.pin(pin).map(|placed| placed.point())
    }

    /// Conductor from a placed pin to a point of the logical artwork.
    ///
    /// Returns `None` if the symbol has no such pin.
    pub fn lead(
        &self,
        pin: impl Into<Id>,
        logical_end: Point,
        stroke: &StrokeDefinition,
    ) -> Option<SvgNode> {
        let start = self.pin_point(pin)?;
        Some(artwork::line(start, self.physical(logical_end), stroke))
    }

    /// Writes `content` as a readout just outside the terminal of `pin`.
    pub fn pin_readout(&self, overlay: &mut Overlay, pin: impl Into<Id>, content: &str) {
        let Some(placed) = self.layout.pin(pin) else {
            return;
        };
        let gap = artwork::READOUT_GAP;
        let (point, anchor) =
            caption_placement(placed.physical_side().opposite(), placed.point(), gap);
        let point = match placed.physical_side() {
            Side::Top | Side::Bottom => point.add_point(Point::new(gap, 0.0)),
            Side::Left | Side::Right => point.add_point(Point::new(0.0, -gap)),
        };
        let definition = self.readout.clone().with_anchor(anchor);
        overlay.add_text(&Text::new(&definition, content), point);
    }

    /// Writes `content` as a readout centered on `point` of the physical frame.
    pub fn readout_at(&self, overlay: &mut Overlay, point: Point, content: &str) {
        overlay.add_text(&Text::new(self.readout, content), point);
    }

    /// Writes `content` as a plain label centered on `point` of the physical frame.
    pub fn label_at(&self, overlay: &mut Overlay, point: Point, content: &str) {
        overlay.add_text(&Text::new(self.text, content), point);
    }
}

/// Physical-frame output of a symbol together with the area it covers.
#[derive(Debug, Default)]
pub struct Overlay {
    output: LayeredOutput,
    bounds: Option<Bounds>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` to `layer`. Call [`Overlay::extend`] as well if it may
    /// reach outside the shell.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.output.add_to_layer(layer, node);
    }

    pub fn add_text(&mut self, text: &Text<'_>, position: Point) {
        self.extend(text.bounds_at(position));
        self.output.merge(text.render_to_layers(position));
    }

    pub fn extend(&mut self, bounds: Bounds) {
        self.bounds = Some(match self.bounds {
            Some(current) => current.merge(&bounds),
            None => bounds,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn into_parts(self) -> (LayeredOutput, Option<Bounds>) {
        (self.output, self.bounds)
    }
}

/// A schematic symbol.
pub trait Symbol: fmt::Debug {
    fn kind(&self) -> SymbolKind;

    /// Logical pins, derived from the current parameters.
    fn pins(&self) -> Vec<LogicalPin>;

    fn sizing(&self) -> SymbolSizing;

    fn pin_presentation(&self) -> PinPresentation {
        PinPresentation::Terminals
    }

    /// Caption drawn below the shell.
    fn title(&self) -> Option<String> {
        None
    }

    /// Net label shared with other nodes carrying the same label.
    ///
    /// Only exposed; resolving nets is left to the host.
    fn net_label(&self) -> Option<&str> {
        None
    }

    /// Illustration in the logical frame, origin at the shell's top-left.
    fn artwork(&self, ctx: &SymbolContext<'_>) -> Vec<SvgNode>;

    /// Output in the physical frame, drawn after the artwork.
    fn overlay(&self, _ctx: &SymbolContext<'_>) -> Overlay {
        Overlay::new()
    }
}

/// Parameters of symbols that take none.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmptyParams {}

/// Parameters of any catalogue symbol, tagged with its kind.
///
/// ```
/// use pinline::symbol::{SymbolConfig, SymbolKind};
///
/// let config: SymbolConfig = toml::from_str(r#"
///     kind = "ecu"
///     inputs = 15
/// "#).unwrap();
/// assert_eq!(config.kind(), SymbolKind::Ecu);
///
/// let symbol = config.build();
/// let pins = symbol.pins();
/// let inputs = pins.iter().filter(|pin| pin.id().as_string().starts_with("in"));
/// assert_eq!(inputs.count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolConfig {
    Battery(BatteryParams),
    Fuse(FuseParams),
    Relay(RelayParams),
    RelaySpdt(RelayParams),
    Motor(EmptyParams),
    Solenoid(EmptyParams),
    Led(LedParams),
    Zener(ZenerParams),
    Potentiometer(PotentiometerParams),
    Splice(EmptyParams),
    HarnessEntry(NetLabelParams),
    HarnessExit(NetLabelParams),
    HarnessBundle(HarnessBundleParams),
    Tachometer(TachometerParams),
    Ecu(EcuParams),
    EcuProgrammable(ProgrammableEcuParams),
    CanTransceiver(EmptyParams),
    Ground(GroundParams),
}

impl SymbolConfig {
    /// Default parameters for `kind`.
    pub fn default_for(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Battery => Self::Battery(BatteryParams::default()),
            SymbolKind::Fuse => Self::Fuse(FuseParams::default()),
            SymbolKind::Relay => Self::Relay(RelayParams::default()),
            SymbolKind::RelaySpdt => Self::RelaySpdt(RelayParams::default()),
            SymbolKind::Motor => Self::Motor(EmptyParams::default()),
            SymbolKind::Solenoid => Self::Solenoid(EmptyParams::default()),
            SymbolKind::Led => Self::Led(LedParams::default()),
            SymbolKind::Zener => Self::Zener(ZenerParams::default()),
            SymbolKind::Potentiometer => Self::Potentiometer(PotentiometerParams::default()),
            SymbolKind::Splice => Self::Splice(EmptyParams::default()),
            SymbolKind::HarnessEntry => Self::HarnessEntry(NetLabelParams::default()),
            SymbolKind::HarnessExit => Self::HarnessExit(NetLabelParams::default()),
            SymbolKind::HarnessBundle => Self::HarnessBundle(HarnessBundleParams::default()),
            SymbolKind::Tachometer => Self::Tachometer(TachometerParams::default()),
            SymbolKind::Ecu => Self::Ecu(EcuParams::default()),
            SymbolKind::EcuProgrammable => {
                Self::EcuProgrammable(ProgrammableEcuParams::default())
            }
            SymbolKind::CanTransceiver => Self::CanTransceiver(EmptyParams::default()),
            SymbolKind::Ground => Self::Ground(GroundParams::default()),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        match self {
            Self::Battery(_) => SymbolKind::Battery,
            Self::Fuse(_) => SymbolKind::Fuse,
            Self::Relay(_) => SymbolKind::Relay,
            Self::RelaySpdt(_) => SymbolKind::RelaySpdt,
            Self::Motor(_) => SymbolKind::Motor,
            Self::Solenoid(_) => SymbolKind::Solenoid,
            Self::Led(_) => SymbolKind::Led,
            Self::Zener(_) => SymbolKind::Zener,
            Self::Potentiometer(_) => SymbolKind::Potentiometer,
            Self::Splice(_) => SymbolKind::Splice,
            Self::HarnessEntry(_) => SymbolKind::HarnessEntry,
            Self::HarnessExit(_) => SymbolKind::HarnessExit,
            Self::HarnessBundle(_) => SymbolKind::HarnessBundle,
            Self::Tachometer(_) => SymbolKind::Tachometer,
            Self::Ecu(_) => SymbolKind::Ecu,
            Self::EcuProgrammable(_) => SymbolKind::EcuProgrammable,
            Self::CanTransceiver(_) => SymbolKind::CanTransceiver,
            Self::Ground(_) => SymbolKind::Ground,
        }
    }

    /// Normalizes the parameters and builds the symbol.
    pub fn build(self) -> Box<dyn Symbol> {
        match self {
            Self::Battery(params) => Box::new(Battery::new(params)),
            Self::Fuse(params) => Box::new(Fuse::new(params)),
            Self::Relay(params) => Box::new(Relay::new(params)),
            Self::RelaySpdt(params) => Box::new(Relay::changeover(params)),
            Self::Motor(_) => Box::new(Motor),
            Self::Solenoid(_) => Box::new(Solenoid),
            Self::Led(params) => Box::new(Led::new(params)),
            Self::Zener(params) => Box::new(Zener::new(params)),
            Self::Potentiometer(params) => Box::new(Potentiometer::new(params)),
            Self::Splice(_) => Box::new(Splice),
            Self::HarnessEntry(params) => Box::new(HarnessEntry::new(params)),
            Self::HarnessExit(params) => Box::new(HarnessExit::new(params)),
            Self::HarnessBundle(params) => Box::new(HarnessBundle::new(params)),
            Self::Tachometer(params) => Box::new(Tachometer::new(params)),
            Self::Ecu(params) => Box::new(Ecu::new(params)),
            Self::EcuProgrammable(params) => Box::new(ProgrammableEcu::new(params)),
            Self::CanTransceiver(_) => Box::new(CanTransceiver),
            Self::Ground(params) => Box::new(Ground::new(params)),
        }
    }
}

/// Returns `value` if it is finite and strictly positive, else `default`.
fn positive_or(value: f32, default: f32, what: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!(
            parameter = what,
            value = value,
            default = default;
            "Parameter must be positive, using default"
        );
        default
    }
}

/// Returns `label` unless it is blank, else `default`.
fn label_or(label: String, default: &str, what: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        warn!(parameter = what, default = default; "Empty label, using default");
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::layout::{LayoutSpec, layout_pins};

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in SymbolKind::ALL {
            assert_eq!(kind.name().parse::<SymbolKind>().unwrap(), kind);
            assert_eq!(SymbolConfig::default_for(kind).kind(), kind);
            assert_eq!(SymbolConfig::default_for(kind).build().kind(), kind);
        }
    }

    #[test]
    fn test_kind_parsing_accepts_dashes_and_case() {
        assert_eq!("Relay-SPDT".parse::<SymbolKind>().unwrap(), SymbolKind::RelaySpdt);
    }

    #[test]
    fn test_unknown_kind() {
        let err = "flux_capacitor".parse::<SymbolKind>().unwrap_err();
        assert!(matches!(err, PinlineError::UnknownSymbol(name) if name == "flux_capacitor"));
    }

    #[test]
    fn test_pin_ids_unique_per_symbol() {
        for kind in SymbolKind::ALL {
            let pins = SymbolConfig::default_for(kind).build().pins();
            let mut ids: Vec<String> = pins.iter().map(|pin| pin.id().as_string()).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate pin id on {kind}");
        }
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result: Result<SymbolConfig, _> = toml::from_str(
            r#"
            kind = "fuse"
            amps = 3
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_config_rejects_wrong_type() {
        let result: Result<SymbolConfig, _> = toml::from_str(
            r#"
            kind = "ecu"
            inputs = "many"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_params_accept_kind_only() {
        let config: SymbolConfig = toml::from_str(r#"kind = "splice""#).unwrap();
        assert_eq!(config, SymbolConfig::Splice(EmptyParams {}));
    }

    #[test]
    fn test_context_maps_points_through_mirror() {
        let pins = vec![LogicalPin::target("in", Side::Left)];
        let layout = layout_pins(
            &pins,
            MirrorState::new(true, true),
            SymbolSizing::Fixed(Size::new(80.0, 40.0)),
            &LayoutSpec::default(),
        );
        let state = NodeVisualState::new();
        let config = LayoutConfig::default();
        let text = TextDefinition::new();
        let readout = TextDefinition::readout(10);
        let ctx = SymbolContext::new(&layout, &state, &config, &text, &readout);

        let mapped = ctx.physical(Point::new(10.0, 5.0));
        assert_approx_eq!(f32, mapped.x(), 70.0);
        assert_approx_eq!(f32, mapped.y(), 35.0);
        assert_eq!(ctx.physical(ctx.center()), ctx.center());
        assert_eq!(ctx.pin_point("in"), Some(Point::new(80.0, 20.0)));
    }

    #[test]
    fn test_pin_readout_extends_overlay_bounds() {
        let pins = vec![LogicalPin::target("in", Side::Left)];
        let layout = layout_pins(
            &pins,
            MirrorState::default(),
            SymbolSizing::Fixed(Size::new(80.0, 40.0)),
            &LayoutSpec::default(),
        );
        let state = NodeVisualState::new();
        let config = LayoutConfig::default();
        let text = TextDefinition::new();
        let readout = TextDefinition::readout(10);
        let ctx = SymbolContext::new(&layout, &state, &config, &text, &readout);

        let mut overlay = Overlay::new();
        ctx.pin_readout(&mut overlay, "in", "3.30 V");
        ctx.pin_readout(&mut overlay, "missing", "ignored");

        let bounds = overlay.bounds().unwrap();
        assert!(bounds.max_x() < 0.0);
        let (output, _) = overlay.into_parts();
        assert_eq!(output.count_in_layer(RenderLayer::Readout), 1);
    }

    #[test]
    fn test_positive_or_falls_back() {
        assert_approx_eq!(f32, positive_or(-1.0, 10.0, "trip_current"), 10.0);
        assert_approx_eq!(f32, positive_or(f32::NAN, 10.0, "trip_current"), 10.0);
        assert_approx_eq!(f32, positive_or(2.5, 10.0, "trip_current"), 2.5);
    }

    #[test]
    fn test_label_or_trims() {
        assert_eq!(label_or("  IGN ".to_string(), "NET", "label"), "IGN");
        assert_eq!(label_or("   ".to_string(), "NET", "label"), "NET");
    }
}
