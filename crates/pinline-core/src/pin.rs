//! Logical pin declarations and their resolved, on-screen form.
//!
//! Symbols declare [`LogicalPin`]s every render pass. Resolving a pin under
//! the node's [`MirrorState`] yields a [`ResolvedPin`], which is ephemeral:
//! it is recomputed whenever the mirror flags or the pin set change and is
//! never stored.

use std::fmt;

use crate::{
    color::Color,
    identifier::Id,
    side::{MirrorState, Side, rotate_side},
};

/// Wire-direction bookkeeping for a terminal.
///
/// `Source` terminals may start a wire, `Target` terminals terminate one.
/// The distinction only changes which wiring rule the diagram engine applies;
/// it has no visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinDirection {
    Source,
    Target,
}

impl PinDirection {
    pub fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for PinDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Electrical role of a pin, used to color its terminal dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PinTone {
    Power,
    Ground,
    Signal,
    Bus,
    #[default]
    Neutral,
}

impl PinTone {
    pub fn color(self) -> Color {
        match self {
            Self::Power => Color::from_static("#d93025"),
            Self::Ground => Color::from_static("#202124"),
            Self::Signal => Color::from_static("#1a73e8"),
            Self::Bus => Color::from_static("#f29900"),
            Self::Neutral => Color::from_static("#5f6368"),
        }
    }
}

/// A terminal as declared by a symbol definition.
///
/// `id` must be unique within the symbol and stable across renders.
/// `order` positions the pin among pins on the same side; ties keep
/// declaration order.
///
/// # Examples
///
/// ```
/// use pinline_core::pin::{LogicalPin, PinDirection, PinTone};
/// use pinline_core::side::Side;
///
/// let coil = LogicalPin::target("86", Side::Left)
///     .with_label("86")
///     .with_tone(PinTone::Power);
/// assert_eq!(coil.direction(), PinDirection::Target);
/// assert_eq!(coil.label(), "86");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalPin {
    id: Id,
    direction: PinDirection,
    side: Side,
    label: String,
    order: usize,
    tone: PinTone,
    rotation: i32,
    junction: Option<Id>,
}

impl LogicalPin {
    pub fn new(id: impl Into<Id>, direction: PinDirection, side: Side) -> Self {
        Self {
            id: id.into(),
            direction,
            side,
            label: String::new(),
            order: 0,
            tone: PinTone::default(),
            rotation: 0,
            junction: None,
        }
    }

    /// Shorthand for a [`PinDirection::Source`] pin.
    pub fn source(id: impl Into<Id>, side: Side) -> Self {
        Self::new(id, PinDirection::Source, side)
    }

    /// Shorthand for a [`PinDirection::Target`] pin.
    pub fn target(id: impl Into<Id>, side: Side) -> Self {
        Self::new(id, PinDirection::Target, side)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    pub fn with_tone(mut self, tone: PinTone) -> Self {
        self.tone = tone;
        self
    }

    /// Rotates the logical side clockwise before mirroring is applied.
    ///
    /// Only used by single-terminal symbols; see [`rotate_side`] for the
    /// accepted angles.
    pub fn with_rotation(mut self, angle_degrees: i32) -> Self {
        self.rotation = angle_degrees;
        self
    }

    /// Places this pin at the same point as every other pin on its side
    /// that names the same junction.
    ///
    /// Used to expose a bidirectional terminal as a Target and a Source pin
    /// sharing one dot.
    pub fn with_junction(mut self, junction: impl Into<Id>) -> Self {
        self.junction = Some(junction.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn direction(&self) -> PinDirection {
        self.direction
    }

    /// The side as declared, before rotation or mirroring.
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn tone(&self) -> PinTone {
        self.tone
    }

    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    pub fn junction(&self) -> Option<Id> {
        self.junction
    }

    /// Resolves the on-screen side of this pin under `mirror`.
    pub fn resolve(&self, mirror: MirrorState) -> ResolvedPin {
        let physical_side = mirror.resolve(rotate_side(self.side, self.rotation));
        ResolvedPin {
            pin: self.clone(),
            physical_side,
        }
    }
}

/// A [`LogicalPin`] together with the side it is drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPin {
    pin: LogicalPin,
    physical_side: Side,
}

impl ResolvedPin {
    pub fn pin(&self) -> &LogicalPin {
        &self.pin
    }

    pub fn id(&self) -> Id {
        self.pin.id
    }

    pub fn physical_side(&self) -> Side {
        self.physical_side
    }
}

/// Resolves every pin of a symbol under the same mirror state.
pub fn resolve_pins(pins: &[LogicalPin], mirror: MirrorState) -> Vec<ResolvedPin> {
    pins.iter().map(|pin| pin.resolve(mirror)).collect()
}
