//! Live electrical state supplied by the external solver.
//!
//! [`NodeVisualState`] is read-only from the symbol's point of view. Values
//! are keyed either by node-level field name (`energized`, `rpm`, ...) or by
//! pin id. A missing value is never an error: readout helpers fall back to
//! [`PLACEHOLDER`].

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use thiserror::Error;

use crate::identifier::{Id, IdKey};

/// Text rendered in place of a value the solver did not supply.
pub const PLACEHOLDER: &str = "-";

/// Errors produced when parsing live values from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLiveValueError {
    #[error("live value is empty")]
    Empty,

    #[error("invalid voltage `{0}`, expected a number optionally followed by `V`")]
    InvalidVoltage(String),
}

/// A single solver-computed value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveValue {
    Voltage(f32),
    Current(f32),
    Number(f32),
    Flag(bool),
    Text(String),
}

impl LiveValue {
    /// Returns the numeric payload, if any.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Voltage(v) | Self::Current(v) | Self::Number(v) => Some(*v),
            Self::Flag(_) | Self::Text(_) => None,
        }
    }

    /// Returns the boolean payload, if any.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Parses a pin voltage such as `"3.3"` or `"12V"`.
    pub fn voltage_from_str(s: &str) -> Result<Self, ParseLiveValueError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseLiveValueError::Empty);
        }
        trimmed
            .trim_end_matches(['V', 'v'])
            .trim()
            .parse::<f32>()
            .map(Self::Voltage)
            .map_err(|_| ParseLiveValueError::InvalidVoltage(trimmed.to_string()))
    }
}

impl FromStr for LiveValue {
    type Err = ParseLiveValueError;

    /// Parses `true`/`false` as flags, `12V`/`0.5A` as voltage/current,
    /// plain numbers as numbers and anything else as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseLiveValueError::Empty);
        }
        if let Ok(flag) = trimmed.parse::<bool>() {
            return Ok(Self::Flag(flag));
        }
        if let Ok(number) = trimmed.parse::<f32>() {
            return Ok(Self::Number(number));
        }
        if let Some(Ok(volts)) = trimmed.strip_suffix('V').map(|n| n.trim().parse::<f32>()) {
            return Ok(Self::Voltage(volts));
        }
        if let Some(Ok(amps)) = trimmed.strip_suffix('A').map(|n| n.trim().parse::<f32>()) {
            return Ok(Self::Current(amps));
        }
        Ok(Self::Text(trimmed.to_string()))
    }
}

impl fmt::Display for LiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voltage(v) => write!(f, "{v:.2} V"),
            Self::Current(a) => write!(f, "{a:.2} A"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(flag) => write!(f, "{}", if *flag { "on" } else { "off" }),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Live values for one node, keyed by node-level field or by pin id.
///
/// # Examples
///
/// ```
/// use pinline_core::state::{LiveValue, NodeVisualState, PLACEHOLDER};
///
/// let state = NodeVisualState::new()
///     .with_node_value("energized", LiveValue::Flag(true))
///     .with_pin_value("wiper", LiveValue::Voltage(6.0));
///
/// assert!(state.flag("energized"));
/// assert_eq!(state.pin_voltage_text("wiper"), "6.00 V");
/// assert_eq!(state.pin_voltage_text("missing"), PLACEHOLDER);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeVisualState {
    node: IndexMap<Id, LiveValue>,
    pins: IndexMap<Id, LiveValue>,
}

impl NodeVisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_value(mut self, field: impl Into<Id>, value: LiveValue) -> Self {
        self.set_node_value(field, value);
        self
    }

    pub fn with_pin_value(mut self, pin: impl Into<Id>, value: LiveValue) -> Self {
        self.set_pin_value(pin, value);
        self
    }

    pub fn set_node_value(&mut self, field: impl Into<Id>, value: LiveValue) {
        self.node.insert(field.into(), value);
    }

    pub fn set_pin_value(&mut self, pin: impl Into<Id>, value: LiveValue) {
        self.pins.insert(pin.into(), value);
    }

    pub fn node_value(&self, field: impl IdKey) -> Option<&LiveValue> {
        self.node.get(&field.find_id()?)
    }

    pub fn pin_value(&self, pin: impl IdKey) -> Option<&LiveValue> {
        self.pins.get(&pin.find_id()?)
    }

    /// Returns a node-level boolean flag; absent or non-boolean reads as `false`.
    pub fn flag(&self, field: impl IdKey) -> bool {
        self.node_value(field)
            .and_then(LiveValue::as_flag)
            .unwrap_or(false)
    }

    /// Returns a node-level numeric value, if present.
    pub fn node_number(&self, field: impl IdKey) -> Option<f32> {
        self.node_value(field).and_then(LiveValue::as_number)
    }

    /// Returns a pin's voltage, if present.
    pub fn pin_voltage(&self, pin: impl IdKey) -> Option<f32> {
        self.pin_value(pin).and_then(LiveValue::as_number)
    }

    /// Formats a pin's voltage, or [`PLACEHOLDER`] when absent.
    pub fn pin_voltage_text(&self, pin: impl IdKey) -> String {
        self.pin_voltage(pin)
            .map(|volts| LiveValue::Voltage(volts).to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Formats a node-level value with `unit`, or [`PLACEHOLDER`] when absent.
    pub fn node_number_text(&self, field: impl IdKey, unit: &str) -> String {
        match self.node_number(field) {
            Some(value) if unit.is_empty() => format!("{value:.0}"),
            Some(value) => format!("{value:.0} {unit}"),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_empty() && self.pins.is_empty()
    }
}
