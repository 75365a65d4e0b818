//! `KEY=VALUE` argument parsing.
//!
//! Symbol parameters are collected into a TOML table tagged with the symbol
//! kind and deserialized into [`SymbolConfig`], so the CLI accepts exactly
//! what a configuration file would. An unquoted value is typed by its shape;
//! when that type does not fit the field (`label=42`), the value is retried
//! as text. A quoted value (`label="42"`) is always text. Live values go
//! straight into a [`NodeVisualState`].

use log::{debug, trace};
use thiserror::Error;

use pinline::{
    PinlineError,
    state::{LiveValue, NodeVisualState, ParseLiveValueError},
    symbol::{SymbolConfig, SymbolKind},
};

/// Malformed `KEY=VALUE` arguments.
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("`{arg}` passed to --{flag} is not of the form KEY=VALUE")]
    MissingSeparator { flag: &'static str, arg: String },

    #[error("--{flag} {key}: {source}")]
    LiveValue {
        flag: &'static str,
        key: String,
        source: ParseLiveValueError,
    },
}

impl From<ArgError> for PinlineError {
    fn from(err: ArgError) -> Self {
        PinlineError::args(err)
    }
}

fn split_pair<'a>(flag: &'static str, arg: &'a str) -> Result<(&'a str, &'a str), ArgError> {
    arg.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| ArgError::MissingSeparator {
            flag,
            arg: arg.to_string(),
        })
}

/// Quoted text, then integer, then float, then bool, else the raw string.
fn param_value(raw: &str) -> toml::Value {
    if let Some(text) = unquote(raw) {
        toml::Value::String(text.to_string())
    } else if let Ok(integer) = raw.parse::<i64>() {
        toml::Value::Integer(integer)
    } else if let Ok(float) = raw.parse::<f64>() {
        toml::Value::Float(float)
    } else if let Ok(flag) = raw.parse::<bool>() {
        toml::Value::Boolean(flag)
    } else {
        toml::Value::String(raw.to_string())
    }
}

/// Strips one pair of matching single or double quotes.
fn unquote(raw: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        raw.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote))
    })
}

fn decode(kind: SymbolKind, table: &toml::Table) -> Result<SymbolConfig, PinlineError> {
    let mut table = table.clone();
    table.insert("kind".to_string(), toml::Value::String(kind.name().to_string()));
    toml::Value::Table(table)
        .try_into::<SymbolConfig>()
        .map_err(|err| PinlineError::params(kind, err))
}

/// Builds the configuration of a `kind` symbol from `--param` arguments.
///
/// # Errors
///
/// Returns [`PinlineError::Params`] for unknown keys or values of the wrong
/// type, and [`PinlineError::Args`] for arguments without `=`.
pub fn symbol_config(kind: SymbolKind, params: &[String]) -> Result<SymbolConfig, PinlineError> {
    let mut table = toml::Table::new();
    // Unquoted values that were typed as something other than text.
    let mut typed: Vec<(String, String)> = Vec::new();
    for arg in params {
        let (key, raw) = split_pair("param", arg)?;
        trace!(key = key, value = raw; "Symbol parameter");
        let value = param_value(raw);
        typed.retain(|(typed_key, _)| typed_key != key);
        if !value.is_str() {
            typed.push((key.to_string(), raw.to_string()));
        }
        table.insert(key.to_string(), value);
    }

    let err = match decode(kind, &table) {
        Ok(config) => return Ok(config),
        Err(err) => err,
    };

    // Text fields holding digits: retry one value at a time as text, then
    // all of them together.
    for (key, raw) in &typed {
        let mut retry = table.clone();
        retry.insert(key.clone(), toml::Value::String(raw.clone()));
        if let Ok(config) = decode(kind, &retry) {
            debug!(key = key.as_str(), value = raw.as_str(); "Parameter read as text");
            return Ok(config);
        }
    }
    if typed.len() > 1 {
        let mut retry = table;
        for (key, raw) in &typed {
            retry.insert(key.clone(), toml::Value::String(raw.clone()));
        }
        if let Ok(config) = decode(kind, &retry) {
            debug!(count = typed.len(); "Parameters read as text");
            return Ok(config);
        }
    }

    Err(err)
}

/// Collects `--state` and `--pin-state` arguments.
///
/// # Errors
///
/// Returns [`PinlineError::Args`] for arguments without `=`, empty values or
/// pin voltages that are not numbers.
pub fn live_state(state: &[String], pin_state: &[String]) -> Result<NodeVisualState, PinlineError> {
    let mut visual = NodeVisualState::new();

    for arg in state {
        let (field, raw) = split_pair("state", arg)?;
        let value = raw.parse::<LiveValue>().map_err(|source| ArgError::LiveValue {
            flag: "state",
            key: field.to_string(),
            source,
        })?;
        visual.set_node_value(field, value);
    }

    for arg in pin_state {
        let (pin, raw) = split_pair("pin-state", arg)?;
        let value = LiveValue::voltage_from_str(raw).map_err(|source| ArgError::LiveValue {
            flag: "pin-state",
            key: pin.to_string(),
            source,
        })?;
        visual.set_pin_value(pin, value);
    }

    Ok(visual)
}
