//! Error types for pinline operations.
//!
//! Geometry never fails: counts are clamped and missing live values render a
//! placeholder. [`PinlineError`] only covers the fallible boundaries:
//! configuration, command line arguments, symbol selection, parameter
//! decoding and SVG output.

use std::io;

use thiserror::Error;

use crate::{export, symbol::SymbolKind};

/// The main error type for pinline operations.
#[derive(Debug, Error)]
pub enum PinlineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {message}")]
    Args { message: String },

    #[error("Unknown symbol `{0}`")]
    UnknownSymbol(String),

    #[error("Invalid parameters for `{kind}`: {message}")]
    Params { kind: SymbolKind, message: String },

    #[error("Export error: {0}")]
    Export(String),
}

impl PinlineError {
    /// Create an `Args` error from a malformed command line argument.
    pub fn args(err: impl std::fmt::Display) -> Self {
        Self::Args {
            message: err.to_string(),
        }
    }

    /// Create a `Params` error for `kind` from any displayable decoding error.
    pub fn params(kind: SymbolKind, err: impl std::fmt::Display) -> Self {
        Self::Params {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<export::Error> for PinlineError {
    fn from(err: export::Error) -> Self {
        match err {
            export::Error::Io(err) => Self::Io(err),
            export::Error::Render(message) => Self::Export(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_error_message() {
        let err = PinlineError::params(SymbolKind::Ecu, "invalid type: string \"x\", expected i64");
        assert_eq!(
            err.to_string(),
            "Invalid parameters for `ecu`: invalid type: string \"x\", expected i64"
        );
    }

    #[test]
    fn test_args_error_message() {
        let err = PinlineError::args("`rpm` is not of the form KEY=VALUE");
        assert_eq!(err.to_string(), "Invalid argument: `rpm` is not of the form KEY=VALUE");
    }

    #[test]
    fn test_io_error_converts() {
        let err: PinlineError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, PinlineError::Io(_)));
    }

    #[test]
    fn test_export_error_converts() {
        let err: PinlineError = export::Error::Render("empty".to_string()).into();
        assert_eq!(err.to_string(), "Export error: empty");
    }
}
