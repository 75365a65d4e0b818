//! Export of rendered symbols.
//!
//! The renderer produces a [`RenderedSymbol`] in memory; exporters turn it
//! into an output format. Export failures are reported as [`Error`], which
//! converts into [`PinlineError::Export`] or [`PinlineError::Io`] at the crate
//! boundary.
//!
//! [`PinlineError::Export`]: crate::PinlineError::Export
//! [`PinlineError::Io`]: crate::PinlineError::Io

/// SVG export backend.
pub mod svg;

use crate::render::RenderedSymbol;

/// Abstraction for symbol export backends.
pub trait Exporter {
    /// Exports one rendered symbol.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] for a symbol with nothing to draw and
    /// [`Error::Io`] when the output cannot be written.
    fn export_symbol(&self, rendered: RenderedSymbol) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// The symbol produced nothing that can be written.
    Render(String),
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "cannot export symbol: {msg}"),
            Self::Io(err) => write!(f, "cannot write output: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
