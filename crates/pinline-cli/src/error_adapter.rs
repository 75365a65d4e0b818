//! Error adapter for converting PinlineError to miette diagnostics.
//!
//! None of pinline's errors carry source spans, so each error becomes one
//! diagnostic with a stable code and, where the fix is predictable, a help
//! line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use pinline::{PinlineError, symbol::SymbolKind};

/// Adapter exposing a [`PinlineError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a PinlineError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PinlineError::Io(_) => "pinline::io",
            PinlineError::Config(_) => "pinline::config",
            PinlineError::Args { .. } => "pinline::args",
            PinlineError::UnknownSymbol(_) => "pinline::unknown_symbol",
            PinlineError::Params { .. } => "pinline::params",
            PinlineError::Export(_) => "pinline::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            PinlineError::UnknownSymbol(_) => {
                let kinds: Vec<&str> = SymbolKind::ALL.iter().map(|kind| kind.name()).collect();
                Some(Box::new(format!("available symbols: {}", kinds.join(", "))))
            }
            PinlineError::Params { kind, .. } => Some(Box::new(format!(
                "pass parameters of `{kind}` as --param KEY=VALUE"
            ))),
            PinlineError::Args { .. } => Some(Box::new(
                "pass --param, --state and --pin-state values as KEY=VALUE, e.g. --param inputs=6",
            )),
            PinlineError::Config(_) => Some(Box::new(
                "check the [layout] and [style] sections of the configuration file",
            )),
            PinlineError::Io(_) | PinlineError::Export(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wraps `err` for rendering with a miette report handler.
pub fn to_reportable(err: &PinlineError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_symbol_lists_kinds() {
        let err = PinlineError::UnknownSymbol("flux_capacitor".to_string());
        let adapter = to_reportable(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "pinline::unknown_symbol");
        let help = adapter.help().unwrap().to_string();
        assert!(help.contains("relay_spdt"));
        assert!(help.contains("can_transceiver"));
    }

    #[test]
    fn test_params_help_names_kind() {
        let err = PinlineError::params(SymbolKind::Tachometer, "unknown field `rpm`");
        let adapter = to_reportable(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "pinline::params");
        assert!(adapter.help().unwrap().to_string().contains("`tachometer`"));
        assert_eq!(
            adapter.to_string(),
            "Invalid parameters for `tachometer`: unknown field `rpm`"
        );
    }

    #[test]
    fn test_args_error_has_its_own_code() {
        let err = PinlineError::args("`inputs` passed to --param is not of the form KEY=VALUE");
        let adapter = to_reportable(&err);

        assert_eq!(adapter.code().unwrap().to_string(), "pinline::args");
        assert!(adapter.help().unwrap().to_string().contains("KEY=VALUE"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = PinlineError::Io(std::io::Error::other("disk full"));
        let adapter = to_reportable(&err);
        assert!(adapter.help().is_none());
        assert!(adapter.labels().is_none());
    }
}
