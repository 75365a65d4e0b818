//! CLI logic for the pinline symbol renderer.
//!
//! Renders a single catalogue symbol to an SVG file.

pub mod error_adapter;

mod args;
mod config;
mod params;

pub use args::Args;

use log::info;

use pinline::{
    PinlineError,
    anchor::GeometrySink,
    export::{Exporter, svg::Svg},
    identifier::Id,
    render::{NodeView, SymbolRenderer},
    side::MirrorState,
    symbol::SymbolKind,
};

/// Reports geometry invalidations through the log instead of a host engine.
#[derive(Debug, Default)]
struct LoggingSink {
    notified: usize,
}

impl GeometrySink for LoggingSink {
    fn recompute_terminal_geometry(&mut self, node: Id) {
        self.notified += 1;
        info!(node:% = node; "Terminal geometry invalidated");
    }
}

/// Run the pinline CLI application
///
/// Builds the requested symbol from its parameters, renders it with the
/// requested orientation and live values and writes the SVG to the output
/// file.
///
/// # Errors
///
/// Returns `PinlineError` for:
/// - Unknown symbol kinds
/// - Invalid symbol parameters or live values
/// - Configuration loading errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<(), PinlineError> {
    info!(
        symbol = args.symbol.as_str(),
        output_path = args.output.as_str();
        "Rendering symbol"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let kind: SymbolKind = args.symbol.parse()?;
    let symbol = params::symbol_config(kind, &args.params)?.build();
    let state = params::live_state(&args.state, &args.pin_state)?;

    let view = NodeView::new(kind.name())
        .with_mirror(MirrorState::new(args.flip_h, args.flip_v))
        .with_selected(args.selected)
        .with_state(state);

    let mut renderer = SymbolRenderer::new(&app_config)?;
    let mut sink = LoggingSink::default();
    let rendered = renderer.render(&view, symbol.as_ref(), &mut sink);

    Svg::new(&args.output).export_symbol(rendered)?;

    info!(
        output_file = args.output.as_str(),
        invalidations = sink.notified;
        "SVG exported successfully"
    );

    Ok(())
}
