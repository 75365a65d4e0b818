//! Command-line argument definitions for the pinline CLI.
//!
//! [`Args`] selects one catalogue symbol, its parameters, its orientation and
//! the live values to display, plus the usual output, configuration and
//! logging options.

use clap::Parser;

/// Command-line arguments for the pinline symbol renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Symbol kind, e.g. `relay`, `ecu` or `harness-bundle`
    #[arg(help = "Symbol kind to render")]
    pub symbol: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Mirror the symbol horizontally
    #[arg(long)]
    pub flip_h: bool,

    /// Mirror the symbol vertically
    #[arg(long)]
    pub flip_v: bool,

    /// Draw the selection highlight
    #[arg(long)]
    pub selected: bool,

    /// Symbol parameter, repeatable (e.g. `--param inputs=6`)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Node-level live value, repeatable (e.g. `--state energized=true`)
    #[arg(long = "state", value_name = "FIELD=VALUE")]
    pub state: Vec<String>,

    /// Pin voltage, repeatable (e.g. `--pin-state wiper=4.2`)
    #[arg(long = "pin-state", value_name = "PIN=VOLTS")]
    pub pin_state: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Arguments rendering `symbol` to `output` with everything else at its
    /// default.
    pub fn new(symbol: &str, output: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            output: output.to_string(),
            flip_h: false,
            flip_v: false,
            selected: false,
            params: Vec::new(),
            state: Vec::new(),
            pin_state: Vec::new(),
            config: None,
            log_level: "off".to_string(),
        }
    }
}
