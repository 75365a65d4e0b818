//! `pinline` binary.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use pinline_cli::{Args, error_adapter::to_reportable};

/// Sets up `env_logger` at `level`, falling back to `warn` for unknown names.
fn init_logging(level: &str) -> LevelFilter {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level `{level}`, falling back to `warn`");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    filter
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let log_level = init_logging(&args.log_level);
    info!(log_level:? = log_level, symbol = args.symbol.as_str(); "Starting pinline");
    debug!(args:? = args; "Command line");

    if let Err(err) = pinline_cli::run(&args) {
        let mut report = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut report, &to_reportable(&err))
            .expect("rendering into a String cannot fail");
        error!("{report}");
        process::exit(1);
    }

    info!("Done");
}
