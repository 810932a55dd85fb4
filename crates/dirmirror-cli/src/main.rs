use clap::Parser;
use dirmirror_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging before any work; fall back to stdout if the log file is unusable.
    if cli.log_file {
        if let Err(err) = logging::init_logging() {
            logging::init_logging_stdout();
            tracing::warn!("could not open log file ({:#}); logging to stdout", err);
        }
    } else {
        logging::init_logging_stdout();
    }

    if let Err(err) = cli.run() {
        eprintln!("dirmirror error: {:#}", err);
        std::process::exit(1);
    }
}
