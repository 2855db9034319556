use std::path::PathBuf;

use clap::Parser;
use docket::cli::commands::Cli;
use docket::cli::handlers::{self, Context};
use docket::io::{config_io, logging};

fn main() {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(config_io::default_config_path);
    let config = config_io::read_config_from(&config_path);

    let level = if cli.verbose {
        "debug"
    } else {
        config.log.level.as_str()
    };
    // Held for the life of the process; dropping it flushes file logs.
    let logger = match logging::init_logging(level, config.log.dir.as_deref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("warning: {}", e);
            None
        }
    };

    let ctx = Context {
        config,
        config_path,
        json: cli.json,
    };
    if let Err(e) = handlers::dispatch(cli.command, &ctx) {
        eprintln!("error: {}", e);
        drop(logger);
        std::process::exit(1);
    }
}
