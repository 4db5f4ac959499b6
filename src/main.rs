// Calendar Layout
// Main entry point

use std::process;
use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

use rust_calendar_layout::cli::{self, Args};

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", args.log_level);
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    log::info!("Starting calendar layout");

    match cli::run(&args) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
