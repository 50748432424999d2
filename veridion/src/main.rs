// veridion/src/main.rs
//! Veridion Shield entry point.

use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use std::process::ExitCode;

use veridion::cli::{Cli, Commands};
use veridion::commands::{redact::run_redact, rules::run_rules};
use veridion::logger;
use veridion::ui::output_format;

fn main() -> ExitCode {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let level = if args.debug {
        Some(LevelFilter::Debug)
    } else if args.quiet {
        Some(LevelFilter::Off)
    } else {
        None
    };
    logger::init_logger(level);

    let result = match &args.command {
        Commands::Redact(cmd) => run_redact(cmd, args.quiet),
        Commands::Rules(cmd) => run_rules(cmd, args.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let supports_color = std::io::stderr().is_terminal();
            let _ = output_format::print_error_message(&mut std::io::stderr(), &format!("{:#}", e), supports_color);
            ExitCode::FAILURE
        }
    }
}
