#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::{IsTerminal, Write};

use sharpfix::cli::args::CliArgs;
use sharpfix::cli::commands;
use sharpfix::cli::reporter::Reporter;

fn main() -> Result<()> {
    // SHARPFIX_LOG / SHARPFIX_LOG_FORMAT, see src/tracing_config.rs.
    sharpfix::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let color = !args.no_color && std::io::stdout().is_terminal();
    let reporter = Reporter::new(color);

    let output = commands::run(&args.command, &reporter)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.errors.is_empty() {
        for error in &output.errors {
            eprintln!("{error}");
        }
        std::process::exit(1);
    }
    Ok(())
}
