//! `jsontype` - inspect semantic JSON values and configuration sources

use clap::Parser;

use jsontype::cli::args::Cli;
use jsontype::cli::commands;
use jsontype::error::ExitCode;
use jsontype::observability::LogSettings;

fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() {
            ExitCode::USAGE_ERROR
        } else {
            ExitCode::SUCCESS
        };
        let _ = e.print();
        std::process::exit(code);
    });

    LogSettings::from(&cli).init();

    match commands::dispatch(cli) {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
