#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod exit_codes;
mod output;

const LOG_ENV: &str = "ARRCHK_LOG";

fn main() -> std::process::ExitCode {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    cli::run()
}
