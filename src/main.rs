//! Binary entrypoint for the `sprintorder` CLI.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    // A missing .env file is fine; flags and the process environment still apply.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Recording and replay are handled in commands::dispatch via
    // SPRINTORDER_RECORD=<dir> and SPRINTORDER_REPLAY=<cassette>.
    match sprintorder::run(env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SPRINTORDER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("sprintorder=info,warn"));

    let format = env::var("SPRINTORDER_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr)).init();
        }
        _ => {
            registry.with(fmt::layer().compact().with_writer(std::io::stderr)).init();
        }
    }
}
