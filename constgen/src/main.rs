use constgen::error::{self, Result};
use constgen::{Generator, ProcessEnv};
use models::constants::{DOTENV_FILE, GENERATOR};
use models::telemetry;

use snafu::ResultExt;
use std::io::ErrorKind;
use std::process;
use tracing::{event, Level};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Values already exported in the process environment take precedence over the dotenv file.
    let dotenv = dotenv::from_path(DOTENV_FILE);

    telemetry::init_telemetry_from_env().context(error::TelemetryInitSnafu)?;

    match dotenv {
        Ok(()) => event!(Level::DEBUG, path = DOTENV_FILE, "Loaded dotenv file."),
        Err(dotenv::Error::Io(ref io_err)) if io_err.kind() == ErrorKind::NotFound => {
            event!(Level::DEBUG, path = DOTENV_FILE, "No dotenv file found.")
        }
        Err(err) => event!(
            Level::WARN,
            path = DOTENV_FILE,
            error = %err,
            "Ignoring unreadable dotenv file."
        ),
    }

    let generator = Generator::default();
    event!(
        Level::DEBUG,
        generator = GENERATOR,
        output_path = %generator.output_path().display(),
        "Generating constants."
    );
    generator.run(&ProcessEnv)
}
