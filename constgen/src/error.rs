use models::telemetry;
use snafu::Snafu;
use std::path::PathBuf;

/// The crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The crate-wide error type.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Environment variable \"{}\" is not defined", name))]
    MissingVariable { name: String },

    #[snafu(display("Unable to create output file '{}': '{}'", path.display(), source))]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to write output file '{}': '{}'", path.display(), source))]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Error configuring telemetry: '{}'", source))]
    TelemetryInit {
        source: telemetry::TelemetryConfigError,
    },
}
