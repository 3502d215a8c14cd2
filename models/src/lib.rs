pub mod constants;
pub mod telemetry;
