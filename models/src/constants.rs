/// Helper macro to avoid retyping the name of the generator when building further string
/// constants from it.
#[macro_export]
macro_rules! generator_name {
    () => {
        "const_generator"
    };
}

pub const GENERATOR: &str = generator_name!();

// Generated file
pub const OUTPUT_FILE: &str = "const_generated.go"; // Written relative to the working directory.
pub const GO_PACKAGE: &str = "controllers"; // Package of the consuming build.
pub const GENERATED_HEADER: &str = concat!("// Code generated by ", generator_name!(), "; DO NOT EDIT.");

// Optional dotenv file consulted before reading the environment
pub const DOTENV_FILE: &str = ".env";

// Required environment variables
pub const APP_NAME_ENV: &str = "APP_NAME";
pub const OPERATOR_VERSION_ENV: &str = "OPERATOR_VERSION";
pub const CORE_IMAGE_ENV: &str = "CORE_IMG";
pub const DATASOURCE_IMAGE_ENV: &str = "DATASOURCE_IMG";
pub const GRAFANA_IMAGE_ENV: &str = "GRAFANA_IMG";
pub const REPORTS_IMAGE_ENV: &str = "REPORTS_IMG";

/// Every variable the generator requires, in lookup order.
pub const REQUIRED_ENV_VARS: [&str; 6] = [
    APP_NAME_ENV,
    OPERATOR_VERSION_ENV,
    CORE_IMAGE_ENV,
    DATASOURCE_IMAGE_ENV,
    GRAFANA_IMAGE_ENV,
    REPORTS_IMAGE_ENV,
];
