use crate::env::{into_bytes, EnvSource};
use crate::error::{self, Result};
use models::constants::{
    APP_NAME_ENV, CORE_IMAGE_ENV, DATASOURCE_IMAGE_ENV, GRAFANA_IMAGE_ENV, OPERATOR_VERSION_ENV,
    REPORTS_IMAGE_ENV,
};
use snafu::OptionExt;
use tracing::{event, instrument, Level};

/// The values rendered into the generated constants file.
///
/// An `ImageConstants` can only be obtained from [`ImageConstants::from_env`], so holding one
/// means every required variable was present. Values are kept as the raw bytes of the
/// environment; empty and non-unicode values are allowed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageConstants {
    app_name: Vec<u8>,
    operator_version: Vec<u8>,
    core_image_tag: Vec<u8>,
    datasource_image_tag: Vec<u8>,
    grafana_image_tag: Vec<u8>,
    reports_image_tag: Vec<u8>,
}

impl ImageConstants {
    /// Reads every required variable from `env`, stopping at the first one that is unset.
    #[instrument(skip(env))]
    pub fn from_env<E: EnvSource>(env: &E) -> Result<Self> {
        let consts = Self {
            app_name: required_var(env, APP_NAME_ENV)?,
            operator_version: required_var(env, OPERATOR_VERSION_ENV)?,
            core_image_tag: required_var(env, CORE_IMAGE_ENV)?,
            datasource_image_tag: required_var(env, DATASOURCE_IMAGE_ENV)?,
            grafana_image_tag: required_var(env, GRAFANA_IMAGE_ENV)?,
            reports_image_tag: required_var(env, REPORTS_IMAGE_ENV)?,
        };
        event!(
            Level::DEBUG,
            operator_version = %String::from_utf8_lossy(&consts.operator_version),
            "Read image constants from the environment."
        );
        Ok(consts)
    }

    /// User facing name of the operand application.
    pub fn app_name(&self) -> &[u8] {
        &self.app_name
    }

    /// Version of the operator.
    pub fn operator_version(&self) -> &[u8] {
        &self.operator_version
    }

    /// Default tag for the core application image.
    pub fn core_image_tag(&self) -> &[u8] {
        &self.core_image_tag
    }

    /// Default tag for the datasource image.
    pub fn datasource_image_tag(&self) -> &[u8] {
        &self.datasource_image_tag
    }

    /// Default tag for the dashboard image.
    pub fn grafana_image_tag(&self) -> &[u8] {
        &self.grafana_image_tag
    }

    /// Default tag for the reports image.
    pub fn reports_image_tag(&self) -> &[u8] {
        &self.reports_image_tag
    }
}

fn required_var<E: EnvSource>(env: &E, name: &str) -> Result<Vec<u8>> {
    env.lookup(name)
        .map(into_bytes)
        .context(error::MissingVariableSnafu { name })
}
