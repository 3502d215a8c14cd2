use std::borrow::Borrow;
use std::collections::HashMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::hash::{BuildHasher, Hash};

#[cfg(any(test, feature = "mockall"))]
use mockall::mock;

/// A trait providing read access to named configuration values. This is provided as a trait in
/// order to allow fake environments and mocks to be used in place of the process environment.
pub trait EnvSource {
    /// Look up a single variable. `None` means the variable is not set; any value that is set,
    /// including an empty or non-unicode one, is returned as-is.
    fn lookup(&self, name: &str) -> Option<OsString>;
}

#[cfg(any(test, feature = "mockall"))]
mock! {
    /// A Mock EnvSource for use in tests.
    pub EnvSource {}
    impl EnvSource for EnvSource {
        fn lookup(&self, name: &str) -> Option<OsString>;
    }
}

/// Reads variables from the environment of the current process.
#[derive(Copy, Clone, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<OsString> {
        env::var_os(name)
    }
}

impl<K, V, S> EnvSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<OsStr>,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<OsString> {
        self.get(name).map(|value| value.as_ref().to_os_string())
    }
}

/// The raw bytes of an environment value.
#[cfg(unix)]
pub(crate) fn into_bytes(value: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    value.into_vec()
}

/// The raw bytes of an environment value. Values that are not valid unicode lose their unpaired
/// surrogates.
#[cfg(not(unix))]
pub(crate) fn into_bytes(value: OsString) -> Vec<u8> {
    match value.into_string() {
        Ok(value) => value.into_bytes(),
        Err(value) => value.to_string_lossy().into_owned().into_bytes(),
    }
}
