use crate::constants::{
    DEFAULT_TARGET_ARCH, DEFAULT_TARGET_OS, DEFAULT_TEST_NAMESPACE, ENV_TARGET_ARCH, ENV_TARGET_OS,
    ENV_TEST_NAMESPACE,
};
use crate::error::{self, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

/// The settings shared by every object built for a test run: the namespace the test apps live in
/// and the node OS and architecture their pods are pinned to.
///
/// Each setting can be overridden with an environment variable:
///
/// ```text
/// DAPR_TEST_NAMESPACE=my-tests
/// TARGET_OS=windows
/// TARGET_ARCH=arm64
/// ```
///
/// Use [`FixtureConfig::process`] to get the value resolved once for the lifetime of the process,
/// or [`FixtureConfig::from_env`] to read the environment again.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureConfig {
    pub namespace: String,
    pub target_os: String,
    pub target_arch: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_TEST_NAMESPACE.to_string(),
            target_os: DEFAULT_TARGET_OS.to_string(),
            target_arch: DEFAULT_TARGET_ARCH.to_string(),
        }
    }
}

impl FixtureConfig {
    /// The configuration resolved from the environment the first time this is called. Later
    /// changes to the environment are not seen.
    pub fn process() -> &'static FixtureConfig {
        &PROCESS_CONFIG
    }

    /// Reads the configuration from the current environment, using the defaults for any variable
    /// that is not set. Variables that are not valid unicode are skipped.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Reads the configuration from `vars` as if they were the environment.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, EnvSettings>(vars)
            .context(error::EnvDecodeSnafu)?
            .into())
    }

    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_target_os<S: Into<String>>(mut self, target_os: S) -> Self {
        self.target_os = target_os.into();
        self
    }

    pub fn with_target_arch<S: Into<String>>(mut self, target_arch: S) -> Self {
        self.target_arch = target_arch.into();
        self
    }
}

/// The environment variables as `envy` sees them. `envy` lowercases variable names before
/// matching them to fields.
#[derive(Debug, Deserialize)]
struct EnvSettings {
    /// `DAPR_TEST_NAMESPACE`
    #[serde(default = "default_namespace")]
    dapr_test_namespace: String,
    /// `TARGET_OS`
    #[serde(default = "default_target_os")]
    target_os: String,
    /// `TARGET_ARCH`
    #[serde(default = "default_target_arch")]
    target_arch: String,
}

impl From<EnvSettings> for FixtureConfig {
    fn from(settings: EnvSettings) -> Self {
        Self {
            namespace: settings.dapr_test_namespace,
            target_os: settings.target_os,
            target_arch: settings.target_arch,
        }
    }
}

lazy_static::lazy_static! {
    static ref PROCESS_CONFIG: FixtureConfig = {
        let config = FixtureConfig::from_env().unwrap_or_else(|e| {
            warn!(
                "Ignoring {}, {} and {}: {}",
                ENV_TEST_NAMESPACE, ENV_TARGET_OS, ENV_TARGET_ARCH, e
            );
            FixtureConfig::default()
        });
        debug!("Resolved fixture configuration: {:?}", config);
        config
    };
}

// We need these to provide defaults for serde.
fn default_namespace() -> String {
    DEFAULT_TEST_NAMESPACE.to_string()
}

fn default_target_os() -> String {
    DEFAULT_TARGET_OS.to_string()
}

fn default_target_arch() -> String {
    DEFAULT_TARGET_ARCH.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_when_unset() {
        let config = FixtureConfig::from_vars(vars(&[("PATH", "/usr/bin")])).unwrap();
        assert_eq!(config, FixtureConfig::default());
        assert_eq!(config.namespace, "dapr-tests");
        assert_eq!(config.target_os, "linux");
        assert_eq!(config.target_arch, "amd64");
    }

    #[test]
    fn each_variable_overrides_its_default() {
        let config = FixtureConfig::from_vars(vars(&[
            (ENV_TEST_NAMESPACE, "e2e"),
            (ENV_TARGET_ARCH, "arm64"),
        ]))
        .unwrap();
        assert_eq!(config.namespace, "e2e");
        assert_eq!(config.target_os, DEFAULT_TARGET_OS);
        assert_eq!(config.target_arch, "arm64");
    }

    #[test]
    fn process_config_is_read_once() {
        let first = FixtureConfig::process().clone();
        std::env::set_var(ENV_TARGET_OS, "plan9-after-start");
        let second = FixtureConfig::process();
        assert_eq!(&first, second);
        assert!(std::ptr::eq(FixtureConfig::process(), second));
        std::env::remove_var(ENV_TARGET_OS);
    }

    #[cfg(unix)]
    #[test]
    fn unrelated_non_unicode_variable_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let key = "TESTAPPS_MODEL_NON_UNICODE";
        std::env::set_var(key, OsStr::from_bytes(&[0xff, 0xfe]));
        let result = FixtureConfig::from_env();
        std::env::remove_var(key);

        let expected_namespace = std::env::var(ENV_TEST_NAMESPACE)
            .unwrap_or_else(|_| DEFAULT_TEST_NAMESPACE.to_string());
        let config = result.unwrap();
        assert_eq!(config.namespace, expected_namespace);
        assert!(!config.target_os.is_empty());
        assert!(!config.target_arch.is_empty());
    }

    #[test]
    fn overrides() {
        let config = FixtureConfig::default()
            .with_namespace("other")
            .with_target_os("windows")
            .with_target_arch("arm64");
        assert_eq!(config.namespace, "other");
        assert_eq!(config.target_os, "windows");
        assert_eq!(config.target_arch, "arm64");
    }
}
