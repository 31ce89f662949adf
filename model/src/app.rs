use crate::constants::DEFAULT_CONTAINER_PORT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Describes a test application: what image to run, how many replicas, how it is reached and
/// whether the Dapr sidecar should be injected next to it. Every field has a default so that
/// manifests only need to mention what they care about.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppDescription {
    /// The name of the app. This is used as the object name of the deployment and service and as
    /// the value of the `testapp` label that ties them together.
    pub app_name: String,
    /// The container image name, without the registry.
    pub image_name: String,
    /// The registry that hosts `image_name`.
    pub registry_name: String,
    pub replicas: i32,
    /// The port the app listens on. `0` means "use the default container port"; any other value,
    /// including a negative one, is treated as explicitly set.
    pub app_port: i32,
    /// Whether the service should be exposed through an external load balancer.
    pub ingress_enabled: bool,
    /// Whether the Dapr sidecar should be injected into the app's pods.
    pub dapr_enabled: bool,
    #[serde(rename = "daprCPULimit")]
    pub dapr_cpu_limit: String,
    #[serde(rename = "daprCPURequest")]
    pub dapr_cpu_request: String,
    pub dapr_memory_limit: String,
    pub dapr_memory_request: String,
    /// Empty means "let the sidecar decide".
    pub app_protocol: String,
    pub app_host: String,
    pub metrics_port: String,
    /// The name of a Dapr configuration object to apply to the sidecar.
    pub config: String,
    /// The name of an image registry pull secret if one is needed to pull the app image.
    pub image_pull_secret: Option<String>,
    /// Environment variables for the app container.
    pub app_env: BTreeMap<String, String>,
}

impl AppDescription {
    /// Creates a single-replica app description with a name, image and registry, leaving
    /// everything else at its default.
    pub fn new<S1, S2, S3>(app_name: S1, image_name: S2, registry_name: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            app_name: app_name.into(),
            image_name: image_name.into(),
            registry_name: registry_name.into(),
            replicas: 1,
            ..Self::default()
        }
    }

    /// The full image reference, `<registry>/<image>`.
    pub fn image(&self) -> String {
        format!("{}/{}", self.registry_name, self.image_name)
    }

    /// The port the sidecar is told the app listens on. Only an unset (`0`) port is replaced.
    pub fn resolved_app_port(&self) -> i32 {
        if self.app_port == 0 {
            DEFAULT_CONTAINER_PORT
        } else {
            self.app_port
        }
    }

    /// The port the service forwards to. Only a positive port overrides the default.
    pub fn service_target_port(&self) -> i32 {
        if self.app_port > 0 {
            self.app_port
        } else {
            DEFAULT_CONTAINER_PORT
        }
    }
}
