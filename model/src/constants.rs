/// Helper macro to avoid retyping the Dapr annotation prefix when creating annotation keys. When
/// given no parameters, this returns the base domain-like name. When given a string literal
/// parameter it adds `/parameter` to the end.
macro_rules! dapr {
    () => {
        "dapr.io"
    };
    ($s:literal) => {
        concat!(dapr!(), "/", $s)
    };
}

// Identity
pub const TEST_APP_LABEL_KEY: &str = "testapp";
pub const DAPR_SIDECAR_NAME: &str = "daprd";

// Ports
pub const DEFAULT_CONTAINER_PORT: i32 = 3000;
pub const DEFAULT_EXTERNAL_PORT: i32 = 3000;
pub const CONTAINER_PORT_NAME: &str = "http";

// Component objects
pub const DAPR_COMPONENTS_KIND: &str = "components.dapr.io";
pub const DAPR_COMPONENTS_API_VERSION: &str = dapr!("v1alpha1");

// Environment variables
pub const ENV_TEST_NAMESPACE: &str = "DAPR_TEST_NAMESPACE";
pub const ENV_TARGET_OS: &str = "TARGET_OS";
pub const ENV_TARGET_ARCH: &str = "TARGET_ARCH";

// Fallbacks when the environment variables are absent
pub const DEFAULT_TEST_NAMESPACE: &str = "dapr-tests";
pub const DEFAULT_TARGET_OS: &str = "linux";
pub const DEFAULT_TARGET_ARCH: &str = "amd64";

// Sidecar injection annotations
pub const ANNOTATION_ENABLED: &str = dapr!("enabled");
pub const ANNOTATION_APP_ID: &str = dapr!("app-id");
pub const ANNOTATION_APP_PORT: &str = dapr!("app-port");
pub const ANNOTATION_SIDECAR_CPU_LIMIT: &str = dapr!("sidecar-cpu-limit");
pub const ANNOTATION_SIDECAR_CPU_REQUEST: &str = dapr!("sidecar-cpu-request");
pub const ANNOTATION_SIDECAR_MEMORY_LIMIT: &str = dapr!("sidecar-memory-limit");
pub const ANNOTATION_SIDECAR_MEMORY_REQUEST: &str = dapr!("sidecar-memory-request");
pub const ANNOTATION_READINESS_PROBE_THRESHOLD: &str = dapr!("sidecar-readiness-probe-threshold");
pub const ANNOTATION_LIVENESS_PROBE_THRESHOLD: &str = dapr!("sidecar-liveness-probe-threshold");
pub const ANNOTATION_APP_PROTOCOL: &str = dapr!("app-protocol");
pub const ANNOTATION_APP_HOST: &str = dapr!("app-host");
pub const ANNOTATION_METRICS_PORT: &str = dapr!("metrics-port");
pub const ANNOTATION_CONFIG: &str = dapr!("config");
pub const ANNOTATION_PREFIX: &str = dapr!("");

pub const SIDECAR_PROBE_THRESHOLD: &str = "15";

// Well-known node labels https://kubernetes.io/docs/reference/labels-annotations-taints/
pub const NODE_LABEL_OS: &str = "kubernetes.io/os";
pub const NODE_LABEL_ARCH: &str = "kubernetes.io/arch";

#[test]
fn dapr_constants_macro_test() {
    assert_eq!("dapr.io", dapr!());
    assert_eq!("dapr.io/v1alpha1", DAPR_COMPONENTS_API_VERSION);
    assert_eq!("dapr.io/app-id", ANNOTATION_APP_ID);
    assert_eq!("dapr.io/", ANNOTATION_PREFIX);
}
