use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Defines the namespace the test apps are deployed into.
pub fn namespace<S: Into<String>>(name: S) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.into()),
            ..Default::default()
        },
        spec: None,
        status: None,
    }
}

#[test]
fn bare_namespace() {
    let ns = namespace("dapr-tests");
    assert_eq!(ns.metadata.name.as_deref(), Some("dapr-tests"));
    assert!(ns.metadata.labels.is_none());
    assert!(ns.spec.is_none());
}
