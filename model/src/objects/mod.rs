/// Encapsulates the K8S object definitions for test apps
mod component;
mod deployment;
mod namespace;
mod service;

pub use component::{component, Component, ComponentSpec, MetadataItem, SecretKeyRef};
pub use deployment::deployment;
pub use namespace::namespace;
pub use service::service;

use crate::constants::TEST_APP_LABEL_KEY;
use crate::{AppDescription, FixtureConfig};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use kube::ResourceExt;
use log::debug;
use maplit::btreemap;
use serde::Serialize;
use std::collections::BTreeMap;

/// The objects that make up one running test app.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TestAppObjects {
    pub deployment: Deployment,
    pub service: Service,
}

/// Builds the deployment and service for `app` in `namespace`.
pub fn test_app_objects(
    config: &FixtureConfig,
    namespace: &str,
    app: &AppDescription,
) -> TestAppObjects {
    let objects = TestAppObjects {
        deployment: deployment(config, namespace, app),
        service: service(namespace, app),
    };
    debug!(
        "Built deployment '{}' and service '{}' in namespace '{}'",
        objects.deployment.name_any(),
        objects.service.name_any(),
        namespace
    );
    objects
}

/// The label selector that matches the pods of the app named `app_name`, e.g. for listing them.
pub fn app_label_selector(app_name: &str) -> String {
    format!("{}={}", TEST_APP_LABEL_KEY, app_name)
}

/// The identity label shared by an app's deployment, pods and service.
pub(crate) fn app_labels(app_name: &str) -> BTreeMap<String, String> {
    btreemap! { TEST_APP_LABEL_KEY.to_string() => app_name.to_string() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn selector_string() {
        assert_eq!(app_label_selector("hellodapr"), "testapp=hellodapr");
    }

    #[test]
    fn objects_correlate() {
        let app = AppDescription::new("hellodapr", "e2e-hellodapr", "dapriotest");
        let objects = test_app_objects(&FixtureConfig::default(), "dapr-tests", &app);
        let selector = objects.service.spec.as_ref().unwrap().selector.clone();
        let pod_labels = objects
            .deployment
            .spec
            .as_ref()
            .unwrap()
            .template
            .metadata
            .as_ref()
            .unwrap()
            .labels
            .clone();
        assert_eq!(selector, pod_labels);
        assert_eq!(selector, Some(app_labels("hellodapr")));
    }
}
