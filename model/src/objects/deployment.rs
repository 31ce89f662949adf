use crate::constants::{
    ANNOTATION_APP_HOST, ANNOTATION_APP_ID, ANNOTATION_APP_PORT, ANNOTATION_APP_PROTOCOL,
    ANNOTATION_CONFIG, ANNOTATION_ENABLED, ANNOTATION_LIVENESS_PROBE_THRESHOLD,
    ANNOTATION_METRICS_PORT, ANNOTATION_READINESS_PROBE_THRESHOLD, ANNOTATION_SIDECAR_CPU_LIMIT,
    ANNOTATION_SIDECAR_CPU_REQUEST, ANNOTATION_SIDECAR_MEMORY_LIMIT,
    ANNOTATION_SIDECAR_MEMORY_REQUEST, CONTAINER_PORT_NAME, DEFAULT_CONTAINER_PORT, NODE_LABEL_ARCH,
    NODE_LABEL_OS, SIDECAR_PROBE_THRESHOLD,
};
use crate::objects::app_labels;
use crate::{AppDescription, FixtureConfig};
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Affinity, Container, ContainerPort, EnvVar, LocalObjectReference, NodeAffinity, NodeSelector,
    NodeSelectorRequirement, NodeSelectorTerm, PodSpec, PodTemplateSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use std::collections::BTreeMap;

/// Defines the deployment that runs `app` in `namespace`. The pods are pinned to nodes matching
/// `config.target_os` and `config.target_arch`, and the image is always pulled so that every run
/// gets the freshly pushed test image.
pub fn deployment(config: &FixtureConfig, namespace: &str, app: &AppDescription) -> Deployment {
    let annotations = sidecar_annotations(app);
    let env = env_vars(&app.app_env);

    Deployment {
        metadata: ObjectMeta {
            name: Some(app.app_name.clone()),
            namespace: Some(namespace.to_string()),
            labels: Some(app_labels(&app.app_name)),
            ..ObjectMeta::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(app.replicas),
            selector: LabelSelector {
                match_labels: Some(app_labels(&app.app_name)),
                ..LabelSelector::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(&app.app_name)),
                    annotations: if annotations.is_empty() {
                        None
                    } else {
                        Some(annotations)
                    },
                    ..ObjectMeta::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: app.app_name.clone(),
                        image: Some(app.image()),
                        image_pull_policy: Some(String::from("Always")),
                        ports: Some(vec![ContainerPort {
                            name: Some(CONTAINER_PORT_NAME.to_string()),
                            protocol: Some(String::from("TCP")),
                            container_port: DEFAULT_CONTAINER_PORT,
                            ..ContainerPort::default()
                        }]),
                        env: if env.is_empty() { None } else { Some(env) },
                        ..Container::default()
                    }],
                    affinity: Some(node_affinity(config)),
                    image_pull_secrets: app.image_pull_secret.as_ref().map(|secret| {
                        vec![LocalObjectReference {
                            name: Some(secret.into()),
                        }]
                    }),
                    ..PodSpec::default()
                }),
            },
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}

/// Creates the annotations that ask the injector to add a sidecar to the app's pods. Empty when
/// the sidecar is not wanted.
fn sidecar_annotations(app: &AppDescription) -> BTreeMap<String, String> {
    if !app.dapr_enabled {
        return BTreeMap::new();
    }

    let mut annotations: BTreeMap<String, String> = [
        (ANNOTATION_ENABLED, "true".to_string()),
        (ANNOTATION_APP_ID, app.app_name.clone()),
        (ANNOTATION_APP_PORT, app.resolved_app_port().to_string()),
        (ANNOTATION_SIDECAR_CPU_LIMIT, app.dapr_cpu_limit.clone()),
        (ANNOTATION_SIDECAR_CPU_REQUEST, app.dapr_cpu_request.clone()),
        (ANNOTATION_SIDECAR_MEMORY_LIMIT, app.dapr_memory_limit.clone()),
        (
            ANNOTATION_SIDECAR_MEMORY_REQUEST,
            app.dapr_memory_request.clone(),
        ),
        (
            ANNOTATION_READINESS_PROBE_THRESHOLD,
            SIDECAR_PROBE_THRESHOLD.to_string(),
        ),
        (
            ANNOTATION_LIVENESS_PROBE_THRESHOLD,
            SIDECAR_PROBE_THRESHOLD.to_string(),
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    let optional = [
        (ANNOTATION_APP_PROTOCOL, &app.app_protocol),
        (ANNOTATION_APP_HOST, &app.app_host),
        (ANNOTATION_METRICS_PORT, &app.metrics_port),
        (ANNOTATION_CONFIG, &app.config),
    ];
    for (key, value) in optional {
        if !value.is_empty() {
            annotations.insert(key.to_string(), value.to_owned());
        }
    }

    annotations
}

fn node_affinity(config: &FixtureConfig) -> Affinity {
    Affinity {
        node_affinity: Some(NodeAffinity {
            required_during_scheduling_ignored_during_execution: Some(NodeSelector {
                node_selector_terms: vec![NodeSelectorTerm {
                    match_expressions: Some(vec![
                        NodeSelectorRequirement {
                            key: NODE_LABEL_OS.to_string(),
                            operator: "In".to_string(),
                            values: Some(vec![config.target_os.clone()]),
                        },
                        NodeSelectorRequirement {
                            key: NODE_LABEL_ARCH.to_string(),
                            operator: "In".to_string(),
                            values: Some(vec![config.target_arch.clone()]),
                        },
                    ]),
                    ..NodeSelectorTerm::default()
                }],
            }),
            ..NodeAffinity::default()
        }),
        ..Affinity::default()
    }
}

fn env_vars(raw_vars: &BTreeMap<String, String>) -> Vec<EnvVar> {
    raw_vars
        .iter()
        .map(|(name, value)| EnvVar {
            name: name.to_owned(),
            value: Some(value.to_owned()),
            value_from: None,
        })
        .collect()
}
