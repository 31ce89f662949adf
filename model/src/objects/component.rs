use crate::constants::{DAPR_COMPONENTS_API_VERSION, DAPR_COMPONENTS_KIND};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Dapr component: a named, typed bag of metadata that the sidecar loads at startup to provide
/// a capability such as a state store or a binding.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct Component {
    #[serde(flatten)]
    pub types: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: ComponentSpec,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// The component type, e.g. `state.redis` or `bindings.kafka`.
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_timeout: Option<String>,
    #[serde(default)]
    pub metadata: Vec<MetadataItem>,
}

/// A single name/value pair of component metadata. The value is given either inline or as a
/// reference to a key of a secret.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeyRef>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
pub struct SecretKeyRef {
    pub name: String,
    pub key: String,
}

impl MetadataItem {
    pub fn new<S, V>(name: S, value: V) -> Self
    where
        S: Into<String>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            value: Some(value.into()),
            secret_key_ref: None,
        }
    }

    /// A metadata item whose value is read from `key` of the secret `secret_name`.
    pub fn from_secret<S1, S2, S3>(name: S1, secret_name: S2, key: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            name: name.into(),
            value: None,
            secret_key_ref: Some(SecretKeyRef {
                name: secret_name.into(),
                key: key.into(),
            }),
        }
    }
}

/// Defines the component `name` of type `type_name`. The metadata items are kept in the order
/// given.
pub fn component<S1, S2>(name: S1, type_name: S2, metadata: Vec<MetadataItem>) -> Component
where
    S1: Into<String>,
    S2: Into<String>,
{
    Component {
        types: TypeMeta {
            api_version: DAPR_COMPONENTS_API_VERSION.to_string(),
            kind: DAPR_COMPONENTS_KIND.to_string(),
        },
        metadata: ObjectMeta {
            name: Some(name.into()),
            ..ObjectMeta::default()
        },
        spec: ComponentSpec {
            type_: type_name.into(),
            metadata,
            ..ComponentSpec::default()
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn wraps_type_and_metadata() {
        let component = component(
            "statestore",
            "state.redis",
            vec![
                MetadataItem::new("redisHost", "dapr-redis-master:6379"),
                MetadataItem::from_secret("redisPassword", "redis", "password"),
                MetadataItem::new("actorStateStore", true),
            ],
        );
        assert_eq!(component.types.kind, "components.dapr.io");
        assert_eq!(component.metadata.name.as_deref(), Some("statestore"));
        assert!(component.metadata.namespace.is_none());
        assert_eq!(component.spec.type_, "state.redis");
        let names: Vec<&str> = component
            .spec
            .metadata
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["redisHost", "redisPassword", "actorStateStore"]);
    }

    #[test]
    fn serializes_like_a_manifest() {
        let component = component(
            "messagebus",
            "pubsub.redis",
            vec![
                MetadataItem::new("redisHost", "localhost:6379"),
                MetadataItem::from_secret("redisPassword", "redis", "password"),
            ],
        );
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(
            value,
            json!({
                "apiVersion": "dapr.io/v1alpha1",
                "kind": "components.dapr.io",
                "metadata": { "name": "messagebus" },
                "spec": {
                    "type": "pubsub.redis",
                    "metadata": [
                        { "name": "redisHost", "value": "localhost:6379" },
                        {
                            "name": "redisPassword",
                            "secretKeyRef": { "name": "redis", "key": "password" }
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn optional_spec_fields() {
        let mut component = component(
            "kafka-binding",
            "bindings.kafka",
            vec![MetadataItem::new("topics", "sample")],
        );
        component.spec.version = Some("v1".to_string());
        component.spec.ignore_errors = Some(true);
        component.spec.init_timeout = Some("1m".to_string());
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(
            value["spec"],
            json!({
                "type": "bindings.kafka",
                "version": "v1",
                "ignoreErrors": true,
                "initTimeout": "1m",
                "metadata": [{ "name": "topics", "value": "sample" }]
            })
        );

        component.spec.ignore_errors = Some(false);
        component.spec.init_timeout = None;
        let value = serde_json::to_value(&component).unwrap();
        assert_eq!(value["spec"]["ignoreErrors"], json!(false));
        assert!(value["spec"].get("initTimeout").is_none());
    }

    #[test]
    fn empty_metadata() {
        let component = component("binding", "bindings.cron", Vec::new());
        assert!(component.spec.metadata.is_empty());
        let back: Component =
            serde_json::from_value(serde_json::to_value(&component).unwrap()).unwrap();
        assert_eq!(back, component);
    }
}
