use crate::error::{self, Result};
use crate::AppDescription;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::Path;

const DOCUMENT_START: &str = "---";

/// Returns the YAML representation of `object` as a single document.
pub fn to_yaml<T>(object: &T) -> Result<String>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(object).context(error::SerdeYamlSnafu {
        action: "serialize object",
    })?;
    let yaml = yaml.trim_end();
    Ok(if yaml.starts_with(DOCUMENT_START) {
        format!("{}\n", yaml)
    } else {
        format!("{}\n{}\n", DOCUMENT_START, yaml)
    })
}

/// Joins documents created by `to_yaml` into one YAML stream.
pub fn to_yaml_stream<I, S>(documents: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    documents
        .into_iter()
        .map(|doc| doc.as_ref().to_string())
        .collect::<Vec<String>>()
        .concat()
}

/// Reads a YAML file containing one or more app descriptions, one per document.
pub fn read_app_manifest(path: &Path) -> Result<Vec<AppDescription>> {
    let manifest_string = std::fs::read_to_string(path).context(error::FileSnafu { path })?;
    convert_app_manifest(&manifest_string)
}

/// Parses a YAML stream of app descriptions. Empty documents are skipped.
pub fn convert_app_manifest(manifest_string: &str) -> Result<Vec<AppDescription>> {
    let mut apps = Vec::new();
    for app_doc in serde_yaml::Deserializer::from_str(manifest_string) {
        let value = serde_yaml::Value::deserialize(app_doc).context(error::SerdeYamlSnafu {
            action: "deserialize manifest",
        })?;
        if value.is_null() {
            continue;
        }
        let app: AppDescription =
            serde_yaml::from_value(value).context(error::SerdeYamlSnafu {
                action: "deserialize app description",
            })?;
        apps.push(app);
    }
    Ok(apps)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::objects::namespace;

    #[test]
    fn single_document() {
        let yaml = to_yaml(&namespace("dapr-tests")).unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.ends_with('\n'));
        assert!(yaml.contains("name: dapr-tests"));
    }

    #[test]
    fn stream_of_documents() {
        let docs = vec![
            to_yaml(&namespace("one")).unwrap(),
            to_yaml(&namespace("two")).unwrap(),
        ];
        let stream = to_yaml_stream(&docs);
        assert_eq!(stream.matches("---").count(), 2);
        let names: Vec<String> = serde_yaml::Deserializer::from_str(&stream)
            .map(|doc| {
                let ns = k8s_openapi::api::core::v1::Namespace::deserialize(doc).unwrap();
                ns.metadata.name.unwrap()
            })
            .collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn multiple_apps() {
        let apps = convert_app_manifest(
            r#"---
appName: hellodapr
imageName: e2e-hellodapr
registryName: dapriotest
replicas: 1
daprEnabled: true
---
appName: stateapp
imageName: e2e-stateapp
registryName: dapriotest
replicas: 2
ingressEnabled: true
appPort: 8080
"#,
        )
        .unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].app_name, "hellodapr");
        assert!(apps[0].dapr_enabled);
        assert_eq!(apps[1].app_port, 8080);
        assert!(apps[1].ingress_enabled);
    }

    #[test]
    fn malformed_manifest() {
        assert!(convert_app_manifest("appName: [unclosed").is_err());
        assert!(convert_app_manifest("replicas: many").is_err());
    }

    #[test]
    fn missing_file() {
        assert!(read_app_manifest(Path::new("/does/not/exist.yaml")).is_err());
    }
}
