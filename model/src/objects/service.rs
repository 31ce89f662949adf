use crate::constants::DEFAULT_EXTERNAL_PORT;
use crate::objects::app_labels;
use crate::AppDescription;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

const SERVICE_TYPE_CLUSTER_IP: &str = "ClusterIP";
const SERVICE_TYPE_LOAD_BALANCER: &str = "LoadBalancer";

/// Defines the service in front of `app`. Apps with ingress enabled get an external load balancer,
/// everything else stays cluster-internal.
pub fn service(namespace: &str, app: &AppDescription) -> Service {
    let service_type = if app.ingress_enabled {
        SERVICE_TYPE_LOAD_BALANCER
    } else {
        SERVICE_TYPE_CLUSTER_IP
    };

    Service {
        metadata: ObjectMeta {
            name: Some(app.app_name.clone()),
            namespace: Some(namespace.to_string()),
            labels: Some(app_labels(&app.app_name)),
            ..ObjectMeta::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(app_labels(&app.app_name)),
            ports: Some(vec![ServicePort {
                protocol: Some(String::from("TCP")),
                port: DEFAULT_EXTERNAL_PORT,
                target_port: Some(IntOrString::Int(app.service_target_port())),
                ..ServicePort::default()
            }]),
            type_: Some(service_type.to_string()),
            ..ServiceSpec::default()
        }),
        ..Service::default()
    }
}
