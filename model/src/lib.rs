/*!

This library provides the Kubernetes object definitions used to stand up end-to-end test apps:
the deployment and service for each app, the namespace they live in, and the Dapr components the
sidecars load. Building objects has no side effects; submitting them to a cluster is left to the
caller's API client.

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]

pub use app::AppDescription;
pub use config::FixtureConfig;
pub use error::{Error, Result};
pub use manifest::{convert_app_manifest, read_app_manifest, to_yaml, to_yaml_stream};
pub use objects::{
    app_label_selector, component, deployment, namespace, service, test_app_objects, Component,
    ComponentSpec, MetadataItem, SecretKeyRef, TestAppObjects,
};

mod app;
mod config;
pub mod constants;
mod error;
mod manifest;
pub mod objects;
