use anyhow::{Context, Result};
use clap::Parser;
use testapps_model::{component, to_yaml, MetadataItem};

/// Render a Dapr component.
#[derive(Debug, Parser)]
pub(crate) struct Component {
    /// Name of the component.
    #[clap(long)]
    name: String,

    /// The component type, e.g. `state.redis`.
    #[clap(long = "type", short = 't')]
    type_name: String,

    /// Metadata items with inline values. (key=value)
    #[clap(value_parser = parse_key_val)]
    metadata: Vec<(String, String)>,

    /// Metadata items read from a secret. (key=secret-name:secret-key)
    #[clap(long = "secret-ref", value_parser = parse_secret_ref)]
    secret_refs: Vec<(String, String, String)>,

    /// The version of the component implementation, e.g. `v1`.
    #[clap(long = "component-version")]
    component_version: Option<String>,

    /// Let the sidecar start even if the component fails to initialize.
    #[clap(long = "ignore-errors")]
    ignore_errors: bool,

    /// How long the sidecar waits for the component to initialize, e.g. `1m`.
    #[clap(long = "init-timeout")]
    init_timeout: Option<String>,
}

impl Component {
    pub(crate) fn run(self) -> Result<()> {
        let items = self
            .metadata
            .into_iter()
            .map(|(name, value)| MetadataItem::new(name, value))
            .chain(
                self.secret_refs
                    .into_iter()
                    .map(|(name, secret, key)| MetadataItem::from_secret(name, secret, key)),
            )
            .collect();
        let mut component = component(self.name, self.type_name, items);
        component.spec.version = self.component_version;
        component.spec.ignore_errors = self.ignore_errors.then_some(true);
        component.spec.init_timeout = self.init_timeout;
        print!(
            "{}",
            to_yaml(&component).context("Unable to render component")?
        );
        Ok(())
    }
}

fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected 'key=value' but got '{}'", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn parse_secret_ref(s: &str) -> std::result::Result<(String, String, String), String> {
    let (key, reference) = parse_key_val(s)?;
    let (secret, secret_key) = reference
        .split_once(':')
        .ok_or_else(|| format!("expected 'key=secret-name:secret-key' but got '{}'", s))?;
    Ok((key, secret.to_string(), secret_key.to_string()))
}
