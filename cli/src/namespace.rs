use anyhow::{Context, Result};
use clap::Parser;
use testapps_model::{namespace, to_yaml, FixtureConfig};

/// Render the namespace test apps are deployed into.
#[derive(Debug, Parser)]
pub(crate) struct Namespace {
    /// Name of the namespace. Defaults to the configured test namespace.
    name: Option<String>,
}

impl Namespace {
    pub(crate) fn run(self, config: &FixtureConfig) -> Result<()> {
        let name = self.name.unwrap_or_else(|| config.namespace.clone());
        print!(
            "{}",
            to_yaml(&namespace(name)).context("Unable to render namespace")?
        );
        Ok(())
    }
}
