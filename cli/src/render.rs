use anyhow::{Context, Result};
use clap::{value_parser, Parser};
use log::info;
use std::path::PathBuf;
use testapps_model::{
    namespace, read_app_manifest, test_app_objects, to_yaml, to_yaml_stream, FixtureConfig,
};

/// Render the deployment and service of every app described in the YAML file at `path`.
#[derive(Debug, Parser)]
pub(crate) struct Render {
    /// Path to a YAML file with one app description per document.
    #[clap(value_parser = value_parser!(PathBuf))]
    path: PathBuf,

    /// Also render the namespace, ahead of the app objects.
    #[clap(long = "with-namespace")]
    with_namespace: bool,
}

impl Render {
    pub(crate) fn run(self, config: &FixtureConfig) -> Result<()> {
        let apps = read_app_manifest(&self.path).context(format!(
            "Unable to read app descriptions from '{}'",
            self.path.display()
        ))?;
        info!(
            "Rendering {} app(s) into namespace '{}'",
            apps.len(),
            config.namespace
        );

        let mut docs = Vec::new();
        if self.with_namespace {
            docs.push(
                to_yaml(&namespace(&config.namespace)).context("Unable to render namespace")?,
            );
        }
        for app in &apps {
            let objects = test_app_objects(config, &config.namespace, app);
            docs.push(to_yaml(&objects.deployment).context(format!(
                "Unable to render deployment for '{}'",
                app.app_name
            ))?);
            docs.push(to_yaml(&objects.service).context(format!(
                "Unable to render service for '{}'",
                app.app_name
            ))?);
        }

        print!("{}", to_yaml_stream(docs));
        Ok(())
    }
}
