use anyhow::{Context, Result};
use clap::Parser;
use testapps_model::{to_yaml, FixtureConfig};

/// Show the namespace and node platform the objects will be built for.
#[derive(Debug, Parser)]
pub(crate) struct ShowConfig {
    /// Output the configuration in JSON format.
    #[clap(long = "json")]
    json: bool,
}

impl ShowConfig {
    pub(crate) fn run(self, config: &FixtureConfig) -> Result<()> {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(config)
                    .context("Could not create string from configuration.")?
            );
        } else {
            print!(
                "{}",
                to_yaml(config).context("Could not create string from configuration.")?
            );
        }
        Ok(())
    }
}
