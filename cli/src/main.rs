/*!

This is the command line interface for rendering the Kubernetes objects of end-to-end test apps.

!*/

mod component;
mod namespace;
mod render;
mod show_config;

use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use testapps_model::FixtureConfig;

/// The command line interface for rendering test app deployments, services, namespaces and Dapr
/// components as YAML manifests.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// The namespace for the test apps. Defaults to `DAPR_TEST_NAMESPACE` or `dapr-tests`.
    #[clap(long = "namespace", short = 'n')]
    namespace: Option<String>,
    /// The node OS test app pods are pinned to. Defaults to `TARGET_OS` or `linux`.
    #[clap(long = "target-os")]
    target_os: Option<String>,
    /// The node architecture test app pods are pinned to. Defaults to `TARGET_ARCH` or `amd64`.
    #[clap(long = "target-arch")]
    target_arch: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Render the deployment and service of every app in a file.
    Render(render::Render),
    /// Render a namespace.
    Namespace(namespace::Namespace),
    /// Render a Dapr component.
    Component(component::Component),
    /// Show the resolved configuration.
    Config(show_config::ShowConfig),
}

fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    if let Err(e) = run(args) {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = fixture_config(&args);
    match args.command {
        Command::Render(render) => render.run(&config),
        Command::Namespace(namespace) => namespace.run(&config),
        Command::Component(component) => component.run(),
        Command::Config(show_config) => show_config.run(&config),
    }
}

/// The environment-resolved configuration with any command line overrides applied.
fn fixture_config(args: &Args) -> FixtureConfig {
    let mut config = FixtureConfig::process().clone();
    if let Some(namespace) = &args.namespace {
        config = config.with_namespace(namespace);
    }
    if let Some(target_os) = &args.target_os {
        config = config.with_target_os(target_os);
    }
    if let Some(target_arch) = &args.target_arch {
        config = config.with_target_arch(target_arch);
    }
    config
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate and the model.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .filter(Some("testapps_model"), level)
                .init();
        }
    }
}
