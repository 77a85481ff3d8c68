use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use pubsmoke_core::{run_smoke, Config, SmokeError, SystemEffects};
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::PubsmokeCli;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = PubsmokeCli::parse();
    init_tracing();

    match run(&cli) {
        Ok(()) => Ok(()),
        Err(err) => match err.downcast_ref::<SmokeError>() {
            Some(smoke @ SmokeError::ToolFailed { .. }) => {
                error!("{smoke}");
                std::process::exit(smoke.exit_code());
            }
            _ => Err(eyre!("{err:?}")),
        },
    }
}

fn run(cli: &PubsmokeCli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let effects = SystemEffects::new(&config)?;
    let report = run_smoke(&config, &effects, &cli.project)?;
    println!(
        "pubsmoke: published {} {} ({} auth) to {}",
        report.project.name, report.project.version, report.mode, report.publish_url
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PUBSMOKE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
