use anyhow::Context;
use clap::Parser;

use gws::config::{self, Config, DirectoryConfig};

mod opts;

use opts::Opts;

#[tokio::main]
async fn main() {
    // Group IDs are checked while parsing, so nothing below runs with an invalid ID
    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run(opts).await {
        Ok(status) => println!("STATUS: {}", status.as_u16()),
        Err(e) => {
            eprintln!("FATAL: error creating group: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run(opts: Opts) -> anyhow::Result<reqwest::StatusCode> {
    let directory = load_config(&opts).await?;
    tracing::info!(
        group = %opts.uw_group,
        admins = %opts.uw_group_admins,
        base_url = %directory.base_url,
        "Creating group"
    );
    // The status is reported as is, even when the service rejected the request
    let status = gws::create_or_update_group(&directory, &opts.uw_group, &opts.uw_group_admins)
        .await
        .with_context(|| format!("failed to create {}", opts.uw_group))?;
    Ok(status)
}

// find each setting
//   1. cli options or environment if set
//   2. config file if set
async fn load_config(opts: &Opts) -> anyhow::Result<DirectoryConfig> {
    let file = match &opts.config_file {
        Some(path) => Config::load(path).await?,
        None => match config::default_config_file() {
            Some(path) => Config::load_optional(path).await?,
            None => {
                tracing::warn!("Could not find a default config path");
                Config::default()
            }
        },
    };
    opts.config()
        .or(file)
        .resolve()
        .map_err(|e| {
            anyhow::anyhow!(
                "{}. HINT: set it on the command line, in the environment or in the config file",
                e
            )
        })
}
