use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, bail};
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastResolver, ProviderId};

use crate::{display, web};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "5-day weather forecast by US ZIP code")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider in the config file.
    Configure {
        /// Provider short name. Only "openweather" takes a key.
        provider: String,
    },

    /// Show the forecast for a ZIP code.
    Show {
        /// 5-digit US ZIP code.
        zip: String,

        /// Print the normalized result as JSON instead of cards.
        #[arg(long)]
        json: bool,
    },

    /// Serve the search page and forecast views over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

impl Command {
    /// Log filter used when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Command::Serve { .. } => "info",
            _ => "error",
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { zip, json } => show(&zip, json).await,
            Command::Serve { addr } => {
                let resolver = resolver_from_config()?;
                tracing::info!(primary = resolver.has_primary(), "forecast providers ready");
                web::run(Arc::new(resolver), addr).await
            }
        }
    }
}

fn resolver_from_config() -> anyhow::Result<ForecastResolver> {
    let config = Config::load()?;
    ForecastResolver::from_config(&config).context("Failed to build forecast providers")
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    if !id.requires_api_key() {
        println!("Provider '{id}' needs no API key.");
        return Ok(());
    }

    // Read the file directly so environment overrides are not written back.
    let mut config = Config::load_from(&Config::config_file_path()?)?;

    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    let path = config.save()?;

    println!("Saved {id} API key to {}", path.display());
    Ok(())
}

async fn show(zip: &str, json: bool) -> anyhow::Result<()> {
    let resolver = resolver_from_config()?;

    match resolver.resolve(zip).await {
        Ok(result) if json => {
            let out = serde_json::to_string_pretty(&result).context("Failed to serialize forecast")?;
            println!("{out}");
            Ok(())
        }
        Ok(result) => {
            print!("{}", display::render_forecast(&result, &Local));
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            bail!("ZIP code not found: we couldn't find weather data for {zip}")
        }
        Err(err) => {
            tracing::error!(error = ?err, %zip, "forecast resolution failed");
            bail!("Something went wrong while fetching the forecast. Please try again.")
        }
    }
}
