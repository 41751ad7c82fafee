use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use route_weather_core::{Config, WeatherQuery, WeatherService, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "route-weather", version, about = "Port weather lookup service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the weather lookup over HTTP.
    Serve {
        /// Listen address; overrides the config file and ROUTE_WEATHER_BIND.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Look up weather once and print the JSON response.
    Lookup {
        /// Origin port or region, e.g. "Nhava Sheva Port/Mumbai - INJNP".
        #[arg(long)]
        origin: Option<String>,

        /// Destination port or region.
        #[arg(long)]
        destination: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => {
                let config = Config::load()?;
                let bind = bind.unwrap_or_else(|| config.bind_addr().to_string());
                let service = WeatherService::new(provider_from_config(&config));

                route_weather_server::run_http_server(service, &bind).await?;
            }
            Command::Lookup { origin, destination } => {
                let config = Config::load()?;
                let service = WeatherService::new(provider_from_config(&config));

                let response = service.lookup(&WeatherQuery { origin, destination }).await;
                let json = serde_json::to_string_pretty(&response)
                    .context("Failed to serialize weather response")?;
                println!("{json}");
            }
            Command::Configure => {
                let mut config = Config::load_file()?;

                let api_key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                config.upsert_api_key(api_key.trim().to_string());
                let path = config.save()?;
                println!("Saved configuration to {}", path.display());
            }
        }

        Ok(())
    }
}
