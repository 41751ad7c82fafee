use crate::{
    Config, CurrentConditions, ProviderError, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod openweather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather."
            )),
        }
    }
}

/// Source of current conditions for a geocodable query string.
///
/// Implementations make a single attempt per call.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn current_conditions(&self, query: &str) -> Result<CurrentConditions, ProviderError>;
}

/// Construct the configured provider.
///
/// A missing API key is not an error here: the provider is still built and
/// every lookup through it falls back, so the service stays up.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    let provider = match config.api_key() {
        Some(key) => OpenWeatherProvider::new(key.to_owned()),
        None => {
            tracing::warn!("no OpenWeather API key configured; all lookups will fall back");
            OpenWeatherProvider::unconfigured()
        }
    };

    Arc::new(provider.with_base_url(config.base_url()))
}
