use std::sync::Arc;

use crate::{
    WeatherProvider, WeatherQuery, WeatherResponse, WeatherResult, normalize::normalize_location,
};

/// Resolves both ends of a route against a weather provider.
#[derive(Debug, Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Look up origin and destination concurrently. Never fails: provider
    /// problems turn into fallback records.
    pub async fn lookup(&self, query: &WeatherQuery) -> WeatherResponse {
        let (origin, destination) = tokio::join!(
            self.resolve_location(query.origin.as_deref()),
            self.resolve_location(query.destination.as_deref()),
        );

        WeatherResponse { origin, destination }
    }

    /// `None` for an empty or absent location, otherwise live or fallback data.
    pub async fn resolve_location(&self, location: Option<&str>) -> Option<WeatherResult> {
        let location = location.filter(|l| !l.is_empty())?;
        let query = normalize_location(location);

        match self.provider.current_conditions(&query).await {
            Ok(conditions) => Some(WeatherResult::from_conditions(location, conditions)),
            Err(err) => {
                tracing::warn!(
                    provider = %self.provider.id(),
                    %location,
                    %query,
                    error = %err,
                    "weather lookup failed, using fallback"
                );
                Some(WeatherResult::fallback(location))
            }
        }
    }
}
