//! Core library for the route weather service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location normalization and condition classification
//! - Abstraction over weather providers
//! - The origin/destination lookup used by the HTTP front-end
//!
//! It is used by `route-weather-server`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;

pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::ProviderError;
pub use model::{CurrentConditions, Severity, WeatherQuery, WeatherResponse, WeatherResult};
pub use provider::{ProviderId, WeatherProvider, provider_from_config};
pub use service::WeatherService;
