use crate::{Config, error::FetchError, model::ForecastRequest};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::Debug;

pub mod pirate_weather;

pub use pirate_weather::PirateWeatherProvider;

/// Seam between the message listener and the HTTP layer, so the listener can
/// be exercised against a stub.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Validate the request and fetch one forecast, returning the provider's
    /// JSON object untouched.
    async fn fetch(&self, request: &ForecastRequest) -> Result<Map<String, Value>, FetchError>;
}

/// Construct the provider, honoring the config's endpoint override.
pub fn provider_from_config(config: &Config) -> PirateWeatherProvider {
    match &config.base_url {
        Some(base) => PirateWeatherProvider::with_base_url(base.clone()),
        None => PirateWeatherProvider::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::pirate_weather::DEFAULT_BASE_URL;

    #[test]
    fn provider_from_config_uses_default_endpoint() {
        let provider = provider_from_config(&Config::default());
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn provider_from_config_honors_override() {
        let config = Config {
            base_url: Some("http://127.0.0.1:9000/".to_string()),
            ..Config::default()
        };
        let provider = provider_from_config(&config);
        assert_eq!(provider.base_url(), "http://127.0.0.1:9000");
    }
}
