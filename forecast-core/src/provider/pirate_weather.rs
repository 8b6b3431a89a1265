use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::FetchError,
    model::{ForecastRequest, ValidRequest},
};

use super::ForecastProvider;

/// Public Pirate Weather endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.pirateweather.net";

#[derive(Debug, Clone)]
pub struct PirateWeatherProvider {
    base_url: String,
    http: Client,
}

impl PirateWeatherProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Point the adapter at a different endpoint: a self-hosted gateway, or
    /// a mock server in tests.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn forecast_url(&self, request: &ValidRequest<'_>) -> String {
        format!(
            "{}/forecast/{}/{},{}?units={}&lang={}",
            self.base_url,
            request.api_key,
            request.latitude,
            request.longitude,
            request.units,
            request.language,
        )
    }
}

impl Default for PirateWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForecastProvider for PirateWeatherProvider {
    async fn fetch(&self, request: &ForecastRequest) -> Result<Map<String, Value>, FetchError> {
        let valid = request.validated()?;
        let url = self.forecast_url(&valid);
        debug!(%url, "requesting forecast");

        let res = self.http.get(&url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                body: truncate_body(&body),
            });
        }

        // The response must be a JSON object: the request identifier is
        // stamped onto it as a field before the data goes back out.
        let parsed: Map<String, Value> = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
