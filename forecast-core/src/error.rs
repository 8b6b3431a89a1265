use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between receiving a request and emitting
/// its response. All variants are handled by logging; none of them reach
/// the front-end as an event.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API key configured; get one at https://pirateweather.net")]
    MissingApiKey,

    #[error("latitude and/or longitude not provided")]
    MissingCoordinates,

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("request to provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned an undecodable body: {0}")]
    Parse(#[from] serde_json::Error),
}
