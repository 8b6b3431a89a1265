//! Core library for the forecast helper backend.
//!
//! This crate defines:
//! - The notification (event) types exchanged with the front-end widget
//! - The Pirate Weather fetch adapter and its provider abstraction
//! - Helper configuration (request defaults, endpoint override)
//!
//! It is used by `forecast-helper`, but can also be embedded in other hosts.

pub mod config;
pub mod error;
pub mod helper;
pub mod model;
pub mod notification;
pub mod provider;

pub use config::Config;
pub use error::FetchError;
pub use helper::ForecastHelper;
pub use model::{Coordinate, ForecastData, ForecastRequest, Units};
pub use notification::Notification;
pub use provider::{ForecastProvider, PirateWeatherProvider};
