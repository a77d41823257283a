//! Core library for the ZIP code `forecast` tool.
//!
//! This crate defines:
//! - Postal code validation
//! - The two forecast providers (OpenWeather, zippopotam.us + Open-Meteo)
//!   and the primary-then-secondary resolver over them
//! - Normalization of hourly series and WMO condition codes
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli` for both the terminal and the web front end.

pub mod conditions;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod postal;
pub mod provider;
pub mod resolver;

pub use config::{Config, ProviderConfig};
pub use error::ForecastError;
pub use model::{DataSource, ForecastResult, ForecastSample, GeoLocation, ProviderForecast};
pub use postal::{PostalCode, is_valid_postal_code};
pub use provider::{ForecastProvider, ProviderId};
pub use resolver::ForecastResolver;
