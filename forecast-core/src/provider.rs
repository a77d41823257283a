use crate::{
    config::Config,
    error::ForecastError,
    model::ProviderForecast,
    postal::PostalCode,
    provider::{openmeteo::OpenMeteoProvider, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};

pub mod openmeteo;
pub mod openweather;

const USER_AGENT: &str = concat!("forecast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Credentialed primary: OpenWeather geocoding + 5-day/3-hour forecast.
    OpenWeather,
    /// Credential-free fallback: zippopotam.us lookup + Open-Meteo hourly forecast.
    OpenMeteo,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::OpenMeteo => "openmeteo",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::OpenMeteo]
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderId::OpenWeather)
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
            "openmeteo" => Ok(ProviderId::OpenMeteo),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, openmeteo."
            )),
        }
    }
}

/// One upstream path from a postal code to forecast samples.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    async fn fetch_forecast(&self, code: &PostalCode) -> Result<ProviderForecast, ForecastError>;
}

/// Build the primary provider, if its credential is configured.
pub fn primary_from_config(
    config: &Config,
) -> Result<Option<Box<dyn ForecastProvider>>, ForecastError> {
    let Some(api_key) = config.provider_api_key(ProviderId::OpenWeather) else {
        tracing::info!("no OpenWeather API key configured, using the credential-free provider only");
        return Ok(None);
    };

    let http = http_client(config.request_timeout(), ProviderId::OpenWeather)?;
    Ok(Some(Box::new(OpenWeatherProvider::new(api_key.to_owned(), http))))
}

/// Build the credential-free fallback provider.
pub fn secondary_from_config(config: &Config) -> Result<Box<dyn ForecastProvider>, ForecastError> {
    let http = http_client(config.request_timeout(), ProviderId::OpenMeteo)?;
    Ok(Box::new(OpenMeteoProvider::new(http)))
}

pub(crate) fn http_client(timeout: Duration, provider: ProviderId) -> Result<Client, ForecastError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| ForecastError::Transport { provider, source })
}

/// Read a response body and decode it, turning non-success statuses into
/// [`ForecastError::Status`].
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: ProviderId,
    res: Response,
) -> Result<T, ForecastError> {
    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ForecastError::Transport { provider, source })?;

    if !status.is_success() {
        return Err(ForecastError::Status { provider, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| ForecastError::Decode { provider, source })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_as_str_roundtrip() {
        for id in ProviderId::all() {
            let s = id.as_str();
            let parsed = ProviderId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn unknown_provider_error() {
        let err = ProviderId::try_from("weatherapi").unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }

    #[test]
    fn only_openweather_needs_a_key() {
        assert!(ProviderId::OpenWeather.requires_api_key());
        assert!(!ProviderId::OpenMeteo.requires_api_key());
    }

    #[test]
    fn primary_absent_without_api_key() {
        let cfg = Config::default();
        let primary = primary_from_config(&cfg).expect("building providers never fails here");
        assert!(primary.is_none());
    }

    #[test]
    fn primary_present_with_api_key() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "KEY".to_string());

        let primary = primary_from_config(&cfg).unwrap().expect("primary configured");
        assert_eq!(primary.id(), ProviderId::OpenWeather);
        assert_eq!(secondary_from_config(&cfg).unwrap().id(), ProviderId::OpenMeteo);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(150);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
