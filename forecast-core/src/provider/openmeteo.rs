use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    error::ForecastError,
    model::{GeoLocation, ProviderForecast},
    normalize::{HourlySeries, normalize_hourly},
    postal::PostalCode,
};

use super::{ForecastProvider, ProviderId, read_json};

const DEFAULT_GEOCODE_URL: &str = "https://api.zippopotam.us";
const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
const FORECAST_DAYS: u8 = 5;
const HOURLY_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,wind_speed_10m,weather_code";

/// Credential-free fallback: zippopotam.us for the place lookup, Open-Meteo
/// for an hourly forecast that is then down-sampled.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocode_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(http: Client) -> Self {
        Self {
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            http,
        }
    }

    /// Point both lookups at other hosts, e.g. a mock server.
    pub fn with_base_urls(mut self, geocode_url: impl Into<String>, forecast_url: impl Into<String>) -> Self {
        self.geocode_url = geocode_url.into().trim_end_matches('/').to_string();
        self.forecast_url = forecast_url.into().trim_end_matches('/').to_string();
        self
    }

    /// `Ok(None)` when the code has no usable place record.
    async fn geocode(&self, code: &PostalCode) -> Result<Option<GeoLocation>, ForecastError> {
        let url = format!("{}/us/{}", self.geocode_url, code);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ForecastError::Transport { provider: ProviderId::OpenMeteo, source })?;

        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let parsed: ZipLookup = read_json(ProviderId::OpenMeteo, res).await?;
        Ok(parsed.places.into_iter().next().and_then(ZipPlace::into_location))
    }

    async fn hourly(&self, location: &GeoLocation) -> Result<HourlySeries, ForecastError> {
        let url = format!("{}/v1/forecast", self.forecast_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string().as_str()),
                ("longitude", location.longitude.to_string().as_str()),
                ("hourly", HOURLY_FIELDS),
                ("temperature_unit", "fahrenheit"),
                ("wind_speed_unit", "mph"),
                ("forecast_days", FORECAST_DAYS.to_string().as_str()),
                ("timezone", "GMT"),
            ])
            .send()
            .await
            .map_err(|source| ForecastError::Transport { provider: ProviderId::OpenMeteo, source })?;

        let parsed: OpenMeteoResponse = read_json(ProviderId::OpenMeteo, res).await?;
        Ok(parsed.hourly.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
struct ZipLookup {
    #[serde(default)]
    places: Vec<ZipPlace>,
}

#[derive(Debug, Deserialize)]
struct ZipPlace {
    #[serde(rename = "place name")]
    place_name: String,
    #[serde(rename = "state abbreviation")]
    state_abbreviation: Option<String>,
    latitude: String,
    longitude: String,
}

impl ZipPlace {
    /// Coordinates arrive as strings; anything that is not a finite number
    /// means there is no usable place.
    fn into_location(self) -> Option<GeoLocation> {
        let latitude = parse_coordinate(&self.latitude)?;
        let longitude = parse_coordinate(&self.longitude)?;

        Some(GeoLocation {
            latitude,
            longitude,
            place_name: self.place_name,
            region: self.state_abbreviation.filter(|s| !s.is_empty()),
        })
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    hourly: Option<HourlySeries>,
}

#[async_trait]
impl ForecastProvider for OpenMeteoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenMeteo
    }

    async fn fetch_forecast(&self, code: &PostalCode) -> Result<ProviderForecast, ForecastError> {
        let Some(location) = self.geocode(code).await? else {
            tracing::debug!(%code, "zippopotam.us has no place for this code");
            return Err(ForecastError::NotFound(code.clone()));
        };

        let series = self.hourly(&location).await?;
        let samples = normalize_hourly(&series, Utc::now());
        tracing::debug!(%code, hours = series.time.len(), samples = samples.len(), "normalized hourly series");

        Ok(ProviderForecast { location, samples })
    }
}
