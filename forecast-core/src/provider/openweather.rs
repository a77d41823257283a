use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    conditions::UNKNOWN_CONDITION,
    error::ForecastError,
    model::{ForecastSample, GeoLocation, ProviderForecast},
    postal::PostalCode,
};

use super::{ForecastProvider, ProviderId, read_json};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const COUNTRY: &str = "US";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, http: Client) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http }
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn geocode(&self, code: &PostalCode) -> Result<GeoLocation, ForecastError> {
        let url = format!("{}/geo/1.0/zip", self.base_url);
        let zip = format!("{code},{COUNTRY}");

        let res = self
            .http
            .get(&url)
            .query(&[("zip", zip.as_str()), ("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| ForecastError::Transport { provider: ProviderId::OpenWeather, source })?;

        let parsed: OwGeocode = read_json(ProviderId::OpenWeather, res).await?;

        Ok(GeoLocation {
            latitude: parsed.lat,
            longitude: parsed.lon,
            place_name: parsed.name,
            region: None,
        })
    }

    async fn forecast(&self, location: &GeoLocation) -> Result<Vec<ForecastSample>, ForecastError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string().as_str()),
                ("lon", location.longitude.to_string().as_str()),
                ("units", "imperial"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ForecastError::Transport { provider: ProviderId::OpenWeather, source })?;

        let parsed: OwForecastResponse = read_json(ProviderId::OpenWeather, res).await?;

        Ok(parsed.list.into_iter().map(ForecastSample::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct OwGeocode {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(entry: OwForecastEntry) -> Self {
        let (condition_main, condition_description) = match entry.weather.into_iter().next() {
            Some(w) => (w.main, w.description),
            None => (UNKNOWN_CONDITION.main.to_string(), UNKNOWN_CONDITION.description.to_string()),
        };

        ForecastSample {
            timestamp: entry.dt,
            temperature_f: entry.main.temp,
            feels_like_f: entry.main.feels_like,
            humidity_pct: entry.main.humidity.min(100),
            wind_speed_mph: entry.wind.speed,
            condition_main,
            condition_description,
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenWeather
    }

    async fn fetch_forecast(&self, code: &PostalCode) -> Result<ProviderForecast, ForecastError> {
        let location = self.geocode(code).await?;
        tracing::debug!(%code, place = %location.place_name, "OpenWeather geocode resolved");

        let samples = self.forecast(&location).await?;
        Ok(ProviderForecast { location, samples })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_entry_maps_to_sample() {
        let json = serde_json::json!({
            "dt": 1_700_000_000,
            "dt_txt": "2023-11-14 22:13:20",
            "main": { "temp": 61.3, "feels_like": 60.1, "humidity": 72 },
            "weather": [{ "main": "Clouds", "description": "broken clouds" }],
            "wind": { "speed": 8.05 }
        });
        let entry: OwForecastEntry = serde_json::from_value(json).unwrap();
        let sample = ForecastSample::from(entry);

        assert_eq!(sample.timestamp, 1_700_000_000);
        assert_eq!(sample.temperature_f, 61.3);
        assert_eq!(sample.humidity_pct, 72);
        assert_eq!(sample.condition_main, "Clouds");
        assert_eq!(sample.condition_description, "broken clouds");
    }

    #[test]
    fn missing_condition_list_is_unknown() {
        let json = serde_json::json!({
            "dt": 1,
            "main": { "temp": 1.0, "feels_like": 1.0, "humidity": 1 },
            "weather": [],
            "wind": { "speed": 0.0 }
        });
        let entry: OwForecastEntry = serde_json::from_value(json).unwrap();
        let sample = ForecastSample::from(entry);
        assert_eq!(sample.condition_main, "Unknown");
        assert_eq!(sample.condition_description, "unknown conditions");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let p = OpenWeatherProvider::new("k".into(), Client::new()).with_base_url("http://x/");
        assert_eq!(p.base_url, "http://x");
    }
}
