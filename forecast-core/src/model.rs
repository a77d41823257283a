use serde::Serialize;

use crate::postal::PostalCode;

/// Which upstream path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Primary,
    Secondary,
}

impl DataSource {
    /// Whether the presentation layer must disclose a degraded source.
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataSource::Secondary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub place_name: String,
    pub region: Option<String>,
}

impl GeoLocation {
    /// "Beverly Hills, CA" when the region is known, otherwise just the place name.
    pub fn label(&self) -> String {
        match self.region.as_deref() {
            Some(region) if !region.is_empty() => format!("{}, {}", self.place_name, region),
            _ => self.place_name.clone(),
        }
    }
}

/// One forecast observation in display units (°F, mph).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSample {
    /// Unix seconds.
    pub timestamp: i64,
    pub temperature_f: f64,
    pub feels_like_f: f64,
    pub humidity_pct: u8,
    pub wind_speed_mph: f64,
    pub condition_main: String,
    pub condition_description: String,
}

/// What a single provider hands back before the resolver tags it with a source.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderForecast {
    pub location: GeoLocation,
    pub samples: Vec<ForecastSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub postal_code: PostalCode,
    pub city_label: String,
    pub location: GeoLocation,
    /// Chronological.
    pub samples: Vec<ForecastSample>,
    pub data_source: DataSource,
}
