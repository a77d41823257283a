use crate::{
    config::Config,
    error::ForecastError,
    model::{DataSource, ForecastResult, ProviderForecast},
    postal::PostalCode,
    provider::{ForecastProvider, primary_from_config, secondary_from_config},
};

/// Primary-then-secondary forecast lookup for a postal code.
///
/// Primary failures are logged and swallowed; only the secondary path can end
/// a resolution with an error.
#[derive(Debug)]
pub struct ForecastResolver {
    primary: Option<Box<dyn ForecastProvider>>,
    secondary: Box<dyn ForecastProvider>,
}

impl ForecastResolver {
    pub fn new(
        primary: Option<Box<dyn ForecastProvider>>,
        secondary: Box<dyn ForecastProvider>,
    ) -> Self {
        Self { primary, secondary }
    }

    pub fn from_config(config: &Config) -> Result<Self, ForecastError> {
        Ok(Self::new(primary_from_config(config)?, secondary_from_config(config)?))
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Validate `input` and resolve it. Invalid input never reaches a provider.
    pub async fn resolve(&self, input: &str) -> Result<ForecastResult, ForecastError> {
        let code = PostalCode::parse(input)?;
        self.resolve_code(&code).await
    }

    #[tracing::instrument(skip_all, fields(code = %code))]
    pub async fn resolve_code(&self, code: &PostalCode) -> Result<ForecastResult, ForecastError> {
        if let Some(primary) = &self.primary {
            match primary.fetch_forecast(code).await {
                Ok(forecast) if !forecast.samples.is_empty() => {
                    tracing::info!(provider = %primary.id(), samples = forecast.samples.len(), "forecast resolved");
                    return Ok(wrap(code, forecast, DataSource::Primary));
                }
                Ok(_) => {
                    tracing::warn!(provider = %primary.id(), "primary returned no samples, falling back");
                }
                Err(err) => {
                    tracing::warn!(provider = %primary.id(), error = %err, "primary failed, falling back");
                }
            }
        }

        let forecast = self.secondary.fetch_forecast(code).await?;
        if forecast.samples.is_empty() {
            tracing::info!(provider = %self.secondary.id(), "secondary returned no samples");
            return Err(ForecastError::NotFound(code.clone()));
        }

        tracing::info!(provider = %self.secondary.id(), samples = forecast.samples.len(), "forecast resolved");
        Ok(wrap(code, forecast, DataSource::Secondary))
    }
}

fn wrap(code: &PostalCode, forecast: ProviderForecast, data_source: DataSource) -> ForecastResult {
    ForecastResult {
        postal_code: code.clone(),
        city_label: forecast.location.label(),
        location: forecast.location,
        samples: forecast.samples,
        data_source,
    }
}
