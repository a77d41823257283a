use reqwest::StatusCode;
use thiserror::Error;

use crate::{postal::PostalCode, provider::ProviderId};

/// Everything that can go wrong while resolving a forecast.
///
/// Upstream variants are soft failures on the primary path (the resolver logs
/// them and falls back); on the secondary path they end the resolution.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("'{0}' is not a 5-digit ZIP code")]
    InvalidPostalCode(String),

    #[error("no forecast data found for ZIP code {0}")]
    NotFound(PostalCode),

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: ProviderId,
        status: StatusCode,
        body: String,
    },

    #[error("failed to send request to {provider}")]
    Transport {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse {provider} response")]
    Decode {
        provider: ProviderId,
        #[source]
        source: serde_json::Error,
    },
}

impl ForecastError {
    /// True for outcomes the user should see as "ZIP code not found" rather
    /// than as a generic error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InvalidPostalCode(_) | Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_grouping() {
        let code = PostalCode::parse("00000").unwrap();
        assert!(ForecastError::NotFound(code).is_not_found());
        assert!(ForecastError::InvalidPostalCode("123".into()).is_not_found());

        let err = ForecastError::Status {
            provider: ProviderId::OpenMeteo,
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn invalid_postal_code_message_names_input() {
        let err = ForecastError::InvalidPostalCode("12a45".into());
        assert_eq!(err.to_string(), "'12a45' is not a 5-digit ZIP code");
    }
}
