use crate::{
    Config, QueryError, WeatherReading, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current reading for `city`. Blank input fails with
    /// [`QueryError::InvalidInput`] before any request is made.
    async fn fetch_reading(&self, city: &str) -> Result<WeatherReading, QueryError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for OpenWeather.\n\
                 Hint: run `weather configure`, pass `--api-key`, or set `{}`.",
            crate::config::API_KEY_ENV
        )
    })?;

    let provider = OpenWeatherProvider::builder(api_key.to_owned())
        .base_url(config.base_url())
        .timeout(config.timeout())
        .build()?;

    Ok(Box::new(provider))
}

/// Trimmed city name, or `InvalidInput` when nothing is left.
pub(crate) fn normalize_city(city: &str) -> Result<&str, QueryError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(QueryError::InvalidInput);
    }
    Ok(trimmed)
}
