use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    QueryError, WeatherReading,
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS},
    provider::normalize_city,
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

/// Builder for [`OpenWeatherProvider`]; defaults to the public host and a
/// ten second request timeout.
#[derive(Debug, Clone)]
pub struct OpenWeatherBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<OpenWeatherProvider, QueryError> {
        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(OpenWeatherProvider {
            api_key: self.api_key,
            base_url: self.base_url,
            http,
        })
    }
}

impl OpenWeatherProvider {
    pub fn builder(api_key: String) -> OpenWeatherBuilder {
        OpenWeatherBuilder {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReading, QueryError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);
        tracing::debug!(%city, %url, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(QueryError::CityNotFound { city: city.to_string() });
        }

        if !status.is_success() {
            return Err(QueryError::ProviderUnavailable {
                status,
                message: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;

        parsed.into_reading()
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_reading(self) -> Result<WeatherReading, QueryError> {
        let weather = self.weather.into_iter().next().ok_or_else(|| {
            QueryError::MalformedResponse("response contained no weather entries".to_string())
        })?;

        Ok(WeatherReading {
            location_name: self.name,
            temperature_c: self.main.temp,
            is_night: is_night_icon(&weather.icon),
            condition_main: weather.main,
            condition_description: weather.description,
            observed_at: self.dt.and_then(unix_to_utc),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_reading(&self, city: &str) -> Result<WeatherReading, QueryError> {
        let city = normalize_city(city)?;

        match self.fetch_current(city).await {
            Ok(reading) => {
                tracing::debug!(location = %reading.location_name, "received reading");
                Ok(reading)
            }
            Err(err) => {
                tracing::warn!(%city, error = %err, "weather query failed");
                Err(err)
            }
        }
    }
}

/// Icon codes look like "01d" / "10n"; the suffix marks day or night.
fn is_night_icon(icon: &str) -> bool {
    icon.ends_with('n')
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn night_icon_detection() {
        assert!(is_night_icon("01n"));
        assert!(is_night_icon("10n"));
        assert!(!is_night_icon("10d"));
        assert!(!is_night_icon(""));
    }

    #[test]
    fn parses_london_payload() {
        let body = r#"{
            "name": "London",
            "dt": 1700000000,
            "main": { "temp": 15.6, "humidity": 80 },
            "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }]
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = parsed.into_reading().unwrap();

        assert_eq!(reading.location_name, "London");
        assert_eq!(reading.temperature_c, 15.6);
        assert_eq!(reading.condition_main, "Rain");
        assert_eq!(reading.condition_description, "light rain");
        assert!(!reading.is_night);
        assert_eq!(reading.observed_at.map(|t| t.timestamp()), Some(1_700_000_000));
    }

    #[test]
    fn empty_weather_array_is_malformed() {
        let body = r#"{ "name": "Nowhere", "main": { "temp": 1.0 }, "weather": [] }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).unwrap();
        let err = parsed.into_reading().unwrap_err();

        assert!(matches!(err, QueryError::MalformedResponse(_)));
    }

    #[test]
    fn truncate_body_limits_length_on_char_boundary() {
        let long = "é".repeat(300);
        let short = truncate_body(&long);

        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn blank_city_fails_without_request() {
        // Unroutable host: reaching the network would surface as `Network`, not `InvalidInput`.
        let provider = OpenWeatherProvider::builder("KEY".into())
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();

        let err = provider.fetch_reading("   ").await.unwrap_err();
        assert!(matches!(err, QueryError::InvalidInput));
    }
}
