use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::FetchError,
    model::{CityRecord, CurrentConditions},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is the scheme and host, e.g. a mock server in tests.
    pub fn with_base_url(
        api_key: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<(StatusCode, String), FetchError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(%status, path, "OpenWeather response received");
        Ok((status, body))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

/// Error body, e.g. `{"cod":"404","message":"city not found"}`.
#[derive(Debug, Deserialize)]
struct OwErrorResponse {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn lookup_cities(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CityRecord>, FetchError> {
        let limit_param = limit.to_string();
        let (status, body) = self
            .get(
                "/geo/1.0/direct",
                &[("q", query), ("limit", limit_param.as_str())],
            )
            .await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let value: serde_json::Value = serde_json::from_str(&body)?;

        let serde_json::Value::Array(items) = value else {
            tracing::debug!(query, "Geocoding response was not a list");
            return Ok(Vec::new());
        };

        let cities = items
            .into_iter()
            .take(limit)
            .map(serde_json::from_value::<CityRecord>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(cities)
    }

    async fn current_conditions(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let (status, body) = self
            .get("/data/2.5/weather", &[("q", city), ("units", "metric")])
            .await?;

        if !status.is_success() {
            return Err(rejection(status, &body));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(CurrentConditions {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            icon_code: parsed.weather.into_iter().next().map(|w| w.icon),
            observed_at: parsed.dt.and_then(unix_to_utc),
        })
    }
}

/// A non-success answer is a rejection only when the service explains itself;
/// anything else is treated as unreadable.
fn rejection(status: StatusCode, body: &str) -> FetchError {
    match serde_json::from_str::<OwErrorResponse>(body) {
        Ok(OwErrorResponse {
            message: Some(message),
        }) => FetchError::Rejected {
            status: status.as_u16(),
            message,
        },
        _ => FetchError::Parse(format!(
            "unexpected status {}: {}",
            status,
            truncate_body(body)
        )),
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_uses_service_message() {
        let err = rejection(
            StatusCode::NOT_FOUND,
            r#"{"cod":"404","message":"city not found"}"#,
        );
        match err {
            FetchError::Rejected { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejection_without_message_is_a_parse_error() {
        let err = rejection(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, FetchError::Parse(_)));

        let err = rejection(StatusCode::INTERNAL_SERVER_ERROR, r#"{"cod":500}"#);
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
    }

    #[test]
    fn unix_to_utc_converts_seconds() {
        let dt = unix_to_utc(0).expect("epoch is valid");
        assert_eq!(dt.timestamp(), 0);
    }

    #[test]
    fn current_response_tolerates_missing_weather_list() {
        let body = r#"{"name":"Paris","main":{"temp":15.7,"humidity":60},"wind":{"speed":3.4}}"#;
        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.weather.is_empty());
        assert!(parsed.dt.is_none());
    }
}
