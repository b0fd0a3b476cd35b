use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::{Location, WeatherCategory, classify, condition_label};

const CONDITIONS_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// One completed weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionReport {
    pub location: Location,
    pub weather_code: u8,
    pub description: String,
    pub category: WeatherCategory,
}

#[derive(Debug, Clone)]
pub struct ConditionsClient {
    client: Client,
    base_url: String,
}

impl Default for ConditionsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionsClient {
    pub fn new() -> Self {
        Self::with_base_url(CONDITIONS_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(&self, location: &Location) -> Result<ConditionReport> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current", "weather_code".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .context("conditions request failed")?
            .error_for_status()
            .context("conditions request returned non-success status")?;

        let payload: ConditionsResponse = response
            .json()
            .await
            .context("failed to parse conditions payload")?;

        Ok(report_for(location.clone(), payload.current.weather_code))
    }
}

/// Turns a raw weather code into a classified report.
pub fn report_for(location: Location, weather_code: u8) -> ConditionReport {
    let description = condition_label(weather_code).to_string();
    let category = classify(&description);
    tracing::debug!(
        code = weather_code,
        %description,
        category = category.name(),
        "conditions classified"
    );
    ConditionReport {
        location,
        weather_code,
        description,
        category,
    }
}

#[derive(Debug, Deserialize)]
struct ConditionsResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    weather_code: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_maps_codes_through_labels() {
        let report = report_for(Location::fallback(), 75);
        assert_eq!(report.description, "Heavy snow");
        assert_eq!(report.category, WeatherCategory::HeavySnow);

        let report = report_for(Location::fallback(), 0);
        assert_eq!(report.category, WeatherCategory::Sunny);

        let report = report_for(Location::fallback(), 51);
        assert_eq!(report.category, WeatherCategory::LightRain);

        let report = report_for(Location::fallback(), 71);
        assert_eq!(report.category, WeatherCategory::LightSnow);
    }

    #[test]
    fn unknown_code_classifies_as_sunny() {
        let report = report_for(Location::fallback(), 42);
        assert_eq!(report.description, "Unknown");
        assert_eq!(report.category, WeatherCategory::Sunny);
    }

    #[test]
    fn payload_ignores_extra_fields() {
        let payload: ConditionsResponse = serde_json::from_str(
            r#"{"latitude":37.5,"current":{"time":"2026-01-01T00:00","weather_code":63}}"#,
        )
        .expect("payload");
        assert_eq!(payload.current.weather_code, 63);
    }
}
