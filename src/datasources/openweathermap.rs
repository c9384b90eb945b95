use crate::config::WeatherConfig;
use crate::data::Region;
use crate::error::{CropCareError, Result};
use crate::logic::calculations::{daily_samples, ms_to_kph};
use crate::logic::ConditionsAdvisor;
use crate::models::{DataOrigin, EnvironmentReading, ForecastPoint, WeatherForecast};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    #[serde(default)]
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl OpenWeatherMapClient {
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions at the region's representative city
    pub async fn fetch_current(&self, region: &Region) -> Result<EnvironmentReading> {
        let response: OwmCurrentResponse = self.get_json("weather", region).await?;
        Ok(convert_current(region.name, response))
    }

    /// Fetch the 5-day/3-hour forecast reduced to one point per day
    pub async fn fetch_forecast(&self, region: &Region) -> Result<WeatherForecast> {
        let response: OwmForecastResponse = self.get_json("forecast", region).await?;
        Ok(convert_forecast(region.name, response))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, region: &Region) -> Result<bool> {
        let response = self
            .client
            .get(self.url("weather", region))
            .send()
            .await
            .map_err(|e| CropCareError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        Ok(response.status().is_success())
    }

    fn url(&self, endpoint: &str, region: &Region) -> String {
        format!(
            "{}/{}?lat={}&lon={}&appid={}&units=metric",
            self.config.base_url.trim_end_matches('/'),
            endpoint,
            region.latitude,
            region.longitude,
            self.config.api_key
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, region: &Region) -> Result<T> {
        let response = self
            .client
            .get(self.url(endpoint, region))
            .send()
            .await
            .map_err(|e| CropCareError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CropCareError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            CropCareError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })
    }
}

fn convert_current(region: &str, response: OwmCurrentResponse) -> EnvironmentReading {
    let humidity_pct = response.main.humidity;
    // A reported 0 mm for the last hour still defers to the 3h total
    let rainfall_mm = response
        .rain
        .as_ref()
        .and_then(|r| r.one_hour.filter(|mm| *mm > 0.0).or(r.three_hour))
        .unwrap_or(0.0);

    let (condition_label, description) = response
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_default();

    // Thresholds are strict, so the advisory sees the unrounded value
    let advisory = ConditionsAdvisor::generate_advisory(
        response.main.temp,
        rainfall_mm,
        humidity_pct,
        &condition_label,
    );

    EnvironmentReading {
        region: region.to_string(),
        fetched_at: Utc::now(),
        origin: DataOrigin::Live,
        temperature_c: response.main.temp.round(),
        rainfall_mm,
        humidity_pct,
        wind_kph: ms_to_kph(response.wind.speed),
        condition_label,
        description,
        advisory,
    }
}

fn convert_forecast(region: &str, response: OwmForecastResponse) -> WeatherForecast {
    let days = daily_samples(&response.list)
        .into_iter()
        .map(|item| ForecastPoint {
            date: DateTime::from_timestamp(item.dt, 0)
                .unwrap_or_else(Utc::now)
                .date_naive(),
            temperature_c: item.main.temp.round(),
            rainfall_mm: item.rain.as_ref().and_then(|r| r.three_hour).unwrap_or(0.0),
            description: item
                .weather
                .first()
                .map(|w| w.description.clone())
                .unwrap_or_default(),
        })
        .collect();

    WeatherForecast {
        region: region.to_string(),
        origin: DataOrigin::Live,
        fetched_at: Utc::now(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::find_region;
    use crate::models::Advisory;

    fn sample_config() -> WeatherConfig {
        WeatherConfig {
            api_key: "test_key".to_string(),
            ..WeatherConfig::default()
        }
    }

    #[test]
    fn url_uses_region_coordinates_and_metric_units() {
        let client = OpenWeatherMapClient::new(sample_config()).unwrap();
        let kerala = find_region("Kerala").unwrap();
        let url = client.url("weather", kerala);
        assert!(url.starts_with("https://api.openweathermap.org/data/2.5/weather?"));
        assert!(url.contains("lat=10.8505"));
        assert!(url.contains("lon=76.2711"));
        assert!(url.contains("appid=test_key"));
        assert!(url.ends_with("units=metric"));
    }

    #[test]
    fn converts_current_response() {
        let body = r#"{
            "main": {"temp": 31.6, "feels_like": 35.0, "humidity": 62},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
            "wind": {"speed": 3.4},
            "name": "Kurnool"
        }"#;
        let response: OwmCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = convert_current("Andhra Pradesh", response);

        assert_eq!(reading.temperature_c, 32.0);
        assert_eq!(reading.humidity_pct, 62.0);
        assert_eq!(reading.rainfall_mm, 0.0);
        assert_eq!(reading.wind_kph, 12.0);
        assert_eq!(reading.condition_label, "Clear");
        assert_eq!(reading.description, "clear sky");
        assert_eq!(reading.origin, DataOrigin::Live);
        assert_eq!(reading.advisory, Advisory::Favorable);
    }

    #[test]
    fn rain_prefers_one_hour_then_three_hour() {
        let with_both = r#"{"main": {"temp": 25, "humidity": 90}, "weather": [],
            "wind": {"speed": 1}, "rain": {"1h": 2.0, "3h": 7.5}}"#;
        let response: OwmCurrentResponse = serde_json::from_str(with_both).unwrap();
        assert_eq!(convert_current("Goa", response).rainfall_mm, 2.0);

        let three_only = r#"{"main": {"temp": 25, "humidity": 90}, "weather": [],
            "wind": {"speed": 1}, "rain": {"3h": 7.5}}"#;
        let response: OwmCurrentResponse = serde_json::from_str(three_only).unwrap();
        let reading = convert_current("Goa", response);
        assert_eq!(reading.rainfall_mm, 7.5);
        assert_eq!(reading.condition_label, "");
        assert_eq!(reading.advisory, Advisory::HeavyRain);

        let dry_last_hour = r#"{"main": {"temp": 25, "humidity": 90}, "weather": [],
            "wind": {"speed": 1}, "rain": {"1h": 0.0, "3h": 7.5}}"#;
        let response: OwmCurrentResponse = serde_json::from_str(dry_last_hour).unwrap();
        assert_eq!(convert_current("Goa", response).rainfall_mm, 7.5);
    }

    #[test]
    fn advisory_uses_unrounded_temperature() {
        let body = r#"{"main": {"temp": 35.4, "humidity": 50},
            "weather": [{"main": "Clouds", "description": "scattered clouds"}],
            "wind": {"speed": 2}}"#;
        let response: OwmCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = convert_current("Rajasthan", response);
        assert_eq!(reading.temperature_c, 35.0);
        assert_eq!(reading.advisory, Advisory::HeatStress);

        let body = r#"{"main": {"temp": 25.4, "humidity": 50},
            "weather": [{"main": "Clear", "description": "clear sky"}],
            "wind": {"speed": 2}}"#;
        let response: OwmCurrentResponse = serde_json::from_str(body).unwrap();
        let reading = convert_current("Punjab", response);
        assert_eq!(reading.temperature_c, 25.0);
        assert_eq!(reading.advisory, Advisory::Favorable);
    }

    #[test]
    fn forecast_keeps_one_entry_per_day() {
        let items: Vec<String> = (0..40)
            .map(|i| {
                format!(
                    r#"{{"dt": {}, "main": {{"temp": {}.4, "humidity": 70}},
                        "weather": [{{"main": "Rain", "description": "light rain"}}],
                        "rain": {{"3h": 0.5}}}}"#,
                    1_718_000_000 + i * 10_800,
                    20 + i
                )
            })
            .collect();
        let body = format!(r#"{{"list": [{}]}}"#, items.join(","));
        let response: OwmForecastResponse = serde_json::from_str(&body).unwrap();
        let forecast = convert_forecast("Assam", response);

        assert_eq!(forecast.days.len(), 5);
        assert_eq!(forecast.days[0].temperature_c, 20.0);
        assert_eq!(forecast.days[1].temperature_c, 28.0);
        assert_eq!(forecast.days[0].rainfall_mm, 0.5);
        assert_eq!(forecast.days[0].description, "light rain");
        assert!(forecast.days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn unreachable_host_is_unavailable() {
        let config = WeatherConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..sample_config()
        };
        let client = OpenWeatherMapClient::new(config).unwrap();
        let punjab = find_region("Punjab").unwrap();
        let err = client.fetch_current(punjab).await.unwrap_err();
        assert!(matches!(err, CropCareError::DataSourceUnavailable(_)));
    }
}
