use crate::config::Config;
use crate::data::fallback::{fallback_forecast, fallback_reading};
use crate::data::regions::{default_region, region_index};
use crate::data::{find_region, REGIONS};
use crate::datasources::{CropServiceClient, OpenWeatherMapClient};
use crate::error::Result;
use crate::models::{
    CropInfo, EnvironmentReading, PredictionRequest, PredictionResult, RegionalRecommendation,
    ServiceHealth, SoilReading, StatesList, WeatherForecast,
};
use chrono::Local;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Fetches weather and crop suggestions for the dashboard and CLI.
///
/// Weather lookups never fail: any problem is logged and the region's
/// fallback values are returned instead. Crop service calls have no
/// fallback and return their errors.
#[derive(Clone)]
pub struct ConditionsService {
    weather: Option<Arc<OpenWeatherMapClient>>,
    crops: Arc<CropServiceClient>,
}

impl ConditionsService {
    pub fn new(config: &Config) -> Result<Self> {
        let weather = if config.weather.is_usable() {
            tracing::info!("OpenWeatherMap client configured for live conditions");
            Some(Arc::new(OpenWeatherMapClient::new(config.weather.clone())?))
        } else {
            tracing::info!("OpenWeatherMap not configured - using regional fallback conditions");
            None
        };

        tracing::info!(
            "Crop recommendation service at {}",
            config.recommendation.base_url
        );
        let crops = Arc::new(CropServiceClient::new(&config.recommendation)?);

        Ok(Self { weather, crops })
    }

    pub fn weather_configured(&self) -> bool {
        self.weather.is_some()
    }

    pub async fn fetch_current_conditions(&self, region: &str) -> EnvironmentReading {
        let Some(known) = find_region(region) else {
            tracing::warn!("Unknown region '{}', using default fallback conditions", region);
            return fallback_reading(region);
        };

        let Some(ref client) = self.weather else {
            return fallback_reading(known.name);
        };

        match client.fetch_current(known).await {
            Ok(reading) => {
                tracing::debug!("Current conditions updated for {}", known.name);
                reading
            }
            Err(e) => {
                tracing::warn!("Failed to fetch weather for {}: {}", known.name, e);
                fallback_reading(known.name)
            }
        }
    }

    pub async fn fetch_forecast(&self, region: &str) -> WeatherForecast {
        let Some(known) = find_region(region) else {
            tracing::warn!("Unknown region '{}', using synthetic forecast", region);
            return synthetic_forecast(region);
        };

        let Some(ref client) = self.weather else {
            return synthetic_forecast(known.name);
        };

        match client.fetch_forecast(known).await {
            Ok(forecast) => {
                tracing::debug!("Forecast updated for {}", known.name);
                forecast
            }
            Err(e) => {
                tracing::warn!("Failed to fetch forecast for {}: {}", known.name, e);
                synthetic_forecast(known.name)
            }
        }
    }

    /// Current conditions for every known region, in catalogue order. Each
    /// region falls back independently.
    pub async fn all_regions_conditions(&self) -> Vec<EnvironmentReading> {
        let mut tasks = JoinSet::new();
        for region in REGIONS {
            let service = self.clone();
            tasks.spawn(async move { service.fetch_current_conditions(region.name).await });
        }

        let mut readings = Vec::with_capacity(REGIONS.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(reading) => readings.push(reading),
                Err(e) => tracing::warn!("Regional conditions task failed: {}", e),
            }
        }

        readings.sort_by_key(|r| region_index(&r.region).unwrap_or(usize::MAX));
        readings
    }

    /// Crop suggestions for a soil test under the given weather.
    pub async fn fetch_crop_recommendation(
        &self,
        soil: &SoilReading,
        env: &EnvironmentReading,
    ) -> Result<PredictionResult> {
        self.submit_prediction(&PredictionRequest::from_readings(soil, env))
            .await
    }

    pub async fn submit_prediction(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let result = self.crops.predict(request).await?;
        tracing::debug!(
            "Prediction: {} ({:.2})",
            result.primary_recommendation,
            result.confidence
        );
        Ok(result)
    }

    pub async fn regional_recommendation(&self, state: &str) -> Result<RegionalRecommendation> {
        self.crops.regional(state.trim()).await
    }

    pub async fn list_states(&self) -> Result<StatesList> {
        self.crops.states().await
    }

    pub async fn crop_info(&self, crop: &str) -> Result<CropInfo> {
        self.crops.crop_info(crop.trim()).await
    }

    pub async fn health(&self) -> Result<ServiceHealth> {
        self.crops.health().await
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        if let Some(ref client) = self.weather {
            status.weather = client.test_connection(default_region()).await.unwrap_or(false);
        }

        match self.health().await {
            Ok(health) => {
                status.recommendation = true;
                status.model_loaded = health.model_loaded;
                if !health.model_loaded {
                    tracing::warn!("Crop service is up but reports no model loaded");
                }
            }
            Err(e) => tracing::warn!("Crop service health check failed: {}", e),
        }

        status
    }
}

fn synthetic_forecast(region: &str) -> WeatherForecast {
    fallback_forecast(region, Local::now().date_naive(), &mut rand::thread_rng())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionStatus {
    pub weather: bool,
    pub recommendation: bool,
    /// Whether the crop service has its prediction model in memory
    pub model_loaded: bool,
}

impl ConnectionStatus {
    pub fn all_connected(&self) -> bool {
        self.weather && self.recommendation && self.model_loaded
    }

    pub fn summary(&self, weather_configured: bool) -> String {
        let weather = match (weather_configured, self.weather) {
            (false, _) => "Weather: FALLBACK",
            (true, true) => "Weather: OK",
            (true, false) => "Weather: OFFLINE",
        };
        let recommendation = match (self.recommendation, self.model_loaded) {
            (true, true) => "Crop service: OK",
            (true, false) => "Crop service: NO MODEL",
            (false, _) => "Crop service: OFFLINE",
        };
        format!("{} | {}", weather, recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecommendationConfig, WeatherConfig};
    use crate::error::CropCareError;
    use crate::models::{Advisory, DataOrigin};

    fn offline_config(api_key: &str) -> Config {
        Config {
            weather: WeatherConfig {
                api_key: api_key.to_string(),
                base_url: "http://127.0.0.1:1".to_string(),
                timeout_secs: 2,
                ..WeatherConfig::default()
            },
            recommendation: RecommendationConfig {
                base_url: "http://127.0.0.1:1".to_string(),
                timeout_secs: 2,
            },
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn unreachable_provider_falls_back() {
        let service = ConditionsService::new(&offline_config("key")).unwrap();
        assert!(service.weather_configured());

        let reading = service.fetch_current_conditions("Kerala").await;
        assert_eq!(reading.origin, DataOrigin::Fallback);
        assert_eq!(reading.region, "Kerala");
        assert_eq!(reading.rainfall_mm, 8.2);
        assert_eq!(reading.advisory, Advisory::HeavyRain);

        let forecast = service.fetch_forecast("Kerala").await;
        assert_eq!(forecast.origin, DataOrigin::Fallback);
        assert_eq!(forecast.days.len(), 7);
    }

    #[tokio::test]
    async fn unknown_region_without_key() {
        let service = ConditionsService::new(&offline_config("")).unwrap();
        assert!(!service.weather_configured());

        let a = service.fetch_current_conditions("Atlantis").await;
        let b = service.fetch_current_conditions("Atlantis").await;
        assert_eq!(a.region, "Atlantis");
        assert_eq!(a.temperature_c, 18.0);
        assert_eq!(a.humidity_pct, b.humidity_pct);
        assert_eq!(a.advisory, b.advisory);
    }

    #[tokio::test]
    async fn all_regions_in_catalogue_order() {
        let service = ConditionsService::new(&offline_config("")).unwrap();
        let readings = service.all_regions_conditions().await;
        assert_eq!(readings.len(), REGIONS.len());
        for (reading, region) in readings.iter().zip(REGIONS) {
            assert_eq!(reading.region, region.name);
        }
    }

    #[tokio::test]
    async fn crop_recommendation_error_surfaces() {
        let service = ConditionsService::new(&offline_config("")).unwrap();
        let env = service.fetch_current_conditions("Punjab").await;
        let soil = SoilReading::new(85.0, 32.0, 78.0, 7.2);

        let err = service
            .fetch_crop_recommendation(&soil, &env)
            .await
            .unwrap_err();
        assert!(matches!(err, CropCareError::DataSourceUnavailable(_)));
        assert!(service.list_states().await.is_err());
    }

    #[tokio::test]
    async fn connection_summary() {
        let service = ConditionsService::new(&offline_config("")).unwrap();
        let status = service.check_connections().await;
        assert!(!status.all_connected());
        assert!(!status.model_loaded);
        assert_eq!(
            status.summary(service.weather_configured()),
            "Weather: FALLBACK | Crop service: OFFLINE"
        );
    }

    #[test]
    fn service_without_model_is_not_connected() {
        let status = ConnectionStatus {
            weather: true,
            recommendation: true,
            model_loaded: false,
        };
        assert!(!status.all_connected());
        assert_eq!(status.summary(true), "Weather: OK | Crop service: NO MODEL");

        let ready = ConnectionStatus {
            model_loaded: true,
            ..status
        };
        assert!(ready.all_connected());
        assert_eq!(ready.summary(true), "Weather: OK | Crop service: OK");
    }
}
