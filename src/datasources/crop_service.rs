use crate::config::RecommendationConfig;
use crate::error::{CropCareError, Result};
use crate::models::{
    CropInfo, PredictionRequest, PredictionResult, RegionalRecommendation, ServiceErrorBody,
    ServiceHealth, StatesList,
};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the crop recommendation service.
///
/// The service is treated as an oracle: failures are reported to the caller
/// and never replaced with local guesses.
pub struct CropServiceClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CropServiceClient {
    pub fn new(config: &RecommendationConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            CropCareError::Config(format!(
                "Invalid recommendation base_url '{}': {}",
                config.base_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CropCareError::Config(format!(
                "Invalid recommendation base_url '{}'",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// `POST /predict`
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let url = self.endpoint(&["predict"])?;
        self.send(self.client.post(url).json(request)).await
    }

    /// `GET /states`
    pub async fn states(&self) -> Result<StatesList> {
        let url = self.endpoint(&["states"])?;
        self.send(self.client.get(url)).await
    }

    /// `GET /regional-recommendation/{state}`
    pub async fn regional(&self, state: &str) -> Result<RegionalRecommendation> {
        let url = self.endpoint(&["regional-recommendation", state])?;
        self.send(self.client.get(url)).await
    }

    /// `GET /crop-info/{crop}`
    pub async fn crop_info(&self, crop: &str) -> Result<CropInfo> {
        let url = self.endpoint(&["crop-info", crop])?;
        self.send(self.client.get(url)).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<ServiceHealth> {
        let url = self.endpoint(&["health"])?;
        self.send(self.client.get(url)).await
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CropCareError::Config("Recommendation base_url cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            CropCareError::DataSourceUnavailable(format!("Recommendation service: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        response.json().await.map_err(|e| {
            CropCareError::InvalidData(format!(
                "Failed to parse recommendation service response: {}",
                e
            ))
        })
    }
}

/// Prefers the service's own `{"error": ...}` message over the bare status.
fn error_from_body(status: reqwest::StatusCode, body: &str) -> CropCareError {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(parsed) if status == reqwest::StatusCode::NOT_FOUND => {
            CropCareError::NotFound(parsed.error)
        }
        Ok(parsed) => CropCareError::Service(parsed.error),
        Err(_) => CropCareError::DataSourceUnavailable(format!(
            "Recommendation service returned {}",
            status
        )),
    }
}
