use super::classification::ConfidenceBand;
use super::reading::{EnvironmentReading, SoilReading};
use crate::error::{CropCareError, Result};
use serde::{Deserialize, Serialize};

/// Body of `POST /predict`. Field names follow the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl PredictionRequest {
    pub fn from_readings(soil: &SoilReading, env: &EnvironmentReading) -> Self {
        Self {
            nitrogen: soil.nitrogen,
            phosphorus: soil.phosphorus,
            potassium: soil.potassium,
            temperature: env.temperature_c,
            humidity: env.humidity_pct,
            ph: soil.ph,
            rainfall: env.rainfall_mm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRecommendation {
    pub crop: String,
    pub confidence: f64,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub water_requirement: String,
    #[serde(default)]
    pub soil_type: String,
}

impl CropRecommendation {
    pub fn confidence_band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }

    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// Echo of the submitted conditions in a prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConditions {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub success: bool,
    pub primary_recommendation: String,
    pub confidence: f64,
    pub all_recommendations: Vec<CropRecommendation>,
    pub input_conditions: Option<InputConditions>,
}

impl PredictionResult {
    /// Suggestions ordered by confidence, highest first. The service is
    /// expected to send them in this order already; this does not assume it.
    pub fn ranked(&self) -> Vec<&CropRecommendation> {
        rank_by_confidence(&self.all_recommendations)
    }
}

pub fn rank_by_confidence(recs: &[CropRecommendation]) -> Vec<&CropRecommendation> {
    let mut ranked: Vec<&CropRecommendation> = recs.iter().collect();
    ranked.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalWeather {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalSoil {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    #[serde(rename = "P")]
    pub phosphorus: f64,
    #[serde(rename = "K")]
    pub potassium: f64,
    pub ph: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalConditions {
    pub weather: RegionalWeather,
    pub soil: RegionalSoil,
}

/// Response of `GET /regional-recommendation/{state}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalRecommendation {
    pub success: bool,
    pub state: String,
    pub city: String,
    pub primary_recommendation: String,
    pub confidence: f64,
    pub all_recommendations: Vec<CropRecommendation>,
    pub conditions: RegionalConditions,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatesList {
    pub states: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropDetails {
    pub season: String,
    pub duration: String,
    pub water_requirement: String,
    pub soil_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropInfo {
    pub crop: String,
    pub details: CropDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    pub model_loaded: bool,
}

/// Error body returned by the prediction service on 4xx/5xx.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: String,
}

/// Input fields of the crop recommendation form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Nitrogen,
        FormField::Phosphorus,
        FormField::Potassium,
        FormField::Temperature,
        FormField::Humidity,
        FormField::Ph,
        FormField::Rainfall,
    ];

    /// Wire key, also used in validation messages.
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Nitrogen => "N",
            FormField::Phosphorus => "P",
            FormField::Potassium => "K",
            FormField::Temperature => "temperature",
            FormField::Humidity => "humidity",
            FormField::Ph => "ph",
            FormField::Rainfall => "rainfall",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Nitrogen => "Nitrogen (N) mg/kg",
            FormField::Phosphorus => "Phosphorus (P) mg/kg",
            FormField::Potassium => "Potassium (K) mg/kg",
            FormField::Temperature => "Temperature °C",
            FormField::Humidity => "Humidity %",
            FormField::Ph => "pH Level",
            FormField::Rainfall => "Rainfall mm",
        }
    }

    /// Typical range, shown as a placeholder only.
    pub fn hint(&self) -> &'static str {
        match self {
            FormField::Nitrogen => "0-140",
            FormField::Phosphorus => "5-145",
            FormField::Potassium => "5-205",
            FormField::Temperature => "8-45",
            FormField::Humidity => "14-100",
            FormField::Ph => "3.5-10",
            FormField::Rainfall => "20-300",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            FormField::Nitrogen => 0,
            FormField::Phosphorus => 1,
            FormField::Potassium => 2,
            FormField::Temperature => 3,
            FormField::Humidity => 4,
            FormField::Ph => 5,
            FormField::Rainfall => 6,
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Raw text entered into the crop form.
#[derive(Debug, Clone, Default)]
pub struct CropForm {
    values: [String; 7],
}

impl CropForm {
    pub fn get(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    pub fn fill_from(&mut self, request: &PredictionRequest) {
        self.set(FormField::Nitrogen, request.nitrogen.to_string());
        self.set(FormField::Phosphorus, request.phosphorus.to_string());
        self.set(FormField::Potassium, request.potassium.to_string());
        self.set(FormField::Temperature, request.temperature.to_string());
        self.set(FormField::Humidity, request.humidity.to_string());
        self.set(FormField::Ph, request.ph.to_string());
        self.set(FormField::Rainfall, request.rainfall.to_string());
    }

    /// Checks every field is filled and numeric, in display order. Ranges
    /// are not enforced.
    pub fn to_request(&self) -> Result<PredictionRequest> {
        let mut parsed = [0.0; 7];
        for field in FormField::ALL {
            let raw = self.get(field).trim();
            if raw.is_empty() {
                return Err(CropCareError::Validation(format!(
                    "Please fill in {}",
                    field.key()
                )));
            }
            parsed[field.index()] = raw.parse::<f64>().map_err(|_| {
                CropCareError::Validation(format!("{} must be a number, got '{}'", field.key(), raw))
            })?;
        }

        Ok(PredictionRequest {
            nitrogen: parsed[0],
            phosphorus: parsed[1],
            potassium: parsed[2],
            temperature: parsed[3],
            humidity: parsed[4],
            ph: parsed[5],
            rainfall: parsed[6],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(crop: &str, confidence: f64) -> CropRecommendation {
        CropRecommendation {
            crop: crop.to_string(),
            confidence,
            season: "Kharif".to_string(),
            duration: "120-150 days".to_string(),
            water_requirement: "High".to_string(),
            soil_type: "Clay, loamy".to_string(),
        }
    }

    #[test]
    fn request_uses_service_field_names() {
        let request = PredictionRequest {
            nitrogen: 90.0,
            phosphorus: 42.0,
            potassium: 43.0,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        };
        let json = serde_json::to_value(request).unwrap();
        for key in ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["N"], 90.0);
    }

    #[test]
    fn prediction_result_parses_service_response() {
        let body = r#"{
            "success": true,
            "primary_recommendation": "rice",
            "confidence": 0.91,
            "all_recommendations": [
                {"crop": "jute", "confidence": 0.06, "season": "Kharif", "duration": "120-150 days",
                 "water_requirement": "High", "soil_type": "Alluvial"},
                {"crop": "rice", "confidence": 0.91, "season": "Kharif", "duration": "120-150 days",
                 "water_requirement": "High", "soil_type": "Clay, loamy"}
            ],
            "input_conditions": {"nitrogen": 90, "phosphorus": 42, "potassium": 43,
                "temperature": 20.8, "humidity": 82, "ph": 6.5, "rainfall": 202.9}
        }"#;
        let result: PredictionResult = serde_json::from_str(body).unwrap();
        assert!(result.success);
        assert_eq!(result.primary_recommendation, "rice");

        let ranked = result.ranked();
        assert_eq!(ranked[0].crop, "rice");
        assert_eq!(ranked[1].crop, "jute");
        assert_eq!(result.input_conditions.unwrap().nitrogen, 90.0);
    }

    #[test]
    fn ranking_is_descending() {
        let recs = vec![rec("maize", 0.2), rec("wheat", 0.7), rec("rice", 0.1)];
        let ranked = rank_by_confidence(&recs);
        let names: Vec<&str> = ranked.iter().map(|r| r.crop.as_str()).collect();
        assert_eq!(names, vec!["wheat", "maize", "rice"]);
    }

    #[test]
    fn form_reports_first_missing_field() {
        let mut form = CropForm::default();
        let err = form.to_request().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in N");

        form.set(FormField::Nitrogen, "90");
        form.set(FormField::Phosphorus, "42");
        form.set(FormField::Potassium, "43");
        let err = form.to_request().unwrap_err();
        assert_eq!(err.to_string(), "Please fill in temperature");
    }

    #[test]
    fn form_rejects_non_numeric() {
        let mut form = CropForm::default();
        for field in FormField::ALL {
            form.set(field, "1");
        }
        form.set(FormField::Ph, "acidic");
        let err = form.to_request().unwrap_err();
        assert!(matches!(err, CropCareError::Validation(_)));
        assert!(err.to_string().starts_with("ph must be a number"));
    }

    #[test]
    fn form_accepts_out_of_range_values() {
        let mut form = CropForm::default();
        for field in FormField::ALL {
            form.set(field, "500");
        }
        form.set(FormField::Nitrogen, "-3");
        let request = form.to_request().unwrap();
        assert_eq!(request.nitrogen, -3.0);
        assert_eq!(request.rainfall, 500.0);
    }

    #[test]
    fn form_field_cycles() {
        assert_eq!(FormField::Nitrogen.next(), FormField::Phosphorus);
        assert_eq!(FormField::Rainfall.next(), FormField::Nitrogen);
        assert_eq!(FormField::Nitrogen.prev(), FormField::Rainfall);
    }
}
