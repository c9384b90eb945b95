use super::classification::Advisory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a reading came from. Fallback readings are substituted from the
/// static region table when the weather provider cannot be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataOrigin {
    Live,
    Fallback,
    Sample,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::Live => "OpenWeatherMap",
            DataOrigin::Fallback => "Regional fallback",
            DataOrigin::Sample => "Sample data",
        }
    }
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of current weather for a region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentReading {
    pub region: String,
    pub fetched_at: DateTime<Utc>,
    pub origin: DataOrigin,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub humidity_pct: f64,
    pub wind_kph: f64,
    /// Provider condition group, e.g. "Clear", "Rain", "Clouds"
    pub condition_label: String,
    pub description: String,
    pub advisory: Advisory,
}

/// Soil test result. Nutrients in mg/kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilReading {
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub ph: f64,
}

impl SoilReading {
    pub const fn new(nitrogen: f64, phosphorus: f64, potassium: f64, ph: f64) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            ph,
        }
    }
}
