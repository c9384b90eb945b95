use super::alert::Severity;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Primary soil macronutrients with their optimal bands in mg/kg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nutrient {
    Nitrogen,
    Phosphorus,
    Potassium,
}

impl Nutrient {
    /// Inclusive optimal band `(low, high)`.
    pub fn optimal_band(&self) -> (f64, f64) {
        match self {
            Nutrient::Nitrogen => (60.0, 80.0),
            Nutrient::Phosphorus => (25.0, 35.0),
            Nutrient::Potassium => (70.0, 90.0),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "N",
            Nutrient::Phosphorus => "P",
            Nutrient::Potassium => "K",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Nutrient::Nitrogen => "Nitrogen",
            Nutrient::Phosphorus => "Phosphorus",
            Nutrient::Potassium => "Potassium",
        }
    }
}

impl std::fmt::Display for Nutrient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Temperature,
    Rainfall,
    Humidity,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Nitrogen => "Nitrogen (N)",
            Metric::Phosphorus => "Phosphorus (P)",
            Metric::Potassium => "Potassium (K)",
            Metric::Ph => "pH",
            Metric::Temperature => "Temperature",
            Metric::Rainfall => "Rainfall",
            Metric::Humidity => "Humidity",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeLevel {
    Low,
    Optimal,
    High,
}

impl RangeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeLevel::Low => "Low",
            RangeLevel::Optimal => "Optimal",
            RangeLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhLevel {
    Acidic,
    Optimal,
    Alkaline,
}

impl PhLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhLevel::Acidic => "Acidic",
            PhLevel::Optimal => "Optimal",
            PhLevel::Alkaline => "Alkaline",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            PhLevel::Acidic => "Add lime to increase pH",
            PhLevel::Optimal => "pH level is perfect for most crops",
            PhLevel::Alkaline => "Add sulfur to decrease pH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusLevel {
    Range(RangeLevel),
    Ph(PhLevel),
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Range(level) => level.as_str(),
            StatusLevel::Ph(level) => level.as_str(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(
            self,
            StatusLevel::Range(RangeLevel::Optimal) | StatusLevel::Ph(PhLevel::Optimal)
        )
    }

    pub fn color(&self) -> Color {
        match self {
            StatusLevel::Range(RangeLevel::Optimal) | StatusLevel::Ph(PhLevel::Optimal) => {
                Color::Green
            }
            StatusLevel::Range(RangeLevel::Low) | StatusLevel::Ph(PhLevel::Acidic) => Color::Red,
            StatusLevel::Range(RangeLevel::High) | StatusLevel::Ph(PhLevel::Alkaline) => {
                Color::Yellow
            }
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categorical status of a single metric, derived purely from its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusClassification {
    pub metric: Metric,
    pub level: StatusLevel,
    pub suggestion: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherStatus {
    Rainy,
    Hot,
    Humid,
    Pleasant,
}

impl WeatherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherStatus::Rainy => "Rainy",
            WeatherStatus::Hot => "Hot",
            WeatherStatus::Humid => "Humid",
            WeatherStatus::Pleasant => "Pleasant",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherStatus::Rainy => "Heavy rainfall expected",
            WeatherStatus::Hot => "High temperature alert",
            WeatherStatus::Humid => "High humidity levels",
            WeatherStatus::Pleasant => "Favorable conditions",
        }
    }

    pub fn urgency(&self) -> Severity {
        match self {
            WeatherStatus::Rainy | WeatherStatus::Hot => Severity::Warning,
            WeatherStatus::Humid => Severity::Advisory,
            WeatherStatus::Pleasant => Severity::Info,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            WeatherStatus::Rainy => Color::Blue,
            WeatherStatus::Hot => Color::Red,
            WeatherStatus::Humid => Color::Yellow,
            WeatherStatus::Pleasant => Color::Green,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherStatus::Rainy => "🌧",
            WeatherStatus::Hot => "☀",
            WeatherStatus::Humid => "💧",
            WeatherStatus::Pleasant => "⛅",
        }
    }
}

impl std::fmt::Display for WeatherStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the six fixed pieces of field guidance. The text never embeds the
/// numbers that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advisory {
    HeavyRain,
    HeatStress,
    FungalRisk,
    Favorable,
    ColdStress,
    Moderate,
}

impl Advisory {
    pub fn text(&self) -> &'static str {
        match self {
            Advisory::HeavyRain => {
                "Heavy rainfall expected. Ensure proper field drainage to prevent waterlogging. \
                 Avoid pesticide/fertilizer application."
            }
            Advisory::HeatStress => {
                "High temperature alert. Ensure adequate irrigation and provide shade for \
                 sensitive crops. Monitor for heat stress."
            }
            Advisory::FungalRisk => {
                "High humidity levels may promote fungal diseases. Improve air circulation and \
                 consider preventive fungicide application."
            }
            Advisory::Favorable => {
                "Favorable weather conditions. Good time for field operations, spraying, and \
                 harvesting activities."
            }
            Advisory::ColdStress => {
                "Cool weather conditions. Protect sensitive crops from cold stress and adjust \
                 irrigation schedule."
            }
            Advisory::Moderate => {
                "Moderate weather conditions. Continue regular farming activities with standard \
                 precautions."
            }
        }
    }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PestSeverity {
    Low,
    Medium,
    High,
}

impl PestSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            PestSeverity::Low => "Low Risk",
            PestSeverity::Medium => "Medium Risk",
            PestSeverity::High => "High Risk",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            PestSeverity::Low => Color::Gray,
            PestSeverity::Medium => Color::Yellow,
            PestSeverity::High => Color::Red,
        }
    }
}

impl std::fmt::Display for PestSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display bucket for a crop suggestion's confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceBand::High
        } else if confidence >= 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ConfidenceBand::High => Color::Green,
            ConfidenceBand::Medium => Color::Yellow,
            ConfidenceBand::Low => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nutrient_bands() {
        assert_eq!(Nutrient::Nitrogen.optimal_band(), (60.0, 80.0));
        assert_eq!(Nutrient::Phosphorus.optimal_band(), (25.0, 35.0));
        assert_eq!(Nutrient::Potassium.optimal_band(), (70.0, 90.0));
    }

    #[test]
    fn ph_suggestions() {
        assert_eq!(PhLevel::Acidic.suggestion(), "Add lime to increase pH");
        assert_eq!(PhLevel::Alkaline.suggestion(), "Add sulfur to decrease pH");
        assert!(PhLevel::Optimal.suggestion().contains("perfect"));
    }

    #[test]
    fn advisory_text_has_no_digits() {
        for advisory in [
            Advisory::HeavyRain,
            Advisory::HeatStress,
            Advisory::FungalRisk,
            Advisory::Favorable,
            Advisory::ColdStress,
            Advisory::Moderate,
        ] {
            assert!(!advisory.text().chars().any(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn weather_status_urgency() {
        assert_eq!(WeatherStatus::Rainy.urgency(), Severity::Warning);
        assert_eq!(WeatherStatus::Hot.urgency(), Severity::Warning);
        assert_eq!(WeatherStatus::Humid.urgency(), Severity::Advisory);
        assert_eq!(WeatherStatus::Pleasant.urgency(), Severity::Info);
    }

    #[test]
    fn confidence_band_boundaries() {
        assert_eq!(ConfidenceBand::from_confidence(0.8), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_confidence(0.79), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.6), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_confidence(0.59), ConfidenceBand::Low);
    }

    #[test]
    fn status_level_optimal() {
        assert!(StatusLevel::Range(RangeLevel::Optimal).is_optimal());
        assert!(StatusLevel::Ph(PhLevel::Optimal).is_optimal());
        assert!(!StatusLevel::Ph(PhLevel::Acidic).is_optimal());
        assert_eq!(StatusLevel::Range(RangeLevel::High).as_str(), "High");
    }
}
