use super::rules::{
    AdvisoryInput, WeatherInput, ADVISORY_TABLE, PEST_SEVERITY_TABLE, WEATHER_STATUS_TABLE,
};
use crate::models::{
    Advisory, AlertKind, ConfidenceBand, EnvironmentReading, FieldAlert, Metric, Nutrient,
    PestSeverity, PhLevel, RangeLevel, Severity, SoilReading, StatusClassification, StatusLevel,
    WeatherStatus,
};

const ACIDIC_BELOW: f64 = 6.0;
const ALKALINE_ABOVE: f64 = 8.0;

const HOT_ABOVE_C: f64 = 35.0;
const COLD_BELOW_C: f64 = 15.0;
const HEAVY_RAIN_ABOVE_MM: f64 = 5.0;
const HUMID_ABOVE_PCT: f64 = 80.0;

/// Stateless classification of weather and soil readings.
///
/// Every function is total: any finite input yields a classification, and
/// out-of-range values (negative nutrients, humidity above 100) are
/// classified rather than rejected.
pub struct ConditionsAdvisor;

impl ConditionsAdvisor {
    /// `Low` below the nutrient's band, `High` above it, `Optimal` on or
    /// inside the bounds.
    pub fn classify_nutrient(value: f64, nutrient: Nutrient) -> RangeLevel {
        let (low, high) = nutrient.optimal_band();
        band(value, low, high)
    }

    pub fn classify_ph(ph: f64) -> PhLevel {
        if ph < ACIDIC_BELOW {
            PhLevel::Acidic
        } else if ph > ALKALINE_ABOVE {
            PhLevel::Alkaline
        } else {
            PhLevel::Optimal
        }
    }

    pub fn classify_weather(temperature_c: f64, rainfall_mm: f64, humidity_pct: f64) -> WeatherStatus {
        WEATHER_STATUS_TABLE.evaluate(&WeatherInput {
            temperature_c,
            rainfall_mm,
            humidity_pct,
        })
    }

    pub fn generate_advisory(
        temperature_c: f64,
        rainfall_mm: f64,
        humidity_pct: f64,
        condition_label: &str,
    ) -> Advisory {
        ADVISORY_TABLE.evaluate(&AdvisoryInput::new(
            temperature_c,
            rainfall_mm,
            humidity_pct,
            condition_label,
        ))
    }

    /// Id of the advisory rule that fires for these readings, e.g. `cold_stress`.
    pub fn advisory_rule(
        temperature_c: f64,
        rainfall_mm: f64,
        humidity_pct: f64,
        condition_label: &str,
    ) -> &'static str {
        ADVISORY_TABLE.decided_by(&AdvisoryInput::new(
            temperature_c,
            rainfall_mm,
            humidity_pct,
            condition_label,
        ))
    }

    pub fn classify_severity(pest_name: &str) -> PestSeverity {
        PEST_SEVERITY_TABLE.evaluate(pest_name.to_lowercase().as_str())
    }

    pub fn confidence_band(confidence: f64) -> ConfidenceBand {
        ConfidenceBand::from_confidence(confidence)
    }

    /// Status of a single metric with its suggestion.
    pub fn classify_metric(metric: Metric, value: f64) -> StatusClassification {
        let level = match metric {
            Metric::Nitrogen => StatusLevel::Range(Self::classify_nutrient(value, Nutrient::Nitrogen)),
            Metric::Phosphorus => {
                StatusLevel::Range(Self::classify_nutrient(value, Nutrient::Phosphorus))
            }
            Metric::Potassium => StatusLevel::Range(Self::classify_nutrient(value, Nutrient::Potassium)),
            Metric::Ph => StatusLevel::Ph(Self::classify_ph(value)),
            Metric::Temperature => StatusLevel::Range(band(value, COLD_BELOW_C, HOT_ABOVE_C)),
            Metric::Rainfall => {
                StatusLevel::Range(band(value, f64::NEG_INFINITY, HEAVY_RAIN_ABOVE_MM))
            }
            Metric::Humidity => StatusLevel::Range(band(value, f64::NEG_INFINITY, HUMID_ABOVE_PCT)),
        };

        StatusClassification {
            metric,
            level,
            suggestion: suggestion(metric, level),
        }
    }

    /// N, P, K and pH classifications, in that order.
    pub fn soil_report(soil: &SoilReading) -> Vec<StatusClassification> {
        vec![
            Self::classify_metric(Metric::Nitrogen, soil.nitrogen),
            Self::classify_metric(Metric::Phosphorus, soil.phosphorus),
            Self::classify_metric(Metric::Potassium, soil.potassium),
            Self::classify_metric(Metric::Ph, soil.ph),
        ]
    }

    /// Temperature, rainfall and humidity classifications of a reading.
    pub fn weather_report(env: &EnvironmentReading) -> Vec<StatusClassification> {
        vec![
            Self::classify_metric(Metric::Temperature, env.temperature_c),
            Self::classify_metric(Metric::Rainfall, env.rainfall_mm),
            Self::classify_metric(Metric::Humidity, env.humidity_pct),
        ]
    }

    /// Builds dashboard alert cards: one for the overall weather status and
    /// one per soil metric outside its optimal band. Sorted most severe
    /// first.
    pub fn assess(env: &EnvironmentReading, soil: Option<&SoilReading>) -> Vec<FieldAlert> {
        let mut cards = vec![weather_card(env)];

        if let Some(soil) = soil {
            for status in Self::soil_report(soil) {
                if status.level.is_optimal() {
                    continue;
                }
                let value = match status.metric {
                    Metric::Nitrogen => soil.nitrogen,
                    Metric::Phosphorus => soil.phosphorus,
                    Metric::Potassium => soil.potassium,
                    _ => soil.ph,
                };
                cards.push(soil_card(&status, value));
            }
        }

        cards.sort_by(|a, b| b.severity.cmp(&a.severity));
        cards
    }
}

fn band(value: f64, low: f64, high: f64) -> RangeLevel {
    if value < low {
        RangeLevel::Low
    } else if value > high {
        RangeLevel::High
    } else {
        RangeLevel::Optimal
    }
}

fn suggestion(metric: Metric, level: StatusLevel) -> &'static str {
    use RangeLevel::{High, Low, Optimal};

    match (metric, level) {
        (_, StatusLevel::Ph(ph)) => ph.suggestion(),
        (Metric::Nitrogen, StatusLevel::Range(Low)) => "Apply nitrogen-rich fertilizer such as urea",
        (Metric::Nitrogen, StatusLevel::Range(High)) => {
            "Skip nitrogen top-dressing and plant a legume cover crop"
        }
        (Metric::Phosphorus, StatusLevel::Range(Low)) => "Apply phosphate fertilizer such as DAP",
        (Metric::Phosphorus, StatusLevel::Range(High)) => "Avoid phosphate fertilizers this season",
        (Metric::Potassium, StatusLevel::Range(Low)) => "Apply potash (muriate of potash)",
        (Metric::Potassium, StatusLevel::Range(High)) => "Avoid potash fertilizers this season",
        (Metric::Temperature, StatusLevel::Range(High)) => "Irrigate more often and shade sensitive crops",
        (Metric::Temperature, StatusLevel::Range(Low)) => "Protect sensitive crops from cold",
        (Metric::Rainfall, StatusLevel::Range(High)) => "Check field drainage",
        (Metric::Humidity, StatusLevel::Range(High)) => "Watch for fungal disease",
        (_, StatusLevel::Range(Optimal)) => "Within optimal range",
        (_, StatusLevel::Range(_)) => "No action needed",
    }
}

fn weather_card(env: &EnvironmentReading) -> FieldAlert {
    let status = ConditionsAdvisor::classify_weather(env.temperature_c, env.rainfall_mm, env.humidity_pct);
    let source = env.origin.as_str();

    FieldAlert::new(
        "weather_status",
        AlertKind::Weather,
        status.urgency(),
        format!("{}: {}", env.region, status),
        status.description(),
    )
    .evidence("Temperature", format!("{:.0}°C", env.temperature_c), source)
    .evidence("Rainfall", format!("{:.1} mm", env.rainfall_mm), source)
    .evidence("Humidity", format!("{:.0}%", env.humidity_pct), source)
    .action(env.advisory.text())
}

fn soil_card(status: &StatusClassification, value: f64) -> FieldAlert {
    let (id, kind, reading) = match status.metric {
        Metric::Nitrogen => ("soil_nitrogen", AlertKind::Nutrient, format!("{:.0} mg/kg", value)),
        Metric::Phosphorus => ("soil_phosphorus", AlertKind::Nutrient, format!("{:.0} mg/kg", value)),
        Metric::Potassium => ("soil_potassium", AlertKind::Nutrient, format!("{:.0} mg/kg", value)),
        _ => ("soil_ph", AlertKind::SoilPh, format!("{:.1}", value)),
    };

    FieldAlert::new(
        id,
        kind,
        Severity::Advisory,
        format!("{} {}", status.metric, status.level),
        format!("{} reads {}, outside the optimal range.", status.metric, reading),
    )
    .evidence(status.metric.as_str(), reading, "Soil test")
    .action(status.suggestion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataOrigin;
    use chrono::Utc;

    fn reading(region: &str, t: f64, r: f64, h: f64, label: &str) -> EnvironmentReading {
        EnvironmentReading {
            region: region.to_string(),
            fetched_at: Utc::now(),
            origin: DataOrigin::Fallback,
            temperature_c: t,
            rainfall_mm: r,
            humidity_pct: h,
            wind_kph: 12.0,
            condition_label: label.to_string(),
            description: "partly cloudy".to_string(),
            advisory: ConditionsAdvisor::generate_advisory(t, r, h, label),
        }
    }

    #[test]
    fn nutrient_band_edges() {
        use Nutrient::*;
        assert_eq!(ConditionsAdvisor::classify_nutrient(59.9, Nitrogen), RangeLevel::Low);
        assert_eq!(ConditionsAdvisor::classify_nutrient(60.0, Nitrogen), RangeLevel::Optimal);
        assert_eq!(ConditionsAdvisor::classify_nutrient(80.0, Nitrogen), RangeLevel::Optimal);
        assert_eq!(ConditionsAdvisor::classify_nutrient(80.1, Nitrogen), RangeLevel::High);

        assert_eq!(ConditionsAdvisor::classify_nutrient(24.0, Phosphorus), RangeLevel::Low);
        assert_eq!(ConditionsAdvisor::classify_nutrient(35.0, Phosphorus), RangeLevel::Optimal);
        assert_eq!(ConditionsAdvisor::classify_nutrient(36.0, Phosphorus), RangeLevel::High);

        assert_eq!(ConditionsAdvisor::classify_nutrient(69.0, Potassium), RangeLevel::Low);
        assert_eq!(ConditionsAdvisor::classify_nutrient(90.0, Potassium), RangeLevel::Optimal);
        assert_eq!(ConditionsAdvisor::classify_nutrient(91.0, Potassium), RangeLevel::High);
    }

    #[test]
    fn negative_nutrients_are_low() {
        assert_eq!(
            ConditionsAdvisor::classify_nutrient(-10.0, Nutrient::Nitrogen),
            RangeLevel::Low
        );
    }

    #[test]
    fn ph_edges() {
        assert_eq!(ConditionsAdvisor::classify_ph(5.99), PhLevel::Acidic);
        assert_eq!(ConditionsAdvisor::classify_ph(6.0), PhLevel::Optimal);
        assert_eq!(ConditionsAdvisor::classify_ph(8.0), PhLevel::Optimal);
        assert_eq!(ConditionsAdvisor::classify_ph(8.01), PhLevel::Alkaline);
    }

    #[test]
    fn rain_takes_priority_over_cold() {
        assert_eq!(ConditionsAdvisor::classify_weather(5.0, 6.0, 10.0), WeatherStatus::Rainy);
    }

    #[test]
    fn heat_threshold_is_strict() {
        assert_eq!(ConditionsAdvisor::classify_weather(35.0, 0.0, 50.0), WeatherStatus::Pleasant);
        assert_eq!(ConditionsAdvisor::classify_weather(35.1, 0.0, 50.0), WeatherStatus::Hot);
        assert_eq!(
            ConditionsAdvisor::generate_advisory(35.0, 0.0, 50.0, "Clouds"),
            Advisory::Moderate
        );
        assert_eq!(
            ConditionsAdvisor::generate_advisory(35.1, 0.0, 50.0, "Clouds"),
            Advisory::HeatStress
        );
    }

    #[test]
    fn punjab_fallback_is_pleasant_and_moderate() {
        assert_eq!(ConditionsAdvisor::classify_weather(18.0, 2.5, 65.0), WeatherStatus::Pleasant);
        assert_eq!(
            ConditionsAdvisor::generate_advisory(18.0, 2.5, 65.0, "Clouds"),
            Advisory::Moderate
        );
        assert_eq!(
            ConditionsAdvisor::generate_advisory(18.0, 2.5, 65.0, "clear"),
            Advisory::Moderate
        );
    }

    #[test]
    fn kerala_fallback_is_rainy() {
        assert_eq!(ConditionsAdvisor::classify_weather(26.0, 8.2, 85.0), WeatherStatus::Rainy);
        assert_eq!(
            ConditionsAdvisor::generate_advisory(26.0, 8.2, 85.0, "clear"),
            Advisory::HeavyRain
        );
    }

    #[test]
    fn advisory_priority_order() {
        let adv = ConditionsAdvisor::generate_advisory;
        assert_eq!(adv(40.0, 10.0, 90.0, "Rain"), Advisory::HeavyRain);
        assert_eq!(adv(40.0, 0.0, 90.0, "Clear"), Advisory::HeatStress);
        assert_eq!(adv(30.0, 0.0, 90.0, "Clear"), Advisory::FungalRisk);
        assert_eq!(adv(30.0, 0.0, 50.0, "CLEAR"), Advisory::Favorable);
        assert_eq!(adv(30.0, 0.0, 50.0, "Clouds"), Advisory::Moderate);
        assert_eq!(adv(10.0, 0.0, 50.0, "Clouds"), Advisory::ColdStress);
    }

    #[test]
    fn pest_severity() {
        assert_eq!(ConditionsAdvisor::classify_severity("Leaf Blight"), PestSeverity::High);
        assert_eq!(ConditionsAdvisor::classify_severity("Aphids"), PestSeverity::Medium);
        assert_eq!(ConditionsAdvisor::classify_severity("Root Rot"), PestSeverity::High);
        assert_eq!(ConditionsAdvisor::classify_severity("Whitefly"), PestSeverity::Medium);
        assert_eq!(ConditionsAdvisor::classify_severity("Stem Borer"), PestSeverity::Low);
    }

    #[test]
    fn weather_metrics() {
        let temp = ConditionsAdvisor::classify_metric(Metric::Temperature, 36.0);
        assert_eq!(temp.level, StatusLevel::Range(RangeLevel::High));
        let temp = ConditionsAdvisor::classify_metric(Metric::Temperature, 14.0);
        assert_eq!(temp.level, StatusLevel::Range(RangeLevel::Low));
        let rain = ConditionsAdvisor::classify_metric(Metric::Rainfall, 0.0);
        assert_eq!(rain.level, StatusLevel::Range(RangeLevel::Optimal));
        let humidity = ConditionsAdvisor::classify_metric(Metric::Humidity, 81.0);
        assert_eq!(humidity.level, StatusLevel::Range(RangeLevel::High));
        assert_eq!(humidity.suggestion, "Watch for fungal disease");
    }

    #[test]
    fn soil_report_order_and_suggestions() {
        let report = ConditionsAdvisor::soil_report(&SoilReading::new(45.0, 28.0, 95.0, 5.8));
        let metrics: Vec<Metric> = report.iter().map(|s| s.metric).collect();
        assert_eq!(
            metrics,
            vec![Metric::Nitrogen, Metric::Phosphorus, Metric::Potassium, Metric::Ph]
        );
        assert_eq!(report[0].level, StatusLevel::Range(RangeLevel::Low));
        assert!(report[0].suggestion.contains("urea"));
        assert!(report[1].level.is_optimal());
        assert_eq!(report[2].level, StatusLevel::Range(RangeLevel::High));
        assert_eq!(report[3].level, StatusLevel::Ph(PhLevel::Acidic));
        assert_eq!(report[3].suggestion, "Add lime to increase pH");
    }

    #[test]
    fn assess_pleasant_with_balanced_soil() {
        let env = reading("Punjab", 18.0, 2.5, 65.0, "clear");
        let cards = ConditionsAdvisor::assess(&env, Some(&SoilReading::new(70.0, 30.0, 80.0, 7.0)));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].severity, Severity::Info);
        assert_eq!(cards[0].title, "Punjab: Pleasant");
        assert_eq!(cards[0].action.as_deref(), Some(Advisory::Moderate.text()));
    }

    #[test]
    fn assess_puts_weather_warning_first() {
        let env = reading("Kerala", 26.0, 8.2, 85.0, "Rain");
        let cards = ConditionsAdvisor::assess(&env, Some(&SoilReading::new(45.0, 28.0, 95.0, 5.8)));

        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].severity, Severity::Warning);
        assert_eq!(cards[0].kind, AlertKind::Weather);
        assert!(cards[1..].iter().all(|c| c.severity == Severity::Advisory));
        assert!(cards.iter().any(|c| c.id == "soil_ph"));
        assert!(cards.iter().all(|c| c.id != "soil_phosphorus"));
    }

    #[test]
    fn advisory_rule_names_the_deciding_row() {
        assert_eq!(ConditionsAdvisor::advisory_rule(18.0, 2.5, 65.0, "Rain"), "moderate");
        assert_eq!(ConditionsAdvisor::advisory_rule(30.0, 0.0, 50.0, "Clear"), "favorable");
        assert_eq!(ConditionsAdvisor::advisory_rule(10.0, 0.0, 50.0, "clear"), "cold_stress");
    }

    #[test]
    fn assess_without_soil() {
        let env = reading("Rajasthan", 32.0, 0.5, 40.0, "Clear");
        let cards = ConditionsAdvisor::assess(&env, None);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].action.as_deref(), Some(Advisory::Favorable.text()));
    }
}
