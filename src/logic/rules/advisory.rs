use super::{Rule, RuleTable};
use crate::models::Advisory;

/// Inputs of the advisory table. The provider's condition label only
/// matters through whether it names a clear sky, so it is reduced to a flag
/// up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvisoryInput {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub humidity_pct: f64,
    pub clear_sky: bool,
}

impl AdvisoryInput {
    pub fn new(temperature_c: f64, rainfall_mm: f64, humidity_pct: f64, condition_label: &str) -> Self {
        Self {
            temperature_c,
            rainfall_mm,
            humidity_pct,
            clear_sky: condition_label.to_lowercase().contains("clear"),
        }
    }
}

const RULES: &[Rule<AdvisoryInput, Advisory>] = &[
    Rule {
        id: "heavy_rain",
        applies: |a| a.rainfall_mm > 5.0,
        outcome: Advisory::HeavyRain,
    },
    Rule {
        id: "heat_stress",
        applies: |a| a.temperature_c > 35.0,
        outcome: Advisory::HeatStress,
    },
    Rule {
        id: "fungal_risk",
        applies: |a| a.humidity_pct > 80.0,
        outcome: Advisory::FungalRisk,
    },
    Rule {
        id: "favorable",
        applies: |a| a.clear_sky && a.temperature_c > 25.0 && a.temperature_c < 35.0,
        outcome: Advisory::Favorable,
    },
    Rule {
        id: "cold_stress",
        applies: |a| a.temperature_c < 15.0,
        outcome: Advisory::ColdStress,
    },
];

pub const ADVISORY_TABLE: RuleTable<AdvisoryInput, Advisory> =
    RuleTable::new(RULES, "moderate", Advisory::Moderate);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_label_match_is_case_insensitive() {
        assert!(AdvisoryInput::new(30.0, 0.0, 50.0, "Clear").clear_sky);
        assert!(AdvisoryInput::new(30.0, 0.0, 50.0, "clear sky").clear_sky);
        assert!(!AdvisoryInput::new(30.0, 0.0, 50.0, "Clouds").clear_sky);
    }

    #[test]
    fn favorable_band_is_open() {
        let at = |t| ADVISORY_TABLE.evaluate(&AdvisoryInput::new(t, 0.0, 50.0, "Clear"));
        assert_eq!(at(25.0), Advisory::Moderate);
        assert_eq!(at(25.5), Advisory::Favorable);
        assert_eq!(at(34.9), Advisory::Favorable);
        assert_eq!(at(35.0), Advisory::Moderate);
    }

    #[test]
    fn cold_applies_regardless_of_sky() {
        let input = AdvisoryInput::new(10.0, 0.0, 50.0, "Clear");
        assert_eq!(ADVISORY_TABLE.evaluate(&input), Advisory::ColdStress);
        assert_eq!(ADVISORY_TABLE.decided_by(&input), "cold_stress");
    }
}
