use super::{Rule, RuleTable};
use crate::models::WeatherStatus;

/// Weather values the status table looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherInput {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub humidity_pct: f64,
}

/// Rain outranks heat, heat outranks humidity.
const RULES: &[Rule<WeatherInput, WeatherStatus>] = &[
    Rule {
        id: "rainy",
        applies: |w| w.rainfall_mm > 5.0,
        outcome: WeatherStatus::Rainy,
    },
    Rule {
        id: "hot",
        applies: |w| w.temperature_c > 35.0,
        outcome: WeatherStatus::Hot,
    },
    Rule {
        id: "humid",
        applies: |w| w.humidity_pct > 80.0,
        outcome: WeatherStatus::Humid,
    },
];

pub const WEATHER_STATUS_TABLE: RuleTable<WeatherInput, WeatherStatus> =
    RuleTable::new(RULES, "pleasant", WeatherStatus::Pleasant);

#[cfg(test)]
mod tests {
    use super::*;

    fn input(t: f64, r: f64, h: f64) -> WeatherInput {
        WeatherInput {
            temperature_c: t,
            rainfall_mm: r,
            humidity_pct: h,
        }
    }

    #[test]
    fn heat_outranks_humidity() {
        assert_eq!(
            WEATHER_STATUS_TABLE.evaluate(&input(40.0, 0.0, 95.0)),
            WeatherStatus::Hot
        );
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(
            WEATHER_STATUS_TABLE.evaluate(&input(35.0, 5.0, 80.0)),
            WeatherStatus::Pleasant
        );
    }

    #[test]
    fn rule_order() {
        assert_eq!(WEATHER_STATUS_TABLE.decided_by(&input(40.0, 6.0, 90.0)), "rainy");
        assert_eq!(WEATHER_STATUS_TABLE.decided_by(&input(40.0, 0.0, 90.0)), "hot");
        assert_eq!(WEATHER_STATUS_TABLE.decided_by(&input(30.0, 0.0, 90.0)), "humid");
        assert_eq!(WEATHER_STATUS_TABLE.decided_by(&input(30.0, 0.0, 50.0)), "pleasant");
    }
}
