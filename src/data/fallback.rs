use super::regions::region_or_default;
use crate::logic::ConditionsAdvisor;
use crate::models::{DataOrigin, EnvironmentReading, ForecastPoint, WeatherForecast};
use chrono::{Days, NaiveDate, Utc};
use rand::Rng;

pub const FALLBACK_WIND_KPH: f64 = 12.0;
pub const FALLBACK_LABEL: &str = "clear";
pub const FALLBACK_DESCRIPTION: &str = "partly cloudy";

// Substituted for a zero in the region table
const DEFAULT_TEMPERATURE_C: f64 = 25.0;
const DEFAULT_RAINFALL_MM: f64 = 2.0;
const DEFAULT_HUMIDITY_PCT: f64 = 60.0;

fn nonzero_or(value: f64, default: f64) -> f64 {
    if value == 0.0 {
        default
    } else {
        value
    }
}

/// Typical conditions for `region` from the static table. Unknown names get
/// the default region's values but keep the requested name. A zero in the
/// table reads as "no figure" and gets the matching default.
pub fn fallback_reading(region: &str) -> EnvironmentReading {
    let row = region_or_default(region).fallback;
    let temperature_c = nonzero_or(row.temperature_c, DEFAULT_TEMPERATURE_C);
    let rainfall_mm = nonzero_or(row.rainfall_mm, DEFAULT_RAINFALL_MM);
    let humidity_pct = nonzero_or(row.humidity_pct, DEFAULT_HUMIDITY_PCT);

    EnvironmentReading {
        region: region.trim().to_string(),
        fetched_at: Utc::now(),
        origin: DataOrigin::Fallback,
        temperature_c,
        rainfall_mm,
        humidity_pct,
        wind_kph: FALLBACK_WIND_KPH,
        condition_label: FALLBACK_LABEL.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        advisory: ConditionsAdvisor::generate_advisory(
            temperature_c,
            rainfall_mm,
            humidity_pct,
            FALLBACK_LABEL,
        ),
    }
}

/// Seven synthetic days starting at `start`: 20-29 °C and 0-5 mm of rain.
pub fn fallback_forecast<R: Rng + ?Sized>(region: &str, start: NaiveDate, rng: &mut R) -> WeatherForecast {
    let days = (0..WeatherForecast::MAX_DAYS as u64)
        .map(|offset| ForecastPoint {
            date: start.checked_add_days(Days::new(offset)).unwrap_or(start),
            temperature_c: 25.0 + f64::from(rng.gen_range(-5i32..5)),
            rainfall_mm: rng.gen_range(0.0..5.0),
            description: FALLBACK_DESCRIPTION.to_string(),
        })
        .collect();

    WeatherForecast {
        region: region.trim().to_string(),
        origin: DataOrigin::Fallback,
        fetched_at: Utc::now(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Advisory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn known_region_uses_its_row() {
        let reading = fallback_reading("Kerala");
        assert_eq!(reading.temperature_c, 26.0);
        assert_eq!(reading.rainfall_mm, 8.2);
        assert_eq!(reading.humidity_pct, 85.0);
        assert_eq!(reading.wind_kph, 12.0);
        assert_eq!(reading.origin, DataOrigin::Fallback);
        assert_eq!(reading.advisory, Advisory::HeavyRain);
    }

    #[test]
    fn zero_rainfall_reads_as_default() {
        let reading = fallback_reading("Maharashtra");
        assert_eq!(reading.rainfall_mm, 2.0);
        assert_eq!(reading.temperature_c, 28.0);
        assert_eq!(reading.humidity_pct, 45.0);
        assert_eq!(reading.advisory, Advisory::Favorable);
    }

    #[test]
    fn unknown_region_is_deterministic() {
        let a = fallback_reading("Atlantis");
        let b = fallback_reading("Atlantis");
        assert_eq!(a.region, "Atlantis");
        assert_eq!(a.temperature_c, 18.0);
        assert_eq!(a.rainfall_mm, 2.5);
        assert_eq!(a.humidity_pct, 65.0);
        assert_eq!(a.temperature_c, b.temperature_c);
        assert_eq!(a.rainfall_mm, b.rainfall_mm);
        assert_eq!(a.humidity_pct, b.humidity_pct);
        assert_eq!(a.description, b.description);
        assert_eq!(a.advisory, b.advisory);
        assert_eq!(a.advisory, Advisory::Moderate);
    }

    #[test]
    fn forecast_has_seven_days_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = NaiveDate::from_ymd_opt(2024, 12, 29).unwrap();
        let forecast = fallback_forecast("Punjab", start, &mut rng);

        assert_eq!(forecast.days.len(), 7);
        assert_eq!(forecast.days[0].date, start);
        assert_eq!(forecast.days[6].date, NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
        for day in &forecast.days {
            assert!((20.0..=29.0).contains(&day.temperature_c));
            assert!((0.0..5.0).contains(&day.rainfall_mm));
        }
    }
}
