use super::reading::DataOrigin;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Day-by-day outlook for a region, at most seven points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub region: String,
    pub origin: DataOrigin,
    pub fetched_at: DateTime<Utc>,
    pub days: Vec<ForecastPoint>,
}

impl WeatherForecast {
    pub const MAX_DAYS: usize = 7;

    pub fn max_temp(&self) -> Option<f64> {
        self.days
            .iter()
            .map(|d| d.temperature_c)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn total_rainfall(&self) -> f64 {
        self.days.iter().map(|d| d.rainfall_mm).sum()
    }

    /// Number of days with rainfall strictly above `threshold_mm`
    pub fn wet_days(&self, threshold_mm: f64) -> usize {
        self.days
            .iter()
            .filter(|d| d.rainfall_mm > threshold_mm)
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, temp: f64, rain: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            temperature_c: temp,
            rainfall_mm: rain,
            description: "light rain".to_string(),
        }
    }

    #[test]
    fn forecast_aggregates() {
        let forecast = WeatherForecast {
            region: "Kerala".to_string(),
            origin: DataOrigin::Live,
            fetched_at: Utc::now(),
            days: vec![point(1, 27.0, 6.0), point(2, 31.0, 0.0), point(3, 29.0, 2.5)],
        };

        assert_eq!(forecast.max_temp(), Some(31.0));
        assert!((forecast.total_rainfall() - 8.5).abs() < 1e-9);
        assert_eq!(forecast.wet_days(5.0), 1);
        assert_eq!(forecast.wet_days(0.0), 2);
    }

    #[test]
    fn empty_forecast_has_no_max() {
        let forecast = WeatherForecast {
            region: "Goa".to_string(),
            origin: DataOrigin::Fallback,
            fetched_at: Utc::now(),
            days: Vec::new(),
        };
        assert_eq!(forecast.max_temp(), None);
        assert_eq!(forecast.total_rainfall(), 0.0);
    }
}
