use crate::models::MarketPrice;

/// Convert wind speed from m/s to km/h, rounded to the nearest whole number
pub fn ms_to_kph(speed_ms: f64) -> f64 {
    (speed_ms * 3.6).round()
}

/// Pick roughly one entry per day from 3-hourly forecast data
/// (every 8th entry, at most 7)
pub fn daily_samples<T>(entries: &[T]) -> Vec<&T> {
    entries.iter().step_by(8).take(7).collect()
}

/// Summary of a set of market quotes, in rupees per quintal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceStats {
    pub highest: u32,
    pub lowest: u32,
    pub average: u32,
}

/// Highest, lowest and rounded mean price. `None` for an empty slice.
pub fn price_stats<'a, I>(prices: I) -> Option<PriceStats>
where
    I: IntoIterator<Item = &'a MarketPrice>,
{
    let values: Vec<u32> = prices.into_iter().map(|p| p.price).collect();
    let highest = *values.iter().max()?;
    let lowest = *values.iter().min()?;
    let total: u64 = values.iter().map(|v| u64::from(*v)).sum();
    let average = (total as f64 / values.len() as f64).round() as u32;

    Some(PriceStats {
        highest,
        lowest,
        average,
    })
}

/// Mean star rating. `None` when there are no ratings.
pub fn average_rating(ratings: impl IntoIterator<Item = u8>) -> Option<f64> {
    let (total, count) = ratings
        .into_iter()
        .fold((0u32, 0u32), |(total, count), r| (total + u32::from(r), count + 1));
    (count > 0).then(|| f64::from(total) / f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::samples::{FEEDBACK, MARKET_PRICES};

    #[test]
    fn wind_conversion_rounds() {
        assert_eq!(ms_to_kph(3.33), 12.0);
        assert_eq!(ms_to_kph(0.0), 0.0);
        assert_eq!(ms_to_kph(10.0), 36.0);
    }

    #[test]
    fn daily_samples_takes_every_eighth() {
        let entries: Vec<usize> = (0..40).collect();
        let picked: Vec<usize> = daily_samples(&entries).into_iter().copied().collect();
        assert_eq!(picked, vec![0, 8, 16, 24, 32]);

        let long: Vec<usize> = (0..100).collect();
        assert_eq!(daily_samples(&long).len(), 7);
        assert!(daily_samples::<usize>(&[]).is_empty());
    }

    #[test]
    fn stats_over_sample_prices() {
        let stats = price_stats(MARKET_PRICES).unwrap();
        let max = MARKET_PRICES.iter().map(|p| p.price).max().unwrap();
        let min = MARKET_PRICES.iter().map(|p| p.price).min().unwrap();
        assert_eq!(stats.highest, max);
        assert_eq!(stats.lowest, min);
        assert!(stats.average >= min && stats.average <= max);
    }

    #[test]
    fn stats_average_is_rounded() {
        let prices = [
            MarketPrice {
                crop: "Wheat",
                market: "Delhi Mandi",
                price: 2000,
                date: "2024-01-15",
                change: "+1.0%",
            },
            MarketPrice {
                crop: "Rice",
                market: "Delhi Mandi",
                price: 2001,
                date: "2024-01-15",
                change: "-1.0%",
            },
        ];
        let stats = price_stats(&prices).unwrap();
        assert_eq!(stats.average, 2001);
        assert!(price_stats(&prices[..0]).is_none());
    }

    #[test]
    fn feedback_average() {
        let avg = average_rating(FEEDBACK.iter().map(|f| f.rating)).unwrap();
        assert!((1.0..=5.0).contains(&avg));
        assert_eq!(average_rating([5, 4]), Some(4.5));
        assert!(average_rating(Vec::<u8>::new()).is_none());
    }
}
