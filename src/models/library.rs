use super::reading::SoilReading;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Pest {
    pub name: &'static str,
    pub symptoms: &'static str,
    pub remedy: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketPrice {
    pub crop: &'static str,
    pub market: &'static str,
    /// Rupees per quintal
    pub price: u32,
    pub date: &'static str,
    /// Day-over-day change as published, e.g. "+2.3%"
    pub change: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceTrend {
    Up,
    Down,
    Flat,
}

impl PriceTrend {
    pub fn from_change(change: &str) -> Self {
        if change.starts_with('+') {
            PriceTrend::Up
        } else if change.starts_with('-') {
            PriceTrend::Down
        } else {
            PriceTrend::Flat
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PriceTrend::Up => "↑",
            PriceTrend::Down => "↓",
            PriceTrend::Flat => "→",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            PriceTrend::Up => Color::Green,
            PriceTrend::Down => Color::Red,
            PriceTrend::Flat => Color::DarkGray,
        }
    }
}

impl MarketPrice {
    pub fn trend(&self) -> PriceTrend {
        PriceTrend::from_change(self.change)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SoilSample {
    pub location: &'static str,
    pub soil_type: &'static str,
    pub reading: SoilReading,
    pub recommendation: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherSample {
    pub location: &'static str,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub humidity_pct: f64,
    pub advisory: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CropAdvisory {
    pub location: &'static str,
    pub recommended_crop: &'static str,
    pub reasoning: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackEntry {
    pub farmer_name: &'static str,
    pub location: &'static str,
    pub message: &'static str,
    pub rating: u8,
    pub date: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_trend_from_change_sign() {
        assert_eq!(PriceTrend::from_change("+2.3%"), PriceTrend::Up);
        assert_eq!(PriceTrend::from_change("-8.2%"), PriceTrend::Down);
        assert_eq!(PriceTrend::from_change("0.0%"), PriceTrend::Flat);
        assert_eq!(PriceTrend::from_change(""), PriceTrend::Flat);
    }
}
