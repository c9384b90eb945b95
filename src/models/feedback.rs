use super::library::FeedbackEntry;
use crate::error::{CropCareError, Result};
use chrono::NaiveDate;
use serde::Serialize;

pub const MAX_RATING: u8 = 5;

const MISSING_FIELDS: &str = "Please fill in all fields and provide a rating.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FeedbackCategory {
    CropAdvisory,
    SoilHealth,
    WeatherUpdates,
    PestDetection,
    MarketPrices,
    AppExperience,
    General,
}

impl FeedbackCategory {
    pub const ALL: [FeedbackCategory; 7] = [
        FeedbackCategory::CropAdvisory,
        FeedbackCategory::SoilHealth,
        FeedbackCategory::WeatherUpdates,
        FeedbackCategory::PestDetection,
        FeedbackCategory::MarketPrices,
        FeedbackCategory::AppExperience,
        FeedbackCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackCategory::CropAdvisory => "Crop Advisory",
            FeedbackCategory::SoilHealth => "Soil Health",
            FeedbackCategory::WeatherUpdates => "Weather Updates",
            FeedbackCategory::PestDetection => "Pest Detection",
            FeedbackCategory::MarketPrices => "Market Prices",
            FeedbackCategory::AppExperience => "App Experience",
            FeedbackCategory::General => "General Feedback",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    /// Steps through the categories, with "none" between the last and first.
    pub fn cycle(current: Option<Self>, forward: bool) -> Option<Self> {
        let len = Self::ALL.len();
        match (current, forward) {
            (None, true) => Some(Self::ALL[0]),
            (None, false) => Some(Self::ALL[len - 1]),
            (Some(c), true) => Self::ALL.get(c.index() + 1).copied(),
            (Some(c), false) => c.index().checked_sub(1).map(|i| Self::ALL[i]),
        }
    }
}

impl std::fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A farmer's review, from the sample set or submitted in this session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub farmer_name: String,
    pub location: String,
    pub message: String,
    pub rating: u8,
    pub category: Option<FeedbackCategory>,
    pub date: String,
}

impl From<&FeedbackEntry> for Feedback {
    fn from(entry: &FeedbackEntry) -> Self {
        Self {
            farmer_name: entry.farmer_name.to_string(),
            location: entry.location.to_string(),
            message: entry.message.to_string(),
            rating: entry.rating,
            category: None,
            date: entry.date.to_string(),
        }
    }
}

/// Inputs of the feedback form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackField {
    Name,
    Location,
    Category,
    Rating,
    Message,
}

impl FeedbackField {
    pub const ALL: [FeedbackField; 5] = [
        FeedbackField::Name,
        FeedbackField::Location,
        FeedbackField::Category,
        FeedbackField::Rating,
        FeedbackField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackField::Name => "Your Name",
            FeedbackField::Location => "Location",
            FeedbackField::Category => "Category",
            FeedbackField::Rating => "Rating",
            FeedbackField::Message => "Your Feedback",
        }
    }

    /// Free-text fields take typed input; the others are picked with ←→.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FeedbackField::Name | FeedbackField::Location | FeedbackField::Message
        )
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub farmer_name: String,
    pub location: String,
    pub message: String,
    pub category: Option<FeedbackCategory>,
    /// 0 until the farmer picks a star count
    pub rating: u8,
}

impl FeedbackForm {
    /// Text behind a free-text field. `None` for the picker fields.
    pub fn text(&self, field: FeedbackField) -> Option<&str> {
        match field {
            FeedbackField::Name => Some(&self.farmer_name),
            FeedbackField::Location => Some(&self.location),
            FeedbackField::Message => Some(&self.message),
            FeedbackField::Category | FeedbackField::Rating => None,
        }
    }

    pub fn text_mut(&mut self, field: FeedbackField) -> Option<&mut String> {
        match field {
            FeedbackField::Name => Some(&mut self.farmer_name),
            FeedbackField::Location => Some(&mut self.location),
            FeedbackField::Message => Some(&mut self.message),
            FeedbackField::Category | FeedbackField::Rating => None,
        }
    }

    pub fn set_rating(&mut self, stars: u8) {
        self.rating = stars.min(MAX_RATING);
    }

    /// Name, location, message and a rating are required; the category is
    /// optional. Values are trimmed.
    pub fn submit(&self, date: NaiveDate) -> Result<Feedback> {
        let name = self.farmer_name.trim();
        let location = self.location.trim();
        let message = self.message.trim();

        if name.is_empty() || location.is_empty() || message.is_empty() || self.rating == 0 {
            return Err(CropCareError::Validation(MISSING_FIELDS.to_string()));
        }
        if self.rating > MAX_RATING {
            return Err(CropCareError::Validation(format!(
                "Rating must be between 1 and {}",
                MAX_RATING
            )));
        }

        Ok(Feedback {
            farmer_name: name.to_string(),
            location: location.to_string(),
            message: message.to_string(),
            rating: self.rating,
            category: self.category,
            date: date.format("%Y-%m-%d").to_string(),
        })
    }
}

/// Filled and empty stars for a rating out of five.
pub fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(MAX_RATING));
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(usize::from(MAX_RATING) - filled)
    )
}
