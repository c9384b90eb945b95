use crate::models::{
    ChatEntry, CropAdvisory, FeedbackEntry, Language, MarketPrice, Pest, SoilReading, SoilSample,
    VoiceCommand, WeatherSample,
};

pub const SOIL_SAMPLES: &[SoilSample] = &[
    SoilSample {
        location: "Punjab",
        soil_type: "Alluvial",
        reading: SoilReading::new(85.0, 32.0, 78.0, 7.2),
        recommendation: "Apply 20kg urea and 15kg DAP per acre. Soil pH is optimal for wheat cultivation.",
    },
    SoilSample {
        location: "Maharashtra",
        soil_type: "Black Cotton",
        reading: SoilReading::new(72.0, 28.0, 92.0, 8.1),
        recommendation: "Reduce alkalinity by adding sulfur. Apply 18kg urea and 12kg SSP per acre.",
    },
    SoilSample {
        location: "Kerala",
        soil_type: "Laterite",
        reading: SoilReading::new(68.0, 24.0, 65.0, 5.8),
        recommendation: "Apply lime to increase pH. Add 22kg urea, 16kg DAP, and 10kg MOP per acre.",
    },
];

pub const WEATHER_SAMPLES: &[WeatherSample] = &[
    WeatherSample {
        location: "Punjab",
        temperature_c: 18.0,
        rainfall_mm: 2.5,
        humidity_pct: 65.0,
        advisory: "Light rainfall expected. Good time for wheat sowing. Monitor for fungal diseases.",
    },
    WeatherSample {
        location: "Maharashtra",
        temperature_c: 28.0,
        rainfall_mm: 0.0,
        humidity_pct: 45.0,
        advisory: "Dry weather continues. Ensure adequate irrigation for cotton. Watch for pest attacks.",
    },
    WeatherSample {
        location: "Kerala",
        temperature_c: 26.0,
        rainfall_mm: 8.2,
        humidity_pct: 85.0,
        advisory: "Heavy rainfall alert. Ensure proper drainage in paddy fields. Risk of blast disease.",
    },
];

pub const CROP_ADVISORIES: &[CropAdvisory] = &[
    CropAdvisory {
        location: "Punjab",
        recommended_crop: "Wheat",
        reasoning: "Ideal soil conditions, favorable winter temperature, and adequate water availability make wheat the best choice for current season.",
    },
    CropAdvisory {
        location: "Maharashtra",
        recommended_crop: "Cotton",
        reasoning: "Black soil rich in calcium and magnesium, suitable rainfall pattern, and market demand support cotton cultivation.",
    },
    CropAdvisory {
        location: "Kerala",
        recommended_crop: "Rice",
        reasoning: "High humidity, consistent rainfall, and clayey soil conditions are perfect for paddy cultivation.",
    },
    CropAdvisory {
        location: "Rajasthan",
        recommended_crop: "Millet",
        reasoning: "Drought-resistant crop suitable for arid climate, sandy soil, and limited water resources.",
    },
];

pub const PEST_LIBRARY: &[Pest] = &[
    Pest {
        name: "Aphids",
        symptoms: "Small green/black insects on leaves, sticky honeydew, yellowing leaves",
        remedy: "Spray neem oil solution or use ladybird beetles as biological control. Apply systemic insecticides if severe.",
    },
    Pest {
        name: "Leaf Blight",
        symptoms: "Brown spots on leaves, yellowing, premature leaf drop",
        remedy: "Remove affected leaves, improve air circulation, apply copper-based fungicide spray every 7-10 days.",
    },
    Pest {
        name: "Root Rot",
        symptoms: "Wilting plants, brown/black roots, stunted growth",
        remedy: "Improve drainage, reduce watering, apply fungicide to soil, use disease-resistant varieties.",
    },
    Pest {
        name: "Whitefly",
        symptoms: "Tiny white insects under leaves, yellowing leaves, sticky honeydew",
        remedy: "Use yellow sticky traps, spray insecticidal soap, release natural predators like Encarsia formosa.",
    },
];

pub const MARKET_PRICES: &[MarketPrice] = &[
    MarketPrice {
        crop: "Wheat",
        market: "Delhi Mandi",
        price: 2150,
        date: "2024-01-15",
        change: "+2.3%",
    },
    MarketPrice {
        crop: "Rice",
        market: "Mumbai APMC",
        price: 3200,
        date: "2024-01-15",
        change: "-1.2%",
    },
    MarketPrice {
        crop: "Cotton",
        market: "Nagpur Market",
        price: 6800,
        date: "2024-01-15",
        change: "+5.8%",
    },
    MarketPrice {
        crop: "Sugarcane",
        market: "Pune APMC",
        price: 350,
        date: "2024-01-15",
        change: "+1.5%",
    },
    MarketPrice {
        crop: "Onion",
        market: "Nashik Market",
        price: 2800,
        date: "2024-01-15",
        change: "-8.2%",
    },
];

pub const FEEDBACK: &[FeedbackEntry] = &[
    FeedbackEntry {
        farmer_name: "Ramesh Kumar",
        location: "Punjab",
        message: "Helped me increase my wheat yield by 20%. The soil recommendations were very accurate.",
        rating: 5,
        date: "2024-01-10",
    },
    FeedbackEntry {
        farmer_name: "Priya Sharma",
        location: "Maharashtra",
        message: "Weather alerts saved my cotton crop from unexpected rainfall. Great platform!",
        rating: 4,
        date: "2024-01-12",
    },
    FeedbackEntry {
        farmer_name: "Suresh Patel",
        location: "Gujarat",
        message: "Market price tracking feature helps me sell at the right time. Very useful app.",
        rating: 5,
        date: "2024-01-14",
    },
];

pub const CHAT_SCRIPT: &[ChatEntry] = &[
    ChatEntry {
        language: Language::English,
        user_input: "How to control pests?",
        bot_response: "For effective pest control: 1) Regular field monitoring 2) Use of beneficial insects 3) Neem-based sprays 4) Crop rotation 5) Remove infected plants immediately.",
    },
    ChatEntry {
        language: Language::Hindi,
        user_input: "मिट्टी की जांच कैसे करें?",
        bot_response: "मिट्टी की जांच के लिए: 1) नमूना एकत्र करें 2) pH मीटर का उपयोग करें 3) NPK टेस्ट किट से जांचें 4) नजदीकी कृषि केंद्र में भेजें 5) परिणाम के आधार पर उर्वरक डालें।",
    },
    ChatEntry {
        language: Language::English,
        user_input: "Best time to plant wheat?",
        bot_response: "Wheat planting season: Late October to early December is ideal. Soil temperature should be 15-20°C. Ensure adequate moisture and prepare land 2-3 weeks before sowing.",
    },
];

pub const VOICE_COMMANDS: &[VoiceCommand] = &[
    VoiceCommand {
        command: "weather",
        response: "Today's weather in your area shows 26°C temperature with 65% humidity. Light rainfall expected this evening.",
    },
    VoiceCommand {
        command: "soil",
        response: "Your soil analysis shows pH 7.2 with good nitrogen levels. Recommended to apply organic fertilizer this week.",
    },
    VoiceCommand {
        command: "prices",
        response: "Current wheat prices are 2,150 rupees per quintal in Delhi Mandi, showing a 2.3% increase from yesterday.",
    },
    VoiceCommand {
        command: "advisory",
        response: "Based on current conditions, this is an ideal time for wheat sowing in your region. Ensure proper seed treatment before planting.",
    },
];

pub fn soil_sample(location: &str) -> Option<&'static SoilSample> {
    SOIL_SAMPLES
        .iter()
        .find(|s| s.location.eq_ignore_ascii_case(location.trim()))
}

/// Agronomist note recorded alongside the sample weather for a location.
pub fn weather_note(location: &str) -> Option<&'static str> {
    WEATHER_SAMPLES
        .iter()
        .find(|w| w.location.eq_ignore_ascii_case(location.trim()))
        .map(|w| w.advisory)
}

pub fn crop_advisory(location: &str) -> Option<&'static CropAdvisory> {
    CROP_ADVISORIES
        .iter()
        .find(|a| a.location.eq_ignore_ascii_case(location.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_sample_lookup() {
        let kerala = soil_sample("kerala").unwrap();
        assert_eq!(kerala.soil_type, "Laterite");
        assert_eq!(kerala.reading.ph, 5.8);
        assert!(soil_sample("Goa").is_none());
    }

    #[test]
    fn weather_note_lookup() {
        assert!(weather_note("kerala").unwrap().starts_with("Heavy rainfall alert"));
        assert!(weather_note("Goa").is_none());
    }

    #[test]
    fn crop_advisory_lookup() {
        assert_eq!(crop_advisory("Rajasthan").unwrap().recommended_crop, "Millet");
        assert!(crop_advisory("Sikkim").is_none());
    }

    #[test]
    fn weather_samples_match_region_fallbacks() {
        for sample in WEATHER_SAMPLES {
            let region = crate::data::regions::find_region(sample.location).unwrap();
            assert_eq!(region.fallback.temperature_c, sample.temperature_c);
            assert_eq!(region.fallback.humidity_pct, sample.humidity_pct);
        }
    }
}
