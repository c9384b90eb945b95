use crate::models::{MarketPrice, Pest};

/// Pests whose name or symptoms contain `query`, ignoring case.
/// An empty query matches everything.
pub fn filter_pests<'a>(pests: &'a [Pest], query: &str) -> Vec<&'a Pest> {
    let query = query.trim().to_lowercase();
    pests
        .iter()
        .filter(|p| {
            query.is_empty()
                || p.name.to_lowercase().contains(&query)
                || p.symptoms.to_lowercase().contains(&query)
        })
        .collect()
}

/// Market selection for the price table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MarketFilter {
    #[default]
    All,
    Market(String),
}

impl MarketFilter {
    /// "all" (any case) or an empty string selects every market.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            MarketFilter::All
        } else {
            MarketFilter::Market(value.to_string())
        }
    }

    pub fn matches(&self, market: &str) -> bool {
        match self {
            MarketFilter::All => true,
            MarketFilter::Market(name) => name == market,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MarketFilter::All => "All markets",
            MarketFilter::Market(name) => name,
        }
    }
}

/// Rows whose crop contains `query` (ignoring case) in the selected market.
pub fn filter_prices<'a>(
    prices: &'a [MarketPrice],
    query: &str,
    market: &MarketFilter,
) -> Vec<&'a MarketPrice> {
    let query = query.trim().to_lowercase();
    prices
        .iter()
        .filter(|p| p.crop.to_lowercase().contains(&query) && market.matches(p.market))
        .collect()
}

/// Distinct market names in first-seen order.
pub fn markets(prices: &[MarketPrice]) -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for price in prices {
        if !seen.contains(&price.market) {
            seen.push(price.market);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::samples::{MARKET_PRICES, PEST_LIBRARY};

    #[test]
    fn empty_query_matches_all_pests() {
        assert_eq!(filter_pests(PEST_LIBRARY, "").len(), PEST_LIBRARY.len());
        assert_eq!(filter_pests(PEST_LIBRARY, "   ").len(), PEST_LIBRARY.len());
    }

    #[test]
    fn pest_search_covers_name_and_symptoms() {
        let by_name = filter_pests(PEST_LIBRARY, "APHID");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Aphids");

        let by_symptom = filter_pests(PEST_LIBRARY, "honeydew");
        assert!(by_symptom.iter().any(|p| p.name == "Whitefly"));

        assert!(filter_pests(PEST_LIBRARY, "locust").is_empty());
    }

    #[test]
    fn market_filter_parse() {
        assert_eq!(MarketFilter::parse("ALL"), MarketFilter::All);
        assert_eq!(MarketFilter::parse(""), MarketFilter::All);
        assert_eq!(
            MarketFilter::parse("Pune APMC"),
            MarketFilter::Market("Pune APMC".to_string())
        );
    }

    #[test]
    fn price_filter_combines_crop_and_market() {
        assert_eq!(filter_prices(MARKET_PRICES, "", &MarketFilter::All).len(), 5);

        let rice = filter_prices(MARKET_PRICES, "ri", &MarketFilter::All);
        assert_eq!(rice.len(), 1);
        assert_eq!(rice[0].crop, "Rice");

        let delhi = MarketFilter::Market("Delhi Mandi".to_string());
        assert_eq!(filter_prices(MARKET_PRICES, "", &delhi).len(), 1);
        assert!(filter_prices(MARKET_PRICES, "onion", &delhi).is_empty());
    }

    #[test]
    fn market_match_is_exact() {
        let filter = MarketFilter::Market("delhi mandi".to_string());
        assert!(filter_prices(MARKET_PRICES, "", &filter).is_empty());
    }

    #[test]
    fn distinct_markets() {
        let names = markets(MARKET_PRICES);
        assert_eq!(names.len(), 5);
        assert_eq!(names[0], "Delhi Mandi");
    }
}
