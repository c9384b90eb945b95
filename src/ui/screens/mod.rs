pub mod chat;
pub mod crops;
pub mod dashboard;
pub mod feedback;
pub mod market;
pub mod pests;
pub mod soil;
pub mod weather;

pub use chat::ChatScreen;
pub use crops::CropsScreen;
pub use dashboard::DashboardScreen;
pub use feedback::FeedbackScreen;
pub use market::MarketScreen;
pub use pests::PestsScreen;
pub use soil::SoilScreen;
pub use weather::WeatherScreen;

use crate::ui::Theme;
use ratatui::text::{Line, Span};

/// Screen-specific key hints followed by the global ones.
pub fn nav_bar(keys: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(format!("[{}]", key), Theme::nav_key()));
        spans.push(Span::styled(*label, Theme::nav_label()));
    }
    spans.extend([
        Span::styled("[1-8]", Theme::nav_key()),
        Span::styled("Screens ", Theme::nav_label()),
        Span::styled("[Esc]", Theme::nav_key()),
        Span::styled("Back ", Theme::nav_label()),
        Span::styled("[q]", Theme::nav_key()),
        Span::styled("Quit", Theme::nav_label()),
    ]);
    Line::from(spans)
}
