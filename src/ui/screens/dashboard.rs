use crate::data::find_region;
use crate::data::samples::{crop_advisory, FEEDBACK};
use crate::logic::calculations::average_rating;
use crate::logic::ConditionsAdvisor;
use crate::models::{AlertKind, EnvironmentReading, FieldAlert, RegionalRecommendation};
use crate::ui::components::{humidity_gauge, rainfall_gauge, temperature_gauge, wind_gauge};
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct DashboardScreen<'a> {
    pub region: &'a str,
    pub conditions: Option<&'a EnvironmentReading>,
    pub alerts: &'a [FieldAlert],
    pub regional: Option<&'a RegionalRecommendation>,
    pub regional_error: Option<&'a str>,
    pub loading: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> DashboardScreen<'a> {
    pub fn new(
        region: &'a str,
        conditions: Option<&'a EnvironmentReading>,
        alerts: &'a [FieldAlert],
    ) -> Self {
        Self {
            region,
            conditions,
            alerts,
            regional: None,
            regional_error: None,
            loading: false,
            status_message: None,
        }
    }

    pub fn with_regional(
        mut self,
        regional: Option<&'a RegionalRecommendation>,
        error: Option<&'a str>,
    ) -> Self {
        self.regional = regional;
        self.regional_error = error;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for DashboardScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Gauges row
                Constraint::Min(8),    // Alerts and advisory
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_gauges(chunks[1], buf);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        self.render_alerts(middle[0], buf);
        self.render_advisory(middle[1], buf);

        self.render_status_message(chunks[3], buf);

        Paragraph::new(nav_bar(&[("←→", "Region "), ("r", "Refresh ")])).render(chunks[4], buf);
    }
}

impl DashboardScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let city = find_region(self.region).map(|r| r.city).unwrap_or("");
        let title = format!("CropCare - {} ({})", self.region, city);

        let block = Block::default()
            .title(Span::styled(title, Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let info = match self.conditions {
            Some(c) => format!(
                "Last updated: {} • Source: {}",
                c.fetched_at.format("%Y-%m-%d %H:%M"),
                c.origin
            ),
            None if self.loading => "Loading...".to_string(),
            None => "Last updated: Never".to_string(),
        };
        let para = Paragraph::new(Span::styled(info, Theme::dim())).block(block);
        para.render(area, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let gauge_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let current = self.conditions;
        temperature_gauge("Temperature", current.map(|c| c.temperature_c))
            .render(gauge_chunks[0], buf);
        humidity_gauge("Humidity", current.map(|c| c.humidity_pct)).render(gauge_chunks[1], buf);
        rainfall_gauge("Rainfall", current.map(|c| c.rainfall_mm)).render(gauge_chunks[2], buf);
        wind_gauge("Wind", current.map(|c| c.wind_kph)).render(gauge_chunks[3], buf);
    }

    fn render_alerts(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Active Alerts", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.alerts.is_empty() {
            let para = Paragraph::new(Span::styled("No active alerts", Theme::dim()));
            para.render(inner, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .alerts
            .iter()
            .take(4)
            .map(|alert| {
                let style = Style::default().fg(alert.severity.color());
                let title_line = Line::from(vec![
                    Span::styled(format!("{} ", alert.severity.symbol()), style),
                    Span::styled(
                        format!("[{}] ", alert.kind.tag()),
                        Style::default().fg(alert.kind.color()),
                    ),
                    Span::styled(alert.title.as_str(), style),
                ]);
                let detail = match alert.kind {
                    AlertKind::Weather => alert.description.clone(),
                    _ => alert.evidence_summary(),
                };
                ListItem::new(vec![
                    title_line,
                    Line::from(Span::styled(format!("  {}", detail), Theme::dim())),
                ])
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_advisory(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("Field Advisory", Theme::header()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();

        if let Some(c) = self.conditions {
            let status =
                ConditionsAdvisor::classify_weather(c.temperature_c, c.rainfall_mm, c.humidity_pct);
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} {} ", status.symbol(), status),
                    Style::default().fg(status.color()),
                ),
                Span::styled(status.description(), Theme::dim()),
            ]));
            lines.push(Line::from(Span::styled(c.advisory.text(), Theme::normal())));
            lines.push(Line::default());
        }

        match (self.regional, self.regional_error) {
            (Some(r), _) => lines.push(Line::from(vec![
                Span::styled("Suggested crop: ", Theme::dim()),
                Span::styled(&r.primary_recommendation, Theme::highlight()),
                Span::styled(format!(" ({:.0}%)", r.confidence * 100.0), Theme::dim()),
            ])),
            (None, Some(e)) => lines.push(Line::from(Span::styled(
                format!("Crop service: {}", e),
                Theme::warning(),
            ))),
            (None, None) => {}
        }

        if let Some(advisory) = crop_advisory(self.region) {
            lines.push(Line::from(vec![
                Span::styled("Season pick: ", Theme::dim()),
                Span::styled(advisory.recommended_crop, Theme::success()),
            ]));
            lines.push(Line::from(Span::styled(advisory.reasoning, Theme::dim())));
        }

        if let Some(avg) = average_rating(FEEDBACK.iter().map(|f| f.rating)) {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Farmer rating: ", Theme::dim()),
                Span::styled(format!("{:.1}/5", avg), Theme::normal()),
                Span::styled(format!(" from {} reviews", FEEDBACK.len()), Theme::dim()),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_status_message(&self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.status_message {
            let style = if msg.contains("OFFLINE") || msg.contains("failed") {
                Theme::warning()
            } else {
                Theme::success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::fallback_reading;

    fn render_to_string(screen: DashboardScreen<'_>) -> String {
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_region_and_status() {
        let reading = fallback_reading("Kerala");
        let alerts = ConditionsAdvisor::assess(&reading, None);
        let text = render_to_string(DashboardScreen::new("Kerala", Some(&reading), &alerts));

        assert!(text.contains("CropCare - Kerala (Thrissur)"));
        assert!(text.contains("Regional fallback"));
        assert!(text.contains("Rainy"));
        assert!(text.contains("[Weather]"));
    }

    #[test]
    fn renders_without_data() {
        let text = render_to_string(DashboardScreen::new("Punjab", None, &[]).loading(true));
        assert!(text.contains("Loading..."));
        assert!(text.contains("No active alerts"));
        assert!(text.contains("N/A"));
    }
}
