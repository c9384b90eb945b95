use crate::logic::ConditionsAdvisor;
use crate::models::{EnvironmentReading, WeatherForecast};
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct WeatherScreen<'a> {
    pub region: &'a str,
    pub conditions: Option<&'a EnvironmentReading>,
    pub forecast: Option<&'a WeatherForecast>,
    pub all_regions: &'a [EnvironmentReading],
}

impl<'a> WeatherScreen<'a> {
    pub fn new(
        region: &'a str,
        conditions: Option<&'a EnvironmentReading>,
        forecast: Option<&'a WeatherForecast>,
    ) -> Self {
        Self {
            region,
            conditions,
            forecast,
            all_regions: &[],
        }
    }

    pub fn with_all_regions(mut self, readings: &'a [EnvironmentReading]) -> Self {
        self.all_regions = readings;
        self
    }
}

impl Widget for WeatherScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // Title
                Constraint::Length(10), // Current + forecast
                Constraint::Min(5),     // All regions
                Constraint::Length(1),  // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Weather", Theme::title()),
            Span::styled(format!(" - {}", self.region), Theme::normal()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        self.render_current(top[0], buf);
        self.render_forecast(top[1], buf);
        self.render_all_regions(chunks[2], buf);

        let nav = nav_bar(&[("←→", "Region "), ("r", "Refresh "), ("a", "All Regions ")]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl WeatherScreen<'_> {
    fn render_current(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Current Conditions")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(c) = self.conditions else {
            Paragraph::new(Span::styled("No data available", Theme::dim())).render(inner, buf);
            return;
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{:.0}°C ", c.temperature_c),
                    Style::default().fg(Theme::temp_color(c.temperature_c)),
                ),
                Span::styled(&c.description, Theme::normal()),
            ]),
            Line::from(vec![
                Span::styled("Wind: ", Theme::dim()),
                Span::styled(format!("{:.0} km/h", c.wind_kph), Theme::normal()),
                Span::styled("  Source: ", Theme::dim()),
                Span::styled(c.origin.as_str(), Theme::normal()),
            ]),
        ];

        for status in ConditionsAdvisor::weather_report(c) {
            let value = match status.metric {
                crate::models::Metric::Temperature => format!("{:.0}°C", c.temperature_c),
                crate::models::Metric::Rainfall => format!("{:.1} mm", c.rainfall_mm),
                _ => format!("{:.0}%", c.humidity_pct),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12}", status.metric.as_str()), Theme::dim()),
                Span::styled(format!("{:<9}", value), Theme::normal()),
                Span::styled(
                    status.level.as_str(),
                    Style::default().fg(status.level.color()),
                ),
            ]));
        }

        lines.push(Line::from(Span::styled(c.advisory.text(), Theme::normal())));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_forecast(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("7-Day Forecast")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(forecast) = self.forecast.filter(|f| !f.days.is_empty()) else {
            Paragraph::new(Span::styled("No forecast available", Theme::dim())).render(inner, buf);
            return;
        };

        let header = Row::new(vec![
            Cell::from("Day"),
            Cell::from("Temp"),
            Cell::from("Rain"),
            Cell::from("Conditions"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = forecast
            .days
            .iter()
            .map(|day| {
                Row::new(vec![
                    Cell::from(day.date.format("%a %d").to_string()),
                    Cell::from(format!("{:.0}°C", day.temperature_c))
                        .style(Style::default().fg(Theme::temp_color(day.temperature_c))),
                    Cell::from(format!("{:.1} mm", day.rainfall_mm))
                        .style(Style::default().fg(Theme::rain_color(day.rainfall_mm))),
                    Cell::from(day.description.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Min(10),
        ];

        Table::new(rows, widths).header(header).render(inner, buf);
    }

    fn render_all_regions(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("All Regions")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.all_regions.is_empty() {
            let para = Paragraph::new(Span::styled("Press [a] to load every region", Theme::dim()));
            para.render(inner, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Region"),
            Cell::from("Temp"),
            Cell::from("Rain"),
            Cell::from("Humidity"),
            Cell::from("Status"),
            Cell::from("Source"),
        ])
        .style(Theme::header());

        let rows: Vec<Row> = self
            .all_regions
            .iter()
            .map(|r| {
                let status =
                    ConditionsAdvisor::classify_weather(r.temperature_c, r.rainfall_mm, r.humidity_pct);
                let style = if r.region == self.region {
                    Theme::selected()
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(r.region.clone()),
                    Cell::from(format!("{:.0}°C", r.temperature_c)),
                    Cell::from(format!("{:.1} mm", r.rainfall_mm)),
                    Cell::from(format!("{:.0}%", r.humidity_pct)),
                    Cell::from(status.as_str()).style(Style::default().fg(status.color())),
                    Cell::from(r.origin.as_str()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(18),
        ];

        Table::new(rows, widths).header(header).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fallback::{fallback_forecast, fallback_reading};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn renders_current_and_forecast() {
        let reading = fallback_reading("Kerala");
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let forecast = fallback_forecast("Kerala", start, &mut StdRng::seed_from_u64(1));

        let area = Rect::new(0, 0, 110, 24);
        let mut buf = Buffer::empty(area);
        WeatherScreen::new("Kerala", Some(&reading), Some(&forecast)).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("partly cloudy"));
        assert!(text.contains("Mon 03"));
        assert!(text.contains("Press [a]"));
    }
}
