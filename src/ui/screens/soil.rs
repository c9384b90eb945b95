use crate::data::samples::SOIL_SAMPLES;
use crate::logic::ConditionsAdvisor;
use crate::models::{Metric, Nutrient, SoilSample};
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget, Wrap},
};

pub struct SoilScreen<'a> {
    pub sample: &'a SoilSample,
    pub index: usize,
}

impl<'a> SoilScreen<'a> {
    pub fn new(sample: &'a SoilSample, index: usize) -> Self {
        Self { sample, index }
    }
}

impl Widget for SoilScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Sample header
                Constraint::Length(8), // Nutrient table
                Constraint::Min(4),    // Recommendation
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let header = Block::default()
            .title(Span::styled("Soil Analysis", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());
        let info = Line::from(vec![
            Span::styled(self.sample.location, Theme::highlight()),
            Span::styled(format!(" • {} soil", self.sample.soil_type), Theme::normal()),
            Span::styled(
                format!("  (sample {}/{})", self.index + 1, SOIL_SAMPLES.len()),
                Theme::dim(),
            ),
        ]);
        Paragraph::new(info).block(header).render(chunks[0], buf);

        self.render_levels(chunks[1], buf);

        let block = Block::default()
            .title("Recommendation")
            .borders(Borders::ALL)
            .border_style(Theme::border());
        Paragraph::new(Span::styled(self.sample.recommendation, Theme::normal()))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        let nav = nav_bar(&[("←→", "Sample "), ("c", "Use in Crop Form ")]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl SoilScreen<'_> {
    fn render_levels(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Nutrients")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let header = Row::new(vec![
            Cell::from("Metric"),
            Cell::from("Value"),
            Cell::from("Optimal"),
            Cell::from("Status"),
            Cell::from("Suggestion"),
        ])
        .style(Theme::header());

        let reading = &self.sample.reading;
        let rows: Vec<Row> = ConditionsAdvisor::soil_report(reading)
            .into_iter()
            .map(|status| {
                let (value, optimal) = match status.metric {
                    Metric::Nitrogen => nutrient_cells(reading.nitrogen, Nutrient::Nitrogen),
                    Metric::Phosphorus => nutrient_cells(reading.phosphorus, Nutrient::Phosphorus),
                    Metric::Potassium => nutrient_cells(reading.potassium, Nutrient::Potassium),
                    _ => (format!("{:.1}", reading.ph), "6.0-8.0".to_string()),
                };
                Row::new(vec![
                    Cell::from(status.metric.as_str()),
                    Cell::from(value),
                    Cell::from(optimal),
                    Cell::from(status.level.as_str())
                        .style(Style::default().fg(status.level.color())),
                    Cell::from(status.suggestion),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(15),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Min(20),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }
}

fn nutrient_cells(value: f64, nutrient: Nutrient) -> (String, String) {
    let (low, high) = nutrient.optimal_band();
    (format!("{:.0} mg/kg", value), format!("{:.0}-{:.0}", low, high))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_levels_for_sample() {
        let sample = &SOIL_SAMPLES[0];
        let area = Rect::new(0, 0, 110, 20);
        let mut buf = Buffer::empty(area);
        SoilScreen::new(sample, 0).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains(sample.location));
        assert!(text.contains("Nitrogen (N)"));
        assert!(text.contains("sample 1/"));
    }
}
