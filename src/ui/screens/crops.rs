use crate::app::CropFormState;
use crate::logic::ConditionsAdvisor;
use crate::models::{rank_by_confidence, CropRecommendation, FormField, RegionalRecommendation};
use crate::ui::components::InputWidget;
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct CropsScreen<'a> {
    pub state: &'a CropFormState,
    pub region: &'a str,
    pub regional: Option<&'a RegionalRecommendation>,
    pub regional_error: Option<&'a str>,
}

impl<'a> CropsScreen<'a> {
    pub fn new(state: &'a CropFormState, region: &'a str) -> Self {
        Self {
            state,
            region,
            regional: None,
            regional_error: None,
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
}

impl Widget for CropsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Form + results
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let mut title = vec![Span::styled("Crop Recommendation", Theme::title())];
        if self.state.submitting {
            title.push(Span::styled("  Analyzing...", Theme::warning()));
        }
        Paragraph::new(Line::from(title)).render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(30)])
            .split(chunks[1]);

        self.render_form(body[0], buf);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(7)])
            .split(body[1]);

        self.render_results(right[0], buf);
        self.render_regional(right[1], buf);

        let nav = if self.state.editing {
            nav_bar(&[
                ("Tab/↑↓", "Field "),
                ("Enter", "Submit "),
                ("Esc", "Stop Editing "),
            ])
        } else {
            nav_bar(&[("e", "Edit "), ("f", "Fill "), ("Enter", "Submit ")])
        };
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl CropsScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let mut constraints = vec![Constraint::Length(3); FormField::ALL.len()];
        constraints.push(Constraint::Min(1));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
            InputWidget::new(field.label(), self.state.form.get(*field))
                .placeholder(field.hint())
                .focused(self.state.focused == *field)
                .editing(self.state.editing)
                .render(*row, buf);
        }

        if let Some(ref error) = self.state.error {
            let last = rows[rows.len() - 1];
            Paragraph::new(Span::styled(error.as_str(), Theme::error()))
                .wrap(Wrap { trim: true })
                .render(last, buf);
        }
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Suggested Crops")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(ref result) = self.state.result else {
            let hint = "Fill in the soil and weather values, then press Enter.";
            Paragraph::new(Span::styled(hint, Theme::dim()))
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        };

        let band = ConditionsAdvisor::confidence_band(result.confidence);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Best match: ", Theme::dim()),
                Span::styled(&result.primary_recommendation, Theme::highlight()),
                Span::styled(
                    format!(" {:.1}%", result.confidence * 100.0),
                    Style::default().fg(band.color()),
                ),
            ]),
            Line::default(),
        ];

        for (rank, rec) in result.ranked().into_iter().enumerate() {
            lines.extend(recommendation_lines(rank + 1, rec));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_regional(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Regional Pick - {}", self.region))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = match (self.regional, self.regional_error) {
            (Some(r), _) => {
                let mut lines = vec![Line::from(vec![
                    Span::styled(&r.primary_recommendation, Theme::highlight()),
                    Span::styled(
                        format!(" {:.0}%", r.confidence * 100.0),
                        Style::default().fg(ConditionsAdvisor::confidence_band(r.confidence).color()),
                    ),
                    Span::styled(format!(" near {}", r.city), Theme::dim()),
                ])];
                let w = &r.conditions.weather;
                let s = &r.conditions.soil;
                lines.push(Line::from(Span::styled(
                    format!(
                        "{:.0}°C, {:.0}% humidity, {:.0} mm rain",
                        w.temperature, w.humidity, w.rainfall
                    ),
                    Theme::dim(),
                )));
                lines.push(Line::from(Span::styled(
                    format!(
                        "N {:.0}  P {:.0}  K {:.0}  pH {:.1}",
                        s.nitrogen, s.phosphorus, s.potassium, s.ph
                    ),
                    Theme::dim(),
                )));
                let others: Vec<&str> = rank_by_confidence(&r.all_recommendations)
                    .into_iter()
                    .skip(1)
                    .take(3)
                    .map(|c| c.crop.as_str())
                    .collect();
                if !others.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("Also consider: {}", others.join(", ")),
                        Theme::normal(),
                    )));
                }
                lines
            }
            (None, Some(e)) => vec![Line::from(Span::styled(e, Theme::warning()))],
            (None, None) => vec![Line::from(Span::styled("Loading...", Theme::dim()))],
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

fn recommendation_lines(rank: usize, rec: &CropRecommendation) -> Vec<Line<'_>> {
    let color = rec.confidence_band().color();
    vec![
        Line::from(vec![
            Span::styled(format!("{}. ", rank), Theme::dim()),
            Span::styled(&rec.crop, Theme::normal()),
            Span::styled(
                format!(" {:.1}%", rec.confidence_percent()),
                Style::default().fg(color),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "   {} • {} • water {} • {}",
                rec.season, rec.duration, rec.water_requirement, rec.soil_type
            ),
            Theme::dim(),
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PredictionResult;

    fn render_to_string(screen: CropsScreen<'_>) -> String {
        let area = Rect::new(0, 0, 100, 30);
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
    fn empty_form_shows_hints() {
        let state = CropFormState::new();
        let text = render_to_string(CropsScreen::new(&state, "Punjab"));
        assert!(text.contains("0-140"));
        assert!(text.contains("3.5-10"));
        assert!(text.contains("Regional Pick - Punjab"));
    }

    #[test]
    fn shows_ranked_results_and_errors() {
        let mut state = CropFormState::new();
        state.error = Some("Please fill in N".to_string());
        state.result = Some(PredictionResult {
            success: true,
            primary_recommendation: "rice".to_string(),
            confidence: 0.91,
            all_recommendations: vec![CropRecommendation {
                crop: "rice".to_string(),
                confidence: 0.91,
                season: "Kharif".to_string(),
                duration: "120-150 days".to_string(),
                water_requirement: "High".to_string(),
                soil_type: "Clay".to_string(),
            }],
            input_conditions: None,
        });

        let text = render_to_string(
            CropsScreen::new(&state, "Kerala").with_regional(None, Some("Crop service offline")),
        );
        assert!(text.contains("Best match: rice 91.0%"));
        assert!(text.contains("1. rice"));
        assert!(text.contains("Please fill in N"));
        assert!(text.contains("Crop service offline"));
    }
}
