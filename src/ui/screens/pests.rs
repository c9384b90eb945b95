use crate::app::{DetectionState, SearchState};
use crate::logic::search::filter_pests;
use crate::logic::ConditionsAdvisor;
use crate::models::Pest;
use crate::ui::components::InputWidget;
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

pub struct PestsScreen<'a> {
    pub pests: &'a [Pest],
    pub state: &'a SearchState,
    pub detection: Option<&'a DetectionState>,
}

impl<'a> PestsScreen<'a> {
    pub fn new(pests: &'a [Pest], state: &'a SearchState) -> Self {
        Self {
            pests,
            state,
            detection: None,
        }
    }

    pub fn with_detection(mut self, detection: &'a DetectionState) -> Self {
        self.detection = Some(detection);
        self
    }
}

impl Widget for PestsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search box
                Constraint::Min(6),    // List + detail
                Constraint::Length(1), // Nav
            ])
            .split(area);

        InputWidget::new("Search pests or symptoms", &self.state.query)
            .placeholder("Press / to search")
            .focused(self.state.editing)
            .editing(self.state.editing)
            .render(chunks[0], buf);

        let matches = filter_pests(self.pests, &self.state.query);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(4)])
            .split(body[1]);

        self.render_list(&matches, body[0], buf);
        self.render_detection(right[0], buf);
        self.render_detail(matches.get(self.state.selected_index).copied(), right[1], buf);

        let nav = if self.state.editing {
            nav_bar(&[("Enter/Esc", "Done ")])
        } else {
            nav_bar(&[
                ("/", "Search "),
                ("↑↓", "Select "),
                ("d", "Detect "),
                ("x", "Clear "),
            ])
        };
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl PestsScreen<'_> {
    fn render_list(&self, matches: &[&Pest], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Pests & Diseases ({})", matches.len()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if matches.is_empty() {
            Paragraph::new(Span::styled("No matches", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = matches
            .iter()
            .enumerate()
            .map(|(i, pest)| {
                let severity = ConditionsAdvisor::classify_severity(pest.name);
                let style = if i == self.state.selected_index {
                    Theme::selected()
                } else {
                    Theme::normal()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<18}", pest.name), style),
                    Span::styled(severity.as_str(), Style::default().fg(severity.color())),
                ]))
            })
            .collect();

        List::new(items).block(block).render(area, buf);
    }

    fn render_detection(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Image Detection (simulated)")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines = match self.detection {
            Some(d) if d.analyzing => {
                vec![Line::from(Span::styled("Analyzing plant image...", Theme::warning()))]
            }
            Some(DetectionState {
                result: Some(pest), ..
            }) => {
                let severity = ConditionsAdvisor::classify_severity(pest.name);
                vec![
                    Line::from(vec![
                        Span::styled("Detected: ", Theme::dim()),
                        Span::styled(pest.name, Theme::highlight()),
                        Span::styled(
                            format!("  {}", severity),
                            Style::default().fg(severity.color()),
                        ),
                    ]),
                    Line::from(Span::styled(pest.remedy, Theme::normal())),
                ]
            }
            _ => vec![Line::from(Span::styled(
                "Press [d] to analyze a plant image",
                Theme::dim(),
            ))],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }

    fn render_detail(&self, pest: Option<&Pest>, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let Some(pest) = pest else {
            Paragraph::new(Span::styled("Select a pest to see details", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        };

        let severity = ConditionsAdvisor::classify_severity(pest.name);
        let lines = vec![
            Line::from(vec![
                Span::styled(pest.name, Theme::highlight()),
                Span::styled(
                    format!("  {}", severity),
                    Style::default().fg(severity.color()),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled("Symptoms", Theme::header())),
            Line::from(Span::styled(pest.symptoms, Theme::normal())),
            Line::default(),
            Line::from(Span::styled("Remedy", Theme::header())),
            Line::from(Span::styled(pest.remedy, Theme::normal())),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::samples::PEST_LIBRARY;

    fn render_to_string(screen: PestsScreen<'_>) -> String {
        let area = Rect::new(0, 0, 100, 20);
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
    fn lists_every_pest_without_query() {
        let state = SearchState::new();
        let text = render_to_string(PestsScreen::new(PEST_LIBRARY, &state));
        assert!(text.contains(&format!("Pests & Diseases ({})", PEST_LIBRARY.len())));
        assert!(text.contains("Aphids"));
        assert!(text.contains("Medium Risk"));
    }

    #[test]
    fn detection_panel_states() {
        let state = SearchState::new();
        let render =
            |d: &DetectionState| render_to_string(PestsScreen::new(PEST_LIBRARY, &state).with_detection(d));
        let mut detection = DetectionState::default();
        let text = render(&detection);
        assert!(text.contains("Press [d] to analyze"));

        detection.analyzing = true;
        let text = render(&detection);
        assert!(text.contains("Analyzing plant image..."));

        detection.analyzing = false;
        detection.result = PEST_LIBRARY.iter().find(|p| p.name == "Root Rot");
        let text = render(&detection);
        assert!(text.contains("Detected: Root Rot  High Risk"));
    }

    #[test]
    fn query_narrows_list() {
        let mut state = SearchState::new();
        state.query = "blight".to_string();
        let text = render_to_string(PestsScreen::new(PEST_LIBRARY, &state));
        assert!(text.contains("Leaf Blight"));
        assert!(text.contains("High Risk"));
        assert!(!text.contains("Aphids"));
    }
}
