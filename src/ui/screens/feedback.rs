use crate::app::FeedbackState;
use crate::logic::calculations::average_rating;
use crate::models::{stars, FeedbackCategory, FeedbackField, MAX_RATING};
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct FeedbackScreen<'a> {
    pub state: &'a FeedbackState,
}

impl<'a> FeedbackScreen<'a> {
    pub fn new(state: &'a FeedbackState) -> Self {
        Self { state }
    }
}

impl Widget for FeedbackScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Form + community
                Constraint::Length(1), // Nav
            ])
            .split(area);

        Paragraph::new(Span::styled("Farmer Feedback", Theme::title())).render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(30)])
            .split(chunks[1]);

        self.render_form(body[0], buf);
        self.render_community(body[1], buf);

        let nav = if self.state.editing {
            nav_bar(&[("Enter/Esc", "Done ")])
        } else {
            nav_bar(&[
                ("Tab/↑↓", "Field "),
                ("e", "Edit "),
                ("←→", "Pick "),
                ("s", "Submit "),
            ])
        };
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl FeedbackScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        let form = &self.state.form;
        for (field, row) in FeedbackField::ALL.iter().zip(rows.iter()) {
            let focused = self.state.focused == *field;
            match field {
                FeedbackField::Category => {
                    let mut options = vec!["Not set"];
                    options.extend(FeedbackCategory::ALL.iter().map(|c| c.as_str()));
                    let selected = form
                        .category
                        .and_then(|c| FeedbackCategory::ALL.iter().position(|x| *x == c))
                        .map_or(0, |i| i + 1);
                    SelectWidget::new(field.label(), &options, selected)
                        .focused(focused)
                        .render(*row, buf);
                }
                FeedbackField::Rating => {
                    let style = if focused {
                        Theme::border_focused()
                    } else {
                        Theme::border()
                    };
                    let block = Block::default()
                        .title(field.label())
                        .borders(Borders::ALL)
                        .border_style(style);
                    let mut spans = vec![Span::styled(stars(form.rating), Theme::warning())];
                    if form.rating > 0 {
                        spans.push(Span::styled(
                            format!(" {} out of {} stars", form.rating, MAX_RATING),
                            Theme::dim(),
                        ));
                    }
                    Paragraph::new(Line::from(spans))
                        .block(block)
                        .render(*row, buf);
                }
                _ => {
                    InputWidget::new(field.label(), form.text(*field).unwrap_or(""))
                        .focused(focused)
                        .editing(self.state.editing)
                        .render(*row, buf);
                }
            }
        }

        if let Some(ref error) = self.state.error {
            Paragraph::new(Span::styled(error.as_str(), Theme::error()))
                .wrap(Wrap { trim: true })
                .render(rows[5], buf);
        }
    }

    fn render_community(&self, area: Rect, buf: &mut Buffer) {
        let entries = &self.state.entries;
        let block = Block::default()
            .title("Community Feedback")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let mut lines = Vec::new();
        if let Some(avg) = average_rating(entries.iter().map(|e| e.rating)) {
            lines.push(Line::from(vec![
                Span::styled("Average rating ", Theme::dim()),
                Span::styled(format!("{:.1} ", avg), Theme::highlight()),
                Span::styled(stars(avg.round() as u8), Theme::warning()),
                Span::styled(format!("  Total feedback {}", entries.len()), Theme::dim()),
            ]));
            lines.push(Line::default());
        }

        for entry in entries {
            let mut header = vec![
                Span::styled(entry.farmer_name.as_str(), Theme::header()),
                Span::styled(format!("  {}  ", entry.location), Theme::dim()),
                Span::styled(stars(entry.rating), Theme::warning()),
            ];
            if let Some(category) = entry.category {
                header.push(Span::styled(format!("  [{}]", category), Theme::dim()));
            }
            lines.push(Line::from(header));
            lines.push(Line::from(Span::styled(entry.message.as_str(), Theme::normal())));
            lines.push(Line::from(Span::styled(entry.date.as_str(), Theme::dim())));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(screen: FeedbackScreen<'_>) -> String {
        let area = Rect::new(0, 0, 120, 30);
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
    fn shows_form_and_community() {
        let state = FeedbackState::new();
        let text = render_to_string(FeedbackScreen::new(&state));
        assert!(text.contains("Your Name"));
        assert!(text.contains("Not set"));
        assert!(text.contains("Average rating 4.7"));
        assert!(text.contains("Total feedback 3"));
        assert!(text.contains("Ramesh Kumar"));
    }

    #[test]
    fn shows_rating_and_validation_error() {
        let mut state = FeedbackState::new();
        state.form.set_rating(3);
        state.error = Some("Please fill in all fields and provide a rating.".to_string());
        let text = render_to_string(FeedbackScreen::new(&state));
        assert!(text.contains("★★★☆☆ 3 out of 5 stars"));
        assert!(text.contains("Please fill in all fields"));
    }
}
