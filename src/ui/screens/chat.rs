use crate::app::ChatState;
use crate::logic::chatbot::QUICK_QUESTIONS;
use crate::models::Sender;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct ChatScreen<'a> {
    pub state: &'a ChatState,
}

impl<'a> ChatScreen<'a> {
    pub fn new(state: &'a ChatState) -> Self {
        Self { state }
    }
}

impl Widget for ChatScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(6),    // Transcript + suggestions
                Constraint::Length(3), // Input
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Farming Assistant", Theme::title()),
            Span::styled(
                format!("  Language: {}", self.state.bot.language),
                Theme::highlight(),
            ),
            Span::styled("  Voice input is not available in the terminal", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(42)])
            .split(chunks[1]);

        self.render_transcript(body[0], buf);
        self.render_suggestions(body[1], buf);

        let input_block = Block::default()
            .title("Message")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());
        let input = Line::from(vec![
            Span::styled(self.state.input.as_str(), Theme::normal()),
            Span::styled(" ", Theme::selected()),
        ]);
        Paragraph::new(input).block(input_block).render(chunks[2], buf);

        // Typing is always active here, so there is no [q] hint
        let nav = Line::from(vec![
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Send ", Theme::nav_label()),
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Suggestions ", Theme::nav_label()),
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Language ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back ", Theme::nav_label()),
            Span::styled("[Ctrl+C]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl ChatScreen<'_> {
    fn render_transcript(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Conversation")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        for message in self.state.bot.messages() {
            let (who, style) = match message.sender {
                Sender::User => ("You", Theme::highlight()),
                Sender::Bot => ("CropCare", Theme::success()),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", who), style),
                Span::styled(message.timestamp.format("%H:%M").to_string(), Theme::dim()),
            ]));
            lines.push(Line::from(Span::styled(message.text.as_str(), Theme::normal())));
            lines.push(Line::default());
        }

        // Keep the latest messages in view
        let scroll = wrapped_height(&lines, inner.width).saturating_sub(inner.height);
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0))
            .render(inner, buf);
    }

    fn render_suggestions(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Quick Questions")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let lines: Vec<Line> = QUICK_QUESTIONS
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let style = if self.state.quick_index == Some(i) {
                    Theme::selected()
                } else {
                    Theme::dim()
                };
                Line::from(Span::styled(*question, style))
            })
            .collect();

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Rows the lines take once wrapped to `width`, ignoring word boundaries.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(width).max(1)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
