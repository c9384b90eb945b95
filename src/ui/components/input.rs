use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Single-line text box. Input is append-only, so the caret always sits
/// after the value.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    editing: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            editing: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Shows the caret. Only meaningful on the focused box.
    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = if self.value.is_empty() && !(self.focused && self.editing) {
            vec![Span::styled(self.placeholder, Theme::dim())]
        } else {
            vec![Span::styled(self.value, Theme::normal())]
        };
        if self.focused && self.editing {
            spans.push(Span::styled(" ", Theme::selected()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}

/// Cycling choice box: shows the selected option, with arrows when focused.
pub struct SelectWidget<'a> {
    label: &'a str,
    options: &'a [&'a str],
    selected: usize,
    focused: bool,
}

impl<'a> SelectWidget<'a> {
    pub fn new(label: &'a str, options: &'a [&'a str], selected: usize) -> Self {
        Self {
            label,
            options,
            selected,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for SelectWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(if self.focused {
                Theme::border_focused()
            } else {
                Theme::border()
            });

        let inner = block.inner(area);
        block.render(area, buf);

        let value = self.options.get(self.selected).copied().unwrap_or("");
        let position = format!(" {}/{}", self.selected + 1, self.options.len());

        let line = if self.focused {
            Line::from(vec![
                Span::styled(format!("< {} >", value), Theme::highlight()),
                Span::styled(position, Theme::dim()),
            ])
        } else {
            Line::from(vec![
                Span::styled(value, Theme::normal()),
                Span::styled(position, Theme::dim()),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn empty_input_shows_placeholder() {
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("pH", "").placeholder("3.5-10").render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("3.5-10"));
    }

    #[test]
    fn editing_hides_placeholder() {
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("pH", "")
            .placeholder("3.5-10")
            .focused(true)
            .editing(true)
            .render(area, &mut buf);
        assert!(!row_text(&buf, 1).contains("3.5-10"));
    }

    #[test]
    fn select_shows_position() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let options = ["All markets", "Ludhiana", "Nashik"];
        SelectWidget::new("Market", &options, 1).render(area, &mut buf);
        let text = row_text(&buf, 1);
        assert!(text.contains("Ludhiana"));
        assert!(text.contains("2/3"));
    }
}
