use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Boxed reading with a fill bar scaled to `scale`. The value picks its own
/// color through `palette`.
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'static str,
    scale: (f64, f64),
    palette: fn(f64) -> Color,
    decimals: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'static str) -> Self {
        Self {
            title,
            value,
            unit,
            scale: (0.0, 100.0),
            palette: |_| Theme::FG,
            decimals: 0,
        }
    }

    pub fn scale(mut self, min: f64, max: f64) -> Self {
        self.scale = (min, max);
        self
    }

    pub fn palette(mut self, palette: fn(f64) -> Color) -> Self {
        self.palette = palette;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    fn fill_ratio(&self, value: f64) -> f64 {
        let (min, max) = self.scale;
        if max <= min {
            return 0.0;
        }
        ((value - min) / (max - min)).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            Paragraph::new(Span::styled("N/A", Theme::dim())).render(inner, buf);
            return;
        };

        let color = (self.palette)(value);
        let text = format!("{:.*}{}", self.decimals, value, self.unit);
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .render(inner, buf);

        if inner.height < 2 {
            return;
        }

        let y = inner.y + 1;
        let filled = (f64::from(inner.width) * self.fill_ratio(value)) as u16;
        for offset in 0..inner.width {
            let symbol = if offset < filled { '█' } else { '░' };
            buf[(inner.x + offset, y)].set_char(symbol).set_fg(color);
        }
    }
}

fn humidity_color(humidity_pct: f64) -> Color {
    if humidity_pct >= 90.0 {
        Theme::ERROR
    } else if humidity_pct > 80.0 {
        Theme::WARNING
    } else {
        Theme::SUCCESS
    }
}

fn wind_color(wind_kph: f64) -> Color {
    if wind_kph >= 50.0 {
        Theme::ERROR
    } else if wind_kph >= 30.0 {
        Theme::WARNING
    } else {
        Theme::SUCCESS
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C")
        .scale(0.0, 50.0)
        .palette(Theme::temp_color)
}

pub fn rainfall_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " mm")
        .scale(0.0, 20.0)
        .palette(Theme::rain_color)
        .decimals(1)
}

pub fn humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%").palette(humidity_color)
}

pub fn wind_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " km/h")
        .scale(0.0, 60.0)
        .palette(wind_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_colors_follow_weather_bands() {
        let gauge = temperature_gauge("Temp", Some(20.0));
        assert_eq!((gauge.palette)(-3.0), Theme::TEMP_COLD);
        assert_eq!((gauge.palette)(20.0), Theme::TEMP_COOL);
        assert_eq!((gauge.palette)(35.0), Theme::TEMP_WARM);
        assert_eq!((gauge.palette)(35.1), Theme::TEMP_HOT);
    }

    #[test]
    fn humidity_warns_above_eighty() {
        assert_eq!(humidity_color(80.0), Theme::SUCCESS);
        assert_eq!(humidity_color(85.0), Theme::WARNING);
        assert_eq!(humidity_color(95.0), Theme::ERROR);
    }

    #[test]
    fn fill_ratio_is_clamped() {
        let gauge = rainfall_gauge("Rain", None);
        assert_eq!(gauge.fill_ratio(-1.0), 0.0);
        assert_eq!(gauge.fill_ratio(10.0), 0.5);
        assert_eq!(gauge.fill_ratio(40.0), 1.0);
    }

    #[test]
    fn renders_value_and_bar() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        humidity_gauge("Humidity", Some(50.0)).render(area, &mut buf);

        let value_row: String = (1..19).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(value_row.starts_with("50%"));
        assert_eq!(buf[(1, 2)].symbol(), "█");
        assert_eq!(buf[(18, 2)].symbol(), "░");
    }

    #[test]
    fn missing_value_shows_na() {
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        rainfall_gauge("Rain", None).render(area, &mut buf);
        let row: String = (1..4).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert_eq!(row, "N/A");
    }
}
