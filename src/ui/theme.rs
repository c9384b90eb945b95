use ratatui::style::{Color, Modifier, Style};

/// Field palette shared by every screen.
pub struct Theme;

const fn fg(color: Color) -> Style {
    Style::new().fg(color)
}

const fn bold(color: Color) -> Style {
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}

impl Theme {
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::LightGreen;
    pub const HIGHLIGHT: Color = Color::Cyan;

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Temperature bands in °C: <15, <25, <=35, above
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::LightRed;

    pub fn temp_color(temp_c: f64) -> Color {
        match temp_c {
            t if t < 15.0 => Self::TEMP_COLD,
            t if t < 25.0 => Self::TEMP_COOL,
            t if t <= 35.0 => Self::TEMP_WARM,
            _ => Self::TEMP_HOT,
        }
    }

    /// Dry spells show yellow, a soaking day blue.
    pub fn rain_color(rainfall_mm: f64) -> Color {
        match rainfall_mm {
            r if r < 0.5 => Color::Yellow,
            r if r <= 5.0 => Color::Green,
            _ => Color::LightBlue,
        }
    }

    pub fn title() -> Style {
        bold(Self::ACCENT)
    }

    pub fn header() -> Style {
        bold(Self::FG)
    }

    pub fn highlight() -> Style {
        bold(Self::HIGHLIGHT)
    }

    pub fn normal() -> Style {
        fg(Self::FG)
    }

    pub fn dim() -> Style {
        fg(Self::DIM)
    }

    pub fn selected() -> Style {
        bold(Self::FG).bg(Color::DarkGray)
    }

    pub fn success() -> Style {
        fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        fg(Self::WARNING)
    }

    pub fn error() -> Style {
        fg(Self::ERROR)
    }

    pub fn nav_key() -> Style {
        Self::title()
    }

    pub fn nav_label() -> Style {
        Self::dim()
    }

    pub fn border() -> Style {
        Self::dim()
    }

    pub fn border_focused() -> Style {
        fg(Self::ACCENT)
    }
}
