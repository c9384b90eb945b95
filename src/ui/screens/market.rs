use crate::app::MarketState;
use crate::logic::calculations::price_stats;
use crate::logic::search::{filter_prices, markets, MarketFilter};
use crate::models::MarketPrice;
use crate::ui::components::{InputWidget, SelectWidget};
use crate::ui::screens::nav_bar;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

pub struct MarketScreen<'a> {
    pub prices: &'a [MarketPrice],
    pub state: &'a MarketState,
}

impl<'a> MarketScreen<'a> {
    pub fn new(prices: &'a [MarketPrice], state: &'a MarketState) -> Self {
        Self { prices, state }
    }
}

impl Widget for MarketScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search + market
                Constraint::Min(5),    // Price table
                Constraint::Length(3), // Stats
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        let search = &self.state.search;
        InputWidget::new("Search crops", &search.query)
            .placeholder("Press / to search")
            .focused(search.editing)
            .editing(search.editing)
            .render(top[0], buf);

        let mut options = vec!["All markets"];
        options.extend(markets(self.prices));
        let selected = match &self.state.filter {
            MarketFilter::All => 0,
            MarketFilter::Market(name) => options
                .iter()
                .position(|m| *m == name.as_str())
                .unwrap_or(0),
        };
        SelectWidget::new("Market", &options, selected)
            .focused(!search.editing)
            .render(top[1], buf);

        let rows = filter_prices(self.prices, &search.query, &self.state.filter);
        self.render_table(&rows, chunks[1], buf);
        render_stats(&rows, chunks[2], buf);

        let nav = if search.editing {
            nav_bar(&[("Enter/Esc", "Done ")])
        } else {
            nav_bar(&[("/", "Search "), ("m", "Market "), ("↑↓", "Select ")])
        };
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl MarketScreen<'_> {
    fn render_table(&self, rows: &[&MarketPrice], area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("Market Prices ({})", rows.len()))
            .borders(Borders::ALL)
            .border_style(Theme::border());

        if rows.is_empty() {
            Paragraph::new(Span::styled("No prices match", Theme::dim()))
                .block(block)
                .render(area, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Crop"),
            Cell::from("Market"),
            Cell::from("₹/quintal"),
            Cell::from("Change"),
            Cell::from("Date"),
        ])
        .style(Theme::header());

        let table_rows: Vec<Row> = rows
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let trend = p.trend();
                let style = if i == self.state.search.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(p.crop),
                    Cell::from(p.market),
                    Cell::from(format!("₹{}", p.price)),
                    Cell::from(format!("{} {}", trend.symbol(), p.change))
                        .style(Style::default().fg(trend.color())),
                    Cell::from(p.date),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Min(10),
        ];

        Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .render(area, buf);
    }
}

fn render_stats(rows: &[&MarketPrice], area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title("Summary")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let line = match price_stats(rows.iter().copied()) {
        Some(stats) => Line::from(vec![
            Span::styled("Highest ", Theme::dim()),
            Span::styled(format!("₹{}", stats.highest), Theme::success()),
            Span::styled("  Lowest ", Theme::dim()),
            Span::styled(format!("₹{}", stats.lowest), Theme::warning()),
            Span::styled("  Average ", Theme::dim()),
            Span::styled(format!("₹{}", stats.average), Theme::normal()),
        ]),
        None => Line::from(Span::styled("No data", Theme::dim())),
    };

    Paragraph::new(line).block(block).render(area, buf);
}
