use ratatui::{
    layout::{Constraint, Rect},
    style::Modifier,
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::{DailyBreakdown, PrayerType};
use crate::tui::theme;

/// Per-day table, newest first so the most recent rows survive a short pane.
pub fn render(frame: &mut Frame, area: Rect, rows: &[DailyBreakdown]) {
    let block = Block::default()
        .title(Span::styled(" History ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut header_cells = vec![Cell::from(Span::styled("Date", theme::gold()))];
    for prayer in PrayerType::ALL {
        header_cells.push(Cell::from(Span::styled(
            prayer.display_name(),
            theme::prayer(prayer).add_modifier(Modifier::BOLD),
        )));
    }
    header_cells.push(Cell::from(Span::styled("Total", theme::gold())));

    let body: Vec<Row> = rows
        .iter()
        .rev()
        .map(|row| {
            let mut cells = vec![Cell::from(Span::styled(
                row.date.format("%Y-%m-%d").to_string(),
                theme::dim(),
            ))];
            for prayer in PrayerType::ALL {
                let count = row.count(prayer);
                let style = if count == 0 { theme::dim() } else { theme::base() };
                cells.push(Cell::from(Span::styled(count.to_string(), style)));
            }
            cells.push(Cell::from(Span::styled(row.total.to_string(), theme::green())));
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(6),
    ];

    let table = Table::new(body, widths)
        .header(Row::new(header_cells).bottom_margin(1))
        .block(block);

    frame.render_widget(table, area);
}
