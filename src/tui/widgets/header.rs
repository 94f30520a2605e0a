use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate, hijri: Option<&str>, total_missed: u64) {
    let gregorian = today.format("%A, %b %d, %Y").to_string();

    let title_line = Line::from(vec![
        Span::styled("  قضاء  ", theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled("qada", theme::gold()),
        Span::styled("  ·  ", theme::dim()),
        if total_missed == 0 {
            Span::styled("nothing owed", theme::green())
        } else {
            Span::styled(format!("{} prayers owed", total_missed), theme::amber())
        },
    ]);

    let mut date_spans = Vec::new();
    if let Some(h) = hijri {
        date_spans.push(Span::styled(h.to_string(), theme::amber()));
        date_spans.push(Span::styled("  ·  ", theme::dim()));
    }
    date_spans.push(Span::styled(gregorian, theme::dim()));

    let text = vec![title_line, Line::from(""), Line::from(date_spans)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::gold().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
