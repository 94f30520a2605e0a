use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::models::PrayerType;
use crate::state::MissedLedger;
use crate::tui::theme;

/// All five prayers with their owed count; the selected one is the target
/// of the add / make-up / plan keys.
pub fn render(frame: &mut Frame, area: Rect, ledger: &MissedLedger, selected: PrayerType) {
    let block = Block::default()
        .title(Span::styled(" Missed Prayers ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    let mut items: Vec<ListItem> = PrayerType::ALL
        .iter()
        .map(|&prayer| {
            let count = ledger.count(prayer);
            let is_selected = prayer == selected;

            let marker = if is_selected { "▸ " } else { "  " };
            let name_style = if is_selected {
                theme::gold().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };
            let (count_str, count_style) = if count == 0 {
                ("✓".to_string(), theme::green())
            } else {
                (count.to_string(), theme::amber())
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, theme::gold()),
                Span::styled("● ", theme::prayer(prayer)),
                Span::styled(format!("{:<9}", prayer.display_name()), name_style),
                Span::styled(format!("{:>7}", count_str), count_style),
            ]))
        })
        .collect();

    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(vec![
        Span::styled(format!("    {:<9}", "Total"), theme::dim()),
        Span::styled(format!("{:>7}", ledger.total()), theme::bold()),
    ])));

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
