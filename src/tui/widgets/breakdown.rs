use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{PrayerShare, ProgressSummary, TimeRange};
use crate::tui::theme;
use crate::utils::format::{format_percent, percent_bar};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    range: TimeRange,
    summary: &ProgressSummary,
    shares: &[PrayerShare],
    window_total: u64,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Progress · {} ", range.label()),
            theme::gold(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Made up:   ", theme::dim()),
            Span::styled(
                summary.total_completed.to_string(),
                theme::green().add_modifier(Modifier::BOLD),
            ),
            Span::styled("   In plans: ", theme::dim()),
            Span::styled(summary.remaining_in_plans.to_string(), theme::amber()),
        ]),
        Line::from(vec![
            Span::styled("  Most made up: ", theme::dim()),
            Span::styled(
                summary.most_made_up.display_name(),
                theme::prayer(summary.most_made_up),
            ),
        ]),
        Line::from(""),
    ];

    if window_total == 0 {
        lines.push(Line::from(Span::styled(
            "  Nothing recorded in this range",
            theme::dim(),
        )));
    } else {
        for share in shares {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:<9}", share.prayer_type.display_name()),
                    theme::bold(),
                ),
                Span::styled(percent_bar(share.percent, 14), theme::prayer(share.prayer_type)),
                Span::styled(
                    format!(" {:>4}  {}", share.count, format_percent(share.percent)),
                    theme::dim(),
                ),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
