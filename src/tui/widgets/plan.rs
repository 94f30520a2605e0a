use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::MakeupPlan;
use crate::tui::theme;
use crate::utils::format::{format_percent, progress_bar};

/// `position` is the 1-based index of the active plan among all plans.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    plan: Option<&MakeupPlan>,
    position: usize,
    plan_count: usize,
) {
    let block = Block::default()
        .title(Span::styled(" Active Plan ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let Some(plan) = plan else {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  You don't have an active makeup plan yet.",
                theme::dim(),
            )),
            Line::from(Span::styled(
                "  Create one with `qada plan create`.",
                theme::dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    };

    let bar = progress_bar(plan.completed_count as u64, plan.total_count as u64, 16);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {}", plan.name), theme::bold()),
            Span::styled(
                format!("   (plan {} of {})", position, plan_count),
                theme::dim(),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", theme::dim()),
            Span::styled(bar, theme::green()),
            Span::styled(
                format!(
                    "  {} of {} completed ({})",
                    plan.completed_count,
                    plan.total_count,
                    format_percent(plan.completion_ratio() * 100.0)
                ),
                theme::green().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if plan.is_satisfied() {
        lines.push(Line::from(Span::styled(
            "  ✓ Every prayer in this plan has been made up",
            theme::gold(),
        )));
    } else {
        let mut spans = vec![Span::styled("  ", theme::dim())];
        for target in &plan.target_prayers {
            spans.push(Span::styled("● ", theme::prayer(target.prayer_type)));
            spans.push(Span::styled(
                format!("{} {}   ", target.prayer_type, target.count),
                theme::amber(),
            ));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "  {}  ·  {}",
            plan.makeup_strategy.display_name(),
            plan.notification_strategy.display_name()
        ),
        theme::dim(),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
