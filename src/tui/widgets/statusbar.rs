use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

const HINTS: [(&str, &str); 8] = [
    ("[a]", " add missed  "),
    ("[c]", " make up  "),
    ("[p]", " plan +1  "),
    ("[n]", " next plan  "),
    ("[r]", " range  "),
    ("[h]", " history  "),
    ("[?]", " help  "),
    ("[q]", " quit"),
];

/// Key hints, or the last command's message when there is one.
pub fn render(frame: &mut Frame, area: Rect, message: Option<&(String, bool)>) {
    let line = match message {
        Some((text, true)) => Line::from(Span::styled(format!("✗ {}", text), theme::red())),
        Some((text, false)) => Line::from(Span::styled(format!("✓ {}", text), theme::green())),
        None => {
            let mut spans = Vec::new();
            for (key, label) in HINTS {
                spans.push(Span::styled(key, theme::gold()));
                spans.push(Span::styled(label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
