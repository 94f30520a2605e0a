use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u64, total: u64, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Bar for a percentage in 0..=100.
pub fn percent_bar(percent: f64, width: usize) -> String {
    progress_bar(percent.clamp(0.0, 100.0).round() as u64, 100, width)
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// First eight hex digits, enough to pick a plan on the command line.
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Pad `s` to `width` terminal columns. Plan names may contain wide
/// characters, so `{:<width$}` would misalign them.
pub fn pad_display(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Rough days to clear `remaining` prayers at `per_day`.
pub fn days_to_clear(remaining: u64, per_day: u64) -> u64 {
    if per_day == 0 {
        return 0;
    }
    remaining.div_ceil(per_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_fill_proportionally() {
        assert_eq!(progress_bar(2, 4, 4), "██░░");
        assert_eq!(progress_bar(9, 4, 4), "████");
        assert_eq!(progress_bar(1, 0, 3), "░░░");
        assert_eq!(percent_bar(50.0, 10), "█████░░░░░");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_display("ab", 4), "ab  ");
        assert_eq!(pad_display("قضاء", 6).chars().count(), 6);
        assert_eq!(pad_display("toolong", 3), "toolong");
    }

    #[test]
    fn short_ids_prefix_the_full_id() {
        let id = Uuid::new_v4();
        assert!(id.to_string().starts_with(&short_id(id)));
        assert_eq!(short_id(id).len(), 8);
    }

    #[test]
    fn days_round_up() {
        assert_eq!(days_to_clear(10, 3), 4);
        assert_eq!(days_to_clear(9, 3), 3);
        assert_eq!(days_to_clear(5, 0), 0);
    }
}
