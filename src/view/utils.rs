//! Utility functions for rendering UI components

use ratatui::layout::Rect;

pub fn format_duration(ms: u32) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Centered popup of at most `width` x `height`, shrunk to fit `area`.
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(643_000), "10:43");
        assert_eq!(format_duration(5_000), "0:05");
    }

    #[test]
    fn test_truncate_string_pads_and_cuts() {
        assert_eq!(truncate_string("abc", 5), "abc  ");
        assert_eq!(truncate_string("abcdefgh", 6), "abc...");
    }

    #[test]
    fn test_centered_popup_fits_small_areas() {
        let area = Rect { x: 0, y: 0, width: 10, height: 4 };
        let popup = centered_popup(area, 40, 5);
        assert_eq!(popup, area);

        let popup = centered_popup(Rect { x: 0, y: 0, width: 100, height: 30 }, 40, 6);
        assert_eq!((popup.x, popup.y, popup.width, popup.height), (30, 12, 40, 6));
    }
}
