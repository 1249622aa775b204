//! Overlay rendering (top-level screen, dialog popup, toast)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::utils::centered_popup;

/// A full screen drawn over the content area.
pub fn render_screen(frame: &mut Frame, area: Rect, title: &str, detail: Option<&str>) {
    frame.render_widget(Clear, area);
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = detail {
        lines.push(Line::from(format!("  {detail}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Esc closes this screen",
        Style::default().fg(Color::DarkGray),
    )));
    let body = Paragraph::new(lines)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {title} ")),
    );
    frame.render_widget(body, area);
}

pub fn render_dialog(frame: &mut Frame, title: &str) {
    let popup_area = centered_popup(frame.area(), 44, 5);

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let dialog = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" confirm   "),
        Span::styled("Esc", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" cancel"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(format!(" {title} "))
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, popup_area);
}

/// Notice pinned to the bottom right, above the panel bar.
pub fn render_toast(frame: &mut Frame, text: &str) {
    let area = frame.area();
    let text_width = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let width = text_width.saturating_add(4).min(area.width);
    let height = 3.min(area.height);
    let toast_area = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height.saturating_sub(height + 3),
        width,
        height,
    };

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(toast, toast_area);
}
