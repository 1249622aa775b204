//! Layout rendering (top bar, layer sidebar, song list, panel bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph},
    Frame,
};

use super::utils::{format_duration, truncate_string};
use super::ViewSnapshot;
use crate::model::HOME_PAGES;

pub fn render_top_bar(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search query
            Constraint::Length(22), // Back state
        ])
        .split(area);

    let search_text = if snapshot.search_query.is_empty() {
        "Press / to pick a search"
    } else {
        &snapshot.search_query
    };
    let search = Paragraph::new(search_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(search, chunks[0]);

    let (label, style) = if snapshot.back_enabled {
        ("Esc: back", Style::default().fg(Color::Green))
    } else {
        ("Esc: quit", Style::default().fg(Color::DarkGray))
    };
    let back = Paragraph::new(label)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Back "));
    frame.render_widget(back, chunks[1]);
}

/// Home pages, then the open layers from bottom to top.
pub fn render_layers(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HOME_PAGES.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let pages: Vec<ListItem> = HOME_PAGES
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if i == snapshot.home_page {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(" {page}")).style(style)
        })
        .collect();
    let pages = List::new(pages).block(Block::default().borders(Borders::ALL).title(" Home (Tab) "));
    frame.render_widget(pages, chunks[0]);

    let layer = |prefix: &str, title: &str, color: Color| {
        ListItem::new(format!(" {prefix} {title}")).style(Style::default().fg(color))
    };
    let mut layers: Vec<ListItem> = Vec::new();
    for view in &snapshot.collection_views {
        layers.push(layer("▤", view, Color::Cyan));
    }
    for screen in &snapshot.screens {
        layers.push(layer("▣", screen, Color::Yellow));
    }
    if let Some(dialog) = &snapshot.dialog {
        layers.push(layer("◆", dialog, Color::Magenta));
    }
    if layers.is_empty() {
        layers.push(ListItem::new(" (home)").style(Style::default().fg(Color::DarkGray)));
    }
    let layers = List::new(layers).block(Block::default().borders(Borders::ALL).title(" Layers "));
    frame.render_widget(layers, chunks[1]);
}

pub fn render_song_list(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot) {
    let content_width = area.width.saturating_sub(2) as usize;
    // " [x]  title   artist   m:ss"
    let fixed_width = 6 + 3 + 3 + 6;
    let remaining = content_width.saturating_sub(fixed_width);
    let title_width = remaining * 55 / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let items: Vec<ListItem> = snapshot
        .songs
        .iter()
        .map(|row| {
            let (mark, style) = if row.selected {
                ("[x]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                ("[ ]", Style::default().fg(Color::White))
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {mark}  "), style),
                Span::styled(truncate_string(&row.title, title_width), style),
                Span::raw("   "),
                Span::styled(
                    truncate_string(&row.artist, artist_width),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("{:>6}", format_duration(row.duration_ms)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let title = if snapshot.selected_count > 0 {
        format!(" {} ({} selected) ", snapshot.list_title, snapshot.selected_count)
    } else {
        format!(" {} ", snapshot.list_title)
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(list, area);
}

/// The simulated overlay panel: how far it is open and where it is heading.
pub fn render_panel_bar(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot) {
    let position = snapshot.panel_position.clamp(0.0, 1.0);
    let heading = if snapshot.panel_target >= 1.0 {
        "expanding"
    } else if snapshot.panel_target <= 0.0 {
        "collapsing"
    } else {
        "held"
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Now playing panel (p) "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent((position * 100.0).round() as u16)
        .label(format!("{:.0}% ({heading})", position * 100.0));
    frame.render_widget(gauge, area);
}
