//! View module - UI rendering
//!
//! Renders the navigation layers of a [`UiManager`] with ratatui. Rendering
//! works on a [`ViewSnapshot`] captured once per frame, so drawing never
//! holds any reactive lock.
//!
//! - `utils`: formatting helpers and popup geometry
//! - `layout`: top bar, layer sidebar, song list and panel bar
//! - `overlays`: dialog popup and toast

mod utils;
mod layout;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::controller::UiManager;
use crate::model::{Screen, SongId};

/// One row of the song list
#[derive(Clone, Debug, PartialEq)]
pub struct SongRow {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub duration_ms: u32,
    pub selected: bool,
}

/// Everything a frame needs, copied out of the reactive state
#[derive(Clone, Debug, Default)]
pub struct ViewSnapshot {
    pub search_query: String,
    pub back_enabled: bool,
    pub home_page: usize,
    pub screens: Vec<String>,
    /// Body text of the top screen, when it has any.
    pub screen_detail: Option<String>,
    pub dialog: Option<String>,
    pub collection_views: Vec<String>,
    /// Title of the list shown in the main area.
    pub list_title: String,
    pub songs: Vec<SongRow>,
    pub selected_count: usize,
    pub panel_target: f32,
    pub panel_position: f32,
    pub toast: Option<String>,
}

impl ViewSnapshot {
    /// Capture the manager's state. `panel_position` and `toast` come from
    /// the front end's own panel and notifier.
    pub fn capture(manager: &UiManager, panel_position: f32, toast: Option<String>) -> Self {
        let views = manager.collection_views().get();
        let multi_select = manager.active_multi_select().get();
        let selected = multi_select.selected().get();

        let list_title = match views.last() {
            Some(view) => view.title(),
            None => format!("Home: {}", manager.home().page_title()),
        };
        let ids = multi_select.items().get();
        let songs = manager.library().with(|library| {
            library
                .resolve(&ids)
                .into_iter()
                .map(|song| SongRow {
                    selected: selected.contains(&song.id),
                    id: song.id,
                    title: song.title,
                    artist: song.artist,
                    duration_ms: song.duration_ms,
                })
                .collect()
        });

        let screen_detail = manager.screens().with(|screens| {
            screens.last().and_then(|screen| describe_screen(manager, screen))
        });

        Self {
            search_query: manager.search_query().get(),
            back_enabled: manager.back_handler_enabled().get(),
            home_page: manager.home().current_page(),
            screens: manager.screens().get().iter().map(|s| s.title()).collect(),
            screen_detail,
            dialog: manager.dialog().get().map(|d| d.title()),
            collection_views: views.iter().map(|v| v.title()).collect(),
            list_title,
            songs,
            selected_count: manager.active_selection_count().get(),
            panel_target: manager.panel_openness().get(),
            panel_position,
            toast,
        }
    }
}

fn describe_screen(manager: &UiManager, screen: &Screen) -> Option<String> {
    match screen {
        Screen::SleepTimer => {
            let timer = manager.timer().get();
            Some(match timer.ends_at() {
                Some(ends_at) => format!("Stops at {} UTC (c cancels)", ends_at.format("%H:%M")),
                None => format!("Off, {} min (+/- adjust, Enter starts)", timer.minutes),
            })
        }
        Screen::SongDetails { song } => manager.library().with(|library| {
            library
                .song(*song)
                .map(|s| format!("{} - {} ({})", s.title, s.artist, s.album))
        }),
        _ => None,
    }
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, snapshot: &ViewSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search + back state
                Constraint::Min(0),    // Layers + list
                Constraint::Length(3), // Overlay panel
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], snapshot);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1]);

        layout::render_layers(frame, main_chunks[0], snapshot);
        layout::render_song_list(frame, main_chunks[1], snapshot);
        layout::render_panel_bar(frame, chunks[2], snapshot);

        // Top screen covers the list, the dialog sits above everything.
        if let Some(screen) = snapshot.screens.last() {
            overlays::render_screen(frame, main_chunks[1], screen, snapshot.screen_detail.as_deref());
        }
        if let Some(dialog) = &snapshot.dialog {
            overlays::render_dialog(frame, dialog);
        }
        if let Some(toast) = &snapshot.toast {
            overlays::render_toast(frame, toast);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{by_album, Dialog};
    use crate::test_support::harness;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(snapshot: &ViewSnapshot) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| AppView::render(f, snapshot)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_home_snapshot_lists_library() {
        let h = harness();
        let snapshot = ViewSnapshot::capture(&h.manager, 0.0, None);
        assert_eq!(snapshot.list_title, "Home: Songs");
        assert_eq!(snapshot.songs.len(), 3);
        assert!(!snapshot.back_enabled);

        let screen = draw(&snapshot);
        assert!(screen.contains("Moment's Notice"));
    }

    #[tokio::test]
    async fn test_snapshot_follows_top_view_selection() {
        let h = harness();
        let view = h.manager.open_collection_view(by_album("Blue Train"));
        view.multi_select().toggle(2);

        let snapshot = ViewSnapshot::capture(&h.manager, 0.0, Some("Saved".to_string()));
        assert_eq!(snapshot.list_title, "Album: Blue Train");
        assert_eq!(snapshot.selected_count, 1);
        assert_eq!(
            snapshot.songs.iter().filter(|row| row.selected).map(|row| row.id).collect::<Vec<_>>(),
            vec![2]
        );
        assert!(snapshot.back_enabled);
        assert!(draw(&snapshot).contains("Saved"));
    }

    #[test]
    fn test_dialog_and_screen_are_drawn() {
        let h = harness();
        h.manager.open_top_level_screen(Screen::SleepTimer);
        h.manager.open_dialog(Dialog::SortOrder);

        let screen = draw(&ViewSnapshot::capture(&h.manager, 0.0, None));
        assert!(screen.contains("Sleep timer"));
        assert!(screen.contains("Sort by"));
    }

    #[test]
    fn test_sleep_timer_screen_shows_state() {
        let h = harness();
        h.manager.open_top_level_screen(Screen::SleepTimer);
        let snapshot = ViewSnapshot::capture(&h.manager, 0.0, None);
        assert_eq!(
            snapshot.screen_detail.as_deref(),
            Some("Off, 30 min (+/- adjust, Enter starts)")
        );

        h.manager.timer().start(45);
        let snapshot = ViewSnapshot::capture(&h.manager, 0.0, None);
        let detail = snapshot.screen_detail.clone().unwrap();
        assert!(detail.starts_with("Stops at "), "{detail}");
        assert!(draw(&snapshot).contains("Stops at"));
    }

    #[test]
    fn test_song_details_screen() {
        let h = harness();
        h.manager.open_top_level_screen(Screen::SongDetails { song: 3 });
        let snapshot = ViewSnapshot::capture(&h.manager, 0.0, None);
        assert_eq!(
            snapshot.screen_detail.as_deref(),
            Some("So What - Miles Davis (Kind of Blue)")
        );
    }

    #[test]
    fn test_oversized_toast_is_clipped() {
        let h = harness();
        let toast = "x".repeat(usize::from(u16::MAX) + 10);
        let snapshot = ViewSnapshot::capture(&h.manager, 0.0, Some(toast));

        let screen = draw(&snapshot);
        assert!(screen.contains("xxxxxxxxxx"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let h = harness();
        h.manager.open_dialog(Dialog::CreatePlaylist);
        let snapshot = ViewSnapshot::capture(&h.manager, 0.5, Some("hello".to_string()));

        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal.draw(|f| AppView::render(f, &snapshot)).unwrap();
    }
}
