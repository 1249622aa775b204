//! Key event handling

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::UiManager;
use crate::demo::InMemoryLibrary;
use crate::model::{
    by_album, by_artist, by_filter, by_folder, BackOutcome, Dialog, Playlist, PlaylistKey,
    Screen, HOME_PAGES,
};

const TIMER_STEP_MINUTES: u32 = 5;
const TIMER_MAX_MINUTES: u32 = 180;

/// What the event loop should do after a key press
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Map one key press onto a navigation command.
///
/// Esc and Backspace go through [`UiManager::back`]; when no layer consumes
/// the action the application quits. Enter confirms the open dialog.
/// `library` stands in for the playlist storage so dialogs can change
/// playlists from the keyboard.
pub fn handle_key_event(manager: &UiManager, library: &InMemoryLibrary, key: KeyEvent) -> InputResult {
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    // Sleep timer screen controls
    if manager.screens().with(|s| s.last() == Some(&Screen::SleepTimer))
        && manager.dialog().with(Option::is_none)
    {
        match key.code {
            KeyCode::Enter => {
                let minutes = manager.timer().get().minutes;
                manager.timer().start(minutes);
                manager.toast(&format!("Sleep timer set for {minutes} min"), true);
                return InputResult::Continue;
            }
            KeyCode::Char('c') => {
                if manager.timer().get().enabled {
                    manager.timer().cancel();
                    manager.toast("Sleep timer cancelled", true);
                }
                return InputResult::Continue;
            }
            KeyCode::Char('+') | KeyCode::Char('-') => {
                adjust_timer(manager, key.code == KeyCode::Char('+'));
                return InputResult::Continue;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            let outcome = manager.back();
            tracing::debug!(outcome = ?outcome, "Back pressed");
            if outcome == BackOutcome::Unhandled {
                return InputResult::Quit;
            }
        }
        KeyCode::Char('q') => return InputResult::Quit,
        KeyCode::Enter => match manager.dialog().get() {
            Some(dialog) => {
                confirm_dialog(manager, library, dialog);
                manager.close_dialog();
            }
            None => open_song_details(manager),
        },

        KeyCode::Char('s') => manager.open_top_level_screen(Screen::Settings),
        KeyCode::Char('u') => manager.open_top_level_screen(Screen::NowPlayingQueue),
        KeyCode::Char('e') => manager.open_top_level_screen(Screen::Equalizer),
        KeyCode::Char('t') => manager.open_top_level_screen(Screen::SleepTimer),
        KeyCode::Char('i') => manager.open_top_level_screen(Screen::About),
        KeyCode::Char('v') => open_song_details(manager),

        KeyCode::Char('n') => manager.open_dialog(Dialog::CreatePlaylist),
        KeyCode::Char('o') => manager.open_dialog(Dialog::SortOrder),
        KeyCode::Char('m') => {
            let songs = manager.active_multi_select().get().selected_in_order();
            if songs.is_empty() {
                manager.toast("Select songs first", true);
            } else {
                manager.open_dialog(Dialog::AddToPlaylist { songs });
            }
        }
        KeyCode::Char('R') => match first_playlist(library) {
            Some(key) => manager.open_dialog(Dialog::RenamePlaylist { key }),
            None => manager.toast("No playlists", true),
        },
        KeyCode::Char('D') => match first_playlist(library) {
            Some(key) => manager.open_dialog(Dialog::DeletePlaylist { key }),
            None => manager.toast("No playlists", true),
        },

        KeyCode::Char('p') => manager.expand_panel(),
        KeyCode::Tab => {
            let next = (manager.home().current_page() + 1) % HOME_PAGES.len();
            manager.home().scroll_to_page(next);
        }

        KeyCode::Char('a') => {
            let album = manager.library().with(|l| l.songs().first().map(|s| s.album.clone()));
            match album {
                Some(album) => {
                    manager.open_collection_view(by_album(&album));
                }
                None => manager.toast("Library is empty", true),
            }
        }
        KeyCode::Char('r') => {
            let artist = manager.library().with(|l| l.songs().last().map(|s| s.artist.clone()));
            if let Some(artist) = artist {
                manager.open_collection_view(by_artist(&artist));
            }
        }
        KeyCode::Char('g') => {
            let folder = manager.library().with(|l| l.songs().last().map(|s| s.folder.clone()));
            if let Some(folder) = folder {
                manager.open_collection_view(by_folder(&folder));
            }
        }
        KeyCode::Char('f') => {
            let query = manager.search_query().get();
            if query.is_empty() {
                manager.toast("Type a search first (/)", true);
            } else {
                let view = manager.open_collection_view(by_filter(&query));
                if view.is_closed() {
                    manager.toast(&format!("Nothing matches '{query}'"), true);
                }
            }
        }
        KeyCode::Char('/') => {
            let next = next_query(&manager.search_query().get());
            manager.set_search_query(next);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            match library.playlist_keys().get(index) {
                Some(key) => {
                    manager.open_playlist_collection_view(key.clone());
                }
                None => manager.toast(&format!("No playlist #{c}"), true),
            }
        }

        KeyCode::Char(' ') => {
            let state = manager.active_multi_select().get();
            let first = state.items().with(|items| items.first().copied());
            if let Some(song) = first {
                state.toggle(song);
            }
        }
        KeyCode::Char('x') => manager.active_multi_select().get().select_all(),
        _ => {}
    }

    InputResult::Continue
}

fn confirm_dialog(manager: &UiManager, library: &InMemoryLibrary, dialog: Dialog) {
    tracing::debug!(dialog = ?dialog, "Dialog confirmed");
    match dialog {
        Dialog::CreatePlaylist => {
            let (key, name) = new_playlist_key(library);
            library.add_playlist(
                key,
                Playlist {
                    name: name.clone(),
                    songs: Vec::new(),
                },
            );
            manager.toast(&format!("Created '{name}'"), true);
        }
        Dialog::RenamePlaylist { key } => {
            let renamed = format!("{} (edited)", playlist_name(manager, &key));
            library.rename_playlist(&key, &renamed);
            manager.toast(&format!("Renamed to '{renamed}'"), true);
        }
        Dialog::DeletePlaylist { key } => {
            let name = playlist_name(manager, &key);
            if library.remove_playlist(&key) {
                manager.toast(&format!("Deleted '{name}'"), false);
            }
        }
        Dialog::AddToPlaylist { songs } => {
            let Some(key) = first_playlist(library) else {
                manager.toast("No playlists", true);
                return;
            };
            let added = library.append_to_playlist(&key, &songs);
            manager.toast(
                &format!("Added {added} to '{}'", playlist_name(manager, &key)),
                true,
            );
            manager.active_multi_select().get().clear();
        }
        Dialog::SortOrder => manager.toast("Sort order unchanged", true),
    }
}

/// Details of the first selected song, or of the first listed one.
fn open_song_details(manager: &UiManager) {
    let state = manager.active_multi_select().get();
    let song = state
        .selected_in_order()
        .first()
        .copied()
        .or_else(|| state.items().with(|items| items.first().copied()));
    if let Some(song) = song {
        manager.open_top_level_screen(Screen::SongDetails { song });
    }
}

fn adjust_timer(manager: &UiManager, longer: bool) {
    let mut settings = manager.timer().get();
    settings.minutes = if longer {
        (settings.minutes + TIMER_STEP_MINUTES).min(TIMER_MAX_MINUTES)
    } else {
        settings.minutes.saturating_sub(TIMER_STEP_MINUTES).max(TIMER_STEP_MINUTES)
    };
    manager.timer().replace(settings);
}

fn first_playlist(library: &InMemoryLibrary) -> Option<PlaylistKey> {
    library.playlist_keys().first().cloned()
}

fn playlist_name(manager: &UiManager, key: &PlaylistKey) -> String {
    manager
        .playlists()
        .with(|map| map.get(key).map(|p| p.name.clone()))
        .unwrap_or_else(|| key.to_string())
}

fn new_playlist_key(library: &InMemoryLibrary) -> (PlaylistKey, String) {
    let keys = library.playlist_keys();
    let mut n = keys.len() + 1;
    loop {
        let key = PlaylistKey::new(format!("new-{n}"));
        if !keys.contains(&key) {
            return (key, format!("New playlist {n}"));
        }
        n += 1;
    }
}

/// Demo searches cycled through with `/`.
const QUERIES: [&str; 3] = ["blue", "massive", "roads"];

fn next_query(current: &str) -> String {
    let next = match QUERIES.iter().position(|q| *q == current) {
        Some(i) => (i + 1) % QUERIES.len(),
        None => 0,
    };
    QUERIES[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CollectionKind, LibrarySource};
    use crate::test_support::harness;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_escape_walks_layers_then_quits() {
        let h = harness();
        let library = h.library.clone();

        assert_eq!(handle_key_event(&h.manager, &library, press(KeyCode::Char('s'))), InputResult::Continue);
        assert_eq!(handle_key_event(&h.manager, &library, press(KeyCode::Char('n'))), InputResult::Continue);
        assert_eq!(h.manager.dialog().get(), Some(Dialog::CreatePlaylist));

        assert_eq!(handle_key_event(&h.manager, &library, press(KeyCode::Esc)), InputResult::Continue);
        assert_eq!(h.manager.dialog().get(), None);
        assert_eq!(h.manager.screens().get(), vec![Screen::Settings]);

        assert_eq!(handle_key_event(&h.manager, &library, press(KeyCode::Esc)), InputResult::Continue);
        assert!(h.manager.screens().get().is_empty());

        assert_eq!(handle_key_event(&h.manager, &library, press(KeyCode::Esc)), InputResult::Quit);
    }

    #[tokio::test]
    async fn test_confirmed_delete_purges_open_playlist_view() {
        let h = harness();
        let library = h.library.clone();

        handle_key_event(&h.manager, &library, press(KeyCode::Char('1')));
        assert_eq!(h.manager.collection_views().get().len(), 1);

        handle_key_event(&h.manager, &library, press(KeyCode::Char('D')));
        assert_eq!(
            h.manager.dialog().get(),
            Some(Dialog::DeletePlaylist { key: PlaylistKey::new("mix") })
        );
        assert_eq!(h.manager.collection_views().get().len(), 1);

        handle_key_event(&h.manager, &library, press(KeyCode::Enter));
        assert_eq!(h.manager.dialog().get(), None);
        assert!(h.manager.collection_views().get().is_empty());
        assert_eq!(h.notifier.toasts(), vec![("Deleted 'Evening mix'".to_string(), false)]);
    }

    #[test]
    fn test_create_and_rename_playlist_dialogs() {
        let h = harness();
        let library = h.library.clone();

        handle_key_event(&h.manager, &library, press(KeyCode::Char('n')));
        handle_key_event(&h.manager, &library, press(KeyCode::Enter));
        assert_eq!(library.playlist_keys(), vec![PlaylistKey::new("mix"), PlaylistKey::new("new-2")]);
        assert_eq!(h.manager.dialog().get(), None);

        handle_key_event(&h.manager, &library, press(KeyCode::Char('R')));
        handle_key_event(&h.manager, &library, press(KeyCode::Enter));
        let name = h.manager.playlists().with(|map| map[&PlaylistKey::new("mix")].name.clone());
        assert_eq!(name, "Evening mix (edited)");
    }

    #[tokio::test]
    async fn test_select_all_then_add_to_playlist() {
        let h = harness();
        let library = h.library.clone();

        handle_key_event(&h.manager, &library, press(KeyCode::Char('a')));
        handle_key_event(&h.manager, &library, press(KeyCode::Char('x')));
        assert_eq!(h.manager.active_selection_count().get(), 2);

        handle_key_event(&h.manager, &library, press(KeyCode::Char('m')));
        assert_eq!(h.manager.dialog().get(), Some(Dialog::AddToPlaylist { songs: vec![1, 2] }));

        handle_key_event(&h.manager, &library, press(KeyCode::Enter));
        let songs = library.playlists().with(|map| map[&PlaylistKey::new("mix")].songs.clone());
        assert_eq!(songs, vec![3, 1, 2]);
        assert_eq!(h.manager.active_selection_count().get(), 0);
    }

    #[test]
    fn test_sleep_timer_screen_starts_and_cancels() {
        let h = harness();
        let library = h.library.clone();

        handle_key_event(&h.manager, &library, press(KeyCode::Char('t')));
        handle_key_event(&h.manager, &library, press(KeyCode::Char('+')));
        handle_key_event(&h.manager, &library, press(KeyCode::Enter));

        let settings = h.manager.timer().get();
        assert!(settings.enabled);
        assert_eq!(settings.minutes, 35);
        assert!(settings.ends_at().is_some());
        assert_eq!(h.manager.persistent_snapshot().timer, settings);
        // Enter on the timer screen does not open anything else.
        assert_eq!(h.manager.screens().get(), vec![Screen::SleepTimer]);

        handle_key_event(&h.manager, &library, press(KeyCode::Char('c')));
        assert!(!h.manager.timer().get().enabled);
        assert!(h.manager.timer().get().ends_at().is_none());
    }

    #[tokio::test]
    async fn test_folder_view_and_song_details() {
        let h = harness();
        let library = h.library.clone();

        handle_key_event(&h.manager, &library, press(KeyCode::Char('g')));
        let view = h.manager.collection_views().get()[0].clone();
        assert_eq!(view.info().get().map(|info| info.kind), Some(CollectionKind::Folder));

        view.multi_select().toggle(2);
        handle_key_event(&h.manager, &library, press(KeyCode::Enter));
        assert_eq!(h.manager.screens().get(), vec![Screen::SongDetails { song: 2 }]);
    }

    #[test]
    fn test_search_cycles_queries() {
        let h = harness();
        let library = h.library.clone();
        handle_key_event(&h.manager, &library, press(KeyCode::Char('/')));
        assert_eq!(h.manager.search_query().get(), "blue");
        handle_key_event(&h.manager, &library, press(KeyCode::Char('/')));
        assert_eq!(h.manager.search_query().get(), "massive");
    }

    #[test]
    fn test_release_events_are_ignored() {
        let h = harness();
        let library = h.library.clone();
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(&h.manager, &library, key), InputResult::Continue);
    }
}
