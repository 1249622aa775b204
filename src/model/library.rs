//! Library snapshots and the selectors that drill into them

use std::collections::{BTreeMap, HashMap};

use super::types::{CollectionKind, PlaylistKey, SongId};

/// A song in the library index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub folder: String,
    pub duration_ms: u32,
}

/// Immutable snapshot of the music library
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryIndex {
    songs: Vec<Song>,
    positions: HashMap<SongId, usize>,
}

impl LibraryIndex {
    pub fn new(songs: Vec<Song>) -> Self {
        let positions = songs
            .iter()
            .enumerate()
            .map(|(i, song)| (song.id, i))
            .collect();
        Self { songs, positions }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song(&self, id: SongId) -> Option<&Song> {
        self.positions.get(&id).map(|&i| &self.songs[i])
    }

    /// Look up `ids` in order, skipping songs that are no longer indexed.
    pub fn resolve(&self, ids: &[SongId]) -> Vec<Song> {
        ids.iter().filter_map(|id| self.song(*id)).cloned().collect()
    }

    fn collect(
        &self,
        kind: CollectionKind,
        title: &str,
        keep: impl Fn(&Song) -> bool,
    ) -> Option<CollectionInfo> {
        let songs: Vec<Song> = self.songs.iter().filter(|s| keep(s)).cloned().collect();
        if songs.is_empty() {
            return None;
        }
        Some(CollectionInfo {
            title: title.to_string(),
            kind,
            songs,
        })
    }
}

/// A user playlist; songs are referenced by id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub name: String,
    pub songs: Vec<SongId>,
}

pub type PlaylistMap = BTreeMap<PlaylistKey, Playlist>;

/// Descriptor of what a collection view shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionInfo {
    pub title: String,
    pub kind: CollectionKind,
    pub songs: Vec<Song>,
}

impl CollectionInfo {
    pub fn song_ids(&self) -> Vec<SongId> {
        self.songs.iter().map(|s| s.id).collect()
    }

    /// Resolve a playlist against the library. An emptied playlist still
    /// has a descriptor; only a missing key yields none.
    pub fn for_playlist(
        library: &LibraryIndex,
        playlists: &PlaylistMap,
        key: &PlaylistKey,
    ) -> Option<Self> {
        playlists.get(key).map(|playlist| Self {
            title: playlist.name.clone(),
            kind: CollectionKind::Playlist,
            songs: library.resolve(&playlist.songs),
        })
    }
}

/// Songs of one album. `None` once no song carries the album.
pub fn by_album(
    album: &str,
) -> impl Fn(&LibraryIndex) -> Option<CollectionInfo> + Send + Sync + 'static + use<> {
    let album = album.to_string();
    move |library| library.collect(CollectionKind::Album, &album, |s| s.album == album)
}

pub fn by_artist(
    artist: &str,
) -> impl Fn(&LibraryIndex) -> Option<CollectionInfo> + Send + Sync + 'static + use<> {
    let artist = artist.to_string();
    move |library| library.collect(CollectionKind::Artist, &artist, |s| s.artist == artist)
}

pub fn by_folder(
    folder: &str,
) -> impl Fn(&LibraryIndex) -> Option<CollectionInfo> + Send + Sync + 'static + use<> {
    let folder = folder.to_string();
    move |library| library.collect(CollectionKind::Folder, &folder, |s| s.folder == folder)
}

/// Case-insensitive match on title, artist or album.
pub fn by_filter(
    query: &str,
) -> impl Fn(&LibraryIndex) -> Option<CollectionInfo> + Send + Sync + 'static + use<> {
    let query = query.to_string();
    let needle = query.to_lowercase();
    move |library| {
        library.collect(CollectionKind::Filter, &query, |s| {
            s.title.to_lowercase().contains(&needle)
                || s.artist.to_lowercase().contains(&needle)
                || s.album.to_lowercase().contains(&needle)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_library;

    #[test]
    fn test_resolve_skips_missing_songs() {
        let library = sample_library();
        let songs = library.resolve(&[3, 99, 1]);
        assert_eq!(songs.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_selectors_return_none_when_nothing_matches() {
        let library = sample_library();
        assert!(by_album("Nope")(&library).is_none());
        assert!(by_filter("zzz")(&library).is_none());

        let album = by_album("Blue Train")(&library).unwrap();
        assert_eq!(album.kind, CollectionKind::Album);
        assert_eq!(album.song_ids(), vec![1, 2]);
    }

    #[test]
    fn test_folder_selector() {
        let library = sample_library();
        let info = by_folder("jazz")(&library).unwrap();
        assert_eq!(info.kind, CollectionKind::Folder);
        assert_eq!(info.song_ids(), vec![1, 2, 3]);
        assert!(by_folder("rock")(&library).is_none());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let library = sample_library();
        let info = by_filter("COLTRANE")(&library).unwrap();
        assert_eq!(info.title, "COLTRANE");
        assert_eq!(info.song_ids(), vec![1, 2]);
    }

    #[test]
    fn test_playlist_descriptor_tracks_key_presence() {
        let library = sample_library();
        let mut playlists = PlaylistMap::new();
        let key = PlaylistKey::new("mix");
        assert!(CollectionInfo::for_playlist(&library, &playlists, &key).is_none());

        playlists.insert(
            key.clone(),
            Playlist { name: "Mix".to_string(), songs: vec![] },
        );
        let info = CollectionInfo::for_playlist(&library, &playlists, &key).unwrap();
        assert_eq!(info.title, "Mix");
        assert!(info.songs.is_empty());
    }
}
