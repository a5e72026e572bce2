//! Mapping from raw Genius payloads to the typed records in `core::models`
//!
//! A record without an id or a display name is dropped; everything else
//! missing becomes `None`.

use tracing::debug;

use crate::core::models::{
    AlbumSummary, AlbumTrack, AlbumTracks, ArtistInfo, SearchDetails, SearchResult, SongDetails,
    SongSummary,
};
use crate::core::services::raw::{RawAlbum, RawArtist, RawHit, RawOther, RawSong, RawTrack};

const UNKNOWN_ARTIST: &str = "Unknown artist";

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn song_artist(song: &RawSong) -> String {
    song.primary_artist
        .as_ref()
        .and_then(|artist| non_empty(artist.name.clone()))
        .or_else(|| non_empty(song.artist_names.clone()))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string())
}

fn song_release_date(song: &RawSong) -> Option<String> {
    non_empty(song.release_date.clone()).or_else(|| non_empty(song.release_date_for_display.clone()))
}

pub fn search_result(hit: RawHit) -> Option<SearchResult> {
    let hit_type = hit.hit_type.clone();
    let mapped = match hit_type.as_str() {
        "song" => serde_json::from_value::<RawSong>(hit.result)
            .ok()
            .and_then(|song| {
                let artist = song_artist(&song);
                let release_date = song_release_date(&song);
                Some(SearchResult {
                    id: song.id?,
                    title: non_empty(song.title)?,
                    url: non_empty(song.url),
                    details: SearchDetails::Song { artist, release_date },
                })
            }),
        "artist" => serde_json::from_value::<RawArtist>(hit.result)
            .ok()
            .and_then(|artist| {
                Some(SearchResult {
                    id: artist.id?,
                    title: non_empty(artist.name)?,
                    url: non_empty(artist.url),
                    details: SearchDetails::Artist {
                        image_url: non_empty(artist.image_url),
                    },
                })
            }),
        "album" => serde_json::from_value::<RawAlbum>(hit.result)
            .ok()
            .and_then(|album| {
                let artist = album.artist.as_ref().and_then(|a| non_empty(a.name.clone()));
                let release_year = album.release_date_components.as_ref().and_then(|d| d.year);
                Some(SearchResult {
                    id: album.id?,
                    title: non_empty(album.name)?,
                    url: non_empty(album.url),
                    details: SearchDetails::Album { artist, release_year },
                })
            }),
        _ => serde_json::from_value::<RawOther>(hit.result)
            .ok()
            .and_then(|other| {
                let title = non_empty(other.title)
                    .or_else(|| non_empty(other.name))
                    .or_else(|| non_empty(other.full_title))?;
                Some(SearchResult {
                    id: other.id?,
                    title,
                    url: non_empty(other.url),
                    details: SearchDetails::Other {
                        hit_type: hit_type.clone(),
                    },
                })
            }),
    };

    if mapped.is_none() {
        debug!("Dropping {} hit without id or title", hit_type);
    }
    mapped
}

pub fn song_summary(song: RawSong) -> Option<SongSummary> {
    let artist = song_artist(&song);
    let release_date = song_release_date(&song);
    Some(SongSummary {
        id: song.id?,
        title: non_empty(song.title)?,
        artist,
        url: non_empty(song.url),
        release_date,
    })
}

pub fn song_details(song: RawSong) -> Option<SongDetails> {
    let artist = song_artist(&song);
    let release_date = song_release_date(&song);
    let album = song.album.and_then(|album| non_empty(album.name));
    Some(SongDetails {
        id: song.id?,
        title: non_empty(song.title)?,
        artist,
        album,
        release_date,
        url: non_empty(song.url),
    })
}

pub fn album_summary(album: RawAlbum) -> Option<AlbumSummary> {
    let release_year = album.release_date_components.as_ref().and_then(|d| d.year);
    Some(AlbumSummary {
        id: album.id?,
        name: non_empty(album.name)?,
        url: non_empty(album.url),
        release_year,
        cover_art_url: non_empty(album.cover_art_url),
    })
}

pub fn artist_info(artist: RawArtist, top_songs: Vec<SongSummary>) -> Option<ArtistInfo> {
    let description = artist
        .description
        .and_then(|d| non_empty(d.plain))
        // Genius answers "?" for artists without a bio
        .filter(|d| d != "?");
    Some(ArtistInfo {
        id: artist.id?,
        name: non_empty(artist.name)?,
        url: non_empty(artist.url),
        image_url: non_empty(artist.image_url),
        alternate_names: artist.alternate_names.unwrap_or_default(),
        followers_count: artist.followers_count,
        description,
        top_songs,
    })
}

/// Tracks sorted by number; unnumbered tracks and repeated numbers are dropped
/// (the first occurrence of a number wins).
pub fn album_tracks(
    album_id: u64,
    title: String,
    artist: Option<String>,
    raw_tracks: Vec<RawTrack>,
) -> AlbumTracks {
    let mut tracks: Vec<AlbumTrack> = Vec::with_capacity(raw_tracks.len());

    for raw in raw_tracks {
        let Some(number) = raw.number else {
            debug!("Skipping unnumbered track on album {}", album_id);
            continue;
        };
        let Some(song) = raw.song else {
            continue;
        };
        let Some(track_title) = non_empty(song.title) else {
            continue;
        };
        if tracks.iter().any(|t| t.number == number) {
            debug!("Skipping duplicate track number {} on album {}", number, album_id);
            continue;
        }
        tracks.push(AlbumTrack {
            number,
            title: track_title,
            song_id: song.id,
        });
    }

    tracks.sort_by_key(|t| t.number);

    AlbumTracks {
        album_id,
        title,
        artist,
        tracks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ResultKind;
    use serde_json::json;

    fn hit(value: serde_json::Value) -> RawHit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_song_hit() {
        let result = search_result(hit(json!({
            "type": "song",
            "result": {
                "id": 1063,
                "title": "Bohemian Rhapsody",
                "url": "https://genius.com/Queen-bohemian-rhapsody-lyrics",
                "release_date_for_display": "October 31, 1975",
                "primary_artist": {"id": 563, "name": "Queen"}
            }
        })))
        .unwrap();

        assert_eq!(result.kind(), ResultKind::Song);
        assert_eq!(result.artist_name(), Some("Queen"));
        assert_eq!(
            result.details,
            SearchDetails::Song {
                artist: "Queen".to_string(),
                release_date: Some("October 31, 1975".to_string()),
            }
        );
    }

    #[test]
    fn test_album_hit_and_other_hit() {
        let album = search_result(hit(json!({
            "type": "album",
            "result": {
                "id": 11769,
                "name": "Thriller",
                "artist": {"id": 835, "name": "Michael Jackson"},
                "release_date_components": {"year": 1982, "month": 11, "day": 30}
            }
        })))
        .unwrap();
        assert_eq!(
            album.details,
            SearchDetails::Album {
                artist: Some("Michael Jackson".to_string()),
                release_year: Some(1982),
            }
        );

        let video = search_result(hit(json!({
            "type": "video",
            "result": {"id": 77, "title": "Behind the lyrics", "url": "https://genius.com/videos/77"}
        })))
        .unwrap();
        assert_eq!(video.kind(), ResultKind::Other);
        assert_eq!(
            video.details,
            SearchDetails::Other {
                hit_type: "video".to_string()
            }
        );
    }

    #[test]
    fn test_hits_without_identity_are_dropped() {
        assert!(search_result(hit(json!({"type": "song", "result": {"title": "No id"}}))).is_none());
        assert!(search_result(hit(json!({"type": "artist", "result": {"id": 1, "name": "  "}}))).is_none());
        assert!(search_result(hit(json!({"type": "album", "result": "garbage"}))).is_none());
    }

    #[test]
    fn test_song_falls_back_to_artist_names() {
        let song: RawSong = serde_json::from_value(json!({
            "id": 5,
            "title": "Collab",
            "artist_names": "A & B"
        }))
        .unwrap();
        assert_eq!(song_summary(song).unwrap().artist, "A & B");
    }

    #[test]
    fn test_artist_info_ignores_placeholder_description() {
        let artist: RawArtist = serde_json::from_value(json!({
            "id": 563,
            "name": "Queen",
            "alternate_names": ["Queen (band)"],
            "followers_count": 1200,
            "description": {"plain": "?"}
        }))
        .unwrap();

        let info = artist_info(artist, Vec::new()).unwrap();
        assert_eq!(info.alternate_names, vec!["Queen (band)"]);
        assert_eq!(info.followers_count, Some(1200));
        assert!(info.description.is_none());
    }

    #[test]
    fn test_album_tracks_sorted_and_unique() {
        let raw: Vec<RawTrack> = serde_json::from_value(json!([
            {"number": 3, "song": {"id": 30, "title": "Thriller"}},
            {"number": 1, "song": {"id": 10, "title": "Wanna Be Startin' Somethin'"}},
            {"number": null, "song": {"id": 99, "title": "Bonus"}},
            {"number": 3, "song": {"id": 31, "title": "Thriller (Demo)"}},
            {"number": 2, "song": {"id": 20, "title": "Baby Be Mine"}}
        ]))
        .unwrap();

        let album = album_tracks(11769, "Thriller".to_string(), None, raw);
        let numbers: Vec<u32> = album.tracks.iter().map(|t| t.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(album.tracks[2].title, "Thriller");
        assert_eq!(album.tracks[2].song_id, Some(30));
    }
}
