//! Structured types for the service's JSON responses.
//!
//! The service wraps plain values in objects carrying correction metadata
//! (`#text` keys) and marks the in-progress entry of a recent-tracks listing
//! with a `@attr` object. Only the fields the crate exposes are decoded.

use serde::Deserialize;

/// A track a user is (or was) listening to, reduced to what callers render.
///
/// The service reports a missing album as an empty string; the wire layer
/// maps that to `None` so callers only have one case to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// The track title.
    pub title: String,
    /// The performing artist.
    pub artist: String,
    /// The album, when the service knows one.
    pub album: Option<String>,
}

/// Response envelope for the `user.getrecenttracks` method.
#[derive(Debug, Deserialize)]
pub(crate) struct RecentTracksResponse {
    pub recenttracks: RecentTracks,
}

/// The recent-tracks listing.
#[derive(Debug, Deserialize)]
pub(crate) struct RecentTracks {
    #[serde(default)]
    pub track: Vec<RecentTrack>,
}

/// One entry of the recent-tracks listing.
#[derive(Debug, Deserialize)]
pub(crate) struct RecentTrack {
    pub name: String,
    pub artist: CorrectedText,
    #[serde(default)]
    pub album: Option<CorrectedText>,
    /// Present only on the entry the user is listening to right now.
    #[serde(rename = "@attr", default)]
    pub attr: Option<RecentTrackAttr>,
}

impl RecentTrack {
    /// Whether the service flagged this entry as currently playing.
    pub(crate) fn is_now_playing(&self) -> bool {
        self.attr
            .as_ref()
            .is_some_and(|attr| attr.nowplaying.as_deref() == Some("true"))
    }
}

/// A plain value nested under `#text` next to correction metadata.
#[derive(Debug, Deserialize)]
pub(crate) struct CorrectedText {
    #[serde(rename = "#text", default)]
    pub text: String,
}

/// Attributes attached to a recent-tracks entry.
#[derive(Debug, Deserialize)]
pub(crate) struct RecentTrackAttr {
    #[serde(default)]
    pub nowplaying: Option<String>,
}

impl From<RecentTrack> for Track {
    fn from(track: RecentTrack) -> Self {
        let album = track
            .album
            .map(|album| album.text)
            .filter(|text| !text.is_empty());

        Track {
            title: track.name,
            artist: track.artist.text,
            album,
        }
    }
}

/// Response envelope for the `user.gettopartists` method.
#[derive(Debug, Deserialize)]
pub(crate) struct TopArtistsResponse {
    pub topartists: TopArtists,
}

/// The ranked artist listing.
#[derive(Debug, Deserialize)]
pub(crate) struct TopArtists {
    #[serde(default)]
    pub artist: Vec<TopArtist>,
}

/// One ranked artist.
#[derive(Debug, Deserialize)]
pub(crate) struct TopArtist {
    pub name: String,
}

/// Error body the service returns in place of a result.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub error: u32,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_now_playing_entry() {
        let json = include_str!("../tests/fixtures/recenttracks_nowplaying.json");
        let response: RecentTracksResponse = serde_json::from_str(json).unwrap();

        let track = response
            .recenttracks
            .track
            .into_iter()
            .find(RecentTrack::is_now_playing)
            .map(Track::from)
            .expect("a currently playing track");

        assert_eq!(track.title, "Dayvan Cowboy");
        assert_eq!(track.artist, "Boards of Canada");
        assert_eq!(track.album.as_deref(), Some("The Campfire Headphase"));
    }

    #[test]
    fn empty_album_text_becomes_none() {
        let json = include_str!("../tests/fixtures/recenttracks_no_album.json");
        let response: RecentTracksResponse = serde_json::from_str(json).unwrap();

        let track = response
            .recenttracks
            .track
            .into_iter()
            .find(RecentTrack::is_now_playing)
            .map(Track::from)
            .expect("a currently playing track");

        assert_eq!(track.album, None);
    }

    #[test]
    fn idle_listing_has_no_now_playing_entry() {
        let json = include_str!("../tests/fixtures/recenttracks_idle.json");
        let response: RecentTracksResponse = serde_json::from_str(json).unwrap();

        assert!(!response.recenttracks.track.is_empty());
        assert!(
            !response
                .recenttracks
                .track
                .iter()
                .any(RecentTrack::is_now_playing)
        );
    }

    #[test]
    fn parse_top_artists() {
        let json = include_str!("../tests/fixtures/topartists.json");
        let response: TopArtistsResponse = serde_json::from_str(json).unwrap();

        let artist = response.topartists.artist.first().expect("a ranked artist");
        assert_eq!(artist.name, "Boards of Canada");
    }

    #[test]
    fn parse_error_body() {
        let json = include_str!("../tests/fixtures/error.json");
        let error: ApiError = serde_json::from_str(json).unwrap();

        assert_eq!(error.error, 6);
        assert_eq!(error.message, "User not found");
    }

    #[test]
    fn success_body_is_not_an_error_body() {
        let json = include_str!("../tests/fixtures/recenttracks_idle.json");

        assert!(serde_json::from_str::<ApiError>(json).is_err());
    }
}
