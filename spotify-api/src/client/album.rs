use serde::{Deserialize, Serialize};

use crate::client::{ExternalUrls, SPOTIFY_URL_KEY};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub album_type: Option<String>,
    pub album_group: Option<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<i64>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub uri: Option<String>,
}

impl Album {
    /// The canonical `open.spotify.com` link for this album, if Spotify sent one.
    pub fn spotify_url(&self) -> Option<&str> {
        self.external_urls.get(SPOTIFY_URL_KEY).map(String::as_str)
    }
}
