use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod album;
pub mod api;
pub mod artist;

/// The key under which Spotify stores the canonical `open.spotify.com` link.
pub const SPOTIFY_URL_KEY: &str = "spotify";

/// The market used when none is given.
pub const DEFAULT_MARKET: &str = "US";

/// The only album group the artist-albums listing asks for.
pub const ALBUM_GROUP: &str = "album";

/// Provider name to URL, e.g. `{"spotify": "https://open.spotify.com/album/..."}`.
pub type ExternalUrls = HashMap<String, String>;

/// A single page of a paged Web API listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub total: i64,
    pub next: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            items: Vec::new(),
            limit: 0,
            offset: 0,
            total: 0,
            next: None,
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
