use serde::{Deserialize, Serialize};

use crate::client::{ExternalUrls, Page};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistSearchResults {
    pub artists: Page<Artist>,
}

impl ArtistSearchResults {
    /// The first artist whose name is exactly `name`. Case matters.
    pub fn exact_match(&self, name: &str) -> Option<&Artist> {
        self.artists.items.iter().find(|artist| artist.name == name)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<i64>,
    pub uri: Option<String>,
}
