use crate::{
    fetch::{self, Fetcher},
    slug::slug,
};
use async_trait::async_trait;
use discogrs_spotify_api::{
    client::{
        album::Album,
        api::Client,
        artist::{Artist, ArtistSearchResults},
        SPOTIFY_URL_KEY,
    },
    Error as ApiError,
};
use snafu::prelude::*;
use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("artist '{name}' not found"))]
    NotFound { name: String },
    #[snafu(display("search for '{name}' failed: {source}"))]
    Search { name: String, source: ApiError },
    #[snafu(display("albums not found: {source}"))]
    ListAlbums { source: ApiError },
    #[snafu(display("album '{album}' is missing its '{}' link", SPOTIFY_URL_KEY))]
    LinkMissing { album: String },
    #[snafu(display("failed to create {}: {source}", path.display()))]
    DirCreate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{source}"))]
    Fetch { source: fetch::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The two catalog lookups the download loop needs.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_artists(&self, query: &str) -> Result<ArtistSearchResults, ApiError>;
    async fn albums(&self, artist_id: &str, market: &str) -> Result<Vec<Album>, ApiError>;
}

#[async_trait]
impl Catalog for Client {
    async fn search_artists(&self, query: &str) -> Result<ArtistSearchResults, ApiError> {
        Client::search_artists(self, query, None).await
    }

    async fn albums(&self, artist_id: &str, market: &str) -> Result<Vec<Album>, ApiError> {
        self.all_artist_albums(artist_id, market).await
    }
}

/// Split a comma separated list of names. Blank entries are dropped.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect::<Vec<String>>()
}

/// `dest/slug(artist)/slug(album)`
pub fn destination(dest: &Path, artist_name: &str, album_name: &str) -> PathBuf {
    dest.join(slug(artist_name)).join(slug(album_name))
}

/// Search for `name` and keep the first result whose name is exactly `name`.
pub async fn find_artist<C: Catalog + ?Sized>(catalog: &C, name: &str) -> Result<Artist> {
    let results = catalog
        .search_artists(name)
        .await
        .context(SearchSnafu { name })?;

    results
        .exact_match(name)
        .cloned()
        .context(NotFoundSnafu { name })
}

pub async fn list_albums<C: Catalog + ?Sized>(
    catalog: &C,
    artist_id: &str,
    market: &str,
) -> Result<Vec<Album>> {
    catalog
        .albums(artist_id, market)
        .await
        .context(ListAlbumsSnafu)
}

/// Download one album into its own directory and return that directory.
///
/// Nothing is created on disk when the album has no Spotify link.
pub async fn fetch_album<F: Fetcher + ?Sized>(
    fetcher: &F,
    artist_name: &str,
    album: &Album,
    dest: &Path,
) -> Result<PathBuf> {
    let url = album.spotify_url().context(LinkMissingSnafu {
        album: album.name.as_str(),
    })?;

    let dir = destination(dest, artist_name, &album.name);

    tokio::fs::create_dir_all(&dir)
        .await
        .context(DirCreateSnafu { path: dir.clone() })?;

    fetcher.fetch(url, &dir).await.context(FetchSnafu)?;

    Ok(dir)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub artist: String,
    pub album: Option<String>,
    pub error: String,
}

impl Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.album {
            Some(album) => write!(f, "{} / {}: {}", self.artist, album, self.error),
            None => write!(f, "{}: {}", self.artist, self.error),
        }
    }
}

/// What happened during a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub artists: usize,
    pub albums: usize,
    pub fetched: usize,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, artist: &str, album: Option<&str>, error: &Error) {
        self.failures.push(Failure {
            artist: artist.to_string(),
            album: album.map(String::from),
            error: error.to_string(),
        });
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} artists, {} of {} albums fetched, {} failures",
            self.artists,
            self.fetched,
            self.albums,
            self.failures.len()
        )
    }
}

/// The download loop. Artists are handled one at a time, in the order given,
/// and albums one at a time within an artist.
pub struct Discography<'a, C: ?Sized, F: ?Sized> {
    catalog: &'a C,
    fetcher: &'a F,
    market: String,
    dest: PathBuf,
}

impl<'a, C, F> Discography<'a, C, F>
where
    C: Catalog + ?Sized,
    F: Fetcher + ?Sized,
{
    pub fn new(
        catalog: &'a C,
        fetcher: &'a F,
        market: impl Into<String>,
        dest: impl Into<PathBuf>,
    ) -> Self {
        Discography {
            catalog,
            fetcher,
            market: market.into(),
            dest: dest.into(),
        }
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Process every name. Failures are logged, recorded and skipped.
    pub async fn run(&self, names: &[String]) -> Report {
        let mut report = Report::default();

        for name in names {
            info!("----------{name}----------");
            report.artists += 1;

            if let Err(error) = self.artist(name, &mut report).await {
                error!("{error}");
                report.fail(name, None, &error);
            }

            info!("----------{}----------", "-".repeat(name.len()));
        }

        report
    }

    async fn artist(&self, name: &str, report: &mut Report) -> Result<()> {
        let artist = find_artist(self.catalog, name).await?;
        debug!("matched '{}' to artist {}", artist.name, artist.id);

        info!("Looking for albums...");
        let albums = list_albums(self.catalog, &artist.id, &self.market).await?;
        info!("found {} albums", albums.len());

        for album in &albums {
            report.albums += 1;
            info!("Downloading {}", album.name);

            match fetch_album(self.fetcher, &artist.name, album, &self.dest).await {
                Ok(dir) => {
                    debug!("{} finished in {}", album.name, dir.display());
                    report.fetched += 1;
                }
                Err(error) => {
                    error!("couldn't download album '{}': {}", album.name, error);
                    report.fail(&artist.name, Some(&album.name), &error);
                }
            }
        }

        Ok(())
    }
}
