use crate::{
    client::{
        album::Album,
        artist::ArtistSearchResults,
        Page, ALBUM_GROUP,
    },
    Credentials, Error, Result,
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT},
    Method, Response, StatusCode,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const API_URL: &str = "https://api.spotify.com";

/// Upper bound for a single request, the token exchange included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest page the artist-albums endpoint will hand out.
pub const ALBUM_PAGE_LIMIT: usize = 50;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"**HIDDEN**")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    credentials: Credentials,
    accounts_url: String,
    api_url: String,
    client: reqwest::Client,
    token: Option<Token>,
}

/// Build a client. Credentials are checked here so an empty id or secret never
/// reaches the network.
pub fn new(credentials: Credentials) -> Result<Client> {
    credentials.validate()?;

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("discog-rs/", env!("CARGO_PKG_VERSION"))),
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|error| Error::Api {
            message: format!("Failed to create client: {error}"),
        })?;

    Ok(Client {
        credentials,
        accounts_url: ACCOUNTS_URL.to_string(),
        api_url: API_URL.to_string(),
        client,
        token: None,
    })
}

#[non_exhaustive]
enum Endpoint {
    Token,
    Search,
    ArtistAlbums { artist_id: String },
}

impl Endpoint {
    fn path(&self) -> String {
        match self {
            Endpoint::Token => "api/token".to_string(),
            Endpoint::Search => "v1/search".to_string(),
            Endpoint::ArtistAlbums { artist_id } => format!("v1/artists/{artist_id}/albums"),
        }
    }
}

macro_rules! call {
    ($self:ident, $endpoint:expr, $params:expr) => {
        match $self.make_call($endpoint, $params).await {
            Ok(response) => match serde_json::from_str(response.as_str()) {
                Ok(item) => Ok(item),
                Err(error) => Err(Error::DeserializeJSON {
                    message: error.to_string(),
                }),
            },
            Err(error) => Err(error),
        }
    };
}

impl Client {
    /// Point the client at different hosts, e.g. a local mock server.
    pub fn with_urls(mut self, accounts_url: impl Into<String>, api_url: impl Into<String>) -> Self {
        self.accounts_url = accounts_url.into();
        self.api_url = api_url.into();
        self
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange the client id and secret for a bearer token.
    pub async fn authenticate(&mut self) -> Result<()> {
        let endpoint = join(&self.accounts_url, &Endpoint::Token.path());

        info!(
            "requesting token with client id ({}) and secret **HIDDEN**",
            self.credentials.client_id
        );

        let response = self
            .client
            .post(endpoint)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|error| Error::Authentication {
                message: if error.is_timeout() {
                    "token request timed out".to_string()
                } else {
                    error.to_string()
                },
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("token endpoint said {status}: {body}");

            return Err(Error::Authentication {
                message: status.to_string(),
            });
        }

        let token: Token = response.json().await.map_err(|error| Error::Authentication {
            message: format!("unreadable token response: {error}"),
        })?;

        info!("successfully authenticated, token expires in {}s", token.expires_in);
        self.token = Some(token);

        Ok(())
    }

    /// Search the catalog for artists.
    pub async fn search_artists(&self, query: &str, limit: Option<usize>) -> Result<ArtistSearchResults> {
        let endpoint = join(&self.api_url, &Endpoint::Search.path());
        let limit = limit.unwrap_or(20).to_string();
        let params = vec![("q", query), ("type", "artist"), ("limit", limit.as_str())];

        call!(self, endpoint, Some(params))
    }

    /// One page of an artist's albums, filtered to full albums in `market`.
    pub async fn artist_albums(
        &self,
        artist_id: &str,
        market: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page<Album>> {
        let endpoint = join(
            &self.api_url,
            &Endpoint::ArtistAlbums {
                artist_id: artist_id.to_string(),
            }
            .path(),
        );
        let limit = limit.to_string();
        let offset = offset.to_string();
        let params = vec![
            ("include_groups", ALBUM_GROUP),
            ("market", market),
            ("limit", limit.as_str()),
            ("offset", offset.as_str()),
        ];

        call!(self, endpoint, Some(params))
    }

    /// Every album of an artist in `market`, following the paging offsets.
    pub async fn all_artist_albums(&self, artist_id: &str, market: &str) -> Result<Vec<Album>> {
        let mut all_albums: Vec<Album> = Vec::new();

        loop {
            let page = self
                .artist_albums(artist_id, market, ALBUM_PAGE_LIMIT, all_albums.len())
                .await?;

            let fetched = page.items.len();
            let total = page.total.max(0) as usize;
            let more = page.has_next();

            debug!("fetched {fetched} albums ({} of {total})", all_albums.len() + fetched);
            all_albums.extend(page.items);

            if fetched == 0 || all_albums.len() >= total || !more {
                break;
            }
        }

        Ok(all_albums)
    }

    // Call the api and retrieve the JSON payload
    async fn make_call(&self, endpoint: String, params: Option<Vec<(&str, &str)>>) -> Result<String> {
        let token = self.token.as_ref().ok_or(Error::Authorization)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(format!("Bearer {}", token.access_token).as_str())
                .map_err(|_| Error::Authorization)?,
        );

        debug!("calling {} endpoint", endpoint);
        let request = self
            .client
            .request(Method::GET, endpoint)
            .headers(headers)
            .timeout(REQUEST_TIMEOUT);

        let response = if let Some(p) = params {
            request.query(&p).send().await?
        } else {
            request.send().await?
        };

        self.handle_response(response).await
    }

    // Handle a response retrieved from the api
    async fn handle_response(&self, response: Response) -> Result<String> {
        match response.status() {
            StatusCode::BAD_REQUEST => Err(Error::Api {
                message: "Bad request".to_string(),
            }),
            StatusCode::UNAUTHORIZED => Err(Error::Api {
                message: "Unauthorized request".to_string(),
            }),
            StatusCode::NOT_FOUND => Err(Error::Api {
                message: "Item not found".to_string(),
            }),
            StatusCode::TOO_MANY_REQUESTS => Err(Error::Api {
                message: "Rate limited".to_string(),
            }),
            status if status.is_success() => Ok(response.text().await?),
            status => Err(Error::Api {
                message: format!("Error calling the API: {status}"),
            }),
        }
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}
