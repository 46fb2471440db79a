use discog_rs::cli::Cli;
use serde_json::json;
use std::path::Path;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";

pub fn cli(server: &MockServer, artists: &str, tool: &str, dest: &Path) -> Cli {
    Cli {
        client_id: Some(CLIENT_ID.to_string()),
        client_secret: Some(CLIENT_SECRET.to_string()),
        artists: artists.to_string(),
        market: "US".to_string(),
        dest: dest.to_path_buf(),
        tool: tool.to_string(),
        accounts_url: server.uri(),
        api_url: server.uri(),
    }
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQDtesttoken",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

pub async fn mount_search(server: &MockServer, query: &str, names: &[(&str, &str)]) {
    let items = names
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect::<Vec<serde_json::Value>>();

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": {
                "items": items,
                "limit": 20,
                "offset": 0,
                "total": names.len(),
                "next": null
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_albums(server: &MockServer, artist_id: &str, albums: &[(&str, &str)]) {
    let items = albums
        .iter()
        .map(|(id, name)| {
            json!({
                "album_type": "album",
                "id": id,
                "name": name,
                "external_urls": { "spotify": format!("https://open.spotify.com/album/{id}") }
            })
        })
        .collect::<Vec<serde_json::Value>>();

    Mock::given(method("GET"))
        .and(path(format!("/v1/artists/{artist_id}/albums")))
        .and(query_param("include_groups", "album"))
        .and(query_param("market", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "limit": 50,
            "offset": 0,
            "total": albums.len(),
            "next": null
        })))
        .mount(server)
        .await;
}
