use discogrs_spotify_api::{
    client::api::{self, Client},
    Credentials,
};
use serde_json::json;
use wiremock::{
    matchers::{basic_auth, body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const ACCESS_TOKEN: &str = "BQDtesttoken";

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(basic_auth(CLIENT_ID, CLIENT_SECRET))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

pub fn client(server: &MockServer) -> Client {
    api::new(Credentials::new(CLIENT_ID, CLIENT_SECRET))
        .expect("failed to create client")
        .with_urls(server.uri(), server.uri())
}

/// A mock server with the token endpoint mounted and a client that has
/// already authenticated against it.
pub async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let mut client = client(&server);
    client.authenticate().await.expect("failed to authenticate");

    (server, client)
}

pub fn album(id: &str, name: &str) -> serde_json::Value {
    json!({
        "album_type": "album",
        "id": id,
        "name": name,
        "release_date": "1967-05-26",
        "total_tracks": 10,
        "external_urls": { "spotify": format!("https://open.spotify.com/album/{id}") }
    })
}
