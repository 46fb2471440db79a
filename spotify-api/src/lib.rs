use serde::{Deserialize, Serialize};
use snafu::prelude::*;

#[macro_use]
extern crate tracing;

pub mod client;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("No client id provided."))]
    NoClientId,
    #[snafu(display("No client secret provided."))]
    NoClientSecret,
    #[snafu(display("Failed to authenticate: {message}"))]
    Authentication { message: String },
    #[snafu(display("Authorization missing."))]
    Authorization,
    #[snafu(display("Request timed out."))]
    Timeout,
    #[snafu(display("{message}"))]
    Api { message: String },
    #[snafu(display("Failed to deserialize json: {message}"))]
    DeserializeJSON { message: String },
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return Error::Timeout;
        }

        match error.status() {
            Some(status) => Error::Api {
                message: status.to_string(),
            },
            None => Error::Api {
                message: format!("Error calling the API: {error}"),
            },
        }
    }
}

/// Application credentials for the client-credentials flow.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both values must be present before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.client_id.trim().is_empty(), NoClientIdSnafu);
        ensure!(!self.client_secret.trim().is_empty(), NoClientSecretSnafu);

        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"**HIDDEN**")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_client_id_is_rejected() {
        let creds = Credentials::new("", "secret");
        assert!(matches!(creds.validate(), Err(Error::NoClientId)));
    }

    #[test]
    fn blank_client_secret_is_rejected() {
        let creds = Credentials::new("id", "   ");
        assert!(matches!(creds.validate(), Err(Error::NoClientSecret)));
    }

    #[test]
    fn debug_hides_the_secret() {
        let creds = Credentials::new("id", "hunter2");
        let printed = format!("{creds:?}");

        assert!(printed.contains("id"));
        assert!(!printed.contains("hunter2"));
    }
}
