use crate::{
    discography::{self, Discography, Report},
    fetch::{ToolFetcher, DEFAULT_TOOL},
};
use clap::Parser;
use discogrs_spotify_api::{
    client::{
        api::{self, ACCOUNTS_URL, API_URL},
        DEFAULT_MARKET,
    },
    Credentials,
};
use snafu::prelude::*;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, prelude::*};

#[derive(Parser)]
#[clap(author, version, about = "Download every album of one or more artists with spotdl", long_about = None)]
pub struct Cli {
    /// Spotify application client id.
    #[clap(long = "client-id", alias = "clientID", env = "SPOTIFY_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Spotify application client secret.
    #[clap(
        long = "client-secret",
        alias = "clientSecret",
        env = "SPOTIFY_CLIENT_SECRET",
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Comma separated artist names, matched exactly.
    #[clap(short, long, env = "DISCOG_ARTISTS")]
    pub artists: String,

    /// Only list albums available in this market.
    #[clap(short, long, env = "DISCOG_MARKET", default_value = DEFAULT_MARKET)]
    pub market: String,

    /// Where to download songs.
    #[clap(short, long, env = "DISCOG_DEST", default_value = "./download")]
    pub dest: PathBuf,

    /// The downloader to run for every album.
    #[clap(short, long, env = "DISCOG_TOOL", default_value = DEFAULT_TOOL)]
    pub tool: String,

    #[clap(long, env = "DISCOG_ACCOUNTS_URL", default_value = ACCOUNTS_URL, hide = true)]
    pub accounts_url: String,

    #[clap(long, env = "DISCOG_API_URL", default_value = API_URL, hide = true)]
    pub api_url: String,
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("{error}"))]
    Client { error: discogrs_spotify_api::Error },
}

impl From<discogrs_spotify_api::Error> for Error {
    fn from(error: discogrs_spotify_api::Error) -> Self {
        Error::Client { error }
    }
}

/// Authenticate, then walk every requested artist.
///
/// Only a credential or token problem is returned as an error. Everything
/// that goes wrong per artist or album ends up in the report.
pub async fn download(cli: Cli) -> Result<Report, Error> {
    let credentials = Credentials::new(
        cli.client_id.unwrap_or_default(),
        cli.client_secret.unwrap_or_default(),
    );

    let mut client = api::new(credentials)?.with_urls(cli.accounts_url, cli.api_url);
    client.authenticate().await?;

    let fetcher = match ToolFetcher::from_path(&cli.tool) {
        Some(fetcher) => {
            debug!("using {}", fetcher.program().display());
            fetcher
        }
        None => {
            warn!("{} was not found in PATH, every album will fail", cli.tool);
            ToolFetcher::new(&cli.tool)
        }
    };

    let names = discography::parse_names(&cli.artists);
    let discography = Discography::new(&client, &fetcher, cli.market, cli.dest);

    info!(
        "fetching {} artists for market {} into {}",
        names.len(),
        discography.market(),
        discography.dest().display()
    );

    Ok(discography.run(&names).await)
}

pub async fn run() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("DISCOG_LOG")
                .from_env_lossy(),
        )
        .init();

    // PARSE CLI ARGS
    let cli = Cli::parse();

    let report = download(cli).await?;

    info!("{report}");
    if !report.is_clean() {
        for failure in &report.failures {
            warn!("{failure}");
        }
    }

    Ok(())
}
