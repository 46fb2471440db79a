//! Runs the external downloader for a single album.

use async_trait::async_trait;
use snafu::prelude::*;
use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::Command;

pub const DEFAULT_TOOL: &str = "spotdl";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to run {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[snafu(display("{program} exited with {}", describe(*code)))]
    ExitStatus { program: String, code: Option<i32> },
}

fn describe(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (killed by a signal)".to_string(),
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Something that downloads whatever `url` points at into `dir`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, dir: &Path) -> Result<()>;
}

/// Invokes `<program> <url>` with `dir` as the working directory.
///
/// Output goes straight to our own stdout and stderr. There is no timeout;
/// the call returns when the program exits.
#[derive(Debug, Clone)]
pub struct ToolFetcher {
    program: PathBuf,
}

impl ToolFetcher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve `program` against `PATH`.
    pub fn from_path(program: &str) -> Option<Self> {
        which::which(program).ok().map(Self::new)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl Fetcher for ToolFetcher {
    async fn fetch(&self, url: &str, dir: &Path) -> Result<()> {
        let program = self.program.display().to_string();
        debug!("running {program} {url} in {}", dir.display());

        let status = Command::new(&self.program)
            .arg(url)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .context(SpawnSnafu {
                program: program.as_str(),
            })?;

        ensure!(
            status.success(),
            ExitStatusSnafu {
                program,
                code: status.code()
            }
        );

        Ok(())
    }
}
