use crate::error::ArchiveError;
use reqwest::Client as ReqwestClient;
use std::path::{Path, PathBuf};

/// Downloads media to a single fixed path, replacing whatever was there.
#[derive(Clone)]
pub struct MediaFetcher {
    client: ReqwestClient,
    path: PathBuf,
    credentials: Option<(String, String)>,
}

impl MediaFetcher {
    pub fn new(client: ReqwestClient, path: impl Into<PathBuf>) -> Self {
        Self {
            client,
            path: path.into(),
            credentials: None,
        }
    }

    /// Sends HTTP basic credentials with every fetch.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some((username.to_owned(), password.to_owned()));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetches `url` and writes the whole body to the local path.
    ///
    /// The status code is not checked: an error page is written just like
    /// audio would be.
    pub async fn fetch(&self, url: &str) -> Result<PathBuf, ArchiveError> {
        let mut request = self.client.get(url);
        if let Some((ref username, ref password)) = self.credentials {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Fetching {url} returned {status}, writing the body anyway");
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(&self.path, &bytes).await?;

        log::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());

        Ok(self.path.clone())
    }
}
