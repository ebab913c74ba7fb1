/// Where the raw `blog/index.json` text comes from.
///
/// The fetcher only needs the document body; transport details stay behind this trait so the
/// load/fallback path can be exercised without a network.
use std::path::PathBuf;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::config::{Config, IndexLocation};
use crate::error::AppError;
use portfolio_common::http::HttpClient;

pub trait ContentSource: Send + Sync {
    fn fetch_index(&self) -> BoxFuture<'_, Result<String, AppError>>;

    /// Human-readable location for logs.
    fn describe(&self) -> String;
}

pub struct HttpSource {
    client: HttpClient,
    url: String,
}

impl HttpSource {
    pub fn new(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            url: Config::index_url(base_url),
        }
    }
}

impl ContentSource for HttpSource {
    fn fetch_index(&self) -> BoxFuture<'_, Result<String, AppError>> {
        async move { Ok(self.client.get_text(&self.url).await?) }.boxed()
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(site_root: impl Into<PathBuf>) -> Self {
        Self {
            path: Config::index_file_path(&site_root.into()),
        }
    }
}

impl ContentSource for FileSource {
    fn fetch_index(&self) -> BoxFuture<'_, Result<String, AppError>> {
        async move {
            let text = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(portfolio_common::error::CommonError::from)?;
            Ok(text)
        }
        .boxed()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Build the source named by the configuration.
pub fn from_config(
    config: &Config,
    client: impl FnOnce() -> Result<HttpClient, AppError>,
) -> Result<Box<dyn ContentSource>, AppError> {
    match &config.index {
        IndexLocation::Url(base) => Ok(Box::new(HttpSource::new(client()?, base))),
        IndexLocation::Dir(root) => Ok(Box::new(FileSource::new(root.clone()))),
    }
}
