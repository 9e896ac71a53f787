//! Dataset sources.
//!
//! The chart is drawn from a single JSON document fetched once per run. There
//! is no retry and no cache: a failed request or an unparsable body is
//! surfaced to the caller as a [`HeatmapError`].

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use heatmap_common::{Dataset, HeatmapError, HeatmapResult};
use reqwest::Client;
use tracing::{debug, info, instrument};

/// Location of the published dataset.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Something that can produce the dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch and parse the dataset.
    async fn load(&self) -> HeatmapResult<Dataset>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}

/// Fetches the dataset with a single HTTP GET.
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a source for `url`. Without a timeout the request may wait
    /// indefinitely.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> HeatmapResult<Self> {
        let url = url.into();
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| HeatmapError::FetchError {
            url: url.clone(),
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn load(&self) -> HeatmapResult<Dataset> {
        debug!("Requesting dataset");

        let fetch_error = |e: reqwest::Error| HeatmapError::FetchError {
            url: self.url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&self.url).send().await.map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HeatmapError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(fetch_error)?;
        let dataset = Dataset::from_slice(&body)?;

        info!(
            bytes = body.len(),
            records = dataset.len(),
            "Fetched dataset"
        );
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the same JSON document from disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> HeatmapResult<Dataset> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            HeatmapError::IoError(format!("{}: {}", self.path.display(), e))
        })?;
        let dataset = Dataset::from_slice(&body)?;

        info!(records = dataset.len(), "Read dataset");
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Pick a source for a URL or filesystem path.
///
/// `http://` and `https://` locations are fetched, `file://` locations and
/// anything else are read from disk.
pub fn source_from_location(
    location: &str,
    timeout: Option<Duration>,
) -> HeatmapResult<Box<dyn DatasetSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return Ok(Box::new(HttpSource::new(location, timeout)?));
    }

    let path = location.strip_prefix("file://").unwrap_or(location);
    if path.is_empty() {
        return Err(HeatmapError::ConfigError(
            "dataset location is empty".to_string(),
        ));
    }
    Ok(Box::new(FileSource::new(path)))
}

/// Load a dataset and reject it if nothing can be drawn from it.
pub async fn load_dataset(source: &dyn DatasetSource) -> HeatmapResult<Dataset> {
    let dataset = source.load().await?;
    dataset.validate()?;
    Ok(dataset)
}
