//! HTTP image download.
//!
//! Requires the `fetch` feature.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::common::{Blob, Error, Result};
use crate::host::ImageFetcher;

/// Downloads images over HTTP(S) with a blocking client.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("templet/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn fetch(&self, url: &str) -> Result<Blob> {
        log::debug!("fetching image {}", url);
        let response = self.client.get(url).send()?.error_for_status()?;
        let reported = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes()?;
        if bytes.is_empty() {
            return Err(Error::Fetch(format!("{} returned an empty body", url)));
        }

        // Servers often label images as octet streams; trust the payload then.
        let blob = match reported {
            Some(content_type) if content_type.contains("image") => Blob::new(bytes, content_type),
            _ => Blob::sniffed(bytes),
        };
        Ok(blob.with_name(url.rsplit('/').next().unwrap_or(url)))
    }
}
