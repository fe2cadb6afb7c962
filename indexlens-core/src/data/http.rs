//! Static-origin HTTP document source.
//!
//! Fetches whole JSON documents from a plain file-serving origin. One request
//! per document, no retries: a failed fetch fails the load.

use std::time::Duration;

use super::source::{DocumentSource, LoadError};

pub struct HttpSource {
    client: reqwest::blocking::Client,
    base_url: String,
    cache_buster: bool,
}

impl HttpSource {
    /// `base_url` is the directory that holds `prices.json` and the
    /// per-index folders.
    pub fn new(base_url: &str, cache_buster: bool) -> Result<Self, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LoadError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_buster,
        })
    }

    /// Build the document URL. With the cache buster on, a `?v=<millis>`
    /// query defeats intermediate caches between data refreshes.
    fn document_url(&self, path: &str, now_millis: i64) -> String {
        let path = path.trim_start_matches('/');
        if self.cache_buster {
            format!("{}/{path}?v={now_millis}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        &self.base_url
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.document_url(path, chrono::Utc::now().timestamp_millis());

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LoadError::NetworkUnreachable(format!("{url}: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound { path: path.to_string() });
        }
        if !status.is_success() {
            return Err(LoadError::Http {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .map_err(|e| LoadError::NetworkUnreachable(format!("{url}: {e}")))?;
        Ok(body.to_vec())
    }
}
