// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::normalize::RawFormat;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const OPENFLIGHTS_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/airports.dat";
pub const OURAIRPORTS_URL: &str = "https://davidmegginson.github.io/ourairports-data/airports.csv";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceLocation::Url(url) => write!(f, "{}", url),
            SourceLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One external airport feed and the layout its text uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub name: String,
    pub location: SourceLocation,
    pub format: RawFormat,
}

impl SourceDescriptor {
    pub fn url(name: &str, url: &str, format: RawFormat) -> Self {
        Self {
            name: name.to_string(),
            location: SourceLocation::Url(url.to_string()),
            format,
        }
    }

    pub fn file<P: Into<PathBuf>>(name: &str, path: P, format: RawFormat) -> Self {
        Self {
            name: name.to_string(),
            location: SourceLocation::File(path.into()),
            format,
        }
    }
}

/// OpenFlights first, OurAirports second.
pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::url("openflights", OPENFLIGHTS_URL, RawFormat::Positional),
        SourceDescriptor::url("ourairports", OURAIRPORTS_URL, RawFormat::Headed),
    ]
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("source answered with status {0}")]
    Status(u16),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no usable airport rows ({rejected} rejected)")]
    Empty { rejected: usize },
}

/// Transport used to pull raw text for a source.
pub trait TextFetcher: Send + Sync {
    fn fetch_text(&self, source: &SourceDescriptor) -> Result<String, SourceError>;
}

/// Blocking HTTP for URL sources, plain reads for file sources.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl TextFetcher for HttpFetcher {
    fn fetch_text(&self, source: &SourceDescriptor) -> Result<String, SourceError> {
        match &source.location {
            SourceLocation::Url(url) => {
                debug!("Fetching airport source — name={} url={}", source.name, url);
                let response = self.client.get(url).send()?;
                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status(status.as_u16()));
                }
                Ok(response.text()?)
            }
            SourceLocation::File(path) => {
                debug!(
                    "Reading airport source — name={} path={}",
                    source.name,
                    path.display()
                );
                Ok(std::fs::read_to_string(path)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_sources_order() {
        let sources = default_sources();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].format, RawFormat::Positional);
        assert_eq!(sources[1].format, RawFormat::Headed);
        assert_eq!(sources[0].location.to_string(), OPENFLIGHTS_URL);
    }

    #[test]
    fn test_file_source_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("airports.dat");
        std::fs::write(&path, "hello").unwrap();

        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let source = SourceDescriptor::file("local", &path, RawFormat::Positional);

        assert_eq!(fetcher.fetch_text(&source).unwrap(), "hello");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        let source = SourceDescriptor::file("gone", dir.path().join("nope.csv"), RawFormat::Headed);

        assert!(matches!(
            fetcher.fetch_text(&source),
            Err(SourceError::Io(_))
        ));
    }

    #[test]
    fn test_descriptor_json_shape() {
        let json = r#"{"name":"mirror","location":{"url":"https://example.org/a.csv"},"format":"headed"}"#;
        let source: SourceDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(
            source,
            SourceDescriptor::url("mirror", "https://example.org/a.csv", RawFormat::Headed)
        );
    }
}
