// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod airport;
pub mod catalog;
pub mod config;
pub mod fallback;
pub mod loader;
pub mod normalize;
pub mod search;
pub mod source;

pub use airport::{Airport, ScoredAirport};
pub use catalog::{Catalog, CatalogOrigin};
pub use config::AirdexConfig;
pub use loader::AirportDb;
pub use normalize::{normalize, NormalizeReport, RawFormat, RowRejection};
pub use search::SearchOptions;
pub use source::{HttpFetcher, SourceDescriptor, SourceError, SourceLocation, TextFetcher};

use directories::ProjectDirs;
use std::path::PathBuf;

/// Per-user configuration directory, or the working directory when the
/// platform has none.
pub fn get_config_root() -> PathBuf {
    ProjectDirs::from("org", "airdex", "airdex")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn get_config_path() -> PathBuf {
    get_config_root().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_json_in_root() {
        let path = get_config_path();
        assert_eq!(path.file_name().unwrap(), "config.json");
        assert!(path.starts_with(get_config_root()));
    }
}
