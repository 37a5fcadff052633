// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::search::SearchOptions;
use crate::source::{default_sources, SourceDescriptor, DEFAULT_TIMEOUT_SECS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirdexConfig {
    /// Tried in order; the first one that yields airports wins.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceDescriptor>,
    /// Per-request transport timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub search: SearchOptions,
}

impl Default for AirdexConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            search: SearchOptions::default(),
        }
    }
}

impl AirdexConfig {
    /// Reads the config at `path`. A missing file yields the defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!(
                "No config file found, using defaults — path={}",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!("Loaded config — path={}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Drops every configured source so only the embedded dataset is used.
    pub fn offline(mut self) -> Self {
        self.sources.clear();
        self
    }
}
