// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::{Airport, ScoredAirport};
use crate::catalog::{Catalog, CatalogOrigin};
use crate::config::AirdexConfig;
use crate::fallback::embedded_catalog;
use crate::normalize::normalize;
use crate::search::SearchOptions;
use crate::source::{HttpFetcher, SourceDescriptor, SourceError, TextFetcher};
use log::{info, warn};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::Duration;

type CatalogCell = Arc<OnceLock<Arc<Catalog>>>;

/// Owner of the airport catalog.
///
/// `load` acquires the catalog at most once: the first caller runs the
/// acquisition and every concurrent caller waits on the same cell and gets
/// the same `Arc`. Reads clone the current snapshot and never hold a lock
/// while searching. `reload` builds a replacement while the old snapshot keeps
/// serving, then swaps it in whole.
pub struct AirportDb {
    sources: Vec<SourceDescriptor>,
    fetcher: Box<dyn TextFetcher>,
    search_options: SearchOptions,
    current: RwLock<CatalogCell>,
}

impl AirportDb {
    pub fn new<F: TextFetcher + 'static>(sources: Vec<SourceDescriptor>, fetcher: F) -> Self {
        Self {
            sources,
            fetcher: Box::new(fetcher),
            search_options: SearchOptions::default(),
            current: RwLock::new(Arc::new(OnceLock::new())),
        }
    }

    /// HTTP-backed instance using the configured sources, timeout and search
    /// tuning.
    pub fn from_config(config: &AirdexConfig) -> Result<Self, SourceError> {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(config.sources.clone(), fetcher).with_search_options(config.search.clone()))
    }

    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    pub fn sources(&self) -> &[SourceDescriptor] {
        &self.sources
    }

    /// Returns the loaded catalog, acquiring it on first use. Never fails:
    /// when no source delivers, the embedded dataset is used.
    pub fn load(&self) -> Arc<Catalog> {
        let cell = self.cell();
        Arc::clone(cell.get_or_init(|| Arc::new(self.acquire())))
    }

    /// Acquires a fresh catalog and publishes it atomically.
    pub fn reload(&self) -> Arc<Catalog> {
        let catalog = Arc::new(self.acquire());
        let cell = OnceLock::new();
        let _ = cell.set(Arc::clone(&catalog));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(cell);
        catalog
    }

    /// Clears the loaded flag; the next `load` acquires again.
    pub fn reset(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(OnceLock::new());
    }

    pub fn is_loaded(&self) -> bool {
        self.cell().get().is_some()
    }

    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.cell().get().cloned()
    }

    /// Ranked search using the configured scan cutoff. Empty when the catalog
    /// is not loaded yet.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredAirport> {
        let options = SearchOptions {
            limit,
            ..self.search_options.clone()
        };
        self.search_with(query, &options)
    }

    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<ScoredAirport> {
        match self.snapshot() {
            Some(catalog) => catalog.search_with(query, options),
            None => Vec::new(),
        }
    }

    pub fn get_by_code(&self, code: &str) -> Option<Airport> {
        self.snapshot()?.get_by_code(code).cloned()
    }

    fn cell(&self) -> CatalogCell {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn acquire(&self) -> Catalog {
        for source in &self.sources {
            match self.try_source(source) {
                Ok(catalog) => return catalog,
                Err(e) => warn!(
                    "Airport source failed; trying next — name={} location={} error={}",
                    source.name, source.location, e
                ),
            }
        }

        warn!(
            "All airport sources failed; using embedded dataset — sources_tried={}",
            self.sources.len()
        );
        let catalog = embedded_catalog();
        info!(
            "Loaded airport catalog — origin={} airports={}",
            catalog.origin(),
            catalog.len()
        );
        catalog
    }

    fn try_source(&self, source: &SourceDescriptor) -> Result<Catalog, SourceError> {
        let text = self.fetcher.fetch_text(source)?;
        let report = normalize(source.format, &text);
        if report.airports.is_empty() {
            return Err(SourceError::Empty {
                rejected: report.rejected,
            });
        }

        info!(
            "Loaded airport catalog — origin={} airports={} rejected_rows={}",
            source.name,
            report.airports.len(),
            report.rejected
        );
        Ok(Catalog::build(
            report.airports,
            CatalogOrigin::Remote(source.name.clone()),
        ))
    }
}
