// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::Airport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Where a catalog snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum CatalogOrigin {
    Remote(String),
    Embedded,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::Remote(name) => write!(f, "{}", name),
            CatalogOrigin::Embedded => write!(f, "embedded dataset"),
        }
    }
}

/// Record plus the lower-cased fields the scorer matches against.
#[derive(Debug, Clone)]
pub(crate) struct SearchEntry {
    pub(crate) record: usize,
    pub(crate) iata: Option<String>,
    pub(crate) icao: Option<String>,
    pub(crate) has_iata: bool,
    pub(crate) name: String,
    pub(crate) city: String,
    pub(crate) country: String,
}

/// Immutable airport catalog with its lookup indexes.
///
/// Built in one pass from the canonical records. Code keys are stored
/// upper-cased and probed upper-cased, so lookups are case-insensitive.
/// Duplicate codes resolve to the last record carrying them.
#[derive(Debug, Clone)]
pub struct Catalog {
    airports: Vec<Airport>,
    by_iata: HashMap<String, usize>,
    by_icao: HashMap<String, usize>,
    searchable: Vec<SearchEntry>,
    origin: CatalogOrigin,
    built_at: DateTime<Utc>,
}

impl Catalog {
    pub fn build(airports: Vec<Airport>, origin: CatalogOrigin) -> Self {
        let mut by_iata = HashMap::with_capacity(airports.len());
        let mut by_icao = HashMap::with_capacity(airports.len());
        let mut searchable = Vec::with_capacity(airports.len());

        for (i, airport) in airports.iter().enumerate() {
            if let Some(iata) = &airport.iata {
                by_iata.insert(iata.to_uppercase(), i);
            }
            if let Some(icao) = &airport.icao {
                by_icao.insert(icao.to_uppercase(), i);
            }

            searchable.push(SearchEntry {
                record: i,
                iata: airport.iata.as_ref().map(|c| c.to_lowercase()),
                icao: airport.icao.as_ref().map(|c| c.to_lowercase()),
                has_iata: airport.has_iata(),
                name: airport.name.to_lowercase(),
                city: airport.city.to_lowercase(),
                country: airport.country.to_lowercase(),
            });
        }

        Self {
            airports,
            by_iata,
            by_icao,
            searchable,
            origin,
            built_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.iter()
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn get_by_iata(&self, code: &str) -> Option<&Airport> {
        self.by_iata
            .get(&code.trim().to_uppercase())
            .map(|&i| &self.airports[i])
    }

    pub fn get_by_icao(&self, code: &str) -> Option<&Airport> {
        self.by_icao
            .get(&code.trim().to_uppercase())
            .map(|&i| &self.airports[i])
    }

    /// IATA first, then ICAO. O(1).
    pub fn get_by_code(&self, code: &str) -> Option<&Airport> {
        self.get_by_iata(code).or_else(|| self.get_by_icao(code))
    }

    pub(crate) fn searchable(&self) -> &[SearchEntry] {
        &self.searchable
    }

    pub(crate) fn record(&self, index: usize) -> &Airport {
        &self.airports[index]
    }
}
