// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::ScoredAirport;
use crate::catalog::{Catalog, SearchEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const EXACT_IATA_SCORE: u32 = 10_000;
pub const EXACT_ICAO_SCORE: u32 = 9_000;
/// Awarded to every record with an IATA code, matching or not.
pub const HAS_IATA_BONUS: u32 = 10;

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_CANDIDATE_FACTOR: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub limit: usize,
    /// Scan cutoff: stop scoring once `limit * factor` entries have matched
    /// the query. Entries scoring only the has-IATA bonus are still collected
    /// but do not count toward the cap.
    ///
    /// This is a fast path. A strong match sitting later in catalog order
    /// than that many weak matches is never scored, so it can be missed.
    /// `None` scores the whole catalog.
    pub candidate_factor: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            candidate_factor: Some(DEFAULT_CANDIDATE_FACTOR),
        }
    }
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn exhaustive(mut self) -> Self {
        self.candidate_factor = None;
        self
    }

    fn candidate_cap(&self) -> Option<usize> {
        self.candidate_factor
            .map(|factor| self.limit.saturating_mul(factor))
    }
}

/// Additive relevance of one entry against a trimmed, lower-cased query.
///
/// | match                              | points |
/// |------------------------------------|--------|
/// | IATA equal / prefix / contains     | 1000 / 500 / 100 |
/// | ICAO equal / prefix                | 800 / 400 |
/// | city prefix / contains             | 300 / 80 |
/// | name contains                      | 50 |
/// | country contains                   | 30 |
/// | has an IATA code                   | 10 |
pub(crate) fn score_entry(entry: &SearchEntry, query: &str) -> u32 {
    let mut score = 0;

    if let Some(iata) = &entry.iata {
        if iata == query {
            score += 1000;
        } else if iata.starts_with(query) {
            score += 500;
        } else if iata.contains(query) {
            score += 100;
        }
    }

    if let Some(icao) = &entry.icao {
        if icao == query {
            score += 800;
        } else if icao.starts_with(query) {
            score += 400;
        }
    }

    if entry.city.starts_with(query) {
        score += 300;
    } else if entry.city.contains(query) {
        score += 80;
    }

    if entry.name.contains(query) {
        score += 50;
    }

    if entry.country.contains(query) {
        score += 30;
    }

    if entry.has_iata {
        score += HAS_IATA_BONUS;
    }

    score
}

impl Catalog {
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredAirport> {
        self.search_with(query, &SearchOptions::with_limit(limit))
    }

    /// Ranked search: exact code hits first, then the additive score, highest
    /// first. At most `options.limit` results, no code repeated.
    pub fn search_with(&self, query: &str, options: &SearchOptions) -> Vec<ScoredAirport> {
        let trimmed = query.trim();
        if trimmed.is_empty() || options.limit == 0 {
            return Vec::new();
        }
        let lower = trimmed.to_lowercase();
        let cap = options.candidate_cap();

        let mut results = Vec::new();
        let mut seen = HashSet::new();

        let exact = [
            (self.get_by_iata(trimmed), EXACT_IATA_SCORE),
            (self.get_by_icao(trimmed), EXACT_ICAO_SCORE),
        ];
        for (hit, score) in exact {
            if let Some(airport) = hit {
                if seen.insert(airport.code.clone()) {
                    results.push(ScoredAirport {
                        airport: airport.clone(),
                        score,
                    });
                }
            }
        }

        let mut matched = results.len();
        for entry in self.searchable() {
            if cap.is_some_and(|cap| matched >= cap) {
                break;
            }

            let airport = self.record(entry.record);
            if seen.contains(&airport.code) {
                continue;
            }

            let score = score_entry(entry, &lower);
            if score > HAS_IATA_BONUS {
                matched += 1;
            }
            if score > 0 {
                seen.insert(airport.code.clone());
                results.push(ScoredAirport {
                    airport: airport.clone(),
                    score,
                });
            }
        }

        // Stable: equal scores keep catalog order
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(options.limit);
        results
    }
}
