// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};

pub const DEFAULT_AIRPORT_TYPE: &str = "airport";

fn default_airport_type() -> String {
    DEFAULT_AIRPORT_TYPE.to_string()
}

/// Canonical airport record shared by every source format.
///
/// `code` is always `iata` when present, otherwise `icao`. Records that carry
/// neither code, or whose coordinates are not finite, never get built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    pub country: String,
    pub code: String,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub altitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "type", default = "default_airport_type")]
    pub airport_type: String,
}

impl Airport {
    pub fn has_iata(&self) -> bool {
        self.iata.is_some()
    }

    /// Display label in the "CODE - Name (City, Country)" form the CLI prints.
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({}, {})",
            self.code, self.name, self.city, self.country
        )
    }
}

/// A search hit: an owned copy of the record plus its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAirport {
    #[serde(flatten)]
    pub airport: Airport,
    pub score: u32,
}

impl ScoredAirport {
    pub fn code(&self) -> &str {
        &self.airport.code
    }
}
