// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::Airport;
use crate::catalog::{Catalog, CatalogOrigin};

/// Major international airports compiled into the binary, used when every
/// configured source fails.
pub fn embedded_airports() -> Vec<Airport> {
    serde_json::from_str(include_str!("fallback_airports.json"))
        .expect("Failed to parse fallback_airports.json")
}

pub fn embedded_catalog() -> Catalog {
    Catalog::build(embedded_airports(), CatalogOrigin::Embedded)
}
