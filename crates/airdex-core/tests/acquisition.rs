// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Source acquisition: ordered fallback across sources, embedded dataset on
// total failure, and single-flight loading under concurrency.

use airdex_core::{
    AirportDb, CatalogOrigin, RawFormat, SourceDescriptor, SourceError, TextFetcher,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const OPENFLIGHTS_ROWS: &str = r#"3484,"Los Angeles International Airport","Los Angeles","United States","LAX","KLAX",33.94250107,-118.4079971,125,-8,"A","America/Los_Angeles","airport","OurAirports"
3797,"John F Kennedy International Airport","New York","United States","JFK","KJFK",40.63980103,-73.77890015,13,-5,"A","America/New_York","airport","OurAirports"
"#;

const OURAIRPORTS_ROWS: &str = r#"id,ident,type,name,latitude_deg,longitude_deg,elevation_ft,continent,iso_country,iso_region,municipality,scheduled_service,gps_code,iata_code,local_code
2434,EGLL,large_airport,London Heathrow Airport,51.4706,-0.461941,83,EU,GB,GB-ENG,London,yes,EGLL,LHR,
"#;

/// Serves canned responses by source name and counts every fetch.
#[derive(Clone, Default)]
struct ScriptedFetcher {
    responses: Arc<Mutex<HashMap<String, Option<String>>>>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl ScriptedFetcher {
    fn respond(self, name: &str, body: Option<&str>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(name.to_string(), body.map(str::to_string));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextFetcher for ScriptedFetcher {
    fn fetch_text(&self, source: &SourceDescriptor) -> Result<String, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        match self.responses.lock().unwrap().get(&source.name) {
            Some(Some(body)) => Ok(body.clone()),
            _ => Err(SourceError::Status(404)),
        }
    }
}

fn sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::url(
            "openflights",
            "https://example.invalid/airports.dat",
            RawFormat::Positional,
        ),
        SourceDescriptor::url(
            "ourairports",
            "https://example.invalid/airports.csv",
            RawFormat::Headed,
        ),
    ]
}

#[test]
fn test_first_working_source_wins() {
    let fetcher = ScriptedFetcher::default()
        .respond("openflights", Some(OPENFLIGHTS_ROWS))
        .respond("ourairports", Some(OURAIRPORTS_ROWS));
    let db = AirportDb::new(sources(), fetcher.clone());

    let catalog = db.load();

    assert_eq!(catalog.origin(), &CatalogOrigin::Remote("openflights".to_string()));
    assert_eq!(catalog.len(), 2);
    assert_eq!(fetcher.calls(), 1, "Later sources must not be tried");
}

#[test]
fn test_failed_source_falls_through_to_next() {
    let fetcher = ScriptedFetcher::default()
        .respond("openflights", None)
        .respond("ourairports", Some(OURAIRPORTS_ROWS));
    let db = AirportDb::new(sources(), fetcher.clone());

    let catalog = db.load();

    assert_eq!(catalog.origin(), &CatalogOrigin::Remote("ourairports".to_string()));
    assert_eq!(db.get_by_code("lhr").unwrap().icao.as_deref(), Some("EGLL"));
    assert_eq!(fetcher.calls(), 2);
}

#[test]
fn test_source_without_usable_rows_falls_through() {
    let fetcher = ScriptedFetcher::default()
        .respond("openflights", Some("<html>rate limited</html>\n"))
        .respond("ourairports", Some(OURAIRPORTS_ROWS));
    let db = AirportDb::new(sources(), fetcher);

    assert_eq!(
        db.load().origin(),
        &CatalogOrigin::Remote("ourairports".to_string())
    );
}

#[test]
fn test_all_sources_failed_uses_embedded_dataset() {
    let fetcher = ScriptedFetcher::default();
    let db = AirportDb::new(sources(), fetcher.clone());

    let catalog = db.load();

    assert!(db.is_loaded());
    assert!(!catalog.is_empty());
    assert_eq!(catalog.origin(), &CatalogOrigin::Embedded);
    assert_eq!(fetcher.calls(), 2, "Each source is tried exactly once");
    assert_eq!(db.get_by_code("PEK").unwrap().icao.as_deref(), Some("ZBAA"));
}

#[test]
fn test_no_sources_uses_embedded_dataset() {
    let db = AirportDb::new(Vec::new(), ScriptedFetcher::default());

    assert_eq!(db.load().origin(), &CatalogOrigin::Embedded);
}

#[test]
fn test_concurrent_loads_share_one_acquisition() {
    let fetcher = ScriptedFetcher {
        delay: Duration::from_millis(50),
        ..ScriptedFetcher::default()
    }
    .respond("openflights", Some(OPENFLIGHTS_ROWS));
    let db = AirportDb::new(sources(), fetcher.clone());

    let catalogs: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| db.load())).collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(fetcher.calls(), 1, "Only one fetch may run");
    for catalog in &catalogs {
        assert!(Arc::ptr_eq(catalog, &catalogs[0]));
    }
}

#[test]
fn test_reload_publishes_new_snapshot() {
    let fetcher = ScriptedFetcher::default().respond("openflights", Some(OPENFLIGHTS_ROWS));
    let db = AirportDb::new(sources(), fetcher.clone());

    let before = db.load();
    assert_eq!(before.len(), 2);

    // Upstream grows a row between loads
    let grown = format!(
        "{}{}",
        OPENFLIGHTS_ROWS,
        r#"507,"London Heathrow Airport","London","United Kingdom","LHR","EGLL",51.4706,-0.461941,83,0,"E","Europe/London","airport","OurAirports""#
    );
    let fetcher = fetcher.respond("openflights", Some(&grown));

    // Still memoized until an explicit reload
    assert_eq!(db.load().len(), 2);

    let after = db.reload();
    assert_eq!(after.len(), 3);
    assert_eq!(db.load().len(), 3);
    assert_eq!(before.len(), 2, "Old snapshot stays intact for its holders");
    assert_eq!(fetcher.calls(), 2);
}
