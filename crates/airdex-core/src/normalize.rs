// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::airport::{Airport, DEFAULT_AIRPORT_TYPE};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Raw tabular layouts a source can declare. Chosen by the source descriptor,
/// never sniffed from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawFormat {
    /// Fixed-position rows without a header (OpenFlights `airports.dat`).
    Positional,
    /// Header row followed by named columns (OurAirports `airports.csv`).
    Headed,
}

/// Marker the positional format uses for an absent field.
pub const ABSENT_SENTINEL: &str = "\\N";

const MIN_HEADED_FIELDS: usize = 10;

// Positional column layout:
// 0 id, 1 name, 2 city, 3 country, 4 IATA, 5 ICAO, 6 lat, 7 lng, 8 altitude,
// 9 timezone, 10 DST, 11 tz database, 12 type, 13 source
const COL_ID: usize = 0;
const COL_NAME: usize = 1;
const COL_CITY: usize = 2;
const COL_COUNTRY: usize = 3;
const COL_IATA: usize = 4;
const COL_ICAO: usize = 5;
const COL_LAT: usize = 6;
const COL_LNG: usize = 7;
const COL_ALTITUDE: usize = 8;
const COL_TIMEZONE: usize = 9;
const COL_TYPE: usize = 12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowRejection {
    #[error("row has neither an IATA nor an ICAO code")]
    MissingCode,
    #[error("invalid {field}: {value:?}")]
    InvalidCoordinate { field: &'static str, value: String },
    #[error("row has {found} fields, expected at least {expected}")]
    TooFewFields { found: usize, expected: usize },
    #[error("unreadable row: {0}")]
    Unreadable(String),
}

/// Outcome of normalizing one raw feed.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    pub airports: Vec<Airport>,
    pub rejected: usize,
}

impl NormalizeReport {
    fn accept(&mut self, result: Result<Airport, RowRejection>, line: u64) {
        match result {
            Ok(airport) => self.airports.push(airport),
            Err(reason) => {
                debug!("Dropping airport row — line={} reason={}", line, reason);
                self.rejected += 1;
            }
        }
    }
}

/// Normalizes raw text in the given layout. Malformed rows are dropped and
/// counted; the batch itself never fails.
pub fn normalize(format: RawFormat, text: &str) -> NormalizeReport {
    match format {
        RawFormat::Positional => parse_positional(text),
        RawFormat::Headed => parse_headed(text),
    }
}

pub fn parse_positional(text: &str) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (index, result) in reader(text).records().enumerate() {
        let line = index as u64 + 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                report.accept(Err(RowRejection::Unreadable(e.to_string())), line);
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }

        let builder = AirportBuilder {
            id: record.get(COL_ID),
            name: record.get(COL_NAME),
            city: record.get(COL_CITY),
            country: record.get(COL_COUNTRY),
            iata: record.get(COL_IATA),
            icao: record.get(COL_ICAO),
            lat: record.get(COL_LAT),
            lng: record.get(COL_LNG),
            altitude: record.get(COL_ALTITUDE),
            timezone: record.get(COL_TIMEZONE),
            airport_type: record.get(COL_TYPE),
        };
        report.accept(builder.build(), line);
    }

    report
}

pub fn parse_headed(text: &str) -> NormalizeReport {
    let mut report = NormalizeReport::default();
    let mut records = reader(text).into_records();

    // The first non-blank row names the columns.
    let header: Vec<String> = loop {
        match records.next() {
            Some(Ok(record)) if is_blank(&record) => continue,
            Some(Ok(record)) => break record.iter().map(str::to_string).collect(),
            Some(Err(e)) => {
                debug!("Unreadable header row — reason={}", e);
                return report;
            }
            None => return report,
        }
    };

    for (index, result) in records.enumerate() {
        let line = index as u64 + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                report.accept(Err(RowRejection::Unreadable(e.to_string())), line);
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }
        if record.len() < MIN_HEADED_FIELDS {
            report.accept(
                Err(RowRejection::TooFewFields {
                    found: record.len(),
                    expected: MIN_HEADED_FIELDS,
                }),
                line,
            );
            continue;
        }

        let row = RawRow::from_record(&header, &record);
        report.accept(Airport::try_from(&row), line);
    }

    report
}

fn reader(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes())
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

/// One header-based row as column name → value, before validation.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn from_record(header: &[String], record: &StringRecord) -> Self {
        let fields = header
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

impl TryFrom<&RawRow> for Airport {
    type Error = RowRejection;

    fn try_from(row: &RawRow) -> Result<Self, Self::Error> {
        AirportBuilder {
            id: row.get("id"),
            name: row.get("name"),
            city: row.get("municipality"),
            country: row.get("iso_country"),
            iata: row.get("iata_code"),
            icao: row.get("ident"),
            lat: row.get("latitude_deg"),
            lng: row.get("longitude_deg"),
            altitude: row.get("elevation_ft"),
            timezone: None,
            airport_type: row.get("type"),
        }
        .build()
    }
}

/// Borrowed field values gathered from either layout.
struct AirportBuilder<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
    city: Option<&'a str>,
    country: Option<&'a str>,
    iata: Option<&'a str>,
    icao: Option<&'a str>,
    lat: Option<&'a str>,
    lng: Option<&'a str>,
    altitude: Option<&'a str>,
    timezone: Option<&'a str>,
    airport_type: Option<&'a str>,
}

impl AirportBuilder<'_> {
    fn build(self) -> Result<Airport, RowRejection> {
        let iata = present(self.iata);
        let icao = present(self.icao);
        let code = match iata.as_ref().or(icao.as_ref()) {
            Some(code) => code.clone(),
            None => return Err(RowRejection::MissingCode),
        };

        let lat = parse_coordinate("latitude", self.lat)?;
        let lng = parse_coordinate("longitude", self.lng)?;
        let altitude = self
            .altitude
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|a| a.is_finite())
            .unwrap_or(0.0);

        let name = present(self.name).unwrap_or_default();
        let city = present(self.city).unwrap_or_else(|| name.clone());

        Ok(Airport {
            id: present(self.id),
            city,
            country: present(self.country).unwrap_or_default(),
            code,
            iata,
            icao,
            lat,
            lng,
            altitude,
            timezone: present(self.timezone),
            airport_type: present(self.airport_type)
                .unwrap_or_else(|| DEFAULT_AIRPORT_TYPE.to_string()),
            name,
        })
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != ABSENT_SENTINEL)
        .map(str::to_string)
}

fn parse_coordinate(field: &'static str, value: Option<&str>) -> Result<f64, RowRejection> {
    let raw = value.unwrap_or_default();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowRejection::InvalidCoordinate {
            field,
            value: raw.to_string(),
        })
}
