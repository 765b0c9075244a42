//! Airline reference table: ICAO designator -> name, name -> radio callsign.
//!
//! The bundled table lives in `data/airlines.csv` and is compiled into the
//! binary. A different table with the same `name,icao,callsign` columns can be
//! loaded from disk through [`AirlineDirectory::from_path`].

use crate::errors::AirlineError;
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{error, info, warn};

/// Returned by [`AirlineDirectory::lookup_by_icao`] for unknown designators.
pub const PRIVATE_AIRCRAFT: &str = "private aircraft";

const EMBEDDED_TABLE: &str = include_str!("../data/airlines.csv");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirlineRecord {
    pub name: String,
    pub icao_code: String,
    pub callsign_word: String,
}

#[derive(Debug, Clone, Default)]
pub struct AirlineDirectory {
    records: Vec<AirlineRecord>,
    by_icao: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl AirlineDirectory {
    /// The table shipped with the binary.
    pub fn embedded() -> Self {
        match Self::from_reader(EMBEDDED_TABLE.as_bytes()) {
            Ok(dir) => dir,
            Err(e) => {
                error!("Embedded airline table is unreadable: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AirlineError> {
        let rdr = ReaderBuilder::new().flexible(true).from_path(path.as_ref())?;
        let dir = Self::from_csv(rdr)?;
        info!(
            "Loaded {} airlines from '{}'",
            dir.len(),
            path.as_ref().display()
        );
        Ok(dir)
    }

    /// Uses `path` when given, falling back to the embedded table if it can't be read.
    pub fn load(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::from_path(p).unwrap_or_else(|e| {
                warn!("Failed to load airline table from '{}': {}. Using built-in table.", p, e);
                Self::embedded()
            }),
            None => Self::embedded(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AirlineError> {
        let rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        Self::from_csv(rdr)
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self, AirlineError> {
        let headers = rdr.headers()?.clone();

        // Helper to find column index case-insensitively
        let find_col = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').trim().eq_ignore_ascii_case(name))
        };
        let (Some(name_idx), Some(icao_idx), Some(call_idx)) =
            (find_col("name"), find_col("icao"), find_col("callsign"))
        else {
            warn!("Airline table missing name/icao/callsign columns. Headers found: {:?}", headers);
            return Ok(Self::default());
        };

        let mut dir = Self::default();
        for result in rdr.records() {
            let record = result?;
            let get = |i: usize| record.get(i).unwrap_or("").trim().to_string();

            let entry = AirlineRecord {
                name: get(name_idx),
                icao_code: get(icao_idx).to_ascii_uppercase(),
                callsign_word: get(call_idx),
            };
            if entry.name.is_empty() || entry.icao_code.len() != 3 {
                continue;
            }
            dir.insert(entry);
        }
        Ok(dir)
    }

    fn insert(&mut self, record: AirlineRecord) {
        let idx = self.records.len();
        self.by_icao.entry(record.icao_code.clone()).or_insert(idx);
        self.by_name.entry(record.name.to_lowercase()).or_insert(idx);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get_by_icao(&self, tld: &str) -> Option<&AirlineRecord> {
        self.by_icao
            .get(&tld.trim().to_ascii_uppercase())
            .map(|&i| &self.records[i])
    }

    /// Airline name for a 3-letter designator, or [`PRIVATE_AIRCRAFT`].
    pub fn lookup_by_icao(&self, tld: &str) -> &str {
        self.get_by_icao(tld)
            .map(|r| r.name.as_str())
            .unwrap_or(PRIVATE_AIRCRAFT)
    }

    /// Radio callsign word for an airline name, or `""` when unknown.
    pub fn lookup_callsign_word(&self, airline_name: &str) -> &str {
        self.by_name
            .get(&airline_name.trim().to_lowercase())
            .map(|&i| self.records[i].callsign_word.as_str())
            .unwrap_or("")
    }
}

/// The airline designator at the front of a callsign, e.g. `UAL` in `UAL123`.
///
/// Registration-style callsigns (`N123AB`) and bare designators yield `None`.
pub fn icao_prefix(callsign: &str) -> Option<&str> {
    let callsign = callsign.trim();
    let prefix = callsign.get(..3)?;
    if callsign.len() > 3 && prefix.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(prefix)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_lookups() {
        let dir = AirlineDirectory::embedded();
        assert!(dir.len() > 100);
        assert_eq!(dir.lookup_by_icao("UAL"), "United Airlines");
        assert_eq!(dir.lookup_by_icao("baw"), "British Airways");
        assert_eq!(dir.lookup_callsign_word("British Airways"), "SPEEDBIRD");
        assert_eq!(dir.lookup_callsign_word("delta air lines"), "DELTA");
    }

    #[test]
    fn unknown_keys() {
        let dir = AirlineDirectory::embedded();
        assert_eq!(dir.lookup_by_icao("ZZZ"), PRIVATE_AIRCRAFT);
        assert_eq!(dir.lookup_callsign_word("Nonexistent Air"), "");
    }

    #[test]
    fn custom_table_from_reader() {
        let csv = "Name,ICAO,Callsign\nTest Air,tst,TESTER\nBroken,TOOLONG,NOPE\n";
        let dir = AirlineDirectory::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.lookup_by_icao("TST"), "Test Air");
        assert_eq!(dir.lookup_callsign_word("Test Air"), "TESTER");
    }

    #[test]
    fn missing_columns_give_empty_table() {
        let dir = AirlineDirectory::from_reader("a,b\n1,2\n".as_bytes()).unwrap();
        assert!(dir.is_empty());
    }

    #[test]
    fn callsign_prefixes() {
        assert_eq!(icao_prefix("UAL123 "), Some("UAL"));
        assert_eq!(icao_prefix("N123AB"), None);
        assert_eq!(icao_prefix("DLH"), None);
        assert_eq!(icao_prefix(""), None);
    }
}
