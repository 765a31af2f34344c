// src/record.rs
use serde::Serialize;

use crate::config::consts::LINE_JOIN;
use crate::error::Result;
use crate::geo::{self, Coordinates};

/// Fields pulled from one result page, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResult {
    pub howmany: String,
    pub zipcode: String,
    /// First three map-link parameters, quotes stripped.
    pub positions: [String; 3],
    pub new_eng: Vec<String>,
    pub old_eng: Vec<String>,
    pub new_kor: Vec<String>,
    pub old_kor: Vec<String>,
}

impl RawResult {
    /// Latitude comes from the third parameter, longitude from the second.
    pub fn coordinates(&self) -> Result<Coordinates> {
        Ok(geo::from_tokens(&self.positions[2], &self.positions[1])?)
    }
}

/// One output unit per query, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub searched: String,
    pub howmany: String,
    pub zipcode: String,
    pub new_eng: Vec<String>,
    pub old_eng: Vec<String>,
    pub new_kor: Vec<String>,
    pub old_kor: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Raw map-link parameters, for the verbose dump only.
    #[serde(skip)]
    pub positions: Vec<String>,
}

impl Record {
    pub fn from_raw(searched: &str, raw: RawResult, at: Coordinates) -> Self {
        let positions = raw.positions.to_vec();
        Self {
            searched: s!(searched),
            howmany: raw.howmany,
            zipcode: raw.zipcode,
            new_eng: raw.new_eng,
            old_eng: raw.old_eng,
            new_kor: raw.new_kor,
            old_kor: raw.old_kor,
            latitude: Some(at.latitude),
            longitude: Some(at.longitude),
            error: None,
            positions,
        }
    }

    /// Placeholder for a query whose page could not be read (skip policy).
    pub fn failed(searched: &str, reason: String) -> Self {
        Self {
            searched: s!(searched),
            howmany: s!(),
            zipcode: s!(),
            new_eng: Vec::new(),
            old_eng: Vec::new(),
            new_kor: Vec::new(),
            old_kor: Vec::new(),
            latitude: None,
            longitude: None,
            error: Some(reason),
            positions: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The nine flat-output cells, in fixed order.
    pub fn flat_cells(&self) -> [String; 9] {
        [
            self.searched.clone(),
            self.howmany.clone(),
            self.zipcode.clone(),
            self.new_eng.join(LINE_JOIN),
            self.old_eng.join(LINE_JOIN),
            self.new_kor.join(LINE_JOIN),
            self.old_kor.join(LINE_JOIN),
            self.latitude.map(|v| v.to_string()).unwrap_or_default(),
            self.longitude.map(|v| v.to_string()).unwrap_or_default(),
        ]
    }
}
