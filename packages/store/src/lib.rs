#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Immutable in-memory store of wildfire hotspot records.
//!
//! A [`RecordStore`] is built once from a combined hotspot CSV and never
//! mutated afterwards. Descriptive metadata (distinct sources and fuels, the
//! date extrema) is computed during construction. Reloading produces a new
//! store; [`StoreHandle`] swaps the shared reference so readers never see a
//! half-built table.

pub mod handle;
pub mod parsing;

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use hotspot_map_hotspot_models::{Dimension, HotspotRecord};

pub use handle::StoreHandle;

/// Path used when `HOTSPOTS_FILE` is not set.
pub const DEFAULT_HOTSPOTS_FILE: &str = "./hotspots.csv";

/// Columns every hotspot CSV must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "lat", "lon", "rep_date", "source", "fuel", "fwi", "ros", "hfi", "estarea",
];

/// Errors that make a CSV source unusable as a record store.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not well-formed delimited data.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one or more required columns.
    #[error("Missing required column(s): {}", columns.join(", "))]
    MissingColumns {
        /// Names of the absent columns.
        columns: Vec<String>,
    },

    /// A `rep_date` cell could not be parsed.
    #[error("Line {line}: invalid rep_date '{value}'")]
    InvalidDate {
        /// 1-based line number in the source.
        line: u64,
        /// The raw cell content.
        value: String,
    },

    /// A `lat` or `lon` cell is not a finite number.
    #[error("Line {line}: invalid {column} '{value}'")]
    InvalidCoordinate {
        /// 1-based line number in the source.
        line: u64,
        /// Column name (`lat` or `lon`).
        column: &'static str,
        /// The raw cell content.
        value: String,
    },
}

/// Errors that can occur while constructing a [`RecordStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The source could not be parsed into hotspot records.
    #[error("Data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// Parsing succeeded but produced no records.
    #[error("Dataset contains no hotspot records")]
    EmptyDataset,
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::DataLoad(DataLoadError::Io(e))
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        Self::DataLoad(DataLoadError::Csv(e))
    }
}

/// Resolves the hotspot CSV path from the `HOTSPOTS_FILE` environment
/// variable, falling back to [`DEFAULT_HOTSPOTS_FILE`].
#[must_use]
pub fn hotspots_file_from_env() -> PathBuf {
    std::env::var("HOTSPOTS_FILE")
        .map_or_else(|_| PathBuf::from(DEFAULT_HOTSPOTS_FILE), PathBuf::from)
}

/// Header positions of the required columns.
struct ColumnIndex {
    lat: usize,
    lon: usize,
    rep_date: usize,
    source: usize,
    fuel: usize,
    fwi: usize,
    ros: usize,
    hfi: usize,
    estarea: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataLoadError> {
        let names: Vec<&str> = headers.iter().map(str::trim).collect();
        let position = |column: &str| names.iter().position(|name| *name == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| position(*column).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(DataLoadError::MissingColumns { columns: missing });
        }

        let index = |column: &str| position(column).unwrap_or_default();
        Ok(Self {
            lat: index("lat"),
            lon: index("lon"),
            rep_date: index("rep_date"),
            source: index("source"),
            fuel: index("fuel"),
            fwi: index("fwi"),
            ros: index("ros"),
            hfi: index("hfi"),
            estarea: index("estarea"),
        })
    }

    fn parse_row(&self, row: &csv::StringRecord) -> Result<HotspotRecord, DataLoadError> {
        let line = row.position().map_or(0, csv::Position::line);
        let cell = |i: usize| row.get(i).unwrap_or("").trim();

        let coordinate = |i: usize, column: &'static str| {
            parsing::parse_coordinate(cell(i)).ok_or_else(|| DataLoadError::InvalidCoordinate {
                line,
                column,
                value: cell(i).to_string(),
            })
        };

        let rep_date =
            parsing::parse_rep_date(cell(self.rep_date)).ok_or_else(|| DataLoadError::InvalidDate {
                line,
                value: cell(self.rep_date).to_string(),
            })?;

        Ok(HotspotRecord {
            lat: coordinate(self.lat, "lat")?,
            lon: coordinate(self.lon, "lon")?,
            rep_date,
            source: cell(self.source).to_string(),
            fuel: cell(self.fuel).to_string(),
            fwi: parsing::parse_metric(cell(self.fwi)),
            ros: parsing::parse_metric(cell(self.ros)),
            hfi: parsing::parse_metric(cell(self.hfi)),
            estarea: parsing::parse_metric(cell(self.estarea)),
        })
    }
}

/// The loaded hotspot table plus metadata derived at load time.
///
/// There are no mutation methods; share it behind an `Arc` and rebuild to
/// reload.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<HotspotRecord>,
    source_types: Vec<String>,
    fuel_types: Vec<String>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl RecordStore {
    /// Loads a store from the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// * [`StoreError::DataLoad`] if the file cannot be read, is not valid
    ///   CSV, lacks a required column, or has an unparseable `rep_date` or
    ///   coordinate.
    /// * [`StoreError::EmptyDataset`] if the file has a header but no rows.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        log::info!("Loading hotspots from {}", path.display());
        let file = File::open(path)?;
        let store = Self::from_reader(file)?;
        log::info!(
            "Loaded {} hotspots ({} to {}, {} sources, {} fuels)",
            store.records.len(),
            store.min_date,
            store.max_date,
            store.source_types.len(),
            store.fuel_types.len()
        );
        Ok(store)
    }

    /// Loads a store from any reader producing comma-delimited text with a
    /// header row.
    ///
    /// # Errors
    ///
    /// Same as [`RecordStore::load`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(reader.headers()?)?;

        let mut records = Vec::new();
        for row in reader.records() {
            records.push(columns.parse_row(&row?)?);
        }

        Self::from_records(records)
    }

    /// Builds a store from already-parsed records, computing the metadata.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyDataset`] if `records` is empty.
    pub fn from_records(records: Vec<HotspotRecord>) -> Result<Self, StoreError> {
        let (Some(min_date), Some(max_date)) = (
            records.iter().map(HotspotRecord::day).min(),
            records.iter().map(HotspotRecord::day).max(),
        ) else {
            return Err(StoreError::EmptyDataset);
        };

        let source_types = distinct_in_order(records.iter().map(|r| r.source.as_str()));
        let fuel_types = distinct_in_order(records.iter().map(|r| r.fuel.as_str()));

        Ok(Self {
            records,
            source_types,
            fuel_types,
            min_date,
            max_date,
        })
    }

    /// All records, in load order.
    #[must_use]
    pub fn records(&self) -> &[HotspotRecord] {
        &self.records
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a successfully constructed store.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct `source` values in first-seen order.
    #[must_use]
    pub fn source_types(&self) -> &[String] {
        &self.source_types
    }

    /// Distinct `fuel` values in first-seen order.
    #[must_use]
    pub fn fuel_types(&self) -> &[String] {
        &self.fuel_types
    }

    /// Distinct values of `dimension` in first-seen order.
    #[must_use]
    pub fn categories(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Source => &self.source_types,
            Dimension::Fuel => &self.fuel_types,
        }
    }

    /// Earliest report day.
    #[must_use]
    pub const fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Latest report day.
    #[must_use]
    pub const fn max_date(&self) -> NaiveDate {
        self.max_date
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
