#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Wildfire hotspot record types.
//!
//! This crate defines the canonical shape of a single hotspot detection and
//! the closed sets of columns that queries may refer to: the continuous
//! severity [`Metric`]s and the categorical [`Dimension`]s. Selecting a
//! column by name goes through these enums, so an unknown column name is a
//! parse error at the boundary rather than a silently empty result.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A continuous severity metric carried by every hotspot record.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Metric {
    /// Fire Weather Index
    Fwi,
    /// Rate of Spread
    Ros,
    /// Head Fire Intensity
    Hfi,
    /// Estimated Area
    Estarea,
}

impl Metric {
    /// Returns the human-readable name of this metric.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fwi => "Fire Weather Index",
            Self::Ros => "Rate of Spread",
            Self::Hfi => "Head Fire Intensity",
            Self::Estarea => "Estimated Area",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fwi, Self::Ros, Self::Hfi, Self::Estarea]
    }
}

/// A categorical column that records can be filtered or grouped on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Dimension {
    /// Detecting sensor or network (e.g. `NASA_can`).
    Source,
    /// Fuel classification (e.g. `C2`, `water`, `non_fuel`).
    Fuel,
}

impl Dimension {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Source, Self::Fuel]
    }
}

/// A single hotspot detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotRecord {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// When the hotspot was reported.
    pub rep_date: NaiveDateTime,
    /// Detecting sensor or network.
    pub source: String,
    /// Fuel classification.
    pub fuel: String,
    /// Fire Weather Index.
    pub fwi: Option<f64>,
    /// Rate of spread.
    pub ros: Option<f64>,
    /// Head fire intensity.
    pub hfi: Option<f64>,
    /// Estimated burned area.
    pub estarea: Option<f64>,
}

impl HotspotRecord {
    /// Calendar day of the report, with the time of day discarded.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.rep_date.date()
    }

    /// Returns the value of `metric` for this record.
    ///
    /// Non-finite values are reported as missing.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        let value = match metric {
            Metric::Fwi => self.fwi,
            Metric::Ros => self.ros,
            Metric::Hfi => self.hfi,
            Metric::Estarea => self.estarea,
        };
        value.filter(|v| v.is_finite())
    }

    /// Returns the categorical value of `dimension` for this record.
    #[must_use]
    pub fn category(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Source => &self.source,
            Dimension::Fuel => &self.fuel,
        }
    }
}
