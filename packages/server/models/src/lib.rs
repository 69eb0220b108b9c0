#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the hotspot map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the analytics types so the query-string contract (comma-separated
//! lists, string-typed selections) can evolve independently.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use hotspot_map_analytics_models::FilterCriteria;
use hotspot_map_store::RecordStore;
use serde::{Deserialize, Serialize};

/// Splits a comma-separated list. An empty string yields an empty set, so
/// `?sources=` means "no sources" rather than "any source".
#[must_use]
pub fn parse_list(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds [`FilterCriteria`] from the shared query-string filter fields.
#[must_use]
pub fn filter_criteria(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    sources: Option<&str>,
    fuels: Option<&str>,
) -> FilterCriteria {
    FilterCriteria {
        min_date: from,
        max_date: to,
        sources: sources.map(parse_list),
        fuels: fuels.map(parse_list),
    }
}

/// Query parameters for the hotspots endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotQueryParams {
    /// First report day to include (`YYYY-MM-DD`).
    pub from: Option<NaiveDate>,
    /// Last report day to include (`YYYY-MM-DD`).
    pub to: Option<NaiveDate>,
    /// Comma-separated list of sources to include.
    pub sources: Option<String>,
    /// Comma-separated list of fuels to include.
    pub fuels: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
}

impl HotspotQueryParams {
    /// The filter described by these parameters.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        filter_criteria(
            self.from,
            self.to,
            self.sources.as_deref(),
            self.fuels.as_deref(),
        )
    }
}

/// Query parameters for the trend endpoint.
///
/// Selections are kept as strings so that unknown names are reported as an
/// invalid aggregation rather than a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQueryParams {
    /// `all` (default), `source` or `fuel`.
    pub group_by: Option<String>,
    /// `count`, `fwi`, `ros`, `hfi` or `estarea`.
    pub metric: String,
    /// `sum`, `mean` or `median`; required unless `metric` is `count`.
    pub aggregate: Option<String>,
    /// `zero` (default) or `omit`.
    pub empty_buckets: Option<String>,
    /// First report day to include.
    pub from: Option<NaiveDate>,
    /// Last report day to include.
    pub to: Option<NaiveDate>,
    /// Comma-separated list of sources to include.
    pub sources: Option<String>,
    /// Comma-separated list of fuels to include.
    pub fuels: Option<String>,
}

impl TrendQueryParams {
    /// The filter described by these parameters.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        filter_criteria(
            self.from,
            self.to,
            self.sources.as_deref(),
            self.fuels.as_deref(),
        )
    }
}

/// Query parameters for the totals endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsQueryParams {
    /// `source` or `fuel`.
    pub dimension: String,
    /// `count` (default), `fwi`, `ros`, `hfi` or `estarea`.
    pub metric: Option<String>,
    /// First report day to include.
    pub from: Option<NaiveDate>,
    /// Last report day to include.
    pub to: Option<NaiveDate>,
    /// Comma-separated list of sources to include.
    pub sources: Option<String>,
    /// Comma-separated list of fuels to include.
    pub fuels: Option<String>,
}

impl TotalsQueryParams {
    /// The filter described by these parameters.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        filter_criteria(
            self.from,
            self.to,
            self.sources.as_deref(),
            self.fuels.as_deref(),
        )
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Descriptive metadata about the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMetadata {
    /// Number of hotspots loaded.
    pub record_count: usize,
    /// Distinct sources in first-seen order.
    pub source_types: Vec<String>,
    /// Distinct fuels in first-seen order.
    pub fuel_types: Vec<String>,
    /// Earliest report day.
    pub min_date: NaiveDate,
    /// Latest report day.
    pub max_date: NaiveDate,
}

impl From<&RecordStore> for ApiMetadata {
    fn from(store: &RecordStore) -> Self {
        Self {
            record_count: store.len(),
            source_types: store.source_types().to_vec(),
            fuel_types: store.fuel_types().to_vec(),
            min_date: store.min_date(),
            max_date: store.max_date(),
        }
    }
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
