#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query parameter and result types for hotspot analytics.
//!
//! Defines the filter criteria, the closed set of grouping/value/aggregate
//! selections accepted by the trend aggregation, and the time-series shapes
//! it returns.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use hotspot_map_hotspot_models::{Dimension, Metric};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Label of the single series produced when no grouping is requested.
pub const ALL_GROUP: &str = "all";

/// Independent, optional predicates applied with logical AND.
///
/// `None` means "no constraint". For the category sets, `Some` of an empty
/// set is a real constraint that no record can satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Earliest report day to include (inclusive).
    pub min_date: Option<NaiveDate>,
    /// Latest report day to include (inclusive).
    pub max_date: Option<NaiveDate>,
    /// Allowed `source` values.
    pub sources: Option<BTreeSet<String>>,
    /// Allowed `fuel` values.
    pub fuels: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    /// Criteria that accept every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the inclusive lower date bound.
    #[must_use]
    pub const fn with_min_date(mut self, date: NaiveDate) -> Self {
        self.min_date = Some(date);
        self
    }

    /// Sets the inclusive upper date bound.
    #[must_use]
    pub const fn with_max_date(mut self, date: NaiveDate) -> Self {
        self.max_date = Some(date);
        self
    }

    /// Restricts records to the given sources.
    #[must_use]
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts records to the given fuels.
    #[must_use]
    pub fn with_fuels<I, S>(mut self, fuels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fuels = Some(fuels.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the allowed values for `dimension`, if constrained.
    #[must_use]
    pub const fn allowed(&self, dimension: Dimension) -> Option<&BTreeSet<String>> {
        match dimension {
            Dimension::Source => self.sources.as_ref(),
            Dimension::Fuel => self.fuels.as_ref(),
        }
    }

    /// Returns criteria equivalent to applying `self` and then `other`.
    #[must_use]
    pub fn and(&self, other: &Self) -> Self {
        fn tighter<T: Copy + Ord>(a: Option<T>, b: Option<T>, pick: fn(T, T) -> T) -> Option<T> {
            match (a, b) {
                (Some(a), Some(b)) => Some(pick(a, b)),
                (a, b) => a.or(b),
            }
        }

        fn intersect(
            a: Option<&BTreeSet<String>>,
            b: Option<&BTreeSet<String>>,
        ) -> Option<BTreeSet<String>> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a.intersection(b).cloned().collect()),
                (a, b) => a.or(b).cloned(),
            }
        }

        Self {
            min_date: tighter(self.min_date, other.min_date, Ord::max),
            max_date: tighter(self.max_date, other.max_date, Ord::min),
            sources: intersect(self.sources.as_ref(), other.sources.as_ref()),
            fuels: intersect(self.fuels.as_ref(), other.fuels.as_ref()),
        }
    }
}

/// Categorical key used to split records into separate series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// A single series over every record.
    #[default]
    #[serde(alias = "none")]
    #[strum(to_string = "all", serialize = "none")]
    All,
    /// One series per `source` value.
    #[strum(to_string = "source")]
    Source,
    /// One series per `fuel` value.
    #[strum(to_string = "fuel")]
    Fuel,
}

impl GroupBy {
    /// The categorical column this grouping reads, if any.
    #[must_use]
    pub const fn dimension(self) -> Option<Dimension> {
        match self {
            Self::All => None,
            Self::Source => Some(Dimension::Source),
            Self::Fuel => Some(Dimension::Fuel),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::All, Self::Source, Self::Fuel]
    }
}

impl From<Dimension> for GroupBy {
    fn from(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Source => Self::Source,
            Dimension::Fuel => Self::Fuel,
        }
    }
}

/// The quantity measured in each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum ValueColumn {
    /// Number of hotspots in the bucket.
    #[serde(alias = "hotspots")]
    #[strum(to_string = "count", serialize = "hotspots")]
    Count,
    /// Fire Weather Index.
    #[strum(to_string = "fwi")]
    Fwi,
    /// Rate of spread.
    #[strum(to_string = "ros")]
    Ros,
    /// Head fire intensity.
    #[strum(to_string = "hfi")]
    Hfi,
    /// Estimated area.
    #[strum(to_string = "estarea")]
    Estarea,
}

impl ValueColumn {
    /// The severity metric read by this value, or `None` for [`Self::Count`].
    #[must_use]
    pub const fn metric(self) -> Option<Metric> {
        match self {
            Self::Count => None,
            Self::Fwi => Some(Metric::Fwi),
            Self::Ros => Some(Metric::Ros),
            Self::Hfi => Some(Metric::Hfi),
            Self::Estarea => Some(Metric::Estarea),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.metric() {
            None => "Number of Hotspots",
            Some(metric) => metric.label(),
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Count, Self::Estarea, Self::Fwi, Self::Ros, Self::Hfi]
    }
}

impl From<Metric> for ValueColumn {
    fn from(metric: Metric) -> Self {
        metric_column(metric)
    }
}

/// Function applied to the valid metric values of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AggregateFn {
    /// Sum of values.
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Interpolated median (mean of the two middle values for even counts).
    Median,
}

impl AggregateFn {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Sum, Self::Mean, Self::Median]
    }
}

/// What to report for a bucket whose records all lack the metric.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmptyBucketPolicy {
    /// Report the bucket with a value of `0`.
    #[default]
    Zero,
    /// Leave the day out of the series.
    Omit,
}

/// Parameters for a trend aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendParams {
    /// Grouping key.
    #[serde(default)]
    pub group_by: GroupBy,
    /// Quantity to aggregate.
    pub value: ValueColumn,
    /// Aggregate function. Required unless `value` is `count`.
    pub aggregate: Option<AggregateFn>,
    /// Treatment of buckets with no valid metric values.
    #[serde(default)]
    pub empty_buckets: EmptyBucketPolicy,
}

impl TrendParams {
    /// Daily hotspot counts, optionally grouped.
    #[must_use]
    pub const fn count(group_by: GroupBy) -> Self {
        Self {
            group_by,
            value: ValueColumn::Count,
            aggregate: None,
            empty_buckets: EmptyBucketPolicy::Zero,
        }
    }

    /// Daily `aggregate` of `metric`, optionally grouped.
    #[must_use]
    pub const fn metric(group_by: GroupBy, metric: Metric, aggregate: AggregateFn) -> Self {
        Self {
            group_by,
            value: metric_column(metric),
            aggregate: Some(aggregate),
            empty_buckets: EmptyBucketPolicy::Zero,
        }
    }

    /// Replaces the empty-bucket policy.
    #[must_use]
    pub const fn with_empty_buckets(mut self, policy: EmptyBucketPolicy) -> Self {
        self.empty_buckets = policy;
        self
    }
}

const fn metric_column(metric: Metric) -> ValueColumn {
    match metric {
        Metric::Fwi => ValueColumn::Fwi,
        Metric::Ros => ValueColumn::Ros,
        Metric::Hfi => ValueColumn::Hfi,
        Metric::Estarea => ValueColumn::Estarea,
    }
}

/// One day of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Calendar day.
    pub date: NaiveDate,
    /// Aggregated value for the day.
    pub value: f64,
}

/// A date-ascending series for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    /// Group label: a category value, or [`ALL_GROUP`].
    pub group: String,
    /// Points sorted ascending by date, one per observed day.
    pub points: Vec<TimeSeriesPoint>,
}

/// Result of a trend aggregation: one series per group, in first-seen
/// group order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    /// Series in first-seen group order.
    pub series: Vec<TimeSeries>,
}

impl TrendResult {
    /// Looks up the series for `group`.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.group == group)
    }

    /// Group labels in order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.group.as_str())
    }

    /// Number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether there are no series (the input view was empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Total of a value over one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotal {
    /// Category value.
    pub group: String,
    /// Record count or metric sum.
    pub value: f64,
}
