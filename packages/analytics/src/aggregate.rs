//! Time-bucketed aggregation of a filtered view.
//!
//! Records are partitioned by the group-by key (groups appear in the order
//! their first record appears in the view), then bucketed by calendar day of
//! `rep_date`. Each bucket is reduced to a single value:
//!
//! * `count` is the number of records in the bucket; the aggregate
//!   function is ignored.
//! * Any metric is reduced with the requested aggregate function over the
//!   bucket's valid values. Missing values are excluded, not treated as
//!   zero. A bucket whose records all lack the metric reports `0` under
//!   [`EmptyBucketPolicy::Zero`] (the default) or is dropped under
//!   [`EmptyBucketPolicy::Omit`].
//!
//! Only days with at least one record in the group produce a point; no
//! synthetic days are inserted between observations.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use hotspot_map_analytics_models::{
    ALL_GROUP, AggregateFn, EmptyBucketPolicy, GroupBy, TimeSeries, TimeSeriesPoint, TrendParams,
    TrendResult, ValueColumn,
};
use hotspot_map_hotspot_models::Metric;

use crate::filter::FilteredView;
use crate::{AnalyticsError, stats};

/// Parses string selections (as received from a UI or query string) into
/// validated [`TrendParams`].
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidAggregation`] if any name is unknown, or
/// if `value` is a metric and `aggregate` is `None`. The aggregate name is
/// only validated for metrics; `count` ignores it.
pub fn parse_trend_params(
    group_by: &str,
    value: &str,
    aggregate: Option<&str>,
) -> Result<TrendParams, AnalyticsError> {
    let group_by: GroupBy = group_by
        .parse()
        .map_err(|_| invalid(format!("unknown group-by column '{group_by}'")))?;
    let value: ValueColumn = value
        .parse()
        .map_err(|_| invalid(format!("unknown metric '{value}'")))?;
    // `count` ignores the aggregate function, so a stale name is not checked.
    let aggregate = match (value.metric(), aggregate) {
        (Some(_), Some(name)) => Some(
            name.parse::<AggregateFn>()
                .map_err(|_| invalid(format!("unknown aggregate function '{name}'")))?,
        ),
        _ => None,
    };

    let params = TrendParams {
        group_by,
        value,
        aggregate,
        empty_buckets: EmptyBucketPolicy::default(),
    };
    Reducer::for_params(&params)?;
    Ok(params)
}

/// Aggregates `view` into one daily time series per group.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidAggregation`] if `params.value` is a
/// metric and no aggregate function was given. Nothing is computed in that
/// case.
pub fn aggregate(
    view: &FilteredView<'_>,
    params: &TrendParams,
) -> Result<TrendResult, AnalyticsError> {
    let reducer = Reducer::for_params(params)?;

    let mut groups: Vec<(String, BTreeMap<NaiveDate, Bucket>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in view.records() {
        let label = params
            .group_by
            .dimension()
            .map_or(ALL_GROUP, |dimension| record.category(dimension));

        let position = *positions.entry(label).or_insert_with(|| {
            groups.push((label.to_string(), BTreeMap::new()));
            groups.len() - 1
        });

        let bucket = groups[position].1.entry(record.day()).or_default();
        bucket.count += 1;
        if let Reducer::Metric(metric, _) = reducer
            && let Some(value) = record.metric(metric)
        {
            bucket.values.push(value);
        }
    }

    let series: Vec<TimeSeries> = groups
        .into_iter()
        .map(|(group, buckets)| TimeSeries {
            group,
            points: buckets
                .into_iter()
                .filter_map(|(date, mut bucket)| {
                    reducer
                        .reduce(&mut bucket, params.empty_buckets)
                        .map(|value| TimeSeriesPoint { date, value })
                })
                .collect(),
        })
        .collect();

    log::debug!(
        "Aggregated {} hotspots into {} series ({} by {})",
        view.len(),
        series.len(),
        params.value,
        params.group_by
    );

    Ok(TrendResult { series })
}

fn invalid(message: String) -> AnalyticsError {
    AnalyticsError::InvalidAggregation { message }
}

/// Records falling on one calendar day within one group.
#[derive(Debug, Default)]
struct Bucket {
    count: usize,
    values: Vec<f64>,
}

#[derive(Debug, Clone, Copy)]
enum Reducer {
    Count,
    Metric(Metric, AggregateFn),
}

impl Reducer {
    fn for_params(params: &TrendParams) -> Result<Self, AnalyticsError> {
        match (params.value.metric(), params.aggregate) {
            (None, _) => Ok(Self::Count),
            (Some(metric), Some(f)) => Ok(Self::Metric(metric, f)),
            (Some(metric), None) => Err(invalid(format!(
                "an aggregate function (sum, mean or median) is required for metric '{metric}'"
            ))),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn reduce(self, bucket: &mut Bucket, policy: EmptyBucketPolicy) -> Option<f64> {
        match self {
            Self::Count => Some(bucket.count as f64),
            Self::Metric(_, f) => match stats::apply(f, &mut bucket.values) {
                Some(value) => Some(value),
                None => match policy {
                    EmptyBucketPolicy::Zero => Some(0.0),
                    EmptyBucketPolicy::Omit => None,
                },
            },
        }
    }
}
