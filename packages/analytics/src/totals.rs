//! Per-category totals over a filtered view.

use std::collections::HashMap;

use hotspot_map_analytics_models::{GroupTotal, ValueColumn};
use hotspot_map_hotspot_models::Dimension;

use crate::filter::FilteredView;

/// Totals `value` per distinct `dimension` value in `view`, in first-seen
/// order.
///
/// `count` totals the records in each category; a metric totals the valid
/// values (a category with none totals `0`).
#[must_use]
pub fn group_totals(
    view: &FilteredView<'_>,
    dimension: Dimension,
    value: ValueColumn,
) -> Vec<GroupTotal> {
    let mut totals: Vec<GroupTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in view.records() {
        let label = record.category(dimension);
        let position = *positions.entry(label).or_insert_with(|| {
            totals.push(GroupTotal {
                group: label.to_string(),
                value: 0.0,
            });
            totals.len() - 1
        });

        totals[position].value += match value.metric() {
            None => 1.0,
            Some(metric) => record.metric(metric).unwrap_or(0.0),
        };
    }

    totals
}
