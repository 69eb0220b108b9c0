//! Date-range and category-membership filtering.
//!
//! A [`FilteredView`] is a list of record positions into a borrowed
//! [`RecordStore`]; nothing is copied until a caller asks for owned records.
//! Views filter further in the same way as the store, so successive filters
//! compose into their conjunction.

use hotspot_map_analytics_models::FilterCriteria;
use hotspot_map_hotspot_models::{Dimension, HotspotRecord};
use hotspot_map_store::RecordStore;

/// Returns whether `record` satisfies every predicate in `criteria`.
///
/// Date bounds are inclusive and compared on the record's calendar day.
#[must_use]
pub fn matches(criteria: &FilterCriteria, record: &HotspotRecord) -> bool {
    let day = record.day();
    if criteria.min_date.is_some_and(|min| day < min) {
        return false;
    }
    if criteria.max_date.is_some_and(|max| day > max) {
        return false;
    }
    Dimension::all().iter().all(|dimension| {
        criteria
            .allowed(*dimension)
            .is_none_or(|allowed| allowed.contains(record.category(*dimension)))
    })
}

/// Selects the records of `store` that satisfy `criteria`.
#[must_use]
pub fn filter<'a>(store: &'a RecordStore, criteria: &FilterCriteria) -> FilteredView<'a> {
    FilteredView::all(store).filter(criteria)
}

/// A read-only selection of records from a [`RecordStore`], in store order.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    store: &'a RecordStore,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view of every record in `store`.
    #[must_use]
    pub fn all(store: &'a RecordStore) -> Self {
        Self {
            store,
            indices: (0..store.len()).collect(),
        }
    }

    /// Narrows this view to the records that also satisfy `criteria`.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Self {
        let records = self.store.records();
        let indices: Vec<usize> = self
            .indices
            .iter()
            .copied()
            .filter(|&i| matches(criteria, &records[i]))
            .collect();

        log::debug!(
            "Filter kept {} of {} hotspots",
            indices.len(),
            self.indices.len()
        );

        Self {
            store: self.store,
            indices,
        }
    }

    /// The store this view selects from.
    #[must_use]
    pub const fn store(&self) -> &'a RecordStore {
        self.store
    }

    /// Positions of the selected records within [`RecordStore::records`].
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of selected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether no records were selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterates the selected records in store order.
    pub fn records(&self) -> impl Iterator<Item = &'a HotspotRecord> + '_ {
        let records = self.store.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    /// Copies the selected records out of the store.
    #[must_use]
    pub fn to_records(&self) -> Vec<HotspotRecord> {
        self.records().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test_support::{day, hotspot, sample_store, store};

    fn criteria_cases() -> Vec<FilterCriteria> {
        vec![
            FilterCriteria::new(),
            FilterCriteria::new().with_min_date(day(2024, 1, 2)),
            FilterCriteria::new().with_max_date(day(2024, 1, 2)),
            FilterCriteria::new()
                .with_min_date(day(2024, 1, 2))
                .with_max_date(day(2024, 1, 3)),
            FilterCriteria::new().with_sources(["NASA7", "NASA_usa"]),
            FilterCriteria::new().with_fuels(["water"]),
            FilterCriteria::new()
                .with_min_date(day(2024, 1, 3))
                .with_sources(["NASA_can"])
                .with_fuels(["C2", "O1a"]),
            FilterCriteria::new().with_sources(Vec::<String>::new()),
            FilterCriteria::new()
                .with_min_date(day(2024, 1, 4))
                .with_max_date(day(2024, 1, 1)),
        ]
    }

    #[test]
    fn filtering_is_sound_and_complete() {
        let store = sample_store();
        for criteria in criteria_cases() {
            let view = filter(&store, &criteria);
            let kept: BTreeSet<usize> = view.indices().iter().copied().collect();

            for (i, record) in store.records().iter().enumerate() {
                assert_eq!(
                    kept.contains(&i),
                    matches(&criteria, record),
                    "record {i} misclassified under {criteria:?}"
                );
            }
        }
    }

    #[test]
    fn date_bounds_are_inclusive_whole_days() {
        let store = sample_store();
        let view = filter(
            &store,
            &FilterCriteria::new()
                .with_min_date(day(2024, 1, 1))
                .with_max_date(day(2024, 1, 1)),
        );
        // 01:00, 10:00 and 23:59 on the first all count.
        assert_eq!(view.len(), 3);
        assert!(view.records().all(|r| r.day() == day(2024, 1, 1)));
    }

    #[test]
    fn inverted_range_is_empty() {
        let store = sample_store();
        let view = filter(
            &store,
            &FilterCriteria::new()
                .with_min_date(day(2024, 1, 3))
                .with_max_date(day(2024, 1, 2)),
        );
        assert!(view.is_empty());
    }

    #[test]
    fn empty_set_excludes_everything_but_absent_set_allows_all() {
        let store = sample_store();
        assert!(filter(&store, &FilterCriteria::new().with_fuels(Vec::<String>::new())).is_empty());
        assert_eq!(filter(&store, &FilterCriteria::new()).len(), store.len());
    }

    #[test]
    fn unknown_category_matches_nothing() {
        let store = sample_store();
        assert!(filter(&store, &FilterCriteria::new().with_sources(["GOES"])).is_empty());
    }

    #[test]
    fn successive_filters_equal_conjunction() {
        let store = sample_store();
        let cases = criteria_cases();
        for first in &cases {
            for second in &cases {
                let chained = filter(&store, first).filter(second);
                let once = filter(&store, &first.and(second));
                assert_eq!(chained.indices(), once.indices());
            }
        }
    }

    #[test]
    fn refiltering_with_same_criteria_is_idempotent() {
        let store = sample_store();
        for criteria in criteria_cases() {
            let view = filter(&store, &criteria);
            assert_eq!(view.filter(&criteria).indices(), view.indices());
        }
    }

    #[test]
    fn view_preserves_store_order() {
        let store = store(vec![
            hotspot("2024-01-05 00:00", "A", "X", None),
            hotspot("2024-01-01 00:00", "B", "X", None),
            hotspot("2024-01-03 00:00", "A", "X", None),
        ]);
        let view = filter(&store, &FilterCriteria::new().with_sources(["A"]));
        assert_eq!(view.indices(), [0, 2]);
        let owned = view.to_records();
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[1].day(), day(2024, 1, 3));
    }

    #[test]
    fn store_is_untouched() {
        let store = sample_store();
        let before = store.records().to_vec();
        let _ = filter(&store, &FilterCriteria::new().with_fuels(["C2"]));
        assert_eq!(store.records(), before.as_slice());
    }
}
