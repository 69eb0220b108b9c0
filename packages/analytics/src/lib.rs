#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query engine over a loaded hotspot [`RecordStore`].
//!
//! Queries are pure in-memory reads of an immutable store, so any number of
//! them may run concurrently against the same `Arc<RecordStore>`.
//!
//! * [`filter`] selects records by date range and category membership,
//!   producing a [`FilteredView`] that borrows the store.
//! * [`aggregate`] buckets a view by calendar day, optionally per category,
//!   and reduces each bucket to a count, sum, mean or median.
//! * [`group_totals`] reduces a view to one total per category.
//!
//! [`RecordStore`]: hotspot_map_store::RecordStore

pub mod aggregate;
pub mod filter;
mod stats;
pub mod totals;

#[cfg(test)]
mod test_support;

use thiserror::Error;

pub use aggregate::{aggregate, parse_trend_params};
pub use filter::{FilteredView, filter};
pub use totals::group_totals;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The group-by, value and aggregate-function selection is not a valid
    /// combination.
    #[error("Invalid aggregation: {message}")]
    InvalidAggregation {
        /// Description of what went wrong.
        message: String,
    },
}
