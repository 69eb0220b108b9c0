//! Interactive trend explorer.
//!
//! Loads the dataset named by `HOTSPOTS_FILE`, then asks which grouping,
//! value and aggregate function to chart and prints the resulting series.

use dialoguer::Select;
use hotspot_map_analytics::{FilteredView, aggregate};
use hotspot_map_analytics_models::{
    AggregateFn, EmptyBucketPolicy, GroupBy, TrendParams, ValueColumn,
};
use hotspot_map_store::{RecordStore, hotspots_file_from_env};

use crate::output::render_trend;

fn select<T: Copy>(
    prompt: &str,
    options: &[T],
    label: impl Fn(T) -> String,
) -> dialoguer::Result<T> {
    let labels: Vec<String> = options.iter().copied().map(label).collect();

    let idx = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[idx])
}

/// Runs the interactive trend explorer.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or a prompt fails.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = hotspots_file_from_env();
    let store = RecordStore::load(&path)?;

    println!("Hotspot Map");
    println!(
        "{} hotspots from {} to {}",
        store.len(),
        store.min_date(),
        store.max_date()
    );
    println!();

    let group_by = select("Group by", GroupBy::all(), |g| g.to_string())?;
    let value = select("Value", ValueColumn::all(), |v| v.label().to_string())?;
    let aggregate_fn = match value {
        ValueColumn::Count => None,
        _ => Some(select("Aggregate function", AggregateFn::all(), |f| f.to_string())?),
    };

    let params = TrendParams {
        group_by,
        value,
        aggregate: aggregate_fn,
        empty_buckets: EmptyBucketPolicy::default(),
    };
    let result = aggregate(&FilteredView::all(&store), &params)?;

    print!("{}", render_trend(&result, value));

    Ok(())
}
