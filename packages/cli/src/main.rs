#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line explorer for wildfire hotspot trends.
//!
//! Every subcommand loads the hotspot CSV, runs one query and prints the
//! result as JSON. Run without a subcommand for the interactive trend
//! explorer.
//!
//! Uses `indicatif-log-bridge` (via [`hotspot_map_cli_utils::init_logger`])
//! so that log lines and the `combine` progress bar never fight for the
//! terminal.

mod interactive;
mod output;

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use hotspot_map_analytics::{aggregate, filter, group_totals, parse_trend_params};
use hotspot_map_analytics_models::{EmptyBucketPolicy, FilterCriteria, ValueColumn};
use hotspot_map_cli_utils::IndicatifProgress;
use hotspot_map_hotspot_models::Dimension;
use hotspot_map_ingest::combine_csv;
use hotspot_map_store::{RecordStore, StoreError, hotspots_file_from_env};
use serde_json::json;

use crate::output::print_json;

#[derive(Parser)]
#[command(name = "hotspot_map", about = "Wildfire hotspot trend explorer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SourceArgs {
    /// Hotspot CSV to load (defaults to `HOTSPOTS_FILE`, then `./hotspots.csv`)
    #[arg(long)]
    file: Option<PathBuf>,
}

impl SourceArgs {
    fn load(&self) -> Result<RecordStore, StoreError> {
        let path = self.file.clone().unwrap_or_else(hotspots_file_from_env);
        RecordStore::load(&path)
    }
}

#[derive(Args)]
struct FilterArgs {
    /// First report day to include (`YYYY-MM-DD`)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last report day to include (`YYYY-MM-DD`)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Comma-separated list of sources to include
    #[arg(long, value_delimiter = ',')]
    sources: Option<Vec<String>>,
    /// Comma-separated list of fuels to include
    #[arg(long, value_delimiter = ',')]
    fuels: Option<Vec<String>>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_date: self.from,
            max_date: self.to,
            sources: self.sources.as_deref().map(to_set),
            fuels: self.fuels.as_deref().map(to_set),
        }
    }
}

fn to_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Subcommand)]
enum Commands {
    /// Print record count, sources, fuels and date range
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the hotspots matching the filters
    Filter {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Maximum number of records to print
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Aggregate hotspots into daily time series
    Trend {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Series grouping: `all`, `source` or `fuel`
        #[arg(long, default_value = "all")]
        group_by: String,
        /// `count`, `fwi`, `ros`, `hfi` or `estarea`
        #[arg(long, default_value = "count")]
        metric: String,
        /// `sum`, `mean` or `median` (required unless the metric is `count`)
        #[arg(long)]
        aggregate: Option<String>,
        /// Days whose hotspots all lack the metric: `zero` or `omit`
        #[arg(long, default_value_t)]
        empty_buckets: EmptyBucketPolicy,
    },
    /// Total a metric per source or fuel
    Totals {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// `source` or `fuel`
        #[arg(long)]
        dimension: Dimension,
        /// `count`, `fwi`, `ros`, `hfi` or `estarea`
        #[arg(long, default_value = "count")]
        metric: ValueColumn,
    },
    /// Combine a directory of per-day CSV files into one file
    Combine {
        /// Directory containing the per-day `.csv` files
        input_dir: PathBuf,
        /// Combined CSV to write
        output_file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = hotspot_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run();
    };

    match command {
        Commands::Summary { source } => {
            let store = source.load()?;
            print_json(&json!({
                "recordCount": store.len(),
                "sourceTypes": store.source_types(),
                "fuelTypes": store.fuel_types(),
                "minDate": store.min_date(),
                "maxDate": store.max_date(),
            }))?;
        }
        Commands::Filter {
            source,
            filters,
            limit,
        } => {
            let store = source.load()?;
            let view = filter(&store, &filters.criteria());
            let records: Vec<_> = view.records().take(limit.unwrap_or(usize::MAX)).collect();
            log::info!("{} of {} hotspots match", view.len(), store.len());
            print_json(&records)?;
        }
        Commands::Trend {
            source,
            filters,
            group_by,
            metric,
            aggregate: aggregate_fn,
            empty_buckets,
        } => {
            let params = parse_trend_params(&group_by, &metric, aggregate_fn.as_deref())?
                .with_empty_buckets(empty_buckets);
            let store = source.load()?;
            let view = filter(&store, &filters.criteria());
            print_json(&aggregate(&view, &params)?)?;
        }
        Commands::Totals {
            source,
            filters,
            dimension,
            metric,
        } => {
            let store = source.load()?;
            let view = filter(&store, &filters.criteria());
            print_json(&group_totals(&view, dimension, metric))?;
        }
        Commands::Combine {
            input_dir,
            output_file,
        } => {
            let progress = IndicatifProgress::files_bar(&multi, "Combining");
            let summary = combine_csv(&input_dir, &output_file, &progress)?;
            print_json(&json!({
                "combined": summary.combined,
                "skipped": summary.skipped,
                "rows": summary.rows,
            }))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_flags_build_criteria() {
        let cli = Cli::parse_from([
            "hotspot_map",
            "filter",
            "--from",
            "2024-07-01",
            "--sources",
            "NASA7,NASA_can",
            "--fuels",
            "",
        ]);
        let Some(Commands::Filter { filters, .. }) = cli.command else {
            panic!("expected filter subcommand");
        };

        let criteria = filters.criteria();
        assert_eq!(criteria.min_date, NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(criteria.max_date, None);
        assert_eq!(
            criteria.sources,
            Some(BTreeSet::from(["NASA7".to_string(), "NASA_can".to_string()]))
        );
        assert_eq!(criteria.fuels, Some(BTreeSet::new()));
    }

    #[test]
    fn trend_defaults_to_daily_counts() {
        let cli = Cli::parse_from(["hotspot_map", "trend"]);
        let Some(Commands::Trend {
            group_by,
            metric,
            aggregate,
            empty_buckets,
            ..
        }) = cli.command
        else {
            panic!("expected trend subcommand");
        };

        assert_eq!(group_by, "all");
        assert_eq!(metric, "count");
        assert_eq!(aggregate, None);
        assert_eq!(empty_buckets, EmptyBucketPolicy::Zero);
    }

    #[test]
    fn totals_parses_typed_selections() {
        let cli = Cli::parse_from([
            "hotspot_map",
            "totals",
            "--dimension",
            "fuel",
            "--metric",
            "estarea",
        ]);
        let Some(Commands::Totals {
            dimension, metric, ..
        }) = cli.command
        else {
            panic!("expected totals subcommand");
        };

        assert_eq!(dimension, Dimension::Fuel);
        assert_eq!(metric, ValueColumn::Estarea);
    }

    #[test]
    fn unknown_dimension_is_rejected() {
        assert!(Cli::try_parse_from(["hotspot_map", "totals", "--dimension", "province"]).is_err());
    }
}
