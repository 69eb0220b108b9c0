//! Terminal rendering of query results.

use std::fmt::Write as _;

use hotspot_map_analytics_models::{TrendResult, ValueColumn};
use serde::Serialize;

/// Prints `value` to stdout as pretty JSON.
pub fn print_json(value: &impl Serialize) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Renders a trend as one block per series with a `date value` row per
/// point.
pub fn render_trend(result: &TrendResult, value: ValueColumn) -> String {
    let mut out = String::new();

    if result.is_empty() {
        out.push_str("No hotspots match.\n");
        return out;
    }

    for series in &result.series {
        let _ = writeln!(out, "{} ({})", series.group, value.label());
        for point in &series.points {
            let _ = writeln!(out, "  {}  {}", point.date, point.value);
        }
    }

    out
}
