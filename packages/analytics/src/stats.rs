//! Reductions over a bucket's valid metric values.

use hotspot_map_analytics_models::AggregateFn;

/// Applies `f` to `values`. Returns `None` when `values` is empty.
pub fn apply(f: AggregateFn, values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(match f {
        AggregateFn::Sum => sum(values),
        AggregateFn::Mean => mean(values),
        AggregateFn::Median => median(values),
    })
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}

/// Sorts `values` in place.
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        f64::midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_value() {
        for f in AggregateFn::all() {
            assert_eq!(apply(*f, &mut []), None);
        }
    }

    #[test]
    fn sum_and_mean() {
        assert_eq!(apply(AggregateFn::Sum, &mut [10.0, 5.0]), Some(15.0));
        assert_eq!(apply(AggregateFn::Mean, &mut [1.0, 2.0, 6.0]), Some(3.0));
    }

    #[test]
    fn median_interpolates_even_counts() {
        assert_eq!(apply(AggregateFn::Median, &mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn median_of_odd_count_is_middle_value() {
        assert_eq!(apply(AggregateFn::Median, &mut [9.0, 1.0, 5.0]), Some(5.0));
        assert_eq!(apply(AggregateFn::Median, &mut [7.0]), Some(7.0));
    }
}
