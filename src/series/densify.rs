//! Gap filling
//!
//! Second stage of the aggregation pipeline: a sparse ascending series in, a
//! contiguous series out, with zero counts for every period the sparse input
//! skipped. The range is data-driven: it spans exactly from the first to the
//! last key of the input, both inclusive. Nothing is synthesized for an
//! empty input.

use super::error::{SeriesError, SeriesResult};
use super::granularity::Granularity;
use super::period::Period;
use super::types::SeriesPoint;
use std::collections::HashMap;

/// Fill the gaps of a sparse ascending series
///
/// Walks the calendar from the first to the last key of `series`, one
/// period at a time, emitting the input count where the period is present
/// and 0 where it is absent. Densifying an already-dense series returns it
/// unchanged, and an empty series is returned as-is.
///
/// Every input key must be the canonical form for `granularity`, and keys
/// must be strictly ascending; violations are `InvalidKey` and
/// `NotAscending` errors, never silent repairs. The output sums to the
/// same total as the input.
pub fn densify(series: Vec<SeriesPoint>, granularity: Granularity) -> SeriesResult<Vec<SeriesPoint>> {
    if series.is_empty() {
        return Ok(series);
    }

    let mut periods = Vec::with_capacity(series.len());
    for point in &series {
        periods.push(Period::parse_key(&point.key, granularity)?);
    }
    for pair in periods.windows(2) {
        if pair[0] >= pair[1] {
            return Err(SeriesError::NotAscending {
                prev: pair[0].key(),
                next: pair[1].key(),
            });
        }
    }

    let counts: HashMap<&str, u64> = series
        .iter()
        .map(|point| (point.key.as_str(), point.count))
        .collect();

    let first = periods[0];
    let last = periods[periods.len() - 1];

    // Inclusive walk: emit, then stop on the last key before stepping. The
    // successor strictly increases and `last` is a valid period, so equality
    // is reached before any overflow can occur.
    let mut dense = Vec::with_capacity(series.len());
    let mut current = first;
    loop {
        let key = current.key();
        let count = counts.get(key.as_str()).copied().unwrap_or(0);
        dense.push(SeriesPoint { key, count });
        if current == last {
            break;
        }
        current = current.successor()?;
    }

    Ok(dense)
}
