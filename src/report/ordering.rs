//! Canonical result ordering
//!
//! Dated results come first, soonest expiry first. Failed probes have no
//! expiry and always sort after every dated result, keeping their relative
//! arrival order. The same ordering backs the results list and the report.

use crate::models::ProbeResult;
use std::cmp::Ordering;

/// Compare two results under the canonical ordering
pub fn compare_results(a: &ProbeResult, b: &ProbeResult) -> Ordering {
    match (a.not_after(), b.not_after()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable in-place sort under the canonical ordering
pub fn sort_results(results: &mut [ProbeResult]) {
    results.sort_by(compare_results);
}
