//! Duration-based selection of the search result to download

use crate::entry::ExpectedDuration;
use crate::error::MatchError;
use crate::search::SearchResult;
use tracing::debug;

/// Default relative duration tolerance
pub const DURATION_TOLERANCE: f64 = 0.05;

/// Id of the first result whose duration is within `tolerance` of the
/// entry's expected duration. Results are taken in the order given.
pub fn find_best_match<E: ExpectedDuration + ?Sized>(
    entry: &E,
    results: &[SearchResult],
    tolerance: f64,
) -> Result<String, MatchError> {
    let expected = entry.expected_duration();

    results
        .iter()
        .find(|result| is_duration_acceptable(expected, result.duration_secs, tolerance))
        .map(|result| {
            debug!(
                "Matched {} to {} ({}s, expected {}s)",
                entry.display_name(),
                result.id,
                result.duration_secs,
                expected
            );
            result.id.clone()
        })
        .ok_or_else(|| MatchError::NoMatchingVideo(entry.display_name()))
}

/// Strictly within the relative tolerance. A zero expectation matches nothing.
pub fn is_duration_acceptable(expected: u64, candidate: u64, tolerance: f64) -> bool {
    if expected == 0 {
        return false;
    }
    expected.abs_diff(candidate) as f64 / (expected as f64) < tolerance
}
