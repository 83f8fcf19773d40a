//! Result preprocessing: ordering and exact-span deduplication

use crate::anonymization::models::DetectionResult;
use std::cmp::Ordering;

/// Sort results by start ascending, then score descending, and drop
/// results whose `(start, end)` equals the last kept result
///
/// Partially overlapping results are kept. The sort is stable, so among
/// equal spans with equal scores the first one supplied survives.
pub fn preprocess(results: &[DetectionResult]) -> Vec<DetectionResult> {
    preprocess_counted(results).0
}

/// [`preprocess`], also returning how many duplicates were dropped
pub fn preprocess_counted(results: &[DetectionResult]) -> (Vec<DetectionResult>, usize) {
    let mut sorted = results.to_vec();
    sorted.sort_by(|a, b| {
        a.location
            .start
            .cmp(&b.location.start)
            .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
    });

    let before = sorted.len();
    sorted.dedup_by(|current, kept| current.same_span(kept));
    let removed = before - sorted.len();

    (sorted, removed)
}
