//! Segment ratios ("tick data") for the gauge ring.

use std::sync::Arc;

/// Angular share of each ring segment, as fractions of the full sweep.
pub type TickData = Arc<[f64]>;

/// Sum of the first `count` entries; `count` past the end sums everything.
pub fn sum_till(values: &[f64], count: usize) -> f64 {
    values.iter().take(count).sum()
}

/// `segments` equal shares of `1 / segments`. Zero segments yields an empty list.
pub fn even_tick_data(segments: usize) -> Vec<f64> {
    if segments == 0 {
        return Vec::new();
    }
    let share = 1.0 / segments as f64;
    (0..segments).map(|_| share).collect()
}

/// Replaces the default ratios with the spans between `custom_stops` when any
/// are given.
///
/// Custom stops are segment boundaries in value space. The domain endpoints
/// are implied: `min` is prepended when the first stop lies above it and `max`
/// appended when the last stop lies below it. Stops are expected to be
/// validated (increasing, inside `[min, max]`); zero-width spans are dropped.
pub fn calculate_segment_stops(
    tick_data: Vec<f64>,
    custom_stops: &[f64],
    min: f64,
    max: f64,
) -> Vec<f64> {
    if custom_stops.is_empty() {
        return tick_data;
    }

    let range = max - min;
    let first = custom_stops.first().copied().filter(|&stop| stop > min);
    let last = custom_stops.last().copied().filter(|&stop| stop < max);

    let boundaries: Vec<f64> = std::iter::once(min)
        .filter(|_| first.is_some())
        .chain(custom_stops.iter().copied())
        .chain(std::iter::once(max).filter(|_| last.is_some()))
        .collect();

    boundaries
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / range)
        .filter(|&ratio| ratio > 0.0)
        .collect()
}
