//! Chart geometry shared by the terminal charts and the PNG export.

use crate::pairings::{CrossTab, FoodCount};

/// One wine's slice of a food's stacked bar, in count units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackedSegment {
    pub wine_idx: usize,
    pub start: u64,
    pub end: u64,
}

impl StackedSegment {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Stack each food's wine counts in wine order; zero counts are skipped.
/// The outer vector follows `tab.foods`.
pub fn stacked_segments(tab: &CrossTab) -> Vec<Vec<StackedSegment>> {
    tab.counts
        .iter()
        .map(|row| {
            let mut start = 0;
            row.iter()
                .enumerate()
                .filter(|&(_, &n)| n > 0)
                .map(|(wine_idx, &n)| {
                    let seg = StackedSegment {
                        wine_idx,
                        start,
                        end: start + n,
                    };
                    start += n;
                    seg
                })
                .collect()
        })
        .collect()
}

/// Largest count in a ranking (0 when empty).
pub fn max_count(frequencies: &[FoodCount]) -> u64 {
    frequencies.iter().map(|f| f.count).max().unwrap_or(0)
}

/// Map `[start, end)` in count units onto `[0, width)` cells, rounding both
/// edges so adjacent segments tile without gaps.
pub fn scale_span(start: u64, end: u64, max: u64, width: u16) -> (u16, u16) {
    if max == 0 || width == 0 {
        return (0, 0);
    }
    let edge = |v: u64| ((v as f64 / max as f64) * width as f64).round() as u16;
    let (a, b) = (edge(start), edge(end));
    (a.min(width), b.min(width))
}
