//! Execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement histogram: bitstring to number of shots.
///
/// Character `i` of every bitstring is the outcome of the `i`-th measured
/// qubit, in the order the caller listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` shots to `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Shots recorded for `bitstring` (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The most frequent outcome.
    ///
    /// Ties are broken towards the lexicographically smallest bitstring so
    /// the answer does not depend on hash order.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|(a_bits, a), (b_bits, b)| a.cmp(b).then_with(|| b_bits.cmp(a_bits)))
            .map(|(bits, &count)| (bits.as_str(), count))
    }

    /// Outcomes sorted by descending count, then by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(bits, &count)| (bits.as_str(), count))
            .collect();
        entries.sort_by(|(a_bits, a), (b_bits, b)| b.cmp(a).then_with(|| a_bits.cmp(b_bits)));
        entries
    }

    /// Iterate over `(bitstring, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(bits, &count)| (bits.as_str(), count))
    }
}

/// Result of a backend job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock time spent executing, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result from a histogram.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }

    /// Fraction of shots that produced `bitstring`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.counts.get(bitstring) as f64 / f64::from(self.shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("11", 1);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("00"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let mut counts = Counts::new();
        counts.insert("10", 4);
        counts.insert("01", 4);
        counts.insert("11", 1);
        assert_eq!(counts.most_frequent(), Some(("01", 4)));
        assert_eq!(counts.sorted(), vec![("01", 4), ("10", 4), ("11", 1)]);
        assert!(Counts::new().most_frequent().is_none());
    }

    #[test]
    fn test_probability() {
        let mut counts = Counts::new();
        counts.insert("1", 250);
        counts.insert("0", 750);
        let result = ExecutionResult::new(counts, 1000).with_execution_time(3);
        assert!((result.probability("1") - 0.25).abs() < 1e-12);
        assert_eq!(result.execution_time_ms, Some(3));
    }
}
