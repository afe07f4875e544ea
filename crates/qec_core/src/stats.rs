//! Aggregation of trial results.

use crate::decoder::DecodeStatus;
use crate::runner::TrialResult;
use crate::syndrome::Syndrome;
use serde::Serialize;
use std::collections::BTreeMap;

/// Count and decoded meaning of one observed syndrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyndromeTally {
    pub count: u64,
    pub description: String,
    pub status: DecodeStatus,
}

/// Totals over a batch of trials.
///
/// [`RunStatistics::merge`] is associative and commutative, so batches can
/// be reduced in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Completed trials. Dropped trials are not included.
    pub total_trials: u64,
    pub successes: u64,
    pub dropped_trials: u64,
    pub ambiguous_trials: u64,
    pub per_syndrome: BTreeMap<Syndrome, SyndromeTally>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &TrialResult) {
        self.record_n(result, 1);
    }

    /// Records `count` identical trials, as produced by one histogram bucket.
    pub fn record_n(&mut self, result: &TrialResult, count: u64) {
        if count == 0 {
            return;
        }
        self.total_trials += count;
        if result.matched_expected {
            self.successes += count;
        }
        if result.status.is_ambiguous() {
            self.ambiguous_trials += count;
        }
        self.per_syndrome
            .entry(result.syndrome.clone())
            .or_insert_with(|| SyndromeTally {
                count: 0,
                description: result.description.clone(),
                status: result.status,
            })
            .count += count;
    }

    pub fn record_dropped(&mut self, count: u64) {
        self.dropped_trials += count;
    }

    /// Adds `other`'s counts into `self`.
    pub fn merge(&mut self, other: RunStatistics) {
        self.total_trials += other.total_trials;
        self.successes += other.successes;
        self.dropped_trials += other.dropped_trials;
        self.ambiguous_trials += other.ambiguous_trials;
        for (syndrome, tally) in other.per_syndrome {
            let count = tally.count;
            self.per_syndrome
                .entry(syndrome)
                .and_modify(|t| t.count += count)
                .or_insert(tally);
        }
    }

    /// Fraction of completed trials that recovered their input, `0.0` if
    /// none completed.
    pub fn success_rate(&self) -> f64 {
        if self.total_trials == 0 {
            0.0
        } else {
            self.successes as f64 / self.total_trials as f64
        }
    }

    pub fn failures(&self) -> u64 {
        self.total_trials - self.successes
    }

    /// Trials attempted, completed or not.
    pub fn attempted(&self) -> u64 {
        self.total_trials + self.dropped_trials
    }

    /// Observed syndromes by descending count, ties by syndrome string.
    pub fn by_frequency(&self) -> Vec<(&Syndrome, &SyndromeTally)> {
        let mut rows: Vec<_> = self.per_syndrome.iter().collect();
        rows.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then_with(|| a.0.to_string().cmp(&b.0.to_string()))
        });
        rows
    }
}

/// Folds trial results into one [`RunStatistics`].
pub fn aggregate<'a, I>(results: I) -> RunStatistics
where
    I: IntoIterator<Item = &'a TrialResult>,
{
    let mut stats = RunStatistics::new();
    for result in results {
        stats.record(result);
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::PauliString;

    fn trial(syndrome: &str, ok: bool, status: DecodeStatus) -> TrialResult {
        TrialResult {
            syndrome: syndrome.parse().unwrap(),
            applied_correction: PauliString::identity(3),
            recovered_logical: vec![ok],
            matched_expected: ok,
            status,
            description: "no error".into(),
            injected: PauliString::identity(3),
            applied_errors: Vec::new(),
        }
    }

    #[test]
    fn aggregate_tallies_successes_and_syndromes() {
        let results = vec![
            trial("00", true, DecodeStatus::Trivial),
            trial("11", true, DecodeStatus::Corrected),
            trial("11", false, DecodeStatus::Corrected),
            trial("10", true, DecodeStatus::Corrected),
        ];
        let stats = aggregate(&results);
        assert_eq!(stats.total_trials, 4);
        assert_eq!(stats.successes, 3);
        assert_eq!(stats.failures(), 1);
        assert!((stats.success_rate() - 0.75).abs() < 1e-12);
        let order: Vec<String> = stats.by_frequency().iter().map(|(s, _)| s.to_string()).collect();
        assert_eq!(order, ["11", "00", "10"]);
    }

    #[test]
    fn merge_is_order_independent() {
        let a = aggregate(&[trial("01", true, DecodeStatus::Corrected)]);
        let mut b = aggregate(&[
            trial("01", false, DecodeStatus::Corrected),
            trial("00", true, DecodeStatus::Trivial),
        ]);
        b.record_dropped(2);

        let mut ab = a.clone();
        ab.merge(b.clone());
        let mut ba = b;
        ba.merge(a);
        assert_eq!(ab, ba);
        assert_eq!(ab.per_syndrome[&"01".parse::<Syndrome>().unwrap()].count, 2);
        assert_eq!(ab.attempted(), 5);
    }

    #[test]
    fn empty_statistics_have_zero_rate() {
        let stats = RunStatistics::new();
        assert_eq!(stats.success_rate(), 0.0);
        assert!(stats.by_frequency().is_empty());
    }
}
