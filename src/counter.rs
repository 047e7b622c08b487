//! Tallies sampled values into observed frequencies for statistical tests.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Default)]
pub struct Counter<T> {
    counts: HashMap<T, usize>,
}

impl<T: Hash + Eq> Counter<T> {
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut counts = HashMap::new();
        for sample in samples {
            *counts.entry(sample).or_default() += 1;
        }
        Self { counts }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Observed frequency of every value seen; empty when nothing was counted.
    pub fn probs(&self) -> HashMap<T, f64>
    where
        T: Clone,
    {
        let total = self.total();
        if total == 0 {
            return HashMap::new();
        }
        self.counts
            .iter()
            .map(|(k, &c)| (k.clone(), c as f64 / total as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counter_has_no_probs() {
        let counter: Counter<u8> = Counter::from_samples([]);
        assert_eq!(counter.total(), 0);
        assert!(counter.probs().is_empty());
    }

    #[test]
    fn tallies_samples() {
        let counter = Counter::from_samples(["a", "b", "a", "a"]);
        assert_eq!(counter.total(), 4);
        assert_eq!(counter.count(&"a"), 3);
        assert_eq!(counter.count(&"z"), 0);
        assert_eq!(counter.probs()[&"b"], 0.25);
    }
}
