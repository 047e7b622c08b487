//! Vose's alias method for O(1) sampling from a discrete distribution.
//!
//! Weights are normalized to probabilities `p[i]`, then every slot whose
//! probability is below the average `1/n` is paired with one at or above it.
//! The small slot keeps `n * p[small]` of its column and lends the rest to
//! the large slot, which is then reclassified. See
//! <https://www.keithschwarz.com/darts-dice-coins/>.

use crate::error::ConstructionError;
use rand::Rng;
use rand::distr::Distribution;

/// Index-level alias table: a probability and an alias per slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VoseTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl VoseTable {
    /// Build the table from non-negative weights. O(n).
    ///
    /// # Errors
    /// * [`ConstructionError::EmptyInput`] if `weights` is empty.
    /// * [`ConstructionError::NegativeWeight`] if any weight is below zero.
    /// * [`ConstructionError::NonFiniteWeight`] for NaN or infinite weights.
    /// * [`ConstructionError::ZeroTotalWeight`] if every weight is zero.
    pub fn new(weights: &[f64]) -> Result<Self, ConstructionError> {
        let n = weights.len();
        if n == 0 {
            return Err(ConstructionError::EmptyInput);
        }

        let mut largest = 0.0f64;
        for (index, &value) in weights.iter().enumerate() {
            if value.is_nan() || value.is_infinite() {
                return Err(ConstructionError::NonFiniteWeight { index, value });
            }
            if value < 0.0 {
                return Err(ConstructionError::NegativeWeight { index, value });
            }
            largest = largest.max(value);
        }
        if largest == 0.0 {
            return Err(ConstructionError::ZeroTotalWeight);
        }

        // Scaling by the largest weight first keeps the sum within `n`.
        let mut p: Vec<f64> = weights.iter().map(|&w| w / largest).collect();
        let total: f64 = p.iter().sum();
        for pi in &mut p {
            *pi /= total;
        }
        let avg = 1.0 / n as f64;

        let mut prob = vec![0.0f64; n];
        let mut alias = (0..n).collect::<Vec<_>>();

        let mut small = Vec::with_capacity(n);
        let mut large = Vec::with_capacity(n);

        // `>= avg` is large, both here and on reclassification.
        for (i, &pi) in p.iter().enumerate() {
            if pi >= avg {
                large.push(i);
            } else {
                small.push(i);
            }
        }

        while !small.is_empty() && !large.is_empty() {
            let (Some(less), Some(more)) = (small.pop(), large.pop()) else {
                break;
            };

            prob[less] = (n as f64 * p[less]).clamp(0.0, 1.0);
            alias[less] = more;

            p[more] += p[less] - avg;

            if p[more] >= avg {
                large.push(more);
            } else {
                small.push(more);
            }
        }

        // Whatever is left is exactly average up to rounding.
        for i in small.into_iter().chain(large) {
            log::trace!("slot {i} settled by drain (p = {}, avg = {avg})", p[i]);
            prob[i] = 1.0;
            alias[i] = i;
        }

        log::debug!("built alias table over {n} slots");
        Ok(Self { prob, alias })
    }

    /// Draw a single slot in O(1).
    #[inline]
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let slot = rng.random_range(0..self.prob.len());
        let coin: f64 = rng.random();
        if coin < self.prob[slot] {
            slot
        } else {
            self.alias[slot]
        }
    }

    /// Probability of accepting each slot directly.
    pub fn probabilities(&self) -> &[f64] {
        &self.prob
    }

    /// Fallback slot for each slot.
    pub fn aliases(&self) -> &[usize] {
        &self.alias
    }

    /// Overall probability that [`sample_index`](Self::sample_index) returns
    /// each slot, reconstructed from the two tables.
    pub fn marginals(&self) -> Vec<f64> {
        let n = self.prob.len();
        let column = 1.0 / n as f64;
        let mut out = vec![0.0f64; n];
        for (i, (&p, &a)) in self.prob.iter().zip(&self.alias).enumerate() {
            out[i] += p * column;
            out[a] += (1.0 - p) * column;
        }
        out
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }
}

impl Distribution<usize> for VoseTable {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.sample_index(rng)
    }
}
