//! # biased_die
//!
//! A loaded die over arbitrary keys: weighted random choice with O(1) draws.
//!
//! The crate builds a table with
//! [Vose's alias method](https://www.keithschwarz.com/darts-dice-coins/)
//! from `(key, weight)` pairs and then samples keys in constant time with
//! probability proportional to their weight.
//!
//! There are three ways in:
//!
//! 1. **Keyed weights or counts** with [`AliasTable::from_weights`] and
//!    [`AliasTable::from_counts`]. Anything iterable as `(key, weight)` works:
//!    a `HashMap`, a `BTreeMap`, a `Vec` of pairs, a slice of one.
//! 2. **Positional weights** with [`AliasTable::from_probabilities`] and
//!    [`AliasTable::from_counts_seq`], where the keys are `0..len`.
//! 3. **Enums** with the [`WeightedKeys`] derive macro from the companion
//!    `biased_die_macros` crate.
//!
//! ## Quick start
//!
//! ```rust
//! use biased_die::AliasTable;
//!
//! let die = AliasTable::from_counts([("A", 1), ("B", 1), ("C", 2)]).unwrap();
//!
//! let mut rng = rand::rng();
//! let face = die.sample(&mut rng); // &&str
//! assert!(["A", "B", "C"].contains(face));
//! ```
//!
//! ## Enums
//!
//! ```rust
//! use biased_die::WeightedKeys;
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, WeightedKeys)]
//! enum Face {
//!     #[weight(1)] One,
//!     #[weight(1)] Two,
//!     #[weight(4)] Six,
//! }
//!
//! # fn main() -> Result<(), biased_die::ConstructionError> {
//! let die = Face::alias_table()?;
//! assert_eq!(die.probability_of(&Face::Six).map(|p| (p * 6.0).round()), Some(4.0));
//! # Ok(())
//! # }
//! ```
//!
//! A literal negative weight never builds a table, so it is a compile error:
//!
//! ```rust,compile_fail
//! use biased_die::WeightedKeys;
//!
//! #[derive(Copy, Clone, PartialEq, Eq, Hash, WeightedKeys)]
//! enum Face {
//!     #[weight(-1)] Cursed,
//!     #[weight(1)] Fair,
//! }
//! ```
//!
//! ## Performance
//! * **Build**: O(n) time and space.
//! * **Sample**: O(1) per draw (two random numbers, one branch).
//!
//! ## Gotchas
//! * Weights must be finite and non-negative, and must not all be zero.
//! * Duplicate keys collapse: the last weight wins, the first position is kept.
//! * The distribution is fixed. Rebuild the table to change it.

mod error;
mod indexed;
mod vose;

#[cfg(test)]
mod counter;

pub use error::ConstructionError;
pub use vose::VoseTable;

/// Derive macro imported from `biased_die_macros`.
pub use biased_die_macros::WeightedKeys;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use rand::Rng;
use rand::distr::Distribution;

/// A weighted die over keys of type `K`.
///
/// Immutable once built. Sampling takes `&self`, so one table can serve any
/// number of readers as long as each brings its own rng.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AliasTable<K> {
    keys: Vec<K>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    table: VoseTable,
}

/// Trait implemented by the `WeightedKeys` derive macro.
pub trait WeightedKeys: Sized + 'static {
    /// All `(variant, weight)` pairs in declaration order.
    const WEIGHTS: &'static [(Self, f64)];

    /// Build an [`AliasTable`] over the variants.
    ///
    /// # Errors
    /// Same as [`AliasTable::from_weights`].
    fn alias_table() -> Result<AliasTable<Self>, ConstructionError>
    where
        Self: Copy + Hash + Eq,
    {
        AliasTable::from_weights(Self::WEIGHTS.iter().copied())
    }
}

impl<K: Hash + Eq> AliasTable<K> {
    /// Build from any `(key, weight)` iterator.
    ///
    /// A key seen more than once keeps the slot of its first occurrence and
    /// the weight of its last.
    ///
    /// # Errors
    /// * [`ConstructionError::EmptyInput`] if there are no pairs.
    /// * [`ConstructionError::NegativeWeight`] if any weight is negative.
    /// * [`ConstructionError::NonFiniteWeight`] for NaN or infinite weights.
    /// * [`ConstructionError::ZeroTotalWeight`] if the weights sum to zero.
    ///
    /// # Complexity
    /// O(n) time / O(n) space.
    pub fn from_weights<I>(pairs: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let pairs = pairs.into_iter();
        let mut slots: HashMap<K, usize> = HashMap::with_capacity(pairs.size_hint().0);
        let mut weights = Vec::with_capacity(pairs.size_hint().0);
        for (key, weight) in pairs {
            match slots.entry(key) {
                Entry::Occupied(slot) => weights[*slot.get()] = weight,
                Entry::Vacant(slot) => {
                    slot.insert(weights.len());
                    weights.push(weight);
                }
            }
        }

        let table = VoseTable::new(&weights)?;

        let mut keys: Vec<Option<K>> = std::iter::repeat_with(|| None)
            .take(weights.len())
            .collect();
        for (key, slot) in slots {
            keys[slot] = Some(key);
        }
        let keys = keys.into_iter().flatten().collect();

        Ok(Self { keys, table })
    }

    /// Build from integer counts, treated as weights.
    ///
    /// # Errors
    /// Same as [`from_weights`](Self::from_weights); a negative count is a
    /// [`ConstructionError::NegativeWeight`].
    pub fn from_counts<I>(pairs: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (K, i64)>,
    {
        Self::from_weights(pairs.into_iter().map(|(k, c)| (k, c as f64)))
    }

    /// Marginal probability of drawing `key`, or `None` if it is not in the
    /// table. O(n).
    pub fn probability_of(&self, key: &K) -> Option<f64> {
        let slot = self.keys.iter().position(|k| k == key)?;
        Some(self.table.marginals()[slot])
    }
}

impl<K> AliasTable<K> {
    /// Sample a key **by reference**.
    ///
    /// # Panics
    /// Never panics for a built table.
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R) -> &'a K {
        &self.keys[self.table.sample_index(rng)]
    }

    /// Sample a key **by value** (clones the chosen key).
    pub fn sample_owned<R: Rng + ?Sized>(&self, rng: &mut R) -> K
    where
        K: Clone,
    {
        self.sample(rng).clone()
    }

    /// Keys in slot order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Direct acceptance probability per slot.
    pub fn probabilities(&self) -> &[f64] {
        self.table.probabilities()
    }

    /// Alias slot per slot.
    pub fn aliases(&self) -> &[usize] {
        self.table.aliases()
    }

    /// `(key, marginal probability)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.keys.iter().zip(self.table.marginals())
    }

    /// The index-level table backing this one.
    pub fn as_vose(&self) -> &VoseTable {
        &self.table
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false` for a built table.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Clone> Distribution<K> for AliasTable<K> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> K {
        self.sample_owned(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Counter;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::BTreeMap;

    fn assert_close(observed: f64, expected: f64, tolerance: f64) {
        assert!(
            (observed - expected).abs() < tolerance,
            "observed={observed} expected={expected}"
        );
    }

    #[test]
    fn smoke_pairs() {
        let die = AliasTable::from_weights([("a", 1.0), ("b", 3.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let _ = die.sample(&mut rng);
    }

    #[test]
    fn keyed_counts_converge() {
        let _ = env_logger::builder().is_test(true).try_init();

        let die = AliasTable::from_counts([("A", 1), ("B", 1), ("C", 2)]).unwrap();
        let mut rng = StdRng::seed_from_u64(2024);
        let counter = Counter::from_samples((0..200_000).map(|_| *die.sample(&mut rng)));
        let probs = counter.probs();

        assert_close(probs[&"A"], 0.25, 0.01);
        assert_close(probs[&"B"], 0.25, 0.01);
        assert_close(probs[&"C"], 0.50, 0.01);
    }

    #[test]
    fn accepts_maps() {
        let hashed: HashMap<char, f64> = [('x', 0.2), ('y', 0.8)].into_iter().collect();
        let sorted: BTreeMap<char, f64> = [('x', 0.2), ('y', 0.8)].into_iter().collect();

        let from_hash = AliasTable::from_weights(hashed).unwrap();
        let from_btree = AliasTable::from_weights(sorted).unwrap();

        assert_eq!(from_btree.keys(), &['x', 'y']);
        for table in [&from_hash, &from_btree] {
            assert_close(table.probability_of(&'x').unwrap(), 0.2, 1e-9);
            assert_close(table.probability_of(&'y').unwrap(), 0.8, 1e-9);
        }
    }

    #[test]
    fn accepts_sub_slices() {
        let pairs = [("skip", 9.0), ("left", 1.0), ("right", 1.0)];
        let die = AliasTable::from_weights(pairs[1..].iter().copied()).unwrap();
        assert_eq!(die.keys(), &["left", "right"]);
        assert_eq!(die.probability_of(&"skip"), None);
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let die = AliasTable::from_counts([("a", 5), ("b", 1), ("a", 3)]).unwrap();
        assert_eq!(die.keys(), &["a", "b"]);
        assert_close(die.probability_of(&"a").unwrap(), 0.75, 1e-9);
        assert_close(die.probability_of(&"b").unwrap(), 0.25, 1e-9);
    }

    #[test]
    fn overwritten_negative_is_forgiven() {
        let die = AliasTable::from_weights([("a", -1.0), ("b", 1.0), ("a", 1.0)]);
        assert!(die.is_ok());
    }

    #[test]
    fn rejects_bad_inputs() {
        let empty: [(&str, f64); 0] = [];
        assert_eq!(
            AliasTable::from_weights(empty),
            Err(ConstructionError::EmptyInput)
        );
        assert_eq!(
            AliasTable::from_counts([("a", 0), ("b", 0)]),
            Err(ConstructionError::ZeroTotalWeight)
        );
        assert!(matches!(
            AliasTable::from_counts([("a", 4), ("b", -2)]),
            Err(ConstructionError::NegativeWeight { index: 1, .. })
        ));
    }

    #[test]
    fn iter_reports_marginals() {
        let die = AliasTable::from_weights([(10u8, 3.0), (20, 1.0)]).unwrap();
        let collected: Vec<(u8, f64)> = die.iter().map(|(k, p)| (*k, p)).collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].0, 10);
        assert_close(collected[0].1, 0.75, 1e-9);
        assert_close(collected[1].1, 0.25, 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_keys_and_tables() {
        let die = AliasTable::from_counts([("A", 1), ("B", 1), ("C", 2)]).unwrap();
        let json = serde_json::to_value(&die).unwrap();

        assert_eq!(json["keys"], serde_json::json!(["A", "B", "C"]));
        let prob: Vec<f64> = serde_json::from_value(json["prob"].clone()).unwrap();
        let alias: Vec<usize> = serde_json::from_value(json["alias"].clone()).unwrap();
        assert_eq!(prob.len(), die.len());
        for (parsed, &built) in prob.iter().zip(die.probabilities()) {
            assert_close(*parsed, built, 1e-12);
        }
        assert_eq!(alias, die.aliases());
        assert_eq!(json.as_object().map(|o| o.len()), Some(3));
    }

    #[test]
    fn distribution_impl_yields_owned_keys() {
        let die = AliasTable::from_weights([(String::from("only"), 1.0)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let face: String = rng.sample(&die);
        assert_eq!(face, "only");
        assert_eq!(die.len(), 1);
        assert!(!die.is_empty());
    }
}
