//! Positional constructors: the key of each weight is its index.

use crate::{AliasTable, ConstructionError};

impl AliasTable<usize> {
    /// Build from an ordered sequence of weights; weight `i` belongs to key `i`.
    ///
    /// The weights need not sum to one.
    ///
    /// # Errors
    /// Same as [`AliasTable::from_weights`].
    pub fn from_probabilities<I>(probs: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_weights(probs.into_iter().enumerate())
    }

    /// Build from an ordered sequence of counts; count `i` belongs to key `i`.
    ///
    /// # Errors
    /// Same as [`AliasTable::from_counts`].
    pub fn from_counts_seq<I>(counts: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = i64>,
    {
        Self::from_counts(counts.into_iter().enumerate())
    }
}
