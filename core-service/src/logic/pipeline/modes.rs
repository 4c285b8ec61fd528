//! Mode extraction
//!
//! "Most common, first seen": the value with the highest count wins, and
//! among equal counts the one that appeared first in batch order.

use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::error::{PipelineError, PipelineResult};

use super::types::{Batch, ModeValues};

/// Most frequent item, ties broken by first occurrence. `None` when empty.
pub fn most_common<K, I>(values: I) -> Option<K>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut counts: IndexMap<K, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    // Strictly-greater keeps the earliest key on ties
    counts
        .into_iter()
        .fold(None, |best: Option<(K, usize)>, (value, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}

/// Mode of a float series. `0.0` and `-0.0` count as the same value.
pub fn float_mode<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    most_common(values.into_iter().map(FloatKey)).map(|key| key.0)
}

/// Hashable float, compared by bit pattern
#[derive(Debug, Clone, Copy)]
struct FloatKey(f64);

impl FloatKey {
    fn bits(self) -> u64 {
        if self.0 == 0.0 {
            0
        } else {
            self.0.to_bits()
        }
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// Mode of each feature across the batch.
///
/// Runs after fan-out has succeeded, so every feature here was already
/// read from every reading; a failure means the registry and batch disagree.
pub fn extract_modes(batch: &Batch, features: &[String]) -> PipelineResult<ModeValues> {
    features
        .iter()
        .map(|feature| {
            let values = batch
                .iter()
                .map(|reading| reading.feature(feature))
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|err| PipelineError::Internal(format!("mode extraction failed: {}", err)))?;

            let mode = float_mode(values).ok_or_else(|| {
                PipelineError::Internal(format!("no values for feature '{}'", feature))
            })?;

            Ok((feature.clone(), mode))
        })
        .collect()
}
