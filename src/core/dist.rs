//! Validated probability distributions over actions.
//!
//! Chance nodes hand the engine a raw `action -> probability` listing;
//! [`ChanceDistribution`] is the single place that listing is checked
//! (non-negative, finite, summing to ~1) before anything samples from it or
//! averages over it. Malformed distributions are fatal at the point of
//! consumption.

use crate::core::error::{Result, SearchError};
use crate::core::rng::GameRng;

/// Slack allowed when checking that probabilities sum to 1.
const NORMALIZATION_TOLERANCE: f64 = 1e-6;

/// A validated weighted distribution over actions.
///
/// Construction fails unless every probability is finite and non-negative
/// and the probabilities sum to 1 within [`NORMALIZATION_TOLERANCE`].
/// Entries keep their given order, so sampling is deterministic for a fixed
/// RNG stream.
#[derive(Clone, Debug)]
pub struct ChanceDistribution<A> {
    entries: Vec<(A, f64)>,
}

impl<A: std::fmt::Debug> ChanceDistribution<A> {
    /// Validate and wrap raw `(action, probability)` pairs.
    pub fn new(entries: Vec<(A, f64)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SearchError::InvalidDistribution(
                "distribution has no entries".into(),
            ));
        }

        let mut total = 0.0;
        for (action, p) in &entries {
            if !p.is_finite() || *p < 0.0 {
                return Err(SearchError::InvalidDistribution(format!(
                    "action {:?} has probability {}",
                    action, p
                )));
            }
            total += p;
        }

        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            return Err(SearchError::InvalidDistribution(format!(
                "probabilities sum to {}, expected 1",
                total
            )));
        }

        Ok(Self { entries })
    }

    /// Check that every entry names a member of the legal-action set.
    pub fn check_membership(&self, legal: &[A]) -> Result<()>
    where
        A: PartialEq,
    {
        for (action, _) in &self.entries {
            if !legal.contains(action) {
                return Err(SearchError::InvalidDistribution(format!(
                    "action {:?} is outside the legal set",
                    action
                )));
            }
        }
        Ok(())
    }

    /// Sample an action proportionally to its probability.
    pub fn sample(&self, rng: &mut GameRng) -> &A {
        let total: f64 = self.entries.iter().map(|(_, p)| *p).sum();
        let mut threshold = rng.gen_f64() * total;

        for (action, p) in &self.entries {
            threshold -= p;
            if threshold <= 0.0 {
                return action;
            }
        }

        // Floating point edge case - fall through to the last entry
        &self.entries[self.entries.len() - 1].0
    }

    /// Iterate over `(action, probability)` pairs in entry order.
    pub fn iter(&self) -> impl Iterator<Item = (&A, f64)> {
        self.entries.iter().map(|(a, p)| (a, *p))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the distribution has no entries (never true after validation).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
