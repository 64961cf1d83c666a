//! The fixed set of colours the map learns.

use crate::error::{ChromaError, Result};
use crate::som::vector::WeightVector;
use rand::Rng;

/// An ordered, non-empty, immutable collection of sample vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    samples: Vec<WeightVector>,
}

impl SampleSet {
    /// Creates a sample set.
    ///
    /// Fails on an empty collection or on components that are not finite.
    pub fn new(samples: Vec<WeightVector>) -> Result<Self> {
        if samples.is_empty() {
            return Err(ChromaError::EmptyInput(
                "at least one sample colour is required".to_string(),
            ));
        }
        if let Some(i) = samples
            .iter()
            .position(|s| s.iter().any(|c| !c.is_finite()))
        {
            return Err(ChromaError::Config(format!(
                "sample {} has a non-finite component: {:?}",
                i, samples[i]
            )));
        }
        Ok(Self { samples })
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&WeightVector> {
        self.samples.get(index)
    }

    /// Iterates over the samples in order.
    pub fn iter(&self) -> std::slice::Iter<'_, WeightVector> {
        self.samples.iter()
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[WeightVector] {
        &self.samples
    }

    /// Draws one sample uniformly at random, with replacement.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &WeightVector {
        &self.samples[rng.gen_range(0..self.samples.len())]
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a WeightVector;
    type IntoIter = std::slice::Iter<'a, WeightVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(SampleSet::new(vec![]), Err(ChromaError::EmptyInput(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = SampleSet::new(vec![[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0]]);
        assert!(matches!(result, Err(ChromaError::Config(_))));
    }

    #[test]
    fn test_draw_with_replacement() {
        let samples = SampleSet::new(vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let drawn = samples.draw(&mut rng);
            let idx = samples.iter().position(|s| s == drawn).unwrap();
            counts[idx] += 1;
        }

        // Every sample is drawn, roughly uniformly
        for count in counts {
            assert!(count > 800 && count < 1200, "count {} far from uniform", count);
        }
    }

    #[test]
    fn test_accessors() {
        let samples = SampleSet::new(vec![[0.2, 0.4, 0.6]]).unwrap();
        assert_eq!(samples.len(), 1);
        assert!(!samples.is_empty());
        assert_eq!(samples.get(0), Some(&[0.2, 0.4, 0.6]));
        assert_eq!(samples.get(1), None);
        assert_eq!(samples.as_slice().len(), 1);
        assert_eq!((&samples).into_iter().count(), 1);
    }
}
