//!
//! The gas sample statistics.
//!

use serde::Serialize;

///
/// The gas sample statistics.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// The minimum sample.
    pub min: u64,
    /// The maximum sample.
    pub max: u64,
    /// The sample average, rounded half up.
    pub average: u64,
    /// The number of samples.
    pub count: usize,
}

impl Statistics {
    ///
    /// Computes the statistics. Returns `None` if there are no samples.
    ///
    pub fn from_samples(samples: &[u64]) -> Option<Self> {
        let min = samples.iter().copied().min()?;
        let max = samples.iter().copied().max()?;
        let count = samples.len();
        let sum: u128 = samples.iter().map(|sample| *sample as u128).sum();
        let average = (sum + (count as u128) / 2) / (count as u128);

        Some(Self {
            min,
            max,
            average: average as u64,
            count,
        })
    }

    ///
    /// Whether all samples are equal.
    ///
    pub fn is_uniform(&self) -> bool {
        self.min == self.max
    }
}

#[cfg(test)]
mod tests {
    use super::Statistics;

    #[test]
    fn empty() {
        assert_eq!(Statistics::from_samples(&[]), None);
    }

    #[test]
    fn order_independent() {
        let forward = Statistics::from_samples(&[21000, 23000, 50000]);
        let backward = Statistics::from_samples(&[50000, 23000, 21000]);
        assert_eq!(forward, backward);

        let statistics = forward.expect("Always exists");
        assert_eq!(statistics.min, 21000);
        assert_eq!(statistics.max, 50000);
        assert_eq!(statistics.average, 31333);
        assert_eq!(statistics.count, 3);
        assert!(!statistics.is_uniform());
    }

    #[test]
    fn average_rounds_half_up() {
        let statistics = Statistics::from_samples(&[1, 2]).expect("Always exists");
        assert_eq!(statistics.average, 2);
        let statistics = Statistics::from_samples(&[1, 1, 2]).expect("Always exists");
        assert_eq!(statistics.average, 1);
    }

    #[test]
    fn no_overflow() {
        let statistics = Statistics::from_samples(&[u64::MAX, u64::MAX]).expect("Always exists");
        assert_eq!(statistics.average, u64::MAX);
        assert!(statistics.is_uniform());
    }
}
