//! Histograms and empirical CDFs over 8-bit samples.
//!
//! Everything here works on flattened sample sequences, so the shape of
//! the array the samples came from does not matter. Both the equalizer and
//! the specifier build on these types.
//!
//! ## Types
//!
//! - [`Histogram`]: 256-bin occurrence counts plus the total sample count
//! - [`EmpiricalCdf`]: (intensity, cumulative probability) pairs over the
//!   distinct intensities, strictly increasing in both coordinates
//! - [`DistinctIndex`]: distinct values, their counts and a per-sample
//!   index back into the distinct values

use crate::error::{HistogramError, Result};

/// Number of representable 8-bit intensity levels.
pub const LEVELS: usize = 256;

// ============================================================================
// Histogram
// ============================================================================

/// 256-bin histogram of 8-bit samples.
///
/// Invariant: the bin counts always sum to `total`, and `total >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
    total: u64,
}

impl Histogram {
    /// Count every sample produced by `samples`.
    ///
    /// # Errors
    /// `EmptyInput` if the iterator yields nothing.
    pub fn from_samples<'a, I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a u8>,
    {
        let mut counts = [0u64; LEVELS];
        let mut total = 0u64;
        for &v in samples {
            counts[v as usize] += 1;
            total += 1;
        }

        if total == 0 {
            return Err(HistogramError::EmptyInput("histogram input"));
        }
        Ok(Self { counts, total })
    }

    pub fn counts(&self) -> &[u64; LEVELS] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Occupied bins as (intensity, count), ascending by intensity.
    pub fn distinct(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(v, &count)| (v as u8, count))
    }

    pub fn distinct_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Smallest and largest occupied intensity.
    pub fn range(&self) -> (u8, u8) {
        let mut occupied = self.distinct().map(|(v, _)| v);
        // total >= 1, so at least one bin is occupied
        let min = occupied.next().unwrap_or(0);
        let max = occupied.last().unwrap_or(min);
        (min, max)
    }

    /// Cumulative probability at every level, including unoccupied ones.
    pub fn dense_cdf(&self) -> [f64; LEVELS] {
        let mut cdf = [0.0f64; LEVELS];
        let total = self.total as f64;
        let mut running = 0u64;
        for (v, &count) in self.counts.iter().enumerate() {
            running += count;
            cdf[v] = running as f64 / total;
        }
        cdf
    }

    /// CDF over the occupied intensities only.
    pub fn cdf(&self) -> EmpiricalCdf {
        let distinct = self.distinct_count();
        let mut values = Vec::with_capacity(distinct);
        let mut counts = Vec::with_capacity(distinct);
        for (v, count) in self.distinct() {
            values.push(v);
            counts.push(count);
        }
        EmpiricalCdf::from_counts(values, &counts, self.total)
    }
}

// ============================================================================
// Empirical CDF
// ============================================================================

/// Ordered (intensity, cumulative probability) pairs.
///
/// Never empty; the last probability is 1.0 up to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCdf {
    values: Vec<u8>,
    probabilities: Vec<f64>,
}

impl EmpiricalCdf {
    fn from_counts(values: Vec<u8>, counts: &[u64], total: u64) -> Self {
        let total = total as f64;
        let mut running = 0u64;
        let probabilities = counts
            .iter()
            .map(|&c| {
                running += c;
                running as f64 / total
            })
            .collect();
        Self {
            values,
            probabilities,
        }
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Intensity at cumulative probability `p`.
    ///
    /// Linear between neighbouring CDF points. Queries at or below the first
    /// point return the smallest intensity, queries at or above the last
    /// point the largest. A query equal to a CDF point returns that point's
    /// intensity exactly.
    pub fn interpolate(&self, p: f64) -> f64 {
        let xp = &self.probabilities;
        let fp = &self.values;
        let last = xp.len() - 1;

        // also catches NaN
        if !(p > xp[0]) {
            return fp[0] as f64;
        }
        if p >= xp[last] {
            return fp[last] as f64;
        }

        // first point strictly above p; 1 <= j <= last here
        let j = xp.partition_point(|&q| q <= p);
        let (x0, x1) = (xp[j - 1], xp[j]);
        let (y0, y1) = (fp[j - 1] as f64, fp[j] as f64);
        y0 + (p - x0) * (y1 - y0) / (x1 - x0)
    }
}

// ============================================================================
// Distinct values with inverse index
// ============================================================================

/// Distinct intensities of a sample sequence plus, for every sample, the
/// position of its intensity in `values`.
#[derive(Debug, Clone)]
pub struct DistinctIndex {
    values: Vec<u8>,
    counts: Vec<u64>,
    inverse: Vec<u16>,
}

impl DistinctIndex {
    /// Flatten `samples` (iteration order is kept) and index them.
    ///
    /// # Errors
    /// `EmptyInput` if there are no samples.
    pub fn build<'a, I>(samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a u8>,
    {
        let flat: Vec<u8> = samples.into_iter().copied().collect();
        let histogram = Histogram::from_samples(&flat)?;

        let mut bin_of_value = [0u16; LEVELS];
        let mut values = Vec::with_capacity(histogram.distinct_count());
        let mut counts = Vec::with_capacity(histogram.distinct_count());
        for (bin, (v, count)) in histogram.distinct().enumerate() {
            bin_of_value[v as usize] = bin as u16;
            values.push(v);
            counts.push(count);
        }

        let inverse = flat.iter().map(|&v| bin_of_value[v as usize]).collect();

        Ok(Self {
            values,
            counts,
            inverse,
        })
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// One bin index per sample, in the order the samples were given.
    pub fn inverse(&self) -> &[u16] {
        &self.inverse
    }

    pub fn sample_count(&self) -> usize {
        self.inverse.len()
    }

    pub fn cdf(&self) -> EmpiricalCdf {
        EmpiricalCdf::from_counts(
            self.values.clone(),
            &self.counts,
            self.inverse.len() as u64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_sum_to_total() {
        let samples = [0u8, 0, 5, 5, 5, 255];
        let hist = Histogram::from_samples(&samples).unwrap();

        assert_eq!(hist.total(), 6);
        assert_eq!(hist.counts().iter().sum::<u64>(), 6);
        assert_eq!(hist.counts()[5], 3);
        assert_eq!(hist.distinct().collect::<Vec<_>>(), vec![(0, 2), (5, 3), (255, 1)]);
        assert_eq!(hist.range(), (0, 255));
    }

    #[test]
    fn test_histogram_empty_is_error() {
        let samples: [u8; 0] = [];
        let result = Histogram::from_samples(&samples);

        assert!(matches!(result, Err(HistogramError::EmptyInput(_))));
    }

    #[test]
    fn test_cdf_invariants() {
        let samples = [10u8, 20, 20, 30, 30, 30, 40];
        let cdf = Histogram::from_samples(&samples).unwrap().cdf();

        assert_eq!(cdf.values(), &[10, 20, 30, 40]);
        let p = cdf.probabilities();
        assert!(p.windows(2).all(|w| w[0] < w[1]));
        assert!((p[p.len() - 1] - 1.0).abs() < 1e-12);
        assert!((p[0] - 1.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_cdf() {
        let samples = [42u8; 9];
        let cdf = Histogram::from_samples(&samples).unwrap().cdf();

        assert_eq!(cdf.len(), 1);
        assert_eq!(cdf.probabilities(), &[1.0]);
        assert_eq!(cdf.interpolate(0.0), 42.0);
        assert_eq!(cdf.interpolate(0.5), 42.0);
        assert_eq!(cdf.interpolate(1.0), 42.0);
    }

    #[test]
    fn test_dense_cdf_is_non_decreasing() {
        let samples = [3u8, 3, 100, 200];
        let cdf = Histogram::from_samples(&samples).unwrap().dense_cdf();

        assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(cdf[2], 0.0);
        assert_eq!(cdf[3], 0.5);
        assert_eq!(cdf[150], 0.75);
        assert_eq!(cdf[255], 1.0);
    }

    #[test]
    fn test_interpolate_clamps_and_blends() {
        // values 0 and 100, probabilities 0.5 and 1.0
        let samples = [0u8, 0, 100, 100];
        let cdf = Histogram::from_samples(&samples).unwrap().cdf();

        assert_eq!(cdf.interpolate(0.0), 0.0);
        assert_eq!(cdf.interpolate(0.25), 0.0);
        assert_eq!(cdf.interpolate(0.5), 0.0);
        assert!((cdf.interpolate(0.75) - 50.0).abs() < 1e-9);
        assert_eq!(cdf.interpolate(1.0), 100.0);
        assert_eq!(cdf.interpolate(2.0), 100.0);
        assert_eq!(cdf.interpolate(f64::NAN), 0.0);
    }

    #[test]
    fn test_interpolate_exact_points() {
        let samples: Vec<u8> = (0..=255).collect();
        let cdf = Histogram::from_samples(&samples).unwrap().cdf();

        for (i, &p) in cdf.probabilities().iter().enumerate() {
            assert_eq!(cdf.interpolate(p), cdf.values()[i] as f64);
        }
    }

    #[test]
    fn test_distinct_index_inverse() {
        let samples = [7u8, 3, 7, 9, 3, 3];
        let index = DistinctIndex::build(&samples).unwrap();

        assert_eq!(index.values(), &[3, 7, 9]);
        assert_eq!(index.counts(), &[3, 2, 1]);
        assert_eq!(index.inverse(), &[1, 0, 1, 2, 0, 0]);
        assert_eq!(index.sample_count(), 6);

        for (i, &bin) in index.inverse().iter().enumerate() {
            assert_eq!(index.values()[bin as usize], samples[i]);
        }
    }

    #[test]
    fn test_distinct_index_cdf_matches_histogram_cdf() {
        let samples = [1u8, 2, 2, 8, 8, 8, 8];
        let from_index = DistinctIndex::build(&samples).unwrap().cdf();
        let from_hist = Histogram::from_samples(&samples).unwrap().cdf();

        assert_eq!(from_index, from_hist);
    }

    #[test]
    fn test_distinct_index_empty_is_error() {
        let samples: Vec<u8> = Vec::new();

        assert!(matches!(
            DistinctIndex::build(&samples),
            Err(HistogramError::EmptyInput(_))
        ));
    }
}
