//! Binned sampled-distribution record.
//!
//! A histogram holds a dense grid of bins over 1 to 3 uniform axes. Each
//! axis carries one underflow and one overflow guard bin beyond its declared
//! range, so the stored grid has `bins + 2` cells per axis. Every bin holds
//! an accumulated value and an uncertainty.

use serde::{Deserialize, Serialize};

/// One histogram axis with uniform binning.
///
/// `bins` counts the in-range bins only; guard bins are implicit. Grid
/// coordinate 0 is the underflow bin and `bins + 1` the overflow bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub bins: usize,
    pub low: f64,
    pub high: f64,
}

impl Axis {
    pub fn new(bins: usize, low: f64, high: f64) -> Self {
        Axis { bins, low, high }
    }

    /// Grid cells along this axis, guard bins included.
    pub fn len_with_flows(&self) -> usize {
        self.bins + 2
    }

    /// Grid coordinate for a sample value, mapping out-of-range values to
    /// the guard bins.
    pub fn coord_for(&self, x: f64) -> usize {
        if x < self.low {
            return 0;
        }
        if x >= self.high {
            return self.bins + 1;
        }
        let width = (self.high - self.low) / self.bins as f64;
        let bin = ((x - self.low) / width) as usize;
        // Floating point rounding at the upper edge can land one past the
        // last in-range bin.
        bin.min(self.bins - 1) + 1
    }
}

/// A 1-3 dimensional histogram with guard bins on every axis edge.
///
/// Bins are stored densely in row-major order with the first axis varying
/// fastest. Linear indices run over the full grid, guard bins included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub title: String,
    axes: Vec<Axis>,
    values: Vec<f64>,
    errors: Vec<f64>,
}

impl Histogram {
    /// Create a zero-filled histogram over the given axes.
    ///
    /// Panics if `axes` is empty or has more than 3 entries, or if any axis
    /// has zero bins; these are construction contract violations, not
    /// runtime conditions.
    pub fn new(title: impl Into<String>, axes: Vec<Axis>) -> Self {
        assert!(
            (1..=3).contains(&axes.len()),
            "histogram must have 1 to 3 axes"
        );
        assert!(axes.iter().all(|a| a.bins > 0), "axis must have bins");
        let cells: usize = axes.iter().map(|a| a.len_with_flows()).product();
        Histogram {
            title: title.into(),
            axes,
            values: vec![0.0; cells],
            errors: vec![0.0; cells],
        }
    }

    /// Convenience constructor for a 1D histogram.
    pub fn new_1d(title: impl Into<String>, bins: usize, low: f64, high: f64) -> Self {
        Histogram::new(title, vec![Axis::new(bins, low, high)])
    }

    pub fn dims(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Total grid cells, guard bins included.
    pub fn bin_count(&self) -> usize {
        self.values.len()
    }

    /// Linear index for a full-grid coordinate tuple.
    ///
    /// Returns `None` when the arity does not match the dimensionality or a
    /// coordinate falls outside `0..bins + 2` on its axis.
    pub fn index(&self, coords: &[usize]) -> Option<usize> {
        if coords.len() != self.axes.len() {
            return None;
        }
        let mut index = 0;
        let mut stride = 1;
        for (axis, &c) in self.axes.iter().zip(coords) {
            if c >= axis.len_with_flows() {
                return None;
            }
            index += c * stride;
            stride *= axis.len_with_flows();
        }
        Some(index)
    }

    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn error(&self, index: usize) -> f64 {
        self.errors[index]
    }

    pub fn set_bin(&mut self, index: usize, value: f64, error: f64) {
        self.values[index] = value;
        self.errors[index] = error;
    }

    /// Accumulate one sample into the bin containing `point`.
    ///
    /// Out-of-range coordinates land in the guard bins. Ignores points whose
    /// arity does not match the histogram's dimensionality.
    pub fn fill(&mut self, point: &[f64]) {
        self.fill_weighted(point, 1.0);
    }

    /// Accumulate one weighted sample.
    pub fn fill_weighted(&mut self, point: &[f64], weight: f64) {
        if point.len() != self.axes.len() {
            return;
        }
        let coords: Vec<usize> = self
            .axes
            .iter()
            .zip(point)
            .map(|(axis, &x)| axis.coord_for(x))
            .collect();
        if let Some(index) = self.index(&coords) {
            self.values[index] += weight;
        }
    }

    /// Same title-independent shape: dimensionality, bin counts, and axis
    /// ranges all equal.
    pub fn same_shape(&self, other: &Histogram) -> bool {
        self.axes == other.axes
    }

    /// A zero-filled histogram with this histogram's shape and title.
    pub fn zeroed_like(&self) -> Histogram {
        Histogram::new(self.title.clone(), self.axes.clone())
    }
}
