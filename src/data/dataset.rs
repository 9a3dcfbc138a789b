use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{HyperplaneErr, Result};

/// Dense feature vectors stored column-wise.
///
/// The matrix has one row per coordinate and one column per sample, so for the
/// 2-D data used here row 0 holds every `x` and row 1 every `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    matrix: Array2<f32>,
}

impl Features {
    /// Creates a new `Features` from a `(num_features, num_vectors)` matrix.
    ///
    /// # Arguments
    /// * `matrix` - The feature matrix, columns are samples.
    ///
    /// # Returns
    /// A new `Features` instance.
    pub fn new(matrix: Array2<f32>) -> Self {
        Self { matrix }
    }

    /// Creates a new `Features` from a row-per-sample matrix, the layout the data files use.
    pub fn from_rows(rows: Array2<f32>) -> Self {
        Self {
            matrix: rows.reversed_axes(),
        }
    }

    /// Returns the amount of coordinates per sample.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.matrix.nrows()
    }

    /// Returns the amount of samples.
    #[inline]
    pub fn num_vectors(&self) -> usize {
        self.matrix.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Returns the sample at `idx` (panics if out of bounds).
    #[inline]
    pub fn vector(&self, idx: usize) -> ArrayView1<'_, f32> {
        self.matrix.column(idx)
    }

    /// Iterates the samples in order.
    pub fn vectors(&self) -> impl Iterator<Item = ArrayView1<'_, f32>> {
        self.matrix.axis_iter(Axis(1))
    }

    #[inline]
    pub fn matrix(&self) -> ArrayView2<'_, f32> {
        self.matrix.view()
    }
}

/// Labels of a two-class problem, each one either `1` or `-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLabels {
    labels: Array1<f32>,
}

impl BinaryLabels {
    /// Creates a new `BinaryLabels`.
    ///
    /// # Arguments
    /// * `labels` - One label per sample.
    ///
    /// # Returns
    /// A new `BinaryLabels` instance or `InvalidLabel` if any value is not `1` or `-1`.
    pub fn new(labels: Array1<f32>) -> Result<Self> {
        if let Some((index, &value)) = labels
            .iter()
            .enumerate()
            .find(|&(_, &l)| l != 1.0 && l != -1.0)
        {
            return Err(HyperplaneErr::InvalidLabel { index, value });
        }

        Ok(Self { labels })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at `idx` (panics if out of bounds).
    #[inline]
    pub fn get(&self, idx: usize) -> f32 {
        self.labels[idx]
    }

    #[inline]
    pub fn labels(&self) -> ArrayView1<'_, f32> {
        self.labels.view()
    }

    /// Returns the fraction of labels equal to the ones in `other`.
    ///
    /// # Returns
    /// The accuracy in `[0, 1]` or a `SizeMismatch` if the lengths differ.
    pub fn accuracy(&self, other: &BinaryLabels) -> Result<f32> {
        if self.len() != other.len() {
            return Err(HyperplaneErr::SizeMismatch {
                a: "predicted labels",
                b: "expected labels",
                got: self.len(),
                expected: other.len(),
            });
        }

        if self.is_empty() {
            return Ok(0.0);
        }

        let hits = self
            .labels
            .iter()
            .zip(other.labels.iter())
            .filter(|(a, b)| a == b)
            .count();

        Ok(hits as f32 / self.len() as f32)
    }
}

/// The four containers a run works with.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features_train: Features,
    pub features_test: Features,
    pub labels_train: BinaryLabels,
    pub labels_test: BinaryLabels,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_rows_puts_samples_in_columns() {
        let rows = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let feats = Features::from_rows(rows);

        assert_eq!(feats.num_features(), 2);
        assert_eq!(feats.num_vectors(), 3);
        assert_eq!(feats.vector(1), array![3.0, 4.0]);
        assert_eq!(feats.matrix().row(0), array![1.0, 3.0, 5.0]);
    }

    #[test]
    fn labels_other_than_plus_minus_one_are_rejected() {
        let err = BinaryLabels::new(array![1.0, -1.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            HyperplaneErr::InvalidLabel { index: 2, value } if value == 0.0
        ));
    }

    #[test]
    fn accuracy_counts_matching_labels() {
        let a = BinaryLabels::new(array![1.0, -1.0, 1.0, 1.0]).unwrap();
        let b = BinaryLabels::new(array![1.0, 1.0, 1.0, -1.0]).unwrap();
        assert_eq!(a.accuracy(&b).unwrap(), 0.5);

        let c = BinaryLabels::new(array![1.0]).unwrap();
        assert!(a.accuracy(&c).is_err());
    }
}
