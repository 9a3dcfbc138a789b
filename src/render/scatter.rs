use crate::{
    data::{BinaryLabels, Features},
    HyperplaneErr, Result,
};

/// The training samples split by class for plotting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassPoints {
    /// Samples labeled `1`.
    pub blue: Vec<(f32, f32)>,
    /// Every other sample.
    pub red: Vec<(f32, f32)>,
}

impl ClassPoints {
    /// Splits the first two coordinates of every sample by label.
    ///
    /// # Returns
    /// The split points or a `SizeMismatch` if the samples aren't at least 2-D or there isn't a
    /// label for every sample.
    pub fn partition(features: &Features, labels: &BinaryLabels) -> Result<Self> {
        if features.num_features() < 2 {
            return Err(HyperplaneErr::SizeMismatch {
                a: "features",
                b: "plot axes",
                got: features.num_features(),
                expected: 2,
            });
        }

        if features.num_vectors() != labels.len() {
            return Err(HyperplaneErr::SizeMismatch {
                a: "labels",
                b: "feature vectors",
                got: labels.len(),
                expected: features.num_vectors(),
            });
        }

        let mut points = Self::default();
        for (i, v) in features.vectors().enumerate() {
            let p = (v[0], v[1]);

            if labels.get(i) == 1. {
                points.blue.push(p);
            } else {
                points.red.push(p);
            }
        }

        Ok(points)
    }

    pub fn len(&self) -> usize {
        self.blue.len() + self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bounding box `((x_min, x_max), (y_min, y_max))` of every point.
    pub fn bounds(&self) -> Option<((f32, f32), (f32, f32))> {
        let mut points = self.blue.iter().chain(&self.red);
        let &(x, y) = points.next()?;

        let bounds = points.fold(((x, x), (y, y)), |((x0, x1), (y0, y1)), &(x, y)| {
            ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y)))
        });

        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn positive_labels_are_blue_and_the_rest_red() {
        let feats = Features::from_rows(array![[0., 1.], [2., 3.], [4., 5.], [6., 7.]]);
        let labels = BinaryLabels::new(array![1., -1., 1., -1.]).unwrap();

        let points = ClassPoints::partition(&feats, &labels).unwrap();

        assert_eq!(points.blue, [(0., 1.), (4., 5.)]);
        assert_eq!(points.red, [(2., 3.), (6., 7.)]);
        assert_eq!(points.len(), feats.num_vectors());
    }

    #[test]
    fn one_dimensional_samples_cannot_be_plotted() {
        let feats = Features::from_rows(array![[0.], [1.]]);
        let labels = BinaryLabels::new(array![1., -1.]).unwrap();

        assert!(ClassPoints::partition(&feats, &labels).is_err());
    }

    #[test]
    fn bounds_cover_both_classes() {
        let points = ClassPoints {
            blue: vec![(1., -2.), (3., 0.)],
            red: vec![(-1., 5.)],
        };

        assert_eq!(points.bounds(), Some(((-1., 3.), (-2., 5.))));
        assert_eq!(ClassPoints::default().bounds(), None);
    }
}
