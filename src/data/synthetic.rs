use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::dataset::{BinaryLabels, Features};
use crate::{HyperplaneErr, Result};

/// Generates a linearly separable two-class set in the plane.
///
/// Class `1` lies above the line `y = x + margin` and class `-1` below `y = x - margin`,
/// both inside `[-range, range]`. Samples alternate between the classes.
///
/// # Arguments
/// * `n_per_class` - The amount of samples of each class.
/// * `range` - Half the side of the square the samples are drawn from.
/// * `margin` - Half the width of the empty band between the classes.
/// * `seed` - The seed of the random number generator.
///
/// # Returns
/// The features and their labels.
pub fn separable(
    n_per_class: usize,
    range: f32,
    margin: f32,
    seed: u64,
) -> Result<(Features, BinaryLabels)> {
    if !(range > 0.0) || !(0.0..range).contains(&margin) {
        return Err(HyperplaneErr::InvalidConfig(format!(
            "cannot separate classes by {margin} inside a range of {range}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let n = n_per_class * 2;
    let mut matrix = Array2::zeros((2, n));
    let mut labels = Array1::zeros(n);

    for i in 0..n {
        let label = if i % 2 == 0 { 1.0 } else { -1.0 };
        let (x, y) = loop {
            let x = rng.random_range(-range..range);
            let y = rng.random_range(-range..range);

            if label * (y - x) > margin {
                break (x, y);
            }
        };

        matrix[[0, i]] = x;
        matrix[[1, i]] = y;
        labels[i] = label;
    }

    Ok((Features::new(matrix), BinaryLabels::new(labels)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_separated_by_the_band() {
        let (feats, labels) = separable(20, 5.0, 0.5, 7).unwrap();

        assert_eq!(feats.num_vectors(), 40);
        assert_eq!(labels.len(), 40);

        for (i, v) in feats.vectors().enumerate() {
            assert!(labels.get(i) * (v[1] - v[0]) > 0.5);
        }
    }

    #[test]
    fn same_seed_same_set() {
        assert_eq!(
            separable(5, 3.0, 0.1, 42).unwrap(),
            separable(5, 3.0, 0.1, 42).unwrap()
        );
    }
}
