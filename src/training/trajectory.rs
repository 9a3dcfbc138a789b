use log::debug;
use ndarray::{Array1, ArrayView1};

use super::Observation;
use crate::{arch::ParamValue, HyperplaneErr, Result};

/// The weights and biases captured while training, one pair per training iteration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    weights: Vec<Array1<f32>>,
    biases: Vec<f32>,
}

impl Trajectory {
    /// Splits an ordered stream of observations into weights and biases.
    ///
    /// Observations named `"w"` must carry a vector and those named `"bias"` a scalar, any
    /// other name is skipped.
    ///
    /// # Arguments
    /// * `observations` - The observations in the order they were produced.
    ///
    /// # Returns
    /// A new `Trajectory` or an error if a known name carries the wrong kind of value or there
    /// isn't a bias for every weight vector.
    pub fn from_observations<'a, I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut trajectory = Self::default();

        for obs in observations {
            let unexpected = || HyperplaneErr::UnexpectedValue {
                name: obs.name().to_string(),
                step: obs.step(),
            };

            match (obs.name(), obs.value()) {
                ("w", ParamValue::Vector(w)) => trajectory.weights.push(w.clone()),
                ("bias", ParamValue::Scalar(b)) => trajectory.biases.push(*b),
                ("w" | "bias", _) => return Err(unexpected()),
                (name, _) => debug!("skipping observation '{name}' at step {}", obs.step()),
            }
        }

        if trajectory.weights.len() != trajectory.biases.len() {
            return Err(HyperplaneErr::ObservationMismatch {
                weights: trajectory.weights.len(),
                biases: trajectory.biases.len(),
            });
        }

        Ok(trajectory)
    }

    /// Returns the amount of captured iterations.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Returns the weights and bias of iteration `idx`.
    pub fn get(&self, idx: usize) -> Option<(ArrayView1<'_, f32>, f32)> {
        let w = self.weights.get(idx)?;
        let b = self.biases.get(idx)?;
        Some((w.view(), *b))
    }

    pub fn weights(&self) -> &[Array1<f32>] {
        &self.weights
    }

    pub fn biases(&self) -> &[f32] {
        &self.biases
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn w(step: usize, a: f32, b: f32) -> Observation {
        Observation::new(step, "w", ParamValue::Vector(array![a, b]))
    }

    fn bias(step: usize, b: f32) -> Observation {
        Observation::new(step, "bias", ParamValue::Scalar(b))
    }

    #[test]
    fn pairs_keep_the_iteration_order() {
        let obs = [w(1, 1., 2.), bias(1, 3.), w(2, 4., 5.), bias(2, 6.)];
        let t = Trajectory::from_observations(&obs).unwrap();

        assert_eq!(t.len(), 2);
        assert_eq!(t.get(1), Some((array![4., 5.].view(), 6.)));
        assert_eq!(t.biases(), [3., 6.]);
    }

    #[test]
    fn unknown_names_are_skipped() {
        let obs = [
            w(1, 1., 2.),
            Observation::new(1, "loss", ParamValue::Scalar(0.3)),
            bias(1, 3.),
        ];

        assert_eq!(Trajectory::from_observations(&obs).unwrap().len(), 1);
    }

    #[test]
    fn missing_bias_is_a_mismatch() {
        let obs = [w(1, 1., 2.), bias(1, 3.), w(2, 4., 5.)];

        assert!(matches!(
            Trajectory::from_observations(&obs),
            Err(HyperplaneErr::ObservationMismatch {
                weights: 2,
                biases: 1
            })
        ));
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let obs = [Observation::new(4, "bias", ParamValue::Vector(array![1.]))];

        assert!(matches!(
            Trajectory::from_observations(&obs),
            Err(HyperplaneErr::UnexpectedValue { step: 4, .. })
        ));
    }

    #[test]
    fn no_observations_no_frames() {
        let none: [Observation; 0] = [];
        let t = Trajectory::from_observations(&none).unwrap();
        assert!(t.is_empty());
    }
}
