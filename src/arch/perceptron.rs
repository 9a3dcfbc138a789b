use ndarray::{Array1, ArrayView1};

use super::{activations::Sign, ParamValue};
use crate::{
    data::{BinaryLabels, Features},
    HyperplaneErr, Result,
};

/// A binary linear classifier `sign(w·x + b)`.
///
/// The parameters are stored in a single flat buffer laid out as `[w_0, .., w_{d-1}, b]`,
/// which is what the optimizer steps over.
#[derive(Clone, Debug)]
pub struct Perceptron {
    dim: usize,
    params: Vec<f32>,
    sign: Sign,
}

impl Perceptron {
    /// Creates a new `Perceptron` with uniform weights `1 / dim` and a zero bias.
    ///
    /// # Arguments
    /// * `dim` - The amount of features per sample.
    ///
    /// # Returns
    /// A new `Perceptron` instance.
    pub fn new(dim: usize) -> Self {
        let mut params = vec![1. / dim as f32; dim + 1];
        params[dim] = 0.;

        Self {
            dim,
            params,
            sign: Sign::new(),
        }
    }

    /// Returns the size of this model.
    ///
    /// # Returns
    /// The amount of parameters this model has.
    pub fn size(&self) -> usize {
        self.params.len()
    }

    /// Returns the amount of features this model expects.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn weights(&self) -> ArrayView1<'_, f32> {
        self.view_params().0
    }

    pub fn bias(&self) -> f32 {
        self.view_params().1
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut [f32] {
        &mut self.params
    }

    /// Looks up a parameter by name.
    ///
    /// # Arguments
    /// * `name` - Either `"w"` or `"bias"`.
    ///
    /// # Returns
    /// A copy of the parameter or `None` if there's no parameter with that name.
    pub fn parameter(&self, name: &str) -> Option<ParamValue> {
        match name {
            "w" => Some(ParamValue::Vector(self.weights().to_owned())),
            "bias" => Some(ParamValue::Scalar(self.bias())),
            _ => None,
        }
    }

    /// Computes the raw output `w·x + b` for a single sample.
    pub fn decision(&self, x: ArrayView1<f32>) -> f32 {
        let (w, b) = self.view_params();
        w.dot(&x) + b
    }

    /// Computes `sign(w·x + b)`, zero included.
    pub fn sign(&self, x: ArrayView1<f32>) -> f32 {
        self.sign.f(self.decision(x))
    }

    /// Labels every sample in `features`.
    ///
    /// # Returns
    /// The predicted labels or a `SizeMismatch` if the samples don't have `dim` features.
    pub fn apply(&self, features: &Features) -> Result<BinaryLabels> {
        self.check_dim(features)?;

        let labels: Array1<f32> = features
            .vectors()
            .map(|x| self.sign.label(self.decision(x)))
            .collect();

        BinaryLabels::new(labels)
    }

    pub(crate) fn check_dim(&self, features: &Features) -> Result<()> {
        if features.num_features() != self.dim {
            return Err(HyperplaneErr::SizeMismatch {
                a: "features",
                b: "model weights",
                got: features.num_features(),
                expected: self.dim,
            });
        }

        Ok(())
    }

    /// Gives a view of the raw parameter slice as the weights and bias of this model.
    fn view_params(&self) -> (ArrayView1<'_, f32>, f32) {
        let (w, b) = self.params.split_at(self.dim);
        (ArrayView1::from(w), b[0])
    }
}
