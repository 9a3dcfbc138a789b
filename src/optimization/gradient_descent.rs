use ndarray::{ArrayView1, ArrayViewMut1};

use super::Optimizer;

/// Plain gradient descent with a fixed step length.
///
/// With the perceptron criterion gradient a step of length `1.0` is exactly the classic
/// mistake-driven update.
#[derive(Clone, Copy, Debug)]
pub struct GradientDescent {
    learn_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learn_rate` - How far each step moves against the gradient.
    pub fn new(learn_rate: f32) -> Self {
        Self { learn_rate }
    }

    pub fn learn_rate(&self) -> f32 {
        self.learn_rate
    }
}

impl Optimizer for GradientDescent {
    /// Moves `params` by `-learn_rate * grad`, the shorter of the two lengths wins.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        let n = params.len().min(grad.len());

        let mut params = ArrayViewMut1::from(&mut params[..n]);
        params.scaled_add(-self.learn_rate, &ArrayView1::from(&grad[..n]));
    }
}
