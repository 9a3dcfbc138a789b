use std::num::NonZeroUsize;

use log::{debug, info};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::{Observation, Observer};
use crate::{
    arch::{ParamValue, Perceptron},
    data::{BinaryLabels, Features},
    optimization::{GradientDescent, Optimizer},
    HyperplaneErr, Result,
};

/// How often the trainer reports the model's parameters to its observer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserveEvery {
    /// After every parameter update.
    #[default]
    Update,
    /// After every full pass over the samples.
    Pass,
}

/// Summary of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainReport {
    pub passes: usize,
    pub updates: usize,
    pub converged: bool,
}

/// Trains a `Perceptron` with the (averaged) perceptron rule.
///
/// A misclassified sample `(x, y)` yields the perceptron criterion gradient `[-y·x, -y]`,
/// so a gradient descent step of length `learn_rate` is the classic `w += lr·y·x, b += lr·y`.
pub struct PerceptronTrainer<O: Optimizer> {
    optimizer: O,
    max_iterations: NonZeroUsize,
    averaged: bool,
    observe_every: ObserveEvery,
}

impl PerceptronTrainer<GradientDescent> {
    /// Returns a new `PerceptronTrainer` stepping with gradient descent.
    ///
    /// # Arguments
    /// * `learn_rate` - The length of each update.
    /// * `max_iterations` - The maximum amount of passes over the samples.
    pub fn new(learn_rate: f32, max_iterations: NonZeroUsize) -> Self {
        Self::with_optimizer(GradientDescent::new(learn_rate), max_iterations)
    }
}

impl<O: Optimizer> PerceptronTrainer<O> {
    /// Returns a new averaging `PerceptronTrainer` that observes every update.
    ///
    /// # Arguments
    /// * `optimizer` - Dictates how to update the parameters on each misclassified sample.
    /// * `max_iterations` - The maximum amount of passes over the samples.
    pub fn with_optimizer(optimizer: O, max_iterations: NonZeroUsize) -> Self {
        Self {
            optimizer,
            max_iterations,
            averaged: true,
            observe_every: ObserveEvery::Update,
        }
    }

    /// Sets whether the final parameters are the average over every visited sample.
    pub fn averaged(mut self, averaged: bool) -> Self {
        self.averaged = averaged;
        self
    }

    pub fn observe_every(mut self, observe_every: ObserveEvery) -> Self {
        self.observe_every = observe_every;
        self
    }

    /// Trains `model` until a full pass makes no mistakes or the pass cap is reached.
    ///
    /// Every observation is a copy of the running (non averaged) parameters, `"w"` first and
    /// `"bias"` second.
    ///
    /// # Arguments
    /// * `model` - The model to train, it's parameters are the starting point.
    /// * `features` - The training samples.
    /// * `labels` - One label per sample.
    /// * `observer` - Receives the parameters while training.
    ///
    /// # Returns
    /// A `TrainReport` or an error if the data is empty or doesn't fit the model.
    pub fn train<Obs: Observer>(
        &mut self,
        model: &mut Perceptron,
        features: &Features,
        labels: &BinaryLabels,
        mut observer: Obs,
    ) -> Result<TrainReport> {
        Self::validate(model, features, labels)?;

        let max = self.max_iterations.get();
        let mut grad = vec![0.; model.size()];
        let mut sums = vec![0.; model.size()];
        let mut passes = 0;
        let mut updates = 0;
        let mut converged = false;

        while !converged && passes < max {
            converged = true;
            info!("iteration {} of max {max}", passes + 1);

            for (i, x) in features.vectors().enumerate() {
                let y = labels.get(i);

                if model.sign(x) != y {
                    converged = false;
                    updates += 1;

                    perceptron_grad(&mut grad, x, y);
                    self.optimizer.update_params(model.params_mut(), &grad);
                    debug!("update {updates} on sample {i}: params {:?}", model.params());

                    if self.observe_every == ObserveEvery::Update {
                        emit(&mut observer, updates, model);
                    }
                }

                for (s, p) in sums.iter_mut().zip(model.params()) {
                    *s += p;
                }
            }

            passes += 1;

            if self.observe_every == ObserveEvery::Pass {
                emit(&mut observer, passes, model);
            }
        }

        if self.averaged {
            let visited = (features.num_vectors() * passes) as f32;
            for (p, s) in model.params_mut().iter_mut().zip(&sums) {
                *p = s / visited;
            }
        }

        info!(
            "finished after {passes} iteration(s) and {updates} update(s), converged: {converged}"
        );

        Ok(TrainReport {
            passes,
            updates,
            converged,
        })
    }

    fn validate(model: &Perceptron, features: &Features, labels: &BinaryLabels) -> Result<()> {
        if features.num_vectors() == 0 {
            return Err(HyperplaneErr::EmptyDataset("training set".into()));
        }

        if features.num_vectors() != labels.len() {
            return Err(HyperplaneErr::SizeMismatch {
                a: "labels",
                b: "feature vectors",
                got: labels.len(),
                expected: features.num_vectors(),
            });
        }

        model.check_dim(features)
    }
}

/// Writes the perceptron criterion gradient of a misclassified sample into `grad`.
fn perceptron_grad(grad: &mut [f32], x: ArrayView1<f32>, y: f32) {
    let (dw, db) = grad.split_at_mut(x.len());

    for (g, xi) in dw.iter_mut().zip(x) {
        *g = -y * xi;
    }

    db[0] = -y;
}

fn emit<Obs: Observer>(observer: &mut Obs, step: usize, model: &Perceptron) {
    let w = ParamValue::Vector(model.weights().to_owned());
    observer.observe(Observation::new(step, "w", w));
    observer.observe(Observation::new(step, "bias", ParamValue::Scalar(model.bias())));
}
