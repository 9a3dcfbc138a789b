use std::path::PathBuf;

use log::{info, warn};

use crate::{
    arch::Perceptron,
    config::{Config, RenderConfig, TrainingConfig},
    data::{BinaryLabels, Dataset},
    render::{self, Animation, ClassPoints, FrameSink},
    training::{ParameterLogger, PerceptronTrainer, TrainReport, Trajectory},
    HyperplaneErr, Result,
};

/// The outcome of the training stage.
#[derive(Debug)]
pub struct Trained {
    pub model: Perceptron,
    pub log: ParameterLogger,
    pub report: TrainReport,
    /// The labels the trained model gives the test samples.
    pub predictions: BinaryLabels,
    /// The final bias, read back from the model by name.
    pub bias: f32,
}

/// What a full run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub report: TrainReport,
    pub observations: usize,
    pub frames: usize,
    pub bias: f32,
    pub output: PathBuf,
}

/// Loads the four data files the config points to.
pub fn ingest(cfg: &Config) -> Result<Dataset> {
    let paths = cfg.data.paths();
    info!("loading data from {}", cfg.data.dir.display());
    paths.load()
}

/// Trains a fresh `Perceptron` on the training split while logging its parameters, then labels
/// the test split.
///
/// # Arguments
/// * `cfg` - The trainer settings.
/// * `dataset` - The loaded data.
///
/// # Returns
/// The trained model together with everything captured while training.
pub fn train(cfg: &TrainingConfig, dataset: &Dataset) -> Result<Trained> {
    let mut model = Perceptron::new(dataset.features_train.num_features());
    let mut log = ParameterLogger::new();
    let mut trainer = PerceptronTrainer::new(cfg.learn_rate, cfg.max_iterations()?)
        .averaged(cfg.averaged)
        .observe_every(cfg.observe_every);

    let report = trainer.train(
        &mut model,
        &dataset.features_train,
        &dataset.labels_train,
        &mut log,
    )?;
    info!("captured {} observations", log.num_observations());

    let predictions = model.apply(&dataset.features_test)?;

    match predictions.accuracy(&dataset.labels_test) {
        Ok(accuracy) => info!("test accuracy: {:.2}%", accuracy * 100.),
        Err(e) => warn!("cannot score the test predictions: {e}"),
    }

    let bias = model
        .parameter("bias")
        .and_then(|b| b.as_scalar())
        .ok_or_else(|| HyperplaneErr::UnexpectedValue {
            name: "bias".into(),
            step: report.updates,
        })?;
    info!("final bias: {bias}");

    Ok(Trained {
        model,
        log,
        report,
        predictions,
        bias,
    })
}

/// Draws one frame per captured training iteration over the training scatter and pushes them
/// into `sink`.
///
/// # Returns
/// The amount of frames written.
pub fn render(
    cfg: &RenderConfig,
    dataset: &Dataset,
    log: &ParameterLogger,
    sink: &mut dyn FrameSink,
) -> Result<usize> {
    let points = ClassPoints::partition(&dataset.features_train, &dataset.labels_train)?;
    let trajectory = Trajectory::from_observations(log.iter())?;
    info!(
        "rendering {} frames over {} points",
        trajectory.len(),
        points.len()
    );

    Animation::new(points, trajectory, cfg.clone()).run(sink)
}

/// Runs every stage with the encoder the configured output calls for.
pub fn run(cfg: &Config) -> Result<RunSummary> {
    cfg.validate()?;

    let dataset = ingest(cfg)?;
    let trained = train(&cfg.training, &dataset)?;

    let mut sink = render::sink_for(&cfg.render);
    let frames = render(&cfg.render, &dataset, &trained.log, sink.as_mut())?;

    Ok(RunSummary {
        report: trained.report,
        observations: trained.log.num_observations(),
        frames,
        bias: trained.bias,
        output: cfg.render.output.clone(),
    })
}
