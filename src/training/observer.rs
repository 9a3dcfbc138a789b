use crate::arch::ParamValue;

/// A snapshot of one model parameter taken during training.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    step: usize,
    name: String,
    value: ParamValue,
}

impl Observation {
    pub fn new(step: usize, name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            step,
            name: name.into(),
            value,
        }
    }

    /// The training step (update or pass, depending on the granularity) this was taken at.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }
}

/// A sink receiving the parameters of a model while it trains.
///
/// Observations are pushed synchronously and in the order they are produced.
pub trait Observer {
    fn observe(&mut self, observation: Observation);
}

/// Discards every observation.
impl Observer for () {
    fn observe(&mut self, _observation: Observation) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, observation: Observation) {
        (**self).observe(observation)
    }
}

/// An append-only log of every observation received.
#[derive(Debug, Default, Clone)]
pub struct ParameterLogger {
    observations: Vec<Observation>,
}

impl ParameterLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_observations(&self) -> usize {
        self.observations.len()
    }

    pub fn get_observation(&self, idx: usize) -> Option<&Observation> {
        self.observations.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }
}

impl Observer for ParameterLogger {
    fn observe(&mut self, observation: Observation) {
        self.observations.push(observation);
    }
}
