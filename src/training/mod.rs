mod observer;
mod trainer;
mod trajectory;

pub use observer::{Observation, Observer, ParameterLogger};
pub use trainer::{ObserveEvery, PerceptronTrainer, TrainReport};
pub use trajectory::Trajectory;
