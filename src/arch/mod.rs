pub mod activations;
mod param;
mod perceptron;

pub use param::ParamValue;
pub use perceptron::Perceptron;
