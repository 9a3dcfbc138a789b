//! Trains a perceptron on 2-D data while logging its parameters, then animates how the decision
//! line moved during training.

pub mod arch;
pub mod config;
pub mod data;
pub mod error;
pub mod optimization;
pub mod pipeline;
pub mod render;
pub mod training;

pub use error::{HyperplaneErr, Result};
